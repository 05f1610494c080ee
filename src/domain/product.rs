//! Product domain entity and its tag field codec.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::config::{MAX_TAG_LENGTH, TAG_BADGE_BUDGET};
use crate::utils::escape_html;

/// Product domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    /// Price in the smallest currency unit
    pub price: i32,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft delete timestamp (None = active, Some = deleted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Create a new, not yet persisted product.
    pub fn new(name: String, price: i32, tags: Vec<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            price,
            tags,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }
}

/// Product creation/edit form as submitted by the admin interface.
///
/// Tags travel as a single comma separated string.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ProductInput {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Espresso machine")]
    pub name: String,
    #[validate(range(min = 0, message = "Price cannot be negative"))]
    #[schema(example = 24900)]
    pub price: i32,
    #[serde(default)]
    #[schema(example = "kitchen, coffee")]
    pub tags: String,
}

impl ProductInput {
    /// Tags parsed from the comma separated field.
    pub fn parsed_tags(&self) -> Vec<String> {
        parse_tags(&self.tags)
    }
}

/// Product as shown in admin listings (safe for API responses)
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub price: i32,
    pub tags: Vec<String>,
    /// Tags joined for the edit form
    pub tags_text: String,
    /// HTML badges for the index page
    pub tag_badges: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            tags_text: join_tags(&product.tags),
            tag_badges: tag_badges(&product.tags),
            id: product.id,
            name: product.name,
            price: product.price,
            tags: product.tags,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// Join tags for display in a single text field.
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}

/// Split a comma separated tag field, trimming each tag and dropping blanks.
///
/// Tags longer than the column allows are truncated on a char boundary.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(|tag| tag.chars().take(MAX_TAG_LENGTH).collect())
        .collect()
}

const BADGE_OPEN: &str = r#"<span style="background-color: rgb(33,150,243); padding: 5px; border-radius: 25%; color: white; margin-right: 5px;">"#;
const BADGE_CLOSE: &str = "</span>";
const ELLIPSIS: &str = "…";

fn badge(out: &mut String, text: &str) {
    out.push_str(BADGE_OPEN);
    out.push_str(&escape_html(text));
    out.push_str(BADGE_CLOSE);
}

/// Render tags as inline HTML badges.
///
/// Badges are added while the cumulative tag length stays under the budget;
/// the first tag that would reach it is replaced by a single ellipsis badge.
pub fn tag_badges(tags: &[String]) -> String {
    let mut out = String::new();
    let mut total = 0;

    for tag in tags {
        let len = tag.chars().count();
        if total + len >= TAG_BADGE_BUDGET {
            badge(&mut out, ELLIPSIS);
            break;
        }
        total += len;
        badge(&mut out, tag);
    }

    out
}
