//! OpenAPI documentation served through Swagger UI.
//!
//! Admin paths are documented for an empty prefix.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{admin_handler, article_handler, health_handler, webhook_handler};
use crate::config::SESSION_COOKIE_NAME;
use crate::domain::{
    AdminUserResponse, Article, Author, CreateAdminUser, ProductInput, ProductResponse, Tag,
    TaggedArticles, UpdateAdminUser,
};
use crate::types::PaginationMeta;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "barkeep",
        description = "Cocktail webhook, blog API and product admin"
    ),
    paths(
        health_handler::health,
        webhook_handler::webhook,
        article_handler::get_article,
        article_handler::get_tag,
        admin_handler::list_products,
        admin_handler::get_product,
        admin_handler::create_product,
        admin_handler::update_product,
        admin_handler::delete_product,
        admin_handler::list_admin_users,
        admin_handler::get_admin_user,
        admin_handler::create_admin_user,
        admin_handler::update_admin_user,
        admin_handler::delete_admin_user,
    ),
    components(schemas(
        health_handler::HealthResponse,
        Article,
        Author,
        Tag,
        TaggedArticles,
        ProductInput,
        ProductResponse,
        CreateAdminUser,
        UpdateAdminUser,
        AdminUserResponse,
        PaginationMeta,
    )),
    modifiers(&SessionCookieAddon),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Webhook", description = "Conversational agent fulfillment"),
        (name = "Articles", description = "Blog articles and tags"),
        (name = "Admin", description = "Product and admin user management")
    )
)]
pub struct ApiDoc;

/// Documents the admin session cookie
struct SessionCookieAddon;

impl Modify for SessionCookieAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "admin_session",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE_NAME))),
            );
        }
    }
}
