//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod admin_user;
pub mod article;
pub mod article_tag;
pub mod author;
pub mod product;
pub mod tag;
