//! Domain layer - Core business entities and logic
//!
//! Entities and value objects independent of HTTP and persistence:
//! cocktail records, webhook payloads, products, admin users and
//! blog articles.

pub mod action;
pub mod admin_user;
pub mod article;
pub mod drink;
pub mod fulfillment;
pub mod password;
pub mod product;

pub use action::{Action, UnknownAction};
pub use admin_user::{AdminUser, AdminUserResponse, CreateAdminUser, UpdateAdminUser};
pub use article::{Article, Author, Tag, TaggedArticles};
pub use drink::{Drink, DrinkList, FullDrink, FullDrinkList, Ingredient};
pub use fulfillment::{Context, Fulfillment, Message, QueryResult, RichMessage, WebhookRequest};
pub use password::Password;
pub use product::{Product, ProductInput, ProductResponse};
