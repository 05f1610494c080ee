//! Shared types for list and mutation endpoints.

mod pagination;
mod response;

pub use pagination::{Paginated, PaginationMeta, PaginationParams};
pub use response::{Created, NoContent};
