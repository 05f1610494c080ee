//! Small HTML helpers for the server-rendered pages.

mod html;
mod templates;

pub use html::escape_html;
pub use templates::login_page;
