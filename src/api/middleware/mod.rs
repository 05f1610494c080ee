//! API middleware.

mod session;

pub use session::{require_admin_session, session_token, CurrentAdmin};
