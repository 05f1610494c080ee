//! Custom request extractors.

mod app_json;
mod validated_json;

pub use app_json::AppJson;
pub use validated_json::ValidatedJson;
