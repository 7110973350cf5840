//! Request extractors that report failures through the error envelope.

mod json;
mod path;
pub use json::ApiJson;
pub use path::ApiPath;
