pub mod client;
pub mod envelope;
pub mod path;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::{ApiClient, REFRESH_PATH};
pub use envelope::{extract_error_message, message_from_json, unwrap_data};
pub use path::path_segment;
