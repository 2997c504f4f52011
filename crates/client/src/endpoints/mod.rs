//! REST API endpoint implementations.

mod indexes;
mod request;
pub mod url_encoding;

pub use indexes::{create_index, index_exists};
pub use request::send_request;
pub use url_encoding::encode_path_segment;
