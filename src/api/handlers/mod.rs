//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod algorithmic;
pub mod health;
pub mod keys;
pub mod links;
pub mod redirect;

pub use algorithmic::{encoded_http_handler, encoded_https_handler};
pub use health::health_handler;
pub use keys::{create_key_handler, get_key_handler, list_keys_handler};
pub use links::{add_url_handler, add_vanity_handler};
pub use redirect::{resolve_handler, root_handler, vanity_handler};
