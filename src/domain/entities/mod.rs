//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`ShortLink`] - A generated short identifier mapped to a URL
//! - [`VanityLink`] - A caller-chosen name mapped to a URL
//! - [`ApiKey`] - A hashed API key with its privilege flag
//!
//! Creation inputs that differ from the stored shape get their own struct
//! (`NewApiKey`); keys returned to a caller at creation are wrapped in
//! [`IssuedKey`] so the plaintext never travels with the stored record.

pub mod api_key;
pub mod short_link;
pub mod vanity_link;

pub use api_key::{ApiKey, IssuedKey, KEY_LENGTH, NewApiKey};
pub use short_link::{SHORT_ID_LENGTH, ShortLink};
pub use vanity_link::{MAX_VANITY_NAME_LENGTH, VanityLink};
