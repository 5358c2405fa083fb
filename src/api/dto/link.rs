//! DTOs for link creation endpoints.

use serde::Deserialize;
use validator::{Validate, ValidationError};

/// Request to create a short link.
#[derive(Debug, Deserialize, Validate)]
pub struct AddUrlRequest {
    /// Destination URL. Stored as given; the column holds at most 2048 characters.
    #[validate(length(min = 1, max = 2048), custom(function = "no_control_chars"))]
    pub url: String,
}

/// Request to create a vanity link.
#[derive(Debug, Deserialize, Validate)]
pub struct AddVanityRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(length(min = 1, max = 2048), custom(function = "no_control_chars"))]
    pub url: String,
}

/// Stored URLs end up in a `Location` header, which cannot carry control characters.
fn no_control_chars(url: &str) -> Result<(), ValidationError> {
    if url.chars().any(char::is_control) {
        return Err(ValidationError::new("control_characters")
            .with_message("URL must not contain control characters".into()));
    }
    Ok(())
}
