//! Stateless reversible URL encoding.
//!
//! A URL's bytes are read as one big-endian integer and written out in base 62
//! over `0-9A-Za-z`. Leading zero bytes carry no weight in that integer, so each
//! one is kept as a leading `0` character. Decoding runs the same conversion
//! backwards. Nothing is stored: the code *is* the URL.
//!
//! ```ignore
//! let code = base62::encode("example.com/docs");
//! assert_eq!(base62::decode(&code).unwrap(), "example.com/docs");
//! ```

use thiserror::Error;

/// The base-62 digit set, in digit order.
pub const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Longest code accepted by [`decode`].
///
/// Decoding is quadratic in the code length, so untrusted input is capped.
/// A 2048-byte URL encodes to roughly 2750 characters.
pub const MAX_CODE_LEN: usize = 8192;

const BASE: u32 = 62;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("invalid character {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },

    #[error("code is {len} characters long, the limit is {max}")]
    TooLong { len: usize, max: usize },

    #[error("decoded bytes are not valid UTF-8")]
    InvalidUtf8,
}

/// Encodes a URL as a base-62 code.
pub fn encode(url: &str) -> String {
    let bytes = url.as_bytes();
    let zeros = bytes.iter().take_while(|&&b| b == 0).count();

    // Little-endian base-62 digits of the big-endian byte string.
    let mut digits: Vec<u8> = Vec::with_capacity(bytes.len() * 138 / 100 + 1);

    for &byte in &bytes[zeros..] {
        let mut carry = u32::from(byte);

        for digit in digits.iter_mut() {
            carry += u32::from(*digit) << 8;
            *digit = (carry % BASE) as u8;
            carry /= BASE;
        }

        while carry > 0 {
            digits.push((carry % BASE) as u8);
            carry /= BASE;
        }
    }

    let mut code = String::with_capacity(zeros + digits.len());
    code.extend(std::iter::repeat_n('0', zeros));
    code.extend(digits.iter().rev().map(|&d| char::from(ALPHABET[usize::from(d)])));
    code
}

/// Decodes a base-62 code back into the URL it was produced from.
///
/// # Errors
///
/// - [`DecodeError::TooLong`] if the code exceeds [`MAX_CODE_LEN`]
/// - [`DecodeError::InvalidCharacter`] for anything outside [`ALPHABET`]
/// - [`DecodeError::InvalidUtf8`] if the decoded bytes are not a string
pub fn decode(code: &str) -> Result<String, DecodeError> {
    if code.len() > MAX_CODE_LEN {
        return Err(DecodeError::TooLong {
            len: code.len(),
            max: MAX_CODE_LEN,
        });
    }

    let zeros = code.bytes().take_while(|&c| c == b'0').count();

    // Little-endian base-256 digits.
    let mut bytes: Vec<u8> = Vec::with_capacity(code.len());

    for (position, character) in code.char_indices().skip(zeros) {
        let value = digit_value(character).ok_or(DecodeError::InvalidCharacter {
            character,
            position,
        })?;

        let mut carry = u32::from(value);

        for byte in bytes.iter_mut() {
            carry += u32::from(*byte) * BASE;
            *byte = (carry & 0xff) as u8;
            carry >>= 8;
        }

        while carry > 0 {
            bytes.push((carry & 0xff) as u8);
            carry >>= 8;
        }
    }

    let mut out = vec![0u8; zeros];
    out.extend(bytes.iter().rev());

    String::from_utf8(out).map_err(|_| DecodeError::InvalidUtf8)
}

fn digit_value(c: char) -> Option<u8> {
    match c {
        '0'..='9' => Some(c as u8 - b'0'),
        'A'..='Z' => Some(c as u8 - b'A' + 10),
        'a'..='z' => Some(c as u8 - b'a' + 36),
        _ => None,
    }
}
