//! Cache key derivation.

/// Hex MD5 of the URL string: 32 lowercase hex characters, safe as a file name.
///
/// Only the URL participates; a directive's quoted title does not.
pub fn key_for(url: &str) -> String {
    format!("{:x}", md5::compute(url.as_bytes()))
}
