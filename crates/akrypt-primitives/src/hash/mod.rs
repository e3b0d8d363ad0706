//! Hash function primitives.
//!
//! Provides Streebog-256 and Streebog-512 (GOST R 34.11-2012) and their HMAC
//! variants (R 50.1.113-2016). The HMAC helpers here take a plain key; keys
//! that must stay masked in memory go through [`crate::mac::HmacKey`].

use hmac::{Hmac, Mac};
use streebog::{Digest, Streebog256, Streebog512};

/// Compute Streebog-256 hash of the input data.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 32-byte digest.
pub fn streebog256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Streebog256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute Streebog-512 hash of the input data.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 64-byte digest.
pub fn streebog512(data: &[u8]) -> [u8; 64] {
    let mut hasher = Streebog512::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 64];
    output.copy_from_slice(&result);
    output
}

/// Compute HMAC-Streebog-256 of the input data with the given key.
///
/// # Arguments
/// * `key` - The HMAC key bytes.
/// * `data` - The message bytes to authenticate.
///
/// # Returns
/// A 32-byte tag.
pub fn hmac_streebog256(key: &[u8], data: &[u8]) -> [u8; 32] {
    type HmacStreebog256 = Hmac<Streebog256>;
    let mut mac = HmacStreebog256::new_from_slice(key)
        .expect("HMAC accepts any key length");
    mac.update(data);
    let result = mac.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result.into_bytes());
    output
}

/// Compute HMAC-Streebog-512 of the input data with the given key.
///
/// # Arguments
/// * `key` - The HMAC key bytes.
/// * `data` - The message bytes to authenticate.
///
/// # Returns
/// A 64-byte tag.
pub fn hmac_streebog512(key: &[u8], data: &[u8]) -> [u8; 64] {
    type HmacStreebog512 = Hmac<Streebog512>;
    let mut mac = HmacStreebog512::new_from_slice(key)
        .expect("HMAC accepts any key length");
    mac.update(data);
    let result = mac.finalize();
    let mut output = [0u8; 64];
    output.copy_from_slice(&result.into_bytes());
    output
}
