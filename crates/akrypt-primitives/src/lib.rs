/// Akrypt - Masked key storage and GOST block cipher primitives.
///
/// This crate provides the building blocks for the akrypt toolkit:
/// - Secret keys kept masked in memory, guarded by an integrity code and a
///   usage resource
/// - Magma and Kuznyechik block ciphers in ECB and gamma (counter) modes
/// - Streebog hash functions and HMAC with a masked key
/// - Resource configuration, an algorithm registry and a built-in self test

pub mod skey;
pub mod bckey;
pub mod hash;
pub mod mac;
pub mod config;
pub mod oid;
pub mod selftest;

mod error;
pub use error::PrimitivesError;

pub use bckey::{BlockCipherKey, BlockTransform, KuznyechikKey, MagmaKey};
pub use config::ResourceConfig;
pub use mac::{HashAlgorithm, HmacKey};
pub use skey::{KeyFamily, SecretKey};
