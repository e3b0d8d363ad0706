#![deny(missing_docs)]

//! Akrypt - GOST cryptographic primitives with masked secret keys.
//!
//! Re-exports the akrypt components for convenient single-crate usage.

pub use akrypt_primitives as primitives;

pub use akrypt_primitives::{
    BlockCipherKey, HashAlgorithm, HmacKey, KuznyechikKey, MagmaKey, PrimitivesError,
    ResourceConfig,
};
