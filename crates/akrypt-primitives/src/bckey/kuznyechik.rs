//! Kuznyechik block cipher (GOST R 34.12-2015, 128-bit block, 256-bit key).
//!
//! Keys and blocks are little-endian: byte 0 is the least significant byte
//! of the value written in the standard. The wrapped cipher works on the
//! big-endian form, so both are reversed around every call.

use ::kuznyechik::cipher::generic_array::GenericArray;
use ::kuznyechik::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};

use zeroize::Zeroizing;

use crate::bckey::{BlockCipherKey, BlockTransform};
use crate::config::ResourceConfig;
use crate::PrimitivesError;

/// Kuznyechik round keys.
pub struct Kuznyechik {
    inner: ::kuznyechik::Kuznyechik,
}

impl BlockTransform for Kuznyechik {
    const NAME: &'static str = "kuznyechik";
    const KEY_SIZE: usize = 32;
    const BLOCK_SIZE: usize = 16;

    fn schedule_keys(key: &[u8]) -> Result<Self, PrimitivesError> {
        let mut be_key = Zeroizing::new(key.to_vec());
        be_key.reverse();
        let inner = ::kuznyechik::Kuznyechik::new_from_slice(&be_key).map_err(|_| {
            PrimitivesError::WrongLength {
                expected: Self::KEY_SIZE,
                got: key.len(),
            }
        })?;
        Ok(Kuznyechik { inner })
    }

    fn encrypt_block(&self, block: &mut [u8]) {
        block.reverse();
        self.inner.encrypt_block(GenericArray::from_mut_slice(block));
        block.reverse();
    }

    fn decrypt_block(&self, block: &mut [u8]) {
        block.reverse();
        self.inner.decrypt_block(GenericArray::from_mut_slice(block));
        block.reverse();
    }

    fn erase_keys(self) -> Result<(), PrimitivesError> {
        drop(self.inner);
        Ok(())
    }
}

impl BlockCipherKey<Kuznyechik> {
    /// Create a Kuznyechik key with the configured resource.
    pub fn kuznyechik(config: &ResourceConfig) -> Result<Self, PrimitivesError> {
        Self::new(config.kuznyechik_cipher_resource)
    }
}
