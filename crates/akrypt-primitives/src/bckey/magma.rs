//! Magma block cipher (GOST R 34.12-2015, 64-bit block, 256-bit key).
//!
//! Keys and blocks are little-endian: byte 0 is the least significant byte
//! of the value written in the standard. The wrapped cipher works on the
//! big-endian form, so both are reversed around every call.

use ::magma::cipher::generic_array::GenericArray;
use ::magma::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};

use zeroize::Zeroizing;

use crate::bckey::{BlockCipherKey, BlockTransform};
use crate::config::ResourceConfig;
use crate::PrimitivesError;

/// Magma round keys.
pub struct Magma {
    inner: ::magma::Magma,
}

impl BlockTransform for Magma {
    const NAME: &'static str = "magma";
    const KEY_SIZE: usize = 32;
    const BLOCK_SIZE: usize = 8;

    fn schedule_keys(key: &[u8]) -> Result<Self, PrimitivesError> {
        let mut be_key = Zeroizing::new(key.to_vec());
        be_key.reverse();
        let inner = ::magma::Magma::new_from_slice(&be_key).map_err(|_| PrimitivesError::WrongLength {
            expected: Self::KEY_SIZE,
            got: key.len(),
        })?;
        Ok(Magma { inner })
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
        // round keys are zeroized when the cipher state is dropped
        drop(self.inner);
        Ok(())
    }
}

impl BlockCipherKey<Magma> {
    /// Create a Magma key with the configured resource.
    pub fn magma(config: &ResourceConfig) -> Result<Self, PrimitivesError> {
        Self::new(config.magma_cipher_resource)
    }
}
