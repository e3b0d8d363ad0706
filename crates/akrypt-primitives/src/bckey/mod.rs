//! Block cipher keys.
//!
//! A [`BlockCipherKey`] binds a masked [`SecretKey`] to a concrete block
//! transform (a [`BlockTransform`] implementation such as [`Magma`] or
//! [`Kuznyechik`]) and carries the resumable state of the gamma (counter)
//! mode. The modes of operation themselves live in [`modes`].
//!
//! ```
//! use akrypt_primitives::bckey::KuznyechikKey;
//! use akrypt_primitives::config::ResourceConfig;
//!
//! let mut key = KuznyechikKey::kuznyechik(&ResourceConfig::default()).unwrap();
//! key.set_key(&[0x42u8; 32]).unwrap();
//!
//! let mut data = *b"sixteen byte blk";
//! key.encrypt_ecb_in_place(&mut data).unwrap();
//! key.decrypt_ecb_in_place(&mut data).unwrap();
//! assert_eq!(&data, b"sixteen byte blk");
//! ```

pub mod kuznyechik;
pub mod magma;
pub mod modes;

use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::skey::{KeyFamily, SecretKey};
use crate::PrimitivesError;

pub use self::kuznyechik::Kuznyechik;
pub use self::magma::Magma;

/// Integrity code length used for every block cipher key.
pub const BCKEY_ICODE_LEN: usize = 8;

/// A block cipher plugged into a [`BlockCipherKey`].
///
/// An implementation holds the round keys derived from one key value. Block
/// operations transform exactly one block of `BLOCK_SIZE` bytes in place.
pub trait BlockTransform: Sized {
    /// Algorithm name.
    const NAME: &'static str;
    /// Key length in bytes.
    const KEY_SIZE: usize;
    /// Block length in bytes.
    const BLOCK_SIZE: usize;

    /// Derive round keys from a plain key value.
    fn schedule_keys(key: &[u8]) -> Result<Self, PrimitivesError>;

    /// Encrypt one block in place.
    fn encrypt_block(&self, block: &mut [u8]);

    /// Decrypt one block in place.
    fn decrypt_block(&self, block: &mut [u8]);

    /// Destroy the round keys.
    fn erase_keys(self) -> Result<(), PrimitivesError>;
}

/// Resumable state of the gamma mode.
#[derive(Default)]
pub(crate) enum StreamState {
    /// No initial value has been supplied yet.
    #[default]
    Unset,
    /// Counter block to continue the keystream from.
    Seeded(Zeroizing<Vec<u8>>),
    /// The last call ended on a partial block; a fresh initial value is required.
    Exhausted,
}

/// A block cipher key: a masked secret key, its scheduled round keys and the
/// gamma-mode stream state.
///
/// A context is not safe for concurrent use; every operation takes `&mut self`.
pub struct BlockCipherKey<C: BlockTransform> {
    pub(crate) key: SecretKey,
    pub(crate) cipher: Option<C>,
    pub(crate) stream: StreamState,
}

impl<C: BlockTransform> BlockCipherKey<C> {
    /// Create a block cipher key with no key value assigned.
    ///
    /// # Arguments
    /// * `resource` - Maximum number of blocks the key may process.
    ///
    /// # Returns
    /// The new context, or `InvalidLength` if the cipher declares a zero key
    /// or block length.
    pub fn new(resource: i64) -> Result<Self, PrimitivesError> {
        if C::KEY_SIZE == 0 {
            return Err(PrimitivesError::InvalidLength("block cipher key with zero length"));
        }
        if C::BLOCK_SIZE == 0 {
            return Err(PrimitivesError::InvalidLength("cipher with zero block length"));
        }
        let key = SecretKey::create(C::KEY_SIZE, BCKEY_ICODE_LEN, KeyFamily::Xor, resource)?;
        Ok(BlockCipherKey {
            key,
            cipher: None,
            stream: StreamState::Unset,
        })
    }

    /// Assign a key value (copied) and schedule the round keys.
    pub fn set_key(&mut self, raw: &[u8]) -> Result<(), PrimitivesError> {
        self.key.assign(raw)?;
        self.schedule()
    }

    /// Assign a key value by taking ownership of the buffer and schedule the
    /// round keys.
    pub fn set_key_owned(&mut self, raw: Vec<u8>) -> Result<(), PrimitivesError> {
        self.key.assign_owned(raw)?;
        self.schedule()
    }

    /// Assign a random key value and schedule the round keys.
    pub fn set_key_random<R: RngCore + CryptoRng>(
        &mut self,
        rng: &mut R,
    ) -> Result<(), PrimitivesError> {
        self.key.assign_random(rng)?;
        self.schedule()
    }

    fn schedule(&mut self) -> Result<(), PrimitivesError> {
        self.erase_round_keys();
        self.stream = StreamState::Unset;
        let plain = self.key.unmask();
        self.cipher = Some(C::schedule_keys(&plain)?);
        tracing::trace!(cipher = C::NAME, "round keys scheduled");
        Ok(())
    }

    fn erase_round_keys(&mut self) {
        if let Some(cipher) = self.cipher.take() {
            if let Err(e) = cipher.erase_keys() {
                tracing::warn!(cipher = C::NAME, error = %e, "wrong deleting of round keys");
            }
        }
    }

    /// Algorithm name of the bound cipher.
    pub fn name(&self) -> &'static str {
        C::NAME
    }

    /// Block length in bytes.
    pub fn block_size(&self) -> usize {
        C::BLOCK_SIZE
    }

    /// The owned secret key.
    pub fn key(&self) -> &SecretKey {
        &self.key
    }

    /// Remaining resource in blocks.
    pub fn resource(&self) -> i64 {
        self.key.resource()
    }

    /// Whether a gamma-mode call without an initial value would continue the
    /// previous keystream.
    pub fn can_resume(&self) -> bool {
        matches!(self.stream, StreamState::Seeded(_))
    }

    /// Erase round keys, wipe stream state and release the key.
    pub fn destroy(self) {
        drop(self);
    }
}

impl<C: BlockTransform> Drop for BlockCipherKey<C> {
    fn drop(&mut self) {
        self.erase_round_keys();
        self.stream = StreamState::Unset;
        tracing::trace!(cipher = C::NAME, "block cipher key destroyed");
    }
}

impl<C: BlockTransform> std::fmt::Debug for BlockCipherKey<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockCipherKey")
            .field("cipher", &C::NAME)
            .field("block_size", &C::BLOCK_SIZE)
            .field("key", &self.key)
            .field("resumable", &self.can_resume())
            .finish()
    }
}

/// Magma block cipher key.
pub type MagmaKey = BlockCipherKey<Magma>;

/// Kuznyechik block cipher key.
pub type KuznyechikKey = BlockCipherKey<Kuznyechik>;
