//! HMAC with a masked key.
//!
//! [`HmacKey`] keeps its key in a [`SecretKey`] of the additive masking family
//! and unmasks it only while a tag computation is being started. A message
//! can be fed in one call ([`HmacKey::compute`]) or in pieces
//! ([`HmacKey::update`] then [`HmacKey::finalize`]); every finalized tag
//! withdraws one unit of resource.

use hmac::{Hmac, Mac};
use rand::{CryptoRng, RngCore};
use streebog::{Streebog256, Streebog512};

use crate::config::ResourceConfig;
use crate::skey::{KeyFamily, SecretKey};
use crate::PrimitivesError;

/// Key length of an HMAC key in bytes.
pub const HMAC_KEY_LEN: usize = 32;

/// Integrity code length of an HMAC key in bytes.
pub const HMAC_ICODE_LEN: usize = 8;

/// Hash function underlying an [`HmacKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Streebog256,
    Streebog512,
}

impl HashAlgorithm {
    /// Length of the produced tag in bytes.
    pub fn tag_size(&self) -> usize {
        match self {
            HashAlgorithm::Streebog256 => 32,
            HashAlgorithm::Streebog512 => 64,
        }
    }

    /// Registry name of the HMAC built on this hash.
    pub fn hmac_name(&self) -> &'static str {
        match self {
            HashAlgorithm::Streebog256 => "hmac-streebog256",
            HashAlgorithm::Streebog512 => "hmac-streebog512",
        }
    }
}

/// Keyed state of a tag computation in progress.
enum MacState {
    Streebog256(Hmac<Streebog256>),
    Streebog512(Hmac<Streebog512>),
}

impl MacState {
    fn new(algorithm: HashAlgorithm, key: &[u8]) -> Self {
        match algorithm {
            HashAlgorithm::Streebog256 => MacState::Streebog256(
                Hmac::<Streebog256>::new_from_slice(key).expect("HMAC accepts any key length"),
            ),
            HashAlgorithm::Streebog512 => MacState::Streebog512(
                Hmac::<Streebog512>::new_from_slice(key).expect("HMAC accepts any key length"),
            ),
        }
    }

    fn update(&mut self, data: &[u8]) {
        match self {
            MacState::Streebog256(mac) => mac.update(data),
            MacState::Streebog512(mac) => mac.update(data),
        }
    }

    fn finalize(self) -> Vec<u8> {
        match self {
            MacState::Streebog256(mac) => mac.finalize().into_bytes().to_vec(),
            MacState::Streebog512(mac) => mac.finalize().into_bytes().to_vec(),
        }
    }
}

/// An HMAC key whose value stays masked between computations.
pub struct HmacKey {
    key: SecretKey,
    algorithm: HashAlgorithm,
    state: Option<MacState>,
}

impl HmacKey {
    /// Create an HMAC key with no value assigned.
    ///
    /// # Arguments
    /// * `algorithm` - Underlying hash function.
    /// * `resource` - Number of tags the key may compute.
    pub fn new(algorithm: HashAlgorithm, resource: i64) -> Result<Self, PrimitivesError> {
        let key = SecretKey::create(HMAC_KEY_LEN, HMAC_ICODE_LEN, KeyFamily::Additive, resource)?;
        Ok(HmacKey {
            key,
            algorithm,
            state: None,
        })
    }

    /// Create an HMAC key with the configured resource.
    pub fn with_config(
        algorithm: HashAlgorithm,
        config: &ResourceConfig,
    ) -> Result<Self, PrimitivesError> {
        Self::new(algorithm, config.hmac_key_resource)
    }

    /// Assign a key value (copied).
    pub fn set_key(&mut self, raw: &[u8]) -> Result<(), PrimitivesError> {
        self.state = None;
        self.key.assign(raw)
    }

    /// Assign a key value by taking ownership of the buffer.
    pub fn set_key_owned(&mut self, raw: Vec<u8>) -> Result<(), PrimitivesError> {
        self.state = None;
        self.key.assign_owned(raw)
    }

    /// Assign a random key value.
    pub fn set_key_random<R: RngCore + CryptoRng>(
        &mut self,
        rng: &mut R,
    ) -> Result<(), PrimitivesError> {
        self.state = None;
        self.key.assign_random(rng)
    }

    /// Start a new tag computation, discarding any unfinished one.
    ///
    /// # Returns
    /// `KeyIntegrityViolation` if the key was altered or never assigned, or
    /// `LowResource` once the key is used up.
    pub fn clean(&mut self) -> Result<(), PrimitivesError> {
        self.state = None;
        if !self.key.check_icode() {
            tracing::debug!(hmac = self.algorithm.hmac_name(), "incorrect integrity code of secret key value");
            return Err(PrimitivesError::KeyIntegrityViolation);
        }
        self.key.ensure_resource(1)?;

        let state = MacState::new(self.algorithm, &self.key.unmask());
        if let Err(e) = self.key.remask() {
            tracing::warn!(hmac = self.algorithm.hmac_name(), error = %e, "wrong remasking of secret key");
        }
        self.state = Some(state);
        Ok(())
    }

    /// Feed the next piece of the message, starting a computation if none is
    /// in progress.
    pub fn update(&mut self, data: &[u8]) -> Result<(), PrimitivesError> {
        if self.state.is_none() {
            self.clean()?;
        }
        if let Some(state) = self.state.as_mut() {
            state.update(data);
        }
        Ok(())
    }

    /// Finish the computation in progress and return its tag.
    ///
    /// Without a prior [`update`](Self::update) this is the tag of the empty
    /// message.
    pub fn finalize(&mut self) -> Result<Vec<u8>, PrimitivesError> {
        let state = match self.state.take() {
            Some(state) => state,
            None => {
                self.clean()?;
                self.state.take().ok_or(PrimitivesError::KeyIntegrityViolation)?
            }
        };
        self.key.consume(1)?;
        Ok(state.finalize())
    }

    /// Compute the tag of `data` in one call.
    ///
    /// Any unfinished incremental computation is discarded.
    pub fn compute(&mut self, data: &[u8]) -> Result<Vec<u8>, PrimitivesError> {
        self.clean()?;
        self.update(data)?;
        self.finalize()
    }

    /// Length of the produced tag in bytes.
    pub fn tag_size(&self) -> usize {
        self.algorithm.tag_size()
    }

    /// Underlying hash function.
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// The owned secret key.
    pub fn key(&self) -> &SecretKey {
        &self.key
    }
}

impl std::fmt::Debug for HmacKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacKey")
            .field("algorithm", &self.algorithm)
            .field("key", &self.key)
            .field("in_progress", &self.state.is_some())
            .finish()
    }
}
