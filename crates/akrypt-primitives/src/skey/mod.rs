//! Masked secret key container.
//!
//! A [`SecretKey`] holds a key value that is always masked at rest, an
//! integrity code over the masked representation, and a resource counter that
//! bounds how many units of work the key may still perform. Concrete
//! algorithms (block ciphers, keyed hash functions) own a `SecretKey` and go
//! through [`SecretKey::check_icode`], [`SecretKey::consume`] and
//! [`SecretKey::remask`] around every use of the key.

pub mod mask;

use rand::{CryptoRng, RngCore};
use rand::rngs::OsRng;
use zeroize::{Zeroize, Zeroizing};

use crate::PrimitivesError;
pub use mask::KeyFamily;

/// A secret key stored in masked form with an integrity code and a usage
/// resource.
pub struct SecretKey {
    /// Key value masked under `mask`.
    value: Vec<u8>,
    /// Current mask.
    mask: Vec<u8>,
    /// Integrity code over `value || mask`.
    icode: Vec<u8>,
    /// Remaining resource units; never negative.
    resource: i64,
    family: KeyFamily,
    assigned: bool,
    /// Source of fresh masks.
    rng: Box<dyn RngCore + Send>,
}

impl SecretKey {
    /// Create an empty secret key.
    ///
    /// # Arguments
    /// * `key_size` - Length of the key value in bytes.
    /// * `checksum_size` - Length of the integrity code in bytes (1..=64).
    /// * `family` - Masking discipline of the algorithm that owns the key.
    /// * `resource` - Initial number of resource units.
    ///
    /// # Returns
    /// An unassigned key, or `InvalidLength` for a zero or oversized length.
    pub fn create(
        key_size: usize,
        checksum_size: usize,
        family: KeyFamily,
        resource: i64,
    ) -> Result<Self, PrimitivesError> {
        if key_size == 0 {
            return Err(PrimitivesError::InvalidLength("secret key with zero length"));
        }
        if checksum_size == 0 {
            return Err(PrimitivesError::InvalidLength("integrity code with zero length"));
        }
        if checksum_size > mask::MAX_ICODE_LEN {
            return Err(PrimitivesError::InvalidLength("integrity code longer than 64 bytes"));
        }
        family.check_key_size(key_size)?;
        if resource < 0 {
            return Err(PrimitivesError::Config(format!(
                "negative key resource {}",
                resource
            )));
        }

        Ok(SecretKey {
            value: vec![0u8; key_size],
            mask: vec![0u8; key_size],
            icode: vec![0u8; checksum_size],
            resource,
            family,
            assigned: false,
            rng: Box::new(OsRng),
        })
    }

    /// Assign a key value by copying it into the container.
    ///
    /// The copy is masked and its integrity code computed before returning.
    ///
    /// # Arguments
    /// * `raw` - The plain key value; must be exactly `key_size` bytes.
    pub fn assign(&mut self, raw: &[u8]) -> Result<(), PrimitivesError> {
        self.check_raw_len(raw.len())?;
        self.value.copy_from_slice(raw);
        self.finish_assign()
    }

    /// Assign a key value by taking ownership of the caller's buffer.
    ///
    /// The buffer becomes the key storage and is masked in place, so the
    /// plain value is not duplicated.
    pub fn assign_owned(&mut self, raw: Vec<u8>) -> Result<(), PrimitivesError> {
        let mut raw = Zeroizing::new(raw);
        self.check_raw_len(raw.len())?;
        self.value.zeroize();
        self.value = std::mem::take(&mut *raw);
        self.finish_assign()
    }

    /// Assign a key value drawn from a cryptographic random generator.
    pub fn assign_random<R: RngCore + CryptoRng>(
        &mut self,
        rng: &mut R,
    ) -> Result<(), PrimitivesError> {
        let mut raw = Zeroizing::new(vec![0u8; self.value.len()]);
        rng.try_fill_bytes(&mut raw)?;
        self.value.copy_from_slice(&raw);
        self.finish_assign()
    }

    fn check_raw_len(&self, len: usize) -> Result<(), PrimitivesError> {
        if len == 0 {
            return Err(PrimitivesError::NullArgument("empty key value"));
        }
        if len != self.value.len() {
            return Err(PrimitivesError::WrongLength {
                expected: self.value.len(),
                got: len,
            });
        }
        Ok(())
    }

    /// Mask a freshly written plain value and seal it with an integrity code.
    fn finish_assign(&mut self) -> Result<(), PrimitivesError> {
        self.mask.zeroize();
        self.assigned = false;
        if let Err(e) = self.family.set_mask(&mut self.value, &mut self.mask, self.rng.as_mut()) {
            self.value.zeroize();
            return Err(e);
        }
        mask::set_icode(&self.value, &self.mask, &mut self.icode);
        self.assigned = true;
        tracing::trace!(key_size = self.value.len(), family = ?self.family, "secret key assigned");
        Ok(())
    }

    /// Replace the generator that masks are drawn from (the OS generator by
    /// default).
    pub fn set_rng<R: RngCore + CryptoRng + Send + 'static>(&mut self, rng: R) {
        self.rng = Box::new(rng);
    }

    /// Check the integrity code of the stored masked value.
    ///
    /// # Returns
    /// `false` if the key was never assigned or its masked form was altered.
    pub fn check_icode(&self) -> bool {
        self.assigned && mask::check_icode(&self.value, &self.mask, &self.icode)
    }

    /// Replace the mask with a fresh one and recompute the integrity code.
    pub fn remask(&mut self) -> Result<(), PrimitivesError> {
        self.family
            .set_mask(&mut self.value, &mut self.mask, self.rng.as_mut())?;
        mask::set_icode(&self.value, &self.mask, &mut self.icode);
        Ok(())
    }

    /// Withdraw `units` from the resource counter.
    ///
    /// Either all units are withdrawn or, if fewer remain, none are and
    /// `LowResource` is returned.
    pub fn consume(&mut self, units: u64) -> Result<(), PrimitivesError> {
        self.ensure_resource(units)?;
        // ensure_resource bounds units by a non-negative i64
        self.resource -= units as i64;
        Ok(())
    }

    /// Check that `units` resource units are available without withdrawing them.
    pub fn ensure_resource(&self, units: u64) -> Result<(), PrimitivesError> {
        match i64::try_from(units) {
            Ok(u) if u <= self.resource => Ok(()),
            _ => Err(PrimitivesError::LowResource {
                requested: units,
                available: self.resource,
            }),
        }
    }

    /// Recover the plain key value.
    ///
    /// The returned buffer is wiped on drop; keep it alive only as long as
    /// the key is needed.
    pub fn unmask(&self) -> Zeroizing<Vec<u8>> {
        self.family.unmask(&self.value, &self.mask)
    }

    /// Remaining resource units.
    pub fn resource(&self) -> i64 {
        self.resource
    }

    /// Length of the key value in bytes.
    pub fn key_size(&self) -> usize {
        self.value.len()
    }

    /// Length of the integrity code in bytes.
    pub fn checksum_size(&self) -> usize {
        self.icode.len()
    }

    /// Masking discipline of this key.
    pub fn family(&self) -> KeyFamily {
        self.family
    }

    /// Whether a key value has been assigned.
    pub fn is_assigned(&self) -> bool {
        self.assigned
    }

    /// Wipe and release the key.
    pub fn destroy(self) {
        drop(self);
    }

    #[cfg(test)]
    pub(crate) fn corrupt_icode(&mut self) {
        self.icode[0] ^= 0xFF;
    }
}

/// Generator whose every draw fails.
#[cfg(test)]
pub(crate) struct FailingRng;

#[cfg(test)]
impl RngCore for FailingRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
        Err(rand::Error::new(std::io::Error::new(
            std::io::ErrorKind::Other,
            "generator unavailable",
        )))
    }
}

#[cfg(test)]
impl CryptoRng for FailingRng {}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.value.zeroize();
        self.mask.zeroize();
        self.icode.zeroize();
        self.assigned = false;
        tracing::trace!("secret key wiped");
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretKey")
            .field("key_size", &self.value.len())
            .field("checksum_size", &self.icode.len())
            .field("family", &self.family)
            .field("resource", &self.resource)
            .field("assigned", &self.assigned)
            .finish_non_exhaustive()
    }
}
