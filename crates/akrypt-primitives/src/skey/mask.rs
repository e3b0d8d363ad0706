//! Masking primitives for secret key values.
//!
//! A key value is never kept in memory as-is: it is stored together with a
//! random mask and only the masked form plus the mask are retained. The
//! functions here operate on caller-owned buffers and hold no state.
//!
//! Two binding sets are provided, selected by [`KeyFamily`]:
//! - [`KeyFamily::Xor`] masks byte-wise with exclusive or (block cipher keys).
//! - [`KeyFamily::Additive`] masks little-endian 32-bit words with addition
//!   modulo 2^32 (keys of keyed hash functions).

use rand::RngCore;
use streebog::{Digest, Streebog512};
use zeroize::Zeroizing;

use crate::PrimitivesError;

/// Largest integrity code length, bounded by the Streebog-512 digest size.
pub const MAX_ICODE_LEN: usize = 64;

/// Word length used by the additive masking family.
const ADDITIVE_WORD: usize = 4;

/// Masking discipline bound to a secret key at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFamily {
    /// Byte-wise exclusive-or mask.
    Xor,
    /// Word-wise additive mask modulo 2^32.
    Additive,
}

impl KeyFamily {
    /// Check that a key of `key_size` bytes can be masked by this family.
    pub fn check_key_size(&self, key_size: usize) -> Result<(), PrimitivesError> {
        match self {
            KeyFamily::Xor => Ok(()),
            KeyFamily::Additive if key_size % ADDITIVE_WORD == 0 => Ok(()),
            KeyFamily::Additive => Err(PrimitivesError::InvalidLength(
                "additive masking requires a key length divisible by 4",
            )),
        }
    }

    /// Replace the current mask with a fresh random one.
    ///
    /// `value` holds the key masked under `mask`; an all-zero `mask` means the
    /// value is still plain. On return `value` is masked under the new mask
    /// and `mask` holds it. The plain key is never written to memory.
    ///
    /// # Arguments
    /// * `value` - The masked key value, updated in place.
    /// * `mask` - The current mask, replaced in place.
    /// * `rng` - Source of the new mask.
    pub fn set_mask<R: RngCore + ?Sized>(
        &self,
        value: &mut [u8],
        mask: &mut [u8],
        rng: &mut R,
    ) -> Result<(), PrimitivesError> {
        let mut fresh = Zeroizing::new(vec![0u8; mask.len()]);
        rng.try_fill_bytes(&mut fresh)?;
        match self {
            KeyFamily::Xor => xor_remask(value, mask, &fresh),
            KeyFamily::Additive => additive_remask(value, mask, &fresh),
        }
        mask.copy_from_slice(&fresh);
        Ok(())
    }

    /// Recover the plain key from its masked form.
    ///
    /// # Returns
    /// The plain key in a buffer that is wiped when dropped.
    pub fn unmask(&self, value: &[u8], mask: &[u8]) -> Zeroizing<Vec<u8>> {
        let mut plain = Zeroizing::new(value.to_vec());
        match self {
            KeyFamily::Xor => {
                for (p, m) in plain.iter_mut().zip(mask) {
                    *p ^= m;
                }
            }
            KeyFamily::Additive => {
                for (p, m) in plain
                    .chunks_exact_mut(ADDITIVE_WORD)
                    .zip(mask.chunks_exact(ADDITIVE_WORD))
                {
                    let word = read_word(p).wrapping_sub(read_word(m));
                    p.copy_from_slice(&word.to_le_bytes());
                }
            }
        }
        plain
    }
}

/// Compute the integrity code of a masked representation into `icode`.
///
/// The code is the leading `icode.len()` bytes of Streebog-512 taken over the
/// masked value followed by its mask.
pub fn set_icode(value: &[u8], mask: &[u8], icode: &mut [u8]) {
    let digest = icode_digest(value, mask);
    icode.copy_from_slice(&digest[..icode.len()]);
}

/// Verify the integrity code of a masked representation in constant time.
pub fn check_icode(value: &[u8], mask: &[u8], icode: &[u8]) -> bool {
    if icode.is_empty() || icode.len() > MAX_ICODE_LEN {
        return false;
    }
    let digest = icode_digest(value, mask);
    constant_time_eq(&digest[..icode.len()], icode)
}

fn icode_digest(value: &[u8], mask: &[u8]) -> Zeroizing<[u8; MAX_ICODE_LEN]> {
    let mut hasher = Streebog512::new();
    hasher.update(value);
    hasher.update(mask);
    let mut digest = Zeroizing::new([0u8; MAX_ICODE_LEN]);
    digest.copy_from_slice(&hasher.finalize());
    digest
}

fn xor_remask(value: &mut [u8], old: &[u8], fresh: &[u8]) {
    for ((v, o), f) in value.iter_mut().zip(old).zip(fresh) {
        *v ^= o ^ f;
    }
}

fn additive_remask(value: &mut [u8], old: &[u8], fresh: &[u8]) {
    for ((v, o), f) in value
        .chunks_exact_mut(ADDITIVE_WORD)
        .zip(old.chunks_exact(ADDITIVE_WORD))
        .zip(fresh.chunks_exact(ADDITIVE_WORD))
    {
        let delta = read_word(f).wrapping_sub(read_word(o));
        let word = read_word(v).wrapping_add(delta);
        v.copy_from_slice(&word.to_le_bytes());
    }
}

fn read_word(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Constant-time comparison of two byte slices.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for i in 0..a.len() {
        diff |= a[i] ^ b[i];
    }
    diff == 0
}
