//! Modes of operation for block cipher keys.
//!
//! - Electronic codebook (ECB): every block is transformed independently;
//!   the data length must be a multiple of the block length.
//! - Gamma (counter) mode: a counter block is encrypted to produce keystream
//!   which is added modulo two to the data. Encryption and decryption are the
//!   same operation. The counter left after a call is kept in the key, so a
//!   message can be processed in several calls as long as every call but the
//!   last covers whole blocks.
//!
//! Every operation checks the key integrity code, withdraws resource for the
//! blocks it is going to process and remasks the key afterwards. All checks
//! happen before the output buffer is written.
//!
//! Both modes work block by block and read each block before writing it, so
//! the `*_in_place` variants transform a single buffer without a copy.

use zeroize::Zeroizing;

use crate::bckey::{BlockCipherKey, BlockTransform, StreamState};
use crate::PrimitivesError;

/// Block lengths the mode engine can drive: one or two 64-bit words.
pub const SUPPORTED_BLOCK_SIZES: [usize; 2] = [8, 16];

#[derive(Debug, Clone, Copy)]
enum Direction {
    Encrypt,
    Decrypt,
}

impl<C: BlockTransform> BlockCipherKey<C> {
    /// Encrypt `input` into `output` in ECB mode.
    ///
    /// # Arguments
    /// * `input` - Plaintext; its length must be a multiple of the block length.
    /// * `output` - Destination, exactly as long as `input`.
    pub fn encrypt_ecb(&mut self, input: &[u8], output: &mut [u8]) -> Result<(), PrimitivesError> {
        check_output_len(input, output)?;
        self.ecb(Some(input), output, Direction::Encrypt)
    }

    /// Decrypt `input` into `output` in ECB mode.
    pub fn decrypt_ecb(&mut self, input: &[u8], output: &mut [u8]) -> Result<(), PrimitivesError> {
        check_output_len(input, output)?;
        self.ecb(Some(input), output, Direction::Decrypt)
    }

    /// Encrypt a buffer in place in ECB mode.
    pub fn encrypt_ecb_in_place(&mut self, data: &mut [u8]) -> Result<(), PrimitivesError> {
        self.ecb(None, data, Direction::Encrypt)
    }

    /// Decrypt a buffer in place in ECB mode.
    pub fn decrypt_ecb_in_place(&mut self, data: &mut [u8]) -> Result<(), PrimitivesError> {
        self.ecb(None, data, Direction::Decrypt)
    }

    /// Encrypt or decrypt `input` into `output` in gamma mode.
    ///
    /// # Arguments
    /// * `input` - Data of any length.
    /// * `output` - Destination, exactly as long as `input`.
    /// * `iv` - Initial value of at least half a block; only the first half
    ///   block is used. `None` (or an empty slice) continues the keystream
    ///   left by the previous call.
    ///
    /// # Returns
    /// `NoPriorState` when continuing without a previous call, and
    /// `ContinuationBlocked` when continuing after a call that ended on a
    /// partial block.
    pub fn xcrypt(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        iv: Option<&[u8]>,
    ) -> Result<(), PrimitivesError> {
        check_output_len(input, output)?;
        self.gamma(Some(input), output, iv)
    }

    /// Encrypt or decrypt a buffer in place in gamma mode.
    pub fn xcrypt_in_place(
        &mut self,
        data: &mut [u8],
        iv: Option<&[u8]>,
    ) -> Result<(), PrimitivesError> {
        self.gamma(None, data, iv)
    }

    fn ecb(
        &mut self,
        input: Option<&[u8]>,
        data: &mut [u8],
        direction: Direction,
    ) -> Result<(), PrimitivesError> {
        let block_size = C::BLOCK_SIZE;
        if data.len() % block_size != 0 {
            tracing::debug!(cipher = C::NAME, size = data.len(), "ecb input is not block aligned");
            return Err(PrimitivesError::UnalignedLength {
                size: data.len(),
                block_size,
            });
        }
        check_block_size(block_size)?;
        self.check_integrity()?;

        let result = self.ecb_unchecked(input, data, direction);
        self.remask();
        result
    }

    fn ecb_unchecked(
        &mut self,
        input: Option<&[u8]>,
        data: &mut [u8],
        direction: Direction,
    ) -> Result<(), PrimitivesError> {
        let block_size = C::BLOCK_SIZE;
        let cipher = self
            .cipher
            .as_ref()
            .ok_or(PrimitivesError::KeyIntegrityViolation)?;
        self.key.consume((data.len() / block_size) as u64)?;

        if let Some(input) = input {
            data.copy_from_slice(input);
        }
        for block in data.chunks_exact_mut(block_size) {
            match direction {
                Direction::Encrypt => cipher.encrypt_block(block),
                Direction::Decrypt => cipher.decrypt_block(block),
            }
        }
        Ok(())
    }

    fn gamma(
        &mut self,
        input: Option<&[u8]>,
        data: &mut [u8],
        iv: Option<&[u8]>,
    ) -> Result<(), PrimitivesError> {
        check_block_size(C::BLOCK_SIZE)?;
        self.check_integrity()?;

        let result = self.gamma_unchecked(input, data, iv);
        self.remask();
        result
    }

    fn gamma_unchecked(
        &mut self,
        input: Option<&[u8]>,
        data: &mut [u8],
        iv: Option<&[u8]>,
    ) -> Result<(), PrimitivesError> {
        let block_size = C::BLOCK_SIZE;
        let blocks = data.len() / block_size;
        let tail = data.len() % block_size;
        let units = blocks as u64 + u64::from(tail > 0);

        let cipher = self
            .cipher
            .as_ref()
            .ok_or(PrimitivesError::KeyIntegrityViolation)?;
        self.key.ensure_resource(units)?;

        let mut counter = match iv.filter(|iv| !iv.is_empty()) {
            None => match &self.stream {
                StreamState::Seeded(counter) => counter.clone(),
                StreamState::Unset => {
                    tracing::debug!(cipher = C::NAME, "gamma resumed without a prior initial value");
                    return Err(PrimitivesError::NoPriorState);
                }
                StreamState::Exhausted => {
                    tracing::debug!(cipher = C::NAME, "gamma resumed after a partial block");
                    return Err(PrimitivesError::ContinuationBlocked);
                }
            },
            Some(iv) => initial_counter(iv, block_size)?,
        };
        self.key.consume(units)?;

        if let Some(input) = input {
            data.copy_from_slice(input);
        }
        let (body, rest) = data.split_at_mut(blocks * block_size);
        let mut gamma = Zeroizing::new(vec![0u8; block_size]);
        for block in body.chunks_exact_mut(block_size) {
            gamma.copy_from_slice(&counter);
            cipher.encrypt_block(&mut gamma);
            xor_in(block, &gamma);
            increment_counter(&mut counter);
        }

        if tail > 0 {
            gamma.copy_from_slice(&counter);
            cipher.encrypt_block(&mut gamma);
            // the tail takes the most significant bytes of the keystream block
            xor_in(rest, &gamma[block_size - tail..]);
            self.stream = StreamState::Exhausted;
        } else {
            self.stream = StreamState::Seeded(counter);
        }
        Ok(())
    }

    fn check_integrity(&self) -> Result<(), PrimitivesError> {
        if self.key.check_icode() {
            Ok(())
        } else {
            tracing::debug!(cipher = C::NAME, "incorrect integrity code of secret key value");
            Err(PrimitivesError::KeyIntegrityViolation)
        }
    }

    fn remask(&mut self) {
        if let Err(e) = self.key.remask() {
            tracing::warn!(cipher = C::NAME, error = %e, "wrong remasking of secret key");
        }
    }
}

fn check_output_len(input: &[u8], output: &[u8]) -> Result<(), PrimitivesError> {
    if input.len() != output.len() {
        return Err(PrimitivesError::WrongLength {
            expected: input.len(),
            got: output.len(),
        });
    }
    Ok(())
}

fn check_block_size(block_size: usize) -> Result<(), PrimitivesError> {
    if SUPPORTED_BLOCK_SIZES.contains(&block_size) {
        Ok(())
    } else {
        Err(PrimitivesError::UnsupportedBlockSize(block_size))
    }
}

/// Build the first counter block: a zero half followed by the first half
/// block of the initial value.
fn initial_counter(iv: &[u8], block_size: usize) -> Result<Zeroizing<Vec<u8>>, PrimitivesError> {
    let half = block_size / 2;
    if iv.len() < half {
        return Err(PrimitivesError::InvalidIvLength {
            expected: half,
            got: iv.len(),
        });
    }
    let mut counter = Zeroizing::new(vec![0u8; block_size]);
    counter[half..].copy_from_slice(&iv[..half]);
    Ok(counter)
}

/// Add one to the first 64-bit little-endian word of the counter.
///
/// Carry into the rest of the block is dropped; the key resource keeps the
/// number of blocks per key far below 2^64.
fn increment_counter(counter: &mut [u8]) {
    let mut word = [0u8; 8];
    word.copy_from_slice(&counter[..8]);
    let next = u64::from_le_bytes(word).wrapping_add(1);
    counter[..8].copy_from_slice(&next.to_le_bytes());
}

fn xor_in(data: &mut [u8], gamma: &[u8]) {
    for (d, g) in data.iter_mut().zip(gamma) {
        *d ^= g;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bckey::tests::ToyCipher;
    use crate::bckey::{KuznyechikKey, MagmaKey};
    use crate::skey::FailingRng;

    const KUZ_KEY: &str = "efcdab89674523011032547698badcfe7766554433221100ffeeddccbbaa9988";
    const MAGMA_KEY: &str = "fffefdfcfbfaf9f8f7f6f5f4f3f2f1f000112233445566778899aabbccddeeff";

    fn kuznyechik(resource: i64) -> KuznyechikKey {
        let mut key = KuznyechikKey::new(resource).unwrap();
        key.set_key(&hex::decode(KUZ_KEY).unwrap()).unwrap();
        key
    }

    fn magma(resource: i64) -> MagmaKey {
        let mut key = MagmaKey::new(resource).unwrap();
        key.set_key(&hex::decode(MAGMA_KEY).unwrap()).unwrap();
        key
    }

    fn pattern(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 7 + 3) as u8).collect()
    }

    /// GOST R 34.13-2015, appendix A.1.1: four blocks in ECB mode, little-endian.
    #[test]
    fn test_ecb_kuznyechik_standard() {
        let mut key = kuznyechik(100);
        let plain = hex::decode(
            "8899aabbccddeeff00776655443322110affeeccbbaa99887766554433221100\
             000affeeccbbaa99887766554433221111000affeeccbbaa9988776655443322",
        )
        .unwrap();
        let mut out = vec![0u8; plain.len()];
        key.encrypt_ecb(&plain, &mut out).unwrap();
        assert_eq!(
            hex::encode(&out),
            "cdedd4b9428d465a3024bcbe909d677f8bd01867d7525428f932006e2c9129b4\
             57b1d43b31a5f5f3ee7c249d5433caf098da8aaac5c4023aebb930e8cd9cb0d0"
        );
        assert_eq!(key.resource(), 96);

        key.decrypt_ecb_in_place(&mut out).unwrap();
        assert_eq!(out, plain);
        assert_eq!(key.resource(), 92);
    }

    /// GOST R 34.13-2015, appendix A.2.1: four blocks in ECB mode, little-endian.
    #[test]
    fn test_ecb_magma_standard() {
        let mut key = magma(100);
        let mut data =
            hex::decode("590a133c6bf0de92209d18f804c754db4c02a8672efb984a417eb5179b401289")
                .unwrap();
        key.encrypt_ecb_in_place(&mut data).unwrap();
        assert_eq!(
            hex::encode(&data),
            "a072f394043f072b486e55d315e770de1ebccfeae9d9d811fb7ec6960926687c"
        );
    }

    #[test]
    fn test_ecb_unaligned_leaves_output() {
        let mut key = kuznyechik(100);
        let input = pattern(20);
        let mut out = vec![0xAAu8; 20];
        assert_eq!(
            key.encrypt_ecb(&input, &mut out),
            Err(PrimitivesError::UnalignedLength { size: 20, block_size: 16 })
        );
        assert_eq!(out, vec![0xAAu8; 20]);
        assert_eq!(key.resource(), 100);
    }

    #[test]
    fn test_ecb_output_length_mismatch() {
        let mut key = kuznyechik(100);
        let mut out = vec![0u8; 16];
        assert_eq!(
            key.encrypt_ecb(&pattern(32), &mut out),
            Err(PrimitivesError::WrongLength { expected: 32, got: 16 })
        );
    }

    /// A request larger than the remaining resource is rejected untouched.
    #[test]
    fn test_ecb_low_resource() {
        let mut key = kuznyechik(2);
        let mut data = pattern(48);
        let before = data.clone();
        assert_eq!(
            key.encrypt_ecb_in_place(&mut data),
            Err(PrimitivesError::LowResource { requested: 3, available: 2 })
        );
        assert_eq!(data, before);
        assert_eq!(key.resource(), 2);

        key.encrypt_ecb_in_place(&mut data[..32]).unwrap();
        assert_eq!(key.resource(), 0);
    }

    #[test]
    fn test_unsupported_block_size() {
        let mut key = BlockCipherKey::<ToyCipher<4>>::new(100).unwrap();
        key.set_key(&[1u8; 32]).unwrap();
        let mut data = pattern(8);
        let before = data.clone();
        assert_eq!(
            key.encrypt_ecb_in_place(&mut data),
            Err(PrimitivesError::UnsupportedBlockSize(4))
        );
        assert_eq!(
            key.xcrypt_in_place(&mut data, Some(&[0u8; 4][..])),
            Err(PrimitivesError::UnsupportedBlockSize(4))
        );
        assert_eq!(data, before);
        assert_eq!(key.resource(), 100);
    }

    /// Operations on a key that was never assigned fail the integrity check.
    #[test]
    fn test_unassigned_key_rejected() {
        let mut key = KuznyechikKey::new(100).unwrap();
        let mut data = pattern(16);
        assert_eq!(
            key.encrypt_ecb_in_place(&mut data),
            Err(PrimitivesError::KeyIntegrityViolation)
        );
        assert_eq!(
            key.xcrypt_in_place(&mut data, Some(&[0u8; 8][..])),
            Err(PrimitivesError::KeyIntegrityViolation)
        );
    }

    /// A corrupted integrity code stops every operation before output is written.
    #[test]
    fn test_integrity_gate() {
        let mut key = kuznyechik(100);
        key.key.corrupt_icode();

        let input = pattern(32);
        let mut out = vec![0u8; 32];
        assert_eq!(
            key.encrypt_ecb(&input, &mut out),
            Err(PrimitivesError::KeyIntegrityViolation)
        );
        assert_eq!(
            key.decrypt_ecb(&input, &mut out),
            Err(PrimitivesError::KeyIntegrityViolation)
        );
        assert_eq!(
            key.xcrypt(&input, &mut out, Some(&[0u8; 8][..])),
            Err(PrimitivesError::KeyIntegrityViolation)
        );
        assert_eq!(out, vec![0u8; 32]);
        assert_eq!(key.resource(), 100);
    }

    /// Every operation leaves the key remasked and its integrity code valid.
    #[test]
    fn test_key_remasked_after_operation() {
        let mut key = kuznyechik(100);
        let plain = key.key.unmask().to_vec();
        let mut data = pattern(32);
        key.encrypt_ecb_in_place(&mut data).unwrap();
        assert!(key.key.check_icode());
        assert_eq!(key.key.unmask().as_slice(), plain.as_slice());
        key.xcrypt_in_place(&mut data, Some(&[1u8; 8][..])).unwrap();
        assert!(key.key.check_icode());
    }

    const KUZ_PLAIN: &str = "8899aabbccddeeff00776655443322110affeeccbbaa99887766554433221100\
                             000affeeccbbaa99887766554433221111000affeeccbbaa9988776655443322";
    const MAGMA_PLAIN: &str = "590a133c6bf0de92209d18f804c754db4c02a8672efb984a417eb5179b401289";

    /// GOST R 34.13-2015, appendix A.1.2: counter mode, little-endian.
    #[test]
    fn test_gamma_kuznyechik_standard() {
        let mut key = kuznyechik(100);
        let iv = hex::decode("f0ceab9078563412").unwrap();
        let mut data = hex::decode(KUZ_PLAIN).unwrap();
        key.xcrypt_in_place(&mut data, Some(&iv[..])).unwrap();
        assert_eq!(
            hex::encode(&data),
            "b8a1bd40a25f7bd5dbd10ec1bed895f1e4de453cb3e43cf35d3ea1f633e7ee85\
             a5a36435f177e8d5d36e35e68be8eaa573babd2058d1c6d1b6ba0cf2b1fa91cb"
        );
        assert_eq!(key.resource(), 96);
    }

    /// A.1.2 cut to three blocks and the five leading bytes of the fourth.
    #[test]
    fn test_gamma_kuznyechik_standard_tail() {
        let mut key = kuznyechik(100);
        let iv = hex::decode("f0ceab9078563412").unwrap();
        let mut data = hex::decode(
            "8899aabbccddeeff00776655443322110affeeccbbaa99887766554433221100\
             000affeeccbbaa998877665544332211\
             6655443322",
        )
        .unwrap();
        key.xcrypt_in_place(&mut data, Some(&iv[..])).unwrap();
        assert_eq!(
            hex::encode(&data),
            "b8a1bd40a25f7bd5dbd10ec1bed895f1e4de453cb3e43cf35d3ea1f633e7ee85\
             a5a36435f177e8d5d36e35e68be8eaa5f2b1fa91cb"
        );
        assert!(!key.can_resume());
    }

    /// GOST R 34.13-2015, appendix A.2.2: counter mode, little-endian.
    #[test]
    fn test_gamma_magma_standard() {
        let mut key = magma(100);
        let plain = hex::decode(MAGMA_PLAIN).unwrap();
        let mut out = vec![0u8; plain.len()];
        key.xcrypt(&plain, &mut out, Some(&hex::decode("78563412").unwrap()[..]))
            .unwrap();
        assert_eq!(
            hex::encode(&out),
            "3cb9b7970c11984e695de8d6930d253eefdbb20788866d132da152ab80b68e56"
        );
    }

    /// A.2.2 cut to three blocks and the three leading bytes of the fourth.
    #[test]
    fn test_gamma_magma_standard_tail() {
        let mut key = magma(100);
        let mut data =
            hex::decode("590a133c6bf0de92209d18f804c754db4c02a8672efb984a401289").unwrap();
        key.xcrypt_in_place(&mut data, Some(&hex::decode("78563412").unwrap()[..]))
            .unwrap();
        assert_eq!(
            hex::encode(&data),
            "3cb9b7970c11984e695de8d6930d253eefdbb20788866d13b68e56"
        );
        assert_eq!(key.resource(), 96);
    }

    /// A remask failure after the transform does not change the result.
    #[test]
    fn test_remask_failure_keeps_output() {
        let plain = pattern(32);
        let mut expected = vec![0u8; 32];
        kuznyechik(100).encrypt_ecb(&plain, &mut expected).unwrap();

        let mut key = kuznyechik(100);
        key.key.set_rng(FailingRng);
        let mut out = vec![0u8; 32];
        key.encrypt_ecb(&plain, &mut out).unwrap();
        assert_eq!(out, expected);
        assert_eq!(key.resource(), 98);
        assert!(key.key.check_icode());

        let mut data = pattern(20);
        key.xcrypt_in_place(&mut data, Some(&[5u8; 8][..])).unwrap();
        assert_eq!(key.resource(), 96);
    }

    /// The keystream is the encryption of the counter blocks built from the
    /// initial value, with the first word counting blocks.
    #[test]
    fn test_gamma_matches_counter_encryption() {
        let iv = hex::decode("1234567890abcef0").unwrap();
        let mut key = kuznyechik(100);
        let mut stream = vec![0u8; 48];
        key.xcrypt_in_place(&mut stream, Some(&iv[..])).unwrap();

        let mut counters = Vec::new();
        for i in 0u64..3 {
            counters.extend_from_slice(&i.to_le_bytes());
            counters.extend_from_slice(&iv);
        }
        let mut reference = kuznyechik(100);
        reference.encrypt_ecb_in_place(&mut counters).unwrap();
        assert_eq!(stream, counters);
    }

    /// For 8-byte blocks the counter is the whole block.
    #[test]
    fn test_gamma_magma_counter_layout() {
        let iv = hex::decode("12345678").unwrap();
        let mut key = magma(100);
        let mut stream = vec![0u8; 16];
        key.xcrypt_in_place(&mut stream, Some(&iv[..])).unwrap();

        let mut counters = hex::decode("0000000012345678").unwrap();
        counters.extend_from_slice(&hex::decode("0100000012345678").unwrap());
        let mut reference = magma(100);
        reference.encrypt_ecb_in_place(&mut counters).unwrap();
        assert_eq!(stream, counters);
    }

    /// Only the first half block of a long initial value is used.
    #[test]
    fn test_long_iv_truncated() {
        let mut a = kuznyechik(100);
        let mut b = kuznyechik(100);
        let mut x = pattern(16);
        let mut y = pattern(16);
        a.xcrypt_in_place(&mut x, Some(&[9u8; 8][..])).unwrap();
        b.xcrypt_in_place(&mut y, Some(&[9u8; 32][..])).unwrap();
        assert_eq!(x, y);
    }

    #[test]
    fn test_short_iv_rejected() {
        let mut key = kuznyechik(100);
        let mut data = pattern(16);
        let before = data.clone();
        assert_eq!(
            key.xcrypt_in_place(&mut data, Some(&[0u8; 7][..])),
            Err(PrimitivesError::InvalidIvLength { expected: 8, got: 7 })
        );
        assert_eq!(data, before);
        assert_eq!(key.resource(), 100);
    }

    #[test]
    fn test_resume_without_state() {
        let mut key = magma(100);
        let mut data = pattern(8);
        assert_eq!(
            key.xcrypt_in_place(&mut data, None),
            Err(PrimitivesError::NoPriorState)
        );
        assert_eq!(
            key.xcrypt_in_place(&mut data, Some(&[0u8; 0][..])),
            Err(PrimitivesError::NoPriorState)
        );
        assert_eq!(key.resource(), 100);
    }

    /// Block-aligned fragments resume the keystream exactly.
    #[test]
    fn test_streaming_equivalence() {
        let iv = [0x5Au8; 8];
        let plain = pattern(16 * 5 + 9);

        let mut whole = kuznyechik(100);
        let mut expected = vec![0u8; plain.len()];
        whole.xcrypt(&plain, &mut expected, Some(&iv[..])).unwrap();

        let mut split = kuznyechik(100);
        let mut out = vec![0u8; plain.len()];
        split.xcrypt(&plain[..16], &mut out[..16], Some(&iv[..])).unwrap();
        assert!(split.can_resume());
        split.xcrypt(&plain[16..48], &mut out[16..48], None).unwrap();
        split.xcrypt(&plain[48..], &mut out[48..], None).unwrap();
        assert!(!split.can_resume());

        assert_eq!(out, expected);
        assert_eq!(whole.resource(), split.resource());
    }

    /// After a partial block the stream must be reseeded.
    #[test]
    fn test_resume_after_tail_blocked() {
        let mut key = magma(100);
        let mut data = pattern(13);
        key.xcrypt_in_place(&mut data, Some(&[1u8, 2, 3, 4][..])).unwrap();
        assert_eq!(key.resource(), 98);

        let mut next = pattern(8);
        assert_eq!(
            key.xcrypt_in_place(&mut next, None),
            Err(PrimitivesError::ContinuationBlocked)
        );
        assert_eq!(key.resource(), 98);

        key.xcrypt_in_place(&mut next, Some(&[1u8, 2, 3, 4][..])).unwrap();
        assert!(key.can_resume());
    }

    /// The tail is masked with the most significant bytes of the keystream block.
    #[test]
    fn test_tail_uses_high_keystream_bytes() {
        let iv = [3u8; 8];
        let mut full = kuznyechik(100);
        let mut block = vec![0u8; 16];
        full.xcrypt_in_place(&mut block, Some(&iv[..])).unwrap();

        let mut partial = kuznyechik(100);
        let mut tail = vec![0u8; 5];
        partial.xcrypt_in_place(&mut tail, Some(&iv[..])).unwrap();
        assert_eq!(tail, block[11..]);
    }

    #[test]
    fn test_gamma_self_inverse() {
        let iv = [0x77u8; 4];
        let plain = pattern(37);
        let mut key = magma(100);
        let mut data = plain.clone();
        key.xcrypt_in_place(&mut data, Some(&iv[..])).unwrap();
        assert_ne!(data, plain);
        key.xcrypt_in_place(&mut data, Some(&iv[..])).unwrap();
        assert_eq!(data, plain);
    }

    #[test]
    fn test_gamma_resource_accounting() {
        let mut key = kuznyechik(3);
        let mut data = pattern(40);
        // two full blocks and a tail
        key.xcrypt_in_place(&mut data, Some(&[0u8; 8][..])).unwrap();
        assert_eq!(key.resource(), 0);

        let mut more = pattern(1);
        assert_eq!(
            key.xcrypt_in_place(&mut more, Some(&[0u8; 8][..])),
            Err(PrimitivesError::LowResource { requested: 1, available: 0 })
        );
    }

    #[test]
    fn test_counter_word_wraps_without_carry() {
        let mut counter = vec![0xFFu8; 16];
        increment_counter(&mut counter);
        assert_eq!(&counter[..8], &[0u8; 8]);
        assert_eq!(&counter[8..], &[0xFFu8; 8]);
    }

    #[test]
    fn test_empty_input_seeds_stream() {
        let mut key = kuznyechik(5);
        key.xcrypt_in_place(&mut [0u8; 0], Some(&[0u8; 8][..])).unwrap();
        assert!(key.can_resume());
        assert_eq!(key.resource(), 5);
        key.encrypt_ecb_in_place(&mut [0u8; 0]).unwrap();
        assert_eq!(key.resource(), 5);
    }
}
