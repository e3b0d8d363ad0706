//! Built-in self test.
//!
//! Checks the block ciphers against the published GOST R 34.12-2015 /
//! GOST R 34.13-2015 vectors in ECB and counter (gamma) mode, verifies that
//! fragmented gamma-mode processing matches single-call processing, and that
//! masked HMAC keys agree with the plain computation.

use serde::Deserialize;

use crate::bckey::{BlockCipherKey, BlockTransform, Kuznyechik, Magma};
use crate::hash::hmac_streebog256;
use crate::mac::{HashAlgorithm, HmacKey};
use crate::PrimitivesError;

const BLOCK_CIPHER_VECTORS: &str = include_str!("../testdata/block_ciphers.vectors.json");

/// Resource given to the keys used by the self test.
const TEST_RESOURCE: i64 = 1024;

#[derive(Debug, Deserialize)]
struct BlockVector {
    cipher: String,
    key: String,
    /// Present for counter-mode vectors.
    #[serde(default)]
    iv: Option<String>,
    plaintext: String,
    ciphertext: String,
}

/// Outcome of one self-test check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    pub name: String,
    pub passed: bool,
    pub detail: Option<String>,
}

impl Check {
    fn from_result(name: impl Into<String>, result: Result<bool, PrimitivesError>) -> Self {
        let name = name.into();
        match result {
            Ok(passed) => Check { name, passed, detail: None },
            Err(e) => Check { name, passed: false, detail: Some(e.to_string()) },
        }
    }
}

/// Run every check.
pub fn run() -> Vec<Check> {
    let mut checks = Vec::new();

    match serde_json::from_str::<Vec<BlockVector>>(BLOCK_CIPHER_VECTORS) {
        Ok(vectors) => {
            for (i, v) in vectors.iter().enumerate() {
                let mode = if v.iv.is_some() { "gamma" } else { "ecb" };
                let name = format!("{} {} vector #{}", v.cipher, mode, i + 1);
                let result = match v.cipher.as_str() {
                    "magma" => check_vector::<Magma>(v),
                    "kuznyechik" => check_vector::<Kuznyechik>(v),
                    other => Err(PrimitivesError::Config(format!("unknown cipher {}", other))),
                };
                checks.push(Check::from_result(name, result));
            }
        }
        Err(e) => checks.push(Check::from_result("block cipher vectors", Err(e.into()))),
    }

    checks.push(Check::from_result("magma gamma streaming", check_streaming::<Magma>()));
    checks.push(Check::from_result(
        "kuznyechik gamma streaming",
        check_streaming::<Kuznyechik>(),
    ));
    checks.push(Check::from_result("hmac-streebog256 masked key", check_hmac()));

    for check in &checks {
        if check.passed {
            tracing::debug!(check = %check.name, "self test passed");
        } else {
            tracing::warn!(check = %check.name, detail = ?check.detail, "self test failed");
        }
    }
    checks
}

/// Whether every check passed.
pub fn all_passed(checks: &[Check]) -> bool {
    checks.iter().all(|c| c.passed)
}

fn decode(field: &str) -> Result<Vec<u8>, PrimitivesError> {
    hex::decode(field).map_err(|e| PrimitivesError::Config(e.to_string()))
}

fn check_vector<C: BlockTransform>(v: &BlockVector) -> Result<bool, PrimitivesError> {
    let plaintext = decode(&v.plaintext)?;
    let ciphertext = decode(&v.ciphertext)?;

    let mut key = BlockCipherKey::<C>::new(TEST_RESOURCE)?;
    key.set_key_owned(decode(&v.key)?)?;

    let mut out = vec![0u8; plaintext.len()];
    if let Some(iv) = &v.iv {
        let iv = decode(iv)?;
        key.xcrypt(&plaintext, &mut out, Some(&iv[..]))?;
        if out != ciphertext {
            return Ok(false);
        }
        key.xcrypt_in_place(&mut out, Some(&iv[..]))?;
        return Ok(out == plaintext);
    }

    key.encrypt_ecb(&plaintext, &mut out)?;
    if out != ciphertext {
        return Ok(false);
    }
    key.decrypt_ecb_in_place(&mut out)?;
    Ok(out == plaintext)
}

fn check_streaming<C: BlockTransform>() -> Result<bool, PrimitivesError> {
    let bs = C::BLOCK_SIZE;
    let key_value: Vec<u8> = (0..C::KEY_SIZE).map(|i| (i * 13 + 1) as u8).collect();
    let iv: Vec<u8> = (0..bs / 2).map(|i| (0xF0 ^ i) as u8).collect();
    let data: Vec<u8> = (0..bs * 7 + 3).map(|i| i as u8).collect();

    let mut whole = BlockCipherKey::<C>::new(TEST_RESOURCE)?;
    whole.set_key(&key_value)?;
    let mut expected = vec![0u8; data.len()];
    whole.xcrypt(&data, &mut expected, Some(&iv[..]))?;

    let mut split = BlockCipherKey::<C>::new(TEST_RESOURCE)?;
    split.set_key(&key_value)?;
    let mut out = data.clone();
    let (first, rest) = out.split_at_mut(bs * 2);
    let (second, third) = rest.split_at_mut(bs * 3);
    split.xcrypt_in_place(first, Some(&iv[..]))?;
    split.xcrypt_in_place(second, None)?;
    split.xcrypt_in_place(third, None)?;
    if out != expected {
        return Ok(false);
    }

    let mut back = vec![0u8; data.len()];
    whole.xcrypt(&expected, &mut back, Some(&iv[..]))?;
    Ok(back == data)
}

fn check_hmac() -> Result<bool, PrimitivesError> {
    let raw: Vec<u8> = (0u8..32).collect();
    let msg = hex::decode("0126bdb87800af214341456563780100")
        .map_err(|e| PrimitivesError::Config(e.to_string()))?;
    let mut key = HmacKey::new(HashAlgorithm::Streebog256, TEST_RESOURCE)?;
    key.set_key(&raw)?;
    Ok(key.compute(&msg)? == hmac_streebog256(&raw, &msg).to_vec())
}
