//! Hash and XOF collaborators (§6): SHA3-256 (`h`), SHA3-512 (`g`),
//! SHAKE-128 incremental (`xof`), SHAKE-256 one-shot (`prf`, `kdf`, `j`).
//!
//! Their input/output contract is specified; correctness of the underlying
//! Keccak permutation is `sha3`'s responsibility, not this crate's.

use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Digest, Sha3_256, Sha3_512, Shake128, Shake256};

/// SHA3-256(bytes) -> 32 bytes.
#[must_use]
pub(crate) fn h(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    Digest::update(&mut hasher, bytes);
    hasher.finalize().into()
}

/// SHA3-512(a || b) -> (first 32 bytes, last 32 bytes).
#[must_use]
pub(crate) fn g(parts: &[&[u8]]) -> ([u8; 32], [u8; 32]) {
    let mut hasher = Sha3_512::new();
    for p in parts {
        Digest::update(&mut hasher, p);
    }
    let digest = hasher.finalize();
    let mut lo = [0u8; 32];
    let mut hi = [0u8; 32];
    lo.copy_from_slice(&digest[..32]);
    hi.copy_from_slice(&digest[32..]);
    (lo, hi)
}

/// SHAKE-128 over `seed || i || j`, exposed as an incremental reader so
/// callers squeeze one rate block (168 bytes) at a time.
#[must_use]
pub(crate) fn xof(seed: &[u8; 32], i: u8, j: u8) -> impl XofReader {
    let mut hasher = Shake128::default();
    hasher.update(seed);
    hasher.update(&[i]);
    hasher.update(&[j]);
    hasher.finalize_xof()
}

/// SHAKE-256(seed || nonce), squeezed to a fixed-size buffer. Used for CBD
/// noise sampling (`PRF` in the component design).
#[must_use]
pub(crate) fn prf<const OUT_LEN: usize>(seed: &[u8; 32], nonce: u8) -> [u8; OUT_LEN] {
    let mut hasher = Shake256::default();
    hasher.update(seed);
    hasher.update(&[nonce]);
    let mut reader = hasher.finalize_xof();
    let mut out = [0u8; OUT_LEN];
    reader.read(&mut out);
    out
}

/// SHAKE-256(k_bar || h_c) -> 32 bytes. The final KDF step of the FO transform.
#[must_use]
pub(crate) fn kdf(k_bar: &[u8; 32], h_c: &[u8; 32]) -> [u8; 32] {
    let mut hasher = Shake256::default();
    hasher.update(k_bar);
    hasher.update(h_c);
    let mut reader = hasher.finalize_xof();
    let mut out = [0u8; 32];
    reader.read(&mut out);
    out
}
