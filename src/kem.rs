//! CCA-secure KEM via the Fujisaki-Okamoto transform (C7, §4.7).
//!
//! This implements the Kyber round-3 style transform: the freshly drawn
//! message is pre-hashed (`m ← H(m)`, the "hash of shame" — a defensive
//! measure against a biased RNG, §9) before `G` is applied, and the shared
//! secret is derived as `KDF(K̄ ∥ H(c))` via SHAKE-256. This is not the
//! final-FIPS-203 variant, which folds the ciphertext hash differently and
//! omits the message pre-hash.

use crate::ct_utils::{ct_memcmp, select_bytes, to_bit};
use crate::error::Error;
use crate::hash::{g, h, kdf};
use crate::pke;
use rand_core::CryptoRngCore;

/// `ML-KEM.KeyGen`, deterministic in `(d, z)`. `ek` must be `384*K+32`
/// bytes; `dk` must be `768*K+96` bytes (`sk_cpa ∥ ek ∥ H(ek) ∥ z`).
pub(crate) fn key_gen_from_seed<const K: usize, const ETA1_64: usize>(
    d: &[u8; 32], z: &[u8; 32], eta1: u32, ek: &mut [u8], dk: &mut [u8],
) {
    let ek_len = 384 * K + 32;
    debug_assert_eq!(ek.len(), ek_len);
    debug_assert_eq!(dk.len(), 768 * K + 96);

    let sk_cpa_len = 384 * K;
    pke::key_gen::<K, ETA1_64>(d, eta1, ek, &mut dk[..sk_cpa_len]);

    dk[sk_cpa_len..sk_cpa_len + ek_len].copy_from_slice(ek);
    let h_ek = h(ek);
    dk[sk_cpa_len + ek_len..sk_cpa_len + ek_len + 32].copy_from_slice(&h_ek);
    dk[sk_cpa_len + ek_len + 32..].copy_from_slice(z);
}

/// `ML-KEM.KeyGen`. `ek` must be `384*K+32` bytes; `dk` must be
/// `768*K+96` bytes (`sk_cpa ∥ ek ∥ H(ek) ∥ z`).
pub(crate) fn key_gen<const K: usize, const ETA1_64: usize>(
    rng: &mut impl CryptoRngCore, eta1: u32, ek: &mut [u8], dk: &mut [u8],
) -> Result<(), Error> {
    let mut d = [0u8; 32];
    let mut z = [0u8; 32];
    rng.try_fill_bytes(&mut d).map_err(|_| Error::RngFailure)?;
    rng.try_fill_bytes(&mut z).map_err(|_| Error::RngFailure)?;

    key_gen_from_seed::<K, ETA1_64>(&d, &z, eta1, ek, dk);

    Ok(())
}

/// `ML-KEM.Encaps`. `ss` is always 32 bytes; `ct` must be
/// `compress_du_len(K) + compress_dv_len` bytes.
#[allow(clippy::too_many_arguments)]
pub(crate) fn encaps<const K: usize, const ETA1_64: usize, const ETA2_64: usize>(
    rng: &mut impl CryptoRngCore, eta1: u32, eta2: u32, du: u32, dv: u32, ek: &[u8],
    ct: &mut [u8],
) -> Result<[u8; 32], Error> {
    let mut m = [0u8; 32];
    rng.try_fill_bytes(&mut m).map_err(|_| Error::RngFailure)?;
    m = h(&m); // "hash of shame": defends against a biased RNG, §9

    let h_ek = h(ek);
    let (k_bar, r) = g(&[&m, &h_ek]);

    pke::encrypt::<K, ETA1_64, ETA2_64>(ek, &m, &r, eta1, eta2, du, dv, ct);

    let h_c = h(ct);
    Ok(kdf(&k_bar, &h_c))
}

/// `ML-KEM.Decaps`. `CT_LEN` must equal `32*(du*K + dv)`. Never fails: a
/// malformed or adversarial ciphertext yields a deterministic,
/// unrelated-looking shared secret derived from the implicit-rejection
/// seed `z` rather than an error.
#[allow(clippy::too_many_arguments)]
pub(crate) fn decaps<const K: usize, const ETA1_64: usize, const ETA2_64: usize, const CT_LEN: usize>(
    eta1: u32, eta2: u32, du: u32, dv: u32, dk: &[u8], ct: &[u8; CT_LEN],
) -> [u8; 32] {
    let sk_cpa_len = 384 * K;
    let ek_len = 384 * K + 32;
    let sk_cpa = &dk[..sk_cpa_len];
    let ek = &dk[sk_cpa_len..sk_cpa_len + ek_len];
    let h_ek = &dk[sk_cpa_len + ek_len..sk_cpa_len + ek_len + 32];
    let z: [u8; 32] = dk[sk_cpa_len + ek_len + 32..].try_into().unwrap();

    let mut m_prime = [0u8; 32];
    pke::decrypt::<K>(sk_cpa, ct, du, dv, &mut m_prime);

    let (k_bar_prime, r_prime) = g(&[&m_prime, h_ek]);

    let mut c_prime = [0u8; CT_LEN];
    pke::encrypt::<K, ETA1_64, ETA2_64>(ek, &m_prime, &r_prime, eta1, eta2, du, dv, &mut c_prime);

    // Branch-free implicit rejection: substitute the caller's rejection seed
    // for the re-derived key whenever the re-encryption doesn't match.
    let reject = to_bit(ct_memcmp(&ct[..], &c_prime));
    let mut selected = [0u8; 32];
    select_bytes(&mut selected, &k_bar_prime, &z, reject);

    let h_c = h(&ct[..]);
    kdf(&selected, &h_c)
}

#[cfg(test)]
mod tests {
    use super::{decaps, encaps, key_gen};
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const K: usize = 2;
    const ETA1: u32 = 3;
    const ETA2: u32 = 2;
    const ETA1_64: usize = ETA1 as usize * 64;
    const ETA2_64: usize = ETA2 as usize * 64;
    const EK_LEN: usize = 800;
    const DK_LEN: usize = 1632;
    const CT_LEN: usize = 768;

    #[test]
    fn round_trip_shared_secret_matches() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ek = [0u8; EK_LEN];
        let mut dk = [0u8; DK_LEN];
        key_gen::<K, ETA1_64>(&mut rng, ETA1, &mut ek, &mut dk).unwrap();

        let mut ct = [0u8; CT_LEN];
        let ss1 = encaps::<K, ETA1_64, ETA2_64>(&mut rng, ETA1, ETA2, 10, 4, &ek, &mut ct).unwrap();

        let ss2 = decaps::<K, ETA1_64, ETA2_64, CT_LEN>(ETA1, ETA2, 10, 4, &dk, &ct);
        assert_eq!(ss1, ss2);
    }

    #[test]
    fn bit_flipped_ciphertext_yields_stable_unrelated_secret() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut ek = [0u8; EK_LEN];
        let mut dk = [0u8; DK_LEN];
        key_gen::<K, ETA1_64>(&mut rng, ETA1, &mut ek, &mut dk).unwrap();

        let mut ct = [0u8; CT_LEN];
        let ss1 = encaps::<K, ETA1_64, ETA2_64>(&mut rng, ETA1, ETA2, 10, 4, &ek, &mut ct).unwrap();

        let mut bad_ct = ct;
        bad_ct[0] ^= 0x01;

        let rejected_1 = decaps::<K, ETA1_64, ETA2_64, CT_LEN>(ETA1, ETA2, 10, 4, &dk, &bad_ct);
        let rejected_2 = decaps::<K, ETA1_64, ETA2_64, CT_LEN>(ETA1, ETA2, 10, 4, &dk, &bad_ct);
        assert_ne!(ss1, rejected_1);
        assert_eq!(rejected_1, rejected_2, "implicit rejection must be deterministic");
    }

    #[test]
    fn two_distinct_malformed_ciphertexts_reject_differently() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut ek = [0u8; EK_LEN];
        let mut dk = [0u8; DK_LEN];
        key_gen::<K, ETA1_64>(&mut rng, ETA1, &mut ek, &mut dk).unwrap();

        let mut ct_a = [0xAAu8; CT_LEN];
        let mut ct_b = [0x55u8; CT_LEN];
        ct_a[0] = 1;
        ct_b[0] = 2;

        let ss_a = decaps::<K, ETA1_64, ETA2_64, CT_LEN>(ETA1, ETA2, 10, 4, &dk, &ct_a);
        let ss_b = decaps::<K, ETA1_64, ETA2_64, CT_LEN>(ETA1, ETA2, 10, 4, &dk, &ct_b);
        assert_ne!(ss_a, ss_b);
    }
}
