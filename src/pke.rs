//! IND-CPA public-key encryption (C6, §4.6): K-PKE KeyGen / Encrypt / Decrypt.
//!
//! All randomness for `encrypt` is derived from its `coins` argument, making
//! it deterministic in `(pk, m, coins)` — this determinism is what the FO
//! transform in [`crate::kem`] relies on.

use crate::hash::g;
use crate::poly::{self, Poly};
use crate::polyvec::{self, PolyVec};
use crate::sampling::gen_matrix;

/// `K-PKE.KeyGen`. Draws the public/noise seeds from `G(d)`, samples
/// `s, e ~ CBD_η1(σ)`, and computes `t̂ = Â·ŝ + ê`.
///
/// `pk` must be `384*K + 32` bytes; `sk` must be `384*K` bytes.
pub(crate) fn key_gen<const K: usize, const ETA1_64: usize>(
    d: &[u8; 32], eta1: u32, pk: &mut [u8], sk: &mut [u8],
) {
    debug_assert_eq!(pk.len(), 384 * K + 32);
    debug_assert_eq!(sk.len(), 384 * K);

    let (rho, sigma) = g(&[d]);
    let a_hat: [PolyVec<K>; K] = gen_matrix(&rho, false);

    let mut nonce = 0u8;
    let mut s: PolyVec<K> = core::array::from_fn(|_| {
        let p = poly::getnoise::<ETA1_64>(eta1, &sigma, nonce);
        nonce += 1;
        p
    });
    let mut e: PolyVec<K> = core::array::from_fn(|_| {
        let p = poly::getnoise::<ETA1_64>(eta1, &sigma, nonce);
        nonce += 1;
        p
    });

    polyvec::ntt(&mut s);
    polyvec::ntt(&mut e);

    let mut t_hat: PolyVec<K> = core::array::from_fn(|i| {
        let mut row = polyvec::pointwise_acc_montgomery(&a_hat[i], &s);
        poly::tomont(&mut row);
        row
    });
    t_hat = polyvec::add(&t_hat, &e);
    polyvec::reduce(&mut t_hat);

    polyvec::tobytes::<K>(&t_hat, &mut pk[..384 * K]);
    pk[384 * K..].copy_from_slice(&rho);
    polyvec::tobytes::<K>(&s, sk);
}

/// `K-PKE.Encrypt`. Deterministic in `(pk, m, coins)`.
///
/// `ct` must be `compress_du_len(K) + compress_dv_len` bytes, split as
/// `compress_u(u) ∥ compress_v(v)`.
#[allow(clippy::too_many_arguments)]
pub(crate) fn encrypt<const K: usize, const ETA1_64: usize, const ETA2_64: usize>(
    pk: &[u8], m: &[u8; 32], coins: &[u8; 32], eta1: u32, eta2: u32, du: u32, dv: u32,
    ct: &mut [u8],
) {
    let t_hat: PolyVec<K> = polyvec::frombytes(&pk[..384 * K]);
    let rho: [u8; 32] = pk[384 * K..384 * K + 32].try_into().unwrap();
    let at_hat: [PolyVec<K>; K] = gen_matrix(&rho, true);

    let mut nonce = 0u8;
    let mut r: PolyVec<K> = core::array::from_fn(|_| {
        let p = poly::getnoise::<ETA1_64>(eta1, coins, nonce);
        nonce += 1;
        p
    });
    let e1: PolyVec<K> = core::array::from_fn(|_| {
        let p = poly::getnoise::<ETA2_64>(eta2, coins, nonce);
        nonce += 1;
        p
    });
    let e2: Poly = poly::getnoise::<ETA2_64>(eta2, coins, nonce);

    polyvec::ntt(&mut r);

    let mut u: PolyVec<K> = core::array::from_fn(|i| {
        polyvec::pointwise_acc_montgomery(&at_hat[i], &r)
    });
    polyvec::invntt(&mut u);
    u = polyvec::add(&u, &e1);
    polyvec::reduce(&mut u);

    let mut v = polyvec::pointwise_acc_montgomery(&t_hat, &r);
    poly::invntt(&mut v);
    v = poly::add(&v, &e2);
    v = poly::add(&v, &poly::frommsg(m));
    poly::reduce(&mut v);

    let du_len = match du {
        10 => K * 320,
        11 => K * 352,
        _ => unreachable!("d_u is always 10 or 11"),
    };
    polyvec::compress(&u, du, &mut ct[..du_len]);
    let compressed_v = poly::compress(&v, dv);
    ct[du_len..].copy_from_slice(compressed_v.as_bytes());
}

/// `K-PKE.Decrypt`.
pub(crate) fn decrypt<const K: usize>(sk: &[u8], ct: &[u8], du: u32, dv: u32, m: &mut [u8; 32]) {
    let du_len = match du {
        10 => K * 320,
        11 => K * 352,
        _ => unreachable!("d_u is always 10 or 11"),
    };
    let mut u: PolyVec<K> = polyvec::decompress(&ct[..du_len], du);
    let v: Poly = poly::decompress(&ct[du_len..], dv);
    let s_hat: PolyVec<K> = polyvec::frombytes(sk);

    polyvec::ntt(&mut u);
    let mut mp = polyvec::pointwise_acc_montgomery(&s_hat, &u);
    poly::invntt(&mut mp);
    mp = poly::sub(&v, &mp);
    poly::reduce(&mut mp);
    *m = poly::tomsg(&mp);
}

#[cfg(test)]
mod tests {
    use super::{decrypt, encrypt, key_gen};

    #[test]
    fn pke_roundtrip_k2() {
        const K: usize = 2;
        const ETA1: u32 = 3;
        const ETA2: u32 = 2;
        const ETA1_64: usize = ETA1 as usize * 64;
        const ETA2_64: usize = ETA2 as usize * 64;

        let d = [0x11u8; 32];
        let mut pk = [0u8; 384 * K + 32];
        let mut sk = [0u8; 384 * K];
        key_gen::<K, ETA1_64>(&d, ETA1, &mut pk, &mut sk);

        let m = [0x42u8; 32];
        let coins = [0x24u8; 32];
        let mut ct = [0u8; 320 * K + 128];
        encrypt::<K, ETA1_64, ETA2_64>(&pk, &m, &coins, ETA1, ETA2, 10, 4, &mut ct);

        let mut decrypted = [0u8; 32];
        decrypt::<K>(&sk, &ct, 10, 4, &mut decrypted);
        assert_eq!(m, decrypted);
    }
}
