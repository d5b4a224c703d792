//! Matrix generation and rejection sampling (C5).
//!
//! The public matrix `A` is regenerated from the 32-byte seed `ρ` on every
//! call rather than cached (§9: "Matrix A is ephemeral and not persisted").

use crate::field::Q;
use crate::hash::xof;
use crate::poly::Poly;
use sha3::digest::XofReader;

const SHAKE128_RATE: usize = 168;
/// Number of 168-byte SHAKE-128 blocks expected to deliver 256 accepted
/// candidates, computed the same way the reference does: enough bytes for
/// 256 coefficients at the q/4096 acceptance rate, rounded up to a whole
/// number of rate blocks.
const GEN_A_NBLOCKS: usize = (12 * 256 / 8 * (1 << 12) / 3329 + SHAKE128_RATE) / SHAKE128_RATE;

/// Rejection-sample uniform coefficients in `[0, Q)` from `buf`, writing
/// accepted values into `r[..]` starting at offset `start`. Returns the
/// total number of accepted coefficients (including `start`).
fn rej_uniform(r: &mut Poly, start: usize, buf: &[u8]) -> usize {
    let mut ctr = start;
    let mut pos = 0usize;
    while ctr < 256 && pos + 3 <= buf.len() {
        let val0 = (u16::from(buf[pos]) | (u16::from(buf[pos + 1]) << 8)) & 0xFFF;
        let val1 = (u16::from(buf[pos + 1]) >> 4 | (u16::from(buf[pos + 2]) << 4)) & 0xFFF;
        pos += 3;
        if val0 < Q as u16 {
            r[ctr] = val0 as i16;
            ctr += 1;
        }
        if ctr < 256 && val1 < Q as u16 {
            r[ctr] = val1 as i16;
            ctr += 1;
        }
    }
    ctr
}

/// Sample one uniformly random polynomial from `seed || i || j` (or
/// `seed || j || i` if `transposed`, per the caller's index order).
fn sample_uniform(seed: &[u8; 32], i: u8, j: u8) -> Poly {
    let mut reader = xof(seed, i, j);

    let mut buf = [0u8; GEN_A_NBLOCKS * SHAKE128_RATE];
    reader.read(&mut buf);
    let mut r = [0i16; 256];
    let mut ctr = rej_uniform(&mut r, 0, &buf);
    let mut buflen = buf.len();

    // Carry the unconsumed tail (at most 2 bytes) forward so refilling
    // never drops a partial 3-byte rejection-sampling triple.
    let mut refill = [0u8; 2 + SHAKE128_RATE];
    while ctr < 256 {
        let off = buflen % 3;
        refill[..off].copy_from_slice(&buf[buflen - off..buflen]);
        reader.read(&mut refill[off..off + SHAKE128_RATE]);
        buflen = off + SHAKE128_RATE;
        buf[..buflen].copy_from_slice(&refill[..buflen]);
        ctr = rej_uniform(&mut r, ctr, &buf[..buflen]);
    }
    r
}

/// Deterministically generate `A` (or `A^T`) from seed `ρ`. Cell `(i, j)` is
/// derived from `ρ ∥ j ∥ i` (non-transposed) or `ρ ∥ i ∥ j` (transposed).
pub(crate) fn gen_matrix<const K: usize>(
    rho: &[u8; 32],
    transposed: bool,
) -> [[Poly; K]; K] {
    core::array::from_fn(|i| {
        core::array::from_fn(|j| {
            if transposed {
                sample_uniform(rho, i as u8, j as u8)
            } else {
                sample_uniform(rho, j as u8, i as u8)
            }
        })
    })
}

#[cfg(test)]
mod tests {
    use super::gen_matrix;
    use crate::field::Q;

    #[test]
    fn gen_matrix_coefficients_are_uniform_in_range() {
        let seed = [7u8; 32];
        let a: [[crate::poly::Poly; 2]; 2] = gen_matrix(&seed, false);
        for row in a.iter() {
            for poly in row.iter() {
                for &c in poly.iter() {
                    assert!(c >= 0 && c < Q, "coefficient {c} out of range");
                }
            }
        }
    }

    #[test]
    fn gen_matrix_transposed_swaps_indices() {
        let seed = [11u8; 32];
        let a: [[crate::poly::Poly; 3]; 3] = gen_matrix(&seed, false);
        let at: [[crate::poly::Poly; 3]; 3] = gen_matrix(&seed, true);
        // a[i][j] was derived from (j,i); at[j][i] was derived from (j,i) too.
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(a[i][j], at[j][i]);
            }
        }
    }
}
