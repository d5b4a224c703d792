//! Constant-time utilities (C8): conditional move, masked selection, masked
//! equality. None of these may branch or index memory on a secret-dependent
//! value.

/// `r[i] ^= mask & (r[i] ^ x[i])`, where `mask` is `0x00` if `cond == 0` and
/// `0xFF` if `cond == 1`. Copies `x` into `r` in constant time when `cond == 1`.
pub(crate) fn cmov(r: &mut [u8], x: &[u8], cond: u8) {
    debug_assert_eq!(r.len(), x.len());
    let mask = 0u8.wrapping_sub(cond);
    for (ri, xi) in r.iter_mut().zip(x.iter()) {
        *ri ^= mask & (*ri ^ xi);
    }
}

/// Picks `a` when `cond == 0`, `b` when `cond == 1`, in constant time: seeds
/// `r` with `a`, then [`cmov`]s `b` in under `cond`.
pub(crate) fn select_bytes(r: &mut [u8], a: &[u8], b: &[u8], cond: u8) {
    debug_assert_eq!(a.len(), b.len());
    debug_assert_eq!(r.len(), a.len());
    r.copy_from_slice(a);
    cmov(r, b, cond);
}

/// OR-accumulate XOR of corresponding bytes of `a` and `b`; zero iff equal.
/// Callers convert the result to a 0/1 predicate via [`to_bit`].
#[must_use]
pub(crate) fn ct_memcmp(a: &[u8], b: &[u8]) -> u8 {
    debug_assert_eq!(a.len(), b.len());
    let mut r = 0u8;
    for (ai, bi) in a.iter().zip(b.iter()) {
        r |= ai ^ bi;
    }
    r
}

/// Collapse a `ct_memcmp` accumulator to a 0/1 predicate: `0` iff the
/// accumulator was zero (the compared arrays were equal), `1` otherwise.
#[must_use]
pub(crate) fn to_bit(acc: u8) -> u8 {
    (acc | acc.wrapping_neg()) >> 7
}

#[cfg(test)]
mod tests {
    use super::{cmov, ct_memcmp, select_bytes, to_bit};

    #[test]
    fn select_bytes_picks_a_on_zero_and_b_on_one() {
        let a = [0x01, 0x02, 0x03, 0x04];
        let b = [0xff, 0xee, 0xdd, 0xcc];
        let mut r = [0u8; 4];
        select_bytes(&mut r, &a, &b, 0);
        assert_eq!(r, a);
        select_bytes(&mut r, &a, &b, 1);
        assert_eq!(r, b);
    }

    #[test]
    fn cmov_copies_only_when_condition_is_one() {
        let mut r = [1u8, 2, 3];
        let x = [9u8, 9, 9];
        cmov(&mut r, &x, 0);
        assert_eq!(r, [1, 2, 3]);
        cmov(&mut r, &x, 1);
        assert_eq!(r, [9, 9, 9]);
    }

    #[test]
    fn ct_memcmp_zero_iff_equal() {
        assert_eq!(ct_memcmp(&[1, 2, 3], &[1, 2, 3]), 0);
        assert_ne!(ct_memcmp(&[1, 2, 3], &[1, 2, 4]), 0);
        assert_eq!(to_bit(ct_memcmp(&[1, 2, 3], &[1, 2, 3])), 0);
        assert_eq!(to_bit(ct_memcmp(&[1, 2, 3], &[1, 2, 4])), 1);
    }
}
