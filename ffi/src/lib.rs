//! C ABI over the `kyber-r3` crate: one keygen/encaps/decaps triple per
//! parameter set, operating on caller-allocated fixed-size buffers.
//!
//! Every function returns `0` on success and `-1` on failure (RNG failure
//! during keygen/encaps, or a malformed encapsulation key on deserialize).
//! Decapsulation itself never fails by construction (implicit rejection);
//! a `-1` from a `decaps` entry point here only indicates a null pointer.

use kyber_r3::traits::{Decaps, Encaps, KeyGen, SerDes};
use std::slice;

#[cfg(feature = "ml-kem-512")]
pub mod ml_kem_512 {
    use super::*;
    use kyber_r3::ml_kem_512::{CipherText, DecapsKey, EncapsKey, KG, CT_LEN, DK_LEN, EK_LEN};

    /// # Safety
    /// `ek_out` must point to `EK_LEN` writable bytes, `dk_out` to `DK_LEN` writable bytes.
    #[no_mangle]
    pub unsafe extern "C" fn kyber_r3_ml_kem_512_keygen(ek_out: *mut u8, dk_out: *mut u8) -> i32 {
        if ek_out.is_null() || dk_out.is_null() {
            return -1;
        }
        let Ok((ek, dk)) = KG::try_keygen() else { return -1 };
        slice::from_raw_parts_mut(ek_out, EK_LEN).copy_from_slice(&ek.into_bytes());
        slice::from_raw_parts_mut(dk_out, DK_LEN).copy_from_slice(&dk.into_bytes());
        0
    }

    /// # Safety
    /// `ek_in` must point to `EK_LEN` readable bytes; `ct_out` to `CT_LEN` writable bytes;
    /// `ss_out` to 32 writable bytes.
    #[no_mangle]
    pub unsafe extern "C" fn kyber_r3_ml_kem_512_encaps(
        ek_in: *const u8, ct_out: *mut u8, ss_out: *mut u8,
    ) -> i32 {
        if ek_in.is_null() || ct_out.is_null() || ss_out.is_null() {
            return -1;
        }
        let Ok(ek_bytes): Result<[u8; EK_LEN], _> = slice::from_raw_parts(ek_in, EK_LEN).try_into()
        else {
            return -1;
        };
        let Ok(ek) = EncapsKey::try_from_bytes(ek_bytes) else { return -1 };
        let Ok((ss, ct)) = ek.try_encaps() else { return -1 };
        slice::from_raw_parts_mut(ct_out, CT_LEN).copy_from_slice(&ct.into_bytes());
        slice::from_raw_parts_mut(ss_out, 32).copy_from_slice(&ss.into_bytes());
        0
    }

    /// # Safety
    /// `dk_in` must point to `DK_LEN` readable bytes; `ct_in` to `CT_LEN` readable bytes;
    /// `ss_out` to 32 writable bytes.
    #[no_mangle]
    pub unsafe extern "C" fn kyber_r3_ml_kem_512_decaps(
        dk_in: *const u8, ct_in: *const u8, ss_out: *mut u8,
    ) -> i32 {
        if dk_in.is_null() || ct_in.is_null() || ss_out.is_null() {
            return -1;
        }
        let Ok(dk_bytes): Result<[u8; DK_LEN], _> = slice::from_raw_parts(dk_in, DK_LEN).try_into()
        else {
            return -1;
        };
        let Ok(ct_bytes): Result<[u8; CT_LEN], _> = slice::from_raw_parts(ct_in, CT_LEN).try_into()
        else {
            return -1;
        };
        let Ok(dk) = DecapsKey::try_from_bytes(dk_bytes) else { return -1 };
        let Ok(ct) = CipherText::try_from_bytes(ct_bytes) else { return -1 };
        let ss = dk.try_decaps(&ct);
        slice::from_raw_parts_mut(ss_out, 32).copy_from_slice(&ss.into_bytes());
        0
    }
}

#[cfg(feature = "ml-kem-768")]
pub mod ml_kem_768 {
    use super::*;
    use kyber_r3::ml_kem_768::{CipherText, DecapsKey, EncapsKey, KG, CT_LEN, DK_LEN, EK_LEN};

    /// # Safety
    /// `ek_out` must point to `EK_LEN` writable bytes, `dk_out` to `DK_LEN` writable bytes.
    #[no_mangle]
    pub unsafe extern "C" fn kyber_r3_ml_kem_768_keygen(ek_out: *mut u8, dk_out: *mut u8) -> i32 {
        if ek_out.is_null() || dk_out.is_null() {
            return -1;
        }
        let Ok((ek, dk)) = KG::try_keygen() else { return -1 };
        slice::from_raw_parts_mut(ek_out, EK_LEN).copy_from_slice(&ek.into_bytes());
        slice::from_raw_parts_mut(dk_out, DK_LEN).copy_from_slice(&dk.into_bytes());
        0
    }

    /// # Safety
    /// `ek_in` must point to `EK_LEN` readable bytes; `ct_out` to `CT_LEN` writable bytes;
    /// `ss_out` to 32 writable bytes.
    #[no_mangle]
    pub unsafe extern "C" fn kyber_r3_ml_kem_768_encaps(
        ek_in: *const u8, ct_out: *mut u8, ss_out: *mut u8,
    ) -> i32 {
        if ek_in.is_null() || ct_out.is_null() || ss_out.is_null() {
            return -1;
        }
        let Ok(ek_bytes): Result<[u8; EK_LEN], _> = slice::from_raw_parts(ek_in, EK_LEN).try_into()
        else {
            return -1;
        };
        let Ok(ek) = EncapsKey::try_from_bytes(ek_bytes) else { return -1 };
        let Ok((ss, ct)) = ek.try_encaps() else { return -1 };
        slice::from_raw_parts_mut(ct_out, CT_LEN).copy_from_slice(&ct.into_bytes());
        slice::from_raw_parts_mut(ss_out, 32).copy_from_slice(&ss.into_bytes());
        0
    }

    /// # Safety
    /// `dk_in` must point to `DK_LEN` readable bytes; `ct_in` to `CT_LEN` readable bytes;
    /// `ss_out` to 32 writable bytes.
    #[no_mangle]
    pub unsafe extern "C" fn kyber_r3_ml_kem_768_decaps(
        dk_in: *const u8, ct_in: *const u8, ss_out: *mut u8,
    ) -> i32 {
        if dk_in.is_null() || ct_in.is_null() || ss_out.is_null() {
            return -1;
        }
        let Ok(dk_bytes): Result<[u8; DK_LEN], _> = slice::from_raw_parts(dk_in, DK_LEN).try_into()
        else {
            return -1;
        };
        let Ok(ct_bytes): Result<[u8; CT_LEN], _> = slice::from_raw_parts(ct_in, CT_LEN).try_into()
        else {
            return -1;
        };
        let Ok(dk) = DecapsKey::try_from_bytes(dk_bytes) else { return -1 };
        let Ok(ct) = CipherText::try_from_bytes(ct_bytes) else { return -1 };
        let ss = dk.try_decaps(&ct);
        slice::from_raw_parts_mut(ss_out, 32).copy_from_slice(&ss.into_bytes());
        0
    }
}

#[cfg(feature = "ml-kem-1024")]
pub mod ml_kem_1024 {
    use super::*;
    use kyber_r3::ml_kem_1024::{CipherText, DecapsKey, EncapsKey, KG, CT_LEN, DK_LEN, EK_LEN};

    /// # Safety
    /// `ek_out` must point to `EK_LEN` writable bytes, `dk_out` to `DK_LEN` writable bytes.
    #[no_mangle]
    pub unsafe extern "C" fn kyber_r3_ml_kem_1024_keygen(ek_out: *mut u8, dk_out: *mut u8) -> i32 {
        if ek_out.is_null() || dk_out.is_null() {
            return -1;
        }
        let Ok((ek, dk)) = KG::try_keygen() else { return -1 };
        slice::from_raw_parts_mut(ek_out, EK_LEN).copy_from_slice(&ek.into_bytes());
        slice::from_raw_parts_mut(dk_out, DK_LEN).copy_from_slice(&dk.into_bytes());
        0
    }

    /// # Safety
    /// `ek_in` must point to `EK_LEN` readable bytes; `ct_out` to `CT_LEN` writable bytes;
    /// `ss_out` to 32 writable bytes.
    #[no_mangle]
    pub unsafe extern "C" fn kyber_r3_ml_kem_1024_encaps(
        ek_in: *const u8, ct_out: *mut u8, ss_out: *mut u8,
    ) -> i32 {
        if ek_in.is_null() || ct_out.is_null() || ss_out.is_null() {
            return -1;
        }
        let Ok(ek_bytes): Result<[u8; EK_LEN], _> = slice::from_raw_parts(ek_in, EK_LEN).try_into()
        else {
            return -1;
        };
        let Ok(ek) = EncapsKey::try_from_bytes(ek_bytes) else { return -1 };
        let Ok((ss, ct)) = ek.try_encaps() else { return -1 };
        slice::from_raw_parts_mut(ct_out, CT_LEN).copy_from_slice(&ct.into_bytes());
        slice::from_raw_parts_mut(ss_out, 32).copy_from_slice(&ss.into_bytes());
        0
    }

    /// # Safety
    /// `dk_in` must point to `DK_LEN` readable bytes; `ct_in` to `CT_LEN` readable bytes;
    /// `ss_out` to 32 writable bytes.
    #[no_mangle]
    pub unsafe extern "C" fn kyber_r3_ml_kem_1024_decaps(
        dk_in: *const u8, ct_in: *const u8, ss_out: *mut u8,
    ) -> i32 {
        if dk_in.is_null() || ct_in.is_null() || ss_out.is_null() {
            return -1;
        }
        let Ok(dk_bytes): Result<[u8; DK_LEN], _> = slice::from_raw_parts(dk_in, DK_LEN).try_into()
        else {
            return -1;
        };
        let Ok(ct_bytes): Result<[u8; CT_LEN], _> = slice::from_raw_parts(ct_in, CT_LEN).try_into()
        else {
            return -1;
        };
        let Ok(dk) = DecapsKey::try_from_bytes(dk_bytes) else { return -1 };
        let Ok(ct) = CipherText::try_from_bytes(ct_bytes) else { return -1 };
        let ss = dk.try_decaps(&ct);
        slice::from_raw_parts_mut(ss_out, 32).copy_from_slice(&ss.into_bytes());
        0
    }
}
