#![no_std]
#![deny(clippy::pedantic)]
#![deny(warnings)]
#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

// Supports automatically clearing sensitive data on drop
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::traits::SerDes;

// Module map:
//
// field.rs      Montgomery/Barrett reduction over Z_3329             (C1)
// ntt.rs        forward/inverse NTT, base multiplication              (C2)
// poly.rs       single-polynomial ops: CBD noise, compress, encode    (C3)
// polyvec.rs    K-dimensional lifts of poly.rs plus pointwise-accum   (C4)
// sampling.rs   SHAKE-128 rejection sampling, matrix generation       (C5)
// pke.rs        K-PKE KeyGen/Encrypt/Decrypt (IND-CPA)                (C6)
// kem.rs        Fujisaki-Okamoto transform (IND-CCA2)                 (C7)
// ct_utils.rs   branch-free cmov/select_bytes/ct_memcmp               (C8)
// hash.rs       SHA3-256/512, SHAKE-128/256 collaborators             (C9)
// error.rs      public error type                                    (C10)
//
// The three parameter sets are modules in this file with injected macro code
// that connects them into the functionality in kem.rs. Some of the 'obtuse'
// coding style is driven by clippy pedantic.

pub mod error;
mod ct_utils;
mod field;
mod hash;
mod kem;
mod ntt;
mod pke;
mod poly;
mod polyvec;
mod sampling;

/// All functionality is covered by traits, such that consumers can utilize trait objects as desired.
pub mod traits;

/// Shared Secret Key Length for all ML-KEM variants (in bytes)
pub const SSK_LEN: usize = 32;

/// The (opaque) shared secret that can be de/serialized by each party.
#[derive(Clone, Debug, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecretKey([u8; SSK_LEN]);

impl SerDes for SharedSecretKey {
    type ByteArray = [u8; SSK_LEN];

    fn into_bytes(self) -> Self::ByteArray { self.0 }

    fn try_from_bytes(ssk: Self::ByteArray) -> Result<Self, error::Error> {
        // No opportunity for validation, but kept as a Result for symmetry
        // with the other SerDes impls and for future-proofing.
        Ok(SharedSecretKey(ssk))
    }
}


// Conservative (constant-time) paranoia...
impl PartialEq for SharedSecretKey {
    fn eq(&self, other: &Self) -> bool {
        let mut result = true;
        for i in 0..self.0.len() {
            result &= self.0[i] == other.0[i];
        }
        result
    }
}


// This common functionality is injected into each parameter set module
macro_rules! functionality {
    () => {
        const ETA1_64: usize = ETA1 as usize * 64; // Currently, Rust does not allow expressions involving constants...
        const ETA2_64: usize = ETA2 as usize * 64; // ...in generics, so these are handled manually.

        use crate::error::Error;
        use crate::field::Q;
        use crate::hash::h;
        use crate::kem;
        use crate::poly;
        use crate::traits::{Decaps, Encaps, KeyGen, SerDes};
        use crate::SharedSecretKey;
        use rand_core::CryptoRngCore;
        use zeroize::{Zeroize, ZeroizeOnDrop};

        /// Correctly sized encapsulation key specific to the target security parameter set.
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct EncapsKey([u8; EK_LEN]);

        /// Correctly sized decapsulation key specific to the target security parameter set.
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct DecapsKey([u8; DK_LEN]);

        /// Correctly sized ciphertext specific to the target security parameter set.
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct CipherText([u8; CT_LEN]);

        /// `ML-KEM.KeyGen` accepts no input, draws its own randomness, and produces an
        /// encapsulation key and a decapsulation key. The encapsulation key can be made public;
        /// the decapsulation key must remain private. Both outputs are opaque structs specific to
        /// this parameter set.
        pub struct KG();

        impl KeyGen for KG {
            type DecapsByteArray = [u8; DK_LEN];
            type DecapsKey = DecapsKey;
            type EncapsByteArray = [u8; EK_LEN];
            type EncapsKey = EncapsKey;

            fn try_keygen_with_rng(
                rng: &mut impl CryptoRngCore,
            ) -> Result<(EncapsKey, DecapsKey), Error> {
                let (mut ek, mut dk) = ([0u8; EK_LEN], [0u8; DK_LEN]);
                kem::key_gen::<K, ETA1_64>(rng, ETA1, &mut ek, &mut dk)?;
                Ok((EncapsKey(ek), DecapsKey(dk)))
            }

            fn keygen_from_seed(d: [u8; 32], z: [u8; 32]) -> (EncapsKey, DecapsKey) {
                let (mut ek, mut dk) = ([0u8; EK_LEN], [0u8; DK_LEN]);
                kem::key_gen_from_seed::<K, ETA1_64>(&d, &z, ETA1, &mut ek, &mut dk);
                (EncapsKey(ek), DecapsKey(dk))
            }

            fn validate_keypair_with_rng_vartime(
                rng: &mut impl CryptoRngCore, ek: &Self::EncapsByteArray,
                dk: &Self::DecapsByteArray,
            ) -> bool {
                let len_dk_pke = 384 * K;
                let len_ek_pke = 384 * K + 32;
                let same_ek = *ek == dk[len_dk_pke..len_dk_pke + len_ek_pke];
                let same_h = h(ek) == dk[len_dk_pke + len_ek_pke..len_dk_pke + len_ek_pke + 32];
                if !(same_ek && same_h) {
                    return false;
                }
                // Pairwise consistency check: a shared secret encapsulated under `ek` must
                // decapsulate to the same value under `dk`.
                let mut ct = [0u8; CT_LEN];
                let Ok(ssk1) =
                    kem::encaps::<K, ETA1_64, ETA2_64>(rng, ETA1, ETA2, DU, DV, ek, &mut ct)
                else {
                    return false;
                };
                let ssk2 = kem::decaps::<K, ETA1_64, ETA2_64, CT_LEN>(ETA1, ETA2, DU, DV, dk, &ct);
                ssk1 == ssk2
            }
        }

        impl Encaps for EncapsKey {
            type CipherText = CipherText;
            type SharedSecretKey = SharedSecretKey;

            fn try_encaps_with_rng(
                &self, rng: &mut impl CryptoRngCore,
            ) -> Result<(Self::SharedSecretKey, Self::CipherText), Error> {
                let mut ct = [0u8; CT_LEN];
                let ssk = kem::encaps::<K, ETA1_64, ETA2_64>(
                    rng, ETA1, ETA2, DU, DV, &self.0, &mut ct,
                )?;
                Ok((SharedSecretKey(ssk), CipherText(ct)))
            }
        }

        impl Decaps for DecapsKey {
            type CipherText = CipherText;
            type SharedSecretKey = SharedSecretKey;

            fn try_decaps(&self, ct: &CipherText) -> SharedSecretKey {
                let ssk =
                    kem::decaps::<K, ETA1_64, ETA2_64, CT_LEN>(ETA1, ETA2, DU, DV, &self.0, &ct.0);
                SharedSecretKey(ssk)
            }
        }


        impl SerDes for EncapsKey {
            type ByteArray = [u8; EK_LEN];

            fn into_bytes(self) -> Self::ByteArray { self.0 }

            fn try_from_bytes(ek: Self::ByteArray) -> Result<Self, Error> {
                // The encapsulation key must decode to an array of integers modulo q without
                // any modular reduction; reject encodings that don't.
                for i in 0..K {
                    let chunk: [u8; 384] = ek[384 * i..384 * (i + 1)].try_into().unwrap();
                    let p = poly::frombytes(&chunk);
                    if p.iter().any(|&c| c >= Q) {
                        return Err(Error::InvalidInputLength);
                    }
                }
                Ok(EncapsKey(ek))
            }
        }


        impl SerDes for DecapsKey {
            type ByteArray = [u8; DK_LEN];

            fn into_bytes(self) -> Self::ByteArray { self.0 }

            fn try_from_bytes(dk: Self::ByteArray) -> Result<Self, Error> {
                // The two checks specify fixed sizes, and this function accepts only byte
                // arrays of the correct size already. Kept as a Result for symmetry and future
                // opportunities for validation.
                Ok(DecapsKey(dk))
            }
        }

        impl SerDes for CipherText {
            type ByteArray = [u8; CT_LEN];

            fn into_bytes(self) -> Self::ByteArray { self.0 }

            fn try_from_bytes(ct: Self::ByteArray) -> Result<Self, Error> {
                Ok(CipherText(ct))
            }
        }
    };
}


/// ML-KEM-512: security category 1, matching AES-128.
#[cfg(feature = "ml-kem-512")]
pub mod ml_kem_512 {
    //! Typical usage flow entails:
    //! 1. The originator runs `KG::try_keygen()` to get an encaps key `ek` and decaps key `dk`.
    //! 2. The originator serializes the encaps key via `ek.into_bytes()` and sends it to the remote party.
    //! 3. The remote party deserializes the bytes via `EncapsKey::try_from_bytes(<bytes>)` and runs
    //!    `try_encaps()` to get the shared secret `ssk` and ciphertext `ct`.
    //! 4. The remote party serializes the ciphertext via `ct.into_bytes()` and sends it to the originator.
    //! 5. The originator deserializes the ciphertext via `CipherText::try_from_bytes(<bytes>)` then runs
    //!    `dk.try_decaps(&ct)` to get the same shared secret `ssk`.
    //! 6. Both parties now hold the same shared secret `ssk`.

    const K: usize = 2;
    const ETA1: u32 = 3;
    const ETA2: u32 = 2;
    const DU: u32 = 10;
    const DV: u32 = 4;

    /// Serialized Encapsulation Key Length (in bytes)
    pub const EK_LEN: usize = 800;
    /// Serialized Decapsulation Key Length (in bytes)
    pub const DK_LEN: usize = 1632;
    /// Serialized Ciphertext Key Length (in bytes)
    pub const CT_LEN: usize = 768;

    functionality!();
}


/// ML-KEM-768: security category 3, matching AES-192.
#[cfg(feature = "ml-kem-768")]
pub mod ml_kem_768 {
    //! Typical usage flow entails:
    //! 1. The originator runs `KG::try_keygen()` to get an encaps key `ek` and decaps key `dk`.
    //! 2. The originator serializes the encaps key via `ek.into_bytes()` and sends it to the remote party.
    //! 3. The remote party deserializes the bytes via `EncapsKey::try_from_bytes(<bytes>)` and runs
    //!    `try_encaps()` to get the shared secret `ssk` and ciphertext `ct`.
    //! 4. The remote party serializes the ciphertext via `ct.into_bytes()` and sends it to the originator.
    //! 5. The originator deserializes the ciphertext via `CipherText::try_from_bytes(<bytes>)` then runs
    //!    `dk.try_decaps(&ct)` to get the same shared secret `ssk`.
    //! 6. Both parties now hold the same shared secret `ssk`.

    const K: usize = 3;
    const ETA1: u32 = 2;
    const ETA2: u32 = 2;
    const DU: u32 = 10;
    const DV: u32 = 4;

    /// Serialized Encapsulation Key Length (in bytes)
    pub const EK_LEN: usize = 1184;
    /// Serialized Decapsulation Key Length (in bytes)
    pub const DK_LEN: usize = 2400;
    /// Serialized Ciphertext Key Length (in bytes)
    pub const CT_LEN: usize = 1088;

    functionality!();
}


/// ML-KEM-1024: security category 5, matching AES-256.
#[cfg(feature = "ml-kem-1024")]
pub mod ml_kem_1024 {
    //! Typical usage flow entails:
    //! 1. The originator runs `KG::try_keygen()` to get an encaps key `ek` and decaps key `dk`.
    //! 2. The originator serializes the encaps key via `ek.into_bytes()` and sends it to the remote party.
    //! 3. The remote party deserializes the bytes via `EncapsKey::try_from_bytes(<bytes>)` and runs
    //!    `try_encaps()` to get the shared secret `ssk` and ciphertext `ct`.
    //! 4. The remote party serializes the ciphertext via `ct.into_bytes()` and sends it to the originator.
    //! 5. The originator deserializes the ciphertext via `CipherText::try_from_bytes(<bytes>)` then runs
    //!    `dk.try_decaps(&ct)` to get the same shared secret `ssk`.
    //! 6. Both parties now hold the same shared secret `ssk`.

    const K: usize = 4;
    const ETA1: u32 = 2;
    const ETA2: u32 = 2;
    const DU: u32 = 11;
    const DV: u32 = 5;

    /// Serialized Encapsulation Key Length (in bytes)
    pub const EK_LEN: usize = 1568;
    /// Serialized Decapsulation Key Length (in bytes)
    pub const DK_LEN: usize = 3168;
    /// Serialized Ciphertext Key Length (in bytes)
    pub const CT_LEN: usize = 1568;

    functionality!();
}
