//! Self-contained integration tests exercising the public API across all
//! three parameter sets. No external test-vector files are required; every
//! input is either generated by the crate's own RNG path or fixed inline.

use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

macro_rules! parameter_set_tests {
    ($mod_name:ident, $pkg:path) => {
        mod $mod_name {
            use super::*;
            use $pkg::{CipherText, DecapsKey, EncapsKey, KG};
            use kyber_r3::traits::{Decaps, Encaps, KeyGen, SerDes};

            #[test]
            fn round_trip_shared_secret_matches() {
                let (ek, dk) = KG::try_keygen().expect("keygen");
                let (ssk_a, ct) = ek.try_encaps().expect("encaps");
                let ssk_b = dk.try_decaps(&ct);
                assert_eq!(ssk_a, ssk_b);
            }

            #[test]
            fn serialize_roundtrip_preserves_shared_secret() {
                let (ek, dk) = KG::try_keygen().expect("keygen");
                let ek_bytes = ek.into_bytes();
                let dk_bytes = dk.into_bytes();

                let ek2 = EncapsKey::try_from_bytes(ek_bytes).expect("ek decode");
                let dk2 = DecapsKey::try_from_bytes(dk_bytes).expect("dk decode");

                let (ssk_a, ct) = ek2.try_encaps().expect("encaps");
                let ct_bytes = ct.into_bytes();
                let ct2 = CipherText::try_from_bytes(ct_bytes).expect("ct decode");

                let ssk_b = dk2.try_decaps(&ct2);
                assert_eq!(ssk_a, ssk_b);
            }

            #[test]
            fn keygen_from_seed_is_deterministic() {
                let d = [0x11u8; 32];
                let z = [0x22u8; 32];
                let (ek1, dk1) = KG::keygen_from_seed(d, z);
                let (ek2, dk2) = KG::keygen_from_seed(d, z);
                assert_eq!(ek1.into_bytes(), ek2.into_bytes());
                assert_eq!(dk1.into_bytes(), dk2.into_bytes());
            }

            #[test]
            fn keygen_from_seed_differs_across_seeds() {
                let (ek_a, _) = KG::keygen_from_seed([0x01u8; 32], [0x02u8; 32]);
                let (ek_b, _) = KG::keygen_from_seed([0x03u8; 32], [0x04u8; 32]);
                assert_ne!(ek_a.into_bytes(), ek_b.into_bytes());
            }

            #[test]
            fn bit_flipped_ciphertext_rejects_to_a_stable_unrelated_secret() {
                let (ek, dk) = KG::try_keygen().expect("keygen");
                let (ssk, ct) = ek.try_encaps().expect("encaps");

                let mut bad_bytes = ct.into_bytes();
                bad_bytes[0] ^= 0x01;
                let bad_ct = CipherText::try_from_bytes(bad_bytes).expect("ct decode");

                let rejected_1 = dk.try_decaps(&bad_ct);
                let rejected_2 = dk.try_decaps(&bad_ct);
                assert_ne!(ssk, rejected_1, "corrupted ciphertext must not decapsulate to the original secret");
                assert_eq!(rejected_1, rejected_2, "implicit rejection must be deterministic");
            }

            #[test]
            fn two_distinct_bad_ciphertexts_reject_to_distinct_secrets() {
                let (_ek, dk) = KG::try_keygen().expect("keygen");

                let mut bytes_a = [0xAAu8; $pkg::CT_LEN];
                let mut bytes_b = [0x55u8; $pkg::CT_LEN];
                bytes_a[0] = 1;
                bytes_b[0] = 2;
                let ct_a = CipherText::try_from_bytes(bytes_a).expect("ct decode");
                let ct_b = CipherText::try_from_bytes(bytes_b).expect("ct decode");

                let ssk_a = dk.try_decaps(&ct_a);
                let ssk_b = dk.try_decaps(&ct_b);
                assert_ne!(ssk_a, ssk_b);
            }

            #[test]
            fn validate_keypair_accepts_genuine_pair_and_rejects_tampered_one() {
                let mut rng = ChaCha8Rng::seed_from_u64(7);
                let (ek, dk) = KG::try_keygen().expect("keygen");
                let ek_bytes = ek.into_bytes();
                let dk_bytes = dk.into_bytes();
                assert!(KG::validate_keypair_with_rng_vartime(&mut rng, &ek_bytes, &dk_bytes));

                let mut bad_dk_bytes = dk_bytes;
                bad_dk_bytes[0] ^= 0x01;
                assert!(!KG::validate_keypair_with_rng_vartime(&mut rng, &ek_bytes, &bad_dk_bytes));
            }

            #[test]
            fn encaps_key_rejects_out_of_range_coefficients() {
                let mut bad_bytes = [0u8; $pkg::EK_LEN];
                bad_bytes.iter_mut().for_each(|b| *b = 0xff);
                assert!(EncapsKey::try_from_bytes(bad_bytes).is_err());
            }
        }
    };
}

#[cfg(feature = "ml-kem-512")]
parameter_set_tests!(ml_kem_512, kyber_r3::ml_kem_512);

#[cfg(feature = "ml-kem-768")]
parameter_set_tests!(ml_kem_768, kyber_r3::ml_kem_768);

#[cfg(feature = "ml-kem-1024")]
parameter_set_tests!(ml_kem_1024, kyber_r3::ml_kem_1024);
