// Licensed under the Apache-2.0 license

mod common;

use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::{AeadMutInPlace, KeyInit};
use aes_gcm::Aes256Gcm;
use bootcrypt_drivers::BootCryptError;
use bootcrypt_lib::{CryptoModule, DecAlgo, EncKeyFlags, FwEncStatus, ENCKEY_OTP};
use common::*;
use std::panic::{catch_unwind, AssertUnwindSafe};

const KEY: [u8; 32] = [
    0x60, 0x3d, 0xeb, 0x10, 0x15, 0xca, 0x71, 0xbe, 0x2b, 0x73, 0xae, 0xf0, 0x85, 0x7d, 0x77, 0x81,
    0x1f, 0x35, 0x2c, 0x07, 0x3b, 0x61, 0x08, 0xd7, 0x2d, 0x98, 0x10, 0xa3, 0x09, 0x14, 0xdf, 0xf4,
];

const IV: [u8; 12] = [
    0xca, 0xfe, 0xba, 0xbe, 0xfa, 0xce, 0xdb, 0xad, 0xde, 0xca, 0xf8, 0x88,
];

fn encrypt(key: &[u8; 32], plaintext: &[u8]) -> (Vec<u8>, [u8; 16]) {
    let mut cipher = Aes256Gcm::new(GenericArray::from_slice(key));
    let mut ciphertext = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(GenericArray::from_slice(&IV), &[], &mut ciphertext)
        .unwrap();
    (ciphertext, tag.into())
}

fn plaintext() -> Vec<u8> {
    (0..200u32).map(|i| (i * 7) as u8).collect()
}

#[test]
fn test_round_trip() {
    let plaintext = plaintext();
    let (mut data, tag) = encrypt(&KEY, &plaintext);
    let mut lib = pka_lib();

    assert!(lib.auth_decrypt_supported());
    assert_eq!(
        lib.auth_decrypt(DecAlgo::Gcm, &mut data, &KEY, EncKeyFlags::empty(), &IV, &tag),
        Ok(())
    );
    assert_eq!(data, plaintext);
    assert!(lib.env().saes.is_idle());
}

#[test]
fn test_truncated_tag() {
    let plaintext = plaintext();
    let (mut data, tag) = encrypt(&KEY, &plaintext);
    let mut lib = pka_lib();
    assert_eq!(
        lib.auth_decrypt(DecAlgo::Gcm, &mut data, &KEY, EncKeyFlags::empty(), &IV, &tag[..12]),
        Ok(())
    );
    assert_eq!(data, plaintext);
}

#[test]
fn test_tag_mismatch() {
    let (mut data, mut tag) = encrypt(&KEY, &plaintext());
    tag[15] ^= 0x01;
    let mut lib = pka_lib();
    assert_eq!(
        lib.auth_decrypt(DecAlgo::Gcm, &mut data, &KEY, EncKeyFlags::empty(), &IV, &tag),
        Err(BootCryptError::CRYPTO_ERR_DECRYPTION)
    );
    assert!(data.iter().all(|b| *b == 0));
    assert!(lib.env().saes.is_idle());
}

#[test]
fn test_ciphertext_bit_flip() {
    let (mut data, tag) = encrypt(&KEY, &plaintext());
    data[100] ^= 0x08;
    let mut lib = pka_lib();
    assert_eq!(
        lib.auth_decrypt(DecAlgo::Gcm, &mut data, &KEY, EncKeyFlags::empty(), &IV, &tag),
        Err(BootCryptError::CRYPTO_ERR_DECRYPTION)
    );
}

#[test]
fn test_bad_iv_and_tag_sizes() {
    let (mut data, tag) = encrypt(&KEY, &plaintext());
    let mut lib = pka_lib();
    assert_eq!(
        lib.auth_decrypt(DecAlgo::Gcm, &mut data, &KEY, EncKeyFlags::empty(), &IV[..8], &tag),
        Err(BootCryptError::CRYPTO_ERR_DECRYPTION)
    );
    assert_eq!(
        lib.auth_decrypt(DecAlgo::Gcm, &mut data, &KEY, EncKeyFlags::empty(), &IV, &[]),
        Err(BootCryptError::CRYPTO_ERR_DECRYPTION)
    );
}

#[test]
fn test_engine_init_failure() {
    let (mut data, tag) = encrypt(&KEY, &plaintext());
    let mut lib = pka_lib();
    assert_eq!(
        lib.auth_decrypt(DecAlgo::Gcm, &mut data, &KEY[..16], EncKeyFlags::empty(), &IV, &tag),
        Err(BootCryptError::CRYPTO_ERR_INIT)
    );
    assert!(lib.env().saes.is_idle());
}

#[test]
fn test_engine_failure_during_load() {
    let (mut data, tag) = encrypt(&KEY, &plaintext());
    let mut lib = pka_lib();
    lib.env_mut().saes.fail_load = true;
    assert_eq!(
        lib.auth_decrypt(DecAlgo::Gcm, &mut data, &KEY, EncKeyFlags::empty(), &IV, &tag),
        Err(BootCryptError::CRYPTO_ERR_DECRYPTION)
    );
    assert!(data.iter().all(|b| *b == 0));
    assert!(lib.env().saes.is_idle());
}

#[test]
fn test_engine_failure_at_tag_wipes_plaintext() {
    let (mut data, tag) = encrypt(&KEY, &plaintext());
    let mut lib = pka_lib();
    lib.env_mut().saes.fail_final = true;
    assert_eq!(
        lib.auth_decrypt(DecAlgo::Gcm, &mut data, &KEY, EncKeyFlags::empty(), &IV, &tag),
        Err(BootCryptError::CRYPTO_ERR_DECRYPTION)
    );
    assert!(data.iter().all(|b| *b == 0));
    assert!(lib.env().saes.is_idle());
    assert_eq!(lib.env().saes.zeroize_count, 1);
}

#[test]
fn test_key_identifier_fatal_zeroizes_engine() {
    let (mut data, tag) = encrypt(&KEY, &plaintext());
    let mut lib = pka_lib();
    let result = catch_unwind(AssertUnwindSafe(|| {
        lib.auth_decrypt(
            DecAlgo::Gcm,
            &mut data,
            &[0u8; 4],
            EncKeyFlags::IS_IDENTIFIER,
            &IV,
            &tag,
        )
    }));
    assert!(result.is_err());
    assert_eq!(lib.env().saes.zeroize_count, 1);
}

#[test]
#[should_panic]
fn test_key_identifier_without_key_handles() {
    let (mut data, tag) = encrypt(&KEY, &plaintext());
    let mut lib = pka_lib();
    let _ = lib.auth_decrypt(
        DecAlgo::Gcm,
        &mut data,
        &[0u8; 4],
        EncKeyFlags::IS_IDENTIFIER,
        &IV,
        &tag,
    );
}

#[test]
fn test_key_identifier_with_key_handles() {
    let plaintext = plaintext();
    let (mut data, tag) = encrypt(&KEY, &plaintext);
    let mut lib = pka_lib();
    lib.env_mut().saes.key_handles = true;
    lib.env_mut().saes.hw_key = KEY;
    assert_eq!(
        lib.auth_decrypt(
            DecAlgo::Gcm,
            &mut data,
            &[0u8; 4],
            EncKeyFlags::IS_IDENTIFIER,
            &IV,
            &tag
        ),
        Ok(())
    );
    assert_eq!(data, plaintext);
}

#[test]
fn test_otp_key_round_trip() {
    let words = [0x0011_2233u32, 0x4455_6677, 0x8899_aabb, 0xccdd_eeff];
    let mut expected_key = [0u8; 32];
    for (chunk, word) in expected_key.chunks_exact_mut(4).zip(words.iter().cycle()) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }

    let plaintext = plaintext();
    let (mut data, tag) = encrypt(&expected_key, &plaintext);

    let mut lib = pka_lib();
    lib.env_mut().otp.add_field(ENCKEY_OTP, 128, &words);

    let key = lib.get_enc_key_info(FwEncStatus::Ssk, b"image").unwrap();
    assert_eq!(key.as_bytes(), &expected_key);
    assert!(key.flags().is_empty());

    let again = lib.get_enc_key_info(FwEncStatus::Ssk, b"image").unwrap();
    assert_eq!(key.as_bytes(), again.as_bytes());

    assert_eq!(
        lib.auth_decrypt(DecAlgo::Gcm, &mut data, key.as_bytes(), key.flags(), &IV, &tag),
        Ok(())
    );
    assert_eq!(data, plaintext);
}

#[test]
fn test_enc_key_info_errors() {
    let mut lib = pka_lib();
    assert_eq!(
        lib.get_enc_key_info(FwEncStatus::Bssk, &[]).err(),
        Some(BootCryptError::KEY_INFO_BSSK_UNSUPPORTED)
    );
    assert_eq!(
        lib.get_enc_key_info(FwEncStatus::Ssk, &[]).err(),
        Some(BootCryptError::KEY_INFO_OTP_LOOKUP)
    );

    lib.env_mut().otp.add_field(ENCKEY_OTP, 512, &[0u32; 16]);
    assert_eq!(
        lib.get_enc_key_info(FwEncStatus::Ssk, &[]).err(),
        Some(BootCryptError::KEY_INFO_OTP_LENGTH)
    );
}

#[test]
fn test_enc_key_info_read_error() {
    let mut lib = pka_lib();
    lib.env_mut().otp.add_field(ENCKEY_OTP, 128, &[1, 2, 3, 4]);
    lib.env_mut().otp.fail_read = true;
    assert_eq!(
        lib.get_enc_key_info(FwEncStatus::Ssk, &[]).err(),
        Some(BootCryptError::KEY_INFO_OTP_READ)
    );
}
