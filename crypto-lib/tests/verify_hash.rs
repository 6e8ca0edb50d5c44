// Licensed under the Apache-2.0 license

mod common;

use bootcrypt_drivers::{BootCryptError, ErrorClass};
use bootcrypt_lib::{get_plain_digest_from_asn1, CryptoModule};
use common::*;
use sha2::{Digest, Sha256};

const IMAGE: &[u8] = b"hash pinned firmware image";

#[test]
fn test_matching_digest() {
    let digest = Sha256::digest(IMAGE);
    let mut lib = pka_lib();
    assert_eq!(lib.verify_hash(IMAGE, &sha256_digest_info(&digest)), Ok(()));
    assert!(lib.env().hash.is_idle());
}

#[test]
fn test_mismatching_digest() {
    let mut digest = Sha256::digest(IMAGE);
    digest[31] ^= 0x01;
    let mut lib = pka_lib();
    assert_eq!(
        lib.verify_hash(IMAGE, &sha256_digest_info(&digest)),
        Err(BootCryptError::CRYPTO_ERR_HASH)
    );
}

#[test]
fn test_hash_failure_returns_engine_to_idle() {
    let digest = Sha256::digest(IMAGE);
    let mut lib = rom_lib();
    let zeroized = lib.env().hash.zeroize_count;
    lib.env_mut().hash.fail_final = true;
    assert_eq!(
        lib.verify_hash(IMAGE, &sha256_digest_info(&digest)),
        Err(BootCryptError::CRYPTO_ERR_HASH)
    );
    assert!(lib.env().hash.is_idle());
    assert_eq!(lib.env().hash.zeroize_count, zeroized + 1);

    assert_eq!(lib.verify_hash(IMAGE, &sha256_digest_info(&digest)), Ok(()));
    assert_eq!(lib.env().hash.zeroize_count, zeroized + 2);
}

#[test]
fn test_short_digest_is_extraction_error() {
    let digest = Sha256::digest(IMAGE);
    let blob = sha256_digest_info(&digest[..31]);

    let err = get_plain_digest_from_asn1(&blob).unwrap_err();
    assert_eq!(err, BootCryptError::ASN1_DIGEST_LENGTH_MISMATCH);
    assert_eq!(err.class(), ErrorClass::Extraction);

    let mut lib = pka_lib();
    assert_eq!(
        lib.verify_hash(IMAGE, &blob),
        Err(BootCryptError::CRYPTO_ERR_HASH)
    );
}
