/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains API and macros used by the boot crypto library for error handling

--*/
#![cfg_attr(not(feature = "std"), no_std)]
use core::convert::From;
use core::num::{NonZeroU32, TryFromIntError};

/// Boot Crypto Error Type
/// Derives debug, copy, clone, eq, and partial eq
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BootCryptError(pub NonZeroU32);

/// Error class, taken from the upper 16 bits of the code
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ErrorClass {
    /// Malformed encoded structure
    Extraction,

    /// Unexpected hash/signature/curve combination
    UnsupportedAlgorithm,

    /// Cryptographic signature verification failed
    Signature,

    /// Digest comparison failed
    Hash,

    /// Tag mismatch or engine failure while decrypting
    Decryption,

    /// Encryption key retrieval or derivation failed
    KeyDerivation,

    /// Unrecoverable configuration error, halts the boot stage
    ConfigurationFatal,

    /// Hardware collaborator failure
    Driver,
}

/// Macro to define error constants ensuring uniqueness
///
/// This macro takes a list of (name, value, doc) tuples and generates
/// constant definitions for each error code.
#[macro_export]
macro_rules! define_error_constants {
    ($(($name:ident, $value:expr, $doc:expr)),* $(,)?) => {
        $(
            #[doc = $doc]
            pub const $name: BootCryptError = BootCryptError::new_const($value);
        )*

        #[cfg(test)]
        /// Returns a vector of all defined error constants for testing uniqueness
        pub fn all_constants() -> Vec<(&'static str, u32)> {
            vec![
                $(
                    (stringify!($name), $value),
                )*
            ]
        }
    };
}

impl BootCryptError {
    /// Create an error; intended to only be used from const contexts, as we don't want
    /// runtime panics if val is zero. The preferred way to get a BootCryptError from a u32
    /// is to use `BootCryptError::try_from()` from the `TryFrom` trait impl.
    const fn new_const(val: u32) -> Self {
        match NonZeroU32::new(val) {
            Some(val) => Self(val),
            None => panic!("BootCryptError cannot be 0"),
        }
    }

    /// Classify the error code
    pub fn class(&self) -> ErrorClass {
        match self.0.get() >> 16 {
            0x0001 => ErrorClass::Extraction,
            0x0002 => ErrorClass::UnsupportedAlgorithm,
            0x0003 => ErrorClass::Signature,
            0x0004 => ErrorClass::Hash,
            0x0005 => ErrorClass::Decryption,
            0x0006 => ErrorClass::KeyDerivation,
            0x000F => ErrorClass::ConfigurationFatal,
            _ => ErrorClass::Driver,
        }
    }

    /// Returns true if the error must halt the boot stage
    pub fn is_fatal(&self) -> bool {
        self.class() == ErrorClass::ConfigurationFatal
    }

    define_error_constants![
        (
            ASN1_PK_SEQUENCE_TAG,
            0x0001_0001,
            "Extraction Error: public key is not an ASN.1 SEQUENCE"
        ),
        (
            ASN1_PK_ALGORITHM_ID,
            0x0001_0002,
            "Extraction Error: public key algorithm identifier is malformed"
        ),
        (
            ASN1_PK_BIT_STRING,
            0x0001_0003,
            "Extraction Error: public key bit string is malformed"
        ),
        (
            ASN1_PK_POINT_MARKER,
            0x0001_0004,
            "Extraction Error: public key is not an uncompressed point"
        ),
        (
            ASN1_PK_TOO_LARGE,
            0x0001_0005,
            "Extraction Error: public key exceeds the maximum size"
        ),
        (
            ASN1_PK_TRAILING_DATA,
            0x0001_0006,
            "Extraction Error: public key sequence has trailing data"
        ),
        (
            ASN1_DIGEST_SEQUENCE_TAG,
            0x0001_0010,
            "Extraction Error: digest info is not an ASN.1 SEQUENCE"
        ),
        (
            ASN1_DIGEST_ALGORITHM_ID,
            0x0001_0011,
            "Extraction Error: digest info algorithm identifier is malformed"
        ),
        (
            ASN1_DIGEST_OCTET_STRING,
            0x0001_0012,
            "Extraction Error: digest info octet string is malformed"
        ),
        (
            ASN1_DIGEST_LENGTH_MISMATCH,
            0x0001_0013,
            "Extraction Error: digest length does not match the algorithm"
        ),
        (
            ASN1_DIGEST_TRAILING_DATA,
            0x0001_0014,
            "Extraction Error: digest info sequence has trailing data"
        ),
        (
            ASN1_SIG_ALGORITHM_ID,
            0x0001_0020,
            "Extraction Error: signature algorithm identifier is malformed"
        ),
        (
            ASN1_SIG_BIT_STRING,
            0x0001_0021,
            "Extraction Error: signature bit string is malformed"
        ),
        (
            ASN1_SIG_SEQUENCE,
            0x0001_0022,
            "Extraction Error: signature is not a sequence of integers"
        ),
        (
            ASN1_SIG_INTEGER_COUNT,
            0x0001_0023,
            "Extraction Error: signature sequence does not hold exactly two integers"
        ),
        (
            ASN1_SIG_INTEGER_TOO_LARGE,
            0x0001_0024,
            "Extraction Error: signature integer exceeds the component width"
        ),
        (
            UNSUPPORTED_SIG_ALGORITHM_OID,
            0x0002_0001,
            "Unsupported Algorithm: unknown signature algorithm OID"
        ),
        (
            UNSUPPORTED_MD_ALGORITHM_OID,
            0x0002_0002,
            "Unsupported Algorithm: unknown digest algorithm OID"
        ),
        (
            UNSUPPORTED_SIG_ALGORITHM_PAIR,
            0x0002_0003,
            "Unsupported Algorithm: hash and signature scheme are not SHA-256 with ECDSA"
        ),
        (
            UNSUPPORTED_MD_ALGORITHM,
            0x0002_0004,
            "Unsupported Algorithm: digest algorithm is not SHA-256"
        ),
        (
            UNSUPPORTED_CURVE,
            0x0002_0005,
            "Unsupported Algorithm: curve not compiled into the verifier"
        ),
        (
            UNSUPPORTED_PUB_KEY_SIZE,
            0x0002_0006,
            "Unsupported Algorithm: public key size does not match the curve"
        ),
        (
            UNSUPPORTED_DEC_ALGORITHM,
            0x0002_0007,
            "Unsupported Algorithm: unknown decryption algorithm"
        ),
        (
            CRYPTO_ERR_SIGNATURE,
            0x0003_0001,
            "Signature Error: image signature verification failed"
        ),
        (
            CRYPTO_ERR_HASH,
            0x0004_0001,
            "Hash Error: image digest does not match"
        ),
        (
            CRYPTO_ERR_DECRYPTION,
            0x0005_0001,
            "Decryption Error: authenticated decryption failed"
        ),
        (
            CRYPTO_ERR_INIT,
            0x0005_0002,
            "Decryption Error: decryption engine initialization failed"
        ),
        (
            AEAD_INVALID_IV_SIZE,
            0x0005_0003,
            "Decryption Error: IV is not a 96-bit nonce"
        ),
        (
            AEAD_INVALID_TAG_SIZE,
            0x0005_0004,
            "Decryption Error: tag size is not supported"
        ),
        (
            AEAD_TAG_MISMATCH,
            0x0005_0005,
            "Decryption Error: authentication tag mismatch"
        ),
        (
            KEY_INFO_BSSK_UNSUPPORTED,
            0x0006_0001,
            "Key Derivation Error: BSSK encryption is not supported"
        ),
        (
            KEY_INFO_OTP_LOOKUP,
            0x0006_0002,
            "Key Derivation Error: encryption key OTP not found"
        ),
        (
            KEY_INFO_OTP_LENGTH,
            0x0006_0003,
            "Key Derivation Error: encryption key OTP larger than the key buffer"
        ),
        (
            KEY_INFO_OTP_READ,
            0x0006_0004,
            "Key Derivation Error: unable to read encryption key OTP"
        ),
        (
            KDF_KEY_BUFFER_TOO_SMALL,
            0x0006_0005,
            "Key Derivation Error: key buffer smaller than 32 bytes"
        ),
        (
            KDF_INVALID_RAW_LENGTH,
            0x0006_0006,
            "Key Derivation Error: raw key length is empty or not word aligned"
        ),
        (
            FATAL_RNG_INIT,
            0x000F_0001,
            "Fatal Error: RNG initialization failed"
        ),
        (
            FATAL_PKA_INIT,
            0x000F_0002,
            "Fatal Error: PKA initialization failed"
        ),
        (
            FATAL_SAES_INIT,
            0x000F_0003,
            "Fatal Error: SAES initialization failed"
        ),
        (
            FATAL_HASH_REGISTER,
            0x000F_0004,
            "Fatal Error: hash engine registration failed"
        ),
        (
            FATAL_KEY_IS_IDENTIFIER,
            0x000F_0005,
            "Fatal Error: key handle requested but not supported by the engine"
        ),
        (
            DRIVER_HASH_INVALID_STATE,
            0x0010_0001,
            "Driver Error: hash engine invalid state"
        ),
        (
            DRIVER_HASH_MAX_DATA,
            0x0010_0002,
            "Driver Error: hash engine max data exceeded"
        ),
        (
            DRIVER_HASH_UNSUPPORTED_ALGO,
            0x0010_0003,
            "Driver Error: hash engine algorithm not supported"
        ),
        (
            DRIVER_PKA_INVALID_PARAM,
            0x0011_0001,
            "Driver Error: PKA invalid parameter"
        ),
        (
            DRIVER_PKA_CURVE_NOT_SUPPORTED,
            0x0011_0002,
            "Driver Error: PKA curve not supported"
        ),
        (
            DRIVER_PKA_SIGNATURE_INVALID,
            0x0011_0003,
            "Driver Error: PKA signature verification failed"
        ),
        (
            DRIVER_SAES_INVALID_STATE,
            0x0012_0001,
            "Driver Error: SAES invalid state"
        ),
        (
            DRIVER_SAES_INVALID_KEY_SIZE,
            0x0012_0002,
            "Driver Error: SAES invalid key size"
        ),
        (
            DRIVER_SAES_KEY_SELECTION,
            0x0012_0003,
            "Driver Error: SAES key selection not supported"
        ),
        (
            DRIVER_SAES_UNALIGNED_DATA,
            0x0012_0004,
            "Driver Error: SAES non-final chunk not block aligned"
        ),
        (
            DRIVER_SAES_INVALID_TAG_SIZE,
            0x0012_0005,
            "Driver Error: SAES tag buffer too large"
        ),
        (
            DRIVER_OTP_NOT_FOUND,
            0x0013_0001,
            "Driver Error: OTP name not found"
        ),
        (
            DRIVER_OTP_INDEX_OUT_OF_BOUNDS,
            0x0013_0002,
            "Driver Error: OTP index out of bounds"
        ),
        (
            DRIVER_MMAP_ADD_REGION,
            0x0014_0001,
            "Driver Error: unable to add dynamic memory region"
        ),
        (
            DRIVER_MMAP_REMOVE_REGION,
            0x0014_0002,
            "Driver Error: unable to remove dynamic memory region"
        ),
        (
            DRIVER_RNG_HW_ERROR,
            0x0015_0001,
            "Driver Error: RNG hardware error"
        ),
    ];
}

impl From<core::num::NonZeroU32> for crate::BootCryptError {
    fn from(val: core::num::NonZeroU32) -> Self {
        crate::BootCryptError(val)
    }
}

impl From<BootCryptError> for core::num::NonZeroU32 {
    fn from(val: BootCryptError) -> Self {
        val.0
    }
}

impl From<BootCryptError> for u32 {
    fn from(val: BootCryptError) -> Self {
        core::num::NonZeroU32::from(val).get()
    }
}

impl TryFrom<u32> for BootCryptError {
    type Error = TryFromIntError;
    fn try_from(val: u32) -> Result<Self, TryFromIntError> {
        match NonZeroU32::try_from(val) {
            Ok(val) => Ok(BootCryptError(val)),
            Err(err) => Err(err),
        }
    }
}

pub type BootCryptResult<T> = Result<T, BootCryptError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_try_from() {
        assert!(BootCryptError::try_from(0).is_err());
        assert_eq!(
            Ok(BootCryptError::CRYPTO_ERR_SIGNATURE),
            BootCryptError::try_from(0x0003_0001)
        );
    }

    #[test]
    fn test_error_constants_uniqueness() {
        let constants = BootCryptError::all_constants();
        let mut error_values = HashSet::new();
        let mut duplicates = Vec::new();

        for (name, value) in constants {
            if !error_values.insert(value) {
                duplicates.push((name, value));
            }
        }

        assert!(
            duplicates.is_empty(),
            "Found duplicate error codes: {:?}",
            duplicates
        );
    }

    #[test]
    fn test_error_class() {
        assert_eq!(
            BootCryptError::ASN1_DIGEST_LENGTH_MISMATCH.class(),
            ErrorClass::Extraction
        );
        assert_eq!(
            BootCryptError::UNSUPPORTED_CURVE.class(),
            ErrorClass::UnsupportedAlgorithm
        );
        assert_eq!(
            BootCryptError::CRYPTO_ERR_SIGNATURE.class(),
            ErrorClass::Signature
        );
        assert_eq!(BootCryptError::CRYPTO_ERR_HASH.class(), ErrorClass::Hash);
        assert_eq!(
            BootCryptError::AEAD_TAG_MISMATCH.class(),
            ErrorClass::Decryption
        );
        assert_eq!(
            BootCryptError::KDF_KEY_BUFFER_TOO_SMALL.class(),
            ErrorClass::KeyDerivation
        );
        assert_eq!(
            BootCryptError::DRIVER_PKA_SIGNATURE_INVALID.class(),
            ErrorClass::Driver
        );
    }

    #[test]
    fn test_only_configuration_errors_are_fatal() {
        for (name, value) in BootCryptError::all_constants() {
            let err = BootCryptError::try_from(value).unwrap();
            assert_eq!(
                err.is_fatal(),
                name.starts_with("FATAL_"),
                "unexpected fatality for {name}"
            );
        }
    }
}
