/*++

Licensed under the Apache-2.0 license.

File Name:

    oid.rs

Abstract:

    File contains the object identifiers recognized in keys, signatures and
    digest information, and their mapping to algorithms.

--*/

use bootcrypt_error::{BootCryptError, BootCryptResult};
use der::asn1::ObjectIdentifier;

/// Message digest algorithm
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MdAlg {
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

impl MdAlg {
    /// Digest size in bytes
    pub fn digest_size(&self) -> usize {
        match self {
            MdAlg::Sha1 => 20,
            MdAlg::Sha224 => 28,
            MdAlg::Sha256 => 32,
            MdAlg::Sha384 => 48,
            MdAlg::Sha512 => 64,
        }
    }
}

/// Public key algorithm
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PkAlg {
    Ecdsa,
    Rsa,
}

pub const ID_EC_PUBLIC_KEY: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");

pub const SECP256R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");
pub const BRAINPOOL_P256T1: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.3.36.3.3.2.8.1.1.8");

pub const ECDSA_WITH_SHA1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.4.1");
pub const ECDSA_WITH_SHA224: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.1");
pub const ECDSA_WITH_SHA256: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.2");
pub const ECDSA_WITH_SHA384: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.3");
pub const ECDSA_WITH_SHA512: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.4");

pub const SHA1_WITH_RSA: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.5");
pub const SHA224_WITH_RSA: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.14");
pub const SHA256_WITH_RSA: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.11");
pub const SHA384_WITH_RSA: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.12");
pub const SHA512_WITH_RSA: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.13");

pub const ID_SHA1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.14.3.2.26");
pub const ID_SHA224: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.4");
pub const ID_SHA256: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.1");
pub const ID_SHA384: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.2");
pub const ID_SHA512: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.3");

const SIG_ALGS: [(ObjectIdentifier, MdAlg, PkAlg); 10] = [
    (ECDSA_WITH_SHA1, MdAlg::Sha1, PkAlg::Ecdsa),
    (ECDSA_WITH_SHA224, MdAlg::Sha224, PkAlg::Ecdsa),
    (ECDSA_WITH_SHA256, MdAlg::Sha256, PkAlg::Ecdsa),
    (ECDSA_WITH_SHA384, MdAlg::Sha384, PkAlg::Ecdsa),
    (ECDSA_WITH_SHA512, MdAlg::Sha512, PkAlg::Ecdsa),
    (SHA1_WITH_RSA, MdAlg::Sha1, PkAlg::Rsa),
    (SHA224_WITH_RSA, MdAlg::Sha224, PkAlg::Rsa),
    (SHA256_WITH_RSA, MdAlg::Sha256, PkAlg::Rsa),
    (SHA384_WITH_RSA, MdAlg::Sha384, PkAlg::Rsa),
    (SHA512_WITH_RSA, MdAlg::Sha512, PkAlg::Rsa),
];

const MD_ALGS: [(ObjectIdentifier, MdAlg); 5] = [
    (ID_SHA1, MdAlg::Sha1),
    (ID_SHA224, MdAlg::Sha224),
    (ID_SHA256, MdAlg::Sha256),
    (ID_SHA384, MdAlg::Sha384),
    (ID_SHA512, MdAlg::Sha512),
];

/// Resolve a signature algorithm OID into its digest and public key algorithms
pub fn sig_alg_from_oid(oid: &ObjectIdentifier) -> BootCryptResult<(MdAlg, PkAlg)> {
    SIG_ALGS
        .iter()
        .find(|(known, _, _)| known == oid)
        .map(|(_, md_alg, pk_alg)| (*md_alg, *pk_alg))
        .ok_or(BootCryptError::UNSUPPORTED_SIG_ALGORITHM_OID)
}

/// Resolve a digest algorithm OID
pub fn md_alg_from_oid(oid: &ObjectIdentifier) -> BootCryptResult<MdAlg> {
    MD_ALGS
        .iter()
        .find(|(known, _)| known == oid)
        .map(|(_, md_alg)| *md_alg)
        .ok_or(BootCryptError::UNSUPPORTED_MD_ALGORITHM_OID)
}
