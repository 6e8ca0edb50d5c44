/*++

Licensed under the Apache-2.0 license.

File Name:

    asn1.rs

Abstract:

    File contains the extraction of raw public keys, digests and ECDSA
    signature components from their DER encoding.

    Nothing is returned unless the whole walk succeeds. All slices returned
    borrow from the caller's buffer and are bounded by the lengths declared
    in the encoding, which are themselves checked against the buffer.

--*/

use crate::oid::{self, MdAlg, PkAlg};
use bootcrypt_drivers::{
    BOOT_API_ECDSA_ALGO_TYPE_BRAINPOOL256, BOOT_API_ECDSA_ALGO_TYPE_P256NIST,
};
use bootcrypt_error::{BootCryptError, BootCryptResult};
use der::asn1::{BitStringRef, ObjectIdentifier, OctetStringRef, UintRef};
use der::{Decode, Header, Reader, SliceReader, Tag};
use spki::AlgorithmIdentifierRef;

/// Maximum size of a raw public key (X then Y)
pub const CRYPTO_PUBKEY_MAX_SIZE: usize = 64;

/// Size of a raw ECDSA signature (r then s)
pub const CRYPTO_SIGN_MAX_SIZE: usize = 64;

/// Size of one signature component
pub const ECDSA_COMPONENT_SIZE: usize = CRYPTO_SIGN_MAX_SIZE / 2;

/// Leading byte of an uncompressed curve point
const UNCOMPRESSED_POINT_MARKER: u8 = 0x04;

/// Curve of an extracted public key
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum NamedCurve {
    NistP256,

    /// brainpoolP256t1, the only Brainpool curve the accelerator and the
    /// boot ROM are programmed for
    Brainpool256,
}

impl NamedCurve {
    /// Classify the named-curve parameter of a public key
    pub fn from_oid(curve_oid: &ObjectIdentifier) -> BootCryptResult<Self> {
        if *curve_oid == oid::SECP256R1 {
            Ok(NamedCurve::NistP256)
        } else if *curve_oid == oid::BRAINPOOL_P256T1 {
            Ok(NamedCurve::Brainpool256)
        } else {
            Err(BootCryptError::UNSUPPORTED_CURVE)
        }
    }

    /// Curve selector understood by the boot ROM, also used as the curve
    /// identifier prefixed to hashed public keys
    pub fn id(&self) -> u32 {
        match self {
            NamedCurve::NistP256 => BOOT_API_ECDSA_ALGO_TYPE_P256NIST,
            NamedCurve::Brainpool256 => BOOT_API_ECDSA_ALGO_TYPE_BRAINPOOL256,
        }
    }
}

/// Public key stripped of its encoding
#[derive(Debug, Eq, PartialEq)]
pub struct PlainPubKey<'a> {
    /// Raw key bytes, X then Y, without the point marker
    pub key: &'a [u8],

    /// Curve the key belongs to
    pub curve: NamedCurve,
}

/// Digest stripped of its encoding
#[derive(Debug, Eq, PartialEq)]
pub struct PlainDigest<'a> {
    /// Declared digest algorithm
    pub md_alg: MdAlg,

    /// Raw digest bytes, exactly the size of `md_alg`
    pub digest: &'a [u8],
}

/// ECDSA signature components, each left-padded to the component size
#[derive(Debug, Default, Eq, PartialEq)]
pub struct EcdsaSignature {
    pub r: [u8; ECDSA_COMPONENT_SIZE],
    pub s: [u8; ECDSA_COMPONENT_SIZE],
}

impl EcdsaSignature {
    /// Signature as r then s
    pub fn to_bytes(&self) -> [u8; CRYPTO_SIGN_MAX_SIZE] {
        let mut bytes = [0u8; CRYPTO_SIGN_MAX_SIZE];
        bytes[..ECDSA_COMPONENT_SIZE].copy_from_slice(&self.r);
        bytes[ECDSA_COMPONENT_SIZE..].copy_from_slice(&self.s);
        bytes
    }
}

/// Returns the contents of the SEQUENCE at the start of `blob`.
///
/// Bytes following the sequence are ignored.
fn sequence_contents(blob: &[u8], err: BootCryptError) -> BootCryptResult<&[u8]> {
    let mut reader = SliceReader::new(blob).map_err(|_| err)?;
    let header = Header::decode(&mut reader).map_err(|_| err)?;
    if header.tag != Tag::Sequence {
        return Err(err);
    }
    reader.read_slice(header.length).map_err(|_| err)
}

/// Extract the raw public key and its curve from a SubjectPublicKeyInfo
///
/// # Arguments
///
/// * `blob` - DER encoded SubjectPublicKeyInfo
///
/// # Returns
///
/// * `PlainPubKey` - Key bytes without the uncompressed point marker
pub fn get_plain_pk_from_asn1(blob: &[u8]) -> BootCryptResult<PlainPubKey<'_>> {
    let body = sequence_contents(blob, BootCryptError::ASN1_PK_SEQUENCE_TAG)?;
    let mut reader =
        SliceReader::new(body).map_err(|_| BootCryptError::ASN1_PK_SEQUENCE_TAG)?;

    let alg = AlgorithmIdentifierRef::decode(&mut reader)
        .map_err(|_| BootCryptError::ASN1_PK_ALGORITHM_ID)?;
    if alg.oid != oid::ID_EC_PUBLIC_KEY {
        return Err(BootCryptError::ASN1_PK_ALGORITHM_ID);
    }
    let params = alg
        .parameters
        .ok_or(BootCryptError::UNSUPPORTED_CURVE)?;
    let curve_oid =
        ObjectIdentifier::try_from(params).map_err(|_| BootCryptError::UNSUPPORTED_CURVE)?;
    let curve = NamedCurve::from_oid(&curve_oid)?;

    let bits = BitStringRef::decode(&mut reader).map_err(|_| BootCryptError::ASN1_PK_BIT_STRING)?;
    if !reader.is_finished() {
        return Err(BootCryptError::ASN1_PK_TRAILING_DATA);
    }
    let point = bits.as_bytes().ok_or(BootCryptError::ASN1_PK_BIT_STRING)?;

    match point.split_first() {
        Some((&UNCOMPRESSED_POINT_MARKER, key)) => {
            if key.len() > CRYPTO_PUBKEY_MAX_SIZE {
                return Err(BootCryptError::ASN1_PK_TOO_LARGE);
            }
            Ok(PlainPubKey { key, curve })
        }
        _ => Err(BootCryptError::ASN1_PK_POINT_MARKER),
    }
}

/// Extract the raw digest and its algorithm from a DigestInfo
///
/// # Arguments
///
/// * `blob` - DER encoded DigestInfo
///
/// # Returns
///
/// * `PlainDigest` - Digest algorithm and bytes
pub fn get_plain_digest_from_asn1(blob: &[u8]) -> BootCryptResult<PlainDigest<'_>> {
    let body = sequence_contents(blob, BootCryptError::ASN1_DIGEST_SEQUENCE_TAG)?;
    let mut reader =
        SliceReader::new(body).map_err(|_| BootCryptError::ASN1_DIGEST_SEQUENCE_TAG)?;

    let alg = AlgorithmIdentifierRef::decode(&mut reader)
        .map_err(|_| BootCryptError::ASN1_DIGEST_ALGORITHM_ID)?;
    let md_alg = oid::md_alg_from_oid(&alg.oid)?;

    let digest = OctetStringRef::decode(&mut reader)
        .map_err(|_| BootCryptError::ASN1_DIGEST_OCTET_STRING)?;
    if !reader.is_finished() {
        return Err(BootCryptError::ASN1_DIGEST_TRAILING_DATA);
    }

    let digest = digest.as_bytes();
    if digest.len() != md_alg.digest_size() {
        return Err(BootCryptError::ASN1_DIGEST_LENGTH_MISMATCH);
    }

    Ok(PlainDigest { md_alg, digest })
}

/// Resolve a signature AlgorithmIdentifier
///
/// # Arguments
///
/// * `blob` - DER encoded AlgorithmIdentifier
///
/// # Returns
///
/// * Digest and public key algorithm pair
pub fn get_sig_alg(blob: &[u8]) -> BootCryptResult<(MdAlg, PkAlg)> {
    let mut reader = SliceReader::new(blob).map_err(|_| BootCryptError::ASN1_SIG_ALGORITHM_ID)?;
    let alg = AlgorithmIdentifierRef::decode(&mut reader)
        .map_err(|_| BootCryptError::ASN1_SIG_ALGORITHM_ID)?;
    oid::sig_alg_from_oid(&alg.oid)
}

/// Copy an unsigned integer into a fixed width, big-endian, left-padded.
/// Bytes beyond the width must be zero.
fn fixed_width_component(bytes: &[u8]) -> BootCryptResult<[u8; ECDSA_COMPONENT_SIZE]> {
    let mut out = [0u8; ECDSA_COMPONENT_SIZE];
    if bytes.len() > ECDSA_COMPONENT_SIZE {
        let (high, low) = bytes.split_at(bytes.len() - ECDSA_COMPONENT_SIZE);
        if high.iter().any(|b| *b != 0) {
            return Err(BootCryptError::ASN1_SIG_INTEGER_TOO_LARGE);
        }
        out.copy_from_slice(low);
    } else {
        out[ECDSA_COMPONENT_SIZE - bytes.len()..].copy_from_slice(bytes);
    }
    Ok(out)
}

/// Extract r and s from a signature value
///
/// # Arguments
///
/// * `blob` - DER encoded BIT STRING wrapping `SEQUENCE { r INTEGER, s INTEGER }`
///
/// # Returns
///
/// * `EcdsaSignature` - Fixed width signature components
pub fn get_ecdsa_sig(blob: &[u8]) -> BootCryptResult<EcdsaSignature> {
    let mut reader = SliceReader::new(blob).map_err(|_| BootCryptError::ASN1_SIG_BIT_STRING)?;
    let bits = BitStringRef::decode(&mut reader).map_err(|_| BootCryptError::ASN1_SIG_BIT_STRING)?;
    let bits = bits.as_bytes().ok_or(BootCryptError::ASN1_SIG_BIT_STRING)?;

    let body = sequence_contents(bits, BootCryptError::ASN1_SIG_SEQUENCE)?;
    let mut reader = SliceReader::new(body).map_err(|_| BootCryptError::ASN1_SIG_SEQUENCE)?;

    let mut components: [&[u8]; 2] = [&[]; 2];
    let mut count = 0;
    while !reader.is_finished() {
        if count == components.len() {
            return Err(BootCryptError::ASN1_SIG_INTEGER_COUNT);
        }
        let int = UintRef::decode(&mut reader).map_err(|_| BootCryptError::ASN1_SIG_SEQUENCE)?;
        components[count] = int.as_bytes();
        count += 1;
    }
    if count != components.len() {
        return Err(BootCryptError::ASN1_SIG_INTEGER_COUNT);
    }

    Ok(EcdsaSignature {
        r: fixed_width_component(components[0])?,
        s: fixed_width_component(components[1])?,
    })
}
