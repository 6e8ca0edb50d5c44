// Licensed under the Apache-2.0 license

#![allow(dead_code)]

use bootcrypt_emu_crypto::{
    BootRomModel, HashModel, OtpModel, PkaModel, RecordingMapper, RngModel, SaesModel,
};
use bootcrypt_lib::{
    BootRomVerifier, CryptoLib, CryptoLibEnv, CryptoModule, EcdsaVerifier, PkaVerifier,
    PlatformConfig,
};
use p256::ecdsa::signature::Signer;
use p256::ecdsa::{Signature, SigningKey};
use p256::pkcs8::EncodePublicKey;

pub const PRIV_KEY: [u8; 32] = [
    0xC9, 0xAF, 0xA9, 0xD8, 0x45, 0xBA, 0x75, 0x16, 0x6B, 0x5C, 0x21, 0x57, 0x67, 0xB1, 0xD6, 0x93,
    0x4E, 0x50, 0xC3, 0xDB, 0x36, 0xE8, 0x9B, 0x12, 0x7B, 0x8A, 0x62, 0x2B, 0x12, 0x0F, 0x67, 0x21,
];

/// AlgorithmIdentifier for ecdsa-with-SHA256
pub const ECDSA_WITH_SHA256_ALG: [u8; 12] = [
    0x30, 0x0a, 0x06, 0x08, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x04, 0x03, 0x02,
];

/// AlgorithmIdentifier for ecdsa-with-SHA384
pub const ECDSA_WITH_SHA384_ALG: [u8; 12] = [
    0x30, 0x0a, 0x06, 0x08, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x04, 0x03, 0x03,
];

pub struct TestEnv<V: EcdsaVerifier> {
    pub hash: HashModel,
    pub verifier: V,
    pub saes: SaesModel,
    pub otp: OtpModel,
    pub config: PlatformConfig,
    pub auth_supported: bool,
}

impl<V: EcdsaVerifier> CryptoLibEnv for TestEnv<V> {
    type Hash = HashModel;
    type Verifier = V;
    type Saes = SaesModel;
    type Otp = OtpModel;

    fn auth_supported(&self) -> bool {
        self.auth_supported
    }

    fn hash_engine(&mut self) -> &mut HashModel {
        &mut self.hash
    }

    fn verifier(&mut self) -> &mut V {
        &mut self.verifier
    }

    fn saes(&mut self) -> &mut SaesModel {
        &mut self.saes
    }

    fn otp(&self) -> &OtpModel {
        &self.otp
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}

pub type PkaEnv = TestEnv<PkaVerifier<PkaModel, RngModel>>;
pub type RomEnv = TestEnv<BootRomVerifier<BootRomModel, RecordingMapper>>;

fn env<V: EcdsaVerifier>(verifier: V) -> TestEnv<V> {
    TestEnv {
        hash: HashModel::default(),
        verifier,
        saes: SaesModel::default(),
        otp: OtpModel::default(),
        config: PlatformConfig::default(),
        auth_supported: true,
    }
}

pub fn pka_env() -> PkaEnv {
    env(PkaVerifier::new(PkaModel::default(), RngModel::default()))
}

pub fn rom_env() -> RomEnv {
    let mapper = RecordingMapper::default();
    let rom = BootRomModel::new(mapper.mapped_flag());
    env(BootRomVerifier::new(rom, mapper, PlatformConfig::default()))
}

pub fn pka_lib() -> CryptoLib<PkaEnv> {
    let mut lib = CryptoLib::new(pka_env());
    lib.init();
    lib
}

pub fn rom_lib() -> CryptoLib<RomEnv> {
    let mut lib = CryptoLib::new(rom_env());
    lib.init();
    lib
}

/// Signed image material
pub struct SignedImage {
    pub data: Vec<u8>,
    pub pk: Vec<u8>,
    pub sig: Vec<u8>,
}

/// Wrap a DER signature in the BIT STRING of a certificate signature value
pub fn sig_bit_string(der_sig: &[u8]) -> Vec<u8> {
    let mut blob = vec![0x03, der_sig.len() as u8 + 1, 0x00];
    blob.extend_from_slice(der_sig);
    blob
}

pub fn signed_image(data: &[u8]) -> SignedImage {
    let signing_key = SigningKey::from_slice(&PRIV_KEY).unwrap();
    let signature: Signature = signing_key.sign(data);
    let pk = signing_key
        .verifying_key()
        .to_public_key_der()
        .unwrap()
        .as_bytes()
        .to_vec();

    SignedImage {
        data: data.to_vec(),
        pk,
        sig: sig_bit_string(signature.to_der().as_bytes()),
    }
}

/// SubjectPublicKeyInfo header for id-ecPublicKey / brainpoolP256t1
const BP256T1_SPKI_PREFIX: [u8; 27] = [
    0x30, 0x5a, 0x30, 0x14, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01, 0x06, 0x09,
    0x2b, 0x24, 0x03, 0x03, 0x02, 0x08, 0x01, 0x01, 0x08, 0x03, 0x42, 0x00,
];

/// Re-encode the uncompressed point of a P-256 SubjectPublicKeyInfo as a
/// brainpoolP256t1 key
pub fn brainpool_spki(p256_spki: &[u8]) -> Vec<u8> {
    let mut blob = BP256T1_SPKI_PREFIX.to_vec();
    blob.extend_from_slice(&p256_spki[p256_spki.len() - 65..]);
    blob
}

/// DigestInfo for a SHA-256 digest
pub fn sha256_digest_info(digest: &[u8]) -> Vec<u8> {
    let mut blob = vec![
        0x30,
        0x11 + digest.len() as u8,
        0x30,
        0x0d,
        0x06,
        0x09,
        0x60,
        0x86,
        0x48,
        0x01,
        0x65,
        0x03,
        0x04,
        0x02,
        0x01,
        0x05,
        0x00,
        0x04,
        digest.len() as u8,
    ];
    blob.extend_from_slice(digest);
    blob
}
