/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    Boot crypto library: image signature and hash verification, and
    authenticated decryption of firmware images.

--*/

#![cfg_attr(not(feature = "std"), no_std)]

mod aead;
mod asn1;
mod config;
mod crypto_lib;
mod ct;
mod digest;
mod fatal;
mod guard;
mod oid;
mod verifier;

use bootcrypt_drivers::{Engine, HashEngine, Otp, Saes};
use bootcrypt_error::BootCryptResult;

pub use aead::{
    decrypt_aes_gcm, gcm_counter_block, select_key, DecAlgo, EncKeyFlags, CRYPTO_MAX_TAG_SIZE,
    GCM_INITIAL_COUNTER, GCM_NONCE_SIZE,
};
pub use asn1::{
    get_ecdsa_sig, get_plain_digest_from_asn1, get_plain_pk_from_asn1, get_sig_alg,
    EcdsaSignature, NamedCurve, PlainDigest, PlainPubKey, CRYPTO_PUBKEY_MAX_SIZE,
    CRYPTO_SIGN_MAX_SIZE, ECDSA_COMPONENT_SIZE,
};
pub use config::{PlatformConfig, ENCKEY_OTP, STM32MP_ROM_BASE, STM32MP_ROM_SIZE_2MB_ALIGNED};
pub use crypto_lib::{CryptoLib, HashedPubKey};
pub use ct::{accumulate_diff, ct_eq};
pub use digest::sha256_digest;
pub use fatal::handle_fatal_error;
pub use guard::EngineGuard;
pub use oid::{MdAlg, PkAlg};
pub use verifier::{BootRomVerifier, EcdsaPubKey, EcdsaVerifier, PkaCurves, PkaVerifier};

cfg_if::cfg_if! {
    if #[cfg(feature = "decryption")] {
        mod kdf;

        pub use kdf::{
            derive_key, get_enc_key_info, DerivedKey, FwEncStatus, DERIVED_KEY_SIZE,
            ENC_MAX_KEY_SIZE,
        };
    }
}

/// Platform the library runs on
pub trait CryptoLibEnv {
    /// Hash engine
    type Hash: HashEngine;

    /// Signature verification backend, fixed for the platform
    type Verifier: EcdsaVerifier;

    /// Secure AES engine
    type Saes: Saes;

    /// Fuse storage
    type Otp: Otp;

    /// Returns true if images must be authenticated on this platform
    fn auth_supported(&self) -> bool;

    fn hash_engine(&mut self) -> &mut Self::Hash;

    fn verifier(&mut self) -> &mut Self::Verifier;

    fn saes(&mut self) -> &mut Self::Saes;

    fn otp(&self) -> &Self::Otp;

    fn config(&self) -> &PlatformConfig;

    /// Return every crypto engine of the platform to idle
    fn zeroize_engines(&mut self) {
        self.hash_engine().zeroize();
        self.verifier().zeroize();
        self.saes().zeroize();
    }
}

/// Crypto library as registered with the boot framework
pub trait CryptoModule {
    /// Registration name
    const NAME: &'static str;

    /// Bring up the crypto hardware. Halts the boot stage on failure.
    fn init(&mut self);

    /// Verify the signature of `data`
    ///
    /// # Arguments
    ///
    /// * `data`    - Signed data
    /// * `sig`     - DER encoded signature value
    /// * `sig_alg` - DER encoded signature AlgorithmIdentifier
    /// * `pk`      - DER encoded SubjectPublicKeyInfo
    ///
    /// # Returns
    ///
    /// * `CRYPTO_ERR_SIGNATURE` on any failure
    fn verify_signature(
        &mut self,
        data: &[u8],
        sig: &[u8],
        sig_alg: &[u8],
        pk: &[u8],
    ) -> BootCryptResult<()>;

    /// Verify the digest of `data`
    ///
    /// # Arguments
    ///
    /// * `data`        - Data
    /// * `digest_info` - DER encoded DigestInfo
    ///
    /// # Returns
    ///
    /// * `CRYPTO_ERR_HASH` on any failure
    fn verify_hash(&mut self, data: &[u8], digest_info: &[u8]) -> BootCryptResult<()>;

    /// Returns true if `auth_decrypt` is available
    fn auth_decrypt_supported(&self) -> bool;

    /// Decrypt `data` in place and authenticate it
    ///
    /// # Arguments
    ///
    /// * `dec_algo`  - Decryption algorithm
    /// * `data`      - Ciphertext, replaced by the plaintext
    /// * `key`       - Key
    /// * `key_flags` - Key flags
    /// * `iv`        - Nonce
    /// * `tag`       - Expected authentication tag
    ///
    /// # Returns
    ///
    /// * `CRYPTO_ERR_INIT` if the engine could not be set up,
    ///   `CRYPTO_ERR_DECRYPTION` on any other failure
    fn auth_decrypt(
        &mut self,
        dec_algo: DecAlgo,
        data: &mut [u8],
        key: &[u8],
        key_flags: EncKeyFlags,
        iv: &[u8],
        tag: &[u8],
    ) -> BootCryptResult<()>;
}
