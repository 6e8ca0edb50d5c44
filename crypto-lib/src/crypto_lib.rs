/*++

Licensed under the Apache-2.0 license.

File Name:

    crypto_lib.rs

Abstract:

    File contains the entry points of the boot crypto library.

--*/

use crate::aead::{DecAlgo, EncKeyFlags};
use crate::asn1::{self, CRYPTO_PUBKEY_MAX_SIZE};
use crate::ct::ct_eq;
use crate::digest::sha256_digest;
use crate::fatal::handle_fatal_error;
use crate::oid::{MdAlg, PkAlg};
use crate::verifier::{EcdsaPubKey, EcdsaVerifier};
use crate::{CryptoLibEnv, CryptoModule};
use bootcrypt_drivers::printer::HexU32;
use bootcrypt_drivers::{cerror, cverbose, HashEngine};
#[cfg(feature = "decryption")]
use bootcrypt_drivers::Saes;
use bootcrypt_error::{BootCryptError, BootCryptResult};

/// Size of the curve identifier prefixed to hashed public keys
const CURVE_ID_SIZE: usize = core::mem::size_of::<u32>();

/// Public key in the form hashed to compare with the root of trust key hash
pub struct HashedPubKey {
    buf: [u8; CRYPTO_PUBKEY_MAX_SIZE + CURVE_ID_SIZE],
    len: usize,
}

impl HashedPubKey {
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

/// Boot crypto library
pub struct CryptoLib<Env: CryptoLibEnv> {
    env: Env,
    initialized: bool,
}

impl<Env: CryptoLibEnv> CryptoLib<Env> {
    /// Create a new instance of `CryptoLib`
    ///
    /// # Arguments
    ///
    /// * `env` - Platform environment
    pub fn new(env: Env) -> Self {
        Self {
            env,
            initialized: false,
        }
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut Env {
        &mut self.env
    }

    /// Public key as hashed by the chain of trust
    ///
    /// # Arguments
    ///
    /// * `full_pk` - DER encoded SubjectPublicKeyInfo
    ///
    /// # Returns
    ///
    /// * `HashedPubKey` - Raw key, prefixed with the curve identifier when the
    ///   accelerator backend is used
    pub fn get_hashed_pk(&self, full_pk: &[u8]) -> BootCryptResult<HashedPubKey> {
        let plain = asn1::get_plain_pk_from_asn1(full_pk)?;

        let mut hashed = HashedPubKey {
            buf: [0u8; CRYPTO_PUBKEY_MAX_SIZE + CURVE_ID_SIZE],
            len: 0,
        };
        if Env::Verifier::HASHED_PK_HAS_CURVE_ID {
            hashed.buf[..CURVE_ID_SIZE].copy_from_slice(&plain.curve.id().to_ne_bytes());
            hashed.len = CURVE_ID_SIZE;
        }
        let end = hashed.len + plain.key.len();
        hashed.buf[hashed.len..end].copy_from_slice(plain.key);
        hashed.len = end;
        Ok(hashed)
    }

    /// Read and derive the firmware decryption key
    ///
    /// # Arguments
    ///
    /// * `status` - Key the image is encrypted with
    /// * `img_id` - Image identifier
    #[cfg(feature = "decryption")]
    pub fn get_enc_key_info(
        &self,
        status: crate::FwEncStatus,
        img_id: &[u8],
    ) -> BootCryptResult<crate::DerivedKey> {
        crate::kdf::get_enc_key_info(
            self.env.otp(),
            self.env.config().enc_key_otp,
            status,
            img_id,
        )
    }

    fn fatal(&mut self, code: BootCryptError) -> ! {
        self.env.zeroize_engines();
        handle_fatal_error(code, &mut [])
    }

    fn check_signature(
        &mut self,
        data: &[u8],
        sig: &[u8],
        sig_alg: &[u8],
        pk: &[u8],
    ) -> BootCryptResult<()> {
        let (md_alg, pk_alg) = asn1::get_sig_alg(sig_alg)?;
        if md_alg != MdAlg::Sha256 || pk_alg != PkAlg::Ecdsa {
            return Err(BootCryptError::UNSUPPORTED_SIG_ALGORITHM_PAIR);
        }

        let plain = asn1::get_plain_pk_from_asn1(pk)?;
        let pubkey: EcdsaPubKey = plain
            .key
            .try_into()
            .map_err(|_| BootCryptError::UNSUPPORTED_PUB_KEY_SIZE)?;

        let signature = asn1::get_ecdsa_sig(sig)?;
        let hash = sha256_digest(self.env.hash_engine(), data)?;

        self.env
            .verifier()
            .verify(&hash, &pubkey, &signature, plain.curve)
    }

    fn check_hash(&mut self, data: &[u8], digest_info: &[u8]) -> BootCryptResult<()> {
        let expected = asn1::get_plain_digest_from_asn1(digest_info)?;
        if expected.md_alg != MdAlg::Sha256 {
            return Err(BootCryptError::UNSUPPORTED_MD_ALGORITHM);
        }

        let hash = sha256_digest(self.env.hash_engine(), data)?;
        if !ct_eq(&hash, expected.digest) {
            return Err(BootCryptError::CRYPTO_ERR_HASH);
        }
        Ok(())
    }
}

impl<Env: CryptoLibEnv> CryptoModule for CryptoLib<Env> {
    const NAME: &'static str = "stm32_crypto_lib";

    fn init(&mut self) {
        if self.initialized || !self.env.auth_supported() {
            return;
        }

        if let Err(err) = self.env.verifier().init() {
            self.fatal(err);
        }

        #[cfg(feature = "decryption")]
        {
            if self.env.saes().init_driver().is_err() {
                self.fatal(BootCryptError::FATAL_SAES_INIT);
            }
        }

        if let Err(err) = self.env.hash_engine().register() {
            cerror!("HASH init ({})", HexU32(err.into()));
            self.fatal(BootCryptError::FATAL_HASH_REGISTER);
        }

        self.initialized = true;
    }

    fn verify_signature(
        &mut self,
        data: &[u8],
        sig: &[u8],
        sig_alg: &[u8],
        pk: &[u8],
    ) -> BootCryptResult<()> {
        self.check_signature(data, sig, sig_alg, pk)
            .map_err(|err| {
                cverbose!("verify_signature {}", HexU32(err.into()));
                BootCryptError::CRYPTO_ERR_SIGNATURE
            })
    }

    fn verify_hash(&mut self, data: &[u8], digest_info: &[u8]) -> BootCryptResult<()> {
        self.check_hash(data, digest_info).map_err(|err| {
            cverbose!("verify_hash {}", HexU32(err.into()));
            BootCryptError::CRYPTO_ERR_HASH
        })
    }

    fn auth_decrypt_supported(&self) -> bool {
        cfg!(feature = "decryption")
    }

    #[cfg(feature = "decryption")]
    fn auth_decrypt(
        &mut self,
        dec_algo: DecAlgo,
        data: &mut [u8],
        key: &[u8],
        key_flags: EncKeyFlags,
        iv: &[u8],
        tag: &[u8],
    ) -> BootCryptResult<()> {
        let result = match dec_algo {
            DecAlgo::Gcm => {
                crate::aead::decrypt_aes_gcm(self.env.saes(), data, key, key_flags, iv, tag)
            }
        };

        result.map_err(|err| {
            cverbose!("auth_decrypt {}", HexU32(err.into()));
            if err == BootCryptError::CRYPTO_ERR_INIT {
                err
            } else {
                BootCryptError::CRYPTO_ERR_DECRYPTION
            }
        })
    }

    #[cfg(not(feature = "decryption"))]
    fn auth_decrypt(
        &mut self,
        _dec_algo: DecAlgo,
        _data: &mut [u8],
        _key: &[u8],
        _key_flags: EncKeyFlags,
        _iv: &[u8],
        _tag: &[u8],
    ) -> BootCryptResult<()> {
        Err(BootCryptError::CRYPTO_ERR_DECRYPTION)
    }
}
