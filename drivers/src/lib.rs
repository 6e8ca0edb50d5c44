/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the boot crypto driver contracts.

--*/

#![cfg_attr(not(feature = "std"), no_std)]

mod bootrom;
mod engine;
mod hash;
mod mmap;
mod otp;
mod pka;
pub mod printer;
mod rng;
mod saes;

pub use bootcrypt_error::{BootCryptError, BootCryptResult, ErrorClass};
pub use bootrom::{
    BootRomEcdsaVerifyFn, BootRomEntry, BootRomVerifyService, BOOT_API_ECDSA_ALGO_TYPE_BRAINPOOL256,
    BOOT_API_ECDSA_ALGO_TYPE_P256NIST, BOOT_API_ECDSA_PUB_KEY_LEN_IN_BYTES,
    BOOT_API_ECDSA_SIGNATURE_LEN_IN_BYTES, BOOT_API_RETURN_OK, BOOT_API_SHA256_DIGEST_SIZE_IN_BYTES,
};
pub use engine::Engine;
pub use hash::{HashAlgo, HashEngine, Sha256Digest, SHA256_DIGEST_BYTE_SIZE};
pub use mmap::{MemAttr, RegionMapper};
pub use otp::{Otp, OtpSlot};
pub use pka::{Pka, PkaEcdsaCurve};
pub use rng::Rng;
pub use saes::{Saes, SaesKeySelection, SaesMode, AES_BLOCK_SIZE_BYTES};
