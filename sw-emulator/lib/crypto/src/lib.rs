/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the boot crypto emulator models.

--*/

mod aes256gcm;
mod bootrom;
mod ecc256;
mod mmap;
mod otp;
mod rng;
mod sha256;

pub use aes256gcm::SaesModel;
pub use bootrom::BootRomModel;
pub use ecc256::PkaModel;
pub use mmap::{MapEvent, RecordingMapper};
pub use otp::OtpModel;
pub use rng::RngModel;
pub use sha256::HashModel;

/// AES-256 key size in bytes
pub const AES_256_KEY_SIZE: usize = 32;

/// AES block size in bytes
pub const AES_256_BLOCK_SIZE: usize = 16;
