/*++

Licensed under the Apache-2.0 license.

File Name:

    config.rs

Abstract:

    File contains the platform constants used by the crypto library.

--*/

/// Base address of the boot ROM
pub const STM32MP_ROM_BASE: u64 = 0x0000_0000;

/// Size of the boot ROM window, rounded up to a 2 MiB block
pub const STM32MP_ROM_SIZE_2MB_ALIGNED: usize = 0x0020_0000;

/// Name of the OTP field holding the firmware encryption key
pub const ENCKEY_OTP: &str = "enckey_otp";

/// Platform configuration
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Physical and virtual base address of the boot ROM window
    pub rom_base: u64,

    /// Size of the boot ROM window
    pub rom_size: usize,

    /// OTP field holding the firmware encryption key
    pub enc_key_otp: &'static str,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            rom_base: STM32MP_ROM_BASE,
            rom_size: STM32MP_ROM_SIZE_2MB_ALIGNED,
            enc_key_otp: ENCKEY_OTP,
        }
    }
}
