/*++

Licensed under the Apache-2.0 license.

File Name:

    otp.rs

Abstract:

    File contains the call contract of the fuse (OTP) storage.

--*/

use crate::BootCryptResult;

/// Location of a named OTP field
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct OtpSlot {
    /// Index of the first 32-bit OTP word
    pub index: u32,

    /// Length of the field in bits
    pub bit_len: u32,
}

/// Fuse storage
pub trait Otp {
    /// Look up a named OTP field
    ///
    /// # Arguments
    ///
    /// * `name` - Field name as defined by the platform
    fn lookup(&self, name: &str) -> BootCryptResult<OtpSlot>;

    /// Read one 32-bit OTP word.
    ///
    /// The returned value is in CPU order; storing it big-endian gives the
    /// bytes in fuse order.
    fn read(&self, index: u32) -> BootCryptResult<u32>;
}
