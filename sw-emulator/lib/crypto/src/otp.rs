/*++

Licensed under the Apache-2.0 license.

File Name:

    otp.rs

Abstract:

    File contains a fuse storage model with named fields.

--*/

use bootcrypt_drivers::{BootCryptError, BootCryptResult, Otp, OtpSlot};

/// Named OTP field
struct OtpField {
    name: &'static str,
    slot: OtpSlot,
}

/// Fuse storage model
#[derive(Default)]
pub struct OtpModel {
    fields: Vec<OtpField>,
    words: Vec<u32>,

    /// Fail every word read
    pub fail_read: bool,
}

impl OtpModel {
    /// Add a named field and program its words
    ///
    /// # Arguments
    ///
    /// * `name`    - Field name
    /// * `bit_len` - Advertised field length in bits
    /// * `words`   - Word values, in CPU order
    ///
    /// # Returns
    ///
    /// * Index of the first word of the field
    pub fn add_field(&mut self, name: &'static str, bit_len: u32, words: &[u32]) -> u32 {
        let index = self.words.len() as u32;
        self.words.extend_from_slice(words);
        self.fields.push(OtpField {
            name,
            slot: OtpSlot { index, bit_len },
        });
        index
    }
}

impl Otp for OtpModel {
    fn lookup(&self, name: &str) -> BootCryptResult<OtpSlot> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.slot)
            .ok_or(BootCryptError::DRIVER_OTP_NOT_FOUND)
    }

    fn read(&self, index: u32) -> BootCryptResult<u32> {
        if self.fail_read {
            return Err(BootCryptError::DRIVER_OTP_INDEX_OUT_OF_BOUNDS);
        }
        self.words
            .get(index as usize)
            .copied()
            .ok_or(BootCryptError::DRIVER_OTP_INDEX_OUT_OF_BOUNDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_read() {
        let mut otp = OtpModel::default();
        otp.add_field("other", 32, &[0xdead_beef]);
        let index = otp.add_field("enckey_otp", 64, &[0x0011_2233, 0x4455_6677]);

        let slot = otp.lookup("enckey_otp").unwrap();
        assert_eq!(slot, OtpSlot { index, bit_len: 64 });
        assert_eq!(otp.read(slot.index + 1), Ok(0x4455_6677));
    }

    #[test]
    fn test_unknown_field() {
        let otp = OtpModel::default();
        assert_eq!(
            otp.lookup("enckey_otp"),
            Err(BootCryptError::DRIVER_OTP_NOT_FOUND)
        );
        assert_eq!(otp.read(0), Err(BootCryptError::DRIVER_OTP_INDEX_OUT_OF_BOUNDS));
    }
}
