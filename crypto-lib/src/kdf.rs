/*++

Licensed under the Apache-2.0 license.

File Name:

    kdf.rs

Abstract:

    File contains the retrieval of the firmware encryption key from OTP and
    its expansion to the AES-256 key size.

    The expansion repeats the OTP words until the key size is reached. It is
    not a cryptographic derivation. Keys already provisioned depend on its
    exact output, so it must not change without a provisioning change.

--*/

use crate::aead::EncKeyFlags;
use bootcrypt_drivers::{cverbose, Otp};
use bootcrypt_error::{BootCryptError, BootCryptResult};
use zeroize::Zeroize;

/// Size of a derived key in bytes
pub const DERIVED_KEY_SIZE: usize = 32;

/// Largest key read from OTP, in bytes
pub const ENC_MAX_KEY_SIZE: usize = 32;

const OTP_WORD_SIZE: usize = core::mem::size_of::<u32>();

/// Key used to encrypt the firmware image
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FwEncStatus {
    /// Secret symmetric key
    Ssk,

    /// Binary secret symmetric key
    Bssk,
}

/// Firmware decryption key. Wiped when dropped.
pub struct DerivedKey {
    key: [u8; ENC_MAX_KEY_SIZE],
    len: usize,
    flags: EncKeyFlags,
}

impl DerivedKey {
    /// Key bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.key[..self.len]
    }

    /// Key flags
    pub fn flags(&self) -> EncKeyFlags {
        self.flags
    }
}

impl Drop for DerivedKey {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

/// Expand raw key material in place to `DERIVED_KEY_SIZE` bytes
///
/// # Arguments
///
/// * `key`     - Buffer holding the raw material in its first `raw_len` bytes
/// * `raw_len` - Length of the raw material
/// * `_img_id` - Image identifier, not used by the expansion
///
/// # Returns
///
/// * Key length and key flags
pub fn derive_key(
    key: &mut [u8],
    raw_len: usize,
    _img_id: &[u8],
) -> BootCryptResult<(usize, EncKeyFlags)> {
    if key.len() < DERIVED_KEY_SIZE {
        return Err(BootCryptError::KDF_KEY_BUFFER_TOO_SMALL);
    }
    if raw_len == 0 || raw_len % OTP_WORD_SIZE != 0 || raw_len > key.len() {
        return Err(BootCryptError::KDF_INVALID_RAW_LENGTH);
    }

    let mut src = 0;
    let mut dst = raw_len;
    while dst < DERIVED_KEY_SIZE {
        key.copy_within(src..src + OTP_WORD_SIZE, dst);
        src += OTP_WORD_SIZE;
        dst += OTP_WORD_SIZE;
    }

    Ok((DERIVED_KEY_SIZE, EncKeyFlags::empty()))
}

/// Read the firmware encryption key from OTP and derive the decryption key
///
/// # Arguments
///
/// * `otp`      - Fuse storage
/// * `otp_name` - OTP field holding the key
/// * `status`   - Key the image is encrypted with
/// * `img_id`   - Image identifier
///
/// # Returns
///
/// * `DerivedKey` - Decryption key
pub fn get_enc_key_info<O: Otp + ?Sized>(
    otp: &O,
    otp_name: &str,
    status: FwEncStatus,
    img_id: &[u8],
) -> BootCryptResult<DerivedKey> {
    if status == FwEncStatus::Bssk {
        return Err(BootCryptError::KEY_INFO_BSSK_UNSUPPORTED);
    }

    let slot = otp.lookup(otp_name).map_err(|err| {
        cverbose!("get {} index error {}", otp_name, u32::from(err));
        BootCryptError::KEY_INFO_OTP_LOOKUP
    })?;

    let mut key = DerivedKey {
        key: [0u8; ENC_MAX_KEY_SIZE],
        len: 0,
        flags: EncKeyFlags::empty(),
    };

    let bit_len = slot.bit_len as usize;
    if bit_len > ENC_MAX_KEY_SIZE * 8 || bit_len % (OTP_WORD_SIZE * 8) != 0 {
        cverbose!("otp_len={} key_len={}", bit_len, ENC_MAX_KEY_SIZE * 8);
        return Err(BootCryptError::KEY_INFO_OTP_LENGTH);
    }
    let read_len = bit_len / 8;

    for (index, chunk) in (slot.index..).zip(key.key[..read_len].chunks_exact_mut(OTP_WORD_SIZE)) {
        let word = otp.read(index).map_err(|err| {
            cverbose!("unable to read from otp {}", u32::from(err));
            BootCryptError::KEY_INFO_OTP_READ
        })?;
        chunk.copy_from_slice(&word.to_be_bytes());
    }

    let (len, flags) = derive_key(&mut key.key, read_len, img_id)?;
    key.len = len;
    key.flags = flags;
    Ok(key)
}
