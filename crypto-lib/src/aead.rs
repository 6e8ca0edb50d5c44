/*++

Licensed under the Apache-2.0 license.

File Name:

    aead.rs

Abstract:

    File contains the authenticated decryption of firmware images on the
    secure AES engine.

--*/

use crate::ct::accumulate_diff;
use crate::fatal::handle_fatal_error;
use crate::guard::EngineGuard;
use bootcrypt_drivers::{cverbose, Saes, SaesKeySelection, SaesMode, AES_BLOCK_SIZE_BYTES};
use bootcrypt_error::{BootCryptError, BootCryptResult};
use zeroize::Zeroize;

/// GCM nonce size in bytes
pub const GCM_NONCE_SIZE: usize = 12;

/// Counter of the first payload block. Counter 1 encrypts the tag.
pub const GCM_INITIAL_COUNTER: u32 = 2;

/// Largest authentication tag in bytes
pub const CRYPTO_MAX_TAG_SIZE: usize = 16;

bitflags::bitflags! {
    /// Decryption key flags
    pub struct EncKeyFlags : u32 {
        /// Key buffer holds a reference to a hardware key, not the key
        const IS_IDENTIFIER = 0x1;
    }
}

/// Decryption algorithm
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DecAlgo {
    Gcm,
}

impl TryFrom<u32> for DecAlgo {
    type Error = BootCryptError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(DecAlgo::Gcm),
            _ => Err(BootCryptError::UNSUPPORTED_DEC_ALGORITHM),
        }
    }
}

/// Pick the key source for the engine.
///
/// Asking for a key identifier on an engine without key handles halts the
/// boot stage.
pub fn select_key<S: Saes>(saes: &mut S, flags: EncKeyFlags) -> SaesKeySelection {
    if flags.contains(EncKeyFlags::IS_IDENTIFIER) {
        if !saes.supports_key_handles() {
            handle_fatal_error(BootCryptError::FATAL_KEY_IS_IDENTIFIER, &mut [saes]);
        }
        return SaesKeySelection::Wrapped;
    }

    SaesKeySelection::Soft
}

/// Build the engine counter block: the nonce followed by the big-endian
/// initial counter
pub fn gcm_counter_block(iv: &[u8]) -> BootCryptResult<[u8; AES_BLOCK_SIZE_BYTES]> {
    if iv.len() != GCM_NONCE_SIZE {
        return Err(BootCryptError::AEAD_INVALID_IV_SIZE);
    }
    let mut block = [0u8; AES_BLOCK_SIZE_BYTES];
    block[..GCM_NONCE_SIZE].copy_from_slice(iv);
    block[GCM_NONCE_SIZE..].copy_from_slice(&GCM_INITIAL_COUNTER.to_be_bytes());
    Ok(block)
}

/// Run the payload through an engine already programmed for GCM and check
/// the resulting tag against `tag`
fn gcm_payload<S: Saes>(saes: &mut S, data: &mut [u8], tag: &[u8]) -> BootCryptResult<()> {
    let mut tag_buf = [0u8; CRYPTO_MAX_TAG_SIZE];
    saes.update_assodata(true, &[])?;
    saes.update_load(true, data)?;
    saes.final_tag(&mut tag_buf)?;

    let diff = accumulate_diff(tag.iter().zip(tag_buf.iter()));
    tag_buf.zeroize();
    if diff != 0 {
        return Err(BootCryptError::AEAD_TAG_MISMATCH);
    }
    Ok(())
}

/// Decrypt `data` in place with AES-256 GCM and check its tag
///
/// # Arguments
///
/// * `saes`      - Secure AES engine
/// * `data`      - Ciphertext, replaced by the plaintext
/// * `key`       - Key, or key reference when flagged as an identifier
/// * `key_flags` - Key flags
/// * `iv`        - 12 byte nonce
/// * `tag`       - Expected tag, 1 to 16 bytes
///
/// # Returns
///
/// * `CRYPTO_ERR_INIT` if the engine could not be programmed. On any error
///   once the engine is programmed, `data` is wiped.
pub fn decrypt_aes_gcm<S: Saes>(
    saes: &mut S,
    data: &mut [u8],
    key: &[u8],
    key_flags: EncKeyFlags,
    iv: &[u8],
    tag: &[u8],
) -> BootCryptResult<()> {
    if tag.is_empty() || tag.len() > CRYPTO_MAX_TAG_SIZE {
        return Err(BootCryptError::AEAD_INVALID_TAG_SIZE);
    }
    let counter_block = gcm_counter_block(iv)?;
    let key_sel = select_key(saes, key_flags);

    let mut op = EngineGuard::new(saes);
    op.init(true, SaesMode::Gcm, key_sel, key, &counter_block)
        .map_err(|err| {
            cverbose!("saes init {}", u32::from(err));
            BootCryptError::CRYPTO_ERR_INIT
        })?;

    let result = gcm_payload(&mut *op, data, tag);
    drop(op);

    if result.is_err() {
        data.zeroize();
    }
    result
}
