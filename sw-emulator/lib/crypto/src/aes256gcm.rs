/*++

Licensed under the Apache-2.0 license.

File Name:

    aes256gcm.rs

Abstract:

    File contains the software model of the secure AES accelerator in
    AES-256 GCM mode.

    Like the hardware, the engine is programmed with a 16 byte counter block
    (nonce followed by the big-endian counter of the first payload block).
    The pre-counter block used for the tag is the same block with the
    counter decremented by one.

--*/

use crate::{AES_256_BLOCK_SIZE, AES_256_KEY_SIZE};
use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockEncrypt, KeyInit, KeyIvInit, StreamCipher};
use aes::Aes256;
use bootcrypt_drivers::{
    BootCryptError, BootCryptResult, Engine, Saes, SaesKeySelection, SaesMode,
};
use ghash::universal_hash::UniversalHash;
use ghash::GHash;

type Aes256Ctr32BE = ctr::Ctr32BE<Aes256>;

/// GCM phase
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum GcmPhase {
    Aad,
    AadDone,
    Text,
    TextDone,
}

/// Operation in progress
struct GcmState {
    decrypt: bool,
    phase: GcmPhase,
    cipher: Aes256,
    ctr: Aes256Ctr32BE,
    ghash: GHash,
    j0: [u8; AES_256_BLOCK_SIZE],
    aad_len: u64,
    text_len: u64,
}

/// Secure AES accelerator model
#[derive(Default)]
pub struct SaesModel {
    /// Operation in progress
    state: Option<GcmState>,

    /// Accept key handles, resolved to `hw_key`
    pub key_handles: bool,

    /// Key returned for key handles
    pub hw_key: [u8; AES_256_KEY_SIZE],

    /// Set once `init_driver` has been called
    pub initialized: bool,

    /// Fail driver initialization
    pub fail_init_driver: bool,

    /// Fail payload processing
    pub fail_load: bool,

    /// Fail tag computation. The operation is left in progress.
    pub fail_final: bool,

    /// Number of times the engine was returned to idle
    pub zeroize_count: usize,
}

impl SaesModel {
    /// Returns true if no operation is in progress
    pub fn is_idle(&self) -> bool {
        self.state.is_none()
    }

    fn encrypt_block(cipher: &Aes256, block: &[u8; AES_256_BLOCK_SIZE]) -> [u8; AES_256_BLOCK_SIZE] {
        let mut out = GenericArray::clone_from_slice(block);
        cipher.encrypt_block(&mut out);
        out.into()
    }

    fn state(&mut self) -> BootCryptResult<&mut GcmState> {
        self.state
            .as_mut()
            .ok_or(BootCryptError::DRIVER_SAES_INVALID_STATE)
    }
}

impl Engine for SaesModel {
    fn zeroize(&mut self) {
        self.state = None;
        self.zeroize_count += 1;
    }
}

impl Saes for SaesModel {
    fn init_driver(&mut self) -> BootCryptResult<()> {
        if self.fail_init_driver {
            return Err(BootCryptError::DRIVER_SAES_INVALID_STATE);
        }
        self.initialized = true;
        Ok(())
    }

    fn supports_key_handles(&self) -> bool {
        self.key_handles
    }

    fn init(
        &mut self,
        decrypt: bool,
        mode: SaesMode,
        key_sel: SaesKeySelection,
        key: &[u8],
        iv: &[u8],
    ) -> BootCryptResult<()> {
        if mode != SaesMode::Gcm || self.state.is_some() {
            return Err(BootCryptError::DRIVER_SAES_INVALID_STATE);
        }

        let key: [u8; AES_256_KEY_SIZE] = match key_sel {
            SaesKeySelection::Soft => key
                .try_into()
                .map_err(|_| BootCryptError::DRIVER_SAES_INVALID_KEY_SIZE)?,
            _ if self.key_handles => self.hw_key,
            _ => return Err(BootCryptError::DRIVER_SAES_KEY_SELECTION),
        };
        let iv: [u8; AES_256_BLOCK_SIZE] = iv
            .try_into()
            .map_err(|_| BootCryptError::DRIVER_SAES_INVALID_STATE)?;

        let cipher = Aes256::new(GenericArray::from_slice(&key));
        let h = Self::encrypt_block(&cipher, &[0u8; AES_256_BLOCK_SIZE]);

        let mut j0 = iv;
        let ctr = u32::from_be_bytes([iv[12], iv[13], iv[14], iv[15]]).wrapping_sub(1);
        j0[12..].copy_from_slice(&ctr.to_be_bytes());

        self.state = Some(GcmState {
            decrypt,
            phase: GcmPhase::Aad,
            ctr: Aes256Ctr32BE::new(GenericArray::from_slice(&key), GenericArray::from_slice(&iv)),
            cipher,
            ghash: GHash::new(GenericArray::from_slice(&h)),
            j0,
            aad_len: 0,
            text_len: 0,
        });
        Ok(())
    }

    fn update_assodata(&mut self, last: bool, data: &[u8]) -> BootCryptResult<()> {
        let state = self.state()?;
        if state.phase != GcmPhase::Aad {
            return Err(BootCryptError::DRIVER_SAES_INVALID_STATE);
        }
        if !last && data.len() % AES_256_BLOCK_SIZE != 0 {
            return Err(BootCryptError::DRIVER_SAES_UNALIGNED_DATA);
        }

        state.ghash.update_padded(data);
        state.aad_len += data.len() as u64;
        if last {
            state.phase = GcmPhase::AadDone;
        }
        Ok(())
    }

    fn update_load(&mut self, last: bool, data: &mut [u8]) -> BootCryptResult<()> {
        let fail = self.fail_load;
        let state = self.state()?;
        match state.phase {
            GcmPhase::Aad | GcmPhase::AadDone => state.phase = GcmPhase::Text,
            GcmPhase::Text => {}
            GcmPhase::TextDone => return Err(BootCryptError::DRIVER_SAES_INVALID_STATE),
        }
        if !last && data.len() % AES_256_BLOCK_SIZE != 0 {
            return Err(BootCryptError::DRIVER_SAES_UNALIGNED_DATA);
        }
        if fail {
            return Err(BootCryptError::DRIVER_SAES_INVALID_STATE);
        }

        if state.decrypt {
            state.ghash.update_padded(data);
            state.ctr.apply_keystream(data);
        } else {
            state.ctr.apply_keystream(data);
            state.ghash.update_padded(data);
        }
        state.text_len += data.len() as u64;
        if last {
            state.phase = GcmPhase::TextDone;
        }
        Ok(())
    }

    fn final_tag(&mut self, tag: &mut [u8]) -> BootCryptResult<()> {
        if tag.len() > AES_256_BLOCK_SIZE {
            return Err(BootCryptError::DRIVER_SAES_INVALID_TAG_SIZE);
        }
        if self.fail_final {
            return Err(BootCryptError::DRIVER_SAES_INVALID_STATE);
        }
        let mut state = self
            .state
            .take()
            .ok_or(BootCryptError::DRIVER_SAES_INVALID_STATE)?;

        let mut len_block = [0u8; AES_256_BLOCK_SIZE];
        len_block[..8].copy_from_slice(&(state.aad_len * 8).to_be_bytes());
        len_block[8..].copy_from_slice(&(state.text_len * 8).to_be_bytes());
        state.ghash.update(&[GenericArray::clone_from_slice(&len_block)]);

        let s = state.ghash.finalize();
        let ek_j0 = Self::encrypt_block(&state.cipher, &state.j0);
        for (i, out) in tag.iter_mut().enumerate() {
            *out = s[i] ^ ek_j0[i];
        }
        Ok(())
    }
}
