/*++

Licensed under the Apache-2.0 license.

File Name:

    bootrom.rs

Abstract:

    File contains the boot ROM ECDSA verification service interface.

    The service lives in the boot ROM and may only be called while the ROM
    region is mapped executable and secure.

--*/

/// Status returned by boot ROM services on success
pub const BOOT_API_RETURN_OK: u32 = 0x77;

/// `ecc_algo` selector for NIST P-256
pub const BOOT_API_ECDSA_ALGO_TYPE_P256NIST: u32 = 1;

/// `ecc_algo` selector for Brainpool P-256
pub const BOOT_API_ECDSA_ALGO_TYPE_BRAINPOOL256: u32 = 2;

pub const BOOT_API_SHA256_DIGEST_SIZE_IN_BYTES: usize = 32;
pub const BOOT_API_ECDSA_SIGNATURE_LEN_IN_BYTES: usize = 64;
pub const BOOT_API_ECDSA_PUB_KEY_LEN_IN_BYTES: usize = 64;

/// Boot ROM entry point, as published in the boot context
pub type BootRomEcdsaVerifyFn = unsafe extern "C" fn(
    hash_in: *const u8,
    pubkey_in: *const u8,
    signature: *const u8,
    ecc_algo: u32,
) -> u32;

/// Boot ROM ECDSA verification service
pub trait BootRomVerifyService {
    /// Verify an ECDSA signature
    ///
    /// # Arguments
    ///
    /// * `hash`      - SHA-256 digest of the signed data
    /// * `pubkey`    - Public key, X then Y
    /// * `signature` - Signature, r then s
    /// * `ecc_algo`  - `BOOT_API_ECDSA_ALGO_TYPE_*` selector
    ///
    /// # Returns
    ///
    /// * `BOOT_API_RETURN_OK` on success, any other value on failure
    fn ecdsa_verify_signature(
        &self,
        hash: &[u8; BOOT_API_SHA256_DIGEST_SIZE_IN_BYTES],
        pubkey: &[u8; BOOT_API_ECDSA_PUB_KEY_LEN_IN_BYTES],
        signature: &[u8; BOOT_API_ECDSA_SIGNATURE_LEN_IN_BYTES],
        ecc_algo: u32,
    ) -> u32;
}

/// Boot ROM entry point read from the boot context
#[derive(Copy, Clone)]
pub struct BootRomEntry {
    entry: BootRomEcdsaVerifyFn,
}

impl BootRomEntry {
    /// Create a new instance of `BootRomEntry`
    ///
    /// # Safety
    ///
    /// `entry` must be the verification entry point published by the boot
    /// ROM in the boot context, and the caller must only use the returned
    /// service while the ROM region is mapped.
    pub unsafe fn new(entry: BootRomEcdsaVerifyFn) -> Self {
        Self { entry }
    }
}

impl BootRomVerifyService for BootRomEntry {
    fn ecdsa_verify_signature(
        &self,
        hash: &[u8; BOOT_API_SHA256_DIGEST_SIZE_IN_BYTES],
        pubkey: &[u8; BOOT_API_ECDSA_PUB_KEY_LEN_IN_BYTES],
        signature: &[u8; BOOT_API_ECDSA_SIGNATURE_LEN_IN_BYTES],
        ecc_algo: u32,
    ) -> u32 {
        // SAFETY: the buffers have the fixed sizes the ROM reads, and the
        // constructor contract guarantees the entry point is valid.
        unsafe {
            (self.entry)(
                hash.as_ptr(),
                pubkey.as_ptr(),
                signature.as_ptr(),
                ecc_algo,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    unsafe extern "C" fn rom_accepts_p256(
        _hash_in: *const u8,
        pubkey_in: *const u8,
        _signature: *const u8,
        ecc_algo: u32,
    ) -> u32 {
        if ecc_algo == BOOT_API_ECDSA_ALGO_TYPE_P256NIST && *pubkey_in == 0xAA {
            BOOT_API_RETURN_OK
        } else {
            0xFF
        }
    }

    #[test]
    fn test_entry_forwards_arguments() {
        let entry = unsafe { BootRomEntry::new(rom_accepts_p256) };
        let mut pubkey = [0u8; BOOT_API_ECDSA_PUB_KEY_LEN_IN_BYTES];
        pubkey[0] = 0xAA;
        let hash = [0u8; BOOT_API_SHA256_DIGEST_SIZE_IN_BYTES];
        let sig = [0u8; BOOT_API_ECDSA_SIGNATURE_LEN_IN_BYTES];

        assert_eq!(
            entry.ecdsa_verify_signature(&hash, &pubkey, &sig, BOOT_API_ECDSA_ALGO_TYPE_P256NIST),
            BOOT_API_RETURN_OK
        );
        assert_ne!(
            entry.ecdsa_verify_signature(
                &hash,
                &pubkey,
                &sig,
                BOOT_API_ECDSA_ALGO_TYPE_BRAINPOOL256
            ),
            BOOT_API_RETURN_OK
        );
    }
}
