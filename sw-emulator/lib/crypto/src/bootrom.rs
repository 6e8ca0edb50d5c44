/*++

Licensed under the Apache-2.0 license.

File Name:

    bootrom.rs

Abstract:

    File contains a model of the boot ROM ECDSA verification service.

    The model only answers while the ROM region is mapped, and only knows
    NIST P-256.

--*/

use crate::ecc256::ECC_256_COORD_SIZE;
use bootcrypt_drivers::{
    BootRomVerifyService, BOOT_API_ECDSA_ALGO_TYPE_P256NIST, BOOT_API_ECDSA_PUB_KEY_LEN_IN_BYTES,
    BOOT_API_ECDSA_SIGNATURE_LEN_IN_BYTES, BOOT_API_RETURN_OK, BOOT_API_SHA256_DIGEST_SIZE_IN_BYTES,
};
use p256::ecdsa::signature::hazmat::PrehashVerifier;
use p256::ecdsa::{Signature, VerifyingKey};
use p256::{EncodedPoint, FieldBytes};
use std::cell::Cell;
use std::rc::Rc;

/// Status returned by the model on any failure
pub const BOOT_ROM_MODEL_FAILURE: u32 = 0xFF;

/// Boot ROM verification service model
pub struct BootRomModel {
    rom_mapped: Rc<Cell<bool>>,

    /// Number of calls made while the ROM was not mapped
    pub unmapped_calls: Cell<usize>,

    /// Number of calls answered
    pub calls: Cell<usize>,
}

impl BootRomModel {
    /// Create a new instance of `BootRomModel`
    ///
    /// # Arguments
    ///
    /// * `rom_mapped` - Flag that reads true while the ROM region is mapped
    pub fn new(rom_mapped: Rc<Cell<bool>>) -> Self {
        Self {
            rom_mapped,
            unmapped_calls: Cell::new(0),
            calls: Cell::new(0),
        }
    }
}

impl BootRomVerifyService for BootRomModel {
    fn ecdsa_verify_signature(
        &self,
        hash: &[u8; BOOT_API_SHA256_DIGEST_SIZE_IN_BYTES],
        pubkey: &[u8; BOOT_API_ECDSA_PUB_KEY_LEN_IN_BYTES],
        signature: &[u8; BOOT_API_ECDSA_SIGNATURE_LEN_IN_BYTES],
        ecc_algo: u32,
    ) -> u32 {
        if !self.rom_mapped.get() {
            self.unmapped_calls.set(self.unmapped_calls.get() + 1);
            return BOOT_ROM_MODEL_FAILURE;
        }
        self.calls.set(self.calls.get() + 1);

        if ecc_algo != BOOT_API_ECDSA_ALGO_TYPE_P256NIST {
            return BOOT_ROM_MODEL_FAILURE;
        }

        let (x, y) = pubkey.split_at(ECC_256_COORD_SIZE);
        let (r, s) = signature.split_at(ECC_256_COORD_SIZE);
        let point =
            EncodedPoint::from_affine_coordinates(FieldBytes::from_slice(x), FieldBytes::from_slice(y), false);
        let Ok(verifying_key) = VerifyingKey::from_encoded_point(&point) else {
            return BOOT_ROM_MODEL_FAILURE;
        };
        let Ok(signature) =
            Signature::from_scalars(FieldBytes::clone_from_slice(r), FieldBytes::clone_from_slice(s))
        else {
            return BOOT_ROM_MODEL_FAILURE;
        };

        match verifying_key.verify_prehash(hash, &signature) {
            Ok(()) => BOOT_API_RETURN_OK,
            Err(_) => BOOT_ROM_MODEL_FAILURE,
        }
    }
}
