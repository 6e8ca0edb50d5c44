/*++

Licensed under the Apache-2.0 license.

File Name:

    ecc256.rs

Abstract:

    File contains the software model of the public key accelerator.

    Only NIST P-256 is modeled; other curves report the curve as not
    supported, like a PKA build without them.

--*/

use bootcrypt_drivers::{BootCryptError, BootCryptResult, Engine, Pka, PkaEcdsaCurve};
use p256::ecdsa::signature::hazmat::PrehashVerifier;
use p256::ecdsa::{Signature, VerifyingKey};
use p256::{EncodedPoint, FieldBytes};

/// ECC P-256 coordinate size in bytes
pub const ECC_256_COORD_SIZE: usize = 32;

/// Public key accelerator model
#[derive(Default)]
pub struct PkaModel {
    /// Set once `init` has been called
    pub initialized: bool,

    /// Fail initialization
    pub fail_init: bool,

    /// Number of verifications performed
    pub verify_count: usize,

    /// Curve the last verification was programmed with
    pub last_curve: Option<PkaEcdsaCurve>,

    /// Number of times the engine was returned to idle
    pub zeroize_count: usize,
}

impl PkaModel {
    /// Verify the signature
    ///
    /// # Arguments
    ///
    /// * `hash`      - Hash that was signed
    /// * `r`, `s`    - Signature
    /// * `x`, `y`    - Public key
    ///
    /// # Result
    ///
    /// * `true` if the signature is valid
    fn verify_p256(hash: &[u8], r: &[u8], s: &[u8], x: &[u8], y: &[u8]) -> bool {
        let point = EncodedPoint::from_affine_coordinates(
            FieldBytes::from_slice(x),
            FieldBytes::from_slice(y),
            false,
        );
        let Ok(verifying_key) = VerifyingKey::from_encoded_point(&point) else {
            return false;
        };
        let Ok(signature) =
            Signature::from_scalars(FieldBytes::clone_from_slice(r), FieldBytes::clone_from_slice(s))
        else {
            return false;
        };
        verifying_key.verify_prehash(hash, &signature).is_ok()
    }
}

impl Engine for PkaModel {
    fn zeroize(&mut self) {
        self.zeroize_count += 1;
    }
}

impl Pka for PkaModel {
    fn init(&mut self) -> BootCryptResult<()> {
        if self.fail_init {
            return Err(BootCryptError::DRIVER_PKA_INVALID_PARAM);
        }
        self.initialized = true;
        Ok(())
    }

    fn ecdsa_verify(
        &mut self,
        hash: &[u8],
        sig_r: &[u8],
        sig_s: &[u8],
        pk_x: &[u8],
        pk_y: &[u8],
        curve: PkaEcdsaCurve,
    ) -> BootCryptResult<()> {
        self.last_curve = Some(curve);
        if curve != PkaEcdsaCurve::NistP256 {
            return Err(BootCryptError::DRIVER_PKA_CURVE_NOT_SUPPORTED);
        }

        if [sig_r, sig_s, pk_x, pk_y]
            .iter()
            .any(|v| v.len() != ECC_256_COORD_SIZE)
            || hash.is_empty()
        {
            return Err(BootCryptError::DRIVER_PKA_INVALID_PARAM);
        }

        self.verify_count += 1;

        if Self::verify_p256(hash, sig_r, sig_s, pk_x, pk_y) {
            Ok(())
        } else {
            Err(BootCryptError::DRIVER_PKA_SIGNATURE_INVALID)
        }
    }
}
