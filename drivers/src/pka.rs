/*++

Licensed under the Apache-2.0 license.

File Name:

    pka.rs

Abstract:

    File contains the call contract of the public key accelerator.

--*/

use crate::{BootCryptResult, Engine};

/// Curves the PKA can be programmed with
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PkaEcdsaCurve {
    NistP256,
    BrainpoolP256t1,
}

/// Public key accelerator
pub trait Pka: Engine {
    /// Initialize the accelerator. Called once from library init.
    fn init(&mut self) -> BootCryptResult<()>;

    /// Verify an ECDSA signature over a pre-computed hash.
    ///
    /// # Arguments
    ///
    /// * `hash`  - Message digest
    /// * `sig_r` - Signature `r` component
    /// * `sig_s` - Signature `s` component
    /// * `pk_x`  - Public key X coordinate
    /// * `pk_y`  - Public key Y coordinate
    /// * `curve` - Curve to program
    ///
    /// # Returns
    ///
    /// * `Ok(())` only if the signature is valid
    fn ecdsa_verify(
        &mut self,
        hash: &[u8],
        sig_r: &[u8],
        sig_s: &[u8],
        pk_x: &[u8],
        pk_y: &[u8],
        curve: PkaEcdsaCurve,
    ) -> BootCryptResult<()>;
}
