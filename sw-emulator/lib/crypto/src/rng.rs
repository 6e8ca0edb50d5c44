/*++

Licensed under the Apache-2.0 license.

File Name:

    rng.rs

Abstract:

    File contains the random number generator model.

--*/

use bootcrypt_drivers::{BootCryptError, BootCryptResult, Rng};

/// Random number generator model
#[derive(Default)]
pub struct RngModel {
    /// Set once `init` has been called
    pub initialized: bool,

    /// Report a hardware error on `init`
    pub fail: bool,
}

impl Rng for RngModel {
    fn init(&mut self) -> BootCryptResult<()> {
        if self.fail {
            return Err(BootCryptError::DRIVER_RNG_HW_ERROR);
        }
        self.initialized = true;
        Ok(())
    }
}
