/*++

Licensed under the Apache-2.0 license.

File Name:

    rng.rs

Abstract:

    File contains the call contract of the hardware random number generator.

--*/

use crate::BootCryptResult;

/// Hardware random number generator
pub trait Rng {
    /// Initialize the generator. Called once from library init.
    fn init(&mut self) -> BootCryptResult<()>;
}
