/*++

Licensed under the Apache-2.0 license.

File Name:

    fatal.rs

Abstract:

    File contains the handling of unrecoverable configuration errors.

--*/

use bootcrypt_drivers::printer::HexU32;
use bootcrypt_drivers::{cprintln, Engine};
use bootcrypt_error::BootCryptError;

/// Report a fatal error, return the crypto engines to idle and halt the
/// boot stage
///
/// # Arguments
///
/// * `code`    - Error code
/// * `engines` - Engines to zeroize before halting
pub fn handle_fatal_error(code: BootCryptError, engines: &mut [&mut dyn Engine]) -> ! {
    cprintln!("Fatal Error: {}", HexU32(code.into()));

    for engine in engines.iter_mut() {
        engine.zeroize();
    }

    panic!("fatal error")
}
