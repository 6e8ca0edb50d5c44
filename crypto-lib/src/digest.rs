/*++

Licensed under the Apache-2.0 license.

File Name:

    digest.rs

Abstract:

    File contains the SHA-256 digest computation on the hash engine.

--*/

use crate::guard::EngineGuard;
use bootcrypt_drivers::{HashAlgo, HashEngine, Sha256Digest, SHA256_DIGEST_BYTE_SIZE};
use bootcrypt_error::BootCryptResult;

/// Calculate the SHA-256 digest of `data` in a single pass
///
/// # Arguments
///
/// * `engine` - Hash engine
/// * `data`   - Data to hash
///
/// # Returns
///
/// * `Sha256Digest` - Digest
pub fn sha256_digest<H: HashEngine + ?Sized>(
    engine: &mut H,
    data: &[u8],
) -> BootCryptResult<Sha256Digest> {
    let mut op = EngineGuard::new(engine);
    let mut digest = [0u8; SHA256_DIGEST_BYTE_SIZE];
    op.init(HashAlgo::Sha256)?;
    op.final_update(data, &mut digest)?;
    Ok(digest)
}
