/*++

Licensed under the Apache-2.0 license.

File Name:

    hash.rs

Abstract:

    File contains the call contract of the hash accelerator.

--*/

use crate::{BootCryptResult, Engine};

/// SHA-256 digest size in bytes
pub const SHA256_DIGEST_BYTE_SIZE: usize = 32;

/// SHA-256 Digest
pub type Sha256Digest = [u8; SHA256_DIGEST_BYTE_SIZE];

/// Hash algorithm programmed into the engine
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HashAlgo {
    Sha1,
    Sha224,
    Sha256,
    Md5,
}

impl HashAlgo {
    /// Digest size in bytes
    pub fn digest_size(&self) -> usize {
        match self {
            HashAlgo::Sha1 => 20,
            HashAlgo::Sha224 => 28,
            HashAlgo::Sha256 => SHA256_DIGEST_BYTE_SIZE,
            HashAlgo::Md5 => 16,
        }
    }
}

/// Hash accelerator
pub trait HashEngine: Engine {
    /// Register the engine with the platform. Called once from library init.
    fn register(&mut self) -> BootCryptResult<()>;

    /// Start a digest operation
    ///
    /// # Arguments
    ///
    /// * `algo` - Algorithm to program
    fn init(&mut self, algo: HashAlgo) -> BootCryptResult<()>;

    /// Feed the last (and possibly only) chunk of data and read the digest.
    ///
    /// # Arguments
    ///
    /// * `data`   - Data to hash
    /// * `digest` - Output buffer, at least the digest size of the algorithm
    fn final_update(&mut self, data: &[u8], digest: &mut [u8]) -> BootCryptResult<()>;
}
