/*++

Licensed under the Apache-2.0 license.

File Name:

    sha256.rs

Abstract:

    File contains the software model of the hash accelerator.

--*/

use bootcrypt_drivers::{BootCryptError, BootCryptResult, Engine, HashAlgo, HashEngine};
use sha2::{Digest, Sha224, Sha256};

/// Hash accelerator model
#[derive(Default)]
pub struct HashModel {
    /// Algorithm of the operation in progress
    algo: Option<HashAlgo>,

    /// Set once `register` has been called
    pub registered: bool,

    /// Fail registration
    pub fail_register: bool,

    /// Fail the next `final_update`. The operation is left in progress.
    pub fail_final: bool,

    /// Number of times the engine was returned to idle
    pub zeroize_count: usize,
}

impl HashModel {
    /// Returns true if no operation is in progress
    pub fn is_idle(&self) -> bool {
        self.algo.is_none()
    }
}

impl Engine for HashModel {
    fn zeroize(&mut self) {
        self.algo = None;
        self.zeroize_count += 1;
    }
}

impl HashEngine for HashModel {
    fn register(&mut self) -> BootCryptResult<()> {
        if self.fail_register {
            return Err(BootCryptError::DRIVER_HASH_INVALID_STATE);
        }
        self.registered = true;
        Ok(())
    }

    fn init(&mut self, algo: HashAlgo) -> BootCryptResult<()> {
        match algo {
            HashAlgo::Sha224 | HashAlgo::Sha256 => {
                self.algo = Some(algo);
                Ok(())
            }
            _ => Err(BootCryptError::DRIVER_HASH_UNSUPPORTED_ALGO),
        }
    }

    fn final_update(&mut self, data: &[u8], digest: &mut [u8]) -> BootCryptResult<()> {
        if self.fail_final && self.algo.is_some() {
            self.fail_final = false;
            return Err(BootCryptError::DRIVER_HASH_INVALID_STATE);
        }

        let algo = self
            .algo
            .take()
            .ok_or(BootCryptError::DRIVER_HASH_INVALID_STATE)?;

        let out = digest
            .get_mut(..algo.digest_size())
            .ok_or(BootCryptError::DRIVER_HASH_INVALID_STATE)?;
        match algo {
            HashAlgo::Sha224 => out.copy_from_slice(&Sha224::digest(data)),
            _ => out.copy_from_slice(&Sha256::digest(data)),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_no_data() {
        let expected = [
            0xe3, 0xb0, 0xc4, 0x42, 0x98, 0xfc, 0x1c, 0x14, 0x9a, 0xfb, 0xf4, 0xc8, 0x99, 0x6f,
            0xb9, 0x24, 0x27, 0xae, 0x41, 0xe4, 0x64, 0x9b, 0x93, 0x4c, 0xa4, 0x95, 0x99, 0x1b,
            0x78, 0x52, 0xb8, 0x55,
        ];
        let mut model = HashModel::default();
        let mut digest = [0u8; 32];
        model.init(HashAlgo::Sha256).unwrap();
        model.final_update(&[], &mut digest).unwrap();
        assert_eq!(digest, expected);
        assert!(model.is_idle());
    }

    #[test]
    fn test_final_without_init() {
        let mut model = HashModel::default();
        let mut digest = [0u8; 32];
        assert_eq!(
            model.final_update(b"abc", &mut digest),
            Err(BootCryptError::DRIVER_HASH_INVALID_STATE)
        );
    }

    #[test]
    fn test_final_failure_keeps_operation() {
        let mut model = HashModel {
            fail_final: true,
            ..Default::default()
        };
        let mut digest = [0u8; 32];
        model.init(HashAlgo::Sha256).unwrap();
        assert_eq!(
            model.final_update(b"abc", &mut digest),
            Err(BootCryptError::DRIVER_HASH_INVALID_STATE)
        );
        assert!(!model.is_idle());
        model.zeroize();
        assert!(model.is_idle());
    }

    #[test]
    fn test_unsupported_algo() {
        let mut model = HashModel::default();
        assert_eq!(
            model.init(HashAlgo::Md5),
            Err(BootCryptError::DRIVER_HASH_UNSUPPORTED_ALGO)
        );
    }
}
