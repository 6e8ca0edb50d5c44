/*++

Licensed under the Apache-2.0 license.

File Name:

    saes.rs

Abstract:

    File contains the call contract of the secure AES accelerator.

    The engine keeps the chaining context of the operation in progress; a
    single operation is init -> associated data -> payload -> tag.

--*/

use crate::{BootCryptResult, Engine};

/// AES block size in bytes
pub const AES_BLOCK_SIZE_BYTES: usize = 16;

/// Chaining mode
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SaesMode {
    Gcm,
}

/// Source of the key loaded into the engine
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SaesKeySelection {
    /// Key bytes supplied by software
    Soft,

    /// Derived hardware unique key
    Dhuk,

    /// Key wrapped by the DHUK
    Wrapped,
}

/// Secure AES accelerator
pub trait Saes: Engine {
    /// Initialize the engine. Called once from library init.
    fn init_driver(&mut self) -> BootCryptResult<()>;

    /// Returns true if the engine can take a key handle instead of key bytes
    fn supports_key_handles(&self) -> bool;

    /// Start an operation
    ///
    /// # Arguments
    ///
    /// * `decrypt` - Decrypt when true, encrypt otherwise
    /// * `mode`    - Chaining mode
    /// * `key_sel` - Key source
    /// * `key`     - Key bytes, used with `SaesKeySelection::Soft`
    /// * `iv`      - Initial counter block (16 bytes for GCM)
    fn init(
        &mut self,
        decrypt: bool,
        mode: SaesMode,
        key_sel: SaesKeySelection,
        key: &[u8],
        iv: &[u8],
    ) -> BootCryptResult<()>;

    /// Feed associated data
    ///
    /// # Arguments
    ///
    /// * `last` - No more associated data follows
    /// * `data` - Associated data, may be empty
    fn update_assodata(&mut self, last: bool, data: &[u8]) -> BootCryptResult<()>;

    /// Process payload in place
    ///
    /// # Arguments
    ///
    /// * `last` - No more payload follows
    /// * `data` - Payload, replaced by the engine output
    fn update_load(&mut self, last: bool, data: &mut [u8]) -> BootCryptResult<()>;

    /// Finish the operation and read the authentication tag
    ///
    /// # Arguments
    ///
    /// * `tag` - Output buffer, at most one AES block
    fn final_tag(&mut self, tag: &mut [u8]) -> BootCryptResult<()>;
}
