/*++

Licensed under the Apache-2.0 license.

File Name:

    mmap.rs

Abstract:

    File contains the call contract of the dynamic translation table manager.

--*/

use crate::BootCryptResult;

bitflags::bitflags! {
    /// Memory region attributes
    pub struct MemAttr : u32 {
        const MEMORY = 0b0001;
        const EXECUTE = 0b0100;
        const SECURE = 0b1000;

        /// Read-only executable normal memory
        const CODE = Self::MEMORY.bits | Self::EXECUTE.bits;
    }
}

/// Dynamic memory region manager
pub trait RegionMapper {
    /// Map a region
    ///
    /// # Arguments
    ///
    /// * `base_pa` - Physical base address
    /// * `base_va` - Virtual base address
    /// * `size`    - Region size in bytes
    /// * `attr`    - Region attributes
    fn add_dynamic_region(
        &mut self,
        base_pa: u64,
        base_va: usize,
        size: usize,
        attr: MemAttr,
    ) -> BootCryptResult<()>;

    /// Unmap a region previously mapped with `add_dynamic_region`
    fn remove_dynamic_region(&mut self, base_va: usize, size: usize) -> BootCryptResult<()>;
}
