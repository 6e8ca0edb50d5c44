/*++

Licensed under the Apache-2.0 license.

File Name:

    mmap.rs

Abstract:

    File contains a translation table manager model that records every
    mapping request.

--*/

use bootcrypt_drivers::{BootCryptError, BootCryptResult, MemAttr, RegionMapper};
use std::cell::Cell;
use std::rc::Rc;

/// Mapping request seen by the model
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MapEvent {
    Add {
        base_pa: u64,
        base_va: usize,
        size: usize,
        attr: MemAttr,
    },
    Remove {
        base_va: usize,
        size: usize,
    },
}

/// Translation table manager model
#[derive(Default)]
pub struct RecordingMapper {
    /// Requests in call order
    pub events: Vec<MapEvent>,

    /// Fail the next `add_dynamic_region`
    pub fail_add: bool,

    mapped: Rc<Cell<bool>>,
}

impl RecordingMapper {
    /// Returns a handle that reads true while a region is mapped
    pub fn mapped_flag(&self) -> Rc<Cell<bool>> {
        self.mapped.clone()
    }

    /// Returns true while a region is mapped
    pub fn is_mapped(&self) -> bool {
        self.mapped.get()
    }
}

impl RegionMapper for RecordingMapper {
    fn add_dynamic_region(
        &mut self,
        base_pa: u64,
        base_va: usize,
        size: usize,
        attr: MemAttr,
    ) -> BootCryptResult<()> {
        self.events.push(MapEvent::Add {
            base_pa,
            base_va,
            size,
            attr,
        });
        if self.fail_add || self.mapped.get() {
            return Err(BootCryptError::DRIVER_MMAP_ADD_REGION);
        }
        self.mapped.set(true);
        Ok(())
    }

    fn remove_dynamic_region(&mut self, base_va: usize, size: usize) -> BootCryptResult<()> {
        self.events.push(MapEvent::Remove { base_va, size });
        if !self.mapped.get() {
            return Err(BootCryptError::DRIVER_MMAP_REMOVE_REGION);
        }
        self.mapped.set(false);
        Ok(())
    }
}
