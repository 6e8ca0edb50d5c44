/*++

Licensed under the Apache-2.0 license.

File Name:

    guard.rs

Abstract:

    File contains the scoped exclusive use of a hardware engine.

--*/

use bootcrypt_drivers::Engine;
use core::ops::{Deref, DerefMut};

/// Exclusive use of an engine. The engine is returned to its idle state when
/// the guard goes out of scope, whatever the exit path.
pub struct EngineGuard<'a, E: Engine + ?Sized> {
    engine: &'a mut E,
}

impl<'a, E: Engine + ?Sized> EngineGuard<'a, E> {
    /// Acquire the engine
    pub fn new(engine: &'a mut E) -> Self {
        Self { engine }
    }
}

impl<E: Engine + ?Sized> Deref for EngineGuard<'_, E> {
    type Target = E;

    fn deref(&self) -> &E {
        self.engine
    }
}

impl<E: Engine + ?Sized> DerefMut for EngineGuard<'_, E> {
    fn deref_mut(&mut self) -> &mut E {
        self.engine
    }
}

impl<E: Engine + ?Sized> Drop for EngineGuard<'_, E> {
    /// Release the engine.
    fn drop(&mut self) {
        self.engine.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        used: usize,
        zeroized: usize,
    }

    impl Engine for Counter {
        fn zeroize(&mut self) {
            self.zeroized += 1;
        }
    }

    fn two_steps(counter: &mut Counter, fail_first: bool) -> Result<(), ()> {
        let mut op = EngineGuard::new(counter);
        op.used += 1;
        if fail_first {
            return Err(());
        }
        op.used += 1;
        Ok(())
    }

    #[test]
    fn test_release_on_early_return() {
        let mut counter = Counter::default();
        assert!(two_steps(&mut counter, true).is_err());
        assert_eq!(counter.used, 1);
        assert_eq!(counter.zeroized, 1);

        assert!(two_steps(&mut counter, false).is_ok());
        assert_eq!(counter.used, 3);
        assert_eq!(counter.zeroized, 2);
    }
}
