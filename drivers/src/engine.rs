/*++

Licensed under the Apache-2.0 license.

File Name:

    engine.rs

Abstract:

    File contains the contract shared by all hardware crypto engines.

--*/

/// Hardware crypto engine
///
/// Engines are shared, single-owner resources. Every user must return the
/// engine to its idle state before giving it up, on success and error paths
/// alike, so the next operation never observes residual state.
pub trait Engine {
    /// Zeroize the engine context and return it to the idle state.
    ///
    /// Must be safe to call in any state, including mid-operation.
    fn zeroize(&mut self);
}
