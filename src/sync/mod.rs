//! Synchronization and Concurrency Support
//!
//! This module provides the critical-section primitive and the ISR-safe
//! wrapper that owns a probed device:
//!
//! - **Primitives** (`primitives`): [`CriticalSectionCell`] - ISR-safe
//!   interior mutability
//! - **Shared Wrapper** (`shared`): [`SharedE1000`] - the device instance
//!   shared by tasks and the interrupt handler
//!
//! # Feature Flags
//!
//! - `critical-section`: Enables this module
//!
//! # Example
//!
//! ```ignore
//! use e1000_nic::sync::SharedE1000Default;
//!
//! static NIC: SharedE1000Default<X86PortBus> = SharedE1000Default::new();
//! e1000_nic::e1000_isr!(NIC_IRQ, NIC);
//!
//! fn task() {
//!     let mut frame = [0u8; 1518];
//!     if NIC.can_receive() {
//!         let len = NIC.receive(&mut frame).unwrap();
//!     }
//! }
//! ```

mod primitives;

pub use primitives::CriticalSectionCell;

mod shared;

pub use shared::{SharedE1000, SharedE1000Default, SharedE1000Large, SharedE1000Small};
