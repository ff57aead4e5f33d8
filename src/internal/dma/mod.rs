//! DMA Engine
//!
//! This module provides the DMA engine for the e1000 receive and transmit
//! descriptor rings. Ring sizes are const generics; descriptor arrays and
//! packet buffers come from the kernel through
//! [`DmaMemory`](crate::hal::memory::DmaMemory).
//!
//! # Architecture
//!
//! - [`DmaEngine`]: owns both rings, programs their registers and runs the
//!   receive/transmit data path
//! - [`DescriptorRing`]: descriptor array, bound buffers and cursor
//! - [`RxDescriptor`] / [`TxDescriptor`]: legacy 16-byte descriptors with
//!   typed [`Ownership`]
//!
//! # Ownership protocol
//!
//! A slot belongs to the device until it sets the descriptor-done bit. The
//! driver copies data out of (or into) the buffer, flips the slot back with
//! the descriptor's transition method, and only then publishes the new tail.

pub(crate) mod descriptor;
mod engine;
pub(crate) mod ring;

pub use descriptor::{Descriptor, Ownership, RxDescriptor, TxDescriptor};
pub use engine::DmaEngine;
pub use ring::DescriptorRing;
