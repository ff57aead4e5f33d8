//! Intel 8254x (e1000) Driver
//!
//! A `no_std`, `no_alloc` driver for the Intel 8254x family of PCI Ethernet
//! controllers (82540EM as emulated by QEMU, Bochs and VirtualBox; I217;
//! 82577LM), for use inside a hobby kernel.
//!
//! # Architecture
//!
//! The driver is organized into four layers:
//!
//! 1. **HAL Layer** ([`hal`]): register access over MMIO or port I/O, kernel
//!    DMA memory and interrupt registration, all as traits
//! 2. **Driver Layer** ([`driver`]): device discovery, EEPROM/MAC identity,
//!    the interrupt service routine and the [`E1000`] device itself
//! 3. **Node Layer** ([`node`]): the file-like surface the kernel exposes
//!    (readiness, one frame per read/write, I/O calls)
//! 4. **Sync Layer** ([`sync`]): [`SharedE1000`], the critical-section cell
//!    shared by tasks and the ISR
//!
//! Descriptor rings and packet buffers live in memory obtained from the
//! kernel through [`hal::DmaMemory`]; the crate never allocates.
//!
//! # Features
//!
//! - `critical-section` (default): Enable the ISR-safe `SharedE1000` wrapper
//! - `log`: Emit probe, packet and interrupt diagnostics through `log`
//! - `defmt`: Enable defmt formatting for value and error types
//! - `smoltcp`: Enable smoltcp network stack integration
//! - `x86_64`: Real `in`/`out` instructions for the I/O BAR backend
//!
//! # Example
//!
//! ```ignore
//! use e1000_nic::{E1000, E1000Config, PciDeviceInfo, SharedE1000Default};
//! use e1000_nic::hal::X86PortBus;
//!
//! static NIC: SharedE1000Default<X86PortBus> = SharedE1000Default::new();
//! e1000_nic::e1000_isr!(NIC_IRQ, NIC);
//!
//! fn init(info: &PciDeviceInfo, memory: &mut impl DmaMemory, delay: impl DelayNs) {
//!     if !E1000::<X86PortBus, 512, 256>::matches(info) {
//!         return;
//!     }
//!     NIC.probe(info, E1000Config::default(), X86PortBus, memory, delay).unwrap();
//!     NIC.attach(&mut kernel_irq_table(), NIC_IRQ).unwrap();
//! }
//! ```
//!
//! # Memory Requirements
//!
//! With the default configuration (512 RX, 256 TX descriptors, 8 KiB buffers):
//! - Descriptor rings: 12 KiB
//! - Packet buffers: 6 MiB

#![no_std]
#![deny(missing_docs)]
#![allow(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
// Clippy lint levels live here; thresholds and config are in clippy.toml.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements
)]

// =============================================================================
// Modules
// =============================================================================

pub mod driver;
pub mod hal;
pub mod node;

// Internal implementation details (pub(crate) only)
mod internal;

#[cfg(feature = "smoltcp")]
#[cfg_attr(docsrs, doc(cfg(feature = "smoltcp")))]
pub mod integration;

#[cfg(feature = "critical-section")]
#[cfg_attr(docsrs, doc(cfg(feature = "critical-section")))]
pub mod sync;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use driver::config::{
    Bar, DeviceConfig, E1000Config, PciDeviceInfo, ReceiveConfig, TransmitConfig,
};
pub use driver::error::{
    ConfigError, ConfigResult, DmaError, DmaResult, Error, IoError, IoResult, Result,
};
pub use driver::identity::{IdentitySource, MacAddress};
pub use driver::interrupt::{InterruptCause, InterruptStatus};
pub use driver::nic::{E1000, E1000Default, E1000Large, E1000Small};
pub use node::{DeviceNode, IoCall, NetworkState, NodeError, NodeResult};

// Re-export sync types when critical-section is enabled
#[cfg(feature = "critical-section")]
pub use sync::{SharedE1000, SharedE1000Default, SharedE1000Large, SharedE1000Small};

/// Low-level register offsets and bits for advanced use.
///
/// Most users should prefer the driver APIs. Writing registers directly
/// bypasses the ring cursors the driver keeps.
pub mod registers {
    pub use crate::internal::register::{
        CTRL_OFFSET, CTRL_SLU, EERD_OFFSET, ICR_OFFSET, IMC_OFFSET, IMS_OFFSET, RAH0_OFFSET,
        RAL0_OFFSET, RCTL_OFFSET, RDBAH_OFFSET, RDBAL_OFFSET, RDH_OFFSET, RDLEN_OFFSET, RDT_OFFSET,
        STATUS_FD, STATUS_LSC, STATUS_LU, STATUS_OFFSET, TCTL_OFFSET, TDBAH_OFFSET, TDBAL_OFFSET,
        TDH_OFFSET, TDLEN_OFFSET, TDT_OFFSET,
    };
}

/// Shared driver constants.
pub mod constants {
    pub use crate::internal::constants::{
        // Ring defaults
        DEFAULT_RX_DESCRIPTORS,
        DEFAULT_TX_DESCRIPTORS,
        // PCI identification
        DEVICE_ID_82540EM,
        DEVICE_ID_82577LM,
        DEVICE_ID_I217,
        INTEL_VENDOR_ID,
        SUPPORTED_DEVICE_IDS,
        // Frame/buffer sizes
        ETH_HEADER_LEN,
        MAC_ADDR_LEN,
        MAX_ETH_FRAME_SIZE,
        MAX_FRAME_SIZE,
        MTU,
        PACKET_BUFFER_SIZE,
    };
}

// =============================================================================
// Macro Helpers
// =============================================================================

/// Declare a static, ISR-safe e1000 instance.
///
/// # Examples
///
/// ```ignore
/// e1000_nic::e1000_static!(NIC, X86PortBus);
///
/// NIC.probe(&info, E1000Config::default(), X86PortBus, &mut memory, delay)?;
/// ```
#[cfg(feature = "critical-section")]
#[macro_export]
macro_rules! e1000_static {
    ($name:ident, $bus:ty) => {
        $crate::e1000_static!($name, $bus, 512, 256);
    };
    ($name:ident, $bus:ty, $rx:expr, $tx:expr) => {
        static $name: $crate::sync::SharedE1000<$bus, $rx, $tx> = $crate::sync::SharedE1000::new();
    };
}

/// Declare the interrupt handler for a static [`SharedE1000`].
///
/// Expands to a `const` of type [`hal::IrqHandler`] that runs
/// [`SharedE1000::handle_interrupt`], ready to pass to
/// [`SharedE1000::attach`].
///
/// # Examples
///
/// ```ignore
/// e1000_nic::e1000_isr!(NIC_IRQ, NIC);
/// NIC.attach(&mut irq_table, NIC_IRQ)?;
/// ```
#[cfg(feature = "critical-section")]
#[macro_export]
macro_rules! e1000_isr {
    ($name:ident, $shared:path) => {
        #[allow(non_upper_case_globals)]
        const $name: $crate::hal::IrqHandler = {
            fn __e1000_isr_internal() {
                let _ = $shared.handle_interrupt();
            }
            __e1000_isr_internal
        };
    };
}
