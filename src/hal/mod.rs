//! Hardware Abstraction Layer
//!
//! Everything the driver needs from the CPU and the kernel, expressed as
//! traits so the same code runs against real hardware and host mocks.
//!
//! # Modules
//!
//! - [`regio`]: 32-bit register access over MMIO or legacy port I/O
//! - [`memory`]: physically contiguous DMA memory from the kernel
//! - [`irq`]: interrupt handler registration
//!
//! # Delay Integration
//!
//! Bounded polling (EEPROM reads) uses `embedded_hal::delay::DelayNs`
//! directly. Pass any delay implementation your kernel provides.

pub mod irq;
pub mod memory;
pub mod regio;

// Re-export commonly used types
pub use irq::{IrqDispatcher, IrqHandler};
pub use memory::{DmaBuffer, DmaMemory, PhysAddr, PhysRange};
#[cfg(feature = "x86_64")]
pub use regio::X86PortBus;
pub use regio::{Mmio, NoPortBus, PortBus, PortIo, RegisterIo, RegisterWindow, Registers};
