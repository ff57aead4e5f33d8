//! Register Access HAL
//!
//! The e1000 exposes its register file either as a memory-mapped window or,
//! on older parts, through a pair of I/O ports (`IOADDR` at `base`, `IODATA`
//! at `base + 4`). [`RegisterIo`] hides the difference from the rest of the
//! driver; [`Registers`] is the closed set of backends, chosen once when the
//! device is discovered.
//!
//! Every call is a direct hardware access. Nothing is cached or batched, and
//! accesses stay in program order.

use crate::internal::register::{read_reg, write_reg};

// =============================================================================
// Register Access Trait
// =============================================================================

/// Uniform 32-bit register access at a byte offset within the device window
pub trait RegisterIo {
    /// Read the register at `offset`
    fn read(&self, offset: u16) -> u32;

    /// Write `value` to the register at `offset`
    fn write(&self, offset: u16, value: u32);

    /// Read-modify-write the register at `offset`
    #[inline]
    fn modify<F>(&self, offset: u16, f: F)
    where
        F: FnOnce(u32) -> u32,
    {
        let value = self.read(offset);
        self.write(offset, f(value));
    }

    /// Set bits in the register at `offset`
    #[inline]
    fn set_bits(&self, offset: u16, bits: u32) {
        self.modify(offset, |v| v | bits);
    }

    /// Clear bits in the register at `offset`
    #[inline]
    fn clear_bits(&self, offset: u16, bits: u32) {
        self.modify(offset, |v| v & !bits);
    }
}

impl<R: RegisterIo + ?Sized> RegisterIo for &R {
    #[inline]
    fn read(&self, offset: u16) -> u32 {
        (**self).read(offset)
    }

    #[inline]
    fn write(&self, offset: u16, value: u32) {
        (**self).write(offset, value);
    }
}

// =============================================================================
// Port Bus
// =============================================================================

/// 32-bit CPU port I/O (`in`/`out` instructions)
pub trait PortBus {
    /// Read a 32-bit value from `port`
    fn read_u32(&self, port: u16) -> u32;

    /// Write a 32-bit value to `port`
    fn write_u32(&self, port: u16, value: u32);
}

impl<P: PortBus + ?Sized> PortBus for &P {
    #[inline]
    fn read_u32(&self, port: u16) -> u32 {
        (**self).read_u32(port)
    }

    #[inline]
    fn write_u32(&self, port: u16, value: u32) {
        (**self).write_u32(port, value);
    }
}

/// Port bus backed by the x86 `in`/`out` instructions
#[cfg(feature = "x86_64")]
#[cfg_attr(docsrs, doc(cfg(feature = "x86_64")))]
#[derive(Debug, Clone, Copy, Default)]
pub struct X86PortBus;

#[cfg(feature = "x86_64")]
impl PortBus for X86PortBus {
    #[inline]
    fn read_u32(&self, port: u16) -> u32 {
        let mut p = x86_64::instructions::port::Port::<u32>::new(port);
        // SAFETY: the port range comes from the device's own I/O BAR.
        unsafe { p.read() }
    }

    #[inline]
    fn write_u32(&self, port: u16, value: u32) {
        let mut p = x86_64::instructions::port::Port::<u32>::new(port);
        // SAFETY: the port range comes from the device's own I/O BAR.
        unsafe { p.write(value) }
    }
}

/// Port bus placeholder for devices that only expose a memory window
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPortBus;

impl PortBus for NoPortBus {
    fn read_u32(&self, _port: u16) -> u32 {
        u32::MAX
    }

    fn write_u32(&self, _port: u16, _value: u32) {}
}

// =============================================================================
// Backends
// =============================================================================

/// Memory-mapped register window
#[derive(Debug)]
pub struct Mmio {
    base: usize,
}

impl Mmio {
    /// Create a window at the mapped virtual address `base`
    ///
    /// # Safety
    ///
    /// `base` must be the kernel mapping of the device's register BAR and
    /// stay mapped for the lifetime of the returned value.
    pub const unsafe fn new(base: usize) -> Self {
        Self { base }
    }

    /// Virtual base address of the window
    #[inline(always)]
    pub const fn base(&self) -> usize {
        self.base
    }
}

impl RegisterIo for Mmio {
    #[inline(always)]
    fn read(&self, offset: u16) -> u32 {
        // SAFETY: `new` guarantees the window covers every register offset.
        unsafe { read_reg(self.base + offset as usize) }
    }

    #[inline(always)]
    fn write(&self, offset: u16, value: u32) {
        // SAFETY: `new` guarantees the window covers every register offset.
        unsafe { write_reg(self.base + offset as usize, value) }
    }
}

/// Legacy indirect register access through `IOADDR`/`IODATA`
#[derive(Debug)]
pub struct PortIo<B: PortBus> {
    base: u16,
    bus: B,
}

impl<B: PortBus> PortIo<B> {
    /// Offset of `IODATA` from `IOADDR`
    pub const DATA_OFFSET: u16 = 4;

    /// Create an indirect window at I/O port `base`
    pub const fn new(base: u16, bus: B) -> Self {
        Self { base, bus }
    }

    /// I/O port of `IOADDR`
    #[inline(always)]
    pub const fn base(&self) -> u16 {
        self.base
    }
}

impl<B: PortBus> RegisterIo for PortIo<B> {
    #[inline]
    fn read(&self, offset: u16) -> u32 {
        self.bus.write_u32(self.base, offset as u32);
        self.bus.read_u32(self.base + Self::DATA_OFFSET)
    }

    #[inline]
    fn write(&self, offset: u16, value: u32) {
        self.bus.write_u32(self.base, offset as u32);
        self.bus.write_u32(self.base + Self::DATA_OFFSET, value);
    }
}

/// How the register file is reached, as recorded in the device configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterWindow {
    /// Memory-mapped window at a virtual address
    Mmio {
        /// Virtual base address
        base: usize,
    },
    /// Indirect access through I/O ports
    Port {
        /// `IOADDR` port
        base: u16,
    },
}

/// Register window selected at discovery
#[derive(Debug)]
pub enum Registers<B: PortBus> {
    /// Memory-mapped window
    Mmio(Mmio),
    /// Port-based window
    Port(PortIo<B>),
}

impl<B: PortBus> Registers<B> {
    /// Addressing mode of this window
    pub fn mode(&self) -> RegisterWindow {
        match self {
            Registers::Mmio(m) => RegisterWindow::Mmio { base: m.base() },
            Registers::Port(p) => RegisterWindow::Port { base: p.base() },
        }
    }
}

impl<B: PortBus> RegisterIo for Registers<B> {
    #[inline]
    fn read(&self, offset: u16) -> u32 {
        match self {
            Registers::Mmio(m) => m.read(offset),
            Registers::Port(p) => p.read(offset),
        }
    }

    #[inline]
    fn write(&self, offset: u16, value: u32) {
        match self {
            Registers::Mmio(m) => m.write(offset, value),
            Registers::Port(p) => p.write(offset, value),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    extern crate std;
    use std::vec;

    use super::*;
    use crate::internal::register::{RAH0_OFFSET, STATUS_OFFSET, TDT_OFFSET};
    use crate::testing::{MockPortBus, PortOp};

    #[test]
    fn mmio_write_then_read_returns_value() {
        let mut window = vec![0u32; 0x1600];
        // SAFETY: the vector outlives the window and covers every offset used.
        let mmio = unsafe { Mmio::new(window.as_mut_ptr() as usize) };

        mmio.write(TDT_OFFSET, 0x1234_5678);
        assert_eq!(mmio.read(TDT_OFFSET), 0x1234_5678);
        assert_eq!(window[TDT_OFFSET as usize / 4], 0x1234_5678);

        mmio.write(RAH0_OFFSET, 0xFFFF);
        assert_eq!(mmio.read(RAH0_OFFSET), 0xFFFF);
        assert_eq!(mmio.read(TDT_OFFSET), 0x1234_5678);
    }

    #[test]
    fn port_write_issues_exactly_two_port_operations() {
        let bus = MockPortBus::new(0xC000);
        let port = PortIo::new(0xC000, &bus);

        port.write(TDT_OFFSET, 7);

        assert_eq!(
            bus.ops(),
            vec![
                PortOp::Out(0xC000, TDT_OFFSET as u32),
                PortOp::Out(0xC004, 7),
            ]
        );
    }

    #[test]
    fn port_read_selects_index_then_reads_data() {
        let bus = MockPortBus::new(0xC000);
        bus.set_register(STATUS_OFFSET, 0x8000_0003);
        let port = PortIo::new(0xC000, &bus);

        assert_eq!(port.read(STATUS_OFFSET), 0x8000_0003);
        assert_eq!(
            bus.ops(),
            vec![
                PortOp::Out(0xC000, STATUS_OFFSET as u32),
                PortOp::In(0xC004),
            ]
        );
    }

    #[test]
    fn registers_enum_reports_mode() {
        let mut window = vec![0u32; 16];
        let base = window.as_mut_ptr() as usize;
        // SAFETY: only the mode is inspected; no register is accessed.
        let mmio: Registers<NoPortBus> = Registers::Mmio(unsafe { Mmio::new(base) });
        assert_eq!(mmio.mode(), RegisterWindow::Mmio { base });

        let port: Registers<NoPortBus> = Registers::Port(PortIo::new(0xD000, NoPortBus));
        assert_eq!(port.mode(), RegisterWindow::Port { base: 0xD000 });
    }

    #[test]
    fn set_and_clear_bits_are_read_modify_write() {
        let bus = MockPortBus::new(0x100);
        bus.set_register(STATUS_OFFSET, 0b1010);
        let port = PortIo::new(0x100, &bus);

        port.set_bits(STATUS_OFFSET, 0b0001);
        assert_eq!(port.read(STATUS_OFFSET), 0b1011);

        port.clear_bits(STATUS_OFFSET, 0b1000);
        assert_eq!(port.read(STATUS_OFFSET), 0b0011);
    }
}
