//! TX descriptor for frame transmission.

use super::bits::{tx_cmd, tx_status};
use super::{Descriptor, Ownership, VolatileCell};
use crate::hal::memory::PhysAddr;

/// Legacy transmit descriptor (16 bytes)
#[repr(C)]
pub struct TxDescriptor {
    /// Physical address of the packet buffer
    addr: VolatileCell<u64>,
    /// Bytes to send
    length: VolatileCell<u16>,
    /// Checksum offset
    cso: VolatileCell<u8>,
    /// Command bits (`EOP`, `IFCS`, `RS`, ...)
    cmd: VolatileCell<u8>,
    /// Status bits (`DD`, ...)
    status: VolatileCell<u8>,
    /// Checksum start
    css: VolatileCell<u8>,
    /// VLAN tag
    special: VolatileCell<u16>,
}

#[allow(dead_code)]
impl TxDescriptor {
    /// Size of the descriptor in bytes
    pub const SIZE: usize = 16;

    /// Create a new zeroed TX descriptor.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            addr: VolatileCell::new(0),
            length: VolatileCell::new(0),
            cso: VolatileCell::new(0),
            cmd: VolatileCell::new(0),
            status: VolatileCell::new(0),
            css: VolatileCell::new(0),
            special: VolatileCell::new(0),
        }
    }

    /// Hand `len` bytes of the bound buffer to the device as one frame.
    pub fn submit(&self, len: usize) {
        self.length.set(len as u16);
        self.cso.set(0);
        self.css.set(0);
        self.special.set(0);
        self.cmd.set(tx_cmd::SINGLE_FRAME);
        self.status.set(0);
    }

    /// Length of the last submitted frame.
    #[inline(always)]
    #[must_use]
    pub fn length(&self) -> usize {
        self.length.get() as usize
    }

    /// Get raw command bits.
    #[inline(always)]
    #[must_use]
    pub fn raw_cmd(&self) -> u8 {
        self.cmd.get()
    }

    /// Get raw status bits.
    #[inline(always)]
    #[must_use]
    pub fn raw_status(&self) -> u8 {
        self.status.get()
    }

    /// Check if the frame hit a collision limit or underrun.
    #[inline(always)]
    #[must_use]
    pub fn has_error(&self) -> bool {
        (self.status.get() & (tx_status::EC | tx_status::LC | tx_status::TU)) != 0
    }

    /// Report completion the way the device does.
    #[cfg(test)]
    pub(crate) fn simulate_complete(&self) {
        self.status.update(|s| s | tx_status::DD);
    }
}

impl Descriptor for TxDescriptor {
    fn blank() -> Self {
        Self::new()
    }

    fn attach(&self, buffer: PhysAddr) {
        self.addr.set(buffer);
        self.length.set(0);
        self.cso.set(0);
        self.cmd.set(0);
        self.css.set(0);
        self.special.set(0);
        self.status.set(tx_status::DD);
    }

    #[inline(always)]
    fn buffer_addr(&self) -> PhysAddr {
        self.addr.get()
    }

    #[inline(always)]
    fn ownership(&self) -> Ownership {
        Ownership::from_status(self.status.get())
    }
}

impl Default for TxDescriptor {
    fn default() -> Self {
        Self::new()
    }
}

// Safety: TxDescriptor uses volatile cells for all DMA-accessed fields
unsafe impl Sync for TxDescriptor {}
unsafe impl Send for TxDescriptor {}
