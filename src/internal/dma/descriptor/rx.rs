//! RX descriptor for frame reception.

use super::bits::{rx_errors, rx_status};
use super::{Descriptor, Ownership, VolatileCell};
use crate::hal::memory::PhysAddr;

/// Legacy receive descriptor (16 bytes)
#[repr(C)]
pub struct RxDescriptor {
    /// Physical address of the packet buffer
    addr: VolatileCell<u64>,
    /// Bytes written by the device
    length: VolatileCell<u16>,
    /// Packet checksum
    checksum: VolatileCell<u16>,
    /// Status bits (`DD`, `EOP`, ...)
    status: VolatileCell<u8>,
    /// Error bits
    errors: VolatileCell<u8>,
    /// VLAN tag
    special: VolatileCell<u16>,
}

#[allow(dead_code)]
impl RxDescriptor {
    /// Size of the descriptor in bytes
    pub const SIZE: usize = 16;

    /// Create a new zeroed RX descriptor.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            addr: VolatileCell::new(0),
            length: VolatileCell::new(0),
            checksum: VolatileCell::new(0),
            status: VolatileCell::new(0),
            errors: VolatileCell::new(0),
            special: VolatileCell::new(0),
        }
    }

    /// Hand the slot back to the device.
    ///
    /// The buffer address is left untouched.
    #[inline(always)]
    pub fn release_to_hardware(&self) {
        self.length.set(0);
        self.errors.set(0);
        self.status.set(0);
    }

    /// Bytes of packet data in the buffer.
    #[inline(always)]
    #[must_use]
    pub fn packet_length(&self) -> usize {
        self.length.get() as usize
    }

    /// Check if this is the last descriptor of the frame.
    #[inline(always)]
    #[must_use]
    pub fn is_end_of_packet(&self) -> bool {
        (self.status.get() & rx_status::EOP) != 0
    }

    /// Check if the device flagged the frame as damaged.
    #[inline(always)]
    #[must_use]
    pub fn has_error(&self) -> bool {
        (self.errors.get() & rx_errors::FRAME_ERRORS) != 0
    }

    /// Get raw error bits.
    #[inline(always)]
    #[must_use]
    pub fn error_flags(&self) -> u8 {
        self.errors.get()
    }

    /// Get raw status bits.
    #[inline(always)]
    #[must_use]
    pub fn raw_status(&self) -> u8 {
        self.status.get()
    }

    /// Get the hardware-computed packet checksum.
    #[inline(always)]
    #[must_use]
    pub fn checksum(&self) -> u16 {
        self.checksum.get()
    }

    /// Get the VLAN tag field.
    #[inline(always)]
    #[must_use]
    pub fn special(&self) -> u16 {
        self.special.get()
    }

    /// Write back a received frame the way the device does.
    #[cfg(test)]
    pub(crate) fn simulate_receive(&self, len: usize) {
        self.length.set(len as u16);
        self.status.set(rx_status::DD | rx_status::EOP);
    }
}

impl Descriptor for RxDescriptor {
    fn blank() -> Self {
        Self::new()
    }

    fn attach(&self, buffer: PhysAddr) {
        self.addr.set(buffer);
        self.checksum.set(0);
        self.special.set(0);
        self.release_to_hardware();
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

impl Default for RxDescriptor {
    fn default() -> Self {
        Self::new()
    }
}

// Safety: RxDescriptor uses volatile cells for all DMA-accessed fields
unsafe impl Sync for RxDescriptor {}
unsafe impl Send for RxDescriptor {}
