//! Legacy e1000 RX and TX descriptor structures.
//!
//! Each descriptor is 16 bytes, points at one packet buffer by physical
//! address, and carries status/command bits for CPU/DMA ownership
//! coordination. Ownership is derived from the "descriptor done" bit and
//! only changes through the transition methods on each descriptor type.

pub mod bits;
pub mod rx;
pub mod tx;

pub use rx::RxDescriptor;
pub use tx::TxDescriptor;

use crate::hal::memory::PhysAddr;

/// Volatile cell wrapper for descriptor fields
///
/// Ensures all accesses are volatile to prevent compiler optimization
/// from reordering or caching descriptor field accesses.
#[repr(transparent)]
pub(crate) struct VolatileCell<T: Copy> {
    value: core::cell::UnsafeCell<T>,
}

// Safety: descriptor fields are only touched inside the driver's critical
// section or by the device itself.
unsafe impl<T: Copy> Sync for VolatileCell<T> {}

impl<T: Copy> VolatileCell<T> {
    /// Create a new volatile cell with the given initial value
    #[inline(always)]
    pub const fn new(value: T) -> Self {
        Self {
            value: core::cell::UnsafeCell::new(value),
        }
    }

    /// Read the value (volatile read)
    #[inline(always)]
    pub fn get(&self) -> T {
        unsafe { core::ptr::read_volatile(self.value.get()) }
    }

    /// Write a value (volatile write)
    #[inline(always)]
    pub fn set(&self, value: T) {
        unsafe { core::ptr::write_volatile(self.value.get(), value) }
    }

    /// Update the value using a function (read-modify-write)
    #[inline(always)]
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(T) -> T,
    {
        let old = self.get();
        self.set(f(old));
    }
}

impl<T: Copy + Default> Default for VolatileCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Who may touch a descriptor and its buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ownership {
    /// The device may read or write the slot
    Hardware,
    /// The driver may read or write the slot
    Software,
}

impl Ownership {
    /// Derive ownership from a descriptor status byte
    #[inline(always)]
    pub const fn from_status(status: u8) -> Self {
        if status & bits::DD != 0 {
            Ownership::Software
        } else {
            Ownership::Hardware
        }
    }
}

/// Operations shared by both descriptor kinds, used by the ring
pub trait Descriptor {
    /// A zeroed descriptor
    fn blank() -> Self;

    /// Bind the descriptor to a buffer and put it in its initial state
    fn attach(&self, buffer: PhysAddr);

    /// Physical address of the bound buffer
    fn buffer_addr(&self) -> PhysAddr;

    /// Current owner of the slot
    fn ownership(&self) -> Ownership;

    /// Whether the device owns the slot
    #[inline(always)]
    fn is_owned(&self) -> bool {
        self.ownership() == Ownership::Hardware
    }
}
