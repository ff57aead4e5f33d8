//! DMA Memory HAL
//!
//! The driver never owns an allocator. Descriptor rings and packet buffers
//! come from the kernel through [`DmaMemory`], which hands out physically
//! contiguous, page-aligned ranges and the kernel mappings that go with
//! them.

use core::ptr::NonNull;

use crate::driver::error::{DmaError, DmaResult};

/// Physical (bus) address as seen by the device
pub type PhysAddr = u64;

/// A contiguous range of physical memory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhysRange {
    /// First byte of the range
    pub base: PhysAddr,
    /// Length in bytes
    pub size: usize,
}

impl PhysRange {
    /// Create a range of `size` bytes starting at `base`
    pub const fn new(base: PhysAddr, size: usize) -> Self {
        Self { base, size }
    }

    /// One past the last byte of the range
    pub const fn end(&self) -> PhysAddr {
        self.base + self.size as PhysAddr
    }

    /// Whether the range is empty
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Low 32 bits of the base address
    pub const fn base_low(&self) -> u32 {
        self.base as u32
    }

    /// High 32 bits of the base address
    pub const fn base_high(&self) -> u32 {
        (self.base >> 32) as u32
    }
}

/// A packet buffer: kernel mapping plus the address the device sees
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DmaBuffer {
    /// Kernel virtual address
    pub virt: NonNull<u8>,
    /// Physical address programmed into the descriptor
    pub phys: PhysAddr,
}

impl DmaBuffer {
    /// Placeholder used while a ring's buffers are being allocated
    pub(crate) const DANGLING: Self = Self {
        virt: NonNull::dangling(),
        phys: 0,
    };

    /// Allocate a buffer of `size` bytes and resolve its physical address
    ///
    /// The buffer is returned to `memory` if it has no physical address.
    pub fn allocate<M: DmaMemory + ?Sized>(memory: &mut M, size: usize) -> DmaResult<Self> {
        let virt = memory.alloc_buffer(size)?;
        match memory.virt_to_phys(virt) {
            Some(phys) => Ok(Self { virt, phys }),
            None => {
                memory.free_buffer(virt, size);
                Err(DmaError::AddressTranslation)
            }
        }
    }
}

/// Kernel memory services used for descriptor rings and packet buffers
pub trait DmaMemory {
    /// Allocate `size` bytes of physically contiguous, page-aligned memory
    fn alloc_physical(&mut self, size: usize) -> DmaResult<PhysRange>;

    /// Map a physical range into the kernel address space
    fn map(&mut self, range: PhysRange) -> DmaResult<NonNull<u8>>;

    /// Map a device register window (uncached)
    ///
    /// Defaults to [`map`](Self::map) for kernels that identity-map MMIO.
    fn map_mmio(&mut self, range: PhysRange) -> DmaResult<NonNull<u8>> {
        self.map(range)
    }

    /// Allocate a page-granular, DMA-reachable buffer of `size` bytes
    fn alloc_buffer(&mut self, size: usize) -> DmaResult<NonNull<u8>>;

    /// Translate a kernel virtual address into a physical address
    fn virt_to_phys(&self, virt: NonNull<u8>) -> Option<PhysAddr>;

    /// Return a buffer obtained from [`alloc_buffer`](Self::alloc_buffer)
    fn free_buffer(&mut self, virt: NonNull<u8>, size: usize);

    /// Remove a mapping obtained from [`map`](Self::map)
    fn unmap(&mut self, virt: NonNull<u8>, range: PhysRange);

    /// Return a range obtained from [`alloc_physical`](Self::alloc_physical)
    fn free_physical(&mut self, range: PhysRange);
}

impl<M: DmaMemory + ?Sized> DmaMemory for &mut M {
    fn alloc_physical(&mut self, size: usize) -> DmaResult<PhysRange> {
        (**self).alloc_physical(size)
    }

    fn map(&mut self, range: PhysRange) -> DmaResult<NonNull<u8>> {
        (**self).map(range)
    }

    fn map_mmio(&mut self, range: PhysRange) -> DmaResult<NonNull<u8>> {
        (**self).map_mmio(range)
    }

    fn alloc_buffer(&mut self, size: usize) -> DmaResult<NonNull<u8>> {
        (**self).alloc_buffer(size)
    }

    fn virt_to_phys(&self, virt: NonNull<u8>) -> Option<PhysAddr> {
        (**self).virt_to_phys(virt)
    }

    fn free_buffer(&mut self, virt: NonNull<u8>, size: usize) {
        (**self).free_buffer(virt, size);
    }

    fn unmap(&mut self, virt: NonNull<u8>, range: PhysRange) {
        (**self).unmap(virt, range);
    }

    fn free_physical(&mut self, range: PhysRange) {
        (**self).free_physical(range);
    }
}
