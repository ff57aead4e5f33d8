//! Circular descriptor ring backed by kernel DMA memory.
//!
//! A ring owns one page-aligned physical region holding `N` descriptors and
//! `N` packet buffers, one per descriptor. The buffer bound to a descriptor
//! never changes for the lifetime of the ring.

use core::ptr::NonNull;

use super::descriptor::Descriptor;
use crate::driver::error::{DmaError, DmaResult};
use crate::hal::memory::{DmaBuffer, DmaMemory, PhysRange};
use crate::internal::constants::{DESCRIPTOR_SIZE, PACKET_BUFFER_SIZE, PAGE_SIZE, page_align_up};

/// Circular descriptor ring with wraparound index.
pub struct DescriptorRing<D: Descriptor, const N: usize> {
    /// Kernel mapping of the descriptor array
    descriptors: NonNull<D>,
    /// Physical region holding the descriptor array
    region: PhysRange,
    /// Packet buffer bound to each descriptor
    buffers: [DmaBuffer; N],
    /// Current index for processing
    current: usize,
}

impl<D: Descriptor, const N: usize> DescriptorRing<D, N> {
    /// Rejects ring sizes the device cannot be programmed with
    const VALID_SIZE: () = assert!(
        N > 0 && (N * DESCRIPTOR_SIZE) % PAGE_SIZE == 0,
        "descriptor ring must fill a whole number of pages"
    );

    /// Size of the descriptor array in bytes (the value written to xDLEN)
    pub const BYTES: usize = N * DESCRIPTOR_SIZE;

    /// Allocate the descriptor array and every packet buffer, then bind
    /// each descriptor to its buffer.
    ///
    /// Nothing is leaked on failure.
    pub fn allocate<M: DmaMemory + ?Sized>(memory: &mut M) -> DmaResult<Self> {
        let () = Self::VALID_SIZE;
        debug_assert_eq!(core::mem::size_of::<D>(), DESCRIPTOR_SIZE);

        let region = memory.alloc_physical(page_align_up(Self::BYTES))?;
        let base = match memory.map(region) {
            Ok(base) => base,
            Err(e) => {
                memory.free_physical(region);
                return Err(e);
            }
        };

        let mut buffers = [DmaBuffer::DANGLING; N];
        let mut filled = 0;
        while filled < N {
            match DmaBuffer::allocate(memory, PACKET_BUFFER_SIZE) {
                Ok(buffer) => {
                    buffers[filled] = buffer;
                    filled += 1;
                }
                Err(e) => {
                    free_buffers(memory, &buffers[..filled]);
                    memory.unmap(base, region);
                    memory.free_physical(region);
                    return Err(e);
                }
            }
        }

        let descriptors = base.cast::<D>();
        for (i, buffer) in buffers.iter().enumerate() {
            // SAFETY: the mapping covers N descriptors and is page aligned.
            unsafe { descriptors.as_ptr().add(i).write(D::blank()) };
            // SAFETY: written just above.
            unsafe { descriptors.add(i).as_ref() }.attach(buffer.phys);
        }

        Ok(Self {
            descriptors,
            region,
            buffers,
            current: 0,
        })
    }

    /// Return every buffer, the mapping and the physical region to `memory`.
    pub fn release<M: DmaMemory + ?Sized>(self, memory: &mut M) {
        free_buffers(memory, &self.buffers);
        memory.unmap(self.descriptors.cast(), self.region);
        memory.free_physical(self.region);
    }

    /// Get the number of descriptors in the ring
    #[inline(always)]
    #[must_use]
    pub const fn len(&self) -> usize {
        N
    }

    /// Check if the ring is empty (always false for a valid ring)
    #[inline(always)]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Get the current index
    #[inline(always)]
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    /// Advance the current index by one, wrapping around
    #[inline(always)]
    pub fn advance(&mut self) {
        self.current = (self.current + 1) % N;
    }

    /// Physical region holding the descriptor array
    #[inline(always)]
    pub const fn region(&self) -> PhysRange {
        self.region
    }

    /// Get a reference to the current descriptor
    #[inline(always)]
    pub fn current(&self) -> &D {
        self.get(self.current)
    }

    /// Get a reference to a descriptor at a specific index
    #[inline(always)]
    pub fn get(&self, index: usize) -> &D {
        // SAFETY: index is reduced modulo N and every slot was initialized
        // by `allocate`; the mapping lives as long as `self`.
        unsafe { self.descriptors.add(index % N).as_ref() }
    }

    /// Buffer bound to the descriptor at `index`
    #[inline(always)]
    pub fn buffer(&self, index: usize) -> &DmaBuffer {
        &self.buffers[index % N]
    }

    /// Packet bytes of the buffer at `index`
    #[inline(always)]
    pub fn buffer_bytes(&self, index: usize) -> &[u8] {
        let buffer = self.buffer(index);
        // SAFETY: each buffer is PACKET_BUFFER_SIZE bytes, owned by this
        // ring, and only read while its descriptor is software-owned.
        unsafe { core::slice::from_raw_parts(buffer.virt.as_ptr(), PACKET_BUFFER_SIZE) }
    }

    /// Mutable packet bytes of the buffer at `index`
    #[inline(always)]
    pub fn buffer_bytes_mut(&mut self, index: usize) -> &mut [u8] {
        let buffer = *self.buffer(index);
        // SAFETY: as for `buffer_bytes`; `&mut self` excludes other views.
        unsafe { core::slice::from_raw_parts_mut(buffer.virt.as_ptr(), PACKET_BUFFER_SIZE) }
    }

    /// Iterate over all descriptors
    pub fn iter(&self) -> impl Iterator<Item = &D> {
        (0..N).map(move |i| self.get(i))
    }
}

fn free_buffers<M: DmaMemory + ?Sized>(memory: &mut M, buffers: &[DmaBuffer]) {
    for buffer in buffers {
        memory.free_buffer(buffer.virt, PACKET_BUFFER_SIZE);
    }
}

impl<D: Descriptor, const N: usize> core::fmt::Debug for DescriptorRing<D, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DescriptorRing")
            .field("len", &N)
            .field("region", &self.region)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

// Safety: the ring exclusively owns its DMA region and buffers; the raw
// pointers are never shared outside the ring.
unsafe impl<D: Descriptor + Send, const N: usize> Send for DescriptorRing<D, N> {}

// =============================================================================
// Tests
// =============================================================================
