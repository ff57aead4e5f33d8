//! DMA engine managing the RX and TX descriptor rings.

use core::sync::atomic::{Ordering, fence};

use super::descriptor::{Descriptor, RxDescriptor, TxDescriptor};
use super::ring::DescriptorRing;
use crate::driver::error::{DmaError, DmaResult, IoError, Result};
use crate::hal::memory::DmaMemory;
use crate::hal::regio::RegisterIo;
use crate::internal::constants::PACKET_BUFFER_SIZE;
use crate::internal::register::{
    RCTL_EN, RCTL_OFFSET, RDBAH_OFFSET, RDBAL_OFFSET, RDH_OFFSET, RDLEN_OFFSET, RDT_OFFSET,
    TCTL_EN, TCTL_OFFSET, TDBAH_OFFSET, TDBAL_OFFSET, TDH_OFFSET, TDLEN_OFFSET, TDT_OFFSET,
};

#[cfg(feature = "log")]
use log::{trace, warn};

#[cfg(feature = "log")]
fn log_rx_error(desc: &RxDescriptor) {
    warn!(
        "RX frame error: status=0x{:02x} errors=0x{:02x} len={}",
        desc.raw_status(),
        desc.error_flags(),
        desc.packet_length()
    );
}

/// DMA engine over kernel-allocated rings.
///
/// # Type Parameters
/// * `RX` - Number of receive descriptors
/// * `TX` - Number of transmit descriptors
///
/// Both must fill a whole number of pages (`N * 16 % 4096 == 0`).
pub struct DmaEngine<const RX: usize, const TX: usize> {
    /// RX descriptor ring
    rx_ring: DescriptorRing<RxDescriptor, RX>,
    /// TX descriptor ring
    tx_ring: DescriptorRing<TxDescriptor, TX>,
}

impl<const RX: usize, const TX: usize> DmaEngine<RX, TX> {
    /// Allocate both rings and their buffers.
    pub fn allocate<M: DmaMemory + ?Sized>(memory: &mut M) -> DmaResult<Self> {
        let rx_ring = DescriptorRing::allocate(memory)?;
        let tx_ring = match DescriptorRing::allocate(memory) {
            Ok(ring) => ring,
            Err(e) => {
                rx_ring.release(memory);
                return Err(e);
            }
        };
        Ok(Self { rx_ring, tx_ring })
    }

    /// Total DMA memory used by both rings in bytes.
    #[must_use]
    pub const fn memory_usage() -> usize {
        DescriptorRing::<RxDescriptor, RX>::BYTES
            + DescriptorRing::<TxDescriptor, TX>::BYTES
            + (RX + TX) * PACKET_BUFFER_SIZE
    }

    /// Program the receive ring registers and enable the receiver.
    ///
    /// Every descriptor is offered to the device: head at 0, tail at the
    /// last slot.
    pub fn init_rx<R: RegisterIo + ?Sized>(&mut self, regs: &R, rctl: u32) {
        let region = self.rx_ring.region();
        regs.write(RDBAL_OFFSET, region.base_low());
        regs.write(RDBAH_OFFSET, region.base_high());
        regs.write(RDLEN_OFFSET, DescriptorRing::<RxDescriptor, RX>::BYTES as u32);
        regs.write(RDH_OFFSET, 0);
        regs.write(RDT_OFFSET, (RX - 1) as u32);
        regs.write(RCTL_OFFSET, rctl);
    }

    /// Program the transmit ring registers and enable the transmitter.
    ///
    /// Head and tail both start at 0; the ring is empty.
    pub fn init_tx<R: RegisterIo + ?Sized>(&mut self, regs: &R, tctl: u32) {
        let region = self.tx_ring.region();
        regs.write(TDBAL_OFFSET, region.base_low());
        regs.write(TDBAH_OFFSET, region.base_high());
        regs.write(TDLEN_OFFSET, DescriptorRing::<TxDescriptor, TX>::BYTES as u32);
        regs.write(TDH_OFFSET, 0);
        regs.write(TDT_OFFSET, 0);
        regs.write(TCTL_OFFSET, tctl);
    }

    /// Disable both queues and clear the ring registers.
    pub fn stop<R: RegisterIo + ?Sized>(&self, regs: &R) {
        regs.clear_bits(RCTL_OFFSET, RCTL_EN);
        regs.clear_bits(TCTL_OFFSET, TCTL_EN);
        for offset in [
            RDBAL_OFFSET,
            RDBAH_OFFSET,
            RDLEN_OFFSET,
            RDH_OFFSET,
            RDT_OFFSET,
            TDBAL_OFFSET,
            TDBAH_OFFSET,
            TDLEN_OFFSET,
            TDH_OFFSET,
            TDT_OFFSET,
        ] {
            regs.write(offset, 0);
        }
    }

    /// Return both rings to `memory`. Call [`stop`](Self::stop) first.
    pub fn release<M: DmaMemory + ?Sized>(self, memory: &mut M) {
        self.rx_ring.release(memory);
        self.tx_ring.release(memory);
    }

    /// Check if a received frame is waiting at the RX cursor.
    pub fn rx_available(&self) -> bool {
        !self.rx_ring.current().is_owned()
    }

    /// Peek next frame length without consuming.
    pub fn peek_frame_length(&self) -> Option<usize> {
        let desc = self.rx_ring.current();
        if desc.is_owned() {
            return None;
        }
        Some(desc.packet_length().min(PACKET_BUFFER_SIZE))
    }

    /// Count received frames waiting in the ring.
    pub fn rx_frame_count(&self) -> usize {
        let start = self.rx_ring.current_index();
        (0..RX)
            .take_while(|&i| !self.rx_ring.get(start + i).is_owned())
            .count()
    }

    /// Receive a frame into `buffer`. Returns the number of bytes copied.
    ///
    /// A frame longer than `buffer` is left in the ring and
    /// [`IoError::BufferTooSmall`] is returned.
    pub fn receive<R: RegisterIo + ?Sized>(&mut self, regs: &R, buffer: &mut [u8]) -> Result<usize> {
        let idx = self.rx_ring.current_index();
        let desc = self.rx_ring.current();

        if desc.is_owned() {
            return Err(IoError::WouldBlock.into());
        }

        let frame_len = desc.packet_length().min(PACKET_BUFFER_SIZE);
        if buffer.len() < frame_len {
            #[cfg(feature = "log")]
            warn!("RX frame of {} bytes does not fit {} byte buffer", frame_len, buffer.len());
            return Err(IoError::BufferTooSmall.into());
        }

        #[cfg(feature = "log")]
        if desc.has_error() {
            log_rx_error(desc);
        }

        buffer[..frame_len].copy_from_slice(&self.rx_ring.buffer_bytes(idx)[..frame_len]);
        self.rx_ring.get(idx).release_to_hardware();
        self.rx_ring.advance();

        fence(Ordering::SeqCst);
        regs.write(RDT_OFFSET, idx as u32);

        #[cfg(feature = "log")]
        trace!("RX slot {} -> {} bytes", idx, frame_len);

        Ok(frame_len)
    }

    /// Check if the TX slot at the cursor is free.
    pub fn tx_available(&self) -> bool {
        !self.tx_ring.current().is_owned()
    }

    /// Count free TX descriptors starting at the cursor.
    pub fn tx_free_count(&self) -> usize {
        let start = self.tx_ring.current_index();
        (0..TX)
            .take_while(|&i| !self.tx_ring.get(start + i).is_owned())
            .count()
    }

    /// Transmit one frame. Returns the number of bytes queued.
    pub fn transmit<R: RegisterIo + ?Sized>(&mut self, regs: &R, data: &[u8]) -> Result<usize> {
        if data.is_empty() {
            return Err(DmaError::InvalidLength.into());
        }
        if data.len() > PACKET_BUFFER_SIZE {
            return Err(DmaError::FrameTooLarge.into());
        }

        let idx = self.tx_ring.current_index();
        if self.tx_ring.current().is_owned() {
            return Err(IoError::WouldBlock.into());
        }

        self.tx_ring.buffer_bytes_mut(idx)[..data.len()].copy_from_slice(data);
        self.tx_ring.get(idx).submit(data.len());
        self.tx_ring.advance();

        fence(Ordering::SeqCst);
        regs.write(TDT_OFFSET, self.tx_ring.current_index() as u32);

        #[cfg(feature = "log")]
        trace!("TX slot {} <- {} bytes", idx, data.len());

        Ok(data.len())
    }

    /// Current RX index (for debugging).
    pub fn rx_current_index(&self) -> usize {
        self.rx_ring.current_index()
    }

    /// Current TX index (for debugging).
    pub fn tx_current_index(&self) -> usize {
        self.tx_ring.current_index()
    }

    #[cfg(test)]
    pub(crate) fn rx_ring(&self) -> &DescriptorRing<RxDescriptor, RX> {
        &self.rx_ring
    }

    #[cfg(test)]
    pub(crate) fn tx_ring(&self) -> &DescriptorRing<TxDescriptor, TX> {
        &self.tx_ring
    }

    /// Place `data` in an RX buffer and mark it received, as the device would.
    #[cfg(test)]
    pub(crate) fn simulate_rx(&mut self, index: usize, data: &[u8]) {
        self.rx_ring.buffer_bytes_mut(index)[..data.len()].copy_from_slice(data);
        self.rx_ring.get(index).simulate_receive(data.len());
    }
}

impl<const RX: usize, const TX: usize> core::fmt::Debug for DmaEngine<RX, TX> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DmaEngine")
            .field("rx_ring", &self.rx_ring)
            .field("tx_ring", &self.tx_ring)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
