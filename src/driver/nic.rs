//! Intel 8254x (e1000) Driver
//!
//! This module provides the main driver that ties the register window,
//! device identity and the DMA engine into one device instance with a
//! probe/shutdown lifecycle.

use core::ptr::NonNull;

use embedded_hal::delay::DelayNs;

use super::config::{Bar, DeviceConfig, E1000Config, PciDeviceInfo};
use super::error::{ConfigError, Error, Result};
use super::identity::{EepromReader, IdentitySource, MacAddress, detect_eeprom, read_mac_address};
use super::interrupt::{InterruptCause, InterruptStatus};
use crate::hal::memory::{DmaMemory, PhysRange};
use crate::hal::regio::{Mmio, PortBus, PortIo, RegisterIo, Registers};
use crate::internal::dma::DmaEngine;
use crate::internal::register::{
    CTRL_OFFSET, CTRL_SLU, ICR_OFFSET, IMC_ALL, IMC_OFFSET, IMS_ENABLE_ALL, IMS_ENABLE_DEFAULT,
    IMS_OFFSET, STATUS_LSC, STATUS_LU, STATUS_OFFSET,
};

#[cfg(feature = "log")]
use crate::internal::register::{TDH_OFFSET, TDT_OFFSET};
#[cfg(feature = "log")]
use log::{debug, trace};

// =============================================================================
// Register Window Mapping
// =============================================================================

/// MMIO mapping obtained at probe, returned at shutdown
#[derive(Debug, Clone, Copy)]
struct MmioMapping {
    virt: usize,
    range: PhysRange,
}

impl MmioMapping {
    fn unmap<M: DmaMemory + ?Sized>(self, memory: &mut M) {
        if let Some(virt) = NonNull::new(self.virt as *mut u8) {
            memory.unmap(virt, self.range);
        }
    }
}

// =============================================================================
// e1000 Driver
// =============================================================================

/// Intel 8254x (e1000) Driver
///
/// One value per device. It owns the register window and both descriptor
/// rings; every data-path call is synchronous with respect to local state.
///
/// # Type Parameters
/// * `B` - Port bus used when the device exposes an I/O BAR
/// * `RX` - Number of receive descriptors (multiple of 256)
/// * `TX` - Number of transmit descriptors (multiple of 256)
///
/// # Example
/// ```ignore
/// let mut nic = E1000Default::probe(&info, E1000Config::default(), X86PortBus, &mut memory, delay)?;
/// let mut frame = [0u8; 1518];
/// if nic.can_receive() {
///     let len = nic.receive(&mut frame)?;
/// }
/// ```
pub struct E1000<B: PortBus, const RX: usize, const TX: usize> {
    /// Register window chosen from BAR0
    regs: Registers<B>,
    /// Descriptor rings and data path
    dma: DmaEngine<RX, TX>,
    /// Facts discovered at probe
    device: DeviceConfig,
    /// Configuration used at probe
    config: E1000Config,
    /// Interrupt line
    irq: u8,
    /// MMIO mapping to release at shutdown
    mapping: Option<MmioMapping>,
}

impl<B: PortBus, const RX: usize, const TX: usize> E1000<B, RX, TX> {
    /// Check if `info` describes a device this driver handles
    #[must_use]
    pub fn matches(info: &PciDeviceInfo) -> bool {
        info.is_supported()
    }

    // =========================================================================
    // Probe / Shutdown
    // =========================================================================

    /// Bring up the device described by `info`
    ///
    /// This performs the full initialization sequence:
    /// 1. Select the register window from BAR0 (MMIO windows are mapped)
    /// 2. Detect the EEPROM and read the MAC address
    /// 3. Allocate and program the RX ring, then the TX ring
    /// 4. Unmask interrupts
    ///
    /// # Parameters
    /// * `info` - PCI function description
    /// * `config` - Driver configuration
    /// * `ports` - Port bus, used only for I/O BARs
    /// * `memory` - Kernel DMA memory services
    /// * `delay` - Delay provider implementing `embedded_hal::delay::DelayNs`
    pub fn probe<M, D>(
        info: &PciDeviceInfo,
        config: E1000Config,
        ports: B,
        memory: &mut M,
        delay: D,
    ) -> Result<Self>
    where
        M: DmaMemory + ?Sized,
        D: DelayNs,
    {
        if !Self::matches(info) {
            return Err(ConfigError::UnsupportedDevice.into());
        }

        let (regs, mapping) = match info.bar()? {
            Bar::Memory { base, size } => {
                let range = PhysRange::new(base, size);
                let virt = memory
                    .map_mmio(range)
                    .map_err(|_| ConfigError::InvalidBar)?;
                let mapping = MmioMapping {
                    virt: virt.as_ptr() as usize,
                    range,
                };
                // SAFETY: the kernel mapped the whole BAR at `virt`; it stays
                // mapped until `shutdown` unmaps it.
                let mmio = unsafe { Mmio::new(mapping.virt) };
                (Registers::Mmio(mmio), Some(mapping))
            }
            Bar::Io { base } => (Registers::Port(PortIo::new(base, ports)), None),
        };

        match Self::bring_up(regs, info.irq, config, memory, delay) {
            Ok(mut nic) => {
                nic.mapping = mapping;
                Ok(nic)
            }
            Err(e) => {
                if let Some(mapping) = mapping {
                    mapping.unmap(memory);
                }
                Err(e)
            }
        }
    }

    fn bring_up<M, D>(
        regs: Registers<B>,
        irq: u8,
        config: E1000Config,
        memory: &mut M,
        delay: D,
    ) -> Result<Self>
    where
        M: DmaMemory + ?Sized,
        D: DelayNs,
    {
        let eeprom_present = detect_eeprom(&regs);
        let mut eeprom = EepromReader::from_config(delay, eeprom_present, &config);
        let mac_address = read_mac_address(&regs, IdentitySource::select(eeprom_present), &mut eeprom)?;

        let device = DeviceConfig {
            window: regs.mode(),
            eeprom_present,
            mac_address,
        };

        #[cfg(feature = "log")]
        debug!("e1000: MAC {} (EEPROM present: {})", mac_address, eeprom_present);

        let dma = DmaEngine::allocate(memory).map_err(Error::from)?;
        let mut nic = Self {
            regs,
            dma,
            device,
            config,
            irq,
            mapping: None,
        };

        nic.dma.init_rx(&nic.regs, config.receive.rctl());
        nic.dma.init_tx(&nic.regs, config.transmit.tctl());
        nic.enable_interrupts();

        #[cfg(feature = "log")]
        debug!(
            "e1000: TX head {} tail {}",
            nic.regs.read(TDH_OFFSET),
            nic.regs.read(TDT_OFFSET)
        );

        Ok(nic)
    }

    /// Stop the device and return every resource taken at probe
    ///
    /// Interrupts are masked, both queues disabled, then the rings, buffers
    /// and the register mapping are released.
    pub fn shutdown<M: DmaMemory + ?Sized>(self, memory: &mut M) {
        self.disable_interrupts();
        self.dma.stop(&self.regs);
        self.dma.release(memory);
        if let Some(mapping) = self.mapping {
            mapping.unmap(memory);
        }
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// Facts discovered at probe
    #[inline(always)]
    pub fn device_config(&self) -> &DeviceConfig {
        &self.device
    }

    /// Station address
    #[inline(always)]
    pub fn mac_address(&self) -> MacAddress {
        self.device.mac_address
    }

    /// Whether a serial EEPROM was found
    #[inline(always)]
    pub fn eeprom_present(&self) -> bool {
        self.device.eeprom_present
    }

    /// Interrupt line from the PCI function
    #[inline(always)]
    pub fn irq(&self) -> u8 {
        self.irq
    }

    /// Configuration used at probe
    #[inline(always)]
    pub fn config(&self) -> &E1000Config {
        &self.config
    }

    // =========================================================================
    // Link
    // =========================================================================

    /// Set link up and restart auto-negotiation
    pub fn link_up(&self) {
        self.regs.set_bits(CTRL_OFFSET, CTRL_SLU);
    }

    /// Check the link-up bit in STATUS
    pub fn is_link_up(&self) -> bool {
        (self.regs.read(STATUS_OFFSET) & STATUS_LU) != 0
    }

    // =========================================================================
    // Interrupt Handling
    // =========================================================================

    /// Unmask device interrupts and clear anything pending
    ///
    /// Returns the causes that were pending.
    pub fn enable_interrupts(&self) -> InterruptCause {
        self.regs.write(IMS_OFFSET, IMS_ENABLE_ALL);
        self.regs.write(IMS_OFFSET, IMS_ENABLE_DEFAULT);
        InterruptCause::from_raw(self.regs.read(ICR_OFFSET))
    }

    /// Mask every device interrupt
    pub fn disable_interrupts(&self) {
        self.regs.write(IMC_OFFSET, IMC_ALL);
        self.regs.write(IMS_OFFSET, 0);
    }

    /// Handle interrupt (call from ISR)
    ///
    /// Masks device interrupts, acknowledges by reading STATUS and, on a
    /// link status change, sets link up again. Never blocks and does no
    /// packet processing. Interrupts stay masked until
    /// [`enable_interrupts`](Self::enable_interrupts).
    pub fn handle_interrupt(&self) -> InterruptStatus {
        self.regs.write(IMS_OFFSET, 0);
        let status = self.regs.read(STATUS_OFFSET);

        if status & STATUS_LSC != 0 {
            self.link_up();
        }

        #[cfg(feature = "log")]
        trace!("e1000: interrupt, status=0x{:08x}", status);

        InterruptStatus::from_raw(status)
    }

    // =========================================================================
    // TX / RX Operations
    // =========================================================================

    /// Check if a received frame is waiting
    #[inline(always)]
    pub fn can_receive(&self) -> bool {
        self.dma.rx_available()
    }

    /// Get the length of the next available frame
    pub fn peek_rx_length(&self) -> Option<usize> {
        self.dma.peek_frame_length()
    }

    /// Receive a frame
    ///
    /// Copies received frame data to the provided buffer and hands the slot
    /// back to the device. Returns the frame length.
    ///
    /// # Errors
    /// - `WouldBlock` - No frame available
    /// - `BufferTooSmall` - Buffer smaller than frame (the frame stays queued)
    pub fn receive(&mut self, buffer: &mut [u8]) -> Result<usize> {
        self.dma.receive(&self.regs, buffer)
    }

    /// Check if the next TX slot is free
    #[inline(always)]
    pub fn can_transmit(&self) -> bool {
        self.dma.tx_available()
    }

    /// Transmit a frame
    ///
    /// Copies the frame into the next TX buffer and hands it to the device.
    /// Returns the number of bytes submitted.
    ///
    /// # Errors
    /// - `InvalidLength` - Empty frame
    /// - `FrameTooLarge` - Frame exceeds the packet buffer
    /// - `WouldBlock` - TX slot still owned by the device
    pub fn transmit(&mut self, data: &[u8]) -> Result<usize> {
        self.dma.transmit(&self.regs, data)
    }

    // =========================================================================
    // Debug / Statistics
    // =========================================================================

    /// Get the number of free TX descriptors at the cursor
    pub fn tx_descriptors_available(&self) -> usize {
        self.dma.tx_free_count()
    }

    /// Get the number of received frames waiting
    pub fn rx_frames_waiting(&self) -> usize {
        self.dma.rx_frame_count()
    }

    /// Get total DMA memory used by this instance
    pub const fn memory_usage() -> usize {
        DmaEngine::<RX, TX>::memory_usage()
    }

    #[cfg(test)]
    pub(crate) fn dma(&self) -> &DmaEngine<RX, TX> {
        &self.dma
    }

    #[cfg(test)]
    pub(crate) fn dma_mut(&mut self) -> &mut DmaEngine<RX, TX> {
        &mut self.dma
    }
}

impl<B: PortBus, const RX: usize, const TX: usize> core::fmt::Debug for E1000<B, RX, TX> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("E1000")
            .field("device", &self.device)
            .field("irq", &self.irq)
            .field("dma", &self.dma)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Type Aliases
// =============================================================================

/// Default configuration: 512 RX and 256 TX descriptors
pub type E1000Default<B> = E1000<B, 512, 256>;

/// Small configuration: one page of descriptors per ring
pub type E1000Small<B> = E1000<B, 256, 256>;

/// Large configuration for high-throughput use
pub type E1000Large<B> = E1000<B, 1024, 512>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::error::{DmaError, IoError};
    use crate::hal::regio::{NoPortBus, RegisterWindow};
    use crate::internal::constants::{DEVICE_ID_82540EM, INTEL_VENDOR_ID};
    use crate::internal::register::{
        EERD_OFFSET, RAH0_OFFSET, RAL0_OFFSET, RCTL_OFFSET, RDBAL_OFFSET, RDT_OFFSET,
        TCTL_OFFSET, TDT_OFFSET,
    };
    use crate::testing::{MockDelay, MockDmaMemory, SimulatedE1000};

    const IO_BASE: u16 = 0xC000;

    type TestNic<'a> = E1000<&'a SimulatedE1000, 256, 256>;

    fn io_info() -> PciDeviceInfo {
        PciDeviceInfo {
            vendor: INTEL_VENDOR_ID,
            device: DEVICE_ID_82540EM,
            bar0: IO_BASE as u32 | 1,
            bar0_size: 64,
            irq: 11,
        }
    }

    fn mmio_info() -> PciDeviceInfo {
        PciDeviceInfo {
            vendor: INTEL_VENDOR_ID,
            device: DEVICE_ID_82540EM,
            bar0: 0xFEBC_0000,
            bar0_size: 0x20000,
            irq: 11,
        }
    }

    fn sim() -> SimulatedE1000 {
        SimulatedE1000::new()
            .with_port_base(IO_BASE)
            .with_eeprom(&[0x5452, 0x1200, 0x5634])
    }

    #[test]
    fn probe_over_port_io_discovers_identity() {
        let sim = sim();
        let mut memory = MockDmaMemory::new();

        let nic = TestNic::probe(&io_info(), E1000Config::new(), &sim, &mut memory, MockDelay::new()).unwrap();

        assert_eq!(nic.mac_address().octets(), [0x52, 0x54, 0x00, 0x12, 0x34, 0x56]);
        assert!(nic.eeprom_present());
        assert_eq!(nic.device_config().window, RegisterWindow::Port { base: IO_BASE });
        assert_eq!(nic.irq(), 11);

        nic.shutdown(&mut memory);
    }

    #[test]
    fn probe_programs_rings_and_interrupts() {
        let sim = sim();
        let mut memory = MockDmaMemory::new();
        let config = E1000Config::new();

        let nic = TestNic::probe(&io_info(), config, &sim, &mut memory, MockDelay::new()).unwrap();

        assert_eq!(sim.register(RCTL_OFFSET), config.receive.rctl());
        assert_eq!(sim.register(TCTL_OFFSET), config.transmit.tctl());
        assert_eq!(sim.register(RDT_OFFSET), 255);
        assert_eq!(sim.register(TDT_OFFSET), 0);
        assert!(sim.writes_to(CTRL_OFFSET).is_empty());
        assert_eq!(sim.writes_to(IMS_OFFSET), [IMS_ENABLE_ALL, IMS_ENABLE_DEFAULT]);
        assert!(nic.can_transmit());
        assert!(!nic.can_receive());

        nic.shutdown(&mut memory);
    }

    #[test]
    fn probe_unmasks_interrupts_after_both_rings() {
        let sim = sim();
        let mut memory = MockDmaMemory::new();

        let nic = TestNic::probe(&io_info(), E1000Config::new(), &sim, &mut memory, MockDelay::new()).unwrap();

        let writes = sim.writes();
        let first = |offset: u16| writes.iter().position(|&(o, _)| o == offset).unwrap();
        let last = |offset: u16| writes.iter().rposition(|&(o, _)| o == offset).unwrap();
        assert!(last(RDBAL_OFFSET) < first(IMS_OFFSET));
        assert!(last(RCTL_OFFSET) < first(IMS_OFFSET));
        assert!(last(TCTL_OFFSET) < first(IMS_OFFSET));
        assert!(last(TDT_OFFSET) < first(IMS_OFFSET));

        nic.shutdown(&mut memory);
    }

    #[test]
    fn probe_without_eeprom_reads_receive_address() {
        let sim = SimulatedE1000::new().with_port_base(IO_BASE);
        sim.set_register(RAL0_OFFSET, 0x5634_1200);
        sim.set_register(RAH0_OFFSET, 0x0000_BC9A);
        let mut memory = MockDmaMemory::new();

        let nic = TestNic::probe(&io_info(), E1000Config::new(), &sim, &mut memory, MockDelay::new()).unwrap();

        assert!(!nic.eeprom_present());
        assert_eq!(nic.mac_address().octets(), [0x00, 0x12, 0x34, 0x56, 0x9A, 0xBC]);

        nic.shutdown(&mut memory);
    }

    #[test]
    fn probe_rejects_unsupported_device() {
        let sim = sim();
        let mut memory = MockDmaMemory::new();
        let mut info = io_info();
        info.device = 0x1234;

        let result = TestNic::probe(&info, E1000Config::new(), &sim, &mut memory, MockDelay::new());

        assert!(matches!(result, Err(Error::Config(ConfigError::UnsupportedDevice))));
        assert!(sim.writes().is_empty());
        assert_eq!(memory.outstanding_regions(), 0);
    }

    #[test]
    fn probe_rejects_empty_bar() {
        let mut memory = MockDmaMemory::new();
        let mut info = mmio_info();
        info.bar0 = 0;

        let result = E1000Small::<NoPortBus>::probe(&info, E1000Config::new(), NoPortBus, &mut memory, MockDelay::new());

        assert!(matches!(result, Err(Error::Config(ConfigError::InvalidBar))));
    }

    #[test]
    fn probe_over_mmio_maps_and_unmaps_window() {
        let mut memory = MockDmaMemory::new();
        memory.seed_mmio(RAL0_OFFSET, 0x0300_0002);
        memory.seed_mmio(RAH0_OFFSET, 0x0000_0504);

        let nic = E1000Small::<NoPortBus>::probe(&mmio_info(), E1000Config::new(), NoPortBus, &mut memory, MockDelay::new()).unwrap();

        assert!(matches!(nic.device_config().window, RegisterWindow::Mmio { .. }));
        assert_eq!(nic.mac_address().octets(), [0x02, 0x00, 0x00, 0x03, 0x04, 0x05]);
        assert_eq!(memory.outstanding_mappings(), 1 + 2);

        nic.shutdown(&mut memory);
        assert_eq!(memory.outstanding_mappings(), 0);
        assert_eq!(memory.outstanding_buffers(), 0);
        assert_eq!(memory.outstanding_regions(), 0);
    }

    #[test]
    fn probe_failure_releases_mmio_window() {
        let mut memory = MockDmaMemory::with_buffer_limit(100);
        memory.seed_mmio(RAL0_OFFSET, 0x0300_0002);

        let result = E1000Small::<NoPortBus>::probe(&mmio_info(), E1000Config::new(), NoPortBus, &mut memory, MockDelay::new());

        assert!(matches!(result, Err(Error::Dma(DmaError::OutOfMemory))));
        assert_eq!(memory.outstanding_mappings(), 0);
        assert_eq!(memory.outstanding_buffers(), 0);
    }

    #[test]
    fn probe_surfaces_eeprom_timeout() {
        let sim = sim();
        sim.set_eeprom_latency(999);
        // Detection succeeds within 1000 polls, word reads exceed the budget.
        let config = E1000Config::new().with_eeprom_timeout_us(100);
        let mut memory = MockDmaMemory::new();

        let result = TestNic::probe(&io_info(), config, &sim, &mut memory, MockDelay::new());

        assert!(matches!(result, Err(Error::Io(IoError::Timeout))));
        assert_eq!(memory.outstanding_buffers(), 0);
    }

    #[test]
    fn probe_accepts_zero_poll_interval_field() {
        let sim = sim();
        let mut memory = MockDmaMemory::new();
        let mut config = E1000Config::new();
        config.eeprom_poll_interval_us = 0;

        let nic = TestNic::probe(&io_info(), config, &sim, &mut memory, MockDelay::new()).unwrap();
        assert_eq!(nic.mac_address().octets(), [0x52, 0x54, 0x00, 0x12, 0x34, 0x56]);

        nic.shutdown(&mut memory);
    }

    #[test]
    fn probe_out_of_memory_leaves_nothing_behind() {
        let sim = sim();
        let mut memory = MockDmaMemory::with_buffer_limit(100);

        let result = TestNic::probe(&io_info(), E1000Config::new(), &sim, &mut memory, MockDelay::new());

        assert!(matches!(result, Err(Error::Dma(DmaError::OutOfMemory))));
        assert_eq!(memory.outstanding_buffers(), 0);
        assert_eq!(memory.outstanding_regions(), 0);
    }

    #[test]
    fn shutdown_frees_every_allocation() {
        let sim = sim();
        let mut memory = MockDmaMemory::new();

        let nic = TestNic::probe(&io_info(), E1000Config::new(), &sim, &mut memory, MockDelay::new()).unwrap();
        assert_eq!(memory.outstanding_buffers(), 512);
        assert_eq!(memory.outstanding_regions(), 2);

        nic.shutdown(&mut memory);

        assert_eq!(memory.outstanding_buffers(), 0);
        assert_eq!(memory.outstanding_regions(), 0);
        assert_eq!(memory.outstanding_mappings(), 0);
        assert_eq!(sim.register(IMS_OFFSET), 0);
        assert_eq!(sim.register(RCTL_OFFSET) & crate::internal::register::RCTL_EN, 0);
    }

    #[test]
    fn enable_interrupts_writes_masks_then_reads_icr() {
        let sim = sim();
        let mut memory = MockDmaMemory::new();
        let nic = TestNic::probe(&io_info(), E1000Config::new(), &sim, &mut memory, MockDelay::new()).unwrap();
        sim.clear_writes();
        sim.raise(crate::internal::register::ICR_RXT0);

        let cause = nic.enable_interrupts();

        assert!(cause.rx_timer);
        assert_eq!(sim.writes_to(IMS_OFFSET), [0x1F6DC, 0xFB]);
        assert_eq!(sim.register(ICR_OFFSET), 0);

        nic.shutdown(&mut memory);
    }

    #[test]
    fn isr_masks_and_restarts_link_on_status_change() {
        let sim = sim();
        let mut memory = MockDmaMemory::new();
        let nic = TestNic::probe(&io_info(), E1000Config::new(), &sim, &mut memory, MockDelay::new()).unwrap();
        sim.set_register(CTRL_OFFSET, 0);
        sim.set_register(STATUS_OFFSET, STATUS_LSC | STATUS_LU);
        sim.clear_writes();

        let status = nic.handle_interrupt();

        assert!(status.link_status_change);
        assert_eq!(sim.writes(), [(IMS_OFFSET, 0), (CTRL_OFFSET, CTRL_SLU)]);

        nic.shutdown(&mut memory);
    }

    #[test]
    fn isr_without_link_change_only_masks() {
        let sim = sim();
        let mut memory = MockDmaMemory::new();
        let nic = TestNic::probe(&io_info(), E1000Config::new(), &sim, &mut memory, MockDelay::new()).unwrap();
        sim.set_register(STATUS_OFFSET, STATUS_LU);
        sim.clear_writes();

        let status = nic.handle_interrupt();

        assert!(!status.link_status_change);
        assert!(status.link_up);
        assert_eq!(sim.writes(), [(IMS_OFFSET, 0)]);
        assert!(nic.is_link_up());

        nic.shutdown(&mut memory);
    }

    #[test]
    fn data_path_through_driver() {
        let sim = sim();
        let mut memory = MockDmaMemory::new();
        let mut nic = TestNic::probe(&io_info(), E1000Config::new(), &sim, &mut memory, MockDelay::new()).unwrap();

        assert_eq!(nic.transmit(&[0xEE; 60]), Ok(60));
        assert_eq!(sim.register(TDT_OFFSET), 1);
        assert_eq!(nic.tx_descriptors_available(), 255);

        let mut buf = [0u8; 64];
        assert_eq!(nic.receive(&mut buf), Err(Error::Io(IoError::WouldBlock)));
        nic.dma_mut().simulate_rx(0, &[0x42; 64]);
        assert!(nic.can_receive());
        assert_eq!(nic.peek_rx_length(), Some(64));
        assert_eq!(nic.rx_frames_waiting(), 1);
        assert_eq!(nic.receive(&mut buf), Ok(64));
        assert_eq!(buf, [0x42; 64]);
        assert_eq!(sim.register(RDT_OFFSET), 0);
        assert!(!nic.can_receive());
        assert_eq!(nic.dma().rx_current_index(), 1);

        nic.shutdown(&mut memory);
    }

    #[test]
    fn eeprom_register_is_only_touched_during_probe() {
        let sim = sim();
        let mut memory = MockDmaMemory::new();
        let mut nic = TestNic::probe(&io_info(), E1000Config::new(), &sim, &mut memory, MockDelay::new()).unwrap();
        sim.clear_writes();

        nic.transmit(&[1; 10]).unwrap();
        nic.handle_interrupt();

        assert!(sim.writes_to(EERD_OFFSET).is_empty());

        nic.shutdown(&mut memory);
    }

    #[test]
    fn memory_usage() {
        assert_eq!(TestNic::memory_usage(), 2 * 4096 + 512 * 8192);
    }
}
