//! ISR-safe e1000 wrapper using critical sections.
//!
//! Provides [`SharedE1000`], the single home of a probed device. Tasks and
//! the interrupt handler both reach the rings through it, and every ring
//! transition runs inside one critical section.

use embedded_hal::delay::DelayNs;

use super::primitives::CriticalSectionCell;
use crate::driver::config::{E1000Config, PciDeviceInfo};
use crate::driver::error::{ConfigError, Error, IoError, Result};
use crate::driver::identity::MacAddress;
use crate::driver::interrupt::InterruptStatus;
use crate::driver::nic::E1000;
use crate::hal::irq::{IrqDispatcher, IrqHandler};
use crate::hal::memory::DmaMemory;
use crate::hal::regio::PortBus;
use crate::node::{DeviceNode, IoCall, NodeResult, network_call};

#[cfg(feature = "log")]
use log::{debug, warn};

/// ISR-safe e1000 wrapper using critical sections.
///
/// All access goes through `critical_section::with()`, disabling interrupts
/// for the duration of the closure. The cell is empty until
/// [`probe`](Self::probe) succeeds and again after
/// [`shutdown`](Self::shutdown).
///
/// # Example
///
/// ```ignore
/// static NIC: SharedE1000Default<X86PortBus> = SharedE1000::new();
/// e1000_isr!(NIC_IRQ, NIC);
///
/// NIC.probe(&info, E1000Config::default(), X86PortBus, &mut memory, delay)?;
/// NIC.attach(&mut irq_table, NIC_IRQ)?;
///
/// NIC.with(|nic| nic.transmit(&frame))??;
/// ```
pub struct SharedE1000<B: PortBus, const RX: usize, const TX: usize> {
    inner: CriticalSectionCell<Option<E1000<B, RX, TX>>>,
}

impl<B: PortBus, const RX: usize, const TX: usize> SharedE1000<B, RX, TX> {
    /// Create an empty instance (const, suitable for static initialization).
    pub const fn new() -> Self {
        Self {
            inner: CriticalSectionCell::new(None),
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Probe the device and install it
    ///
    /// The probe itself runs outside the critical section; only the final
    /// hand-over is protected.
    ///
    /// # Errors
    /// - `AlreadyInitialized` - A device is already installed
    /// - Any error from [`E1000::probe`]
    pub fn probe<M, D>(
        &self,
        info: &PciDeviceInfo,
        config: E1000Config,
        ports: B,
        memory: &mut M,
        delay: D,
    ) -> Result<()>
    where
        M: DmaMemory + ?Sized,
        D: DelayNs,
    {
        if self.is_installed() {
            return Err(ConfigError::AlreadyInitialized.into());
        }

        let nic = E1000::probe(info, config, ports, memory, delay)?;
        match self.install(nic) {
            Ok(()) => {
                #[cfg(feature = "log")]
                debug!("e1000: installed on IRQ {}", info.irq);
                Ok(())
            }
            Err(nic) => {
                #[cfg(feature = "log")]
                warn!("e1000: lost install race, releasing duplicate");
                nic.shutdown(memory);
                Err(ConfigError::AlreadyInitialized.into())
            }
        }
    }

    /// Install an already probed device, handing it back if the cell is taken
    pub fn install(&self, nic: E1000<B, RX, TX>) -> core::result::Result<(), E1000<B, RX, TX>> {
        self.inner.with(|slot| {
            if slot.is_some() {
                Err(nic)
            } else {
                *slot = Some(nic);
                Ok(())
            }
        })
    }

    /// Remove the device from the cell
    pub fn take(&self) -> Option<E1000<B, RX, TX>> {
        self.inner.with(Option::take)
    }

    /// Remove the device and shut it down
    ///
    /// # Errors
    /// - `NotReady` - No device installed
    pub fn shutdown<M: DmaMemory + ?Sized>(&self, memory: &mut M) -> Result<()> {
        let nic = self.take().ok_or(IoError::NotReady)?;
        nic.shutdown(memory);
        Ok(())
    }

    /// Check whether a device is installed
    pub fn is_installed(&self) -> bool {
        self.inner.with(|slot| slot.is_some())
    }

    /// Register `handler` for the installed device's IRQ line
    ///
    /// `handler` is normally produced by [`e1000_isr!`](crate::e1000_isr)
    /// and calls [`handle_interrupt`](Self::handle_interrupt) on this cell.
    ///
    /// # Errors
    /// - `NotReady` - No device installed
    pub fn attach<D: IrqDispatcher + ?Sized>(&self, dispatcher: &mut D, handler: IrqHandler) -> Result<()> {
        let irq = self.with(|nic| nic.irq())?;
        dispatcher.register(irq, handler);
        Ok(())
    }

    // =========================================================================
    // Access
    // =========================================================================

    /// Execute a closure with exclusive access to the device.
    ///
    /// Interrupts are disabled for the duration of the closure.
    ///
    /// # Errors
    /// - `NotReady` - No device installed
    #[inline]
    pub fn with<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut E1000<B, RX, TX>) -> R,
    {
        self.inner
            .with(|slot| slot.as_mut().map(f))
            .ok_or_else(|| IoError::NotReady.into())
    }

    /// Try to execute a closure, returning `None` if already borrowed or empty.
    #[inline]
    pub fn try_with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut E1000<B, RX, TX>) -> R,
    {
        self.inner.try_with(|slot| slot.as_mut().map(f)).flatten()
    }

    /// Interrupt service routine body
    ///
    /// Never blocks: returns `None` if no device is installed or the cell is
    /// held by the interrupted context.
    pub fn handle_interrupt(&self) -> Option<InterruptStatus> {
        self.try_with(|nic| nic.handle_interrupt())
    }

    // =========================================================================
    // Data Path
    // =========================================================================

    /// Check if a received frame is waiting (false when empty)
    pub fn can_receive(&self) -> bool {
        self.with(|nic| nic.can_receive()).unwrap_or(false)
    }

    /// Check if the next TX slot is free (false when empty)
    pub fn can_transmit(&self) -> bool {
        self.with(|nic| nic.can_transmit()).unwrap_or(false)
    }

    /// Receive one frame under a single critical section
    pub fn receive(&self, buffer: &mut [u8]) -> Result<usize> {
        self.with(|nic| nic.receive(buffer))?
    }

    /// Transmit one frame under a single critical section
    pub fn transmit(&self, data: &[u8]) -> Result<usize> {
        self.with(|nic| nic.transmit(data))?
    }

    /// Station address of the installed device
    pub fn mac_address(&self) -> Option<MacAddress> {
        self.with(|nic| nic.mac_address()).ok()
    }
}

impl<B: PortBus, const RX: usize, const TX: usize> Default for SharedE1000<B, RX, TX> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: PortBus, const RX: usize, const TX: usize> DeviceNode for &SharedE1000<B, RX, TX> {
    fn can_read(&self) -> bool {
        self.can_receive()
    }

    fn can_write(&self) -> bool {
        self.can_transmit()
    }

    fn read(&mut self, buf: &mut [u8]) -> NodeResult<usize> {
        self.with(|nic| DeviceNode::read(nic, buf))?
    }

    fn write(&mut self, data: &[u8]) -> NodeResult<usize> {
        self.with(|nic| DeviceNode::write(nic, data))?
    }

    fn call(&mut self, call: IoCall<'_>) -> NodeResult<()> {
        let mac = self.mac_address().ok_or(Error::Io(IoError::NotReady))?;
        network_call(mac, call)
    }
}

/// Default shared configuration (512 RX, 256 TX descriptors).
pub type SharedE1000Default<B> = SharedE1000<B, 512, 256>;

/// Small shared configuration (256 RX, 256 TX descriptors).
pub type SharedE1000Small<B> = SharedE1000<B, 256, 256>;

/// Large shared configuration (1024 RX, 512 TX descriptors).
pub type SharedE1000Large<B> = SharedE1000<B, 1024, 512>;
