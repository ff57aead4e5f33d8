//! smoltcp Network Stack Integration
#![cfg_attr(docsrs, doc(cfg(feature = "smoltcp")))]
//!
//! This module implements `smoltcp::phy::Device` for [`E1000`], so a probed
//! device can back a smoltcp `Interface` directly.
//!
//! # Example
//!
//! ```ignore
//! use smoltcp::iface::{Config, Interface};
//! use e1000_nic::integration::ethernet_address;
//!
//! let mut nic = E1000Default::probe(&info, E1000Config::default(), ports, &mut memory, delay)?;
//! let config = Config::new(ethernet_address(&nic).into());
//! let mut iface = Interface::new(config, &mut nic, smoltcp::time::Instant::ZERO);
//! ```
//!
//! # Safety Notes
//!
//! smoltcp's `receive()` returns an `RxToken` and a `TxToken` together. Both
//! tokens hold a raw pointer to the same device. This is sound because each
//! token is consumed by value, one at a time, within the borrow of the
//! device, and receive and transmit touch disjoint rings.

use crate::driver::nic::E1000;
use crate::hal::regio::PortBus;
use crate::internal::constants::{MAX_ETH_FRAME_SIZE, MAX_FRAME_SIZE};

use smoltcp::phy::{ChecksumCapabilities, Device, DeviceCapabilities, Medium};
use smoltcp::time::Instant;

#[cfg(feature = "log")]
use log::warn;

// =============================================================================
// Tokens
// =============================================================================

/// Receive token for smoltcp
///
/// Copies the next frame out of its DMA buffer and hands the slot back to
/// the device.
pub struct E1000RxToken<'a, B: PortBus, const RX: usize, const TX: usize> {
    nic: *mut E1000<B, RX, TX>,
    _marker: core::marker::PhantomData<&'a mut E1000<B, RX, TX>>,
}

impl<B: PortBus, const RX: usize, const TX: usize> smoltcp::phy::RxToken
    for E1000RxToken<'_, B, RX, TX>
{
    fn consume<R, F>(self, f: F) -> R
    where
        F: FnOnce(&[u8]) -> R,
    {
        // RCTL.LPE stays clear, so the device drops anything longer.
        let mut buffer = [0u8; MAX_FRAME_SIZE];

        // SAFETY: valid for 'a; the token is consumed by value and the TX token
        // never touches the RX ring.
        let nic = unsafe { &mut *self.nic };

        let len = match nic.receive(&mut buffer) {
            Ok(len) => len,
            Err(_e) => {
                #[cfg(feature = "log")]
                warn!("e1000: smoltcp receive failed: {}", _e);
                0
            }
        };
        f(&buffer[..len])
    }
}

/// Transmit token for smoltcp
pub struct E1000TxToken<'a, B: PortBus, const RX: usize, const TX: usize> {
    nic: *mut E1000<B, RX, TX>,
    _marker: core::marker::PhantomData<&'a mut E1000<B, RX, TX>>,
}

impl<B: PortBus, const RX: usize, const TX: usize> smoltcp::phy::TxToken
    for E1000TxToken<'_, B, RX, TX>
{
    fn consume<R, F>(self, len: usize, f: F) -> R
    where
        F: FnOnce(&mut [u8]) -> R,
    {
        let len = len.min(MAX_ETH_FRAME_SIZE);
        let mut buffer = [0u8; MAX_ETH_FRAME_SIZE];
        let result = f(&mut buffer[..len]);

        // SAFETY: valid for 'a; the token is consumed by value and the RX token
        // never touches the TX ring.
        let nic = unsafe { &mut *self.nic };

        // smoltcp retransmits at a higher layer.
        if let Err(_e) = nic.transmit(&buffer[..len]) {
            #[cfg(feature = "log")]
            warn!("e1000: smoltcp transmit dropped: {}", _e);
        }

        result
    }
}

// =============================================================================
// Device Implementation
// =============================================================================

impl<B: PortBus, const RX: usize, const TX: usize> Device for E1000<B, RX, TX> {
    type RxToken<'a>
        = E1000RxToken<'a, B, RX, TX>
    where
        Self: 'a;
    type TxToken<'a>
        = E1000TxToken<'a, B, RX, TX>
    where
        Self: 'a;

    fn receive(&mut self, _timestamp: Instant) -> Option<(Self::RxToken<'_>, Self::TxToken<'_>)> {
        if !self.can_receive() {
            return None;
        }

        let nic = self as *mut Self;
        Some((
            E1000RxToken {
                nic,
                _marker: core::marker::PhantomData,
            },
            E1000TxToken {
                nic,
                _marker: core::marker::PhantomData,
            },
        ))
    }

    fn transmit(&mut self, _timestamp: Instant) -> Option<Self::TxToken<'_>> {
        if !self.can_transmit() {
            return None;
        }

        Some(E1000TxToken {
            nic: self as *mut Self,
            _marker: core::marker::PhantomData,
        })
    }

    fn capabilities(&self) -> DeviceCapabilities {
        let mut caps = DeviceCapabilities::default();
        caps.medium = Medium::Ethernet;
        caps.max_transmission_unit = MAX_ETH_FRAME_SIZE;
        caps.max_burst_size = Some(1);
        // No checksum offload is programmed.
        caps.checksum = ChecksumCapabilities::default();
        caps
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get the MAC address as a smoltcp `EthernetAddress`
pub fn ethernet_address<B: PortBus, const RX: usize, const TX: usize>(
    nic: &E1000<B, RX, TX>,
) -> smoltcp::wire::EthernetAddress {
    smoltcp::wire::EthernetAddress(nic.mac_address().octets())
}
