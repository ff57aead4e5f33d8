//! Device Node Adapter
//!
//! The kernel's file layer sees a network card as a device node: it can be
//! polled for readiness, read one frame at a time, written one frame at a
//! time, and queried with I/O calls. This module defines that surface and
//! implements it for [`E1000`] and, behind a critical section, for
//! [`SharedE1000`](crate::sync::SharedE1000).
//!
//! The adapter only delegates. One `read` is one received frame and one
//! `write` is one transmitted frame.

use core::fmt;

use crate::driver::error::Error;
use crate::driver::identity::MacAddress;
use crate::driver::nic::E1000;
use crate::hal::regio::PortBus;

#[cfg(feature = "log")]
use log::trace;

// =============================================================================
// I/O Calls
// =============================================================================

/// Network state reported by [`IoCall::NetworkGetState`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NetworkState {
    /// Station address
    pub mac_address: MacAddress,
}

/// Control request issued to a device node
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum IoCall<'a> {
    /// Fill in the network state
    NetworkGetState(&'a mut NetworkState),
    /// Request code belonging to another device class
    Other(u32),
}

// =============================================================================
// Node Errors
// =============================================================================

/// Errors returned through the device node surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NodeError {
    /// The request does not apply to this kind of device
    InappropriateCall,
    /// The driver reported an error
    Device(Error),
}

impl NodeError {
    /// Get a human-readable description
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InappropriateCall => "inappropriate call for device",
            Self::Device(_) => "device error",
        }
    }
}

impl fmt::Display for NodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InappropriateCall => f.write_str(self.as_str()),
            Self::Device(e) => write!(f, "device: {e}"),
        }
    }
}

impl From<Error> for NodeError {
    fn from(e: Error) -> Self {
        Self::Device(e)
    }
}

/// Result type for device node operations
pub type NodeResult<T> = core::result::Result<T, NodeError>;

// =============================================================================
// Device Node Trait
// =============================================================================

/// File-like surface of a device
pub trait DeviceNode {
    /// Whether `read` would return data now
    fn can_read(&self) -> bool;

    /// Whether `write` would be accepted now
    fn can_write(&self) -> bool;

    /// Read one frame into `buf`, returning its length
    fn read(&mut self, buf: &mut [u8]) -> NodeResult<usize>;

    /// Write one frame from `data`, returning the bytes accepted
    fn write(&mut self, data: &[u8]) -> NodeResult<usize>;

    /// Handle a control request
    fn call(&mut self, call: IoCall<'_>) -> NodeResult<()>;
}

impl<B: PortBus, const RX: usize, const TX: usize> DeviceNode for E1000<B, RX, TX> {
    fn can_read(&self) -> bool {
        self.can_receive()
    }

    fn can_write(&self) -> bool {
        self.can_transmit()
    }

    fn read(&mut self, buf: &mut [u8]) -> NodeResult<usize> {
        let len = self.receive(buf)?;

        #[cfg(feature = "log")]
        trace!("e1000: read {} bytes", len);

        Ok(len)
    }

    fn write(&mut self, data: &[u8]) -> NodeResult<usize> {
        let len = self.transmit(data)?;

        #[cfg(feature = "log")]
        trace!("e1000: wrote {} bytes", len);

        Ok(len)
    }

    fn call(&mut self, call: IoCall<'_>) -> NodeResult<()> {
        network_call(self.mac_address(), call)
    }
}

/// Answer a control request for a network device with address `mac`
pub(crate) fn network_call(mac: MacAddress, call: IoCall<'_>) -> NodeResult<()> {
    match call {
        IoCall::NetworkGetState(state) => {
            state.mac_address = mac;
            Ok(())
        }
        IoCall::Other(_) => Err(NodeError::InappropriateCall),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
