//! Configuration types for the e1000 driver

use super::error::{ConfigError, ConfigResult};
use super::identity::MacAddress;
use crate::hal::regio::RegisterWindow;
use crate::internal::constants::{
    DEFAULT_COLLISION_DISTANCE, DEFAULT_COLLISION_THRESHOLD, EEPROM_POLL_INTERVAL_US,
    EEPROM_READ_TIMEOUT_US, INTEL_VENDOR_ID, SUPPORTED_DEVICE_IDS,
};
use crate::internal::register::{
    RCTL_BAM, RCTL_BSIZE_8192, RCTL_EN, RCTL_LBM_NONE, RCTL_MPE, RCTL_RDMTS_HALF, RCTL_SBP,
    RCTL_SECRC, RCTL_UPE, TCTL_COLD_SHIFT, TCTL_CT_SHIFT, TCTL_EN, TCTL_PSP, TCTL_RTLC,
};

// =============================================================================
// PCI Discovery
// =============================================================================

/// Decoded base address register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bar {
    /// Memory-mapped register window
    Memory {
        /// Physical base address
        base: u64,
        /// Window size in bytes
        size: usize,
    },
    /// Legacy I/O port window
    Io {
        /// First I/O port
        base: u16,
    },
}

impl Bar {
    /// Bit 0 of a BAR selects I/O space
    pub const IO_SPACE: u32 = 1 << 0;
    /// Address mask for memory BARs
    pub const MEMORY_MASK: u32 = 0xFFFF_FFF0;
    /// Address mask for I/O BARs
    pub const IO_MASK: u32 = 0xFFFF_FFFC;

    /// Decode a raw BAR value as read from configuration space
    pub fn decode(raw: u32, size: usize) -> ConfigResult<Self> {
        if raw & Self::IO_SPACE != 0 {
            let base = raw & Self::IO_MASK;
            match u16::try_from(base) {
                Ok(base) if base != 0 => Ok(Bar::Io { base }),
                _ => Err(ConfigError::InvalidBar),
            }
        } else {
            let base = raw & Self::MEMORY_MASK;
            if base == 0 || size == 0 {
                return Err(ConfigError::InvalidBar);
            }
            Ok(Bar::Memory {
                base: base as u64,
                size,
            })
        }
    }
}

/// What the kernel's PCI enumerator knows about a function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PciDeviceInfo {
    /// PCI vendor id
    pub vendor: u16,
    /// PCI device id
    pub device: u16,
    /// Raw BAR0 value
    pub bar0: u32,
    /// Size of the BAR0 window in bytes
    pub bar0_size: usize,
    /// Interrupt line
    pub irq: u8,
}

impl PciDeviceInfo {
    /// Check if this function is an e1000 handled by this driver
    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.vendor == INTEL_VENDOR_ID && SUPPORTED_DEVICE_IDS.contains(&self.device)
    }

    /// Decode BAR0
    pub fn bar(&self) -> ConfigResult<Bar> {
        Bar::decode(self.bar0, self.bar0_size)
    }
}

// =============================================================================
// Device Configuration (discovered)
// =============================================================================

/// Facts discovered at probe time, immutable afterwards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceConfig {
    /// How the register file is reached
    pub window: RegisterWindow,
    /// Whether a serial EEPROM answered the detect sequence
    pub eeprom_present: bool,
    /// Station address
    pub mac_address: MacAddress,
}

// =============================================================================
// Receive Options
// =============================================================================

/// Receive filter options programmed into RCTL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReceiveConfig {
    /// Accept broadcast frames
    pub broadcast_accept: bool,
    /// Accept all multicast frames
    pub multicast_promiscuous: bool,
    /// Accept all unicast frames
    pub unicast_promiscuous: bool,
    /// Deliver frames with CRC or symbol errors
    pub store_bad_packets: bool,
    /// Strip the Ethernet CRC before writing the buffer
    pub strip_crc: bool,
}

impl Default for ReceiveConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiveConfig {
    /// Accept everything, strip CRC
    #[must_use]
    pub const fn new() -> Self {
        Self {
            broadcast_accept: true,
            multicast_promiscuous: true,
            unicast_promiscuous: true,
            store_bad_packets: true,
            strip_crc: true,
        }
    }

    /// RCTL value for these options with the receiver enabled
    #[must_use]
    pub const fn rctl(&self) -> u32 {
        let mut rctl = RCTL_EN | RCTL_LBM_NONE | RCTL_RDMTS_HALF | RCTL_BSIZE_8192;
        if self.broadcast_accept {
            rctl |= RCTL_BAM;
        }
        if self.multicast_promiscuous {
            rctl |= RCTL_MPE;
        }
        if self.unicast_promiscuous {
            rctl |= RCTL_UPE;
        }
        if self.store_bad_packets {
            rctl |= RCTL_SBP;
        }
        if self.strip_crc {
            rctl |= RCTL_SECRC;
        }
        rctl
    }
}

// =============================================================================
// Transmit Options
// =============================================================================

/// Transmit options programmed into TCTL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransmitConfig {
    /// Pad frames shorter than 64 bytes
    pub pad_short_packets: bool,
    /// Re-transmit on late collision
    pub retransmit_late_collision: bool,
    /// Collision threshold (TCTL.CT, 8 bits)
    pub collision_threshold: u8,
    /// Collision distance (TCTL.COLD, 10 bits)
    pub collision_distance: u16,
}

impl Default for TransmitConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TransmitConfig {
    /// Standard full-duplex defaults
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pad_short_packets: true,
            retransmit_late_collision: true,
            collision_threshold: DEFAULT_COLLISION_THRESHOLD,
            collision_distance: DEFAULT_COLLISION_DISTANCE,
        }
    }

    /// TCTL value for these options with the transmitter enabled
    #[must_use]
    pub const fn tctl(&self) -> u32 {
        let mut tctl = TCTL_EN
            | ((self.collision_threshold as u32) << TCTL_CT_SHIFT)
            | (((self.collision_distance & 0x3FF) as u32) << TCTL_COLD_SHIFT);
        if self.pad_short_packets {
            tctl |= TCTL_PSP;
        }
        if self.retransmit_late_collision {
            tctl |= TCTL_RTLC;
        }
        tctl
    }
}

// =============================================================================
// Driver Configuration
// =============================================================================

/// Driver configuration
///
/// # Example
///
/// ```ignore
/// let config = E1000Config::new()
///     .with_unicast_promiscuous(false)
///     .with_eeprom_timeout_us(20_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct E1000Config {
    /// Receive filter options
    pub receive: ReceiveConfig,
    /// Transmit options
    pub transmit: TransmitConfig,
    /// Upper bound for one EEPROM word read in microseconds
    pub eeprom_timeout_us: u32,
    /// Delay between EEPROM done-bit polls in microseconds
    pub eeprom_poll_interval_us: u32,
}

impl Default for E1000Config {
    fn default() -> Self {
        Self::new()
    }
}

impl E1000Config {
    /// Create a new configuration with defaults
    #[must_use]
    pub const fn new() -> Self {
        Self {
            receive: ReceiveConfig::new(),
            transmit: TransmitConfig::new(),
            eeprom_timeout_us: EEPROM_READ_TIMEOUT_US,
            eeprom_poll_interval_us: EEPROM_POLL_INTERVAL_US,
        }
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    /// Accept or drop broadcast frames
    #[must_use]
    pub const fn with_broadcast_accept(mut self, enabled: bool) -> Self {
        self.receive.broadcast_accept = enabled;
        self
    }

    /// Accept all multicast frames
    #[must_use]
    pub const fn with_multicast_promiscuous(mut self, enabled: bool) -> Self {
        self.receive.multicast_promiscuous = enabled;
        self
    }

    /// Accept all unicast frames
    #[must_use]
    pub const fn with_unicast_promiscuous(mut self, enabled: bool) -> Self {
        self.receive.unicast_promiscuous = enabled;
        self
    }

    /// Deliver frames the device flagged as bad
    #[must_use]
    pub const fn with_store_bad_packets(mut self, enabled: bool) -> Self {
        self.receive.store_bad_packets = enabled;
        self
    }

    /// Strip the Ethernet CRC from received frames
    #[must_use]
    pub const fn with_strip_crc(mut self, enabled: bool) -> Self {
        self.receive.strip_crc = enabled;
        self
    }

    /// Set the collision threshold
    #[must_use]
    pub const fn with_collision_threshold(mut self, threshold: u8) -> Self {
        self.transmit.collision_threshold = threshold;
        self
    }

    /// Set the collision distance
    #[must_use]
    pub const fn with_collision_distance(mut self, distance: u16) -> Self {
        self.transmit.collision_distance = distance;
        self
    }

    /// Set the EEPROM word read timeout
    #[must_use]
    pub const fn with_eeprom_timeout_us(mut self, timeout_us: u32) -> Self {
        self.eeprom_timeout_us = timeout_us;
        self
    }

    /// Set the EEPROM poll interval (minimum 1 us)
    #[must_use]
    pub const fn with_eeprom_poll_interval_us(mut self, interval_us: u32) -> Self {
        self.eeprom_poll_interval_us = if interval_us == 0 { 1 } else { interval_us };
        self
    }

    /// EEPROM poll interval in microseconds, never zero
    #[must_use]
    pub const fn eeprom_poll_interval(&self) -> u32 {
        if self.eeprom_poll_interval_us == 0 { 1 } else { self.eeprom_poll_interval_us }
    }

    /// Number of EEPROM polls allowed per word read
    #[must_use]
    pub const fn eeprom_poll_budget(&self) -> u32 {
        let polls = self.eeprom_timeout_us / self.eeprom_poll_interval();
        if polls == 0 { 1 } else { polls }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
