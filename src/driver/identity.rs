//! Device identity: EEPROM detection and MAC address discovery.
//!
//! The station address lives either in the serial EEPROM (words 0..3) or,
//! on parts without one, in the first receive-address register pair. Which
//! source is used is decided once at probe time from [`detect_eeprom`].

use embedded_hal::delay::DelayNs;

use super::config::E1000Config;
use super::error::{IoError, IoResult, Result};
use crate::hal::regio::RegisterIo;
use crate::internal::constants::{
    EEPROM_DETECT_POLLS, EEPROM_POLL_INTERVAL_US, EEPROM_READ_TIMEOUT_US, MAC_ADDR_LEN,
};
use crate::internal::register::{
    EERD_ADDR_SHIFT, EERD_ADDR_SHIFT_NO_EEPROM, EERD_DATA_SHIFT, EERD_DONE, EERD_DONE_NO_EEPROM,
    EERD_OFFSET, EERD_START, RAH0_OFFSET, RAL0_OFFSET,
};

#[cfg(feature = "log")]
use log::warn;

// =============================================================================
// MAC Address
// =============================================================================

/// 48-bit Ethernet station address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MacAddress([u8; MAC_ADDR_LEN]);

impl MacAddress {
    /// Create an address from its six octets
    #[must_use]
    pub const fn new(octets: [u8; MAC_ADDR_LEN]) -> Self {
        Self(octets)
    }

    /// The six octets in transmission order
    #[must_use]
    pub const fn octets(&self) -> [u8; MAC_ADDR_LEN] {
        self.0
    }

    /// Borrow the octets
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; MAC_ADDR_LEN] {
        &self.0
    }

    /// Check if every octet is zero
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// Check if the group bit is set
    #[must_use]
    pub const fn is_multicast(&self) -> bool {
        self.0[0] & 0x01 != 0
    }
}

impl From<[u8; MAC_ADDR_LEN]> for MacAddress {
    fn from(octets: [u8; MAC_ADDR_LEN]) -> Self {
        Self(octets)
    }
}

impl From<MacAddress> for [u8; MAC_ADDR_LEN] {
    fn from(mac: MacAddress) -> Self {
        mac.0
    }
}

impl core::fmt::Display for MacAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

// =============================================================================
// Identity Source
// =============================================================================

/// Where the station address is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IdentitySource {
    /// EEPROM words 0, 1 and 2
    Eeprom,
    /// Receive address registers RAL0/RAH0
    Registers,
}

impl IdentitySource {
    /// Pick the source from the EEPROM detection result
    #[must_use]
    pub const fn select(eeprom_present: bool) -> Self {
        if eeprom_present {
            IdentitySource::Eeprom
        } else {
            IdentitySource::Registers
        }
    }
}

// =============================================================================
// EEPROM Access
// =============================================================================

/// Probe for a serial EEPROM.
///
/// Starts a read of word 0 and polls the done bit a bounded number of
/// times. A device that never answers simply has no EEPROM.
pub fn detect_eeprom<R: RegisterIo + ?Sized>(regs: &R) -> bool {
    regs.write(EERD_OFFSET, EERD_START);
    (0..EEPROM_DETECT_POLLS).any(|_| regs.read(EERD_OFFSET) & EERD_DONE != 0)
}

/// Word reader for the EEPROM read register
///
/// The request layout depends on whether a serial EEPROM was detected.
/// Every read is bounded by the configured timeout.
#[derive(Debug)]
pub struct EepromReader<D: DelayNs> {
    /// Delay provider
    delay: D,
    /// Request layout selector
    present: bool,
    /// Polls allowed per word
    max_polls: u32,
    /// Delay between polls
    poll_interval_us: u32,
}

impl<D: DelayNs> EepromReader<D> {
    /// Create a reader with the default timeout
    pub fn new(delay: D, present: bool) -> Self {
        Self {
            delay,
            present,
            max_polls: EEPROM_READ_TIMEOUT_US / EEPROM_POLL_INTERVAL_US,
            poll_interval_us: EEPROM_POLL_INTERVAL_US,
        }
    }

    /// Create a reader using the timeout settings from `config`
    pub fn from_config(delay: D, present: bool, config: &E1000Config) -> Self {
        Self {
            delay,
            present,
            max_polls: config.eeprom_poll_budget(),
            poll_interval_us: config.eeprom_poll_interval(),
        }
    }

    /// Whether the serial EEPROM request layout is used
    pub fn is_present(&self) -> bool {
        self.present
    }

    /// Read one 16-bit word.
    ///
    /// Returns [`IoError::Timeout`] if the done bit does not appear within
    /// the configured bound.
    pub fn read_word<R: RegisterIo + ?Sized>(&mut self, regs: &R, address: u8) -> IoResult<u16> {
        let (request, done) = if self.present {
            (EERD_START | ((address as u32) << EERD_ADDR_SHIFT), EERD_DONE)
        } else {
            (
                EERD_START | ((address as u32) << EERD_ADDR_SHIFT_NO_EEPROM),
                EERD_DONE_NO_EEPROM,
            )
        };
        regs.write(EERD_OFFSET, request);

        for _ in 0..self.max_polls {
            let value = regs.read(EERD_OFFSET);
            if value & done != 0 {
                return Ok((value >> EERD_DATA_SHIFT) as u16);
            }
            self.delay.delay_us(self.poll_interval_us);
        }

        #[cfg(feature = "log")]
        warn!("EEPROM read of word {} timed out", address);

        Err(IoError::Timeout)
    }

    /// Release the delay provider
    pub fn into_inner(self) -> D {
        self.delay
    }
}

// =============================================================================
// MAC Discovery
// =============================================================================

/// Read the station address from `source`.
///
/// EEPROM words are little-endian: word `0x0211` yields octets `11 02`.
/// The register source unpacks RAL0 and the low half of RAH0 as found.
pub fn read_mac_address<R, D>(
    regs: &R,
    source: IdentitySource,
    eeprom: &mut EepromReader<D>,
) -> Result<MacAddress>
where
    R: RegisterIo + ?Sized,
    D: DelayNs,
{
    let mut octets = [0u8; MAC_ADDR_LEN];
    match source {
        IdentitySource::Eeprom => {
            for (word, pair) in octets.chunks_exact_mut(2).enumerate() {
                let value = eeprom.read_word(regs, word as u8)?;
                pair.copy_from_slice(&value.to_le_bytes());
            }
        }
        IdentitySource::Registers => {
            let low = regs.read(RAL0_OFFSET);
            let high = regs.read(RAH0_OFFSET);
            octets[..4].copy_from_slice(&low.to_le_bytes());
            octets[4..].copy_from_slice(&high.to_le_bytes()[..2]);
        }
    }
    Ok(MacAddress(octets))
}

// =============================================================================
// Unit Tests
// =============================================================================
