//! Core driver components for the Intel 8254x (e1000) family.
//!
//! This module contains the essential building blocks for discovering and
//! operating the controller:
//!
//! - [`config`] - PCI/BAR decoding and configuration builders
//! - [`error`] - Error types and result aliases
//! - [`identity`] - EEPROM detection and MAC discovery
//! - [`interrupt`] - Parsed interrupt status
//! - [`nic`] - The main e1000 device implementation
//!
//! # Example
//!
//! ```ignore
//! use e1000_nic::driver::{E1000Config, E1000Default, PciDeviceInfo};
//!
//! let config = E1000Config::new().with_unicast_promiscuous(false);
//! let nic = E1000Default::probe(&info, config, ports, &mut memory, delay)?;
//! ```

// Submodules
pub mod config;
pub mod error;
pub mod identity;
pub mod interrupt;
pub mod nic;

// Re-exports for convenience
pub use config::{Bar, DeviceConfig, E1000Config, PciDeviceInfo, ReceiveConfig, TransmitConfig};
pub use error::{ConfigError, ConfigResult, DmaError, DmaResult, Error, IoError, IoResult, Result};
pub use identity::{EepromReader, IdentitySource, MacAddress};
pub use interrupt::{InterruptCause, InterruptStatus};
pub use nic::{E1000, E1000Default, E1000Large, E1000Small};
