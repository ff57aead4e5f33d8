//! Centralized Constants
//!
//! This module provides a single source of truth for the sizes, limits and
//! identifiers used throughout the driver.
//!
//! # Note
//!
//! Hardware register offsets and bit definitions remain in
//! [`register`](super::register) as they are specific to the device.

// =============================================================================
// Frame, Buffer and Page Sizes
// =============================================================================

/// Standard Ethernet MTU (Maximum Transmission Unit)
pub const MTU: usize = 1500;

/// Ethernet header length (destination, source, EtherType)
pub const ETH_HEADER_LEN: usize = 14;

/// Largest untagged frame handed to or taken from a network stack (MTU + header)
pub const MAX_ETH_FRAME_SIZE: usize = MTU + ETH_HEADER_LEN;

/// Maximum Ethernet frame size including VLAN tag (1500 + 14 header + 4 CRC + 4 VLAN)
pub const MAX_FRAME_SIZE: usize = 1522;

/// MAC address length in bytes
pub const MAC_ADDR_LEN: usize = 6;

/// Size of each per-descriptor packet buffer (matches `RCTL_BSIZE_8192`)
pub const PACKET_BUFFER_SIZE: usize = 8192;

/// Kernel page size used for DMA allocations
pub const PAGE_SIZE: usize = 4096;

/// Size of one legacy RX/TX descriptor in bytes
pub const DESCRIPTOR_SIZE: usize = 16;

// =============================================================================
// Default Ring Sizes
// =============================================================================

/// Default number of receive descriptors (two pages of descriptors)
pub const DEFAULT_RX_DESCRIPTORS: usize = 512;

/// Default number of transmit descriptors (one page of descriptors)
pub const DEFAULT_TX_DESCRIPTORS: usize = 256;

// =============================================================================
// EEPROM Timing
// =============================================================================

/// Number of polls for the done bit before the EEPROM is declared absent
pub const EEPROM_DETECT_POLLS: u32 = 1000;

/// Default upper bound for one EEPROM word read in microseconds
pub const EEPROM_READ_TIMEOUT_US: u32 = 10_000;

/// Delay between EEPROM done-bit polls in microseconds
pub const EEPROM_POLL_INTERVAL_US: u32 = 1;

// =============================================================================
// PCI Identification
// =============================================================================

/// Intel PCI vendor id
pub const INTEL_VENDOR_ID: u16 = 0x8086;

/// 82540EM as emulated by QEMU, Bochs and VirtualBox
pub const DEVICE_ID_82540EM: u16 = 0x100E;

/// I217
pub const DEVICE_ID_I217: u16 = 0x153A;

/// 82577LM
pub const DEVICE_ID_82577LM: u16 = 0x10EA;

/// Device ids handled by this driver
pub const SUPPORTED_DEVICE_IDS: [u16; 3] = [DEVICE_ID_82540EM, DEVICE_ID_I217, DEVICE_ID_82577LM];

// =============================================================================
// Transmit Defaults
// =============================================================================

/// Default collision threshold (TCTL.CT)
pub const DEFAULT_COLLISION_THRESHOLD: u8 = 15;

/// Default collision distance (TCTL.COLD), in byte times
pub const DEFAULT_COLLISION_DISTANCE: u16 = 64;

/// Round `size` up to a whole number of pages
#[inline]
pub const fn page_align_up(size: usize) -> usize {
    size.div_ceil(PAGE_SIZE) * PAGE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rings_fill_whole_pages() {
        assert_eq!((DEFAULT_RX_DESCRIPTORS * DESCRIPTOR_SIZE) % PAGE_SIZE, 0);
        assert_eq!((DEFAULT_TX_DESCRIPTORS * DESCRIPTOR_SIZE) % PAGE_SIZE, 0);
    }

    #[test]
    fn page_align_up_rounds() {
        assert_eq!(page_align_up(0), 0);
        assert_eq!(page_align_up(1), PAGE_SIZE);
        assert_eq!(page_align_up(PAGE_SIZE), PAGE_SIZE);
        assert_eq!(page_align_up(PAGE_SIZE + 1), 2 * PAGE_SIZE);
    }

    #[test]
    fn packet_buffer_holds_a_full_frame() {
        assert!(PACKET_BUFFER_SIZE >= MAX_FRAME_SIZE);
        assert_eq!(MAX_ETH_FRAME_SIZE, 1514);
        assert_eq!(PACKET_BUFFER_SIZE % PAGE_SIZE, 0);
    }
}
