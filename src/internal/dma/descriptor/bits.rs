//! Descriptor bit field constants.
//!
//! Based on the 8254x software developer's manual, sections 3.2.3 (receive
//! descriptor) and 3.3.3 (legacy transmit descriptor).

#![allow(dead_code)]

/// Descriptor Done - set by the device when it has finished with the slot
///
/// Same bit position in the RX and TX status bytes.
pub const DD: u8 = 1 << 0;

// =============================================================================
// RX Status
// =============================================================================

/// RX descriptor status bits
pub mod rx_status {
    /// Descriptor Done
    pub const DD: u8 = super::DD;
    /// End Of Packet - last descriptor for the frame
    pub const EOP: u8 = 1 << 1;
    /// Ignore Checksum Indication
    pub const IXSM: u8 = 1 << 2;
    /// Packet is 802.1Q tagged
    pub const VP: u8 = 1 << 3;
    /// TCP checksum calculated
    pub const TCPCS: u8 = 1 << 5;
    /// IP checksum calculated
    pub const IPCS: u8 = 1 << 6;
    /// Passed in-exact filter
    pub const PIF: u8 = 1 << 7;
}

// =============================================================================
// RX Errors
// =============================================================================

/// RX descriptor error bits
pub mod rx_errors {
    /// CRC or alignment error
    pub const CE: u8 = 1 << 0;
    /// Symbol error
    pub const SE: u8 = 1 << 1;
    /// Sequence error
    pub const SEQ: u8 = 1 << 2;
    /// Carrier extension error
    pub const CXE: u8 = 1 << 4;
    /// TCP/UDP checksum error
    pub const TCPE: u8 = 1 << 5;
    /// IP checksum error
    pub const IPE: u8 = 1 << 6;
    /// RX data error
    pub const RXE: u8 = 1 << 7;

    /// Errors that mean the frame content is damaged
    pub const FRAME_ERRORS: u8 = CE | SE | SEQ | CXE | RXE;
}

// =============================================================================
// TX Command
// =============================================================================

/// Legacy TX descriptor command bits
pub mod tx_cmd {
    /// End Of Packet
    pub const EOP: u8 = 1 << 0;
    /// Insert FCS
    pub const IFCS: u8 = 1 << 1;
    /// Insert Checksum
    pub const IC: u8 = 1 << 2;
    /// Report Status - device sets DD when done
    pub const RS: u8 = 1 << 3;
    /// Report Packet Sent
    pub const RPS: u8 = 1 << 4;
    /// Descriptor extension (must be 0 for legacy descriptors)
    pub const DEXT: u8 = 1 << 5;
    /// VLAN packet enable
    pub const VLE: u8 = 1 << 6;
    /// Interrupt delay enable
    pub const IDE: u8 = 1 << 7;

    /// Command for a single-descriptor frame
    pub const SINGLE_FRAME: u8 = EOP | IFCS | RS;
}

// =============================================================================
// TX Status
// =============================================================================

/// Legacy TX descriptor status bits
pub mod tx_status {
    /// Descriptor Done
    pub const DD: u8 = super::DD;
    /// Excess collisions
    pub const EC: u8 = 1 << 1;
    /// Late collision
    pub const LC: u8 = 1 << 2;
    /// Transmit underrun
    pub const TU: u8 = 1 << 3;
}
