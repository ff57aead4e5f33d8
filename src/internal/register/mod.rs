//! e1000 register map
//!
//! Offsets are relative to the start of the device register window (BAR0)
//! and bit definitions follow the Intel 8254x software developer's manual.
//! The same offsets are used for both the memory-mapped and the legacy
//! port-I/O windows.

// =============================================================================
// Register Offsets
// =============================================================================

/// Device Control register offset
pub const CTRL_OFFSET: u16 = 0x0000;
/// Device Status register offset
pub const STATUS_OFFSET: u16 = 0x0008;
/// EEPROM Read register offset
pub const EERD_OFFSET: u16 = 0x0014;
/// Interrupt Cause Read register offset (read clears)
pub const ICR_OFFSET: u16 = 0x00C0;
/// Interrupt Mask Set/Read register offset
pub const IMS_OFFSET: u16 = 0x00D0;
/// Interrupt Mask Clear register offset
pub const IMC_OFFSET: u16 = 0x00D8;
/// Receive Control register offset
pub const RCTL_OFFSET: u16 = 0x0100;
/// Transmit Control register offset
pub const TCTL_OFFSET: u16 = 0x0400;
/// RX Descriptor Base Address Low offset
pub const RDBAL_OFFSET: u16 = 0x2800;
/// RX Descriptor Base Address High offset
pub const RDBAH_OFFSET: u16 = 0x2804;
/// RX Descriptor Length offset (bytes)
pub const RDLEN_OFFSET: u16 = 0x2808;
/// RX Descriptor Head offset
pub const RDH_OFFSET: u16 = 0x2810;
/// RX Descriptor Tail offset
pub const RDT_OFFSET: u16 = 0x2818;
/// TX Descriptor Base Address Low offset
pub const TDBAL_OFFSET: u16 = 0x3800;
/// TX Descriptor Base Address High offset
pub const TDBAH_OFFSET: u16 = 0x3804;
/// TX Descriptor Length offset (bytes)
pub const TDLEN_OFFSET: u16 = 0x3808;
/// TX Descriptor Head offset
pub const TDH_OFFSET: u16 = 0x3810;
/// TX Descriptor Tail offset
pub const TDT_OFFSET: u16 = 0x3818;
/// Receive Address Low (entry 0) offset - MAC bytes 0..4
pub const RAL0_OFFSET: u16 = 0x5400;
/// Receive Address High (entry 0) offset - MAC bytes 4..6
pub const RAH0_OFFSET: u16 = 0x5404;

// =============================================================================
// Device Control (CTRL) Bits
// =============================================================================

/// Set Link Up - forces the MAC/PHY link and restarts auto-negotiation
pub const CTRL_SLU: u32 = 1 << 6;

// =============================================================================
// Device Status (STATUS) Bits
// =============================================================================

/// Full duplex
pub const STATUS_FD: u32 = 1 << 0;
/// Link up
pub const STATUS_LU: u32 = 1 << 1;
/// Link status change cause as reported through STATUS on this family
pub const STATUS_LSC: u32 = 1 << 2;

// =============================================================================
// EEPROM Read (EERD) Bits
// =============================================================================

/// Start read
pub const EERD_START: u32 = 1 << 0;
/// Read done (devices with a serial EEPROM)
pub const EERD_DONE: u32 = 1 << 4;
/// Read address shift (devices with a serial EEPROM)
pub const EERD_ADDR_SHIFT: u32 = 8;
/// Read done (later revisions without a serial EEPROM)
pub const EERD_DONE_NO_EEPROM: u32 = 1 << 1;
/// Read address shift (later revisions without a serial EEPROM)
pub const EERD_ADDR_SHIFT_NO_EEPROM: u32 = 2;
/// Data word shift
pub const EERD_DATA_SHIFT: u32 = 16;

// =============================================================================
// Interrupt Cause (ICR/IMS) Bits
// =============================================================================

/// Transmit descriptor written back
pub const ICR_TXDW: u32 = 1 << 0;
/// Transmit queue empty
pub const ICR_TXQE: u32 = 1 << 1;
/// Link status change
pub const ICR_LSC: u32 = 1 << 2;
/// Receive sequence error
pub const ICR_RXSEQ: u32 = 1 << 3;
/// Receive descriptor minimum threshold reached
pub const ICR_RXDMT0: u32 = 1 << 4;
/// Receiver overrun
pub const ICR_RXO: u32 = 1 << 6;
/// Receiver timer interrupt
pub const ICR_RXT0: u32 = 1 << 7;

/// Interrupt mask programmed first when enabling interrupts
pub const IMS_ENABLE_ALL: u32 = 0x1F6DC;
/// Every interrupt cause, for IMC
pub const IMC_ALL: u32 = 0xFFFF_FFFF;
/// Interrupt mask left in place after enabling (all low causes except LSC)
pub const IMS_ENABLE_DEFAULT: u32 = 0xFF & !ICR_LSC;

// =============================================================================
// Receive Control (RCTL) Bits
// =============================================================================

/// Receiver enable
pub const RCTL_EN: u32 = 1 << 1;
/// Store bad packets
pub const RCTL_SBP: u32 = 1 << 2;
/// Unicast promiscuous
pub const RCTL_UPE: u32 = 1 << 3;
/// Multicast promiscuous
pub const RCTL_MPE: u32 = 1 << 4;
/// Long packet enable
pub const RCTL_LPE: u32 = 1 << 5;
/// No loopback
pub const RCTL_LBM_NONE: u32 = 0 << 6;
/// Free buffer threshold is 1/2 of RDLEN
pub const RCTL_RDMTS_HALF: u32 = 0 << 8;
/// Broadcast accept mode
pub const RCTL_BAM: u32 = 1 << 15;
/// Buffer size extension
pub const RCTL_BSEX: u32 = 1 << 25;
/// Strip Ethernet CRC
pub const RCTL_SECRC: u32 = 1 << 26;
/// Buffer size 2048 bytes
pub const RCTL_BSIZE_2048: u32 = 0 << 16;
/// Buffer size 4096 bytes
pub const RCTL_BSIZE_4096: u32 = (3 << 16) | RCTL_BSEX;
/// Buffer size 8192 bytes
pub const RCTL_BSIZE_8192: u32 = (2 << 16) | RCTL_BSEX;

// =============================================================================
// Transmit Control (TCTL) Bits
// =============================================================================

/// Transmitter enable
pub const TCTL_EN: u32 = 1 << 1;
/// Pad short packets
pub const TCTL_PSP: u32 = 1 << 3;
/// Collision threshold shift
pub const TCTL_CT_SHIFT: u32 = 4;
/// Collision distance shift
pub const TCTL_COLD_SHIFT: u32 = 12;
/// Re-transmit on late collision
pub const TCTL_RTLC: u32 = 1 << 24;

// =============================================================================
// Raw Volatile Access
// =============================================================================

/// Read a 32-bit register at the given address
///
/// # Safety
/// The caller must ensure the address is valid and properly aligned.
#[inline(always)]
pub unsafe fn read_reg(addr: usize) -> u32 {
    unsafe { core::ptr::read_volatile(addr as *const u32) }
}

/// Write a 32-bit value to a register at the given address
///
/// # Safety
/// The caller must ensure the address is valid and properly aligned.
#[inline(always)]
pub unsafe fn write_reg(addr: usize, value: u32) {
    unsafe { core::ptr::write_volatile(addr as *mut u32, value) }
}
