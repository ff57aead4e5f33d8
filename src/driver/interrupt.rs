//! Interrupt status handling for the e1000.
//!
//! The interrupt service routine on this family acknowledges the device by
//! reading `STATUS`; [`InterruptStatus`] is the parsed result. Reading `ICR`
//! clears all pending causes and is decoded into [`InterruptCause`].

use crate::internal::register::{
    ICR_LSC, ICR_RXDMT0, ICR_RXO, ICR_RXSEQ, ICR_RXT0, ICR_TXDW, ICR_TXQE, STATUS_FD, STATUS_LSC,
    STATUS_LU,
};

// =============================================================================
// Interrupt Status
// =============================================================================

/// Device status as sampled by the interrupt service routine.
///
/// # Example
///
/// ```ignore
/// let status = nic.handle_interrupt();
/// if status.link_status_change {
///     // the ISR already restarted link negotiation
/// }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptStatus {
    /// Raw STATUS register value
    pub raw: u32,
    /// Link status changed; the ISR set `CTRL.SLU`
    pub link_status_change: bool,
    /// Link is up
    pub link_up: bool,
    /// Full duplex
    pub full_duplex: bool,
}

impl InterruptStatus {
    /// Create from raw STATUS register value
    #[inline]
    pub fn from_raw(status: u32) -> Self {
        Self {
            raw: status,
            link_status_change: (status & STATUS_LSC) != 0,
            link_up: (status & STATUS_LU) != 0,
            full_duplex: (status & STATUS_FD) != 0,
        }
    }
}

// =============================================================================
// Interrupt Cause
// =============================================================================

/// Interrupt causes parsed from the ICR register.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptCause {
    /// TX descriptor written back
    pub tx_descriptor_written: bool,
    /// TX queue empty
    pub tx_queue_empty: bool,
    /// Link status change
    pub link_status_change: bool,
    /// RX sequence error
    pub rx_sequence_error: bool,
    /// RX descriptor minimum threshold reached
    pub rx_min_threshold: bool,
    /// RX overrun
    pub rx_overrun: bool,
    /// RX timer expired (frame received)
    pub rx_timer: bool,
}

impl InterruptCause {
    /// Create from raw ICR value
    #[inline]
    pub fn from_raw(icr: u32) -> Self {
        Self {
            tx_descriptor_written: (icr & ICR_TXDW) != 0,
            tx_queue_empty: (icr & ICR_TXQE) != 0,
            link_status_change: (icr & ICR_LSC) != 0,
            rx_sequence_error: (icr & ICR_RXSEQ) != 0,
            rx_min_threshold: (icr & ICR_RXDMT0) != 0,
            rx_overrun: (icr & ICR_RXO) != 0,
            rx_timer: (icr & ICR_RXT0) != 0,
        }
    }

    /// Convert back to the ICR/IMS bit layout
    #[inline]
    pub fn to_raw(&self) -> u32 {
        let mut val = 0u32;
        if self.tx_descriptor_written {
            val |= ICR_TXDW;
        }
        if self.tx_queue_empty {
            val |= ICR_TXQE;
        }
        if self.link_status_change {
            val |= ICR_LSC;
        }
        if self.rx_sequence_error {
            val |= ICR_RXSEQ;
        }
        if self.rx_min_threshold {
            val |= ICR_RXDMT0;
        }
        if self.rx_overrun {
            val |= ICR_RXO;
        }
        if self.rx_timer {
            val |= ICR_RXT0;
        }
        val
    }

    /// Check if any cause is set
    #[inline]
    pub fn any(&self) -> bool {
        self.to_raw() != 0
    }

    /// Check if any error cause is set
    #[inline]
    pub fn has_error(&self) -> bool {
        self.rx_sequence_error || self.rx_overrun
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interrupt_status_from_raw_zero() {
        let status = InterruptStatus::from_raw(0);
        assert!(!status.link_status_change);
        assert!(!status.link_up);
        assert!(!status.full_duplex);
    }

    #[test]
    fn interrupt_status_decodes_link_change() {
        let status = InterruptStatus::from_raw(STATUS_LSC | STATUS_LU | STATUS_FD);
        assert!(status.link_status_change);
        assert!(status.link_up);
        assert!(status.full_duplex);
        assert_eq!(status.raw, 0x7);
    }

    #[test]
    fn interrupt_cause_round_trip_all_bits() {
        let raw = ICR_TXDW | ICR_TXQE | ICR_LSC | ICR_RXSEQ | ICR_RXDMT0 | ICR_RXO | ICR_RXT0;
        let cause = InterruptCause::from_raw(raw);
        assert!(cause.any());
        assert!(cause.has_error());
        assert_eq!(cause.to_raw(), raw);
    }

    #[test]
    fn interrupt_cause_ignores_unknown_bits() {
        let cause = InterruptCause::from_raw(1 << 20);
        assert!(!cause.any());
        assert_eq!(cause.to_raw(), 0);
    }

    #[test]
    fn interrupt_cause_rx_only() {
        let cause = InterruptCause::from_raw(ICR_RXT0);
        assert!(cause.rx_timer);
        assert!(!cause.has_error());
        assert!(!cause.tx_descriptor_written);
    }
}
