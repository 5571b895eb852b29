//! Payment status state machine.
//!
//! Mirrors the gateway's invoice statuses. `Pending` is the only state with
//! open transitions; a paid invoice can still settle.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::PaymentError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Invoice issued, waiting for the customer.
    Pending,

    /// Customer paid; funds not yet settled.
    Paid,

    /// Funds settled to the merchant.
    Settled,

    /// Invoice expired unpaid.
    Expired,

    /// Payment attempt failed.
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Paid => "PAID",
            PaymentStatus::Settled => "SETTLED",
            PaymentStatus::Expired => "EXPIRED",
            PaymentStatus::Failed => "FAILED",
        }
    }

    /// Returns true when money has been received.
    pub fn is_paid(&self) -> bool {
        matches!(self, PaymentStatus::Paid | PaymentStatus::Settled)
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, PaymentStatus::Pending)
    }

    pub fn can_transition_to(&self, target: &Self) -> bool {
        use PaymentStatus::*;
        matches!(
            (self, target),
            (Pending, Paid) | (Pending, Settled) | (Pending, Expired) | (Pending, Failed)
                | (Paid, Settled)
        )
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(PaymentStatus::Pending),
            "PAID" => Ok(PaymentStatus::Paid),
            "SETTLED" => Ok(PaymentStatus::Settled),
            "EXPIRED" => Ok(PaymentStatus::Expired),
            "FAILED" => Ok(PaymentStatus::Failed),
            _ => Err(PaymentError::UnknownStatus(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_gateway_statuses_case_insensitively() {
        assert_eq!("PAID".parse::<PaymentStatus>().unwrap(), PaymentStatus::Paid);
        assert_eq!("settled".parse::<PaymentStatus>().unwrap(), PaymentStatus::Settled);
        assert!(matches!(
            "REFUNDED".parse::<PaymentStatus>(),
            Err(PaymentError::UnknownStatus(_))
        ));
    }

    #[test]
    fn pending_can_move_anywhere() {
        for target in [
            PaymentStatus::Paid,
            PaymentStatus::Settled,
            PaymentStatus::Expired,
            PaymentStatus::Failed,
        ] {
            assert!(PaymentStatus::Pending.can_transition_to(&target));
        }
    }

    #[test]
    fn paid_can_only_settle() {
        assert!(PaymentStatus::Paid.can_transition_to(&PaymentStatus::Settled));
        assert!(!PaymentStatus::Paid.can_transition_to(&PaymentStatus::Expired));
        assert!(!PaymentStatus::Paid.can_transition_to(&PaymentStatus::Pending));
    }

    #[test]
    fn expired_is_final() {
        assert!(!PaymentStatus::Expired.can_transition_to(&PaymentStatus::Paid));
        assert!(PaymentStatus::Expired.is_terminal());
    }
}
