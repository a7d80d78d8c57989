//! Payment method catalog entries and the input forms they require.

use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::error::{BookingError, UnavailableReason};

/// Shape of the details form a method needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    Card,
    Upi,
    BankTransfer,
    Wallet,
}

/// Processing fee charged by a payment rail.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeeRule {
    /// Fixed amount in whole currency units.
    Flat { amount: i64 },
    /// `percentage` of the applied base plus `flat`, rounded once.
    Percentage { percentage: f64, flat: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: String,
    pub name: String,
    pub description: String,
    pub kind: MethodKind,
    pub fee: FeeRule,
    pub min_amount: i64,
    pub max_amount: i64,
    pub is_available: bool,
}

impl PaymentMethod {
    /// Reject the method when it is switched off or `amount` is outside its bounds.
    pub fn ensure_usable(&self, amount: i64) -> Result<(), BookingError> {
        let reason = if !self.is_available {
            Some(UnavailableReason::Disabled)
        } else if amount < self.min_amount {
            Some(UnavailableReason::BelowMinimum)
        } else if amount > self.max_amount {
            Some(UnavailableReason::AboveMaximum)
        } else {
            None
        };

        match reason {
            Some(reason) => Err(BookingError::UnavailableMethod {
                method_id: self.id.clone(),
                reason,
            }),
            None => Ok(()),
        }
    }
}

/// Details entered for the selected method. Card secrets are redacted in
/// `Debug` output and never serialized.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PaymentDetails {
    Card {
        holder_name: String,
        card_number: Secret<String>,
        expiry: String,
        cvv: Secret<String>,
    },
    Upi {
        upi_id: String,
    },
    BankTransfer {
        account_holder: String,
        account_number: String,
        ifsc_code: String,
    },
    Wallet {
        phone_number: String,
    },
}

impl PaymentDetails {
    /// Empty form for `kind`.
    pub fn blank(kind: MethodKind) -> Self {
        match kind {
            MethodKind::Card => PaymentDetails::Card {
                holder_name: String::new(),
                card_number: Secret::new(String::new()),
                expiry: String::new(),
                cvv: Secret::new(String::new()),
            },
            MethodKind::Upi => PaymentDetails::Upi {
                upi_id: String::new(),
            },
            MethodKind::BankTransfer => PaymentDetails::BankTransfer {
                account_holder: String::new(),
                account_number: String::new(),
                ifsc_code: String::new(),
            },
            MethodKind::Wallet => PaymentDetails::Wallet {
                phone_number: String::new(),
            },
        }
    }

    pub fn kind(&self) -> MethodKind {
        match self {
            PaymentDetails::Card { .. } => MethodKind::Card,
            PaymentDetails::Upi { .. } => MethodKind::Upi,
            PaymentDetails::BankTransfer { .. } => MethodKind::BankTransfer,
            PaymentDetails::Wallet { .. } => MethodKind::Wallet,
        }
    }

    /// Every field of the form has a value.
    pub fn is_filled(&self) -> bool {
        fn filled(value: &str) -> bool {
            !value.trim().is_empty()
        }

        match self {
            PaymentDetails::Card {
                holder_name,
                card_number,
                expiry,
                cvv,
            } => {
                filled(holder_name)
                    && filled(card_number.expose_secret())
                    && filled(expiry)
                    && filled(cvv.expose_secret())
            }
            PaymentDetails::Upi { upi_id } => filled(upi_id),
            PaymentDetails::BankTransfer {
                account_holder,
                account_number,
                ifsc_code,
            } => filled(account_holder) && filled(account_number) && filled(ifsc_code),
            PaymentDetails::Wallet { phone_number } => filled(phone_number),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(is_available: bool) -> PaymentMethod {
        PaymentMethod {
            id: "bank_transfer".to_string(),
            name: "Bank Transfer".to_string(),
            description: "Direct transfer".to_string(),
            kind: MethodKind::BankTransfer,
            fee: FeeRule::Flat { amount: 25 },
            min_amount: 1000,
            max_amount: 500_000,
            is_available,
        }
    }

    #[test]
    fn test_usable_within_bounds() {
        assert!(method(true).ensure_usable(1000).is_ok());
        assert!(method(true).ensure_usable(500_000).is_ok());
    }

    #[test]
    fn test_rejections_carry_reason() {
        let reason = |result: Result<(), BookingError>| match result {
            Err(BookingError::UnavailableMethod { reason, .. }) => reason,
            other => panic!("unexpected result: {:?}", other),
        };

        assert_eq!(
            reason(method(false).ensure_usable(5000)),
            UnavailableReason::Disabled
        );
        assert_eq!(
            reason(method(true).ensure_usable(999)),
            UnavailableReason::BelowMinimum
        );
        assert_eq!(
            reason(method(true).ensure_usable(500_001)),
            UnavailableReason::AboveMaximum
        );
    }

    #[test]
    fn test_blank_forms_match_kind_and_are_empty() {
        for kind in [
            MethodKind::Card,
            MethodKind::Upi,
            MethodKind::BankTransfer,
            MethodKind::Wallet,
        ] {
            let form = PaymentDetails::blank(kind);
            assert_eq!(form.kind(), kind);
            assert!(!form.is_filled());
        }
    }

    #[test]
    fn test_card_details_deserialize_and_redact() {
        let details: PaymentDetails = serde_json::from_str(
            r#"{"kind":"card","holder_name":"Asha Rao","card_number":"4111111111111111","expiry":"12/28","cvv":"123"}"#,
        )
        .unwrap();

        assert_eq!(details.kind(), MethodKind::Card);
        assert!(details.is_filled());
        assert!(!format!("{:?}", details).contains("4111111111111111"));
    }
}
