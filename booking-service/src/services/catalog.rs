//! Country settings, the payment method catalog and the vendor service lookup.
//!
//! The method catalog for a country is the base method list followed by that
//! country's local methods. Supporting a new country means adding rows to
//! [`COUNTRIES`] and [`LOCAL_METHODS`].

use crate::error::BookingError;
use crate::models::{CountryConfig, FeeRule, MethodKind, PaymentMethod, ServiceOffering};

struct MethodSpec {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    kind: MethodKind,
    fee: FeeRule,
    min_amount: i64,
    max_amount: i64,
    is_available: bool,
}

impl MethodSpec {
    fn to_method(&self) -> PaymentMethod {
        PaymentMethod {
            id: self.id.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            kind: self.kind,
            fee: self.fee,
            min_amount: self.min_amount,
            max_amount: self.max_amount,
            is_available: self.is_available,
        }
    }
}

pub const COUNTRIES: &[CountryConfig] = &[
    CountryConfig {
        code: "IN",
        name: "India",
        currency_code: "INR",
        currency_symbol: "₹",
    },
    CountryConfig {
        code: "US",
        name: "United States",
        currency_code: "USD",
        currency_symbol: "$",
    },
    CountryConfig {
        code: "GB",
        name: "United Kingdom",
        currency_code: "GBP",
        currency_symbol: "£",
    },
    CountryConfig {
        code: "AE",
        name: "United Arab Emirates",
        currency_code: "AED",
        currency_symbol: "AED ",
    },
    CountryConfig {
        code: "KE",
        name: "Kenya",
        currency_code: "KES",
        currency_symbol: "KSh ",
    },
    CountryConfig {
        code: "BD",
        name: "Bangladesh",
        currency_code: "BDT",
        currency_symbol: "৳",
    },
    CountryConfig {
        code: "PK",
        name: "Pakistan",
        currency_code: "PKR",
        currency_symbol: "₨",
    },
];

const BASE_METHODS: &[MethodSpec] = &[
    MethodSpec {
        id: "card",
        name: "Credit/Debit Card",
        description: "Visa, Mastercard, American Express, RuPay",
        kind: MethodKind::Card,
        fee: FeeRule::Percentage {
            percentage: 2.5,
            flat: 3.0,
        },
        min_amount: 1,
        max_amount: 10_000_000,
        is_available: true,
    },
    MethodSpec {
        id: "paypal",
        name: "PayPal",
        description: "Pay with your PayPal balance or linked card",
        kind: MethodKind::Card,
        fee: FeeRule::Percentage {
            percentage: 3.4,
            flat: 5.0,
        },
        min_amount: 1,
        max_amount: 1_000_000,
        is_available: true,
    },
    MethodSpec {
        id: "stripe",
        name: "Stripe",
        description: "Secure international card checkout",
        kind: MethodKind::Card,
        fee: FeeRule::Percentage {
            percentage: 2.9,
            flat: 0.3,
        },
        min_amount: 1,
        max_amount: 10_000_000,
        is_available: true,
    },
    MethodSpec {
        id: "bank_transfer",
        name: "Bank Transfer",
        description: "NEFT, RTGS, IMPS or wire transfer",
        kind: MethodKind::BankTransfer,
        fee: FeeRule::Flat { amount: 25 },
        min_amount: 1_000,
        max_amount: 50_000_000,
        is_available: true,
    },
];

const LOCAL_METHODS: &[(&str, &[MethodSpec])] = &[
    (
        "IN",
        &[
            MethodSpec {
                id: "upi",
                name: "UPI",
                description: "Google Pay, PhonePe, BHIM or any UPI app",
                kind: MethodKind::Upi,
                fee: FeeRule::Flat { amount: 0 },
                min_amount: 1,
                max_amount: 200_000,
                is_available: true,
            },
            MethodSpec {
                id: "paytm",
                name: "Paytm Wallet",
                description: "Pay from your Paytm wallet balance",
                kind: MethodKind::Wallet,
                fee: FeeRule::Percentage {
                    percentage: 1.5,
                    flat: 0.0,
                },
                min_amount: 1,
                max_amount: 100_000,
                is_available: true,
            },
        ],
    ),
    (
        "KE",
        &[MethodSpec {
            id: "mpesa",
            name: "M-Pesa",
            description: "Pay with Safaricom M-Pesa",
            kind: MethodKind::Wallet,
            fee: FeeRule::Percentage {
                percentage: 1.0,
                flat: 0.0,
            },
            min_amount: 10,
            max_amount: 300_000,
            is_available: true,
        }],
    ),
    (
        "BD",
        &[
            MethodSpec {
                id: "bkash",
                name: "bKash",
                description: "Pay with your bKash account",
                kind: MethodKind::Wallet,
                fee: FeeRule::Percentage {
                    percentage: 1.85,
                    flat: 0.0,
                },
                min_amount: 10,
                max_amount: 500_000,
                is_available: true,
            },
            MethodSpec {
                id: "nagad",
                name: "Nagad",
                description: "Pay with your Nagad account",
                kind: MethodKind::Wallet,
                fee: FeeRule::Percentage {
                    percentage: 1.5,
                    flat: 0.0,
                },
                min_amount: 10,
                max_amount: 500_000,
                is_available: true,
            },
        ],
    ),
    (
        "PK",
        &[
            MethodSpec {
                id: "jazzcash",
                name: "JazzCash",
                description: "Pay with your JazzCash mobile account",
                kind: MethodKind::Wallet,
                fee: FeeRule::Percentage {
                    percentage: 1.5,
                    flat: 0.0,
                },
                min_amount: 10,
                max_amount: 1_000_000,
                is_available: true,
            },
            MethodSpec {
                id: "easypaisa",
                name: "Easypaisa",
                description: "Pay with your Easypaisa mobile account",
                kind: MethodKind::Wallet,
                fee: FeeRule::Percentage {
                    percentage: 1.5,
                    flat: 0.0,
                },
                min_amount: 10,
                max_amount: 1_000_000,
                is_available: true,
            },
        ],
    ),
];

/// Look up a supported country by ISO code, case-insensitively.
pub fn country(code: &str) -> Result<CountryConfig, BookingError> {
    COUNTRIES
        .iter()
        .find(|c| c.code.eq_ignore_ascii_case(code.trim()))
        .copied()
        .ok_or_else(|| BookingError::UnknownCountry(code.to_string()))
}

/// Payment methods offered in `country_code`: the base list followed by the
/// country's local methods.
pub fn methods_for(country_code: &str) -> Vec<PaymentMethod> {
    let local = LOCAL_METHODS
        .iter()
        .filter(|(code, _)| code.eq_ignore_ascii_case(country_code.trim()))
        .flat_map(|(_, specs)| specs.iter());

    BASE_METHODS
        .iter()
        .chain(local)
        .map(MethodSpec::to_method)
        .collect()
}

/// Read-only access to the vendor service catalog.
pub trait ServiceCatalog: Send + Sync {
    fn services(&self) -> Vec<ServiceOffering>;

    fn find(&self, service_id: &str) -> Option<ServiceOffering>;

    fn services_for_vendor(&self, vendor_id: &str) -> Vec<ServiceOffering> {
        self.services()
            .into_iter()
            .filter(|s| s.vendor_id == vendor_id)
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryServiceCatalog {
    services: Vec<ServiceOffering>,
}

impl InMemoryServiceCatalog {
    pub fn new(services: Vec<ServiceOffering>) -> Self {
        Self { services }
    }
}

impl ServiceCatalog for InMemoryServiceCatalog {
    fn services(&self) -> Vec<ServiceOffering> {
        self.services.clone()
    }

    fn find(&self, service_id: &str) -> Option<ServiceOffering> {
        self.services.iter().find(|s| s.id == service_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(methods: &[PaymentMethod]) -> Vec<&str> {
        methods.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn test_base_methods_come_first() {
        let methods = methods_for("IN");
        assert_eq!(
            ids(&methods),
            vec!["card", "paypal", "stripe", "bank_transfer", "upi", "paytm"]
        );
    }

    #[test]
    fn test_country_without_wallets_gets_base_only() {
        assert_eq!(
            ids(&methods_for("US")),
            vec!["card", "paypal", "stripe", "bank_transfer"]
        );
        assert_eq!(methods_for("ZZ").len(), 4);
    }

    #[test]
    fn test_country_code_is_case_insensitive() {
        assert_eq!(ids(&methods_for("ke")).last(), Some(&"mpesa"));
        assert_eq!(country("in").unwrap().currency_code, "INR");
    }

    #[test]
    fn test_unknown_country() {
        assert_eq!(
            country("XX"),
            Err(BookingError::UnknownCountry("XX".to_string()))
        );
    }

    #[test]
    fn test_every_local_table_has_a_country() {
        for (code, _) in LOCAL_METHODS {
            assert!(country(code).is_ok(), "no country entry for {}", code);
        }
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog = InMemoryServiceCatalog::new(vec![
            ServiceOffering {
                id: "photo-basic".to_string(),
                vendor_id: "lens".to_string(),
                name: "Basic Photography".to_string(),
                price: 50_000,
                description: String::new(),
            },
            ServiceOffering {
                id: "decor".to_string(),
                vendor_id: "bloom".to_string(),
                name: "Decor".to_string(),
                price: 85_000,
                description: String::new(),
            },
        ]);

        assert_eq!(catalog.find("decor").unwrap().price, 85_000);
        assert!(catalog.find("missing").is_none());
        assert_eq!(catalog.services_for_vendor("lens").len(), 1);
    }
}
