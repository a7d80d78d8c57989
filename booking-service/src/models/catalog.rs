//! Externally owned lookups: vendor services and country settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceOffering {
    pub id: String,
    pub vendor_id: String,
    pub name: String,
    pub price: i64,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountryConfig {
    pub code: &'static str,
    pub name: &'static str,
    pub currency_code: &'static str,
    pub currency_symbol: &'static str,
}

impl CountryConfig {
    /// `symbol` followed by the amount with comma thousands separators.
    pub fn format_amount(&self, amount: i64) -> String {
        let digits = amount.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if amount < 0 { "-" } else { "" };
        format!("{}{}{}", sign, self.currency_symbol, grouped)
    }
}
