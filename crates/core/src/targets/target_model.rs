//! Target domain models.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{EUR_USD_DIVISOR, NET_SHARE};
use crate::errors::Error;

/// Currencies a target can be entered in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    #[default]
    Eur,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            _ => Err(Error::UnsupportedCurrency(s.to_string())),
        }
    }
}

/// Earnings goal as entered by the user.
///
/// Only the entered value and its currency are stored. The displayed and
/// compared amounts are derived on every read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    pub original_value: Decimal,
    pub currency: Currency,
}

impl Target {
    pub fn new(original_value: Decimal, currency: Currency) -> Self {
        Target {
            original_value,
            currency,
        }
    }

    /// The "no target" sentinel used when the user skips target entry.
    pub fn none() -> Self {
        Target::new(Decimal::ZERO, Currency::Usd)
    }

    /// USD-equivalent gross amount shown to the user. Saturates at
    /// `Decimal::MAX` for values too large to gross up.
    pub fn display_value(&self) -> Decimal {
        let gross = match self.currency {
            Currency::Usd => self.original_value.checked_div(NET_SHARE),
            Currency::Eur => self
                .original_value
                .checked_div(EUR_USD_DIVISOR)
                .and_then(|usd| usd.checked_div(NET_SHARE)),
        };
        gross.unwrap_or(Decimal::MAX)
    }

    /// Amount compared against total earnings. EUR targets are compared
    /// as entered.
    pub fn comparison_value(&self) -> Decimal {
        match self.currency {
            Currency::Usd => self
                .original_value
                .checked_div(NET_SHARE)
                .unwrap_or(Decimal::MAX),
            Currency::Eur => self.original_value,
        }
    }

    pub fn is_set(&self) -> bool {
        self.comparison_value() > Decimal::ZERO
    }

    /// Celebration condition for the given total.
    pub fn is_reached_by(&self, total_earnings: Decimal) -> bool {
        let comparison = self.comparison_value();
        comparison > Decimal::ZERO && total_earnings >= comparison
    }

    pub fn view(&self) -> TargetView {
        TargetView {
            original_value: self.original_value,
            currency: self.currency,
            display_value: self.display_value(),
            comparison_value: self.comparison_value(),
        }
    }
}

/// Read model of a target including its derived amounts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TargetView {
    pub original_value: Decimal,
    pub currency: Currency,
    pub display_value: Decimal,
    pub comparison_value: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_usd_target_is_grossed_up() {
        let target = Target::new(dec!(70), Currency::Usd);
        assert_eq!(target.comparison_value(), dec!(100));
        assert_eq!(target.display_value(), dec!(100));
    }

    #[test]
    fn test_eur_target_compares_as_entered() {
        let target = Target::new(dec!(80), Currency::Eur);
        assert_eq!(target.comparison_value(), dec!(80));
        assert_eq!(target.display_value().round_dp(3), dec!(142.857));
    }

    #[test]
    fn test_zero_target_is_never_reached() {
        let target = Target::none();
        assert!(!target.is_set());
        assert!(!target.is_reached_by(dec!(1000)));
    }

    #[test]
    fn test_reached_at_threshold() {
        let target = Target::new(dec!(70), Currency::Usd);
        assert!(!target.is_reached_by(dec!(99.99)));
        assert!(target.is_reached_by(dec!(100)));
        assert!(target.is_reached_by(dec!(150)));
    }

    #[test]
    fn test_huge_target_saturates() {
        let usd = Target::new(Decimal::MAX, Currency::Usd);
        assert_eq!(usd.display_value(), Decimal::MAX);
        assert_eq!(usd.comparison_value(), Decimal::MAX);
        assert!(!usd.is_reached_by(dec!(1000000)));

        let eur = Target::new(Decimal::MAX, Currency::Eur);
        assert_eq!(eur.display_value(), Decimal::MAX);
        assert_eq!(eur.comparison_value(), Decimal::MAX);
    }

    #[test]
    fn test_currency_parsing() {
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::Usd);
        assert_eq!(" EUR ".parse::<Currency>().unwrap(), Currency::Eur);
        assert!(matches!(
            "GBP".parse::<Currency>(),
            Err(Error::UnsupportedCurrency(code)) if code == "GBP"
        ));
    }

    #[test]
    fn test_default_target_is_zero_eur() {
        let target = Target::default();
        assert_eq!(target.original_value, Decimal::ZERO);
        assert_eq!(target.currency, Currency::Eur);
        assert_eq!(Target::none().currency, Currency::Usd);
    }

    #[test]
    fn test_view_carries_derived_values() {
        let view = Target::new(dec!(70), Currency::Usd).view();
        assert_eq!(view.display_value, dec!(100));
        assert_eq!(view.comparison_value, dec!(100));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["currency"], "USD");
        assert!(json.get("displayValue").is_some());
    }
}
