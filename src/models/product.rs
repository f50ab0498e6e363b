//! Product types the widget can run.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of flows offered by the embedded widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    /// Employment history verification
    #[default]
    Employment,
    /// Income and employment verification
    Income,
    /// Direct deposit switch
    DepositSwitch,
    /// Paycheck linked loan
    Pll,
    /// Admin flow
    Admin,
    /// Funding account switch
    Fas,
}

impl ProductType {
    /// All product types, in picker order.
    pub const ALL: [ProductType; 6] = [
        ProductType::Employment,
        ProductType::Income,
        ProductType::DepositSwitch,
        ProductType::Pll,
        ProductType::Admin,
        ProductType::Fas,
    ];

    /// The tag sent as `product_type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Employment => "employment",
            ProductType::Income => "income",
            ProductType::DepositSwitch => "deposit_switch",
            ProductType::Pll => "pll",
            ProductType::Admin => "admin",
            ProductType::Fas => "fas",
        }
    }

    /// Label shown in the product picker.
    pub fn label(&self) -> &'static str {
        match self {
            ProductType::Employment => "Employment history",
            ProductType::Income => "Income and employment",
            ProductType::DepositSwitch => "Direct deposit switch",
            ProductType::Pll => "Paycheck Linked Loan",
            ProductType::Admin => "Admin",
            ProductType::Fas => "Funding account switch",
        }
    }

    /// Whether the bank account fields take part in this flow.
    pub fn requires_account(&self) -> bool {
        matches!(self, ProductType::DepositSwitch | ProductType::Pll)
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the six product tags.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown product type '{0}'")]
pub struct ParseProductTypeError(pub String);

impl FromStr for ProductType {
    type Err = ParseProductTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ProductType::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ParseProductTypeError(s.to_string()))
    }
}
