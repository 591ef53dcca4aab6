use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};
use tracing::warn;

/// One of the five per-trip costs deducted from the base value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Cost {
    Guides,
    Commission,
    Ferry,
    Cooler,
    Fuel,
}

/// The five costs of a single expedition entry.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Costs {
    #[serde(with = "rust_decimal::serde::float")]
    pub guides: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub commission: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub ferry: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub cooler: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub fuel: Decimal,
}

impl Costs {
    pub fn get(&self, cost: Cost) -> Decimal {
        match cost {
            Cost::Guides => self.guides,
            Cost::Commission => self.commission,
            Cost::Ferry => self.ferry,
            Cost::Cooler => self.cooler,
            Cost::Fuel => self.fuel,
        }
    }

    pub fn set(&mut self, cost: Cost, value: Decimal) {
        let slot = match cost {
            Cost::Guides => &mut self.guides,
            Cost::Commission => &mut self.commission,
            Cost::Ferry => &mut self.ferry,
            Cost::Cooler => &mut self.cooler,
            Cost::Fuel => &mut self.fuel,
        };
        *slot = value;
    }

    /// Sum of the five costs, clamped to the representable range.
    pub fn total(&self) -> Decimal {
        [self.guides, self.commission, self.ferry, self.cooler, self.fuel]
            .into_iter()
            .fold(Decimal::ZERO, |sum, cost| {
                sum.checked_add(cost).unwrap_or_else(|| {
                    warn!("Cost total out of range, clamping");
                    sum.saturating_add(cost)
                })
            })
    }
}

/// Free revenue: the base value minus every cost. May be negative. Results beyond the
/// decimal range are clamped to its bounds.
pub fn free_revenue(base: Decimal, costs: &Costs) -> Decimal {
    let total = costs.total();
    base.checked_sub(total).unwrap_or_else(|| {
        warn!("Free revenue out of range, clamping");
        base.saturating_sub(total)
    })
}
