//! The revenue record: the single entity edited by the form and exchanged with the
//! webhook.

use chrono::NaiveDate;
use derive_more::Display;
use rust_decimal::Decimal;
use serde_json::Value;
use strum::Display as StrumDisplay;

use crate::{
    Error, Result,
    catalog::{Expedition, Status},
    revenue::{self, Costs},
    schema::Field,
};

pub mod date;

/// Reference to the spreadsheet row a record was read from. Only records hydrated from a
/// remote listing carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub struct RowNumber(u64);

impl RowNumber {
    pub fn new(row: u64) -> Option<Self> {
        (row > 0).then_some(Self(row))
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// Read a row reference from a JSON value. Zero, negative and non-integer values
    /// count as absent.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_u64().and_then(Self::new),
            Value::String(s) => s.trim().parse().ok().and_then(Self::new),
            _ => None,
        }
    }
}

/// Whether a submission creates a new row or rewrites an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
}

/// An expedition revenue entry as held in memory while it is being edited.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RevenueRecord {
    pub date: Option<NaiveDate>,
    pub expedition: Option<&'static Expedition>,
    /// Internal seller
    pub seller: String,
    pub external_seller: String,
    pub client_name: String,
    pub id_vehicle: String,
    pub observation: String,
    pub package_value: Decimal,
    /// Overrides `package_value` as the base of the calculation when set
    pub individual_value: Option<Decimal>,
    pub costs: Costs,
    pub status: Option<Status>,
    pub row_number: Option<RowNumber>,
}

impl RevenueRecord {
    /// An empty record with the given cost defaults applied.
    pub fn new(cost_defaults: Costs) -> Self {
        Self {
            costs: cost_defaults,
            ..Self::default()
        }
    }

    /// Select an expedition, resetting the base value to its catalog default.
    pub fn select_expedition(&mut self, expedition: &'static Expedition) {
        self.expedition = Some(expedition);
        self.package_value = expedition.default_value();
        self.individual_value = None;
    }

    pub fn base_value(&self) -> Decimal {
        self.individual_value.unwrap_or(self.package_value)
    }

    pub fn free_revenue(&self) -> Decimal {
        revenue::free_revenue(self.base_value(), &self.costs)
    }

    pub fn operation(&self) -> Operation {
        match self.row_number {
            Some(_) => Operation::Update,
            None => Operation::Create,
        }
    }

    /// Required fields that are still empty, in form order.
    pub fn missing_fields(&self) -> Vec<Field> {
        let mut missing = Vec::new();
        if self.date.is_none() {
            missing.push(Field::Date);
        }
        if self.expedition.is_none() {
            missing.push(Field::Expedition);
        }
        if self.status.is_none() {
            missing.push(Field::Status);
        }
        missing
    }

    pub fn validate(&self) -> Result<()> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation { missing })
        }
    }
}
