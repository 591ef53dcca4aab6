//! Talking to the automation webhook that stores revenue entries.

use std::future::Future;

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::{
    Result,
    record::{Operation, RevenueRecord},
    schema,
};

pub mod client;
pub mod listing;

pub use client::WebhookClient;
pub use listing::OpenEntry;

/// The remote store of revenue entries.
pub trait Backend {
    /// Fetch the entries that are still open.
    fn list_open(&self) -> impl Future<Output = Result<Vec<OpenEntry>>> + Send;

    /// Create or update one entry.
    fn submit(&self, submission: &Submission) -> impl Future<Output = Result<()>> + Send;
}

/// A validated create-or-update request, ready to be posted.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub operation: Operation,
    pub free_revenue: Decimal,
    pub body: Map<String, Value>,
}

impl Submission {
    /// Validate the record's required fields and encode it.
    pub fn new(record: &RevenueRecord) -> Result<Self> {
        record.validate()?;

        Ok(Self {
            operation: record.operation(),
            free_revenue: record.free_revenue(),
            body: schema::encode(record),
        })
    }
}
