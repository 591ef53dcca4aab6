//! Revenue entry for Rumo dos Ventos expeditions.
//!
//! The crate owns everything below the presentation layer: the expedition catalog, the
//! free revenue calculation, the mapping between the webhook's field names and the local
//! record, the webhook client, and the [`Controller`] that drives the menu, open list
//! and register views.

pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod fs;
pub mod money;
pub mod record;
pub mod revenue;
pub mod schema;
pub mod session;
pub mod sync;

pub use controller::Controller;
pub use error::{Error, Result};
pub use record::RevenueRecord;
pub use session::Session;
