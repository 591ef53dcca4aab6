//! The register/edit form.
//!
//! Every input message updates the in-memory record and recomputes the free revenue
//! before returning, so the derived value shown next to the form is never stale.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::{
    Error,
    catalog::{Status, resolve_expedition},
    money::{coerce_amount, format_brl},
    record::{RevenueRecord, date::parse_date},
    revenue::{Cost, Costs},
    schema::Field,
    sync::Submission,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    DateInput(String),
    ExpeditionSelected(String),
    SellerInput(String),
    ExternalSellerInput(String),
    ClientNameInput(String),
    IdVehicleInput(String),
    ObservationInput(String),
    PackageValueInput(String),
    IndividualValueInput(String),
    CostInput(Cost, String),
    StatusSelected(String),
    CancelPressed,
    SubmitPressed,
}

#[derive(Debug)]
pub enum Action {
    None,
    Cancel,
    Submit(Submission),
    Invalid(Vec<Field>),
}

#[derive(Debug, Clone)]
pub struct RegisterForm {
    record: RevenueRecord,
    free_revenue: Decimal,
    cost_defaults: Costs,
    submitting: bool,
}

impl RegisterForm {
    /// A blank form for a new entry.
    pub fn new(cost_defaults: Costs) -> Self {
        Self::from_record(RevenueRecord::new(cost_defaults), cost_defaults)
    }

    /// A form pre-filled with an existing entry.
    pub fn from_record(record: RevenueRecord, cost_defaults: Costs) -> Self {
        let free_revenue = record.free_revenue();
        Self {
            record,
            free_revenue,
            cost_defaults,
            submitting: false,
        }
    }

    pub fn record(&self) -> &RevenueRecord {
        &self.record
    }

    pub fn free_revenue(&self) -> Decimal {
        self.free_revenue
    }

    /// Whether this form edits an entry that already exists remotely.
    pub fn is_editing(&self) -> bool {
        self.record.row_number.is_some()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn title(&self) -> &'static str {
        if self.is_editing() {
            "Editar Receita"
        } else {
            "Nova Receita"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() {
            "Atualizar Receita"
        } else {
            "Salvar Receita"
        }
    }

    pub fn free_revenue_label(&self) -> String {
        format_brl(self.free_revenue)
    }

    /// Called when a submission finished without success, so it can be retried.
    pub(crate) fn submission_failed(&mut self) {
        self.submitting = false;
    }

    /// Reset the form state
    pub fn clear(&mut self) {
        self.record = RevenueRecord::new(self.cost_defaults);
        self.submitting = false;
        self.recalculate();
    }

    pub fn update(&mut self, message: Message) -> Action {
        match message {
            Message::DateInput(content) => {
                self.record.date = parse_date(&content);
                if self.record.date.is_none() && !content.trim().is_empty() {
                    warn!("Unrecognized date {content:?}, leaving it empty");
                }
            }
            Message::ExpeditionSelected(label) => match resolve_expedition(&label) {
                Some(expedition) => self.record.select_expedition(expedition),
                None => warn!("Unknown expedition {label:?}"),
            },
            Message::SellerInput(content) => self.record.seller = content,
            Message::ExternalSellerInput(content) => self.record.external_seller = content,
            Message::ClientNameInput(content) => self.record.client_name = content,
            Message::IdVehicleInput(content) => self.record.id_vehicle = content,
            Message::ObservationInput(content) => self.record.observation = content,
            Message::PackageValueInput(content) => {
                self.record.package_value = coerce_amount(&content);
            }
            Message::IndividualValueInput(content) => {
                // An empty input drops the override and falls back to the package value
                self.record.individual_value = if content.trim().is_empty() {
                    None
                } else {
                    Some(coerce_amount(&content))
                };
            }
            Message::CostInput(cost, content) => {
                self.record.costs.set(cost, coerce_amount(&content));
            }
            Message::StatusSelected(content) => {
                self.record.status = if content.trim().is_empty() {
                    None
                } else {
                    Status::from_str(content.trim())
                        .inspect_err(|_| warn!("Unknown status {content:?}"))
                        .ok()
                };
            }
            Message::CancelPressed => {
                self.clear();
                return Action::Cancel;
            }
            Message::SubmitPressed => return self.submit(),
        }

        self.recalculate();
        Action::None
    }

    fn submit(&mut self) -> Action {
        if self.submitting {
            debug!("Submission already in flight, ignoring");
            return Action::None;
        }

        match Submission::new(&self.record) {
            Ok(submission) => {
                self.submitting = true;
                Action::Submit(submission)
            }
            Err(Error::Validation { missing }) => Action::Invalid(missing),
            Err(e) => {
                warn!("Unexpected error while preparing submission: {e}");
                Action::None
            }
        }
    }

    fn recalculate(&mut self) {
        self.free_revenue = self.record.free_revenue();
    }
}
