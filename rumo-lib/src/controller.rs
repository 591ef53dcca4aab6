//! View state machine for the revenue entry workflow.
//!
//! The [`Controller`] owns the active [`View`] and everything the views need. It never
//! performs I/O itself: [`Controller::update`] returns an [`Effect`] describing the
//! request to make, and the outcome comes back as another [`Message`] tagged with the
//! [`Ticket`] the effect was issued under. Each activation of a view gets a fresh
//! ticket, so outcomes addressed to a view the user has already left are recognised and
//! dropped.

use derive_more::Display;
use rust_decimal::Decimal;
use tracing::{debug, error, info};

use crate::{
    Error, Result,
    config::Cfg,
    form::{self, RegisterForm},
    money::format_brl,
    record::Operation,
    schema::Field,
    sync::{OpenEntry, Submission},
};

/// Identifies one activation of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub struct Ticket(u64);

#[derive(Debug)]
pub enum Message {
    NewPressed,
    BrowsePressed,
    RefreshPressed,
    BackPressed,
    EntrySelected(usize),
    OpenLoaded {
        ticket: Ticket,
        result: Result<Vec<OpenEntry>>,
    },
    Submitted {
        ticket: Ticket,
        operation: Operation,
        free_revenue: Decimal,
        result: Result<()>,
    },
    // Child messages
    Form(form::Message),
}

/// Work the caller must carry out on behalf of the controller.
#[derive(Debug)]
pub enum Effect {
    None,
    FetchOpen(Ticket),
    Submit(Ticket, Submission),
}

#[derive(Debug, Clone)]
pub enum View {
    Menu,
    OpenList(OpenList),
    Register(RegisterForm),
}

#[derive(Debug, Clone, PartialEq)]
pub enum OpenList {
    Loading,
    Loaded(Vec<OpenEntry>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A short message for the user, shown once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub description: String,
}

impl Notice {
    fn success(title: &str, description: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    fn error(title: &str, description: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.into(),
            description: description.into(),
        }
    }
}

pub struct Controller {
    cfg: Cfg,
    view: View,
    ticket: Ticket,
    notices: Vec<Notice>,
}

impl Controller {
    pub fn new(cfg: Cfg) -> Self {
        Self {
            cfg,
            view: View::Menu,
            ticket: Ticket(0),
            notices: Vec::new(),
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    /// The ticket of the active view.
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    /// Drain the notices raised since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn update(&mut self, message: Message) -> Effect {
        match message {
            Message::NewPressed => {
                if matches!(self.view, View::Menu) {
                    let form = RegisterForm::new(self.cfg.read().cost_defaults);
                    self.enter(View::Register(form));
                } else {
                    debug!("Ignoring NewPressed outside the menu");
                }
                Effect::None
            }
            Message::BrowsePressed => {
                if matches!(self.view, View::Menu) {
                    let ticket = self.enter(View::OpenList(OpenList::Loading));
                    Effect::FetchOpen(ticket)
                } else {
                    debug!("Ignoring BrowsePressed outside the menu");
                    Effect::None
                }
            }
            Message::RefreshPressed => match &self.view {
                View::OpenList(OpenList::Loaded(_)) => {
                    let ticket = self.enter(View::OpenList(OpenList::Loading));
                    Effect::FetchOpen(ticket)
                }
                _ => Effect::None,
            },
            Message::BackPressed => {
                self.enter(View::Menu);
                Effect::None
            }
            Message::EntrySelected(index) => {
                let View::OpenList(OpenList::Loaded(entries)) = &self.view else {
                    return Effect::None;
                };

                match entries.get(index) {
                    Some(entry) => {
                        let form = RegisterForm::from_record(
                            entry.record().clone(),
                            self.cfg.read().cost_defaults,
                        );
                        self.enter(View::Register(form));
                    }
                    None => debug!("No open entry at index {index}"),
                }
                Effect::None
            }
            Message::OpenLoaded { ticket, result } => {
                self.open_loaded(ticket, result);
                Effect::None
            }
            Message::Submitted {
                ticket,
                operation,
                free_revenue,
                result,
            } => {
                self.submitted(ticket, operation, free_revenue, result);
                Effect::None
            }
            Message::Form(message) => self.update_form(message),
        }
    }

    fn update_form(&mut self, message: form::Message) -> Effect {
        let View::Register(form) = &mut self.view else {
            debug!("Ignoring form input outside the register view");
            return Effect::None;
        };

        match form.update(message) {
            form::Action::None => Effect::None,
            form::Action::Cancel => {
                self.enter(View::Menu);
                Effect::None
            }
            form::Action::Submit(submission) => Effect::Submit(self.ticket, submission),
            form::Action::Invalid(missing) => {
                self.notices.push(Notice::error(
                    "Erro",
                    format!(
                        "Preencha todos os campos obrigatórios: {}",
                        join_labels(&missing)
                    ),
                ));
                Effect::None
            }
        }
    }

    fn open_loaded(&mut self, ticket: Ticket, result: Result<Vec<OpenEntry>>) {
        if !self.is_current(ticket) || !matches!(self.view, View::OpenList(_)) {
            debug!("Dropping open listing for abandoned view {ticket}");
            return;
        }

        let entries = match result {
            Ok(entries) => {
                debug!("Loaded {} open entries", entries.len());
                entries
            }
            Err(e) => {
                error!("Failed to load open entries: {e}");
                self.notices.push(match e {
                    Error::Format(_) => Notice::error(
                        "Formato de dados inválido",
                        "Os dados recebidos não estão no formato esperado.",
                    ),
                    _ => Notice::error(
                        "Erro ao Carregar",
                        "Não foi possível buscar os dados. Verifique sua conexão.",
                    ),
                });
                Vec::new()
            }
        };

        self.view = View::OpenList(OpenList::Loaded(entries));
    }

    fn submitted(
        &mut self,
        ticket: Ticket,
        operation: Operation,
        free_revenue: Decimal,
        result: Result<()>,
    ) {
        let current = self.is_current(ticket);

        match result {
            Ok(()) => {
                info!("Revenue entry sent ({operation})");
                let title = match operation {
                    Operation::Create => "Receita Registrada!",
                    Operation::Update => "Receita Atualizada!",
                };
                self.notices.push(Notice::success(
                    title,
                    format!("Receita livre: {}", format_brl(free_revenue)),
                ));

                if current {
                    self.enter(View::Menu);
                } else {
                    debug!("Submission for abandoned view {ticket} finished, staying put");
                }
            }
            Err(e) => {
                error!("Failed to send revenue entry: {e}");
                self.notices.push(Notice::error(
                    "Erro ao enviar",
                    "Verifique sua conexão ou o endpoint do N8N.",
                ));

                if let (true, View::Register(form)) = (current, &mut self.view) {
                    form.submission_failed();
                }
            }
        }
    }

    /// Switch to `view` under a fresh ticket.
    fn enter(&mut self, view: View) -> Ticket {
        self.ticket = Ticket(self.ticket.0 + 1);
        self.view = view;
        self.ticket
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        self.ticket == ticket
    }
}

fn join_labels(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|field| field.display_label())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod test {
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;
    use crate::{config::CoreConfig, record::RowNumber, revenue::Cost, sync::listing};

    fn controller() -> Controller {
        Controller::new(CoreConfig::default().into_handle())
    }

    fn entries() -> Vec<OpenEntry> {
        listing::parse_listing(json!([
            {
                "Data de Entrada": "2025-01-15",
                "Passeio": "UTV 2L - 2 Horas / 2",
                "Valor do Passeio": 1650,
                "Custo Guia": 350,
                "STATUS": "ABERTO",
                "row_number": 8
            }
        ]))
        .unwrap()
    }

    fn register(controller: &Controller) -> &RegisterForm {
        match controller.view() {
            View::Register(form) => form,
            other => panic!("expected the register view, got {other:?}"),
        }
    }

    fn fill(controller: &mut Controller) {
        for message in [
            form::Message::DateInput("2025-01-15".into()),
            form::Message::ExpeditionSelected("utv2L2h".into()),
            form::Message::CostInput(Cost::Guides, "350".into()),
            form::Message::StatusSelected("ABERTO".into()),
        ] {
            assert!(matches!(
                controller.update(Message::Form(message)),
                Effect::None
            ));
        }
    }

    #[test]
    fn test_new_entry_flow() {
        let mut controller = controller();
        controller.update(Message::NewPressed);
        fill(&mut controller);

        assert_eq!(register(&controller).free_revenue(), dec!(1300));

        let ticket = controller.ticket();
        let Effect::Submit(effect_ticket, submission) =
            controller.update(Message::Form(form::Message::SubmitPressed))
        else {
            panic!("expected a submit effect");
        };
        assert_eq!(effect_ticket, ticket);
        assert_eq!(submission.operation, Operation::Create);

        controller.update(Message::Submitted {
            ticket,
            operation: submission.operation,
            free_revenue: submission.free_revenue,
            result: Ok(()),
        });

        assert!(matches!(controller.view(), View::Menu));
        assert_eq!(
            controller.take_notices(),
            vec![Notice::success("Receita Registrada!", "Receita livre: R$ 1300.00")]
        );
        assert!(controller.take_notices().is_empty());
    }

    #[test]
    fn test_invalid_submit_stays_on_form() {
        let mut controller = controller();
        controller.update(Message::NewPressed);

        let effect = controller.update(Message::Form(form::Message::SubmitPressed));

        assert!(matches!(effect, Effect::None));
        assert!(matches!(controller.view(), View::Register(_)));
        let notices = controller.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices.first().unwrap().kind, NoticeKind::Error);
        assert!(
            notices
                .first()
                .unwrap()
                .description
                .contains("Data de Entrada, Passeio, STATUS")
        );
    }

    #[test]
    fn test_failed_submit_can_retry() {
        let mut controller = controller();
        controller.update(Message::NewPressed);
        fill(&mut controller);
        let ticket = controller.ticket();
        controller.update(Message::Form(form::Message::SubmitPressed));

        controller.update(Message::Submitted {
            ticket,
            operation: Operation::Create,
            free_revenue: dec!(1300),
            result: Err(Error::Format("boom".into())),
        });

        assert!(!register(&controller).is_submitting());
        assert_eq!(
            controller.take_notices().first().unwrap().title,
            "Erro ao enviar"
        );
        assert!(matches!(
            controller.update(Message::Form(form::Message::SubmitPressed)),
            Effect::Submit(..)
        ));
    }

    #[test]
    fn test_browse_and_edit_flow() {
        let mut controller = controller();

        let Effect::FetchOpen(ticket) = controller.update(Message::BrowsePressed) else {
            panic!("expected a fetch effect");
        };
        assert!(controller.view_is_loading());

        controller.update(Message::OpenLoaded {
            ticket,
            result: Ok(entries()),
        });
        let View::OpenList(OpenList::Loaded(loaded)) = controller.view() else {
            panic!("expected a loaded list");
        };
        assert_eq!(loaded.len(), 1);

        controller.update(Message::EntrySelected(5));
        assert!(matches!(controller.view(), View::OpenList(_)));

        controller.update(Message::EntrySelected(0));
        let form = register(&controller);
        assert!(form.is_editing());
        assert_eq!(form.record().row_number, RowNumber::new(8));
        assert_eq!(form.free_revenue(), dec!(1300));

        let Effect::Submit(_, submission) =
            controller.update(Message::Form(form::Message::SubmitPressed))
        else {
            panic!("expected a submit effect");
        };
        assert_eq!(submission.operation, Operation::Update);
    }

    #[test]
    fn test_failed_listing_empties_list() {
        let mut controller = controller();
        let Effect::FetchOpen(ticket) = controller.update(Message::BrowsePressed) else {
            panic!("expected a fetch effect");
        };

        controller.update(Message::OpenLoaded {
            ticket,
            result: Err(Error::Status(reqwest::StatusCode::BAD_GATEWAY)),
        });

        assert!(matches!(
            controller.view(),
            View::OpenList(OpenList::Loaded(entries)) if entries.is_empty()
        ));
        assert_eq!(
            controller.take_notices().first().unwrap().title,
            "Erro ao Carregar"
        );
    }

    #[test]
    fn test_bad_listing_shape_notice() {
        let mut controller = controller();
        let Effect::FetchOpen(ticket) = controller.update(Message::BrowsePressed) else {
            panic!("expected a fetch effect");
        };

        controller.update(Message::OpenLoaded {
            ticket,
            result: Err(Error::Format("not an array".into())),
        });

        assert_eq!(
            controller.take_notices().first().unwrap().title,
            "Formato de dados inválido"
        );
    }

    #[test]
    fn test_listing_for_abandoned_view_is_dropped() {
        let mut controller = controller();
        let Effect::FetchOpen(stale) = controller.update(Message::BrowsePressed) else {
            panic!("expected a fetch effect");
        };
        controller.update(Message::BackPressed);
        controller.update(Message::NewPressed);

        controller.update(Message::OpenLoaded {
            ticket: stale,
            result: Ok(entries()),
        });

        assert!(matches!(controller.view(), View::Register(_)));
        assert!(controller.take_notices().is_empty());
    }

    #[test]
    fn test_refresh_supersedes_previous_fetch() {
        let mut controller = controller();
        let Effect::FetchOpen(first) = controller.update(Message::BrowsePressed) else {
            panic!("expected a fetch effect");
        };
        controller.update(Message::OpenLoaded {
            ticket: first,
            result: Ok(Vec::new()),
        });

        let Effect::FetchOpen(second) = controller.update(Message::RefreshPressed) else {
            panic!("expected a fetch effect");
        };
        assert!(second > first);

        controller.update(Message::OpenLoaded {
            ticket: first,
            result: Ok(entries()),
        });
        assert!(controller.view_is_loading());

        controller.update(Message::OpenLoaded {
            ticket: second,
            result: Ok(entries()),
        });
        assert!(!controller.view_is_loading());
    }

    #[test]
    fn test_submission_for_abandoned_view_only_notifies() {
        let mut controller = controller();
        controller.update(Message::NewPressed);
        fill(&mut controller);
        let ticket = controller.ticket();
        controller.update(Message::Form(form::Message::SubmitPressed));
        controller.update(Message::BackPressed);
        controller.update(Message::BrowsePressed);

        controller.update(Message::Submitted {
            ticket,
            operation: Operation::Create,
            free_revenue: dec!(1300),
            result: Ok(()),
        });

        assert!(controller.view_is_loading());
        assert_eq!(controller.take_notices().len(), 1);
    }

    #[test]
    fn test_cancel_returns_to_menu() {
        let mut controller = controller();
        controller.update(Message::NewPressed);
        controller.update(Message::Form(form::Message::CancelPressed));

        assert!(matches!(controller.view(), View::Menu));
    }

    #[test]
    fn test_menu_only_transitions() {
        let mut controller = controller();
        controller.update(Message::NewPressed);

        assert!(matches!(
            controller.update(Message::BrowsePressed),
            Effect::None
        ));
        assert!(matches!(controller.view(), View::Register(_)));
        assert!(matches!(
            controller.update(Message::RefreshPressed),
            Effect::None
        ));
    }

    #[test]
    fn test_new_uses_configured_defaults() {
        let mut cfg = CoreConfig::default();
        cfg.cost_defaults.fuel = dec!(91.2);
        let mut controller = Controller::new(cfg.into_handle());

        controller.update(Message::NewPressed);

        assert_eq!(register(&controller).record().costs.fuel, dec!(91.2));
    }

    impl Controller {
        fn view_is_loading(&self) -> bool {
            matches!(self.view, View::OpenList(OpenList::Loading))
        }
    }
}
