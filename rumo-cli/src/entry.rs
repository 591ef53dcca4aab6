use colored::Colorize;
use rumo_lib::{
    Session,
    controller::{Message, OpenList, View},
    form,
    money::format_brl,
    record::RowNumber,
    sync::{Backend, OpenEntry},
};
use sysexits::ExitCode;

use crate::{fields::Fields, notice};

pub async fn new<B: Backend>(session: &mut Session<B>, fields: &Fields) -> ExitCode {
    session.dispatch(Message::NewPressed).await;
    submit(session, fields).await
}

pub async fn edit<B: Backend>(session: &mut Session<B>, row: u64, fields: &Fields) -> ExitCode {
    let entries = match load(session).await {
        Ok(entries) => entries,
        Err(code) => return code,
    };

    let Some(index) = entries
        .iter()
        .position(|entry| entry.record().row_number.map(RowNumber::get) == Some(row))
    else {
        notice::failure("Erro", &format!("Nenhuma receita aberta na linha {row}"));
        return ExitCode::NoInput;
    };

    session.dispatch(Message::EntrySelected(index)).await;
    submit(session, fields).await
}

pub async fn open<B: Backend>(session: &mut Session<B>) -> ExitCode {
    let entries = match load(session).await {
        Ok(entries) => entries,
        Err(code) => return code,
    };

    if entries.is_empty() {
        println!("Nenhuma receita em aberto");
    }
    for entry in &entries {
        println!("{}", row(entry));
    }

    ExitCode::Ok
}

fn row(entry: &OpenEntry) -> String {
    let number = entry
        .record()
        .row_number
        .map_or_else(|| "-".to_string(), |row| row.to_string());

    format!(
        "{:>5}  {}  {}  {}  {}  {}",
        number.bold(),
        entry.date_label(),
        entry.expedition_label(),
        entry.client_name(),
        format_brl(*entry.package_value()),
        entry.status_label().dimmed()
    )
}

async fn load<B: Backend>(session: &mut Session<B>) -> Result<Vec<OpenEntry>, ExitCode> {
    session.dispatch(Message::BrowsePressed).await;

    let notices = session.take_notices();
    notice::show_all(&notices);
    if notice::has_error(&notices) {
        return Err(ExitCode::Unavailable);
    }

    match session.controller().view() {
        View::OpenList(OpenList::Loaded(entries)) => Ok(entries.clone()),
        _ => Err(ExitCode::Software),
    }
}

async fn submit<B: Backend>(session: &mut Session<B>, fields: &Fields) -> ExitCode {
    for message in fields.messages() {
        session.dispatch(Message::Form(message)).await;
    }

    if let View::Register(form) = session.controller().view() {
        println!(
            "{}: receita livre {}",
            form.title().bold(),
            form.free_revenue_label()
        );
    }

    session
        .dispatch(Message::Form(form::Message::SubmitPressed))
        .await;
    notice::show_all(&session.take_notices());

    match session.controller().view() {
        View::Menu => ExitCode::Ok,
        View::Register(form) if !form.record().missing_fields().is_empty() => ExitCode::DataErr,
        _ => ExitCode::Unavailable,
    }
}
