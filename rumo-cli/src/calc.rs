use colored::Colorize;
use rumo_lib::{
    config::Cfg, form::RegisterForm, money::format_brl, revenue::Cost, schema::Field,
};
use strum::IntoEnumIterator;
use sysexits::ExitCode;

use crate::fields::Values;

pub fn handle(cfg: &Cfg, values: &Values) -> ExitCode {
    let mut form = RegisterForm::new(cfg.read().cost_defaults);
    for message in values.messages() {
        form.update(message);
    }

    let record = form.record();
    if let Some(expedition) = record.expedition {
        println!("{}", expedition.name().bold());
    }
    println!("{:<20}{:>14}", "Valor base", format_brl(record.base_value()));
    for cost in Cost::iter() {
        println!(
            "{:<20}{:>14}",
            Field::from(cost).display_label(),
            format!("- {}", format_brl(record.costs.get(cost)))
        );
    }
    println!(
        "{:<20}{:>14}",
        "Receita livre".bold(),
        form.free_revenue_label().bold()
    );

    ExitCode::Ok
}
