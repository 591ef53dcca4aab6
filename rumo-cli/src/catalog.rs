use colored::Colorize;
use rumo_lib::{
    catalog::{EXPEDITIONS, SELLERS, Status},
    money::format_brl,
};
use strum::IntoEnumIterator;
use sysexits::ExitCode;

pub fn handle() -> ExitCode {
    println!("{}", "Passeios".bold());
    for expedition in EXPEDITIONS {
        println!(
            "  {:<22}{:<34}{:>12}",
            expedition.id(),
            expedition.name(),
            format_brl(expedition.default_value())
        );
    }

    println!("{}", "Vendedores".bold());
    for seller in SELLERS {
        println!("  {seller}");
    }

    println!("{}", "Status".bold());
    for status in Status::iter() {
        println!("  {status}");
    }

    ExitCode::Ok
}
