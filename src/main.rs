//! mealplan - Local-first diet planning with nutrition stats and PDF export

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = mealplan_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
