//! Console output helpers.
//!
//! Status lines go to stdout; `tracing` logs go to stderr.

use colored::Colorize;

use crate::provision::{PlannedRequest, ProvisionOutcome};

/// Print the tool header.
pub fn print_banner() {
    println!();
    println!("{}", "Azure Monitor alert provisioning".cyan().bold());
    println!("{}", "═".repeat(50).bright_black());
    println!();
}

/// Print a progress step with step number.
pub fn print_progress_step(current: u8, total: u8, message: &str) {
    println!(
        "{} {} {}",
        format!("[{current}/{total}]").bright_black(),
        "▶".cyan(),
        message.bold()
    );
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

/// Print a key-value pair.
pub fn print_kv(key: &str, value: &str) {
    println!("  {} {}", format!("{key}:").bright_black(), value.green());
}

/// Print the final banner after both resources exist.
pub fn print_complete(outcome: &ProvisionOutcome) {
    println!();
    println!(
        "{} {}",
        "🎉".bold(),
        "Done! Your alert and notification are set up.".green().bold()
    );
    print_kv("Action group", &outcome.action_group_id);
    print_kv("Alert rule", &outcome.alert_rule_id);
}

/// Print the requests a dry run would send.
pub fn print_plan(plan: &[PlannedRequest]) {
    for request in plan {
        println!();
        println!("{} {}", "PUT".cyan().bold(), request.url);
        println!("{}", format!("# {}", request.kind).bright_black());
        match serde_json::to_string_pretty(&request.body) {
            Ok(body) => println!("{body}"),
            Err(_) => println!("{}", request.body),
        }
    }
}
