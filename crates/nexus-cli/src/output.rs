//! Rendering of command results as tables or JSON.

use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Render rows; an empty table renders as a notice line.
pub fn render_list<T: Serialize + Tabled>(rows: &[T], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(rows),
        OutputFormat::Table if rows.is_empty() => "No results found.".to_string(),
        OutputFormat::Table => Table::new(rows).with(Style::sharp()).to_string(),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
}

pub fn print_list<T: Serialize + Tabled>(rows: &[T], format: OutputFormat) {
    println!("{}", render_list(rows, format));
}

pub fn print_json<T: Serialize>(value: &T) {
    println!("{}", to_json(value));
}

pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

pub fn print_warning(msg: &str) {
    println!("⚠ {msg}");
}

pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

/// Aligned `key: value` line.
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<24} {value}", format!("{key}:"));
}
