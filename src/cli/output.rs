//! Terminal output for items and mutation results
//!
//! Colors follow NO_COLOR, CLICOLOR and CLICOLOR_FORCE via `colored`.
//! Data lines (trees, rows, exports) stay uncolored so they can be piped.

use std::fmt::Display;

use colored::Colorize;

use crate::domain::{Item, ItemId};

/// Red bold "error:" prefix on stderr
pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Green check followed by what happened to `id`, e.g. "moved 3"
pub fn mutation(verb: &str, id: &ItemId) {
    println!("{} {} {}", "✓".green(), verb, id.to_string().bold());
}

/// One record dropped by a cascading remove
pub fn removed(item: &Item) {
    println!("  {} {} {}", "-".red(), item.label, format!("[{}]", item.id).dimmed());
}

/// Label in cyan with the id dimmed next to it
pub fn item_header(item: &Item) {
    println!(
        "{} {}",
        item.label.cyan().bold(),
        format!("[{}]", item.id).dimmed()
    );
}

pub fn field(key: &str, value: &(impl Display + ?Sized)) {
    println!("  {}: {}", key.dimmed(), value);
}

/// Plain data line
pub fn line(msg: &(impl Display + ?Sized)) {
    println!("{}", msg);
}
