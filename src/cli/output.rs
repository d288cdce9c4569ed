//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a labeled path; missing ones are dimmed.
pub fn path_entry(label: &str, path: &std::path::Path, exists: bool) {
    let shown = path.display().to_string();
    if exists {
        println!("{}: {}", label.green(), shown);
    } else {
        println!("{}: {} {}", label.green(), shown.dimmed(), "(missing)".dimmed());
    }
}

/// Print plain output (no color, for rendered data)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    print!("{}", msg);
}
