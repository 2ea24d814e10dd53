//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use std::fmt::Display;
use std::io::{self, Write};

use colored::Colorize;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Write section header (cyan bold)
pub fn header(w: &mut impl Write, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(w, "{}", msg.to_string().cyan().bold())
}

/// Write the current location (bold)
pub fn location(w: &mut impl Write, label: &str, name: &str) -> io::Result<()> {
    writeln!(w, "{} {}", label, name.bold())
}

/// Write a corrective notice (yellow) followed by a blank line
pub fn notice(w: &mut impl Write, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(w, "{}\n", msg.to_string().yellow())
}

/// Write a closing line (green)
pub fn closing(w: &mut impl Write, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(w, "{}", msg.to_string().green())
}

/// Write plain output (no color)
pub fn info(w: &mut impl Write, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(w, "{}", msg)
}

/// Write prompt without newline (cyan) and flush
pub fn prompt(w: &mut impl Write, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    write!(w, "{} ", msg.to_string().cyan())?;
    w.flush()
}
