// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::builder::styling::{Ansi256Color, Color, Style, Styles};
use sr_core::ScanStatus;
use std::io::IsTerminal;

pub mod codes {
    /// Section headers and tool names: steel blue
    pub const HEADER: u8 = 74;
    /// Commands and literals: light grey
    pub const LITERAL: u8 = 250;
    /// Descriptions and context: medium grey
    pub const CONTEXT: u8 = 245;
    /// Muted / secondary text: darker grey
    pub const MUTED: u8 = 240;
    /// Completed scans
    pub const GOOD: u8 = 108;
    /// Failed scans
    pub const BAD: u8 = 167;
    /// Scans still marked started
    pub const PENDING: u8 = 179;
}

/// Determine if color output should be enabled.
///
/// Priority: `NO_COLOR=1` disables, then `COLOR=1` forces, then TTY check.
pub fn should_colorize() -> bool {
    if std::env::var("NO_COLOR").is_ok_and(|v| v == "1") {
        return false;
    }
    if std::env::var("COLOR").is_ok_and(|v| v == "1") {
        return true;
    }
    std::io::stdout().is_terminal()
}

/// Build clap `Styles` using the project palette.
pub fn styles() -> Styles {
    if !should_colorize() {
        return Styles::plain();
    }
    Styles::styled()
        .header(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::HEADER)))))
        .literal(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::LITERAL)))))
        .placeholder(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::CONTEXT)))))
}

const RESET: &str = "\x1b[0m";

fn paint(code: u8, text: &str) -> String {
    if should_colorize() {
        format!("\x1b[38;5;{code}m{text}{RESET}")
    } else {
        text.to_string()
    }
}

/// Format text with the header color.
pub fn header(text: &str) -> String {
    paint(codes::HEADER, text)
}

/// Format text with the muted color.
pub fn muted(text: &str) -> String {
    paint(codes::MUTED, text)
}

/// Ledger status word, colored by state.
pub fn status(status: ScanStatus) -> String {
    let code = match status {
        ScanStatus::Completed => codes::GOOD,
        ScanStatus::Failed => codes::BAD,
        ScanStatus::Started => codes::PENDING,
    };
    paint(code, &status.to_string())
}

/// `yes`/`no` availability marker.
pub fn available(ok: bool) -> String {
    if ok {
        paint(codes::GOOD, "yes")
    } else {
        paint(codes::BAD, "no")
    }
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
