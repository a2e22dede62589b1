// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

fn force_color() {
    std::env::set_var("COLOR", "1");
    std::env::remove_var("NO_COLOR");
}

fn disable_color() {
    std::env::set_var("NO_COLOR", "1");
    std::env::remove_var("COLOR");
}

#[test]
#[serial]
fn styles_returns_styled_when_color_forced() {
    force_color();
    let debug = format!("{:?}", styles());
    assert_ne!(debug, format!("{:?}", clap::builder::styling::Styles::plain()));
}

#[test]
#[serial]
fn styles_returns_plain_when_no_color() {
    disable_color();
    let debug = format!("{:?}", styles());
    assert_eq!(debug, format!("{:?}", clap::builder::styling::Styles::plain()));
}

#[test]
#[serial]
fn header_produces_ansi_when_color_forced() {
    force_color();
    let result = header("nmap");
    assert!(result.contains("\x1b[38;5;74m"), "expected ANSI header color");
    assert!(result.contains("nmap"));
    assert!(result.contains("\x1b[0m"), "expected ANSI reset");
}

#[yare::parameterized(
    completed = { ScanStatus::Completed, codes::GOOD },
    failed    = { ScanStatus::Failed, codes::BAD },
    started   = { ScanStatus::Started, codes::PENDING },
)]
#[serial]
fn status_colors_by_state(s: ScanStatus, code: u8) {
    force_color();
    let result = status(s);
    assert!(result.contains(&format!("\x1b[38;5;{code}m")), "{result:?}");
    assert!(result.contains(&s.to_string()));
}

#[test]
#[serial]
fn no_color_returns_plain_text() {
    disable_color();
    assert_eq!(header("x"), "x");
    assert_eq!(muted("x"), "x");
    assert_eq!(status(ScanStatus::Failed), "failed");
    assert_eq!(available(true), "yes");
    assert_eq!(available(false), "no");
}
