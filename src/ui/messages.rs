//! Console output for the user. Diagnostics go through `tracing` instead.

use std::fmt;

/// ANSI colors
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLUE: &str = "\x1b[34m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Info,
    Success,
    Warning,
    Error,
}

impl Tone {
    fn color(self) -> &'static str {
        match self {
            Tone::Info => FG_BLUE,
            Tone::Success => FG_GREEN,
            Tone::Warning => FG_YELLOW,
            Tone::Error => FG_RED,
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Tone::Info => "ℹ️",
            Tone::Success => "✅",
            Tone::Warning => "⚠️",
            Tone::Error => "❌",
        }
    }
}

fn emit<T: fmt::Display>(tone: Tone, msg: T) {
    let line = format!("{}{}{} {}{}", tone.color(), BOLD, tone.icon(), RESET, msg);
    if tone == Tone::Error {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

pub fn info<T: fmt::Display>(msg: T) {
    emit(Tone::Info, msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    emit(Tone::Success, msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    emit(Tone::Warning, msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    emit(Tone::Error, msg);
}
