use colored::Colorize;
use std::fmt;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
}

fn apply_style(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()).bold().to_string(),
        MessageKind::Info => format!("[i] {text}").dimmed().to_string(),
        MessageKind::Success => format!("[+] {text}").green().to_string(),
        MessageKind::Warning => format!("[!] {text}").yellow().to_string(),
        MessageKind::Error => format!("[x] {text}").red().to_string(),
    }
}

pub fn emit(kind: MessageKind, message: impl fmt::Display) {
    println!("{}", apply_style(kind, message));
}

pub fn info(message: impl fmt::Display) {
    emit(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    emit(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    emit(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    emit(MessageKind::Error, message);
}

pub fn section(message: impl fmt::Display) {
    emit(MessageKind::Section, message);
}

/// Maps a category's symbolic icon name to a terminal glyph. Unrecognized
/// names fall back to a defined placeholder; this never fails.
pub fn icon_glyph(name: &str) -> &'static str {
    match name {
        "Utensils" => "🍜",
        "Bus" => "🚌",
        "Home" => "🏠",
        "ShoppingBag" => "🛍",
        "Gamepad2" => "🎮",
        "HeartPulse" => "💊",
        "BookOpen" => "📖",
        "Gift" => "🎁",
        "TrendingDown" => "📉",
        "TrendingUp" => "📈",
        "MoreHorizontal" => "⋯",
        "Briefcase" => "💼",
        "Percent" => "％",
        "Award" => "🏅",
        "Tag" => "🏷",
        _ => "•",
    }
}
