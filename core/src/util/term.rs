use crossterm::style::Colored;

use crate::config::ColorMode;
use crate::line::StreamRole;

/// Advisory check on a `TERM` value; never required for correct output.
pub fn term_has_colors(term: Option<&str>) -> bool {
    match term {
        Some(t) => t.ends_with("color") || t.starts_with("xterm"),
        None => false,
    }
}

pub fn is_tty(role: StreamRole) -> bool {
    match role {
        StreamRole::Stdout => atty::is(atty::Stream::Stdout),
        StreamRole::Stderr => atty::is(atty::Stream::Stderr),
    }
}

/// `NO_COLOR` set to any non-empty value opts out of automatic styling.
pub fn no_color_requested(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// Decides whether the prefix of `role` gets styled.
pub fn color_enabled(mode: ColorMode, role: StreamRole) -> bool {
    match mode {
        ColorMode::Never => false,
        ColorMode::Always => true,
        ColorMode::Auto => {
            !no_color_requested(std::env::var("NO_COLOR").ok().as_deref())
                && is_tty(role)
                && term_has_colors(std::env::var("TERM").ok().as_deref())
        }
    }
}

/// crossterm drops color codes by itself when `NO_COLOR` is set. Call this
/// once color has been asked for explicitly so the red stderr prefix survives.
pub fn force_ansi_colors() {
    Colored::set_ansi_color_disabled(false);
}
