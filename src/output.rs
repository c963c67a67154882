//! Colored status output.
//!
//! `--color auto` consults the environment before the terminal: `NO_COLOR`
//! and `CLICOLOR=0` turn colors off, `CLICOLOR_FORCE` turns them on even when
//! piped, and `TERM=dumb` turns them off.

use std::env;

use console::style;

#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub use_color: bool,
}

/// Meaning of a highlighted fragment of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Good,
    Warning,
    Error,
}

/// Color decision taken from environment variables alone, or `None` when
/// the terminal should decide.
fn color_from_env(var: impl Fn(&str) -> Option<String>) -> Option<bool> {
    if var("NO_COLOR").is_some() || var("CLICOLOR").as_deref() == Some("0") {
        return Some(false);
    }
    if var("CLICOLOR_FORCE").is_some_and(|v| !v.is_empty() && v != "0") {
        return Some(true);
    }
    if var("TERM").as_deref() == Some("dumb") {
        return Some(false);
    }
    None
}

impl OutputConfig {
    /// `color_flag` is `always`, `never` or `auto` (case-insensitive); any
    /// other value behaves as `auto`.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = if color_flag.eq_ignore_ascii_case("always") {
            true
        } else if color_flag.eq_ignore_ascii_case("never") {
            false
        } else {
            color_from_env(|name| env::var_os(name).map(|v| v.to_string_lossy().into_owned()))
                .unwrap_or_else(|| console::Term::stdout().features().colors_supported())
        };
        Self { use_color }
    }

    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    pub fn without_color() -> Self {
        Self { use_color: false }
    }

    /// Styles `text` for its tone, or returns it unchanged without colors.
    pub fn paint(&self, text: &str, tone: Tone) -> String {
        if !self.use_color {
            return text.to_string();
        }
        let styled = match tone {
            Tone::Good => style(text).green(),
            Tone::Warning => style(text).yellow().bold(),
            Tone::Error => style(text).red().bold(),
        };
        styled.force_styling(true).to_string()
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}
