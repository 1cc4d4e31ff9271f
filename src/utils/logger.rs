#[cfg(feature = "cli")]
use crossterm::style::{Attribute, Color, ResetColor, SetAttribute, SetForegroundColor};
#[cfg(feature = "cli")]
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogLevel {
    Success,
    Error,
    Info,
    Warning,
}

/// Diagnostic logger. Every line goes to stderr so stdout stays free for
/// machine-readable output.
#[derive(Debug, Clone)]
pub struct Logger {
    #[cfg_attr(not(feature = "cli"), allow(dead_code))]
    color: bool,
}

impl Logger {
    pub fn new() -> Self {
        Logger {
            color: cfg!(feature = "cli") && std::env::var_os("NO_COLOR").is_none(),
        }
    }

    pub fn log_message(&self, level: LogLevel, message: &str) {
        eprintln!("{}", self.format_line(level, message));
    }

    pub fn log_message_with_trace(&self, level: LogLevel, message: &str, trace: Vec<&str>) {
        eprintln!("{}", self.format_line(level, message));
        for t in trace {
            eprintln!("     ↳ {}", t);
        }
    }

    fn format_line(&self, level: LogLevel, message: &str) -> String {
        format!(
            "{} {} {}",
            self.tool_signature(),
            self.format_status(level),
            message
        )
    }

    #[cfg(feature = "cli")]
    fn tool_signature(&self) -> String {
        if !self.color {
            return "[AddonImport]".to_string();
        }

        let mut s = String::new();

        let _ = write!(&mut s, "{}", SetForegroundColor(Color::Grey));
        s.push('[');

        let _ = write!(
            &mut s,
            "{}",
            SetForegroundColor(Color::Rgb {
                r: 29,
                g: 211,
                b: 176,
            })
        );
        let _ = write!(&mut s, "{}", SetAttribute(Attribute::Bold));
        s.push_str("AddonImport");
        let _ = write!(&mut s, "{}", SetAttribute(Attribute::Reset));

        let _ = write!(&mut s, "{}", SetForegroundColor(Color::Grey));
        s.push(']');
        let _ = write!(&mut s, "{}", ResetColor);

        s
    }

    #[cfg(not(feature = "cli"))]
    fn tool_signature(&self) -> String {
        "[AddonImport]".to_string()
    }

    #[cfg(feature = "cli")]
    fn format_status(&self, level: LogLevel) -> String {
        if !self.color {
            return plain_status(level);
        }

        let mut s = String::new();

        let color = match level {
            LogLevel::Success => Color::Rgb {
                r: 76,
                g: 175,
                b: 80,
            },
            LogLevel::Error => Color::Rgb {
                r: 244,
                g: 67,
                b: 54,
            },
            LogLevel::Info => Color::Rgb {
                r: 33,
                g: 150,
                b: 243,
            },
            LogLevel::Warning => Color::Rgb {
                r: 255,
                g: 152,
                b: 0,
            },
        };

        s.push('[');
        let _ = write!(&mut s, "{}", SetForegroundColor(color));
        let _ = write!(&mut s, "{}", SetAttribute(Attribute::Bold));
        s.push_str(status_label(level));
        let _ = write!(&mut s, "{}", SetAttribute(Attribute::Reset));
        s.push(']');
        let _ = write!(&mut s, "{}", ResetColor);

        s
    }

    #[cfg(not(feature = "cli"))]
    fn format_status(&self, level: LogLevel) -> String {
        plain_status(level)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

fn status_label(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Success => "SUCCESS",
        LogLevel::Error => "ERROR",
        LogLevel::Info => "INFO",
        LogLevel::Warning => "WARNING",
    }
}

fn plain_status(level: LogLevel) -> String {
    format!("[{}]", status_label(level))
}
