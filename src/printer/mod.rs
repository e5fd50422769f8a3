//! Printers: coloured status lines on stdout.

use std::io;

use is_terminal::IsTerminal;
use owo_colors::OwoColorize;

/// Summary lines, green when stdout is a terminal.
pub struct TextPrinter {
    pub color: bool,
}

impl Default for TextPrinter {
    fn default() -> Self {
        Self { color: io::stdout().is_terminal() }
    }
}

impl TextPrinter {
    pub fn format(&self, text: &str) -> String {
        if self.color {
            format!("{}", text.green())
        } else {
            text.to_string()
        }
    }

    pub fn print(&self, text: &str) {
        println!("{}", self.format(text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_when_no_color() {
        let p = TextPrinter { color: false };
        assert_eq!(p.format("saved"), "saved");
    }

    #[test]
    fn test_colored_wraps_text() {
        let p = TextPrinter { color: true };
        let out = p.format("saved");
        assert!(out.contains("saved"));
        assert!(out.starts_with("\u{1b}["));
    }
}
