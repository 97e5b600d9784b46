//! Syntax highlighting and terminal colors for fitr.
//!
//! This crate provides syntax-highlighted output for configuration and JSON records, and
//! styled terminal output for headers, status messages and match levels.

#![warn(missing_docs)]

use syntect::{
    easy::HighlightLines,
    highlighting::Style,
    parsing::SyntaxSet,
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};
use two_face::{
    syntax::extra_newlines as extra_syntaxes,
    theme::{EmbeddedLazyThemeSet, EmbeddedThemeName, extra as extra_themes},
};

/// A syntax highlighter for terminal output.
pub struct Highlighter {
    /// Language definitions, including TOML and JSON.
    syntax_set: SyntaxSet,
    /// Color themes.
    theme_set: EmbeddedLazyThemeSet,
    /// The theme in use.
    theme: EmbeddedThemeName,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Creates a highlighter with the Dracula theme.
    pub fn new() -> Self {
        Self {
            syntax_set: extra_syntaxes(),
            theme_set: extra_themes(),
            theme: EmbeddedThemeName::Dracula,
        }
    }

    /// Highlights TOML.
    pub fn highlight_toml(&self, content: &str) -> String {
        self.highlight(content, "toml")
    }

    /// Highlights JSON.
    pub fn highlight_json(&self, content: &str) -> String {
        self.highlight(content, "json")
    }

    /// Highlights content with the named syntax, falling back to plain text.
    pub fn highlight(&self, content: &str, syntax_name: &str) -> String {
        let syntax = self
            .syntax_set
            .find_syntax_by_extension(syntax_name)
            .or_else(|| self.syntax_set.find_syntax_by_name(syntax_name))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self.theme_set.get(self.theme);
        let mut highlighter = HighlightLines::new(syntax, theme);

        let mut output = String::new();
        for line in LinesWithEndings::from(content) {
            let ranges: Vec<(Style, &str)> = highlighter
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_else(|_| vec![(Style::default(), line)]);
            output.push_str(&as_24_bit_terminal_escaped(&ranges[..], false));
        }
        output.push_str(colors::RESET);
        output
    }
}

/// ANSI color codes.
pub mod colors {
    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Cyan text (headers).
    pub const CYAN: &str = "\x1b[36m";
    /// Green text (success, very high matches).
    pub const GREEN: &str = "\x1b[32m";
    /// Yellow text (warnings, high matches).
    pub const YELLOW: &str = "\x1b[33m";
    /// Red text (errors).
    pub const RED: &str = "\x1b[31m";
    /// Dim text.
    pub const DIM: &str = "\x1b[2m";
    /// Reset all formatting.
    pub const RESET: &str = "\x1b[0m";
}

/// Wraps text in a color code and a reset.
fn paint(code: &str, text: &str) -> String {
    format!("{code}{text}{}", colors::RESET)
}

/// Formats a header in bold cyan.
pub fn header(text: &str) -> String {
    format!("{}{}", colors::BOLD, paint(colors::CYAN, text))
}

/// Formats a subheader in bold.
pub fn subheader(text: &str) -> String {
    paint(colors::BOLD, text)
}

/// Formats less important text.
pub fn dim(text: &str) -> String {
    paint(colors::DIM, text)
}

/// Formats a success message in green.
pub fn success(text: &str) -> String {
    paint(colors::GREEN, text)
}

/// Formats a warning in yellow.
pub fn warning(text: &str) -> String {
    paint(colors::YELLOW, text)
}

/// Formats an error in red.
pub fn error(text: &str) -> String {
    paint(colors::RED, text)
}

/// Colors text by match level: `very_high` green, `high` yellow, anything else dim.
pub fn match_level(text: &str, level: &str) -> String {
    match level {
        "very_high" => success(text),
        "high" => warning(text),
        _ => dim(text),
    }
}

/// Returns a dim horizontal rule.
pub fn rule(width: usize) -> String {
    dim(&"─".repeat(width))
}

/// Indents every line of content by two spaces.
pub fn indent_content(content: &str) -> String {
    content
        .lines()
        .map(|line| format!("  {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlighter_toml() {
        let hl = Highlighter::new();
        let output = hl.highlight_toml("[settings]\ntop_n = 5\n");
        assert!(output.contains("\x1b["));
        assert!(output.ends_with(colors::RESET));
    }

    #[test]
    fn test_highlighter_json() {
        let hl = Highlighter::new();
        let output = hl.highlight_json("{\"success\": true}\n");
        assert!(output.contains("\x1b["));
        assert!(output.contains("success"));
    }

    #[test]
    fn test_unknown_syntax_is_plain() {
        let hl = Highlighter::new();
        let output = hl.highlight("just text\n", "no-such-syntax");
        assert!(output.contains("just text"));
    }

    #[test]
    fn test_header_formatting() {
        let h = header("Test");
        assert!(h.contains(colors::BOLD));
        assert!(h.contains(colors::CYAN));
        assert!(h.ends_with(colors::RESET));
        assert!(h.contains("Test"));
    }

    #[test]
    fn test_match_level_colors() {
        assert!(match_level("91.2", "very_high").starts_with(colors::GREEN));
        assert!(match_level("75.0", "high").starts_with(colors::YELLOW));
        assert!(match_level("40.0", "moderate").starts_with(colors::DIM));
    }

    #[test]
    fn test_error_and_rule() {
        assert!(error("error:").starts_with(colors::RED));
        let r = rule(3);
        assert!(r.starts_with(colors::DIM));
        assert!(r.contains("───"));
    }

    #[test]
    fn test_indent_content() {
        assert_eq!(indent_content("a\nb"), "  a\n  b");
    }

    #[test]
    fn test_syntaxes_available() {
        let ss = extra_syntaxes();
        assert!(ss.find_syntax_by_extension("toml").is_some());
        assert!(ss.find_syntax_by_extension("json").is_some());
    }
}
