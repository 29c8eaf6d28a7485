//! Terminal rendering for docmap.
//!
//! Tree-art renderers for document maps plus terminal color helpers and
//! syntax-highlighted markdown output for expanded sections. All renderers
//! return a `String`; printing is the caller's job.

#![warn(missing_docs)]

mod tree;

pub use tree::{document_map, expand_section, filtered_tree, multi_tree, refs_tree};

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

/// ANSI color codes for terminal output.
pub mod colors {
    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Cyan text (level-1 section titles).
    pub const CYAN: &str = "\x1b[36m";
    /// Blue text (level-2 section titles).
    pub const BLUE: &str = "\x1b[34m";
    /// Yellow text (level-3 section titles).
    pub const YELLOW: &str = "\x1b[33m";
    /// Green text (filenames in multi-document views).
    pub const GREEN: &str = "\x1b[32m";
    /// Dim/gray text (connectors, token counts, key terms).
    pub const DIM: &str = "\x1b[2m";
    /// Reset all formatting.
    pub const RESET: &str = "\x1b[0m";
}

/// The set of escape codes a renderer writes.
///
/// [`Palette::ansi`] colors output for terminals; [`Palette::plain`]
/// renders the same art with no escapes, for piped output and tests.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    /// Bold text, or empty.
    pub bold: &'static str,
    /// Cyan, or empty.
    pub cyan: &'static str,
    /// Blue, or empty.
    pub blue: &'static str,
    /// Yellow, or empty.
    pub yellow: &'static str,
    /// Green, or empty.
    pub green: &'static str,
    /// Dim, or empty.
    pub dim: &'static str,
    /// Reset, or empty.
    pub reset: &'static str,
}

impl Palette {
    /// A palette that emits ANSI escape codes.
    pub const fn ansi() -> Self {
        Self {
            bold: colors::BOLD,
            cyan: colors::CYAN,
            blue: colors::BLUE,
            yellow: colors::YELLOW,
            green: colors::GREEN,
            dim: colors::DIM,
            reset: colors::RESET,
        }
    }

    /// A palette that emits no escape codes at all.
    pub const fn plain() -> Self {
        Self {
            bold: "",
            cyan: "",
            blue: "",
            yellow: "",
            green: "",
            dim: "",
            reset: "",
        }
    }
}

/// A syntax highlighter for expanded section content.
pub struct Highlighter {
    /// The syntax set containing language definitions.
    syntax_set: SyntaxSet,
    /// The theme set containing color themes.
    theme_set: EmbeddedLazyThemeSet,
    /// The theme to use.
    theme: EmbeddedThemeName,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Creates a new highlighter with the default theme (Dracula).
    pub fn new() -> Self {
        Self {
            syntax_set: extra_syntaxes(),
            theme_set: extra_themes(),
            theme: EmbeddedThemeName::Dracula,
        }
    }

    /// Highlights markdown content for terminal output.
    pub fn highlight_markdown(&self, content: &str) -> String {
        let syntax = self
            .syntax_set
            .find_syntax_by_extension("md")
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
        // Reset terminal colors at the end
        output.push_str("\x1b[0m");
        output
    }
}
