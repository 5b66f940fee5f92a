// Fixed color theme for the TUI
//
// One palette, applied uniformly: code blocks never take a per-call theme.
// Colors follow a dark one-half style palette in true color.

use crate::highlight::TokenKind;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

/// Color palette for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    // UI element colors
    pub foreground: Color,
    pub muted: Color,
    pub border: Color,
    pub border_type: BorderType,
    pub highlight: Color,
    pub title: Color,
    pub heading: Color,
    pub status_bar: Color,
    pub selection: Color,
    pub selection_fg: Color,

    // Code block chrome
    pub code_background: Color,
    pub code_border: Color,
    pub copy_control: Color,
    pub copy_confirmed: Color,

    // Token colors
    pub keyword: Color,
    pub builtin: Color,
    pub string: Color,
    pub number: Color,
    pub comment: Color,
    pub variable: Color,
    pub operator: Color,
    pub key: Color,
    pub literal: Color,
    pub parameter: Color,
}

impl Theme {
    /// Style for a token class
    pub fn token_style(&self, kind: TokenKind) -> Style {
        let base = Style::default().bg(self.code_background);
        match kind {
            TokenKind::Plain => base.fg(self.foreground),
            TokenKind::Keyword => base.fg(self.keyword).add_modifier(Modifier::BOLD),
            TokenKind::Builtin => base.fg(self.builtin),
            TokenKind::String => base.fg(self.string),
            TokenKind::Number => base.fg(self.number),
            TokenKind::Comment => base.fg(self.comment).add_modifier(Modifier::ITALIC),
            TokenKind::Variable => base.fg(self.variable),
            TokenKind::Operator => base.fg(self.operator),
            TokenKind::Punctuation => base.fg(self.border).add_modifier(Modifier::DIM),
            TokenKind::Key => base.fg(self.key),
            TokenKind::Literal => base.fg(self.literal),
            TokenKind::Parameter => base.fg(self.parameter),
        }
    }

    /// Style for headings by level (1 = page title)
    pub fn heading_style(&self, level: u8) -> Style {
        let style = Style::default().fg(self.heading).add_modifier(Modifier::BOLD);
        if level <= 1 {
            style.add_modifier(Modifier::UNDERLINED)
        } else {
            style
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            foreground: Color::Rgb(0xdc, 0xdf, 0xe4),
            muted: Color::Rgb(0x7f, 0x84, 0x8e),
            border: Color::Rgb(0x5c, 0x63, 0x70),
            border_type: BorderType::Rounded,
            highlight: Color::Rgb(0xe5, 0xc0, 0x7b),
            title: Color::Rgb(0x61, 0xaf, 0xef),
            heading: Color::Rgb(0x61, 0xaf, 0xef),
            status_bar: Color::Rgb(0x98, 0xc3, 0x79),
            selection: Color::Rgb(0x3e, 0x44, 0x51),
            selection_fg: Color::Rgb(0xff, 0xff, 0xff),

            code_background: Color::Rgb(0x21, 0x25, 0x2b),
            code_border: Color::Rgb(0x4b, 0x52, 0x63),
            copy_control: Color::Rgb(0xab, 0xb2, 0xbf),
            copy_confirmed: Color::Rgb(0x98, 0xc3, 0x79),

            keyword: Color::Rgb(0xc6, 0x78, 0xdd),
            builtin: Color::Rgb(0x61, 0xaf, 0xef),
            string: Color::Rgb(0x98, 0xc3, 0x79),
            number: Color::Rgb(0xd1, 0x9a, 0x66),
            comment: Color::Rgb(0x7f, 0x84, 0x8e),
            variable: Color::Rgb(0xe0, 0x6c, 0x75),
            operator: Color::Rgb(0x56, 0xb6, 0xc2),
            key: Color::Rgb(0xe0, 0x6c, 0x75),
            literal: Color::Rgb(0xd1, 0x9a, 0x66),
            parameter: Color::Rgb(0xe5, 0xc0, 0x7b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_token_gets_code_background() {
        let theme = Theme::default();
        for kind in [
            TokenKind::Plain,
            TokenKind::Keyword,
            TokenKind::Comment,
            TokenKind::Key,
        ] {
            assert_eq!(theme.token_style(kind).bg, Some(theme.code_background));
        }
    }

    #[test]
    fn distinct_classes_are_distinguishable() {
        let theme = Theme::default();
        assert_ne!(
            theme.token_style(TokenKind::String),
            theme.token_style(TokenKind::Plain)
        );
        assert_ne!(
            theme.token_style(TokenKind::Keyword),
            theme.token_style(TokenKind::Builtin)
        );
    }
}
