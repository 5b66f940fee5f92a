//! JSON line lexer
//!
//! Strings followed by `:` (after optional whitespace) are keys; everything
//! else between punctuation is classified as number, literal or plain.

use super::scanner::Scanner;
use super::{Lexer, StyledToken, TokenKind};

pub struct JsonLexer;

fn is_punctuation(ch: char) -> bool {
    matches!(ch, '{' | '}' | '[' | ']' | ':' | ',')
}

fn classify_bare(word: &str) -> TokenKind {
    match word {
        "true" | "false" | "null" => TokenKind::Literal,
        _ if looks_like_number(word) => TokenKind::Number,
        _ => TokenKind::Plain,
    }
}

/// Check if string looks like a JSON number (`-12`, `3.5`, `1e10`)
fn looks_like_number(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let (mantissa, exponent) = match digits.find(['e', 'E']) {
        Some(idx) => (&digits[..idx], Some(&digits[idx + 1..])),
        None => (digits, None),
    };

    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (mantissa, None),
    };

    if int_part.is_empty() || !int_part.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    if frac_part.is_some_and(|f| !f.chars().all(|c| c.is_ascii_digit())) {
        return false;
    }
    match exponent {
        Some(exp) => {
            let exp = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            !exp.is_empty() && exp.chars().all(|c| c.is_ascii_digit())
        }
        None => true,
    }
}

impl Lexer for JsonLexer {
    fn lex_line(&self, line: &str) -> Vec<StyledToken> {
        let mut s = Scanner::new(line);

        while let Some(ch) = s.peek() {
            let start = s.pos();

            if ch == '"' {
                s.eat_quoted('"', true);
                let is_key = s.rest().trim_start().starts_with(':');
                s.emit(
                    start,
                    if is_key {
                        TokenKind::Key
                    } else {
                        TokenKind::String
                    },
                );
            } else if is_punctuation(ch) {
                s.bump();
                s.emit(start, TokenKind::Punctuation);
            } else if ch.is_whitespace() {
                s.eat_while(char::is_whitespace);
                s.emit(start, TokenKind::Plain);
            } else {
                s.eat_while(|c| !c.is_whitespace() && !is_punctuation(c) && c != '"');
                let kind = classify_bare(s.text_since(start));
                s.emit(start, kind);
            }
        }

        s.finish()
    }
}
