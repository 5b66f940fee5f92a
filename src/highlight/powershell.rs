//! PowerShell line lexer

use super::scanner::Scanner;
use super::{Lexer, StyledToken, TokenKind};
use regex::Regex;
use std::sync::OnceLock;

const KEYWORDS: &[&str] = &[
    "if", "else", "elseif", "foreach", "for", "while", "do", "until", "function", "param",
    "return", "try", "catch", "finally", "throw", "switch", "break", "continue", "begin",
    "process", "end", "in",
];

/// Common aliases that do not follow the Verb-Noun shape
const ALIASES: &[&str] = &[
    "iex", "irm", "iwr", "echo", "cd", "ls", "dir", "cat", "cls", "curl", "wget", "pwd", "mkdir",
    "rm", "cp", "mv", "winget", "choco", "scoop",
];

const OPERATOR_CHARS: &str = "|;=(){}[]<>!+*,";

/// Verb-Noun cmdlet shape, e.g. `Get-ChildItem`, `Invoke-RestMethod`
fn cmdlet_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z]+-[A-Za-z][A-Za-z0-9]*$").expect("cmdlet pattern is valid")
    })
}

fn is_operator(ch: char) -> bool {
    OPERATOR_CHARS.contains(ch)
}

fn is_word_char(ch: char) -> bool {
    !ch.is_whitespace() && !is_operator(ch) && ch != '\'' && ch != '"' && ch != '$' && ch != '#'
}

pub struct PowerShellLexer;

impl Lexer for PowerShellLexer {
    fn lex_line(&self, line: &str) -> Vec<StyledToken> {
        let mut s = Scanner::new(line);

        while let Some(ch) = s.peek() {
            let start = s.pos();
            let word_start = s
                .char_before(start)
                .map_or(true, |prev| prev.is_whitespace() || is_operator(prev));

            if ch.is_whitespace() {
                s.eat_while(char::is_whitespace);
                s.emit(start, TokenKind::Plain);
            } else if ch == '#' {
                s.eat_rest();
                s.emit(start, TokenKind::Comment);
            } else if ch == '\'' {
                s.eat_quoted('\'', false);
                s.emit(start, TokenKind::String);
            } else if ch == '"' {
                // Backtick is the escape character
                s.bump();
                while let Some(c) = s.bump() {
                    if c == '`' {
                        s.bump();
                    } else if c == '"' {
                        break;
                    }
                }
                s.emit(start, TokenKind::String);
            } else if ch == '$' {
                s.bump();
                s.eat_while(|c| c.is_alphanumeric() || c == '_' || c == ':');
                s.emit(start, TokenKind::Variable);
            } else if ch == '-'
                && word_start
                && s.peek_nth(1).is_some_and(|c| c.is_alphabetic())
            {
                s.bump();
                s.eat_while(|c| c.is_alphanumeric());
                s.emit(start, TokenKind::Parameter);
            } else if is_operator(ch) {
                s.eat_while(is_operator);
                s.emit(start, TokenKind::Operator);
            } else {
                s.eat_while(is_word_char);
                let word = s.text_since(start);
                let lower = word.to_lowercase();
                let kind = if !word_start {
                    TokenKind::Plain
                } else if KEYWORDS.contains(&lower.as_str()) {
                    TokenKind::Keyword
                } else if ALIASES.contains(&lower.as_str()) || cmdlet_pattern().is_match(word) {
                    TokenKind::Builtin
                } else if word.chars().all(|c| c.is_ascii_digit() || c == '.')
                    && word.chars().any(|c| c.is_ascii_digit())
                {
                    TokenKind::Number
                } else {
                    TokenKind::Plain
                };
                s.emit(start, kind);
            }
        }

        s.finish()
    }
}
