//! Bash / POSIX shell line lexer

use super::scanner::Scanner;
use super::{Lexer, StyledToken, TokenKind};

const KEYWORDS: &[&str] = &[
    "if", "then", "else", "elif", "fi", "for", "while", "until", "do", "done", "case", "esac",
    "in", "function", "select", "return", "exit", "local", "readonly", "declare", "time",
];

const BUILTINS: &[&str] = &[
    "echo", "cd", "export", "source", "alias", "unset", "read", "printf", "test", "set", "eval",
    "exec", "pwd", "curl", "wget", "sudo", "apt", "apt-get", "brew", "pip", "npm", "npx", "git",
    "docker", "chmod", "chown", "mkdir", "rm", "cp", "mv", "cat", "grep", "sed", "awk", "tar",
    "bash", "sh", "jq", "ls", "systemctl", "cargo", "python", "python3", "node",
];

const OPERATOR_CHARS: &str = "|&;<>()=\\";

pub struct BashLexer;

fn is_operator(ch: char) -> bool {
    OPERATOR_CHARS.contains(ch)
}

fn is_word_char(ch: char) -> bool {
    !ch.is_whitespace() && !is_operator(ch) && ch != '\'' && ch != '"' && ch != '$' && ch != '`'
}

fn is_number(word: &str) -> bool {
    word.chars().any(|c| c.is_ascii_digit()) && word.chars().all(|c| c.is_ascii_digit() || c == '.')
}

impl Lexer for BashLexer {
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
            } else if ch == '#' && word_start {
                s.eat_rest();
                s.emit(start, TokenKind::Comment);
            } else if ch == '\'' {
                // Single quotes have no escapes
                s.eat_quoted('\'', false);
                s.emit(start, TokenKind::String);
            } else if ch == '"' || ch == '`' {
                s.eat_quoted(ch, true);
                s.emit(start, TokenKind::String);
            } else if ch == '$' {
                s.bump();
                match s.peek() {
                    Some('{') => {
                        s.eat_while(|c| c != '}');
                        s.bump();
                    }
                    Some('(') => {
                        s.bump();
                    }
                    Some(c) if c.is_alphanumeric() || c == '_' => {
                        s.eat_while(|c| c.is_alphanumeric() || c == '_');
                    }
                    Some('?' | '#' | '@' | '*' | '!' | '$' | '-') => {
                        s.bump();
                    }
                    _ => {}
                }
                s.emit(start, TokenKind::Variable);
            } else if ch == '-'
                && word_start
                && s.peek_nth(1).is_some_and(|c| c.is_alphanumeric() || c == '-')
            {
                s.eat_while(|c| c.is_alphanumeric() || c == '-' || c == '_');
                s.emit(start, TokenKind::Parameter);
            } else if is_operator(ch) {
                s.eat_while(is_operator);
                s.emit(start, TokenKind::Operator);
            } else {
                s.eat_while(is_word_char);
                let word = s.text_since(start);
                let kind = if !word_start {
                    TokenKind::Plain
                } else if KEYWORDS.contains(&word) {
                    TokenKind::Keyword
                } else if BUILTINS.contains(&word) {
                    TokenKind::Builtin
                } else if is_number(word) {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(line: &str) -> Vec<(String, TokenKind)> {
        BashLexer
            .lex_line(line)
            .into_iter()
            .map(|t| (t.text, t.kind))
            .collect()
    }

    fn kind_of(line: &str, text: &str) -> Option<TokenKind> {
        kinds(line)
            .into_iter()
            .find(|(t, _)| t == text)
            .map(|(_, k)| k)
    }

    #[test]
    fn curl_command() {
        let line = "curl -sSL https://example.com/install.sh | bash";
        assert_eq!(kind_of(line, "curl"), Some(TokenKind::Builtin));
        assert_eq!(kind_of(line, "-sSL"), Some(TokenKind::Parameter));
        assert_eq!(kind_of(line, "|"), Some(TokenKind::Operator));
        assert_eq!(kind_of(line, "bash"), Some(TokenKind::Builtin));
    }

    #[test]
    fn strings_and_variables() {
        let line = r#"echo "Bearer $TOKEN" '${NOT_VAR}' ${HOME}/bin"#;
        assert_eq!(kind_of(line, r#""Bearer $TOKEN""#), Some(TokenKind::String));
        assert_eq!(kind_of(line, "'${NOT_VAR}'"), Some(TokenKind::String));
        assert_eq!(kind_of(line, "${HOME}"), Some(TokenKind::Variable));
    }

    #[test]
    fn comment_needs_word_boundary() {
        let line = "ls foo#bar # trailing";
        assert_eq!(kind_of(line, "# trailing"), Some(TokenKind::Comment));
        let comments: Vec<_> = kinds(line)
            .into_iter()
            .filter(|(_, k)| *k == TokenKind::Comment)
            .collect();
        assert_eq!(comments.len(), 1);
    }

    #[test]
    fn keywords_and_numbers() {
        let line = "for i in 1 2 3; do echo $i; done";
        assert_eq!(kind_of(line, "for"), Some(TokenKind::Keyword));
        assert_eq!(kind_of(line, "done"), Some(TokenKind::Keyword));
        assert_eq!(kind_of(line, "1"), Some(TokenKind::Number));
        assert_eq!(kind_of(line, "$i"), Some(TokenKind::Variable));
    }

    #[test]
    fn line_continuation_is_operator() {
        let line = "  -H 'Content-Type: application/json' \\";
        assert_eq!(kind_of(line, "\\"), Some(TokenKind::Operator));
        assert_eq!(kind_of(line, "-H"), Some(TokenKind::Parameter));
    }

    #[test]
    fn lossless() {
        let line = "x=$(( 1 + 2 )) && echo \"unterminated";
        let joined: String = BashLexer.lex_line(line).iter().map(|t| t.text.as_str()).collect();
        assert_eq!(joined, line);
    }
}
