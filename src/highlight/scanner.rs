//! Char cursor shared by the line lexers
//!
//! Every token is a byte slice of the input line, so concatenating the
//! emitted tokens always reproduces the line exactly.

use super::{StyledToken, TokenKind};

pub(super) struct Scanner<'a> {
    src: &'a str,
    pos: usize,
    tokens: Vec<StyledToken>,
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            tokens: Vec::new(),
        }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Look `n` chars past the cursor (0 = same as `peek`)
    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    /// Character just before `at`, if any
    pub fn char_before(&self, at: usize) -> Option<char> {
        self.src[..at].chars().next_back()
    }

    pub fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    pub fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) -> usize {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
        self.pos - start
    }

    /// Consume a quoted string starting at the opening quote.
    /// Stops at end of line if the string is unterminated.
    pub fn eat_quoted(&mut self, quote: char, escapes: bool) {
        self.bump();
        while let Some(ch) = self.bump() {
            if escapes && ch == '\\' {
                self.bump();
            } else if ch == quote {
                break;
            }
        }
    }

    pub fn eat_rest(&mut self) {
        self.pos = self.src.len();
    }

    pub fn text_since(&self, start: usize) -> &'a str {
        &self.src[start..self.pos]
    }

    /// Emit `src[start..pos]` as one token. Adjacent plain runs are merged.
    pub fn emit(&mut self, start: usize, kind: TokenKind) {
        if start >= self.pos {
            return;
        }
        let text = &self.src[start..self.pos];
        if kind == TokenKind::Plain {
            if let Some(last) = self.tokens.last_mut() {
                if last.kind == TokenKind::Plain {
                    last.text.push_str(text);
                    return;
                }
            }
        }
        self.tokens.push(StyledToken::new(text, kind));
    }

    pub fn finish(self) -> Vec<StyledToken> {
        self.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_runs_merge() {
        let mut s = Scanner::new("ab");
        s.bump();
        s.emit(0, TokenKind::Plain);
        s.bump();
        s.emit(1, TokenKind::Plain);
        let tokens = s.finish();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "ab");
    }

    #[test]
    fn unterminated_quote_stops_at_end() {
        let mut s = Scanner::new("\"abc");
        s.eat_quoted('"', true);
        assert_eq!(s.text_since(0), "\"abc");
        assert!(s.peek().is_none());
    }

    #[test]
    fn escaped_quote_does_not_close() {
        let mut s = Scanner::new(r#""a\"b" rest"#);
        s.eat_quoted('"', true);
        assert_eq!(s.text_since(0), r#""a\"b""#);
    }
}
