// Syntax highlighting engine for code snippets
//
// Turns source text plus a language tag into a grid of styled tokens:
// outer Vec = lines, inner Vec = tokens in left-to-right order. Lexers are
// line-oriented and lossless, so joining the tokens of line N gives back
// line N of the input.
//
// Registered languages: bash (also "shell", "sh"), json, powershell
// (also "ps", "ps1"). Anything else goes through auto mode, then plain text.

mod bash;
mod json;
mod powershell;
mod scanner;

use std::collections::HashMap;

/// Language tag used when a snippet does not name one
pub const DEFAULT_LANGUAGE: &str = "bash";

/// Semantic class of a token, mapped to a color by the theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Unclassified text and whitespace
    Plain,
    Keyword,
    /// Commands and cmdlets
    Builtin,
    String,
    Number,
    Comment,
    /// `$VAR`, `${VAR}`, `$env:PATH`
    Variable,
    Operator,
    Punctuation,
    /// JSON object key
    Key,
    /// true / false / null
    Literal,
    /// `-X`, `--data`, `-Uri`
    Parameter,
}

/// A contiguous span of source text tagged for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledToken {
    pub text: String,
    pub kind: TokenKind,
}

impl StyledToken {
    pub fn new(text: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, TokenKind::Plain)
    }
}

/// Token grid: one entry per source line
pub type TokenLines = Vec<Vec<StyledToken>>;

/// Normalized language identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Language {
    Bash,
    Json,
    PowerShell,
    /// Unknown tag, kept lower-cased
    Other(String),
}

impl Language {
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "bash" | "shell" | "sh" => Self::Bash,
            "json" => Self::Json,
            "powershell" | "ps" | "ps1" => Self::PowerShell,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Bash => "bash",
            Self::Json => "json",
            Self::PowerShell => "powershell",
            Self::Other(name) => name,
        }
    }
}

/// Canonical name for a language tag (`"SH"` -> `"bash"`, `"ps1"` -> `"powershell"`)
pub fn normalize_language(tag: &str) -> String {
    Language::from_tag(tag).name().to_string()
}

/// External tokenizer contract used by the code block widget
///
/// Treated as a pure function: same input, same grid.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, source: &str, language: &str) -> TokenLines;
}

/// Lexes a single line of one language
pub trait Lexer: Send + Sync {
    fn lex_line(&self, line: &str) -> Vec<StyledToken>;
}

/// Built-in tokenizer with a registry of line lexers
pub struct Highlighter {
    lexers: HashMap<String, Box<dyn Lexer>>,
}

impl Highlighter {
    /// Highlighter with bash, json and powershell registered
    pub fn new() -> Self {
        let mut highlighter = Self::empty();
        highlighter.register("bash", Box::new(bash::BashLexer));
        highlighter.register("json", Box::new(json::JsonLexer));
        highlighter.register("powershell", Box::new(powershell::PowerShellLexer));
        highlighter
    }

    /// Highlighter with no languages; everything renders as plain text
    pub(crate) fn empty() -> Self {
        Self {
            lexers: HashMap::new(),
        }
    }

    /// Register a lexer under a language name.
    ///
    /// Returns false and keeps the existing lexer if the name is taken.
    pub fn register(&mut self, name: &str, lexer: Box<dyn Lexer>) -> bool {
        let key = normalize_language(name);
        if self.lexers.contains_key(&key) {
            tracing::debug!("Lexer for {} already registered, skipping", key);
            return false;
        }
        self.lexers.insert(key, lexer);
        true
    }

    #[cfg(test)]
    pub fn supports(&self, language: &str) -> bool {
        self.lexers.contains_key(&normalize_language(language))
    }

    fn run(&self, language: &str, source: &str) -> Option<TokenLines> {
        let lexer = self.lexers.get(language)?;
        Some(source.split('\n').map(|line| lexer.lex_line(line)).collect())
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for Highlighter {
    fn tokenize(&self, source: &str, language: &str) -> TokenLines {
        if source.is_empty() {
            return Vec::new();
        }

        let language = normalize_language(language);
        if let Some(lines) = self.run(&language, source) {
            if classified_count(&lines) > 0 {
                return lines;
            }
        }

        // Auto mode: direct pass found nothing, try the usual suspects
        let mut best: Option<(usize, TokenLines)> = None;
        let mut tried: Vec<&str> = Vec::new();
        for candidate in [language.as_str(), "bash", "json"] {
            if tried.contains(&candidate) {
                continue;
            }
            tried.push(candidate);

            let Some(lines) = self.run(candidate, source) else {
                continue;
            };
            let score = classified_count(&lines);
            if best.as_ref().map_or(true, |(top, _)| score > *top) {
                best = Some((score, lines));
            }
        }

        match best {
            Some((score, lines)) if score > 0 => {
                tracing::trace!("Auto-highlighted {} snippet ({} tokens)", language, score);
                lines
            }
            _ => plain_lines(source),
        }
    }
}

/// Number of tokens that carry a non-plain class
pub fn classified_count(lines: &TokenLines) -> usize {
    lines
        .iter()
        .flatten()
        .filter(|t| t.kind != TokenKind::Plain)
        .count()
}

/// Fallback grid: each non-empty line is a single plain token
pub fn plain_lines(source: &str) -> TokenLines {
    if source.is_empty() {
        return Vec::new();
    }
    source
        .split('\n')
        .map(|line| {
            if line.is_empty() {
                Vec::new()
            } else {
                vec![StyledToken::plain(line)]
            }
        })
        .collect()
}

/// Rebuild the source text from a token grid
#[cfg(test)]
pub fn join_lines(lines: &TokenLines) -> String {
    lines
        .iter()
        .map(|line| line.iter().map(|t| t.text.as_str()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[(&str, &str)] = &[
        (
            "bash",
            "curl -X POST https://api.example.com/v1/chat \\\n  -H \"Authorization: Bearer $API_KEY\" \\\n  -d '{\"model\": \"small\"}'",
        ),
        ("json", "{\n  \"id\": 42,\n  \"ok\": true,\n  \"tags\": [\"a\", null]\n}"),
        (
            "powershell",
            "$env:API_KEY = \"abc\"\nirm https://example.com/install.ps1 | iex\nGet-ChildItem -Path . # list",
        ),
        ("rust", "fn main() {\n    println!(\"hi\");\n}"),
        ("bash", "echo 'tab\there'\n\n# comment only\n日本語 ünïcode $HOME"),
    ];

    #[test]
    fn normalizes_aliases() {
        assert_eq!(normalize_language("SH"), "bash");
        assert_eq!(normalize_language("shell"), "bash");
        assert_eq!(normalize_language("ps1"), "powershell");
        assert_eq!(normalize_language("PS"), "powershell");
        assert_eq!(normalize_language("Json"), "json");
        assert_eq!(normalize_language("Rust"), "rust");
    }

    #[test]
    fn tokens_reconstruct_source() {
        let highlighter = Highlighter::new();
        for (lang, source) in SAMPLES {
            let lines = highlighter.tokenize(source, lang);
            assert_eq!(lines.len(), source.split('\n').count(), "{lang}");
            assert_eq!(join_lines(&lines), *source, "{lang}");
        }
    }

    proptest::proptest! {
        /// Any trimmed snippet in any language rebuilds exactly, one token line per source line
        #[test]
        fn any_trimmed_source_round_trips(
            raw in "(\\PC|\t|\n){0,160}",
            lang in proptest::sample::select(vec!["bash", "sh", "json", "powershell", "ps1", "yaml", ""]),
        ) {
            let source = raw.trim();
            let lines = Highlighter::new().tokenize(source, lang);
            proptest::prop_assert_eq!(join_lines(&lines), source);
            if source.is_empty() {
                proptest::prop_assert!(lines.is_empty());
            } else {
                proptest::prop_assert_eq!(lines.len(), source.split('\n').count());
            }
        }
    }

    #[test]
    fn empty_source_has_no_lines() {
        let highlighter = Highlighter::new();
        assert!(highlighter.tokenize("", "bash").is_empty());
        assert!(highlighter.tokenize("", "unknown").is_empty());
    }

    #[test]
    fn unknown_language_falls_back_to_auto_mode() {
        let highlighter = Highlighter::new();
        let lines = highlighter.tokenize("{\"a\": 1}", "yaml");
        assert!(lines[0].iter().any(|t| t.kind == TokenKind::Key));
    }

    #[test]
    fn nothing_registered_means_plain_text() {
        let highlighter = Highlighter::empty();
        let lines = highlighter.tokenize("echo hi\n\nls", "bash");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], vec![StyledToken::plain("echo hi")]);
        assert!(lines[1].is_empty());
        assert_eq!(classified_count(&lines), 0);
    }

    #[test]
    fn duplicate_registration_is_ignored() {
        let mut highlighter = Highlighter::new();
        assert!(!highlighter.register("sh", Box::new(json::JsonLexer)));
        // bash lexer still in place
        let lines = highlighter.tokenize("echo $HOME", "bash");
        assert!(lines[0].iter().any(|t| t.kind == TokenKind::Variable));
    }

    #[test]
    fn supports_aliases() {
        let highlighter = Highlighter::new();
        assert!(highlighter.supports("ps1"));
        assert!(highlighter.supports("shell"));
        assert!(!highlighter.supports("yaml"));
    }
}
