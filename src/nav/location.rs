use std::fmt;

/// Route descriptor: a page path plus an optional in-page anchor
///
/// Read by everything, mutated by nobody: the router replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub path: String,
    pub anchor: Option<String>,
}

impl Location {
    pub fn new(path: impl Into<String>, anchor: Option<String>) -> Self {
        Self {
            path: normalize_path(&path.into()),
            anchor: anchor.filter(|a| !a.is_empty()),
        }
    }

    pub fn root() -> Self {
        Self::new("/", None)
    }

    /// Parse `"/docs#pricing"`
    ///
    /// Splits on the first `#`. An empty fragment means no anchor and a
    /// missing path means `/`.
    pub fn parse(target: &str) -> Self {
        let target = target.trim();
        match target.split_once('#') {
            Some((path, anchor)) => Self::new(path, Some(anchor.to_string())),
            None => Self::new(target, None),
        }
    }

    /// Same path, different anchor
    pub fn with_anchor(&self, anchor: Option<String>) -> Self {
        Self::new(self.path.clone(), anchor)
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.anchor {
            Some(anchor) => write!(f, "{}#{}", self.path, anchor),
            None => write!(f, "{}", self.path),
        }
    }
}

fn normalize_path(path: &str) -> String {
    let path = path.trim();
    if path.is_empty() {
        "/".to_string()
    } else if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}
