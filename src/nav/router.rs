use super::Location;
use std::collections::VecDeque;
use tokio::sync::watch;

/// How many previous locations `back()` can return to
pub const MAX_HISTORY: usize = 64;

/// Owner of the current location
///
/// Every change is published on a watch channel. Re-navigating to the
/// current location publishes nothing, so subscribers see exactly one
/// notification per change of path or anchor.
#[derive(Debug)]
pub struct Router {
    tx: watch::Sender<Location>,
    history: VecDeque<Location>,
}

impl Router {
    pub fn new(initial: Location) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self {
            tx,
            history: VecDeque::new(),
        }
    }

    pub fn current(&self) -> Location {
        self.tx.borrow().clone()
    }

    /// Resolve a link target against the current location
    ///
    /// `"#x"` keeps the current path; anything else is parsed as is.
    pub fn resolve(&self, target: &str) -> Location {
        match target.trim().strip_prefix('#') {
            Some(anchor) => self.current().with_anchor(Some(anchor.to_string())),
            None => Location::parse(target),
        }
    }

    /// Navigate to a link target. Returns whether the location changed.
    pub fn navigate(&mut self, target: &str) -> bool {
        let location = self.resolve(target);
        self.navigate_to(location)
    }

    pub fn navigate_to(&mut self, location: Location) -> bool {
        let previous = self.current();
        if previous == location {
            tracing::trace!("Already at {}", location);
            return false;
        }

        if self.history.len() == MAX_HISTORY {
            self.history.pop_front();
        }
        self.history.push_back(previous);

        tracing::debug!("Navigate to {}", location);
        self.tx.send_replace(location);
        true
    }

    /// Return to the previous location, if any
    pub fn back(&mut self) -> bool {
        let Some(location) = self.history.pop_back() else {
            return false;
        };
        tracing::debug!("Back to {}", location);
        self.tx.send_replace(location);
        true
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Subscribe to location changes
    ///
    /// The receiver starts with the current location marked as seen.
    pub fn subscribe(&self) -> watch::Receiver<Location> {
        self.tx.subscribe()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Location::root())
    }
}
