//! In-app routing and scroll restoration
//!
//! The [`Router`] owns the current [`Location`] and publishes every change
//! on a `tokio::sync::watch` channel. The [`ScrollRestorer`] is the only
//! subscriber that reacts to it: it repositions the document viewport
//! through the [`ScrollHost`] capability.

mod location;
mod restore;
mod router;

pub use location::Location;
pub use restore::{ScrollHost, ScrollRestorer};
pub use router::Router;
