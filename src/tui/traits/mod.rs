//! Component trait system for the TUI
//!
//! Components declare their capabilities through traits instead of the App
//! knowing how to render, scroll or copy each one.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                           App                               │
//! │     (routes keys and mouse, owns router + components)       │
//! └─────────────────────────────────────────────────────────────┘
//!                  │                         │
//!                  ▼                         ▼
//!           ┌────────────┐           ┌──────────────┐
//!           │  Sidebar   │           │   Document   │──▶ CodeBlock × N
//!           └────────────┘           └──────────────┘
//! ```
//!
//! - [`Component`] - Base trait: render + identity
//! - [`Scrollable`] - Components with scrollable content
//! - [`Copyable`] - Components that provide clipboard content
//! - [`Interactive`] - Components that handle keyboard input

mod component;
mod copyable;
mod interactive;
mod scrollable;

pub use component::{Component, ComponentId, RenderContext};
pub use copyable::Copyable;
pub use interactive::{Handled, Interactive, ScrollableInteractive};
pub use scrollable::Scrollable;
