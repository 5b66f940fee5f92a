// Components module - reusable UI building blocks
//
// Shell components are rendered on every frame:
// - Title bar: app name and current page
// - Sidebar: page and section index
// - Document panel: the current page with its code blocks
// - Status bar: route, key hints, latest log line
//
// Each component is a focused, single-responsibility module.

pub mod code_block;
pub mod document_panel;
pub mod scrollbar;
pub mod sidebar;
pub mod status_bar;
pub mod title_bar;
