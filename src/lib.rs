//! Cascading keyboard-driven menu bar for terminal UIs
//!
//! - [`model::menu`]: the entry tree and path resolution
//! - [`view::ui`]: navigation, rendering and frame composition of the menu
//! - [`services::output`]: terminal output backends, including the
//!   Windows 10 console adapter
//! - [`config`]: menu layout and theme selection from JSON
//! - [`app`]: the demo application driven by the binary

pub mod app;
pub mod config;
pub mod input;
pub mod model;
pub mod primitives;
pub mod services;
pub mod view;
