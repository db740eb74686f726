//! UI rendering modules
//!
//! - `menu` - Menu bar state and navigation
//! - `menu_input` - Key event translation for the menu bar
//! - `menu_render` - Styled bar and popup text with anchor positions
//! - `overlay` - Frame composition of bar, body and floating popups

pub mod menu;
pub mod menu_input;
pub mod menu_render;
pub mod overlay;

// Re-export main types for convenience
pub use menu::{KeyOutcome, MenuContainer, MenuKey, MenuNavigator, MAX_PATH_LEN, POPUP_LEVELS};
pub use menu_input::MenuInputHandler;
pub use menu_render::{MenuRenderer, RenderedBar, RenderedPopup};
pub use overlay::{Overlay, PlacedPopup};
