//! Input handling for the menu bar.
//!
//! Translates crossterm key events into [`MenuKey`]s. Bindings are split by
//! context: Left/Right/Down act while the bar itself is focused, all four
//! arrows act while a popup chain is open, and Enter acts in both. Keys
//! without a binding in the current context bubble up to the parent.

use super::menu::{MenuContainer, MenuKey};
use crate::input::handler::{InputContext, InputHandler, InputResult};
use crossterm::event::{KeyCode, KeyEvent};

impl MenuKey {
    /// Map an unmodified arrow or Enter key to a menu key
    pub fn from_key_event(event: &KeyEvent) -> Option<Self> {
        if !event.modifiers.is_empty() {
            return None;
        }
        match event.code {
            KeyCode::Left => Some(MenuKey::Left),
            KeyCode::Right => Some(MenuKey::Right),
            KeyCode::Up => Some(MenuKey::Up),
            KeyCode::Down => Some(MenuKey::Down),
            KeyCode::Enter => Some(MenuKey::Enter),
            _ => None,
        }
    }

    fn bound_in_main_menu(self) -> bool {
        !matches!(self, MenuKey::Up)
    }
}

/// Wrapper that provides InputHandler for a focused MenuContainer.
pub struct MenuInputHandler<'a> {
    pub container: &'a mut MenuContainer,
}

impl<'a> MenuInputHandler<'a> {
    pub fn new(container: &'a mut MenuContainer) -> Self {
        Self { container }
    }
}

impl InputHandler for MenuInputHandler<'_> {
    fn handle_key_event(&mut self, event: &KeyEvent, ctx: &mut InputContext) -> InputResult {
        if !self.container.has_focus() {
            return InputResult::Ignored;
        }
        let Some(key) = MenuKey::from_key_event(event) else {
            return InputResult::Ignored;
        };

        let bound = if self.container.in_main_menu() {
            key.bound_in_main_menu()
        } else {
            self.container.in_sub_menu()
        };
        if !bound {
            return InputResult::Ignored;
        }

        // A bound key is consumed even when it has no effect (clamped moves)
        self.container.handle_key(key, ctx);
        InputResult::Consumed
    }
}
