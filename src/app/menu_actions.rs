//! Menu action handlers.
//!
//! Menu entries only record what they want done; this module carries it
//! out after the key has been handled.

use super::App;
use crate::input::handler::{DeferredAction, InputContext};

impl App {
    /// Apply the status message and deferred actions collected while
    /// handling a key
    pub(super) fn apply_context(&mut self, mut ctx: InputContext) {
        if let Some(message) = ctx.status_message.take() {
            self.status_message = Some(message);
        }
        for action in ctx.take_deferred() {
            self.apply_deferred(action);
        }
    }

    fn apply_deferred(&mut self, action: DeferredAction) {
        match action {
            DeferredAction::ExecuteMenuAction { action } => {
                self.focus_body();
                self.execute_menu_action(&action);
            }
            DeferredAction::FocusBody => self.focus_body(),
            DeferredAction::Quit => self.should_quit = true,
        }
    }

    /// Run a named menu action
    pub fn execute_menu_action(&mut self, action: &str) {
        tracing::info!("Menu action: {}", action);
        match action {
            "quit" => self.should_quit = true,
            "about" => self.about_visible.set(true),
            "toggle_mouse" => {
                self.mouse_enabled = !self.mouse_enabled;
                self.set_status_message(if self.mouse_enabled {
                    "Mouse support enabled"
                } else {
                    "Mouse support disabled"
                });
            }
            other => self.set_status_message(format!("Action: {other}")),
        }
    }
}
