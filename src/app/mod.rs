//! Demo application: a menu bar over a text body
//!
//! Focus is either on the body or on the menu bar. Tab moves it between
//! the two. Keys reach the menu only while the bar holds focus; menu
//! handlers defer their effects, which the app applies once input
//! handling is done (see `menu_actions`).

mod menu_actions;
mod render;

use crate::config::{Config, ConfigError};
use crate::input::handler::{is_key, InputContext, InputHandler};
use crate::view::theme::Theme;
use crate::view::ui::menu::MenuContainer;
use crate::view::ui::menu_input::MenuInputHandler;
use crate::view::ui::overlay::Overlay;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use std::cell::Cell;
use std::rc::Rc;

pub use render::STATUS_HINT;

const ABOUT_TEXT: &str = "menubar demo\nArrows navigate, Enter activates, Tab switches focus";

/// Centered "About" box, shown until the next key press
struct AboutOverlay {
    visible: Rc<Cell<bool>>,
    theme: Theme,
}

impl Overlay for AboutOverlay {
    fn area(&self, container: Rect) -> Option<Rect> {
        if !self.visible.get() {
            return None;
        }
        let width = 56.min(container.width);
        let height = 4.min(container.height);
        Some(Rect::new(
            container.x + (container.width - width) / 2,
            container.y + (container.height - height) / 2,
            width,
            height,
        ))
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let style = Style::default()
            .fg(self.theme.menu_dropdown_fg)
            .bg(self.theme.menu_dropdown_bg);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" About ")
            .border_style(Style::default().fg(self.theme.menu_border_fg))
            .style(style);
        frame.render_widget(
            Paragraph::new(ABOUT_TEXT)
                .block(block)
                .wrap(Wrap { trim: true }),
            area,
        );
    }
}

/// Application state for the demo binary
pub struct App {
    menu: MenuContainer,
    theme: Theme,
    body: Vec<String>,
    status_message: Option<String>,
    about_visible: Rc<Cell<bool>>,
    mouse_enabled: bool,
    should_quit: bool,
}

impl App {
    /// Build the app from a validated configuration
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let theme = config.resolve_theme()?;
        let about_visible = Rc::new(Cell::new(false));
        let about = AboutOverlay {
            visible: about_visible.clone(),
            theme: theme.clone(),
        };
        let menu = MenuContainer::new(config.menu.build_entries())
            .with_overlays(vec![Box::new(about)]);

        Ok(Self {
            menu,
            theme,
            body: vec![
                "Press Tab to focus the menu bar.".to_string(),
                "Use the arrow keys to move through the menus and Enter to run an item.".to_string(),
                "Press q or Esc here to quit.".to_string(),
            ],
            status_message: None,
            about_visible,
            mouse_enabled: config.mouse_support,
            should_quit: false,
        })
    }

    pub fn menu(&self) -> &MenuContainer {
        &self.menu
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn about_visible(&self) -> bool {
        self.about_visible.get()
    }

    /// Mouse capture wanted by the app; the output layer applies changes
    pub fn mouse_enabled(&self) -> bool {
        self.mouse_enabled
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn focus_menu(&mut self) {
        self.menu.set_focus(true);
    }

    pub fn focus_body(&mut self) {
        self.menu.collapse();
        self.menu.set_focus(false);
    }

    /// Handle one key press
    pub fn handle_key(&mut self, event: KeyEvent) {
        if self.about_visible.get() {
            self.about_visible.set(false);
            return;
        }

        if event.code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if is_key(&event, KeyCode::Tab) {
            if self.menu.has_focus() {
                self.focus_body();
            } else {
                self.focus_menu();
            }
            return;
        }

        if self.menu.has_focus() {
            self.handle_menu_key(&event);
        } else {
            self.handle_body_key(&event);
        }
    }

    fn handle_menu_key(&mut self, event: &KeyEvent) {
        let mut ctx = InputContext::new();
        let consumed = MenuInputHandler::new(&mut self.menu)
            .dispatch_input(event, &mut ctx)
            .is_consumed();

        if !consumed && is_key(event, KeyCode::Esc) {
            if self.menu.in_sub_menu() {
                self.menu.collapse();
            } else {
                self.focus_body();
            }
        }

        self.apply_context(ctx);
    }

    fn handle_body_key(&mut self, event: &KeyEvent) {
        if is_key(event, KeyCode::Esc) || is_key(event, KeyCode::Char('q')) {
            self.should_quit = true;
        } else if is_key(event, KeyCode::F(10)) {
            self.focus_menu();
        }
    }
}
