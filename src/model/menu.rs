//! Menu entry tree and path resolution
//!
//! A [`MenuTree`] holds the top-level entries of a menu bar. Entries are
//! built once by the application and never mutated afterwards; navigation
//! state lives in [`crate::view::ui::menu::MenuNavigator`] as a path of
//! indices into this tree.

use crate::input::handler::InputContext;
use crate::primitives::display_width::str_width;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Label that marks an entry as a separator line rather than an item.
pub const SEPARATOR_TEXT: &str = "-";

/// Label of the entry returned when a path does not address a real entry.
pub const PLACEHOLDER_TEXT: &str = "(missing)";

/// Callback invoked when an entry is activated with Enter.
pub type MenuHandler = Rc<dyn Fn(&mut InputContext)>;

/// One node of the menu tree: a selectable item, an expandable submenu, or a separator.
#[derive(Clone, Default)]
pub struct MenuEntry {
    /// Display label ("-" for a separator)
    pub text: String,
    /// Invoked on activation; `None` means the entry only expands
    pub handler: Option<MenuHandler>,
    /// Ordered children; empty for a leaf
    pub children: Vec<MenuEntry>,
    /// Display hint for the key combination bound elsewhere
    pub shortcut: Option<String>,
    /// Display hint; disabled entries are drawn dimmed
    pub disabled: bool,
}

impl MenuEntry {
    /// Create a leaf entry with no handler
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Create a separator entry
    pub fn separator() -> Self {
        Self::new(SEPARATOR_TEXT)
    }

    /// Builder-style handler setter
    pub fn with_handler(mut self, handler: impl Fn(&mut InputContext) + 'static) -> Self {
        self.handler = Some(Rc::new(handler));
        self
    }

    /// Builder-style children setter
    pub fn with_children(mut self, children: Vec<MenuEntry>) -> Self {
        self.children = children;
        self
    }

    /// Builder-style shortcut setter
    pub fn with_shortcut(mut self, shortcut: impl Into<String>) -> Self {
        self.shortcut = Some(shortcut.into());
        self
    }

    /// Builder-style disabled setter
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn is_separator(&self) -> bool {
        self.text == SEPARATOR_TEXT
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Widest child label in terminal columns (0 without children).
    pub fn width(&self) -> usize {
        self.children
            .iter()
            .map(|child| str_width(&child.text))
            .max()
            .unwrap_or(0)
    }

    /// Invoke the handler, if any. Returns true if a handler ran.
    pub fn activate(&self, ctx: &mut InputContext) -> bool {
        match &self.handler {
            Some(handler) => {
                handler(ctx);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for MenuEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuEntry")
            .field("text", &self.text)
            .field("handler", &self.handler.as_ref().map(|_| "<fn>"))
            .field("children", &self.children)
            .field("shortcut", &self.shortcut)
            .field("disabled", &self.disabled)
            .finish()
    }
}

/// Outcome of resolving a path against the tree.
#[derive(Debug, Clone, Copy)]
pub enum Resolution<'a> {
    /// The path addressed a real entry
    Found(&'a MenuEntry),
    /// An index was out of range; the placeholder entry stands in
    Fallback(&'a MenuEntry),
}

impl<'a> Resolution<'a> {
    pub fn entry(self) -> &'a MenuEntry {
        match self {
            Resolution::Found(entry) | Resolution::Fallback(entry) => entry,
        }
    }

    pub fn is_fallback(self) -> bool {
        matches!(self, Resolution::Fallback(_))
    }
}

/// The top-level entries of a menu bar.
#[derive(Debug)]
pub struct MenuTree {
    entries: Vec<MenuEntry>,
    placeholder: MenuEntry,
    fallbacks: Cell<u64>,
}

impl MenuTree {
    pub fn new(entries: Vec<MenuEntry>) -> Self {
        Self {
            entries,
            placeholder: MenuEntry::new(PLACEHOLDER_TEXT),
            fallbacks: Cell::new(0),
        }
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of times [`MenuTree::resolve`] fell back to the placeholder.
    pub fn fallback_count(&self) -> u64 {
        self.fallbacks.get()
    }

    /// Resolve the entry addressed by `path[0..=level]`.
    ///
    /// Starts at the top-level entry `path[0]` and descends into
    /// `children[path[i]]` for each `i` in `1..=level` (bounded by the path
    /// length). Out-of-range indices yield the placeholder entry.
    pub fn resolve(&self, path: &[usize], level: usize) -> Resolution<'_> {
        let Some(&top) = path.first() else {
            return self.fall_back(path, 0);
        };
        let Some(mut entry) = self.entries.get(top) else {
            return self.fall_back(path, 0);
        };

        for (depth, &index) in path.iter().enumerate().skip(1).take(level) {
            match entry.children.get(index) {
                Some(child) => entry = child,
                None => return self.fall_back(path, depth),
            }
        }

        Resolution::Found(entry)
    }

    fn fall_back(&self, path: &[usize], depth: usize) -> Resolution<'_> {
        self.fallbacks.set(self.fallbacks.get() + 1);
        tracing::warn!(
            "Menu path {:?} has no entry at depth {}, using placeholder",
            path,
            depth
        );
        Resolution::Fallback(&self.placeholder)
    }
}
