//! Menu bar state and navigation
//!
//! The selection is a path of indices into the [`MenuTree`]: `[i]` means the
//! menu bar has focus with top-level entry `i` highlighted, `[i, j, ...]`
//! means a chain of popups is open with the last index highlighted in the
//! deepest one. The path itself is the state machine; there is no separate
//! mode enum.

use crate::input::handler::InputContext;
use crate::model::menu::{MenuEntry, MenuTree, Resolution};
use crate::view::ui::overlay::Overlay;

/// Longest selection path: one bar index plus three popup levels.
pub const MAX_PATH_LEN: usize = 4;

/// Number of popup levels the menu can show at once.
pub const POPUP_LEVELS: usize = MAX_PATH_LEN - 1;

/// Keys understood by the menu navigator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKey {
    Left,
    Right,
    Up,
    Down,
    Enter,
}

/// What a key did to the navigator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The selection path changed
    Moved,
    /// Enter ran the handler of the focused entry
    Activated,
    /// The key has no transition in the current context
    Unchanged,
}

/// Owns the selection path and applies key transitions to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuNavigator {
    path: Vec<usize>,
}

impl Default for MenuNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuNavigator {
    /// Start with the first top-level entry focused and no popup open
    pub fn new() -> Self {
        Self { path: vec![0] }
    }

    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Replace the path, e.g. to restore a previous selection.
    ///
    /// An empty path becomes `[0]` and paths longer than [`MAX_PATH_LEN`]
    /// are truncated. Indices are not checked against any tree: keys on an
    /// out-of-range path resolve to the placeholder entry.
    pub fn set_path(&mut self, mut path: Vec<usize>) {
        if path.is_empty() {
            path.push(0);
        }
        path.truncate(MAX_PATH_LEN);
        self.path = path;
    }

    /// Collapse back to the menu bar, keeping the top-level selection
    pub fn collapse(&mut self) {
        self.path.truncate(1);
    }

    /// Focus is on the menu bar itself
    pub fn in_main_menu(&self) -> bool {
        self.path.len() == 1
    }

    /// A chain of popups is open
    pub fn in_sub_menu(&self) -> bool {
        self.path.len() > 1
    }

    /// The entry the full path addresses
    pub fn focused_entry<'a>(&self, tree: &'a MenuTree) -> Resolution<'a> {
        tree.resolve(&self.path, self.path.len() - 1)
    }

    /// Apply one key event.
    pub fn handle_key(
        &mut self,
        key: MenuKey,
        tree: &MenuTree,
        ctx: &mut InputContext,
    ) -> KeyOutcome {
        if tree.is_empty() {
            return KeyOutcome::Unchanged;
        }

        let before = self.path.clone();
        let outcome = match key {
            MenuKey::Enter => self.activate(tree, ctx),
            _ if self.in_main_menu() => self.main_menu_key(key, tree),
            _ => self.sub_menu_key(key, tree),
        };

        if outcome == KeyOutcome::Moved {
            tracing::debug!("Menu {:?}: {:?} -> {:?}", key, before, self.path);
        }
        outcome
    }

    fn main_menu_key(&mut self, key: MenuKey, tree: &MenuTree) -> KeyOutcome {
        let last_top = tree.len().saturating_sub(1);
        let current = self.path[0];
        match key {
            MenuKey::Left => self.set_top(current.saturating_sub(1).min(last_top)),
            MenuKey::Right => self.set_top(current.saturating_add(1).min(last_top)),
            // Opens even a childless entry; the path then resolves to the placeholder
            MenuKey::Down => self.descend(),
            MenuKey::Up | MenuKey::Enter => KeyOutcome::Unchanged,
        }
    }

    fn sub_menu_key(&mut self, key: MenuKey, tree: &MenuTree) -> KeyOutcome {
        let depth = self.path.len();
        let last = self.path[depth - 1];
        match key {
            MenuKey::Left => {
                self.path.pop();
                KeyOutcome::Moved
            }
            MenuKey::Right => {
                if self.focused_entry(tree).entry().has_children() {
                    return self.descend();
                }
                // Leaf in the first popup: sweep to the next top-level entry
                let next = self.path[0].saturating_add(1);
                if depth == 2 && next < tree.len() {
                    self.path = vec![next];
                    if tree.entries().get(next).is_some_and(MenuEntry::has_children) {
                        self.path.push(0);
                    }
                    return KeyOutcome::Moved;
                }
                KeyOutcome::Unchanged
            }
            MenuKey::Up => {
                if depth == 2 && last == 0 {
                    self.path.pop();
                    KeyOutcome::Moved
                } else if last > 0 {
                    self.path[depth - 1] -= 1;
                    KeyOutcome::Moved
                } else {
                    KeyOutcome::Unchanged
                }
            }
            MenuKey::Down => {
                let siblings = tree.resolve(&self.path, depth - 2).entry().children.len();
                if last + 1 < siblings {
                    self.path[depth - 1] += 1;
                    KeyOutcome::Moved
                } else {
                    KeyOutcome::Unchanged
                }
            }
            MenuKey::Enter => KeyOutcome::Unchanged,
        }
    }

    fn set_top(&mut self, index: usize) -> KeyOutcome {
        if self.path[0] == index {
            return KeyOutcome::Unchanged;
        }
        self.path[0] = index;
        KeyOutcome::Moved
    }

    fn descend(&mut self) -> KeyOutcome {
        if self.path.len() >= MAX_PATH_LEN {
            return KeyOutcome::Unchanged;
        }
        self.path.push(0);
        KeyOutcome::Moved
    }

    fn activate(&self, tree: &MenuTree, ctx: &mut InputContext) -> KeyOutcome {
        let entry = self.focused_entry(tree).entry();
        if entry.activate(ctx) {
            tracing::debug!("Activated menu entry {:?} at {:?}", entry.text, self.path);
            KeyOutcome::Activated
        } else {
            KeyOutcome::Unchanged
        }
    }
}

/// A menu bar widget: the entry tree, its navigator, and the focus flag.
///
/// The container is the only writer of the selection path. Rendering lives
/// in `menu_render` (styled text) and `overlay` (frame composition).
pub struct MenuContainer {
    pub(crate) tree: MenuTree,
    pub(crate) navigator: MenuNavigator,
    pub(crate) focused: bool,
    pub(crate) overlays: Vec<Box<dyn Overlay>>,
}

impl MenuContainer {
    pub fn new(entries: Vec<MenuEntry>) -> Self {
        if entries.is_empty() {
            tracing::warn!("Menu bar created without any entries");
        }
        Self {
            tree: MenuTree::new(entries),
            navigator: MenuNavigator::new(),
            focused: false,
            overlays: Vec::new(),
        }
    }

    /// Extra floating overlays drawn above the menu popups
    pub fn with_overlays(mut self, overlays: Vec<Box<dyn Overlay>>) -> Self {
        self.overlays.extend(overlays);
        self
    }

    pub fn tree(&self) -> &MenuTree {
        &self.tree
    }

    pub fn navigator(&self) -> &MenuNavigator {
        &self.navigator
    }

    pub fn path(&self) -> &[usize] {
        self.navigator.path()
    }

    /// Whether the menu bar holds input focus; popups only show while it does
    pub fn has_focus(&self) -> bool {
        self.focused
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn in_main_menu(&self) -> bool {
        self.navigator.in_main_menu()
    }

    pub fn in_sub_menu(&self) -> bool {
        self.navigator.in_sub_menu()
    }

    pub fn focused_entry(&self) -> Resolution<'_> {
        self.navigator.focused_entry(&self.tree)
    }

    pub fn handle_key(&mut self, key: MenuKey, ctx: &mut InputContext) -> KeyOutcome {
        self.navigator.handle_key(key, &self.tree, ctx)
    }

    /// Collapse open popups back to the bar
    pub fn collapse(&mut self) {
        self.navigator.collapse();
    }
}
