//! Menu bar and popup rendering
//!
//! Produces styled lines for the bar and for each open popup level. The
//! positions the layout needs for stacking popups are returned next to the
//! text instead of being embedded in it:
//!
//! - the bar reports where the selected label starts, which is where the
//!   first popup hangs from;
//! - each popup reports its selected row (`cursor`) and the column right
//!   after the row's indicator (`menu_anchor`), which is where the next
//!   level's popup is attached.
//!
//! Rendering never mutates the tree or the selection path.

use crate::model::menu::{MenuEntry, MenuTree};
use crate::primitives::display_width::{pad_to_width, str_width};
use crate::view::theme::Theme;
use crate::view::ui::menu::{MenuContainer, POPUP_LEVELS};
use ratatui::layout::Position;
use ratatui::style::{Modifier, Style};
use ratatui::symbols::line;
use ratatui::text::{Line, Span};

/// Columns a popup adds around its widest label: leading space, two
/// padding columns and the submenu indicator.
const POPUP_PADDING: usize = 4;

/// Indicator drawn after labels of entries that open a further popup
const SUBMENU_INDICATOR: &str = ">";

/// The rendered menu bar
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedBar {
    pub line: Line<'static>,
    /// Column of the selected label, present only while the bar has focus
    pub menu_anchor: Option<Position>,
}

impl RenderedBar {
    pub fn plain_text(&self) -> String {
        line_text(&self.line)
    }
}

/// One rendered popup box
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPopup {
    /// Nesting level (0 hangs from the bar)
    pub level: usize,
    pub lines: Vec<Line<'static>>,
    pub width: u16,
    pub height: u16,
    /// Start of the selected row, relative to the popup's top-left corner
    pub cursor: Option<Position>,
    /// Where the next level attaches, relative to the popup's top-left corner
    pub menu_anchor: Option<Position>,
}

impl RenderedPopup {
    /// The popup's text without styling, one row per line
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(line_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}

/// Renders menu bars and popups
pub struct MenuRenderer;

impl MenuRenderer {
    /// Render the bar: one `" " + label` token per top-level entry.
    ///
    /// The entry at `path[0]` is drawn selected only when `focused`.
    pub fn render_bar(tree: &MenuTree, path: &[usize], focused: bool, theme: &Theme) -> RenderedBar {
        let bar_style = Style::default().fg(theme.menu_fg).bg(theme.menu_bg);
        let selected_style = Style::default()
            .fg(theme.menu_active_fg)
            .bg(theme.menu_active_bg)
            .add_modifier(Modifier::BOLD);
        let selected = if focused { path.first().copied() } else { None };

        let mut spans = Vec::with_capacity(tree.len() * 2);
        let mut menu_anchor = None;
        let mut x = 0usize;

        for (idx, entry) in tree.entries().iter().enumerate() {
            spans.push(Span::styled(" ", bar_style));
            x += 1;

            let style = if selected == Some(idx) {
                menu_anchor = Some(Position::new(x as u16, 0));
                selected_style
            } else {
                bar_style
            };
            spans.push(Span::styled(entry.text.clone(), style));
            x += str_width(&entry.text);
        }

        RenderedBar {
            line: Line::from(spans).style(bar_style),
            menu_anchor,
        }
    }

    /// Render popup `level` (0, 1 or 2).
    ///
    /// Level `L` lists the children of the entry addressed by
    /// `path[0..=L]` and highlights `path[L + 1]` if the path goes that
    /// deep. Returns `None` when the path is not long enough for this level
    /// or the addressed entry has no children.
    pub fn render_popup(
        tree: &MenuTree,
        path: &[usize],
        level: usize,
        theme: &Theme,
    ) -> Option<RenderedPopup> {
        if level >= POPUP_LEVELS || level >= path.len() {
            return None;
        }
        let menu = tree.resolve(path, level).entry();
        if !menu.has_children() {
            return None;
        }

        let label_width = menu.width();
        let inner_width = label_width + POPUP_PADDING;
        let selected = path.get(level + 1).copied();

        let border_style = Style::default()
            .fg(theme.menu_border_fg)
            .bg(theme.menu_dropdown_bg);

        let mut lines = Vec::with_capacity(menu.children.len() + 2);
        let mut cursor = None;
        let mut menu_anchor = None;

        lines.push(Line::from(Span::styled(
            format!(
                "{}{}{}",
                line::TOP_LEFT,
                line::HORIZONTAL.repeat(inner_width),
                line::TOP_RIGHT
            ),
            border_style,
        )));

        for (idx, item) in menu.children.iter().enumerate() {
            let row = (idx + 1) as u16;
            let is_selected = selected == Some(idx);
            if is_selected {
                cursor = Some(Position::new(0, row));
                // Right after the indicator, on the right border
                menu_anchor = Some(Position::new((inner_width + 1) as u16, row));
            }
            lines.push(Self::popup_row(item, label_width, is_selected, theme, border_style));
        }

        lines.push(Line::from(Span::styled(
            format!(
                "{}{}{}",
                line::BOTTOM_LEFT,
                line::HORIZONTAL.repeat(inner_width),
                line::BOTTOM_RIGHT
            ),
            border_style,
        )));

        Some(RenderedPopup {
            level,
            width: (inner_width + 2) as u16,
            height: lines.len() as u16,
            lines,
            cursor,
            menu_anchor,
        })
    }

    fn popup_row(
        item: &MenuEntry,
        label_width: usize,
        is_selected: bool,
        theme: &Theme,
        border_style: Style,
    ) -> Line<'static> {
        let mut style = if is_selected {
            Style::default()
                .fg(theme.menu_highlight_fg)
                .bg(theme.menu_highlight_bg)
        } else {
            Style::default()
                .fg(theme.menu_dropdown_fg)
                .bg(theme.menu_dropdown_bg)
        };
        if item.disabled {
            style = style.fg(theme.menu_disabled_fg);
        }

        let body = if item.is_separator() {
            Span::styled(
                line::HORIZONTAL.repeat(label_width + POPUP_PADDING - 1),
                style.fg(theme.menu_separator_fg),
            )
        } else {
            Span::styled(
                pad_to_width(&format!(" {}", item.text), label_width + POPUP_PADDING - 1),
                style,
            )
        };
        let indicator = if item.has_children() {
            SUBMENU_INDICATOR
        } else {
            " "
        };

        Line::from(vec![
            Span::styled(line::VERTICAL, border_style),
            body,
            Span::styled(indicator, style),
            Span::styled(line::VERTICAL, border_style),
        ])
    }
}

impl MenuContainer {
    /// Render the bar for the current path and focus
    pub fn render_bar(&self, theme: &Theme) -> RenderedBar {
        MenuRenderer::render_bar(&self.tree, self.navigator.path(), self.focused, theme)
    }

    /// Render popup `level` for the current path
    pub fn render_popup(&self, level: usize, theme: &Theme) -> Option<RenderedPopup> {
        MenuRenderer::render_popup(&self.tree, self.navigator.path(), level, theme)
    }
}
