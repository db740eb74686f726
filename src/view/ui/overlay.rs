//! Composition of the menu bar, the wrapped body and floating popups
//!
//! The bar takes the first row of the container area and the body gets the
//! rest. While the bar has focus, up to three popups float above the body:
//! the first hangs below the selected bar label, each further one is
//! attached to the previous popup's `menu_anchor`. Extra overlays supplied
//! by the application are drawn last.

use crate::view::theme::Theme;
use crate::view::ui::menu::{MenuContainer, POPUP_LEVELS};
use crate::view::ui::menu_render::RenderedPopup;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Clear, Paragraph};
use ratatui::Frame;

/// A floating layer drawn above the body and the menu popups
pub trait Overlay {
    /// Where to draw, given the whole container area. `None` hides the layer.
    fn area(&self, container: Rect) -> Option<Rect>;

    /// Draw into `area` (already clipped to the container and cleared)
    fn render(&self, frame: &mut Frame, area: Rect);
}

/// A popup together with the screen area it was placed in
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedPopup {
    pub popup: RenderedPopup,
    pub area: Rect,
}

impl MenuContainer {
    /// Area of the menu bar row
    pub fn bar_area(area: Rect) -> Rect {
        Rect {
            height: area.height.min(1),
            ..area
        }
    }

    /// Area left for the wrapped body
    pub fn body_area(area: Rect) -> Rect {
        let bar_height = area.height.min(1);
        Rect {
            y: area.y + bar_height,
            height: area.height - bar_height,
            ..area
        }
    }

    /// Compute screen areas for the open popups, outermost first.
    ///
    /// Nothing is placed while the bar lacks focus. A popup that would run
    /// past the right edge is shifted left; one that runs past the bottom is
    /// cut. Placement stops at the first level that has nothing to show.
    pub fn layout_popups(&self, area: Rect, theme: &Theme) -> Vec<PlacedPopup> {
        let mut placed = Vec::new();
        if !self.focused || area.height < 2 {
            return placed;
        }
        let Some(bar_anchor) = self.render_bar(theme).menu_anchor else {
            return placed;
        };

        let mut origin = Position::new(area.x + bar_anchor.x, area.y + 1);
        for level in 0..POPUP_LEVELS {
            let Some(popup) = self.render_popup(level, theme) else {
                break;
            };
            let Some(rect) = place(origin, popup.width, popup.height, area) else {
                break;
            };
            let next_anchor = popup.menu_anchor;
            placed.push(PlacedPopup { popup, area: rect });

            match next_anchor {
                Some(anchor) => origin = Position::new(rect.x + anchor.x, rect.y + anchor.y),
                None => break,
            }
        }
        placed
    }

    /// Draw the bar, the body (through `body`), the popups and the overlays.
    pub fn render<F>(&self, frame: &mut Frame, area: Rect, theme: &Theme, body: F)
    where
        F: FnOnce(&mut Frame, Rect),
    {
        let bar = self.render_bar(theme);
        frame.render_widget(
            Paragraph::new(bar.line).style(Style::default().bg(theme.menu_bg)),
            Self::bar_area(area),
        );

        body(frame, Self::body_area(area));

        for placed in self.layout_popups(area, theme) {
            draw_shadow(frame, placed.area, area, theme);
            frame.render_widget(Clear, placed.area);
            frame.render_widget(
                Paragraph::new(placed.popup.lines)
                    .style(Style::default().bg(theme.menu_dropdown_bg)),
                placed.area,
            );
        }

        for overlay in &self.overlays {
            let Some(overlay_area) = overlay.area(area) else {
                continue;
            };
            let overlay_area = overlay_area.intersection(area);
            if overlay_area.is_empty() {
                continue;
            }
            frame.render_widget(Clear, overlay_area);
            overlay.render(frame, overlay_area);
        }
    }
}

fn place(origin: Position, width: u16, height: u16, bounds: Rect) -> Option<Rect> {
    let x = origin
        .x
        .min(bounds.right().saturating_sub(width))
        .max(bounds.x);
    let y = origin.y;
    let width = width.min(bounds.right().saturating_sub(x));
    let height = height.min(bounds.bottom().saturating_sub(y));
    if width == 0 || height == 0 {
        return None;
    }
    Some(Rect::new(x, y, width, height))
}

/// Darken the column right of and the row below `popup`
fn draw_shadow(frame: &mut Frame, popup: Rect, bounds: Rect, theme: &Theme) {
    let style = Style::default().bg(theme.menu_shadow_bg);
    let right = Rect::new(popup.right(), popup.y + 1, 1, popup.height).intersection(bounds);
    let below = Rect::new(popup.x + 1, popup.bottom(), popup.width, 1).intersection(bounds);
    for rect in [right, below] {
        if !rect.is_empty() {
            frame.buffer_mut().set_style(rect, style);
        }
    }
}
