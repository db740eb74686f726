use super::App;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Status line text while nothing else is being reported
pub const STATUS_HINT: &str = "Tab: menu  q: quit";

impl App {
    /// Render the app to the terminal
    pub fn render(&self, frame: &mut Frame) {
        let _span = tracing::trace_span!("render").entered();

        // [menu bar + body, status bar]
        let [main, status] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

        let theme = &self.theme;
        let body_style = Style::default().fg(theme.editor_fg).bg(theme.editor_bg);
        let body: Vec<Line> = self.body.iter().map(|line| Line::from(line.as_str())).collect();

        self.menu.render(frame, main, theme, |frame, area| {
            frame.render_widget(Paragraph::new(body).style(body_style), area);
        });

        frame.render_widget(
            Paragraph::new(self.status_text())
                .style(Style::default().fg(theme.status_bar_fg).bg(theme.status_bar_bg)),
            status,
        );
    }

    /// Status message, or the focused menu entry while the bar has focus
    fn status_text(&self) -> String {
        if let Some(message) = &self.status_message {
            return message.clone();
        }
        if self.menu.has_focus() {
            let entry = self.menu.focused_entry().entry();
            return match &entry.shortcut {
                Some(shortcut) => format!("{} ({})", entry.text, shortcut),
                None => entry.text.clone(),
            };
        }
        STATUS_HINT.to_string()
    }
}
