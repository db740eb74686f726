// Test harness for driving the menu demo on a virtual terminal

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use menubar::app::App;
use menubar::config::Config;
use menubar::services::output::{Output, Vt100Output};
use ratatui::{backend::TestBackend, Terminal};
use std::io;

/// Route library logs to the test output (shown only for failing tests)
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Virtual app environment for testing
/// Captures all rendering output without displaying to actual terminal
pub struct MenuTestHarness {
    /// The application instance
    app: App,

    /// Virtual terminal backend
    terminal: Terminal<TestBackend>,

    /// VT100 parser for testing real ANSI terminal output
    /// This simulates how a real terminal would interpret the escape sequences
    vt100_parser: vt100::Parser,

    /// Terminal dimensions for vt100
    term_width: u16,
    term_height: u16,
}

impl MenuTestHarness {
    /// Create new test harness with the default menus
    pub fn new(width: u16, height: u16) -> io::Result<Self> {
        Self::with_config(width, height, Config::default())
    }

    /// Create harness with a custom configuration
    pub fn with_config(width: u16, height: u16, config: Config) -> io::Result<Self> {
        init_tracing();
        let app = App::new(&config).map_err(io::Error::other)?;
        let terminal = Terminal::new(TestBackend::new(width, height))?;

        Ok(Self {
            app,
            terminal,
            vt100_parser: vt100::Parser::new(height, width, 0),
            term_width: width,
            term_height: height,
        })
    }

    /// Create harness from a JSON configuration document
    pub fn with_config_json(width: u16, height: u16, json: &str) -> io::Result<Self> {
        let config: Config = serde_json::from_str(json).map_err(io::Error::other)?;
        Self::with_config(width, height, config)
    }

    /// Simulate a key press
    pub fn send_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> io::Result<()> {
        self.app.handle_key(KeyEvent::new(code, modifiers));
        Ok(())
    }

    /// Simulate the same key press several times
    pub fn send_key_repeat(
        &mut self,
        code: KeyCode,
        modifiers: KeyModifiers,
        count: usize,
    ) -> io::Result<()> {
        for _ in 0..count {
            self.send_key(code, modifiers)?;
        }
        Ok(())
    }

    /// Press a sequence of unmodified keys
    pub fn press(&mut self, codes: &[KeyCode]) -> io::Result<()> {
        for code in codes {
            self.send_key(*code, KeyModifiers::NONE)?;
        }
        Ok(())
    }

    /// Force a render cycle and capture output
    pub fn render(&mut self) -> io::Result<()> {
        self.terminal.draw(|frame| {
            self.app.render(frame);
        })?;
        Ok(())
    }

    /// Render, then replay the buffer through [`Vt100Output`] into the vt100 parser
    pub fn render_real(&mut self) -> io::Result<()> {
        self.render()?;

        let (width, height) = (self.term_width, self.term_height);
        let mut output = Vt100Output::with_size_source(Vec::new(), move || Ok((width, height)));
        let buffer = self.terminal.backend().buffer();

        output.erase_screen().map_err(io::Error::other)?;
        for y in 0..buffer.area.height {
            output.cursor_goto(y, 0).map_err(io::Error::other)?;
            for x in 0..buffer.area.width {
                output
                    .write(buffer[(x, y)].symbol())
                    .map_err(io::Error::other)?;
            }
        }

        self.vt100_parser.process(output.get_ref());
        Ok(())
    }

    /// Get the screen content as parsed by vt100 (simulating real terminal)
    pub fn vt100_screen_to_string(&self) -> String {
        let screen = self.vt100_parser.screen();
        let mut result = String::new();

        for row in 0..self.term_height {
            for col in 0..self.term_width {
                match screen.cell(row, col) {
                    Some(cell) if !cell.contents().is_empty() => result.push_str(&cell.contents()),
                    _ => result.push(' '),
                }
            }
            if row < self.term_height - 1 {
                result.push('\n');
            }
        }

        result
    }

    /// Assert that TestBackend and vt100 show the same content
    /// This catches bugs in ANSI escape sequence generation
    pub fn assert_test_matches_real(&self) {
        let test_screen = self.screen_to_string();
        let vt100_screen = self.vt100_screen_to_string();
        for (row, (test_line, vt100_line)) in test_screen.lines().zip(vt100_screen.lines()).enumerate() {
            assert_eq!(
                test_line, vt100_line,
                "Row {row}: TestBackend vs VT100 mismatch\n\nTestBackend:\n{test_screen}\n\nVT100:\n{vt100_screen}"
            );
        }
    }

    /// Get the current terminal buffer (what would be displayed)
    pub fn buffer(&self) -> &ratatui::buffer::Buffer {
        self.terminal.backend().buffer()
    }

    /// Get text at specific cell position
    pub fn get_cell(&self, x: u16, y: u16) -> Option<String> {
        let buffer = self.buffer();
        let pos = buffer.index_of(x, y);
        buffer
            .content
            .get(pos)
            .map(|cell| cell.symbol().to_string())
    }

    /// Get the style (color, modifiers) of a specific cell
    pub fn get_cell_style(&self, x: u16, y: u16) -> Option<ratatui::style::Style> {
        let buffer = self.buffer();
        let pos = buffer.index_of(x, y);
        buffer.content.get(pos).map(|cell| cell.style())
    }

    /// Get the text content of a specific screen row
    pub fn get_row_text(&self, y: u16) -> String {
        let buffer = self.buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }

    /// Get entire screen as string (for debugging)
    pub fn screen_to_string(&self) -> String {
        let height = self.buffer().area.height;
        (0..height)
            .map(|y| self.get_row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Find the first screen position of `text`, as (column, row)
    pub fn find_text(&self, text: &str) -> Option<(u16, u16)> {
        let height = self.buffer().area.height;
        (0..height).find_map(|y| {
            let row = self.get_row_text(y);
            row.find(text)
                .map(|byte_idx| (row[..byte_idx].chars().count() as u16, y))
        })
    }

    /// Verify text appears on screen
    pub fn assert_screen_contains(&self, text: &str) {
        let screen = self.screen_to_string();
        assert!(
            screen.contains(text),
            "Expected screen to contain '{text}'\nScreen content:\n{screen}"
        );
    }

    /// Verify text does not appear on screen
    pub fn assert_screen_not_contains(&self, text: &str) {
        let screen = self.screen_to_string();
        assert!(
            !screen.contains(text),
            "Expected screen to not contain '{text}'\nScreen content:\n{screen}"
        );
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    /// The current menu selection path
    pub fn menu_path(&self) -> Vec<usize> {
        self.app.menu().path().to_vec()
    }

    pub fn should_quit(&self) -> bool {
        self.app.should_quit()
    }
}
