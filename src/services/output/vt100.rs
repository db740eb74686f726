//! Escape-sequence output backend

use super::{Output, OutputError, ScreenBufferInfo};
use crossterm::{cursor, event, terminal, Command};
use ratatui::layout::Size;
use std::io::{self, Write};

type SizeSource = Box<dyn Fn() -> io::Result<(u16, u16)>>;

/// Writes VT100 escape sequences to `W`.
///
/// The terminal size comes from a size source that defaults to
/// `crossterm::terminal::size`; tests and embedders can supply their own.
pub struct Vt100Output<W: Write> {
    writer: W,
    size_source: SizeSource,
}

impl<W: Write> Vt100Output<W> {
    pub fn new(writer: W) -> Self {
        Self::with_size_source(writer, terminal::size)
    }

    /// Use `size_source` (returning columns, rows) instead of querying the tty
    pub fn with_size_source(
        writer: W,
        size_source: impl Fn() -> io::Result<(u16, u16)> + 'static,
    ) -> Self {
        Self {
            writer,
            size_source: Box::new(size_source),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Queue the ANSI form of `command`, whatever the platform
    fn emit(&mut self, command: impl Command) -> Result<(), OutputError> {
        let mut ansi = String::new();
        command
            .write_ansi(&mut ansi)
            .map_err(|_| io::Error::other("failed to format escape sequence"))?;
        self.writer.write_all(ansi.as_bytes())?;
        Ok(())
    }
}

impl<W: Write> Output for Vt100Output<W> {
    fn write(&mut self, text: &str) -> Result<(), OutputError> {
        let escaped = text.replace('\x1b', "?");
        self.writer.write_all(escaped.as_bytes())?;
        Ok(())
    }

    fn write_raw(&mut self, data: &[u8]) -> Result<(), OutputError> {
        self.writer.write_all(data)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), OutputError> {
        self.writer.flush()?;
        Ok(())
    }

    fn get_size(&self) -> Result<Size, OutputError> {
        let (columns, rows) = (self.size_source)()?;
        Ok(Size::new(columns, rows))
    }

    fn rows_below_cursor(&self) -> Result<u16, OutputError> {
        Err(OutputError::Unsupported("rows_below_cursor"))
    }

    fn cursor_goto(&mut self, row: u16, column: u16) -> Result<(), OutputError> {
        self.emit(cursor::MoveTo(column, row))
    }

    fn hide_cursor(&mut self) -> Result<(), OutputError> {
        self.emit(cursor::Hide)
    }

    fn show_cursor(&mut self) -> Result<(), OutputError> {
        self.emit(cursor::Show)
    }

    fn erase_screen(&mut self) -> Result<(), OutputError> {
        self.emit(terminal::Clear(terminal::ClearType::All))
    }

    fn enter_alternate_screen(&mut self) -> Result<(), OutputError> {
        self.emit(terminal::EnterAlternateScreen)?;
        self.emit(cursor::MoveTo(0, 0))
    }

    fn quit_alternate_screen(&mut self) -> Result<(), OutputError> {
        self.emit(terminal::LeaveAlternateScreen)
    }

    fn enable_mouse_support(&mut self) -> Result<(), OutputError> {
        self.emit(event::EnableMouseCapture)
    }

    fn disable_mouse_support(&mut self) -> Result<(), OutputError> {
        self.emit(event::DisableMouseCapture)
    }

    fn enable_bracketed_paste(&mut self) -> Result<(), OutputError> {
        self.emit(event::EnableBracketedPaste)
    }

    fn disable_bracketed_paste(&mut self) -> Result<(), OutputError> {
        self.emit(event::DisableBracketedPaste)
    }

    fn scroll_buffer_to_prompt(&mut self) -> Result<(), OutputError> {
        // Terminals keep the cursor row in view on their own
        Ok(())
    }

    fn screen_buffer_info(&self) -> Result<ScreenBufferInfo, OutputError> {
        Err(OutputError::Unsupported("screen_buffer_info"))
    }
}
