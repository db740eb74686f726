//! Console API output backend

use super::console::{
    ConsoleHost, ConsoleWindow, ScreenBufferInfo, StdHandle, ENABLE_EXTENDED_FLAGS,
    ENABLE_MOUSE_INPUT, ENABLE_QUICK_EDIT_MODE,
};
use super::{Output, OutputError};
use ratatui::layout::{Position, Size};

/// Draws through console API calls on a [`ConsoleHost`]
pub struct Win32Output<C: ConsoleHost> {
    host: C,
}

impl<C: ConsoleHost> Win32Output<C> {
    pub fn new(host: C) -> Self {
        Self { host }
    }

    pub fn host(&self) -> &C {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut C {
        &mut self.host
    }

    fn info(&self) -> Result<ScreenBufferInfo, OutputError> {
        self.host
            .screen_buffer_info()
            .map_err(OutputError::console("GetConsoleScreenBufferInfo"))
    }
}

fn clamp_u16(value: i32) -> u16 {
    value.clamp(0, u16::MAX as i32) as u16
}

impl<C: ConsoleHost> Output for Win32Output<C> {
    fn write(&mut self, text: &str) -> Result<(), OutputError> {
        let escaped = text.replace('\x1b', "?");
        self.host
            .write_console(&escaped)
            .map_err(OutputError::console("WriteConsoleW"))
    }

    fn write_raw(&mut self, data: &[u8]) -> Result<(), OutputError> {
        self.host
            .write_console(&String::from_utf8_lossy(data))
            .map_err(OutputError::console("WriteConsoleW"))
    }

    fn flush(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    /// Size of the visible window. The last buffer column is left out
    /// because writing there makes the console wrap.
    fn get_size(&self) -> Result<Size, OutputError> {
        let info = self.info()?;
        let window = info.window;
        let width = i32::from(window.right - window.left).min(i32::from(info.buffer_width) - 1);
        let height = i32::from(window.height());
        Ok(Size::new(clamp_u16(width), clamp_u16(height)))
    }

    fn rows_below_cursor(&self) -> Result<u16, OutputError> {
        let info = self.info()?;
        Ok(clamp_u16(
            i32::from(info.window.bottom) - i32::from(info.cursor.y) + 1,
        ))
    }

    fn cursor_goto(&mut self, row: u16, column: u16) -> Result<(), OutputError> {
        self.host
            .set_cursor_position(Position::new(column, row))
            .map_err(OutputError::console("SetConsoleCursorPosition"))
    }

    fn hide_cursor(&mut self) -> Result<(), OutputError> {
        self.host
            .set_cursor_visible(false)
            .map_err(OutputError::console("SetConsoleCursorInfo"))
    }

    fn show_cursor(&mut self) -> Result<(), OutputError> {
        self.host
            .set_cursor_visible(true)
            .map_err(OutputError::console("SetConsoleCursorInfo"))
    }

    fn erase_screen(&mut self) -> Result<(), OutputError> {
        let info = self.info()?;
        let cells = clamp_u16(i32::from(info.buffer_width)) as u32
            * clamp_u16(i32::from(info.buffer_height)) as u32;
        let origin = Position::new(0, 0);
        self.host
            .fill(origin, cells)
            .map_err(OutputError::console("FillConsoleOutputCharacterW"))?;
        self.host
            .set_cursor_position(origin)
            .map_err(OutputError::console("SetConsoleCursorPosition"))
    }

    fn enter_alternate_screen(&mut self) -> Result<(), OutputError> {
        self.host
            .enter_alternate_buffer()
            .map_err(OutputError::console("SetConsoleActiveScreenBuffer"))
    }

    fn quit_alternate_screen(&mut self) -> Result<(), OutputError> {
        self.host
            .leave_alternate_buffer()
            .map_err(OutputError::console("SetConsoleActiveScreenBuffer"))
    }

    fn enable_mouse_support(&mut self) -> Result<(), OutputError> {
        let mode = self
            .host
            .mode(StdHandle::Input)
            .map_err(OutputError::console_mode("GetConsoleMode"))?;
        let mode = (mode | ENABLE_MOUSE_INPUT | ENABLE_EXTENDED_FLAGS) & !ENABLE_QUICK_EDIT_MODE;
        self.host
            .set_mode(StdHandle::Input, mode)
            .map_err(OutputError::console_mode("SetConsoleMode"))
    }

    fn disable_mouse_support(&mut self) -> Result<(), OutputError> {
        let mode = self
            .host
            .mode(StdHandle::Input)
            .map_err(OutputError::console_mode("GetConsoleMode"))?;
        self.host
            .set_mode(StdHandle::Input, mode & !ENABLE_MOUSE_INPUT)
            .map_err(OutputError::console_mode("SetConsoleMode"))
    }

    fn enable_bracketed_paste(&mut self) -> Result<(), OutputError> {
        // The console delivers pastes as plain key events
        Ok(())
    }

    fn disable_bracketed_paste(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    /// Scroll so the cursor row sits at the bottom of the window, unless it
    /// is already comfortably inside it.
    fn scroll_buffer_to_prompt(&mut self) -> Result<(), OutputError> {
        let info = self.info()?;
        let current = info.window;
        let cursor_y = i16::try_from(info.cursor.y).unwrap_or(i16::MAX);
        let win_height = current.bottom - current.top;

        let distance = current.bottom - cursor_y;
        let bottom = if 0 < distance && distance < win_height - 1 {
            current.bottom
        } else {
            win_height.max(cursor_y)
        };
        let window = ConsoleWindow {
            left: 0,
            top: bottom - win_height,
            right: current.right - current.left,
            bottom,
        };
        self.host
            .set_window(window)
            .map_err(OutputError::console("SetConsoleWindowInfo"))
    }

    fn screen_buffer_info(&self) -> Result<ScreenBufferInfo, OutputError> {
        self.info()
    }
}
