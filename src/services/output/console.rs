//! Console host abstraction
//!
//! [`ConsoleHost`] is the narrow set of console API calls the Win32 backend
//! needs. [`WindowsConsole`](super::windows_console::WindowsConsole) talks to
//! the real console on Windows; [`MemoryConsole`] keeps the same state in
//! memory so the console path can run (and be tested) on any platform.

use ratatui::layout::Position;
use std::cell::RefCell;
use std::io;
use std::rc::Rc;

/// Output mode flag: process control characters (backspace, newline, ...)
pub const ENABLE_PROCESSED_OUTPUT: u32 = 0x0001;
/// Output mode flag: interpret VT100 escape sequences
pub const ENABLE_VIRTUAL_TERMINAL_PROCESSING: u32 = 0x0004;
/// Input mode flag: report mouse events
pub const ENABLE_MOUSE_INPUT: u32 = 0x0010;
/// Input mode flag: mouse selection edits the console (conflicts with mouse input)
pub const ENABLE_QUICK_EDIT_MODE: u32 = 0x0040;
/// Input mode flag: required when changing `ENABLE_QUICK_EDIT_MODE`
pub const ENABLE_EXTENDED_FLAGS: u32 = 0x0080;

/// The mode requested while rendering with escape sequences
pub const VT100_RENDER_MODE: u32 = ENABLE_PROCESSED_OUTPUT | ENABLE_VIRTUAL_TERMINAL_PROCESSING;

/// Standard handle a mode call applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdHandle {
    Input,
    Output,
}

/// Visible window of the screen buffer, inclusive bounds in buffer cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConsoleWindow {
    pub left: i16,
    pub top: i16,
    pub right: i16,
    pub bottom: i16,
}

impl ConsoleWindow {
    pub fn width(&self) -> i16 {
        self.right - self.left + 1
    }

    pub fn height(&self) -> i16 {
        self.bottom - self.top + 1
    }
}

/// Snapshot of the console screen buffer state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenBufferInfo {
    /// Buffer size in cells (columns, rows)
    pub buffer_width: i16,
    pub buffer_height: i16,
    pub cursor: Position,
    pub window: ConsoleWindow,
    pub attributes: u16,
}

/// Console API calls used by the Win32 output backend
pub trait ConsoleHost {
    fn mode(&self, handle: StdHandle) -> io::Result<u32>;

    fn set_mode(&mut self, handle: StdHandle, mode: u32) -> io::Result<()>;

    fn screen_buffer_info(&self) -> io::Result<ScreenBufferInfo>;

    /// Scroll the visible window to `window` (absolute buffer coordinates)
    fn set_window(&mut self, window: ConsoleWindow) -> io::Result<()>;

    fn set_cursor_position(&mut self, position: Position) -> io::Result<()>;

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()>;

    fn write_console(&mut self, text: &str) -> io::Result<()>;

    /// Blank `length` cells starting at `start` using the current attributes
    fn fill(&mut self, start: Position, length: u32) -> io::Result<()>;

    fn enter_alternate_buffer(&mut self) -> io::Result<()>;

    fn leave_alternate_buffer(&mut self) -> io::Result<()>;
}

#[derive(Debug)]
struct ConsoleState {
    input_mode: u32,
    output_mode: u32,
    info: ScreenBufferInfo,
    cursor_visible: bool,
    alternate: bool,
    vt_supported: bool,
    fail_mode_calls: bool,
    written: String,
    fills: Vec<(Position, u32)>,
    mode_writes: Vec<(StdHandle, u32)>,
}

/// In-memory console host.
///
/// Clones share the same state, so a test can keep one handle while the
/// output backend owns another and inspect the console after the backend
/// is gone.
#[derive(Debug, Clone)]
pub struct MemoryConsole {
    state: Rc<RefCell<ConsoleState>>,
}

impl MemoryConsole {
    /// A console whose visible window and buffer are `columns` x `rows`
    pub fn new(columns: u16, rows: u16) -> Self {
        let columns = i16::try_from(columns).unwrap_or(i16::MAX);
        let rows = i16::try_from(rows).unwrap_or(i16::MAX);
        let info = ScreenBufferInfo {
            buffer_width: columns,
            buffer_height: rows,
            cursor: Position::new(0, 0),
            window: ConsoleWindow {
                left: 0,
                top: 0,
                right: columns - 1,
                bottom: rows - 1,
            },
            attributes: 0x07,
        };
        Self {
            state: Rc::new(RefCell::new(ConsoleState {
                input_mode: 0,
                output_mode: ENABLE_PROCESSED_OUTPUT,
                info,
                cursor_visible: true,
                alternate: false,
                vt_supported: true,
                fail_mode_calls: false,
                written: String::new(),
                fills: Vec::new(),
                mode_writes: Vec::new(),
            })),
        }
    }

    /// Reject output modes that include `ENABLE_VIRTUAL_TERMINAL_PROCESSING`,
    /// like consoles older than Windows 10 do
    pub fn with_vt_support(self, supported: bool) -> Self {
        self.state.borrow_mut().vt_supported = supported;
        self
    }

    /// Make every mode get/set fail
    pub fn with_failing_mode_calls(self, fail: bool) -> Self {
        self.set_failing_mode_calls(fail);
        self
    }

    /// Same as [`MemoryConsole::with_failing_mode_calls`], for a console
    /// already handed to an output
    pub fn set_failing_mode_calls(&self, fail: bool) {
        self.state.borrow_mut().fail_mode_calls = fail;
    }

    pub fn with_output_mode(self, mode: u32) -> Self {
        self.state.borrow_mut().output_mode = mode;
        self
    }

    pub fn with_screen_buffer(self, info: ScreenBufferInfo) -> Self {
        self.state.borrow_mut().info = info;
        self
    }

    pub fn input_mode(&self) -> u32 {
        self.state.borrow().input_mode
    }

    pub fn output_mode(&self) -> u32 {
        self.state.borrow().output_mode
    }

    /// Every successful mode change, oldest first
    pub fn mode_writes(&self) -> Vec<(StdHandle, u32)> {
        self.state.borrow().mode_writes.clone()
    }

    pub fn written(&self) -> String {
        self.state.borrow().written.clone()
    }

    pub fn fills(&self) -> Vec<(Position, u32)> {
        self.state.borrow().fills.clone()
    }

    pub fn cursor_visible(&self) -> bool {
        self.state.borrow().cursor_visible
    }

    pub fn in_alternate_buffer(&self) -> bool {
        self.state.borrow().alternate
    }

    pub fn info(&self) -> ScreenBufferInfo {
        self.state.borrow().info
    }
}

fn mode_error() -> io::Error {
    io::Error::new(io::ErrorKind::PermissionDenied, "console mode call rejected")
}

impl ConsoleHost for MemoryConsole {
    fn mode(&self, handle: StdHandle) -> io::Result<u32> {
        let state = self.state.borrow();
        if state.fail_mode_calls {
            return Err(mode_error());
        }
        Ok(match handle {
            StdHandle::Input => state.input_mode,
            StdHandle::Output => state.output_mode,
        })
    }

    fn set_mode(&mut self, handle: StdHandle, mode: u32) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        if state.fail_mode_calls {
            return Err(mode_error());
        }
        if handle == StdHandle::Output
            && !state.vt_supported
            && mode & ENABLE_VIRTUAL_TERMINAL_PROCESSING != 0
        {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "virtual terminal processing not supported",
            ));
        }
        match handle {
            StdHandle::Input => state.input_mode = mode,
            StdHandle::Output => state.output_mode = mode,
        }
        state.mode_writes.push((handle, mode));
        Ok(())
    }

    fn screen_buffer_info(&self) -> io::Result<ScreenBufferInfo> {
        Ok(self.state.borrow().info)
    }

    fn set_window(&mut self, window: ConsoleWindow) -> io::Result<()> {
        self.state.borrow_mut().info.window = window;
        Ok(())
    }

    fn set_cursor_position(&mut self, position: Position) -> io::Result<()> {
        self.state.borrow_mut().info.cursor = position;
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        self.state.borrow_mut().cursor_visible = visible;
        Ok(())
    }

    fn write_console(&mut self, text: &str) -> io::Result<()> {
        self.state.borrow_mut().written.push_str(text);
        Ok(())
    }

    fn fill(&mut self, start: Position, length: u32) -> io::Result<()> {
        self.state.borrow_mut().fills.push((start, length));
        Ok(())
    }

    fn enter_alternate_buffer(&mut self) -> io::Result<()> {
        self.state.borrow_mut().alternate = true;
        Ok(())
    }

    fn leave_alternate_buffer(&mut self) -> io::Result<()> {
        self.state.borrow_mut().alternate = false;
        Ok(())
    }
}

/// Probe whether the console accepts VT100 processing.
///
/// Switches the output mode to [`VT100_RENDER_MODE`] and always puts the
/// original mode back before returning.
pub fn detect_vt100_support<C: ConsoleHost>(host: &mut C) -> bool {
    let original = match host.mode(StdHandle::Output) {
        Ok(mode) => mode,
        Err(e) => {
            tracing::debug!("Cannot read console output mode: {}", e);
            return false;
        }
    };

    let supported = host.set_mode(StdHandle::Output, VT100_RENDER_MODE).is_ok();

    if let Err(e) = host.set_mode(StdHandle::Output, original) {
        tracing::warn!("Failed to restore console mode after VT100 probe: {}", e);
    }
    supported
}
