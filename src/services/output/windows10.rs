//! Windows 10 output: VT100 drawing on a console host
//!
//! Windows 10 consoles understand escape sequences once
//! `ENABLE_VIRTUAL_TERMINAL_PROCESSING` is set, but a few things are still
//! only available (or only accurate) through the console API: the window
//! size, the cursor's distance to the bottom, mouse input mode and the
//! scroll position. Those capabilities are listed in [`CONSOLE_ROUTED`];
//! everything else is drawn with escape sequences.

use super::console::{ConsoleHost, StdHandle, VT100_RENDER_MODE};
use super::vt100::Vt100Output;
use super::win32::Win32Output;
use super::{Output, OutputError, ScreenBufferInfo};
use ratatui::layout::Size;
use std::cell::Cell;
use std::io::Write;

/// Every operation of the [`Output`] trait
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Write,
    WriteRaw,
    Flush,
    GetSize,
    RowsBelowCursor,
    CursorGoto,
    HideCursor,
    ShowCursor,
    EraseScreen,
    EnterAlternateScreen,
    QuitAlternateScreen,
    EnableMouseSupport,
    DisableMouseSupport,
    EnableBracketedPaste,
    DisableBracketedPaste,
    ScrollBufferToPrompt,
    ScreenBufferInfo,
}

/// Which backend served a capability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Console,
    Vt100,
}

/// Capabilities served by the console API backend
pub const CONSOLE_ROUTED: &[Capability] = &[
    Capability::GetSize,
    Capability::RowsBelowCursor,
    Capability::EnableMouseSupport,
    Capability::DisableMouseSupport,
    Capability::ScrollBufferToPrompt,
    Capability::ScreenBufferInfo,
    Capability::EnableBracketedPaste,
    Capability::DisableBracketedPaste,
];

/// The backend that serves `capability`
pub fn route(capability: Capability) -> Backend {
    if CONSOLE_ROUTED.contains(&capability) {
        Backend::Console
    } else {
        Backend::Vt100
    }
}

macro_rules! routed {
    ($self:ident, $capability:expr, $method:ident($($arg:expr),*)) => {
        match $self.backend($capability) {
            Backend::Console => $self.win32.$method($($arg),*),
            Backend::Vt100 => $self.vt100.$method($($arg),*),
        }
    };
}

/// Routes each capability to the console or the VT100 backend
pub struct Windows10Output<C: ConsoleHost, W: Write> {
    win32: Win32Output<C>,
    vt100: Vt100Output<W>,
    saved_mode: Option<u32>,
    last_route: Cell<Option<(Capability, Backend)>>,
}

impl<C: ConsoleHost, W: Write> Windows10Output<C, W> {
    pub fn new(host: C, writer: W) -> Self {
        Self::from_backends(Win32Output::new(host), Vt100Output::new(writer))
    }

    pub fn from_backends(win32: Win32Output<C>, vt100: Vt100Output<W>) -> Self {
        Self {
            win32,
            vt100,
            saved_mode: None,
            last_route: Cell::new(None),
        }
    }

    pub fn win32(&self) -> &Win32Output<C> {
        &self.win32
    }

    pub fn vt100(&self) -> &Vt100Output<W> {
        &self.vt100
    }

    /// The most recent capability call and the backend that served it
    pub fn last_route(&self) -> Option<(Capability, Backend)> {
        self.last_route.get()
    }

    /// Output mode saved by `start_rendering`, while rendering
    pub fn saved_mode(&self) -> Option<u32> {
        self.saved_mode
    }

    fn backend(&self, capability: Capability) -> Backend {
        let backend = route(capability);
        self.last_route.set(Some((capability, backend)));
        tracing::trace!("{:?} -> {:?}", capability, backend);
        backend
    }
}

impl<C: ConsoleHost, W: Write> Output for Windows10Output<C, W> {
    fn write(&mut self, text: &str) -> Result<(), OutputError> {
        routed!(self, Capability::Write, write(text))
    }

    fn write_raw(&mut self, data: &[u8]) -> Result<(), OutputError> {
        routed!(self, Capability::WriteRaw, write_raw(data))
    }

    fn flush(&mut self) -> Result<(), OutputError> {
        routed!(self, Capability::Flush, flush())
    }

    fn get_size(&self) -> Result<Size, OutputError> {
        routed!(self, Capability::GetSize, get_size())
    }

    fn rows_below_cursor(&self) -> Result<u16, OutputError> {
        routed!(self, Capability::RowsBelowCursor, rows_below_cursor())
    }

    fn cursor_goto(&mut self, row: u16, column: u16) -> Result<(), OutputError> {
        routed!(self, Capability::CursorGoto, cursor_goto(row, column))
    }

    fn hide_cursor(&mut self) -> Result<(), OutputError> {
        routed!(self, Capability::HideCursor, hide_cursor())
    }

    fn show_cursor(&mut self) -> Result<(), OutputError> {
        routed!(self, Capability::ShowCursor, show_cursor())
    }

    fn erase_screen(&mut self) -> Result<(), OutputError> {
        routed!(self, Capability::EraseScreen, erase_screen())
    }

    fn enter_alternate_screen(&mut self) -> Result<(), OutputError> {
        routed!(self, Capability::EnterAlternateScreen, enter_alternate_screen())
    }

    fn quit_alternate_screen(&mut self) -> Result<(), OutputError> {
        routed!(self, Capability::QuitAlternateScreen, quit_alternate_screen())
    }

    fn enable_mouse_support(&mut self) -> Result<(), OutputError> {
        routed!(self, Capability::EnableMouseSupport, enable_mouse_support())
    }

    fn disable_mouse_support(&mut self) -> Result<(), OutputError> {
        routed!(self, Capability::DisableMouseSupport, disable_mouse_support())
    }

    fn enable_bracketed_paste(&mut self) -> Result<(), OutputError> {
        routed!(self, Capability::EnableBracketedPaste, enable_bracketed_paste())
    }

    fn disable_bracketed_paste(&mut self) -> Result<(), OutputError> {
        routed!(self, Capability::DisableBracketedPaste, disable_bracketed_paste())
    }

    fn scroll_buffer_to_prompt(&mut self) -> Result<(), OutputError> {
        routed!(self, Capability::ScrollBufferToPrompt, scroll_buffer_to_prompt())
    }

    fn screen_buffer_info(&self) -> Result<ScreenBufferInfo, OutputError> {
        routed!(self, Capability::ScreenBufferInfo, screen_buffer_info())
    }

    /// Save the console output mode and switch on VT100 processing.
    ///
    /// Calling it again before `stop_rendering` keeps the first saved mode.
    fn start_rendering(&mut self) -> Result<(), OutputError> {
        let host = self.win32.host_mut();
        let original = host
            .mode(StdHandle::Output)
            .map_err(OutputError::console_mode("GetConsoleMode"))?;
        host.set_mode(StdHandle::Output, VT100_RENDER_MODE)
            .map_err(OutputError::console_mode("SetConsoleMode"))?;

        if self.saved_mode.is_none() {
            self.saved_mode = Some(original);
        }
        tracing::info!(
            "Console output mode {:#06x} -> {:#06x}",
            original,
            VT100_RENDER_MODE
        );
        Ok(())
    }

    /// Put back the mode saved by `start_rendering`
    fn stop_rendering(&mut self) -> Result<(), OutputError> {
        let Some(mode) = self.saved_mode.take() else {
            return Ok(());
        };
        self.win32
            .host_mut()
            .set_mode(StdHandle::Output, mode)
            .map_err(OutputError::console_mode("SetConsoleMode"))?;
        tracing::info!("Console output mode restored to {:#06x}", mode);
        Ok(())
    }
}
