//! Terminal output backends
//!
//! Everything that draws goes through the [`Output`] trait. There are two
//! concrete backends and one adapter:
//!
//! - [`Vt100Output`]: escape sequences written to any `io::Write`
//! - [`Win32Output`]: console API calls through a [`ConsoleHost`]
//! - [`Windows10Output`]: both at once; a fixed set of capabilities go to
//!   the console API, the rest to VT100, and the console is switched into
//!   VT processing mode for the duration of a [`RenderSession`]

pub mod console;
pub mod session;
pub mod vt100;
pub mod win32;
pub mod windows10;
#[cfg(windows)]
pub mod windows_console;

pub use console::{
    detect_vt100_support, ConsoleHost, ConsoleWindow, MemoryConsole, ScreenBufferInfo, StdHandle,
};
pub use session::RenderSession;
pub use vt100::Vt100Output;
pub use win32::Win32Output;
pub use windows10::{route, Backend, Capability, Windows10Output, CONSOLE_ROUTED};

use ratatui::layout::Size;
use std::io;

/// Errors raised by output backends
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The console refused a mode change; rendering cannot proceed
    #[error("console mode {operation} failed: {source}")]
    ConsoleMode {
        operation: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("console call {operation} failed: {source}")]
    Console {
        operation: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("{0} is not available on this output")]
    Unsupported(&'static str),
}

impl OutputError {
    pub(crate) fn console(operation: &'static str) -> impl FnOnce(io::Error) -> Self {
        move |source| OutputError::Console { operation, source }
    }

    pub(crate) fn console_mode(operation: &'static str) -> impl FnOnce(io::Error) -> Self {
        move |source| OutputError::ConsoleMode { operation, source }
    }
}

/// A terminal output device
pub trait Output {
    /// Write text; escape characters are replaced so they cannot start a sequence
    fn write(&mut self, text: &str) -> Result<(), OutputError>;

    /// Write bytes unchanged, escape sequences included
    fn write_raw(&mut self, data: &[u8]) -> Result<(), OutputError>;

    fn flush(&mut self) -> Result<(), OutputError>;

    /// Visible size in cells
    fn get_size(&self) -> Result<Size, OutputError>;

    /// Rows from the cursor to the bottom of the visible window, cursor row included
    fn rows_below_cursor(&self) -> Result<u16, OutputError>;

    fn cursor_goto(&mut self, row: u16, column: u16) -> Result<(), OutputError>;

    fn hide_cursor(&mut self) -> Result<(), OutputError>;

    fn show_cursor(&mut self) -> Result<(), OutputError>;

    fn erase_screen(&mut self) -> Result<(), OutputError>;

    fn enter_alternate_screen(&mut self) -> Result<(), OutputError>;

    fn quit_alternate_screen(&mut self) -> Result<(), OutputError>;

    fn enable_mouse_support(&mut self) -> Result<(), OutputError>;

    fn disable_mouse_support(&mut self) -> Result<(), OutputError>;

    fn enable_bracketed_paste(&mut self) -> Result<(), OutputError>;

    fn disable_bracketed_paste(&mut self) -> Result<(), OutputError>;

    /// Scroll the console window so the cursor row is visible
    fn scroll_buffer_to_prompt(&mut self) -> Result<(), OutputError>;

    fn screen_buffer_info(&self) -> Result<ScreenBufferInfo, OutputError>;

    /// Called before a frame loop starts
    fn start_rendering(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    /// Called after a frame loop ends
    fn stop_rendering(&mut self) -> Result<(), OutputError> {
        Ok(())
    }
}

impl<O: Output + ?Sized> Output for Box<O> {
    fn write(&mut self, text: &str) -> Result<(), OutputError> {
        (**self).write(text)
    }

    fn write_raw(&mut self, data: &[u8]) -> Result<(), OutputError> {
        (**self).write_raw(data)
    }

    fn flush(&mut self) -> Result<(), OutputError> {
        (**self).flush()
    }

    fn get_size(&self) -> Result<Size, OutputError> {
        (**self).get_size()
    }

    fn rows_below_cursor(&self) -> Result<u16, OutputError> {
        (**self).rows_below_cursor()
    }

    fn cursor_goto(&mut self, row: u16, column: u16) -> Result<(), OutputError> {
        (**self).cursor_goto(row, column)
    }

    fn hide_cursor(&mut self) -> Result<(), OutputError> {
        (**self).hide_cursor()
    }

    fn show_cursor(&mut self) -> Result<(), OutputError> {
        (**self).show_cursor()
    }

    fn erase_screen(&mut self) -> Result<(), OutputError> {
        (**self).erase_screen()
    }

    fn enter_alternate_screen(&mut self) -> Result<(), OutputError> {
        (**self).enter_alternate_screen()
    }

    fn quit_alternate_screen(&mut self) -> Result<(), OutputError> {
        (**self).quit_alternate_screen()
    }

    fn enable_mouse_support(&mut self) -> Result<(), OutputError> {
        (**self).enable_mouse_support()
    }

    fn disable_mouse_support(&mut self) -> Result<(), OutputError> {
        (**self).disable_mouse_support()
    }

    fn enable_bracketed_paste(&mut self) -> Result<(), OutputError> {
        (**self).enable_bracketed_paste()
    }

    fn disable_bracketed_paste(&mut self) -> Result<(), OutputError> {
        (**self).disable_bracketed_paste()
    }

    fn scroll_buffer_to_prompt(&mut self) -> Result<(), OutputError> {
        (**self).scroll_buffer_to_prompt()
    }

    fn screen_buffer_info(&self) -> Result<ScreenBufferInfo, OutputError> {
        (**self).screen_buffer_info()
    }

    fn start_rendering(&mut self) -> Result<(), OutputError> {
        (**self).start_rendering()
    }

    fn stop_rendering(&mut self) -> Result<(), OutputError> {
        (**self).stop_rendering()
    }
}

/// Pick the output backend for the current platform and terminal.
///
/// On Windows the console is probed for VT100 support: consoles that accept
/// it get the [`Windows10Output`] adapter, older ones the plain console
/// backend. Elsewhere escape sequences go straight to stdout.
pub fn create_output() -> Result<Box<dyn Output>, OutputError> {
    #[cfg(windows)]
    {
        let mut host = windows_console::WindowsConsole::from_std_handles()?;
        if detect_vt100_support(&mut host) {
            tracing::info!("Console supports VT100, using Windows 10 output");
            Ok(Box::new(Windows10Output::new(host, io::stdout())))
        } else {
            tracing::info!("Console lacks VT100 support, using Win32 output");
            Ok(Box::new(Win32Output::new(host)))
        }
    }

    #[cfg(not(windows))]
    {
        tracing::info!("Using VT100 output");
        Ok(Box::new(Vt100Output::new(io::stdout())))
    }
}
