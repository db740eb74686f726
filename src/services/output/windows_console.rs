//! Console host backed by the Windows console API

use super::console::{ConsoleHost, ConsoleWindow, ScreenBufferInfo, StdHandle};
use super::OutputError;
use ratatui::layout::Position;
use std::io;
use std::ptr;
use windows_sys::Win32::Foundation::{
    CloseHandle, GENERIC_READ, GENERIC_WRITE, HANDLE, INVALID_HANDLE_VALUE,
};
use windows_sys::Win32::System::Console::{
    CreateConsoleScreenBuffer, FillConsoleOutputAttribute, FillConsoleOutputCharacterW,
    GetConsoleCursorInfo, GetConsoleMode, GetConsoleScreenBufferInfo, GetStdHandle,
    SetConsoleActiveScreenBuffer, SetConsoleCursorInfo, SetConsoleCursorPosition,
    SetConsoleMode, SetConsoleWindowInfo, WriteConsoleW, CONSOLE_CURSOR_INFO,
    CONSOLE_SCREEN_BUFFER_INFO, CONSOLE_TEXTMODE_BUFFER, COORD, SMALL_RECT, STD_INPUT_HANDLE,
    STD_OUTPUT_HANDLE,
};
use windows_sys::Win32::Storage::FileSystem::{FILE_SHARE_READ, FILE_SHARE_WRITE};

/// The process's attached console
pub struct WindowsConsole {
    input: HANDLE,
    output: HANDLE,
    /// Screen buffer created by `enter_alternate_buffer`
    alternate: Option<HANDLE>,
}

fn check(ok: i32) -> io::Result<()> {
    if ok == 0 {
        Err(io::Error::last_os_error())
    } else {
        Ok(())
    }
}

fn coord(position: Position) -> COORD {
    COORD {
        X: i16::try_from(position.x).unwrap_or(i16::MAX),
        Y: i16::try_from(position.y).unwrap_or(i16::MAX),
    }
}

fn std_handle(id: u32) -> io::Result<HANDLE> {
    // SAFETY: GetStdHandle has no preconditions
    let handle = unsafe { GetStdHandle(id) };
    if handle == INVALID_HANDLE_VALUE || handle.is_null() {
        return Err(io::Error::last_os_error());
    }
    Ok(handle)
}

impl WindowsConsole {
    pub fn from_std_handles() -> Result<Self, OutputError> {
        let input = std_handle(STD_INPUT_HANDLE).map_err(OutputError::console("GetStdHandle"))?;
        let output =
            std_handle(STD_OUTPUT_HANDLE).map_err(OutputError::console("GetStdHandle"))?;
        Ok(Self {
            input,
            output,
            alternate: None,
        })
    }

    fn handle(&self, handle: StdHandle) -> HANDLE {
        match handle {
            StdHandle::Input => self.input,
            StdHandle::Output => self.active_output(),
        }
    }

    fn active_output(&self) -> HANDLE {
        self.alternate.unwrap_or(self.output)
    }
}

impl ConsoleHost for WindowsConsole {
    fn mode(&self, handle: StdHandle) -> io::Result<u32> {
        let mut mode = 0u32;
        // SAFETY: handle comes from GetStdHandle, `mode` outlives the call
        check(unsafe { GetConsoleMode(self.handle(handle), &mut mode) })?;
        Ok(mode)
    }

    fn set_mode(&mut self, handle: StdHandle, mode: u32) -> io::Result<()> {
        // SAFETY: handle comes from GetStdHandle
        check(unsafe { SetConsoleMode(self.handle(handle), mode) })
    }

    fn screen_buffer_info(&self) -> io::Result<ScreenBufferInfo> {
        // SAFETY: plain-data struct, zeroed is a valid value
        let mut raw: CONSOLE_SCREEN_BUFFER_INFO = unsafe { std::mem::zeroed() };
        // SAFETY: `raw` outlives the call
        check(unsafe { GetConsoleScreenBufferInfo(self.active_output(), &mut raw) })?;
        Ok(ScreenBufferInfo {
            buffer_width: raw.dwSize.X,
            buffer_height: raw.dwSize.Y,
            cursor: Position::new(
                raw.dwCursorPosition.X.max(0) as u16,
                raw.dwCursorPosition.Y.max(0) as u16,
            ),
            window: ConsoleWindow {
                left: raw.srWindow.Left,
                top: raw.srWindow.Top,
                right: raw.srWindow.Right,
                bottom: raw.srWindow.Bottom,
            },
            attributes: raw.wAttributes,
        })
    }

    fn set_window(&mut self, window: ConsoleWindow) -> io::Result<()> {
        let rect = SMALL_RECT {
            Left: window.left,
            Top: window.top,
            Right: window.right,
            Bottom: window.bottom,
        };
        // SAFETY: `rect` outlives the call; 1 = absolute coordinates
        check(unsafe { SetConsoleWindowInfo(self.active_output(), 1, &rect) })
    }

    fn set_cursor_position(&mut self, position: Position) -> io::Result<()> {
        // SAFETY: handle comes from GetStdHandle
        check(unsafe { SetConsoleCursorPosition(self.active_output(), coord(position)) })
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        let mut info = CONSOLE_CURSOR_INFO {
            dwSize: 0,
            bVisible: 0,
        };
        // SAFETY: `info` outlives both calls
        check(unsafe { GetConsoleCursorInfo(self.active_output(), &mut info) })?;
        info.bVisible = i32::from(visible);
        check(unsafe { SetConsoleCursorInfo(self.active_output(), &info) })
    }

    fn write_console(&mut self, text: &str) -> io::Result<()> {
        let wide: Vec<u16> = text.encode_utf16().collect();
        let mut offset = 0;
        while offset < wide.len() {
            let chunk = &wide[offset..];
            let mut written = 0u32;
            // SAFETY: `chunk` is valid for its length, `written` outlives the call
            check(unsafe {
                WriteConsoleW(
                    self.active_output(),
                    chunk.as_ptr().cast(),
                    u32::try_from(chunk.len()).unwrap_or(u32::MAX),
                    &mut written,
                    ptr::null(),
                )
            })?;
            if written == 0 {
                return Err(io::Error::new(io::ErrorKind::WriteZero, "console accepted no text"));
            }
            offset += written as usize;
        }
        Ok(())
    }

    fn fill(&mut self, start: Position, length: u32) -> io::Result<()> {
        let attributes = self.screen_buffer_info()?.attributes;
        let mut written = 0u32;
        // SAFETY: `written` outlives both calls
        check(unsafe {
            FillConsoleOutputCharacterW(
                self.active_output(),
                u16::from(b' '),
                length,
                coord(start),
                &mut written,
            )
        })?;
        check(unsafe {
            FillConsoleOutputAttribute(
                self.active_output(),
                attributes,
                length,
                coord(start),
                &mut written,
            )
        })
    }

    fn enter_alternate_buffer(&mut self) -> io::Result<()> {
        if self.alternate.is_some() {
            return Ok(());
        }
        // SAFETY: no security attributes, default buffer data
        let buffer = unsafe {
            CreateConsoleScreenBuffer(
                GENERIC_READ | GENERIC_WRITE,
                FILE_SHARE_READ | FILE_SHARE_WRITE,
                ptr::null(),
                CONSOLE_TEXTMODE_BUFFER,
                ptr::null(),
            )
        };
        if buffer == INVALID_HANDLE_VALUE {
            return Err(io::Error::last_os_error());
        }
        // SAFETY: `buffer` was just created
        if let Err(e) = check(unsafe { SetConsoleActiveScreenBuffer(buffer) }) {
            unsafe { CloseHandle(buffer) };
            return Err(e);
        }
        self.alternate = Some(buffer);
        Ok(())
    }

    fn leave_alternate_buffer(&mut self) -> io::Result<()> {
        let Some(buffer) = self.alternate.take() else {
            return Ok(());
        };
        // SAFETY: `output` is the original std handle, `buffer` is owned here
        let result = check(unsafe { SetConsoleActiveScreenBuffer(self.output) });
        unsafe { CloseHandle(buffer) };
        result
    }
}

impl Drop for WindowsConsole {
    fn drop(&mut self) {
        if let Err(e) = self.leave_alternate_buffer() {
            tracing::warn!("Failed to leave alternate console buffer: {}", e);
        }
    }
}
