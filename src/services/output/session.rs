//! Scoped rendering session
//!
//! [`RenderSession`] owns an [`Output`] between `start_rendering` and
//! `stop_rendering`. The console mode is restored exactly once: by
//! [`RenderSession::finish`], which reports failures, or by `Drop` on early
//! return or panic, which can only log them.

use super::{Output, OutputError};
use std::io;
use std::ops::{Deref, DerefMut};

/// Guard that keeps an output in rendering mode while alive.
///
/// It is also an `io::Write` sink (bytes go to [`Output::write_raw`]), so
/// it can back a ratatui `CrosstermBackend`.
///
/// # Example
///
/// ```ignore
/// let mut session = RenderSession::begin(create_output()?)?;
/// session.enter_alternate_screen()?;
/// write!(session, "frame bytes")?;
/// session.quit_alternate_screen()?;
/// session.finish()?;
/// ```
pub struct RenderSession<O: Output> {
    output: O,
    active: bool,
}

impl<O: Output> RenderSession<O> {
    /// Start rendering on `output`
    pub fn begin(mut output: O) -> Result<Self, OutputError> {
        output.start_rendering()?;
        tracing::debug!("Render session started");
        Ok(Self {
            output,
            active: true,
        })
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Undo the demo screen setup and stop rendering.
    ///
    /// Every step runs even when an earlier one fails, so the cursor comes
    /// back and the alternate screen is left whatever the console does.
    /// Returns the first error.
    pub fn teardown(
        &mut self,
        mouse_enabled: bool,
        bracketed_paste: bool,
    ) -> Result<(), OutputError> {
        let mut first_error = None;
        let mut record = |result: Result<(), OutputError>| {
            if let Err(e) = result {
                tracing::warn!("Terminal teardown step failed: {}", e);
                first_error.get_or_insert(e);
            }
        };

        if mouse_enabled {
            record(self.output.disable_mouse_support());
        }
        if bracketed_paste {
            record(self.output.disable_bracketed_paste());
        }
        record(self.output.show_cursor());
        record(self.output.quit_alternate_screen());
        record(self.output.flush());
        record(self.finish());

        first_error.map_or(Ok(()), Err)
    }

    /// Stop rendering now and report whether the restore worked.
    ///
    /// Later calls (and the eventual drop) do nothing.
    pub fn finish(&mut self) -> Result<(), OutputError> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        let result = self.output.stop_rendering();
        tracing::debug!("Render session finished");
        result
    }
}

impl<O: Output> Drop for RenderSession<O> {
    fn drop(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        if let Err(e) = self.output.stop_rendering() {
            tracing::warn!("Failed to restore console state: {}", e);
        }
    }
}

impl<O: Output> Deref for RenderSession<O> {
    type Target = O;

    fn deref(&self) -> &O {
        &self.output
    }
}

impl<O: Output> DerefMut for RenderSession<O> {
    fn deref_mut(&mut self) -> &mut O {
        &mut self.output
    }
}

impl<O: Output> io::Write for RenderSession<O> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.write_raw(buf).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.output.flush().map_err(io::Error::other)
    }
}
