use crate::common::harness::MenuTestHarness;
use crossterm::event::KeyCode;
use menubar::services::output::console::{
    ENABLE_MOUSE_INPUT, ENABLE_PROCESSED_OUTPUT, VT100_RENDER_MODE,
};
use menubar::services::output::{
    route, Backend, Capability, MemoryConsole, Output, OutputError, RenderSession, StdHandle,
    Vt100Output, Win32Output, Windows10Output, CONSOLE_ROUTED,
};
use std::io::Write;
use std::panic::{catch_unwind, AssertUnwindSafe};

type TestOutput = Windows10Output<MemoryConsole, Vec<u8>>;

fn windows10(console: &MemoryConsole) -> TestOutput {
    Windows10Output::from_backends(
        Win32Output::new(console.clone()),
        Vt100Output::with_size_source(Vec::new(), || Ok((80, 24))),
    )
}

/// Test a full session: setup, drawing, teardown
#[test]
fn test_session_lifecycle_on_console() {
    let console = MemoryConsole::new(80, 24);
    assert_eq!(console.output_mode(), ENABLE_PROCESSED_OUTPUT);

    {
        let mut session = RenderSession::begin(windows10(&console)).unwrap();
        assert_eq!(console.output_mode(), VT100_RENDER_MODE);

        // Same setup as the demo binary
        session.enter_alternate_screen().unwrap();
        session.hide_cursor().unwrap();
        session.enable_mouse_support().unwrap();
        session.enable_bracketed_paste().unwrap();
        assert_eq!(session.last_route(), Some((Capability::EnableBracketedPaste, Backend::Console)));

        session.cursor_goto(0, 0).unwrap();
        session.write_all(b" File Edit").unwrap();
        session.flush().unwrap();

        // Drawing went out as escape sequences, the mouse through the console
        assert!(console.input_mode() & ENABLE_MOUSE_INPUT != 0);
        assert!(console.written().is_empty());
        assert!(!console.in_alternate_buffer());

        let mut parser = vt100::Parser::new(24, 80, 0);
        parser.process(session.vt100().get_ref());
        assert!(parser.screen().alternate_screen());
        assert!(parser.screen().hide_cursor());
        assert_eq!(parser.screen().contents_between(0, 0, 0, 10), " File Edit");

        let size = session.get_size().unwrap();
        assert_eq!((size.width, size.height), (79, 24));
        assert_eq!(session.last_route(), Some((Capability::GetSize, Backend::Console)));
    }

    // Dropping the session puts the original mode back
    assert_eq!(console.output_mode(), ENABLE_PROCESSED_OUTPUT);
    assert_eq!(
        console.mode_writes().last(),
        Some(&(StdHandle::Output, ENABLE_PROCESSED_OUTPUT))
    );
}

/// Test the console mode is restored when rendering panics
#[test]
fn test_mode_restored_after_panic() {
    let console = MemoryConsole::new(80, 24).with_output_mode(0x0003);

    let result = catch_unwind(AssertUnwindSafe(|| {
        let mut session = RenderSession::begin(windows10(&console)).unwrap();
        session.write_raw(b"drawing").unwrap();
        panic!("render failure");
    }));

    assert!(result.is_err());
    assert_eq!(console.output_mode(), 0x0003);
}

/// Test failing console mode calls abort the session before it starts
#[test]
fn test_mode_failure_is_fatal() {
    let console = MemoryConsole::new(80, 24).with_failing_mode_calls(true);
    match RenderSession::begin(windows10(&console)) {
        Err(OutputError::ConsoleMode { operation, .. }) => assert_eq!(operation, "GetConsoleMode"),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("session started without console mode"),
    }
    assert!(console.mode_writes().is_empty());
}

/// Test the console-routed set is exactly the console-only capabilities
#[test]
fn test_routing_table() {
    let all = [
        Capability::Write,
        Capability::WriteRaw,
        Capability::Flush,
        Capability::GetSize,
        Capability::RowsBelowCursor,
        Capability::CursorGoto,
        Capability::HideCursor,
        Capability::ShowCursor,
        Capability::EraseScreen,
        Capability::EnterAlternateScreen,
        Capability::QuitAlternateScreen,
        Capability::EnableMouseSupport,
        Capability::DisableMouseSupport,
        Capability::EnableBracketedPaste,
        Capability::DisableBracketedPaste,
        Capability::ScrollBufferToPrompt,
        Capability::ScreenBufferInfo,
    ];
    for capability in all {
        let expected = if CONSOLE_ROUTED.contains(&capability) {
            Backend::Console
        } else {
            Backend::Vt100
        };
        assert_eq!(route(capability), expected, "{capability:?}");
    }
    let console_count = all
        .iter()
        .filter(|capability| route(**capability) == Backend::Console)
        .count();
    assert_eq!(console_count, CONSOLE_ROUTED.len());
    assert_eq!(all.len() - console_count, 9);
}

/// Test the demo's screen drawn through the Windows 10 adapter
#[test]
fn test_menu_screen_through_adapter() {
    let mut harness = MenuTestHarness::new(40, 12).unwrap();
    harness.press(&[KeyCode::Tab, KeyCode::Down]).unwrap();
    harness.render().unwrap();

    let console = MemoryConsole::new(40, 12);
    let mut session = RenderSession::begin(windows10(&console)).unwrap();
    session.erase_screen().unwrap();
    for y in 0..12 {
        session.cursor_goto(y, 0).unwrap();
        session
            .write_raw(harness.get_row_text(y).as_bytes())
            .unwrap();
    }
    session.finish().unwrap();
    assert!(!session.is_active());

    let mut parser = vt100::Parser::new(12, 40, 0);
    parser.process(session.vt100().get_ref());
    let contents = parser.screen().contents();
    assert!(contents.contains(" File Edit View Help"));
    assert!(contents.contains("│ New"));
    assert_eq!(console.output_mode(), ENABLE_PROCESSED_OUTPUT);
}
