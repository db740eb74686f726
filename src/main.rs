use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use crossterm::event::{read as event_read, Event as CrosstermEvent, KeyEventKind};
use menubar::app::App;
use menubar::config::Config;
use menubar::services::output::{create_output, Output, OutputError, RenderSession};
use menubar::services::tracing_setup;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

/// Demo of a cascading keyboard-driven menu bar
#[derive(Parser, Debug)]
#[command(name = "menubar-demo")]
#[command(about = "A terminal menu bar with cascading popups", long_about = None)]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to log file (default: system temp dir)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,

    /// Print the JSON schema of the configuration file and exit
    #[arg(long)]
    dump_schema: bool,

    /// Do not capture the mouse
    #[arg(long)]
    no_mouse: bool,
}

type Session = RenderSession<Box<dyn Output>>;

/// `io::Write` handle onto the shared session, for ratatui's backend
struct SessionWriter(Rc<RefCell<Session>>);

impl io::Write for SessionWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::Write::write(&mut *self.0.borrow_mut(), buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::Write::flush(&mut *self.0.borrow_mut())
    }
}

type AppTerminal = Terminal<CrosstermBackend<SessionWriter>>;

fn load_config(args: &Args) -> AnyhowResult<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load_or_default(),
    };
    if args.no_mouse {
        config.mouse_support = false;
    }
    Ok(config)
}

/// Restore the terminal after a panic, before the message is printed
fn emergency_cleanup() {
    let _ = crossterm::terminal::disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        crossterm::event::DisableMouseCapture,
        crossterm::event::DisableBracketedPaste,
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::cursor::Show
    );
}

fn setup_terminal(session: &mut Session, config: &Config) -> Result<(), OutputError> {
    session.enter_alternate_screen()?;
    session.hide_cursor()?;
    session.erase_screen()?;
    if config.mouse_support {
        session.enable_mouse_support()?;
    }
    if config.bracketed_paste {
        session.enable_bracketed_paste()?;
    }
    session.flush()
}

fn restore_terminal(
    session: &mut Session,
    config: &Config,
    mouse_enabled: bool,
) -> Result<(), OutputError> {
    session.teardown(mouse_enabled, config.bracketed_paste)
}

fn run_event_loop(
    app: &mut App,
    terminal: &mut AppTerminal,
    session: &Rc<RefCell<Session>>,
) -> AnyhowResult<()> {
    let mut mouse_enabled = app.mouse_enabled();
    loop {
        terminal.draw(|frame| app.render(frame))?;
        if app.should_quit() {
            return Ok(());
        }

        match event_read().context("Failed to read terminal event")? {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
            CrosstermEvent::Resize(columns, rows) => {
                tracing::debug!("Terminal resized to {}x{}", columns, rows);
            }
            _ => {}
        }

        if app.mouse_enabled() != mouse_enabled {
            mouse_enabled = app.mouse_enabled();
            let mut session = session.borrow_mut();
            if mouse_enabled {
                session.enable_mouse_support()?;
            } else {
                session.disable_mouse_support()?;
            }
        }
    }
}

fn run_session(app: &mut App, config: &Config, session: &Rc<RefCell<Session>>) -> AnyhowResult<()> {
    setup_terminal(&mut session.borrow_mut(), config).context("Failed to set up terminal")?;
    let mut terminal = Terminal::new(CrosstermBackend::new(SessionWriter(session.clone())))
        .context("Failed to create terminal")?;
    terminal.clear()?;
    run_event_loop(app, &mut terminal, session)
}

fn main() -> AnyhowResult<()> {
    let args = Args::parse();

    // Handle --dump-schema and --dump-config early (no terminal setup needed)
    if args.dump_schema {
        println!("{}", Config::json_schema()?);
        return Ok(());
    }
    let config = load_config(&args)?;
    if args.dump_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    let log_file = args
        .log_file
        .clone()
        .unwrap_or_else(tracing_setup::default_log_path);
    tracing_setup::init_global(&log_file)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;
    tracing::info!("menubar demo starting");

    let mut app = App::new(&config).context("Invalid configuration")?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        emergency_cleanup();
        original_hook(panic);
    }));

    let output = create_output().context("Failed to open terminal output")?;
    let session = RenderSession::begin(output)
        .context("Failed to switch the console into rendering mode")?;
    let session = Rc::new(RefCell::new(session));

    crossterm::terminal::enable_raw_mode().context("Failed to enable raw mode")?;
    let result = run_session(&mut app, &config, &session);
    let restored = restore_terminal(&mut session.borrow_mut(), &config, app.mouse_enabled());
    let _ = crossterm::terminal::disable_raw_mode();

    result?;
    restored.context("Failed to restore terminal")?;
    tracing::info!("menubar demo exiting");
    Ok(())
}
