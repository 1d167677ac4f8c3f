mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use keydash::{
    runtime::{spawn_session_clock, AppEvent, CrosstermEventSource, EventSource},
    session::{Phase, TypingSession, DEFAULT_DURATION_SECS},
    words::{HttpWordSource, WordList, WordSource},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    sync::mpsc::Sender,
};

/// terminal typing speed test
#[derive(Parser, Debug)]
#[clap(
    version,
    about,
    long_about = "A terminal typing speed test: random words are fetched from a word API, you type them one at a time against a 60 second countdown, and your accuracy is reported at the end."
)]
pub struct Cli {}

#[derive(Debug)]
pub struct App {
    pub session: TypingSession,
    pub words: WordList,
    /// Fetch-failure notice shown as a dismissable overlay before anything
    /// else; any key clears it.
    pub notice: Option<String>,
    /// Why the last start attempt was refused (empty word list).
    pub status: Option<String>,
}

impl App {
    pub fn new(words: WordList, notice: Option<String>) -> Self {
        Self {
            session: TypingSession::new(),
            words,
            notice,
            status: None,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let _cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    // The word list must be in hand before the first start can succeed, so
    // the one blocking fetch happens before the terminal turns interactive.
    // A failed fetch degrades to an empty list; the app stays up and the
    // failure is reported once the UI is drawn.
    let (words, notice) = match HttpWordSource::new().fetch() {
        Ok(words) => (words, None),
        Err(e) => (WordList::empty(), Some(e.to_string())),
    };

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(words, notice);
    let events = CrosstermEventSource::new();
    let clock_tx = events.sender();
    let result = run_app(&mut terminal, &mut app, &events, clock_tx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

fn run_app<B: Backend, E: EventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events: &E,
    clock_tx: Sender<AppEvent>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui(app, f))?;

        match events.recv()? {
            AppEvent::ClockTick(generation) => {
                app.session.on_clock_tick(generation);
            }
            AppEvent::Resize => {}
            AppEvent::Key(key) => {
                // The fetch-failure notice swallows exactly one key.
                if app.notice.take().is_some() {
                    continue;
                }
                if handle_key(app, key, &clock_tx) == Flow::Quit {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent, clock_tx: &Sender<AppEvent>) -> Flow {
    if key.code == KeyCode::Esc {
        return Flow::Quit;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Flow::Quit;
    }

    match app.session.phase() {
        // Start control enabled, input disabled.
        Phase::Idle | Phase::Finished => {
            if let KeyCode::Enter | KeyCode::Char('s') = key.code {
                start_session(app, clock_tx);
            }
        }
        // Input enabled, start control disabled.
        Phase::Running => match key.code {
            KeyCode::Enter => {
                if let Err(e) = app.session.submit(&app.words) {
                    app.status = Some(e.to_string());
                }
            }
            KeyCode::Backspace => app.session.backspace(),
            KeyCode::Char(c) => app.session.type_char(c),
            _ => {}
        },
    }

    Flow::Continue
}

fn start_session(app: &mut App, clock_tx: &Sender<AppEvent>) {
    match app.session.start(DEFAULT_DURATION_SECS, &app.words) {
        Ok(generation) => {
            app.status = None;
            spawn_session_clock(clock_tx.clone(), generation, DEFAULT_DURATION_SECS);
        }
        Err(e) => {
            app.status = Some(e.to_string());
        }
    }
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
