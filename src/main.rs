use crossbeam_channel::{unbounded, Receiver};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use note_quiz::app::App;
use note_quiz::config::Config;
use note_quiz::db::open_db;
use note_quiz::trigger::{spawn_quiz_worker, TriggerOutcome};
use note_quiz::{logger, ui};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use std::time::{Duration, Instant};

const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> io::Result<()> {
    let config = Config::from_env();
    if let Err(e) = logger::init(&config.log_path()) {
        eprintln!("Could not open log file: {}", e);
    }
    logger::log(&format!("Starting with data dir {}", config.data_dir.display()));

    let conn = open_db(&config.db_path()).map_err(io::Error::other)?;

    let (outcome_tx, outcome_rx) = unbounded();
    let (trigger_tx, worker) = if config.auto_quiz {
        let (event_tx, event_rx) = unbounded();
        let handle = spawn_quiz_worker(config.db_path(), event_rx, outcome_tx)?;
        (Some(event_tx), Some(handle))
    } else {
        drop(outcome_tx);
        (None, None)
    };

    let mut app = App::new(conn, config, trigger_tx)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app, &outcome_rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Closing the event channel lets the worker finish queued notes and exit.
    app.trigger_tx = None;
    if let Some(handle) = worker
        && handle.join().is_err()
    {
        logger::log("Quiz worker panicked");
    }
    logger::log("Exiting");

    result
}

fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    outcomes: &Receiver<TriggerOutcome>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = app
            .next_timeout(Instant::now())
            .map_or(IDLE_POLL, |t| t.min(IDLE_POLL));
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key, Instant::now())?;
        }

        app.tick(Instant::now());
        while let Ok(outcome) = outcomes.try_recv() {
            app.apply_trigger_outcome(outcome);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
