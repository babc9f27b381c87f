use champcalc::{
    app::{message_for_key, App, Report},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    points::Position,
    runtime::{AppEvent, CrosstermEventSource, EventSource, Runner},
};
use clap::{error::ErrorKind, ArgAction, CommandFactory, Parser};
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
};

/// worst finishing position that still clinches a three-way title fight
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Pick where each rival finishes the final race and see the worst position the championship leader can take while still finishing strictly ahead of both. Ties count as not guaranteed."
)]
pub struct Cli {
    /// name of the championship leader
    #[clap(long)]
    subject: Option<String>,

    /// name of the first rival
    #[clap(long)]
    rival_a: Option<String>,

    /// name of the second rival
    #[clap(long)]
    rival_b: Option<String>,

    /// points the first rival trails the leader by
    #[clap(long)]
    gap_a: Option<u32>,

    /// points the second rival trails the leader by
    #[clap(long)]
    gap_b: Option<u32>,

    /// finishing position of the first rival (1-11, P1-P10 or dnf)
    #[clap(short = 'a', long)]
    pos_a: Option<Position>,

    /// finishing position of the second rival (1-11, P1-P10 or dnf)
    #[clap(short = 'b', long)]
    pos_b: Option<Position>,

    /// print the result and exit instead of starting the tui
    #[clap(long)]
    print: bool,

    /// config file to use instead of the default location
    #[clap(long)]
    config: Option<PathBuf>,

    /// persist the effective names and gaps to the config file
    #[clap(long)]
    save_config: bool,

    /// more log output (-v info, -vv debug, -vvv trace)
    #[clap(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Command line values win over the config file.
    fn apply(&self, mut config: Config) -> Config {
        if let Some(subject) = &self.subject {
            config.subject = subject.clone();
        }
        if let Some(rival_a) = &self.rival_a {
            config.rival_a = rival_a.clone();
        }
        if let Some(rival_b) = &self.rival_b {
            config.rival_b = rival_b.clone();
        }
        if let Some(gap) = self.gap_a {
            config.gap_to_rival_a = gap;
        }
        if let Some(gap) = self.gap_b {
            config.gap_to_rival_b = gap;
        }
        config
    }

    fn store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let level = logging::level_for_verbosity(cli.verbose);
    if cli.print {
        logging::init_stderr(level)?;
    } else {
        let log_path = AppDirs::log_path().unwrap_or_else(|| PathBuf::from("champcalc.log"));
        // the calculator still works without a log file
        if let Err(err) = logging::init_file(&log_path, level) {
            eprintln!("warning: {err}; continuing without logging");
        }
    }
    tracing::debug!(?cli, "parsed command line");

    let store = cli.store();
    let config = cli.apply(store.load());
    if cli.save_config {
        store.save(&config)?;
    }

    let app = App::new(config).with_selections(cli.pos_a, cli.pos_b);

    if cli.print {
        let report = Report::for_selection(&app.selection, &app.config);
        println!("{}", report.text(&app.config));
        if report == Report::MissingSelection {
            std::process::exit(2);
        }
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty (use --print for one-shot mode)")
            .exit();
    }

    enable_raw_mode()?;
    let mut app = app;
    let result = run_interactive(&mut app);
    // restore even when setup or the loop failed
    let restored = restore_terminal();

    result?;
    restored
}

fn run_interactive(app: &mut App) -> Result<(), Box<dyn Error>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(CrosstermEventSource::new());
    start_tui(&mut terminal, app, &runner)
}

fn restore_terminal() -> Result<(), Box<dyn Error>> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, Show)?;
    Ok(())
}

fn start_tui<B: Backend, E: EventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    while !app.should_quit {
        match runner.step() {
            None => break,
            Some(AppEvent::Resize) => {}
            Some(AppEvent::Key(key)) => {
                if let Some(msg) = message_for_key(key, app.focus) {
                    app.update(msg);
                }
            }
        }
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;
    }

    tracing::info!("quit");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use champcalc::{runtime::TestEventSource, selection::Rival};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use std::sync::mpsc;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["champcalc"]);

        assert_eq!(cli.subject, None);
        assert_eq!(cli.gap_a, None);
        assert_eq!(cli.pos_a, None);
        assert_eq!(cli.pos_b, None);
        assert!(!cli.print);
        assert!(!cli.save_config);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_cli_positions() {
        let cli = Cli::parse_from(["champcalc", "-a", "1", "--pos-b", "P2"]);
        assert_eq!(cli.pos_a, Position::new(1));
        assert_eq!(cli.pos_b, Position::new(2));

        let cli = Cli::parse_from(["champcalc", "-a", "dnf"]);
        assert_eq!(cli.pos_a, Some(Position::NO_POINTS));
    }

    #[test]
    fn test_cli_rejects_bad_position() {
        assert!(Cli::try_parse_from(["champcalc", "-a", "12"]).is_err());
        assert!(Cli::try_parse_from(["champcalc", "-b", "P0"]).is_err());
    }

    #[test]
    fn test_cli_verbosity_counts() {
        let cli = Cli::parse_from(["champcalc", "-vv"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from([
            "champcalc",
            "--subject",
            "Charles",
            "--rival-b",
            "Lewis",
            "--gap-a",
            "5",
        ]);
        let config = cli.apply(Config::default());
        assert_eq!(config.subject, "Charles");
        assert_eq!(config.rival_a, "Max");
        assert_eq!(config.rival_b, "Lewis");
        assert_eq!(config.gap_to_rival_a, 5);
        assert_eq!(config.gap_to_rival_b, 16);
    }

    #[test]
    fn test_cli_store_uses_explicit_path() {
        let cli = Cli::parse_from(["champcalc", "--config", "/tmp/champcalc-test.json"]);
        assert_eq!(
            cli.store().path(),
            std::path::Path::new("/tmp/champcalc-test.json")
        );
    }

    #[test]
    fn test_start_tui_quits_on_escape() {
        let (tx, rx) = mpsc::channel();
        for code in [KeyCode::Char('1'), KeyCode::Right, KeyCode::Char('2'), KeyCode::Char('c')] {
            tx.send(AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)))
                .unwrap();
        }
        tx.send(AppEvent::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)))
            .unwrap();

        let runner = Runner::new(TestEventSource::new(rx));
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let mut app = App::new(Config::default());

        start_tui(&mut terminal, &mut app, &runner).unwrap();

        assert!(app.should_quit);
        assert_eq!(app.selection.get(Rival::A), Position::new(1));
        assert_eq!(app.selection.get(Rival::B), Position::new(2));
        assert!(matches!(app.report, Some(Report::Computed(_))));
    }

    #[test]
    fn test_start_tui_returns_when_input_ends() {
        let (tx, rx) = mpsc::channel();
        tx.send(AppEvent::Key(KeyEvent::new(KeyCode::Char('4'), KeyModifiers::NONE)))
            .unwrap();
        tx.send(AppEvent::Resize).unwrap();
        drop(tx);

        let runner = Runner::new(TestEventSource::new(rx));
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let mut app = App::new(Config::default());

        start_tui(&mut terminal, &mut app, &runner).unwrap();

        assert!(!app.should_quit);
        assert_eq!(app.selection.get(Rival::A), Position::new(4));
    }
}
