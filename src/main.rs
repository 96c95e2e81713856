use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use pointrush::{
    app::App,
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    controller::Game,
    positions::RandomPositions,
    runtime::{event_channel, CrosstermEventSource, FixedTicker, GameEvent, Runner},
    timer::ThreadScheduler,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs::OpenOptions,
    io::{self, stdin},
    path::PathBuf,
    sync::Mutex,
    time::Duration,
};

/// click the numbered points in ascending order, as fast as you can
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal reflex game: enter how many points to play, then click them in ascending order before the clock runs away. One wrong click ends the round."
)]
pub struct Cli {
    /// number of points to prefill in the input box
    #[clap(short = 'n', long)]
    count: Option<u32>,

    /// seed for point placement, for reproducible boards
    #[clap(long)]
    seed: Option<u64>,

    /// path to an alternate config file
    #[clap(long)]
    config: Option<PathBuf>,

    /// write the effective config to the config path and exit
    #[clap(long)]
    write_config: bool,
}

impl Cli {
    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }

    /// CLI flags take precedence over the config file
    fn apply(&self, mut config: Config) -> Config {
        if self.count.is_some() {
            config.default_count = self.count;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config
    }
}

fn init_logging() -> Result<(), Box<dyn Error>> {
    // TUI apps can't log to stdout, so we write to a file
    let path = AppDirs::log_path().unwrap_or_else(|| PathBuf::from("pointrush.log"));
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let log_file = OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging()?;

    let store = cli.config_store();
    let config = cli.apply(store.load());

    if cli.write_config {
        store.save(&config)?;
        println!("{}", store.path().display());
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let result = start_tui(&mut terminal, &config);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, config: &Config) -> Result<(), Box<dyn Error>> {
    let (tx, rx) = event_channel();
    let game = Game::new(
        Box::new(ThreadScheduler::new(tx.clone())),
        Box::new(RandomPositions::new(config.seed)),
    );
    let mut app = App::new(game, Duration::from_millis(config.fade_ms));
    if let Some(count) = config.default_count {
        app = app.with_input(count.to_string());
    }

    let runner = Runner::new(
        CrosstermEventSource::new(tx, rx),
        FixedTicker::new(Duration::from_millis(config.frame_ms.max(1))),
    );
    tracing::info!(seed = ?config.seed, "starting");

    terminal.draw(|f| {
        app.set_viewport(f.area());
        f.render_widget(&app, f.area());
    })?;

    while !app.should_quit {
        let redraw = match runner.step() {
            GameEvent::Key(key) => {
                app.on_key(key);
                true
            }
            GameEvent::Mouse(mouse) => {
                app.on_mouse(mouse);
                true
            }
            GameEvent::Resize => true,
            GameEvent::Tick { generation } => app.on_tick(generation),
            GameEvent::Frame => {
                // Redraw once more after the last fade expires
                let animating = !app.fades.is_empty();
                app.on_frame(runner.frame_interval());
                animating
            }
        };

        if redraw {
            terminal.draw(|f| {
                app.set_viewport(f.area());
                f.render_widget(&app, f.area());
            })?;
        }
    }

    tracing::info!("exiting");
    Ok(())
}
