mod app;
mod config;
mod handlers;
mod types;
mod ui;

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::{io, time::Duration};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use smartlex_adapters::{ChannelToast, DesktopNotifier, GeminiAnalyzer, JsonFileStore};
use smartlex_core::{AnalysisOrchestrator, AppContext};

use app::App;
use handlers::InputHandler;
use ui::UI;

const POLL_INTERVAL_MS: u64 = 50;

#[tokio::main]
async fn main() -> Result<()> {
    config::load_dotenv();
    let settings = match config::Settings::load() {
        Ok(settings) => settings,
        Err(_) => {
            eprintln!("Error: GEMINI_API_KEY environment variable not set");
            eprintln!("Please run: export GEMINI_API_KEY=your_key_here");
            return Ok(());
        }
    };
    init_tracing()?;

    let context = AppContext::new();
    let (toast_port, toast_rx) = ChannelToast::new(32);
    let analyzer = GeminiAnalyzer::new(gemini::Client::new(
        settings.api_key.clone(),
        settings.model.clone(),
    )?);
    let orchestrator = Arc::new(AnalysisOrchestrator::new(
        analyzer,
        DesktopNotifier,
        toast_port,
        JsonFileStore::new(&settings.data_dir),
        context.clone(),
    ));
    orchestrator.restore().await;

    let mut terminal = setup_terminal()?;
    let mut app = App::new(context, orchestrator, toast_rx, settings.model);
    let result = run_application(&mut terminal, &mut app).await;
    restore_terminal(&mut terminal)?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn init_tracing() -> Result<()> {
    let logs_dir = PathBuf::from("logs");
    fs::create_dir_all(&logs_dir)?;
    let log_file = logs_dir.join(format!(
        "smartlex_{}.log",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    ));
    let file = fs::File::create(log_file)?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,smartlex_core=debug".into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(file))
                .with_ansi(false),
        )
        .init();
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_application<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.poll_toasts();
        terminal.draw(|frame| UI::draw(frame, app))?;
        if should_quit(app)? {
            break;
        }
    }
    Ok(())
}

fn should_quit(app: &mut App) -> Result<bool> {
    if event::poll(Duration::from_millis(POLL_INTERVAL_MS))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(InputHandler::handle_key(app, key));
            }
        }
    }
    Ok(false)
}
