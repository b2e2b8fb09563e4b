use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use reqwest::Client;
use std::{
    io,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::{mpsc, Mutex};

use deskchat::api;
use deskchat::app::{App, AppScreen};
use deskchat::chat_view;
use deskchat::config::{get_config, initialize_config};
use deskchat::key_handlers::{handle_chat_input, handle_quit_confirm_input};
use deskchat::logging::init_logging;
use deskchat::quit_confirm;

enum Event {
    Input(CEvent),
    Tick,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    initialize_config()?;
    let config = get_config();
    let _logger = init_logging(&config.log_level)?;
    log::info!("deskchat starting, endpoint {}", config.endpoint);

    let client = api::build_client()?;
    let app = Arc::new(Mutex::new(App::new(config.endpoint)));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, client).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    log::info!("deskchat exiting");
    res
}

/// Main loop of the application.
async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: Arc<Mutex<App>>,
    client: Client,
) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<Event>(100);

    // Crossterm polling blocks, so it lives on its own thread.
    tokio::task::spawn_blocking(move || {
        let mut last_tick = Instant::now();
        loop {
            if matches!(event::poll(Duration::from_millis(100)), Ok(true)) {
                if let Ok(ev) = event::read() {
                    if tx.blocking_send(Event::Input(ev)).is_err() {
                        return;
                    }
                }
            }
            if last_tick.elapsed() >= Duration::from_millis(250) {
                if tx.blocking_send(Event::Tick).is_err() {
                    return;
                }
                last_tick = Instant::now();
            }
        }
    });

    loop {
        {
            let mut guard = app.lock().await;
            guard.status_indicator.update_spinner();
            terminal.draw(|f| match guard.screen {
                AppScreen::QuitConfirm => {
                    let area = f.area();
                    quit_confirm::draw_quit_confirm(f, area);
                }
                _ => chat_view::draw_chat(f, &mut guard),
            })?;
            if guard.screen == AppScreen::Quit {
                break;
            }
        }

        match rx.recv().await {
            Some(Event::Input(CEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                let screen = { app.lock().await.screen };
                match screen {
                    AppScreen::Chat => handle_chat_input(key, &app, &client).await,
                    AppScreen::QuitConfirm => handle_quit_confirm_input(key, &app).await,
                    AppScreen::Quit => break,
                }
            }
            Some(Event::Input(_)) | Some(Event::Tick) => {}
            None => break,
        }
    }

    Ok(())
}
