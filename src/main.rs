//! Terminal dashboard binary.

use std::env;
use std::time::{Duration, Instant};

use config::Config;
use crossterm::event::{Event, KeyEventKind};
use dotenvy::dotenv;

use coders_crm::models::config::DashboardConfig;
use coders_crm::repository::RestRepository;
use coders_crm::ui::app::{App, Effect};
use coders_crm::ui::render;

const TICK_INTERVAL: Duration = Duration::from_millis(100);

fn load_config() -> Option<DashboardConfig> {
    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        .add_source(config::File::with_name("config/default").required(false))
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(config::Environment::default())
        .build();

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("Error loading settings: {err}");
            return None;
        }
    };

    match settings.try_deserialize::<DashboardConfig>() {
        Ok(config) => Some(config),
        Err(err) => {
            eprintln!("Error loading dashboard config: {err}");
            None
        }
    }
}

/// The terminal owns the screen, so the log goes to a file instead.
fn init_logging(log_file: &str) -> std::io::Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::io::Result<()> {
    dotenv().ok(); // Load .env file

    let Some(config) = load_config() else {
        std::process::exit(1);
    };
    init_logging(&config.log_file)?;

    // Configuration retrieval failing leaves the app without a data client;
    // it still starts, shows the connection notice and renders every view
    // in its error state.
    let repo = match RestRepository::connect(&config.proxy_url).await {
        Ok(repo) => Some(repo),
        Err(err) => {
            log::error!("Failed to initialize the data client: {err}");
            None
        }
    };

    let mut terminal = ratatui::init();
    let mut app = App::new(repo);

    let effect = app.start();
    terminal.draw(|frame| render::draw(frame, &app))?;
    app.perform(effect).await;

    while !app.should_quit {
        terminal.draw(|frame| render::draw(frame, &app))?;

        if crossterm::event::poll(TICK_INTERVAL)? {
            if let Event::Key(key) = crossterm::event::read()? {
                if key.kind == KeyEventKind::Press {
                    let effect = app.on_key(key);
                    if effect != Effect::None {
                        // Show the intermediate frame (loading placeholder,
                        // busy submit control) before awaiting the work.
                        terminal.draw(|frame| render::draw(frame, &app))?;
                    }
                    app.perform(effect).await;
                }
            }
        }

        app.tick(Instant::now());
    }

    ratatui::restore();
    Ok(())
}
