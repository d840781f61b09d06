mod app;
mod event;
mod tui;
mod view;

use crate::app::{App, ServiceStatus};
use crate::event::EventHandler;
use crate::tui::Tui;
use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use pima_form::{FormController, FormTables, Predictor};
use prediction_client::{ClientConfig, PredictionClient};
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pima", about = "Diabetes risk prediction from patient measurements")]
struct Cli {
    /// Base URL of the prediction service (defaults to $PIMA_API_URL, then http://localhost:8000).
    #[arg(long)]
    api_url: Option<String>,

    /// Where to write the client log; the terminal itself is taken by the UI.
    #[arg(long, default_value = "pima-client.log")]
    log_file: PathBuf,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,

    /// Do not check whether the service is reachable at start-up.
    #[arg(long)]
    no_probe: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("cannot create log file {}", cli.log_file.display()))?;
    let _ = WriteLogger::init(level, Config::default(), log_file);

    let config = cli.api_url.map(ClientConfig::new).unwrap_or_else(ClientConfig::from_env);
    let client = PredictionClient::new(config).context("cannot build HTTP client")?;
    info!("prediction service at {}", client.config().base_url());

    let service = if cli.no_probe {
        ServiceStatus::Unknown
    } else {
        match client.probe() {
            Ok(banner) => ServiceStatus::Online(banner.message),
            Err(err) => {
                warn!("service probe failed: {err}");
                ServiceStatus::Offline
            }
        }
    };

    let mut app = App::new(FormController::new(FormTables::default()), client);
    app.state.service = service;

    let mut tui = Tui::new()?;
    let outcome = run(&mut app, &mut tui);

    // Restore the terminal on exit, even when the loop failed
    Tui::restore_terminal()?;
    outcome
}

fn run<P: Predictor>(app: &mut App<P>, tui: &mut Tui) -> Result<()> {
    let event_handler = EventHandler::new();

    while app.state.is_running {
        tui.draw(app)?;

        // a queued submission is sent right after the "analyzing" frame is on screen
        if app.has_pending() {
            app.process_pending();
            continue;
        }

        let action = event_handler.next()?;
        app.dispatch(action);
    }
    Ok(())
}
