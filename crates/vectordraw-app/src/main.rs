//! Main application entry point.
//!
//! Usage: `vectordraw [SESSION.json] [CONFIG.json]`

use std::path::PathBuf;
use vectordraw_app::{App, AppConfig, AppError, load_session};

fn run() -> Result<(), AppError> {
    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let session = args.next();
    let config = match args.next() {
        Some(path) => AppConfig::load(&path)?,
        None => AppConfig::default(),
    };

    let mut app = App::new(config)?;
    if let Some(path) = session {
        let events = load_session(&path)?;
        app.replay(&events)?;
    }

    let list = app.render()?;
    let json =
        serde_json::to_string_pretty(list).map_err(|e| AppError::Serialization(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Starting vectordraw");

    if let Err(e) = run() {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
