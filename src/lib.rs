pub mod application;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infrastructure;

use std::fs::{self, OpenOptions};
use std::io::{self, Write};

use uuid::Uuid;

use application::draft_service::{DraftCommand, DraftSession};
use domain::ports::OrderSubmitter;
use domain::user::User;
use infrastructure::outbox::JsonLinesOutbox;

pub use config::AppConfig;
pub use errors::AppError;

/// Replay a JSON array of draft commands for `user` and submit the result.
pub fn run_script<S: OrderSubmitter>(
    user: &User,
    script: &str,
    submitter: S,
) -> Result<Uuid, AppError> {
    let commands: Vec<DraftCommand> = serde_json::from_str(script)?;
    log::info!("Replaying {} draft commands for '{}'", commands.len(), user.name);

    let mut session = DraftSession::new(user, submitter);
    session.apply_all(commands)?;
    Ok(session.submit()?)
}

/// Run the configured script, appending the outbox event to the configured
/// sink.
pub fn run(config: &AppConfig) -> Result<Uuid, AppError> {
    let script = fs::read_to_string(&config.script_path)?;
    let user = User::new(config.customer.clone());

    let sink: Box<dyn Write + Send> = match &config.outbox_path {
        Some(path) => Box::new(OpenOptions::new().create(true).append(true).open(path)?),
        None => Box::new(io::stdout()),
    };

    run_script(&user, &script, JsonLinesOutbox::new(sink))
}
