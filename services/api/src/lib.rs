mod cli;
mod commands;
mod infra;
mod routes;
mod server;

use hdi90::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
