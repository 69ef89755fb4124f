mod cli;
mod demo;
mod infra;
mod quiz;
mod routes;
mod server;

use daat_compass::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
