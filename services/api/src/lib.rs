mod cli;
mod evaluate;
mod infra;
mod routes;
mod server;

use transfer_verifier::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
