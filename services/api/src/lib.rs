mod cli;
mod infra;
mod routes;
mod server;

use care_licensing::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
