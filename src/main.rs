//! Hotel reviews CLI entrypoint.

mod cli;

use std::io::{self, Write};
use std::process::ExitCode;

use hotel_reviews::{HotelReviewsConfig, OperationMode, ReviewError};
use ortho_config::OrthoConfig;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let _ignored = writeln!(io::stderr().lock(), "{error}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ReviewError> {
    let config = load_config()?;
    let mut stdout = io::stdout();

    match config.operation_mode() {
        OperationMode::MigrateDatabase => cli::migrations::run(&config, &mut stdout),
        OperationMode::Logout => cli::session::logout(&config, &mut stdout),
        OperationMode::Login => cli::session::login(&config, &mut stdout),
        OperationMode::DeleteReview => cli::reviews::delete(&config, &mut stdout).await,
        OperationMode::UpdateReview => cli::reviews::update(&config, &mut stdout).await,
        OperationMode::CreateReview => cli::reviews::create(&config, &mut stdout).await,
        OperationMode::ShowReview => cli::reviews::show(&config, &mut stdout).await,
        OperationMode::ListReviews => cli::reviews::list(&config, &mut stdout).await,
    }
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`ReviewError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<HotelReviewsConfig, ReviewError> {
    HotelReviewsConfig::load().map_err(|error| ReviewError::Configuration {
        message: error.to_string(),
    })
}
