mod cli;
mod demo;
mod infra;
mod rank;

use scholarship_dss::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
