mod cli;
mod demo;
mod menu;
mod prompt;

use card_applications::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
