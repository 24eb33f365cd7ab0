mod args;
mod config;
mod dispatch;
mod engine;
mod entry;
mod error;
mod logger;
mod report;
mod schedule;
mod verify;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
