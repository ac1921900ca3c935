mod api;
mod az;
mod classifier;
mod cleaner;
mod cli;
mod config;
mod error;
mod executor;
mod image;
mod policies;
mod usage;
#[cfg(test)]
mod test;

use std::process::exit;
use clap::Parser;
use log::{error, warn};
use crate::cleaner::Cleaner;
use crate::cli::Args;
use crate::config::{Config, Credentials};

#[tokio::main]
async fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // invalid arguments exit with the usage exit code before anything else happens
    let args = Args::parse();

    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(err) => {
            error!("Missing credentials. Reason: {err}");
            exit(1)
        }
    };

    let config = match Config::parse(&args.config) {
        Ok(config) => config,
        Err(err) => {
            error!("Error whilst parsing static configuration file. Reason: {err}");
            exit(1)
        }
    };

    if args.cleanup_all {
        warn!("All images except the currently deployed ones will be deleted");
    }

    let cleaner = Cleaner::new(args, &config, credentials);
    if let Err(err) = cleaner.run().await {
        error!("Unable to clean up registry. Reason: {err}");
        exit(1)
    }
}
