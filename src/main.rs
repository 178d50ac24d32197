use std::process;

use clap::Parser;

use payout_queue_config::cli::{self, CliArgs, Outcome};

fn main() {
    env_logger::init();

    let args = CliArgs::parse();
    log::debug!("arguments: {:?}", args);

    match cli::run(args) {
        Ok(Outcome::Done) => {}
        // drift is not an error, but callers need to tell it apart from a clean run
        Ok(Outcome::Drift) => process::exit(2),
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
