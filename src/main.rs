use clap::Parser;
use git_steward::commands::execute_scan;
use git_steward::core::{config::Conf, print_error, print_success, Result};
use std::env;

#[derive(Parser)]
#[command(name = "git-steward")]
#[command(about = "Fleet housekeeping for large collections of git checkouts")]
#[command(version = "0.1.0")]
struct Cli {
    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let conf = match Conf::load() {
        Ok(conf) => conf,
        Err(e) => {
            print_error(&e.to_string());
            std::process::exit(1);
        }
    };

    match execute_scan(&conf).await {
        Ok(summary) => {
            print_success(&format!(
                "Scanned {}: {} tracked ({} refreshed), {} skipped",
                conf.path.display(),
                summary.tracked,
                summary.refreshed,
                summary.skipped
            ));
        }
        Err(e) => {
            print_error(&e.to_string());
            std::process::exit(1);
        }
    }

    Ok(())
}
