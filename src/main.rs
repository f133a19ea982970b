//! gitea_release - create or update a Gitea release and sync its attachments.

use gitea_release::cli;
use gitea_release::cli::OutputManager;
use std::process;

#[tokio::main]
async fn main() {
    env_logger::init();

    match cli::run().await {
        Ok(exit_code) => {
            process::exit(exit_code);
        }
        Err(e) => {
            let output = OutputManager::new();
            output.error(&format!("Fatal error: {e}"));
            process::exit(1);
        }
    }
}
