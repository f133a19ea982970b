//! The publish command: build the client from configuration and run the
//! publisher, reporting progress to the terminal.

use crate::api::GiteaClient;
use crate::cli::{Args, OutputManager};
use crate::config::PublishConfig;
use crate::error::Result;
use crate::publish::Publisher;

/// Publish the release described by `args`
pub(super) async fn execute_publish(args: &Args, output: &OutputManager) -> Result<()> {
    let config = PublishConfig::from_args(args)?;
    let client = GiteaClient::new(&config.server_url, config.token.clone())?;

    let _ = output.info(&format!(
        "Publishing {} to {} ({})",
        config.release.tag_name,
        config.repo,
        client.base_url()
    ));

    let outcome = Publisher::new(&client).run(&config).await?;

    if config.patterns.is_empty() {
        let _ = output.warn("No file patterns given, nothing to upload");
    } else if outcome.artifacts == 0 {
        let _ = output.warn(&format!(
            "{} did not match any file",
            config.patterns.join(", ")
        ));
    }
    for name in &outcome.report.deleted {
        let _ = output.indent(&format!("✓ Deleted old attachment {}", name));
    }
    for name in &outcome.report.uploaded {
        let _ = output.indent(&format!("✓ Uploaded {}", name));
    }

    let _ = output.success(&format!("🎉 Release ready at {}", outcome.release.html_url));
    Ok(())
}
