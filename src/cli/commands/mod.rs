//! Command execution.
//!
//! Runs the publish command and turns failures into a printed error, recovery
//! suggestions and a non-zero exit code.

mod publish;

use crate::cli::{Args, OutputManager};
use crate::error::Result;

use publish::execute_publish;

/// Execute the command described by `args`
pub async fn execute_command(args: Args) -> Result<i32> {
    let output = OutputManager::new();

    match execute_publish(&args, &output).await {
        Ok(()) => Ok(0),
        Err(e) => {
            output.error(&format!("Publish failed: {}", e));

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() {
                let _ = output.println("\n💡 Recovery suggestions:");
                for suggestion in suggestions {
                    let _ = output.println(&format!("  • {}", suggestion));
                }
            }

            Ok(1)
        }
    }
}
