//! Operator confirmation gate.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::error::FunctionsResult;

/// Decides whether a costed request may proceed.
#[allow(async_fn_in_trait)]
pub trait Confirmation {
    /// Return `false` to abort before anything is sent on-chain.
    async fn confirm(&self, prompt: &str) -> FunctionsResult<bool>;
}

/// Approves every request. Used for `--yes` and automation.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirmation for AlwaysConfirm {
    async fn confirm(&self, prompt: &str) -> FunctionsResult<bool> {
        tracing::info!(prompt = %prompt, "Auto-confirmed");
        Ok(true)
    }
}

/// Asks on the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsolePrompt;

impl Confirmation for ConsolePrompt {
    async fn confirm(&self, prompt: &str) -> FunctionsResult<bool> {
        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(format!("{}\n\nContinue? Enter (y) Yes / (n) No\n", prompt).as_bytes())
            .await?;
        stdout.flush().await?;

        let mut line = String::new();
        BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
        Ok(is_yes(&line))
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
