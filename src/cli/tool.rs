use crate::bridge::{ToolBridge, ToolCall};
use crate::cli::ToolArgs;
use crate::config::Config;
use crate::review::ReviewOrchestrator;
use anyhow::Context;
use tokio::io::AsyncReadExt;

pub async fn execute(args: ToolArgs) -> anyhow::Result<()> {
    let config = Config::load_or_default(args.config.as_deref())?;
    config.validate()?;

    let mut raw = String::new();
    tokio::io::stdin()
        .read_to_string(&mut raw)
        .await
        .context("Failed to read tool call from stdin")?;
    let call: ToolCall = serde_json::from_str(&raw).context("Malformed tool call")?;

    let orchestrator = ReviewOrchestrator::new(&config, args.config.as_deref())
        .context("Failed to locate worker executable")?;
    let bridge = ToolBridge::new(orchestrator, config.default_aspects.clone());

    let result = bridge.handle(call).await;
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
