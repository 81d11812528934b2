use crate::cli::WorkerArgs;
use crate::config::Config;
use crate::generator::create_generator;
use crate::worker::{review_aspect, PromptTemplate};
use anyhow::Context;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::debug;

pub async fn execute(args: WorkerArgs) -> anyhow::Result<()> {
    let config = Config::load_or_default(args.config.as_deref())?;
    let template = PromptTemplate::resolve(&config, &args.aspect)?;

    let mut code = String::new();
    tokio::io::stdin()
        .read_to_string(&mut code)
        .await
        .context("Failed to read code from stdin")?;

    debug!(
        "Worker {} read {} bytes, generating with {}",
        args.aspect,
        code.len(),
        config.generator.provider
    );
    let generator = create_generator(&config.generator);
    let record = review_aspect(&template, generator.as_ref(), &code)
        .await
        .with_context(|| format!("{} review failed", args.aspect))?;

    let mut line = record.to_line()?;
    line.push('\n');

    let mut stdout = tokio::io::stdout();
    stdout.write_all(line.as_bytes()).await?;
    stdout.flush().await?;

    Ok(())
}
