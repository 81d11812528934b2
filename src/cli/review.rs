use crate::cli::{OutputFormat, ReviewArgs};
use crate::config::Config;
use crate::output::{render_json, render_markdown};
use crate::review::ReviewOrchestrator;
use anyhow::Context;
use tokio::io::AsyncReadExt;
use tracing::{error, info};

pub async fn execute(args: ReviewArgs) -> anyhow::Result<()> {
    if let Some(path) = &args.config {
        info!("Loading config from {:?}", path);
    }
    let mut config = Config::load_or_default(args.config.as_deref())?;

    // Apply CLI overrides
    if let Some(timeout_sec) = args.timeout_sec {
        config.worker.timeout_sec = Some(timeout_sec);
    }
    if let Some(concurrency) = args.concurrency {
        config.concurrency = Some(concurrency);
    }

    config.validate()?;

    let code = match &args.file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut code = String::new();
            tokio::io::stdin()
                .read_to_string(&mut code)
                .await
                .context("Failed to read code from stdin")?;
            code
        }
    };

    let aspects = args
        .aspects
        .clone()
        .unwrap_or_else(|| config.default_aspects.clone());

    let orchestrator = ReviewOrchestrator::new(&config, args.config.as_deref())
        .context("Failed to locate worker executable")?;
    let report = orchestrator.run_all(&code, &aspects).await?;

    match args.format {
        OutputFormat::Markdown => print!("{}", render_markdown(&report.outcomes)),
        OutputFormat::Json => println!("{}", render_json(&report)?),
    }

    let failed = report.error_count();
    info!(
        "Completed in {:.1}s: {} of {} aspects failed",
        report.duration.as_secs_f64(),
        failed,
        report.outcomes.len()
    );

    if args.fail_on_error && failed > 0 {
        error!("Exiting with error: {} aspects failed", failed);
        std::process::exit(1);
    }

    Ok(())
}
