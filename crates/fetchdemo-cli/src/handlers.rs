//! Command handlers.

use std::path::Path;

use anyhow::{Context as _, Result};
use fetchdemo_callbacks::continuation::await_login_flow;
use fetchdemo_callbacks::steps::{await_nested_steps, run_sequential_steps};
use fetchdemo_callbacks::{Journal, StageScript, linear};
use fetchdemo_core::DemoConfig;
use fetchdemo_core::config::{ENV_BASE_URL, ENV_DELAY_MS, ENV_LENIENT};
use fetchdemo_http::{FixtureClient, Page, run};
use serde_json::to_string_pretty;
use tracing::info;

/// Credentials used by the simulated login.
const DEMO_USERNAME: &str = "alice";
const DEMO_PASSWORD: &str = "password123";

/// Writes demo output to stdout; diagnostics go through `tracing` on stderr.
#[allow(clippy::print_stdout, reason = "Demo output")]
fn emit(text: &str) {
    println!("{text}");
}

/// Runs the HTTP demo and prints the rendered page and created resources.
pub async fn handle_http(mut config: DemoConfig, base_url: Option<String>, lenient: bool) -> Result<()> {
    if let Some(base_url) = base_url {
        config.api.base_url = base_url;
    }
    config.api.lenient |= lenient;
    config.validate()?;

    let client = FixtureClient::from_config(&config.api);
    let mut page = Page::default();
    let report = run(&client, &mut page)
        .await
        .with_context(|| format!("HTTP demo against {} failed", config.api.base_url))?;

    emit(&page.to_html());
    emit(&to_string_pretty(&report.post)?);
    emit(&to_string_pretty(&report.user)?);
    Ok(())
}

/// Runs the step demo and the login flow, then prints the journal.
pub async fn handle_callbacks(mut config: DemoConfig, delay_ms: Option<u64>, linear: bool) -> Result<()> {
    if let Some(delay_ms) = delay_ms {
        config.chain.stage_delay_ms = delay_ms;
        config.chain.step_delay_ms = delay_ms;
    }
    let journal = Journal::new();
    let script = StageScript::all_succeed();

    let summary = if linear {
        info!("Running linear flow");
        run_sequential_steps(config.chain.step_delay(), &journal).await;
        linear::run_login_flow(
            DEMO_USERNAME,
            DEMO_PASSWORD,
            config.chain.stage_delay(),
            &script,
            &journal,
        )
        .await?
    } else {
        info!("Running nested continuations");
        await_nested_steps(config.chain.step_delay(), journal.clone()).await?;
        await_login_flow(
            DEMO_USERNAME,
            DEMO_PASSWORD,
            config.chain.stage_delay(),
            script,
            journal.clone(),
        )
        .await?
    };

    for message in journal.messages() {
        emit(&message);
    }
    info!(
        posts = summary.posts.len(),
        elapsed_ms = journal.elapsed().as_millis(),
        "Callback demo finished"
    );
    Ok(())
}

/// Prints the effective configuration as TOML.
pub fn handle_config(config: &DemoConfig, path: Option<&Path>, full: bool) -> Result<()> {
    if full {
        let source = path.map_or_else(|| "defaults".to_owned(), |path| path.display().to_string());
        emit(&format!("# Loaded from: {source}"));
        emit(&format!("# Environment overrides: {ENV_BASE_URL}, {ENV_LENIENT}, {ENV_DELAY_MS}"));
    }
    emit(&config.to_toml()?);
    Ok(())
}
