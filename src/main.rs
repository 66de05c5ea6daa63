//! benefit-transfer - headless transfer screen
//!
//! ```text
//! benefit-transfer [--env dev] --origin 1 --destination 7 --amount 40.00
//! benefit-transfer [--env dev] --list
//! ```
//!
//! Resolves the origin through the directory (there is no previous screen
//! to hand it over), fills the form, submits once and reports the outcome
//! through the log.

use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, bail};
use rust_decimal::Decimal;
use tracing::{error, info};

use benefit_transfer::config::AppConfig;
use benefit_transfer::directory::HttpBenefitDirectory;
use benefit_transfer::transfer::{SubmitOutcome, TracingHost, TransferWorkflow, WorkflowState};

fn get_arg(names: &[&str]) -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    args.iter()
        .position(|a| names.contains(&a.as_str()))
        .and_then(|i| args.get(i + 1).cloned())
}

fn has_flag(name: &str) -> bool {
    std::env::args().any(|a| a == name)
}

fn get_env() -> String {
    get_arg(&["--env", "-e"]).unwrap_or_else(|| "dev".to_string())
}

/// Parse an optional numeric flag; an absent flag is `None`, a malformed one is an error
fn parse_arg<T>(name: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    get_arg(&[name])
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("invalid value for {}: {:?}", name, raw))
        })
        .transpose()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let config = AppConfig::load(&env).with_context(|| format!("loading {} config", env))?;
    let _log_guard = benefit_transfer::logging::init_logging(&config.log);

    info!(
        "Starting benefit-transfer {} ({}) in {} mode",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env
    );

    let directory = Arc::new(HttpBenefitDirectory::new(config.directory.clone())?);

    if has_flag("--list") {
        for benefit in directory.list_active().await? {
            info!(
                id = ?benefit.id,
                name = %benefit.name,
                value = %benefit.value,
                "active benefit"
            );
        }
        return Ok(());
    }

    let Some(origin_id) = parse_arg::<i64>("--origin")? else {
        bail!("--origin is required");
    };
    let destination = parse_arg::<i64>("--destination")?;
    let amount = parse_arg::<Decimal>("--amount")?;

    let location = format!("/{}/{}/transfer", config.workflow.listing_segment, origin_id);
    let workflow = TransferWorkflow::open(
        directory,
        Arc::new(TracingHost),
        config.workflow.clone(),
        None,
        &location,
    )
    .await;

    if let WorkflowState::Failed(e) = workflow.state() {
        bail!("origin {} could not be resolved: {}", origin_id, e);
    }

    workflow.set_destination(destination);
    workflow.set_amount(amount);

    match workflow.submit().await {
        SubmitOutcome::Succeeded => {
            info!(workflow_id = %workflow.id(), "Done");
            Ok(())
        }
        SubmitOutcome::Rejected(e) => {
            error!(code = e.code(), "Transfer blocked: {}", e);
            bail!("transfer blocked: {}", e)
        }
        SubmitOutcome::Failed(e) => {
            error!(code = e.code(), "Transfer failed: {}", e);
            bail!("transfer failed: {}", e)
        }
        SubmitOutcome::Ignored => bail!("workflow was not ready to submit"),
    }
}
