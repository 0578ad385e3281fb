//! Pending-operation sync commands.

use clap::Subcommand;
use menuplan_core::SyncEngine;

use super::common::AppContext;

#[derive(Subcommand)]
pub enum SyncAction {
    /// Replay the whole pending queue against the backend
    Run,
    /// Show queued operations without replaying them
    Status,
    /// Retry a single pending operation by ID
    Retry {
        /// Operation ID
        id: String,
    },
}

pub async fn run(ctx: &AppContext, action: SyncAction) -> Result<(), Box<dyn std::error::Error>> {
    let engine = SyncEngine::new(ctx.api.clone(), ctx.store.clone());

    match action {
        SyncAction::Run => {
            if ctx.monitor.is_offline() {
                return Err("backend unreachable, not syncing".into());
            }
            let summary = engine.sync_all().await;
            println!("{}", summary.describe());
            for result in &summary.results {
                match &result.error {
                    None => println!("  ok   {}", result.operation_id),
                    Some(error) => println!("  fail {}: {error}", result.operation_id),
                }
            }
        }
        SyncAction::Status => {
            let pending = engine.pending();
            for op in &pending {
                println!(
                    "{}  {}  queued {}",
                    op.id,
                    op.mutation.describe(),
                    op.timestamp.format("%Y-%m-%d %H:%M:%S")
                );
            }
            println!("{} pending operation(s)", pending.len());
        }
        SyncAction::Retry { id } => match engine.sync_one(&id).await {
            Some(result) if result.success => println!("Replayed: {id}"),
            Some(result) => {
                let reason = result.error.unwrap_or_else(|| "unknown error".to_string());
                return Err(format!("replay failed: {reason}").into());
            }
            None => return Err(format!("unknown operation: {id}").into()),
        },
    }
    Ok(())
}
