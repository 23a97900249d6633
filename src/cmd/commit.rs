use dialoguer::Confirm;
use log::info;

use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::workflow::commit::build_from_staged;

#[derive(Debug, Clone)]
pub struct CommitCommandArgs {
    /// Print the generated message without committing.
    pub dry_run: bool,
    /// Skip the confirmation prompt.
    pub assume_yes: bool,
}

pub async fn run(ctx: &AppContext, args: CommitCommandArgs) -> AppResult<()> {
    let record = build_from_staged(ctx).await?;
    let message = record.render();

    println!("{message}");

    if args.dry_run {
        info!("dry run: not committing");
        return Ok(());
    }

    if !args.assume_yes {
        let proceed = Confirm::new()
            .with_prompt("Commit with this message?")
            .default(true)
            .interact()
            .map_err(|err| AppError::Configuration(format!("confirmation prompt failed: {err}")))?;
        if !proceed {
            println!("Aborted; nothing committed.");
            return Ok(());
        }
    }

    ctx.version_control.commit(&record).await?;
    Ok(())
}
