use ut_config::UndertakerConfig;

use crate::cli::{Commands, GlobalFlags};

pub mod inactive;
pub mod reassign;
pub mod scan_bugs;
pub mod send_mail;
pub mod shared;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    config: &UndertakerConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Inactive(args) => inactive::handle(&args, config, flags).await,
        Commands::Reassign(args) => reassign::handle(&args, config, flags),
        Commands::ScanBugs(args) => scan_bugs::handle(&args, config, flags).await,
        Commands::SendMail(args) => send_mail::handle(&args, config, flags).await,
    }
}
