use std::process::ExitCode;

use anyhow::Context;
use dream_account_config::StaticSettings;
use dream_account_core::contracts::SettingsProvider;
use dream_account_core::model::{Credentials, OperationResult};
use dream_account_core::{
    AccountOperation, AccountSession, OperationEvent, PingOperation,
};
use tracing::{info, warn};

use crate::cli::CredentialArgs;

fn credentials(args: CredentialArgs) -> Credentials {
    Credentials::new(args.name, args.password)
}

fn exit_code(succeeded: bool) -> ExitCode {
    if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn report(result: &OperationResult) -> anyhow::Result<()> {
    let rendered =
        serde_json::to_string_pretty(result).context("failed to render result")?;
    println!("{rendered}");
    Ok(())
}

async fn settle(mut operation: AccountOperation) -> anyhow::Result<bool> {
    let completion = operation.completion();
    operation.activate();
    let event = completion
        .await
        .context("operation finished without an outcome")?;
    let succeeded = event.is_succeeded();
    let result = event.into_inner();
    if !succeeded {
        warn!(operation = %result.kind(), error = %result.error(), "{}", result.error().description());
    }
    report(&result)?;
    Ok(succeeded)
}

pub async fn register(
    session: &AccountSession,
    args: CredentialArgs,
) -> anyhow::Result<ExitCode> {
    let operation = AccountOperation::register(&session.downgrade(), credentials(args));
    Ok(exit_code(settle(operation).await?))
}

pub async fn login(
    session: &AccountSession,
    args: CredentialArgs,
    authenticate: bool,
) -> anyhow::Result<ExitCode> {
    let weak = session.downgrade();
    if !settle(AccountOperation::login(&weak, credentials(args))).await? {
        return Ok(ExitCode::FAILURE);
    }
    if authenticate {
        info!("validating issued token");
        return Ok(exit_code(settle(AccountOperation::authenticate(&weak)).await?));
    }
    Ok(ExitCode::SUCCESS)
}

pub async fn ping(
    session: &AccountSession,
    settings: &StaticSettings,
    url: Option<String>,
) -> anyhow::Result<ExitCode> {
    let url = match url {
        Some(url) => url,
        None => settings
            .settings()
            .map(|settings| settings.base_url().to_string())
            .context("no URL to ping; pass --url or configure a base URL")?,
    };

    let mut operation = PingOperation::for_session(session, url.clone());
    let completion = operation.completion();
    operation.activate();

    match completion.await {
        Some(OperationEvent::Succeeded(elapsed_ms)) => {
            println!("{url} reachable in {elapsed_ms:.1} ms");
            Ok(ExitCode::SUCCESS)
        }
        Some(OperationEvent::Failed(_)) | None => {
            println!("{url} unreachable");
            Ok(ExitCode::FAILURE)
        }
    }
}
