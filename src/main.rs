mod cli;

use cli::{Args, Command};
use dvm::adapters::outbound::console::StderrProgressReporter;
use dvm::adapters::outbound::filesystem::{FileSystemCache, StdoutPresenter};
use dvm::adapters::outbound::network::{CachingReleaseRepository, DotnetReleaseClient};
use dvm::adapters::outbound::process::ProcessSdkRunner;
use dvm::application::factories::{FormatterFactory, InstallerFactory};
use dvm::application::use_cases::ManageSdksUseCase;
use dvm::config::AppConfig;
use dvm::logging;
use dvm::ports::outbound::{LocalSdkRunner, OutputPresenter, ReleaseRepository};
use dvm::shared::error::{exit_code_for, DvmError};
use dvm::shared::Result;
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Parse command-line arguments (clap exits with code 2 on invalid input)
    let args = Args::parse_args();

    if let Err(e) = logging::init(args.verbose) {
        eprintln!("⚠️  Warning: {}", e);
    }

    if let Err(e) = run(args).await {
        report_error(&e);
        process::exit(exit_code_for(&e).as_i32());
    }
}

/// User errors get a single message; anything else shows its cause chain
fn report_error(e: &anyhow::Error) {
    let user_error = e
        .downcast_ref::<DvmError>()
        .is_some_and(DvmError::is_user_error);

    if user_error {
        eprintln!("\n❌ {}\n", e);
        return;
    }

    eprintln!("\n❌ An error occurred:\n");
    eprintln!("{}", e);

    // Display error chain
    for cause in e.chain().skip(1) {
        eprintln!("\nCaused by: {}", cause);
    }

    eprintln!();
}

async fn run(args: Args) -> Result<()> {
    let config = AppConfig::load(args.config.as_deref())?;
    tracing::debug!(
        runtime_identifier = %config.runtime_identifier,
        cache_dir = %config.cache_dir.display(),
        "configuration loaded"
    );

    // Create adapters (Dependency Injection)
    let runner: Arc<dyn LocalSdkRunner> =
        Arc::new(ProcessSdkRunner::new(config.dotnet_command.clone()));
    let client = DotnetReleaseClient::new(config.sources.clone(), config.download_dir.clone())?;
    let cache = FileSystemCache::new(config.cache_dir.clone(), config.cache_expiry);
    let releases: Arc<dyn ReleaseRepository> =
        Arc::new(CachingReleaseRepository::new(client, cache));
    let installer = InstallerFactory::create(&config, runner.clone(), releases.clone());
    let progress_reporter = StderrProgressReporter::new();

    // Create use case with injected dependencies
    let use_case = ManageSdksUseCase::new(runner, releases, installer, progress_reporter);

    let formatter = FormatterFactory::create(args.format);
    let presenter = StdoutPresenter::new();

    match args.command {
        Command::List => {
            let response = use_case.list().await?;
            presenter.present(&formatter.format_list(&response)?)?;
        }
        Command::ListAvailable { framework } => {
            let response = use_case.list_available(&framework).await?;
            presenter.present(&formatter.format_available(&response)?)?;
        }
        Command::Install { sdk_version } => {
            let outcome = use_case.install(&sdk_version).await?;
            presenter.present(&formatter.format_install(&outcome)?)?;
        }
        Command::Uninstall { sdk_version } => {
            let response = use_case.uninstall(&sdk_version).await?;
            presenter.present(&formatter.format_uninstall(&response)?)?;
        }
        Command::Upgrade { framework } => {
            let report = use_case.upgrade(&framework).await?;
            presenter.present(&formatter.format_upgrade(&report)?)?;
            report.ensure_complete()?;
        }
        Command::Info { sdk_version } => {
            let response = use_case.info(&sdk_version).await?;
            presenter.present(&formatter.format_info(&response)?)?;
        }
        Command::Update => {
            let response = use_case.update().await?;
            presenter.present(&formatter.format_update(&response)?)?;
        }
    }

    Ok(())
}
