//! dvm - .NET SDK version manager
//!
//! This library lists, installs, uninstalls and upgrades .NET SDKs on the
//! local machine using the official release catalog, following hexagonal
//! architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`sdk_management`): Version strings, the release catalog, the local inventory and the resolver
//! - **Application Layer** (`application`): Use cases, response DTOs and factories
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use dvm::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<()> {
//! let config = AppConfig::load(None)?;
//!
//! // Create adapters
//! let runner: Arc<dyn LocalSdkRunner> = Arc::new(ProcessSdkRunner::new(config.dotnet_command.clone()));
//! let client = DotnetReleaseClient::new(config.sources.clone(), config.download_dir.clone())?;
//! let cache = FileSystemCache::new(config.cache_dir.clone(), config.cache_expiry);
//! let releases: Arc<dyn ReleaseRepository> = Arc::new(CachingReleaseRepository::new(client, cache));
//! let installer = InstallerFactory::create(&config, runner.clone(), releases.clone());
//!
//! // Create use case
//! let use_case = ManageSdksUseCase::new(runner, releases, installer, StderrProgressReporter::new());
//!
//! // Execute and format
//! let response = use_case.list().await?;
//! let output = FormatterFactory::create(OutputFormat::Text).format_list(&response)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod logging;
pub mod ports;
pub mod sdk_management;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{FileSystemCache, StdoutPresenter};
    pub use crate::adapters::outbound::formatters::{JsonFormatter, TextFormatter};
    pub use crate::adapters::outbound::network::{CachingReleaseRepository, DotnetReleaseClient};
    pub use crate::adapters::outbound::process::ProcessSdkRunner;
    pub use crate::application::dto::{
        InfoResponse, InstallOutcome, ListResponse, OutputFormat, UninstallResponse,
        UpdateResponse, UpgradeReport,
    };
    pub use crate::application::factories::{FormatterFactory, InstallerFactory};
    pub use crate::application::use_cases::ManageSdksUseCase;
    pub use crate::config::AppConfig;
    pub use crate::ports::outbound::{
        LocalSdkRunner, OutputPresenter, ProgressReporter, ReleaseRepository, ReportFormatter,
        ResultCache, SdkInstaller,
    };
    pub use crate::sdk_management::domain::{
        Channel, LocalInventory, ReleaseCatalog, RuntimeIdentifier, SdkVersion, VersionRequest,
    };
    pub use crate::sdk_management::services::Resolver;
    pub use crate::shared::error::{DvmError, ExitCode};
    pub use crate::shared::Result;
}
