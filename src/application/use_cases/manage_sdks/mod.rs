use crate::application::dto::{
    AvailableChannel, AvailableRelease, AvailableResponse, ChannelOutcome, FailedRemoval,
    InfoResponse, InstallOutcome, InstalledSdk, ListResponse, UninstallResponse, UpdateResponse,
    UpgradeReport,
};
use crate::ports::outbound::{LocalSdkRunner, ProgressReporter, ReleaseRepository, SdkInstaller};
use crate::sdk_management::domain::{Channel, ReleaseCatalog, SdkVersion, VersionRequest};
use crate::sdk_management::services::{
    ChannelPlan, ChannelScope, InstallTarget, ReleaseRequirement, Resolver, UpgradeStep,
};
use crate::shared::error::DvmError;
use crate::shared::Result;

/// Errors after which no further privileged step can succeed in this session
fn is_fatal(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<DvmError>()
        .is_some_and(DvmError::is_fatal_for_session)
}

/// ManageSdksUseCase - orchestrates every dvm command
///
/// This use case sequences the local inventory, the release catalog, the
/// resolver and the platform installer using generic dependency injection.
/// Each command validates its input before any I/O takes place.
///
/// # Type Parameters
/// * `L` - LocalSdkRunner implementation
/// * `R` - ReleaseRepository implementation
/// * `I` - SdkInstaller implementation
/// * `PR` - ProgressReporter implementation
pub struct ManageSdksUseCase<L, R, I, PR> {
    local: L,
    releases: R,
    installer: I,
    progress_reporter: PR,
}

impl<L, R, I, PR> ManageSdksUseCase<L, R, I, PR>
where
    L: LocalSdkRunner,
    R: ReleaseRepository,
    I: SdkInstaller,
    PR: ProgressReporter,
{
    /// Creates a new ManageSdksUseCase with injected dependencies
    pub fn new(local: L, releases: R, installer: I, progress_reporter: PR) -> Self {
        Self {
            local,
            releases,
            installer,
            progress_reporter,
        }
    }

    /// `list`: installed SDKs, each annotated with the update available for its channel
    pub async fn list(&self) -> Result<ListResponse> {
        // Step 1: Gather local and remote state
        let local = self.local.list_installed_sdks().await?;
        let catalog = self.load_catalog().await?;

        // Step 2: Compute update notices
        let updates = Resolver::compute_updates(&local, &catalog);
        let untracked_channels = Resolver::untracked_channels(&local, &catalog);

        // Step 3: Annotate each installed version
        let installed = local
            .sdks()
            .iter()
            .map(|version| {
                let channel = Channel::parse(version).ok();
                let update = updates
                    .iter()
                    .find(|notice| Some(&notice.channel) == channel.as_ref())
                    .cloned();
                InstalledSdk {
                    version: version.clone(),
                    update,
                }
            })
            .collect();

        Ok(ListResponse {
            installed,
            updates,
            untracked_channels,
        })
    }

    /// `list-available`: every published SDK of one channel or of all channels
    ///
    /// # Arguments
    /// * `framework` - `all` or a channel in any accepted form (`7`, `7.0`, `net7.0`)
    pub async fn list_available(&self, framework: &str) -> Result<AvailableResponse> {
        // Step 1: Validate the filter
        let scope = ChannelScope::parse(framework)?;

        // Step 2: Gather local and remote state
        let local = self.local.list_installed_sdks().await?;
        let catalog = self.load_catalog().await?;

        let entries = match scope.channel() {
            Some(channel) => vec![catalog.lookup_channel(channel)?],
            None => catalog.filter(None),
        };

        // Step 3: Fetch each channel's release list
        let mut channels = Vec::with_capacity(entries.len());
        for entry in entries {
            let list = self.releases.fetch_release_list(entry).await?;
            let releases = list
                .with_sdk()
                .filter_map(|release| {
                    let version = release.display_version()?;
                    Some(AvailableRelease {
                        version: version.to_string(),
                        release_date: release.release_date,
                        security: release.security,
                        installed: release.sdk_version().is_some_and(|v| local.contains(v)),
                    })
                })
                .collect();

            channels.push(AvailableChannel {
                channel_version: entry.channel_version.clone(),
                latest_sdk: entry.latest_sdk.clone(),
                support_phase: entry.support_phase.clone(),
                release_type: entry.release_type.clone(),
                releases,
            });
        }

        Ok(AvailableResponse { channels })
    }

    /// `install`: installs a channel's latest SDK or one exact SDK
    ///
    /// Installing an SDK that is already present is a successful no-op.
    pub async fn install(&self, sdk_version: &str) -> Result<InstallOutcome> {
        // Step 1: Validate input
        let request = VersionRequest::parse(sdk_version)?;

        // Step 2: Resolve the target against local and remote state
        let local = self.local.list_installed_sdks().await?;
        let catalog = self.load_catalog().await?;
        let requirement = match Resolver::resolve_install_target(&request, &local, &catalog)? {
            InstallTarget::AlreadyInstalled { sdk_version } => {
                self.progress_reporter.report(&format!(
                    "✅ SDK version {} is already installed",
                    sdk_version
                ));
                return Ok(InstallOutcome::AlreadyInstalled { sdk_version });
            }
            InstallTarget::Required(requirement) => requirement,
        };

        // Step 3: Install
        self.install_requirement(&requirement).await?;

        Ok(InstallOutcome::Installed {
            channel: request.channel(),
            sdk_version: requirement.sdk_version,
        })
    }

    /// `uninstall`: removes one exact SDK without consulting the catalog
    pub async fn uninstall(&self, sdk_version: &str) -> Result<UninstallResponse> {
        let version = SdkVersion::parse(sdk_version)?;

        self.progress_reporter
            .report(&format!("🗑️  Removing SDK {}...", version));
        self.installer.uninstall(&version).await?;

        Ok(UninstallResponse {
            sdk_version: version.to_string(),
        })
    }

    /// `upgrade`: brings installed channels to their latest SDK.
    ///
    /// Per channel the new SDK is installed first; superseded versions are
    /// removed only after that install succeeded. A failed channel does not
    /// stop the remaining channels, except for failures no later step could
    /// survive (missing privileges, unsupported platform), which abort at once.
    /// The returned report lists failed channels; see [`UpgradeReport::ensure_complete`].
    pub async fn upgrade(&self, framework: &str) -> Result<UpgradeReport> {
        // Step 1: Validate the scope
        let scope = ChannelScope::parse(framework)?;

        // Step 2: Plan
        let local = self.local.list_installed_sdks().await?;
        let catalog = self.load_catalog().await?;
        let plan = Resolver::resolve_upgrade_plan(&scope, &local, &catalog)?;

        // Step 3: Execute channel by channel
        let mut report = UpgradeReport::default();
        for channel_plan in plan {
            let outcome = match channel_plan {
                ChannelPlan::UpToDate {
                    channel,
                    latest_sdk,
                } => {
                    self.progress_reporter.report(&format!(
                        "✅ {} is already up to date ({})",
                        channel, latest_sdk
                    ));
                    ChannelOutcome::UpToDate {
                        channel,
                        latest_sdk,
                    }
                }
                ChannelPlan::Untracked { channel } => {
                    self.progress_reporter.report_warning(&format!(
                        "{} is not in the release index, skipping",
                        channel
                    ));
                    ChannelOutcome::Untracked { channel }
                }
                ChannelPlan::Upgrade(step) => self.execute_step(step).await?,
            };
            report.channels.push(outcome);
        }

        Ok(report)
    }

    /// `info`: metadata of the release a version request resolves to
    pub async fn info(&self, sdk_version: &str) -> Result<InfoResponse> {
        let request = VersionRequest::parse(sdk_version)?;

        let catalog = self.load_catalog().await?;
        let requirement = Resolver::resolve_release_requirement(&request, &catalog)?;
        let list = self.releases.fetch_release_list(&requirement.entry).await?;
        let release = requirement.select(&list)?;

        Ok(InfoResponse::from_release(
            &requirement.sdk_version,
            &requirement.entry.channel_version,
            release,
        ))
    }

    /// `update`: drops cached catalog data and refetches the release index
    pub async fn update(&self) -> Result<UpdateResponse> {
        self.progress_reporter
            .report("🔄 Refreshing the release index...");
        self.releases.invalidate().await?;
        let catalog = self.load_catalog().await?;

        Ok(UpdateResponse {
            channel_count: catalog.len(),
            newest_release_date: catalog.newest_release_date(),
        })
    }

    async fn load_catalog(&self) -> Result<ReleaseCatalog> {
        self.releases.fetch_release_index().await
    }

    /// Resolves the concrete release and hands it to the platform installer
    async fn install_requirement(&self, requirement: &ReleaseRequirement) -> Result<()> {
        let list = self.releases.fetch_release_list(&requirement.entry).await?;
        let release = requirement.select(&list)?;

        self.progress_reporter.report(&format!(
            "📥 Installing SDK {}...",
            requirement.sdk_version
        ));
        self.installer
            .install(&requirement.sdk_version, release)
            .await?;
        self.progress_reporter.report_completion(&format!(
            "✅ Installed SDK {}",
            requirement.sdk_version
        ));
        Ok(())
    }

    /// Installs then removes for one channel.
    ///
    /// Returns `Err` only for session-fatal failures; anything else is
    /// recorded in the outcome.
    async fn execute_step(&self, step: UpgradeStep) -> Result<ChannelOutcome> {
        let UpgradeStep {
            channel,
            entry,
            sdk_to_install,
            sdks_to_remove,
        } = step;

        let requirement = ReleaseRequirement {
            entry,
            sdk_version: sdk_to_install.clone(),
        };

        if let Err(e) = self.install_requirement(&requirement).await {
            if is_fatal(&e) {
                return Err(e);
            }
            self.progress_reporter.report_error(&format!(
                "Could not install {}, keeping the installed {} SDKs: {}",
                sdk_to_install, channel, e
            ));
            return Ok(ChannelOutcome::InstallFailed {
                channel,
                sdk_version: sdk_to_install,
                reason: format!("{:#}", e),
            });
        }

        let mut removed = Vec::new();
        let mut failed_removals = Vec::new();
        for old in sdks_to_remove {
            match self.remove_superseded(&old).await {
                Ok(()) => removed.push(old),
                Err(e) if is_fatal(&e) => return Err(e),
                Err(e) => {
                    self.progress_reporter
                        .report_error(&format!("Could not remove {}: {}", old, e));
                    failed_removals.push(FailedRemoval {
                        sdk_version: old,
                        reason: format!("{:#}", e),
                    });
                }
            }
        }

        Ok(ChannelOutcome::Upgraded {
            channel,
            installed: sdk_to_install,
            removed,
            failed_removals,
        })
    }

    async fn remove_superseded(&self, sdk_version: &str) -> Result<()> {
        let version = SdkVersion::parse(sdk_version)?;
        self.progress_reporter
            .report(&format!("🗑️  Removing SDK {}...", version));
        self.installer.uninstall(&version).await
    }
}
