use crate::sdk_management::domain::{
    Channel, LocalInventory, Release, ReleaseCatalog, ReleaseIndexEntry, ReleaseList,
    VersionRequest,
};
use crate::shared::Result;
use chrono::NaiveDate;
use serde::Serialize;

/// A newer SDK exists for a channel that is installed locally
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateNotice {
    pub channel: Channel,
    pub latest_sdk: String,
    pub latest_release_date: NaiveDate,
}

/// The catalog entry and exact SDK version a request resolved to,
/// pending the channel's release list.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseRequirement {
    pub entry: ReleaseIndexEntry,
    pub sdk_version: String,
}

impl ReleaseRequirement {
    /// Picks the concrete release out of the channel's release list.
    ///
    /// # Errors
    /// Fails with `ReleaseNotFound` when the list has no release for the SDK version
    pub fn select<'a>(&self, releases: &'a ReleaseList) -> Result<&'a Release> {
        releases.lookup_release(&self.sdk_version)
    }
}

/// Outcome of resolving an install request against the local inventory
#[derive(Debug, Clone, PartialEq)]
pub enum InstallTarget {
    /// The resolved SDK is already present; installing is a no-op
    AlreadyInstalled { sdk_version: String },
    /// The resolved SDK must be installed
    Required(ReleaseRequirement),
}

/// Channels a command applies to: every channel, or one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelScope {
    All,
    Channel(Channel),
}

impl ChannelScope {
    /// Parses the `--framework` option: `all`, or anything [`Channel::parse`] accepts
    pub fn parse(input: &str) -> Result<Self> {
        if input.eq_ignore_ascii_case("all") {
            return Ok(ChannelScope::All);
        }
        Ok(ChannelScope::Channel(Channel::parse(input)?))
    }

    pub fn channel(&self) -> Option<&Channel> {
        match self {
            ChannelScope::All => None,
            ChannelScope::Channel(channel) => Some(channel),
        }
    }
}

/// Unit of work bringing one channel to its latest SDK.
///
/// `sdk_to_install` must be installed successfully before any of
/// `sdks_to_remove` is removed.
#[derive(Debug, Clone, PartialEq)]
pub struct UpgradeStep {
    pub channel: Channel,
    pub entry: ReleaseIndexEntry,
    pub sdk_to_install: String,
    pub sdks_to_remove: Vec<String>,
}

/// What an upgrade will do for one channel
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelPlan {
    UpToDate { channel: Channel, latest_sdk: String },
    Upgrade(UpgradeStep),
    /// Installed locally but absent from the catalog (end-of-life channels)
    Untracked { channel: Channel },
}

impl ChannelPlan {
    pub fn channel(&self) -> &Channel {
        match self {
            ChannelPlan::UpToDate { channel, .. } | ChannelPlan::Untracked { channel } => channel,
            ChannelPlan::Upgrade(step) => &step.channel,
        }
    }
}

/// Resolver service reconciling the local inventory with the release catalog
///
/// This service contains pure business logic. It has no I/O dependencies
/// and works only with domain objects.
pub struct Resolver;

impl Resolver {
    /// Computes the update notices for every installed channel.
    ///
    /// One notice per channel whose latest SDK is not installed, no matter how
    /// many patch versions of that channel are present.
    ///
    /// Unlike [`ReleaseCatalog::lookup_channel`], a channel missing from the
    /// catalog is not a `ChannelNotFound` failure: it is skipped and produces
    /// no notice. The catalog drops 1.x and 2.x channels, which may still be
    /// installed locally.
    pub fn compute_updates(local: &LocalInventory, catalog: &ReleaseCatalog) -> Vec<UpdateNotice> {
        let mut notices: Vec<UpdateNotice> = Vec::new();

        for channel in local.channels_present() {
            let Some(entry) = catalog.find_channel(&channel) else {
                continue;
            };

            if local.contains(&entry.latest_sdk) {
                continue;
            }

            let notice = UpdateNotice {
                channel,
                latest_sdk: entry.latest_sdk.clone(),
                latest_release_date: entry.latest_release_date,
            };
            if !notices.contains(&notice) {
                notices.push(notice);
            }
        }

        notices
    }

    /// Installed channels the catalog has no entry for
    pub fn untracked_channels(local: &LocalInventory, catalog: &ReleaseCatalog) -> Vec<Channel> {
        local
            .channels_present()
            .into_iter()
            .filter(|channel| catalog.find_channel(channel).is_none())
            .collect()
    }

    /// Maps a request to the catalog entry and exact SDK version it names,
    /// without consulting the local inventory.
    ///
    /// A channel request resolves to the channel's latest SDK; an exact
    /// request resolves to itself.
    ///
    /// # Errors
    /// Fails with `ChannelNotFound` when the request's channel is not in the catalog
    pub fn resolve_release_requirement(
        request: &VersionRequest,
        catalog: &ReleaseCatalog,
    ) -> Result<ReleaseRequirement> {
        let entry = catalog.lookup_channel(&request.channel())?;

        let sdk_version = match request {
            VersionRequest::Channel(_) => entry.latest_sdk.clone(),
            VersionRequest::Exact(version) => version.as_str().to_string(),
        };

        Ok(ReleaseRequirement {
            entry: entry.clone(),
            sdk_version,
        })
    }

    /// Resolves what `install` has to do for a request.
    ///
    /// # Errors
    /// Fails with `ChannelNotFound` when the request's channel is not in the catalog
    pub fn resolve_install_target(
        request: &VersionRequest,
        local: &LocalInventory,
        catalog: &ReleaseCatalog,
    ) -> Result<InstallTarget> {
        let requirement = Self::resolve_release_requirement(request, catalog)?;

        if local.contains(&requirement.sdk_version) {
            return Ok(InstallTarget::AlreadyInstalled {
                sdk_version: requirement.sdk_version,
            });
        }

        Ok(InstallTarget::Required(requirement))
    }

    /// Plans an upgrade: one [`ChannelPlan`] per channel in scope.
    ///
    /// With [`ChannelScope::All`] the scope is every distinct installed channel,
    /// in first-seen order. There a channel missing from the catalog becomes
    /// [`ChannelPlan::Untracked`] instead of a `ChannelNotFound` failure, so
    /// one legacy 1.x or 2.x install does not block upgrading the rest.
    ///
    /// # Errors
    /// Fails with `ChannelNotFound` when an explicitly requested channel is not in the catalog
    pub fn resolve_upgrade_plan(
        scope: &ChannelScope,
        local: &LocalInventory,
        catalog: &ReleaseCatalog,
    ) -> Result<Vec<ChannelPlan>> {
        match scope {
            ChannelScope::Channel(channel) => {
                let entry = catalog.lookup_channel(channel)?;
                Ok(vec![Self::plan_channel(channel.clone(), entry, local)])
            }
            ChannelScope::All => Ok(local
                .channels_present()
                .into_iter()
                .map(|channel| match catalog.find_channel(&channel) {
                    Some(entry) => Self::plan_channel(channel, entry, local),
                    None => ChannelPlan::Untracked { channel },
                })
                .collect()),
        }
    }

    fn plan_channel(
        channel: Channel,
        entry: &ReleaseIndexEntry,
        local: &LocalInventory,
    ) -> ChannelPlan {
        if local.contains(&entry.latest_sdk) {
            return ChannelPlan::UpToDate {
                channel,
                latest_sdk: entry.latest_sdk.clone(),
            };
        }

        let sdks_to_remove = local.versions_in_channel(&channel);
        ChannelPlan::Upgrade(UpgradeStep {
            channel,
            entry: entry.clone(),
            sdk_to_install: entry.latest_sdk.clone(),
            sdks_to_remove,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk_management::domain::{SdkInfo, SdkVersion};
    use crate::shared::error::DvmError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(channel: &str, latest_sdk: &str) -> ReleaseIndexEntry {
        ReleaseIndexEntry {
            channel_version: channel.to_string(),
            latest_release: None,
            latest_release_date: date(2023, 2, 14),
            latest_runtime: None,
            latest_sdk: latest_sdk.to_string(),
            release_type: Some("lts".to_string()),
            support_phase: Some("active".to_string()),
            eol_date: None,
            releases_json: format!("https://example.com/{}/releases.json", channel),
        }
    }

    fn catalog() -> ReleaseCatalog {
        ReleaseCatalog::new(vec![
            entry("7.0", "7.0.102"),
            entry("6.0", "6.0.408"),
            entry("3.1", "3.1.426"),
        ])
    }

    fn local(sdks: &[&str]) -> LocalInventory {
        LocalInventory::new(sdks.iter().map(|s| s.to_string()).collect())
    }

    fn release(sdk_version: &str) -> Release {
        Release {
            release_date: date(2023, 1, 10),
            release_version: None,
            security: false,
            cve_list: vec![],
            release_notes: None,
            runtime: None,
            sdk: Some(SdkInfo {
                version: Some(sdk_version.to_string()),
                ..SdkInfo::default()
            }),
        }
    }

    fn request(input: &str) -> VersionRequest {
        VersionRequest::parse(input).unwrap()
    }

    // compute_updates

    #[test]
    fn test_compute_updates_single_stale_channel() {
        let notices = Resolver::compute_updates(&local(&["6.0.404"]), &catalog());
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].channel.as_str(), "6.0");
        assert_eq!(notices[0].latest_sdk, "6.0.408");
        assert_eq!(notices[0].latest_release_date, date(2023, 2, 14));
    }

    #[test]
    fn test_compute_updates_deduplicates_patch_versions() {
        let notices =
            Resolver::compute_updates(&local(&["6.0.404", "6.0.405", "6.0.406"]), &catalog());
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].latest_sdk, "6.0.408");
    }

    #[test]
    fn test_compute_updates_none_when_latest_present() {
        let notices = Resolver::compute_updates(&local(&["6.0.404", "6.0.408"]), &catalog());
        assert!(notices.is_empty());
    }

    #[test]
    fn test_compute_updates_multiple_channels() {
        let notices = Resolver::compute_updates(
            &local(&["7.0.100", "6.0.404", "3.1.426"]),
            &catalog(),
        );
        let latest: Vec<&str> = notices.iter().map(|n| n.latest_sdk.as_str()).collect();
        assert_eq!(latest, vec!["7.0.102", "6.0.408"]);
    }

    #[test]
    fn test_compute_updates_skips_untracked_channels() {
        let inventory = local(&["2.1.818", "6.0.404"]);
        let notices = Resolver::compute_updates(&inventory, &catalog());
        assert_eq!(notices.len(), 1);

        let untracked = Resolver::untracked_channels(&inventory, &catalog());
        assert_eq!(untracked, vec![Channel::parse("2.1").unwrap()]);
    }

    #[test]
    fn test_compute_updates_never_duplicates_channel_and_sdk() {
        let inventory = local(&["7.0.100", "6.0.400", "7.0.101", "6.0.401", "6.0.402"]);
        let notices = Resolver::compute_updates(&inventory, &catalog());
        for (i, a) in notices.iter().enumerate() {
            for b in notices.iter().skip(i + 1) {
                assert!(!(a.channel == b.channel && a.latest_sdk == b.latest_sdk));
            }
        }
    }

    // resolve_install_target

    #[test]
    fn test_install_channel_resolves_to_latest() {
        let target =
            Resolver::resolve_install_target(&request("7.0"), &local(&[]), &catalog()).unwrap();
        let InstallTarget::Required(requirement) = target else {
            panic!("expected a required install");
        };
        assert_eq!(requirement.sdk_version, "7.0.102");
        assert_eq!(requirement.entry.channel_version, "7.0");

        let releases = ReleaseList::new("7.0", vec![release("7.0.102"), release("7.0.101")]);
        let selected = requirement.select(&releases).unwrap();
        assert_eq!(selected.sdk_version(), Some("7.0.102"));
    }

    #[test]
    fn test_install_bare_major_resolves_to_latest() {
        let target =
            Resolver::resolve_install_target(&request("net6"), &local(&[]), &catalog()).unwrap();
        assert!(matches!(
            target,
            InstallTarget::Required(ReleaseRequirement { ref sdk_version, .. }) if sdk_version == "6.0.408"
        ));
    }

    #[test]
    fn test_install_exact_version_is_literal() {
        let target =
            Resolver::resolve_install_target(&request("7.0.101"), &local(&[]), &catalog())
                .unwrap();
        assert!(matches!(
            target,
            InstallTarget::Required(ReleaseRequirement { ref sdk_version, .. }) if sdk_version == "7.0.101"
        ));
    }

    #[test]
    fn test_install_channel_already_at_latest() {
        let target = Resolver::resolve_install_target(
            &request("7.0"),
            &local(&["7.0.100", "7.0.102"]),
            &catalog(),
        )
        .unwrap();
        assert_eq!(
            target,
            InstallTarget::AlreadyInstalled {
                sdk_version: "7.0.102".to_string()
            }
        );
    }

    #[test]
    fn test_install_exact_version_already_installed() {
        let target = Resolver::resolve_install_target(
            &request("7.0.100"),
            &local(&["7.0.100"]),
            &catalog(),
        )
        .unwrap();
        assert!(matches!(target, InstallTarget::AlreadyInstalled { .. }));
    }

    #[test]
    fn test_install_unknown_channel() {
        let err = Resolver::resolve_install_target(&request("5.0"), &local(&[]), &catalog())
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DvmError>(),
            Some(DvmError::ChannelNotFound { .. })
        ));
    }

    #[test]
    fn test_install_exact_version_missing_from_release_list() {
        let target =
            Resolver::resolve_install_target(&request("7.0.999"), &local(&[]), &catalog())
                .unwrap();
        let InstallTarget::Required(requirement) = target else {
            panic!("expected a required install");
        };
        let releases = ReleaseList::new("7.0", vec![release("7.0.102")]);
        let err = requirement.select(&releases).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DvmError>(),
            Some(DvmError::ReleaseNotFound { .. })
        ));
    }

    #[test]
    fn test_release_requirement_ignores_local_inventory() {
        let requirement =
            Resolver::resolve_release_requirement(&request("6.0"), &catalog()).unwrap();
        assert_eq!(requirement.sdk_version, "6.0.408");

        let exact = VersionRequest::Exact(SdkVersion::parse("6.0.404").unwrap());
        let requirement = Resolver::resolve_release_requirement(&exact, &catalog()).unwrap();
        assert_eq!(requirement.sdk_version, "6.0.404");
    }

    // resolve_upgrade_plan

    #[test]
    fn test_upgrade_all_two_stale_channels() {
        let plan = Resolver::resolve_upgrade_plan(
            &ChannelScope::All,
            &local(&["6.0.404", "7.0.100"]),
            &catalog(),
        )
        .unwrap();

        assert_eq!(plan.len(), 2);
        let ChannelPlan::Upgrade(first) = &plan[0] else {
            panic!("expected upgrade for 6.0");
        };
        assert_eq!(first.channel.as_str(), "6.0");
        assert_eq!(first.sdk_to_install, "6.0.408");
        assert_eq!(first.sdks_to_remove, vec!["6.0.404".to_string()]);

        let ChannelPlan::Upgrade(second) = &plan[1] else {
            panic!("expected upgrade for 7.0");
        };
        assert_eq!(second.channel.as_str(), "7.0");
        assert_eq!(second.sdk_to_install, "7.0.102");
        assert_eq!(second.sdks_to_remove, vec!["7.0.100".to_string()]);
    }

    #[test]
    fn test_upgrade_all_one_step_per_distinct_channel() {
        let inventory = local(&["6.0.404", "7.0.100", "6.0.405", "7.0.102", "3.1.426"]);
        let plan = Resolver::resolve_upgrade_plan(&ChannelScope::All, &inventory, &catalog())
            .unwrap();

        let channels: Vec<&str> = plan.iter().map(|p| p.channel().as_str()).collect();
        assert_eq!(channels, vec!["6.0", "7.0", "3.1"]);
        assert!(matches!(plan[0], ChannelPlan::Upgrade(_)));
        assert!(matches!(plan[1], ChannelPlan::UpToDate { .. }));
        assert!(matches!(plan[2], ChannelPlan::UpToDate { .. }));
    }

    #[test]
    fn test_upgrade_removes_every_stale_patch_in_channel() {
        let plan = Resolver::resolve_upgrade_plan(
            &ChannelScope::All,
            &local(&["6.0.404", "6.0.405", "7.0.102"]),
            &catalog(),
        )
        .unwrap();
        let ChannelPlan::Upgrade(step) = &plan[0] else {
            panic!("expected upgrade for 6.0");
        };
        assert_eq!(
            step.sdks_to_remove,
            vec!["6.0.404".to_string(), "6.0.405".to_string()]
        );
        assert!(!step.sdks_to_remove.contains(&step.sdk_to_install));
    }

    #[test]
    fn test_upgrade_single_channel_scope() {
        let scope = ChannelScope::parse("net7.0").unwrap();
        let plan = Resolver::resolve_upgrade_plan(
            &scope,
            &local(&["6.0.404", "7.0.100"]),
            &catalog(),
        )
        .unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].channel().as_str(), "7.0");
    }

    #[test]
    fn test_upgrade_single_channel_not_installed_installs_latest() {
        let scope = ChannelScope::parse("7.0").unwrap();
        let plan = Resolver::resolve_upgrade_plan(&scope, &local(&["6.0.404"]), &catalog())
            .unwrap();
        let ChannelPlan::Upgrade(step) = &plan[0] else {
            panic!("expected upgrade for 7.0");
        };
        assert_eq!(step.sdk_to_install, "7.0.102");
        assert!(step.sdks_to_remove.is_empty());
    }

    #[test]
    fn test_upgrade_single_channel_up_to_date() {
        let scope = ChannelScope::parse("6.0").unwrap();
        let plan = Resolver::resolve_upgrade_plan(&scope, &local(&["6.0.408"]), &catalog())
            .unwrap();
        assert_eq!(
            plan,
            vec![ChannelPlan::UpToDate {
                channel: Channel::parse("6.0").unwrap(),
                latest_sdk: "6.0.408".to_string()
            }]
        );
    }

    #[test]
    fn test_upgrade_single_unknown_channel_fails() {
        let scope = ChannelScope::parse("5.0").unwrap();
        let err = Resolver::resolve_upgrade_plan(&scope, &local(&[]), &catalog()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DvmError>(),
            Some(DvmError::ChannelNotFound { .. })
        ));
    }

    #[test]
    fn test_upgrade_all_reports_untracked_channels() {
        let plan = Resolver::resolve_upgrade_plan(
            &ChannelScope::All,
            &local(&["2.1.818"]),
            &catalog(),
        )
        .unwrap();
        assert_eq!(
            plan,
            vec![ChannelPlan::Untracked {
                channel: Channel::parse("2.1").unwrap()
            }]
        );
    }

    #[test]
    fn test_legacy_channel_fails_only_when_named() {
        let inventory = local(&["2.1.818", "6.0.404"]);

        let plan = Resolver::resolve_upgrade_plan(&ChannelScope::All, &inventory, &catalog())
            .unwrap();
        assert_eq!(plan.len(), 2);
        assert!(matches!(plan[0], ChannelPlan::Untracked { .. }));
        assert!(matches!(plan[1], ChannelPlan::Upgrade(_)));

        let scope = ChannelScope::parse("2.1").unwrap();
        let err = Resolver::resolve_upgrade_plan(&scope, &inventory, &catalog()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DvmError>(),
            Some(DvmError::ChannelNotFound { .. })
        ));
    }

    #[test]
    fn test_upgrade_all_with_nothing_installed() {
        let plan =
            Resolver::resolve_upgrade_plan(&ChannelScope::All, &local(&[]), &catalog()).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_channel_scope_parse() {
        assert_eq!(ChannelScope::parse("all").unwrap(), ChannelScope::All);
        assert_eq!(ChannelScope::parse("ALL").unwrap(), ChannelScope::All);
        assert_eq!(
            ChannelScope::parse("7").unwrap(),
            ChannelScope::Channel(Channel::parse("7.0").unwrap())
        );
        assert!(ChannelScope::parse("7 .0").is_err());
    }
}
