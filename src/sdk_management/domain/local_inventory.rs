use super::version::Channel;

/// Snapshot of the SDKs installed on this machine.
///
/// Entries are unique by exact version string and keep the order reported
/// by the local runtime. Several patch versions of one channel may coexist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalInventory {
    sdks: Vec<String>,
}

impl LocalInventory {
    pub fn new(sdks: Vec<String>) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(sdks.len());
        for sdk in sdks {
            if !unique.contains(&sdk) {
                unique.push(sdk);
            }
        }
        Self { sdks: unique }
    }

    /// Parses `dotnet --list-sdks` output.
    ///
    /// Each line looks like `7.0.102 [/usr/share/dotnet/sdk]`; only the
    /// version before the bracket is kept.
    ///
    /// # Examples
    /// ```
    /// use dvm::sdk_management::domain::LocalInventory;
    ///
    /// let inventory = LocalInventory::from_list_sdks_output(
    ///     "6.0.404 [/usr/share/dotnet/sdk]\n7.0.102 [/usr/share/dotnet/sdk]\n",
    /// );
    /// assert!(inventory.contains("7.0.102"));
    /// assert_eq!(inventory.len(), 2);
    /// ```
    pub fn from_list_sdks_output(output: &str) -> Self {
        let sdks = output
            .lines()
            .filter_map(|line| {
                let version = line.split('[').next().unwrap_or(line).trim();
                (!version.is_empty()).then(|| version.to_string())
            })
            .collect();
        Self::new(sdks)
    }

    pub fn contains(&self, version: &str) -> bool {
        self.sdks.iter().any(|sdk| sdk == version)
    }

    pub fn sdks(&self) -> &[String] {
        &self.sdks
    }

    pub fn len(&self) -> usize {
        self.sdks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sdks.is_empty()
    }

    /// Distinct channels of the installed SDKs, in first-seen order.
    ///
    /// Entries whose channel cannot be derived are not part of any channel.
    pub fn channels_present(&self) -> Vec<Channel> {
        let mut channels: Vec<Channel> = Vec::new();
        for channel in self.sdks.iter().filter_map(|sdk| Channel::parse(sdk).ok()) {
            if !channels.contains(&channel) {
                channels.push(channel);
            }
        }
        channels
    }

    /// Installed SDKs belonging to `channel`, in inventory order
    pub fn versions_in_channel(&self, channel: &Channel) -> Vec<String> {
        self.sdks
            .iter()
            .filter(|sdk| Channel::parse(sdk).ok().as_ref() == Some(channel))
            .cloned()
            .collect()
    }
}
