use crate::sdk_management::domain::LocalInventory;
use crate::shared::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// LocalSdkRunner port for interacting with the local machine
///
/// This port abstracts querying the installed SDKs and running external
/// commands, optionally with elevated privileges.
#[async_trait]
pub trait LocalSdkRunner: Send + Sync {
    /// Lists the SDKs installed on this machine, in the order the runtime reports them
    ///
    /// A machine without any .NET installation yields an empty inventory.
    async fn list_installed_sdks(&self) -> Result<LocalInventory>;

    /// Runs an external command and returns its captured standard output
    ///
    /// # Arguments
    /// * `executable` - Program to run
    /// * `args` - Arguments passed verbatim
    /// * `requires_elevation` - Whether the command needs administrator rights
    ///
    /// # Errors
    /// Returns an error if:
    /// - Elevation is required but the process is not elevated (`ElevationRequired`)
    /// - The command cannot be started or exits non-zero (`ProcessExecutionFailed`)
    async fn run_command(
        &self,
        executable: &str,
        args: &[&str],
        requires_elevation: bool,
    ) -> Result<String>;
}

#[async_trait]
impl<T: LocalSdkRunner + ?Sized> LocalSdkRunner for Arc<T> {
    async fn list_installed_sdks(&self) -> Result<LocalInventory> {
        (**self).list_installed_sdks().await
    }

    async fn run_command(
        &self,
        executable: &str,
        args: &[&str],
        requires_elevation: bool,
    ) -> Result<String> {
        (**self)
            .run_command(executable, args, requires_elevation)
            .await
    }
}
