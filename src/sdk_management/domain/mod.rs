pub mod local_inventory;
pub mod release_catalog;
pub mod runtime_identifier;
pub mod version;

pub use local_inventory::LocalInventory;
pub use release_catalog::{
    CveEntry, Release, ReleaseCatalog, ReleaseIndexEntry, ReleaseList, RuntimeInfo, SdkFile,
    SdkInfo,
};
pub use runtime_identifier::{OsFamily, RuntimeIdentifier};
pub use version::{Channel, SdkVersion, VersionRequest};
