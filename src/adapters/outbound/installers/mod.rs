/// Platform-specific SDK installers
mod linux;
mod macos;
mod unsupported;

pub use linux::{component_paths, LinuxSdkInstaller};
pub use macos::MacOsSdkInstaller;
pub use unsupported::UnsupportedPlatformInstaller;
