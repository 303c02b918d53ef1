/// Mock implementations for testing
mod mock_local_sdk_runner;
mod mock_progress_reporter;
mod mock_release_repository;
mod mock_sdk_installer;

pub use mock_local_sdk_runner::MockLocalSdkRunner;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_release_repository::MockReleaseRepository;
pub use mock_sdk_installer::MockSdkInstaller;
