/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (processes, network, cache, console).
pub mod formatter;
pub mod local_sdk_runner;
pub mod output_presenter;
pub mod progress_reporter;
pub mod release_repository;
pub mod result_cache;
pub mod sdk_installer;

pub use formatter::ReportFormatter;
pub use local_sdk_runner::LocalSdkRunner;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use release_repository::ReleaseRepository;
pub use result_cache::{get_or_create, ResultCache};
pub use sdk_installer::SdkInstaller;
