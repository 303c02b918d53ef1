/// Filesystem adapters for the result cache and standard output
mod file_cache;
mod stdout_presenter;

pub use file_cache::{is_fresh, FileSystemCache};
pub use stdout_presenter::StdoutPresenter;
