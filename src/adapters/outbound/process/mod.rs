/// Process adapters for running local programs
mod process_sdk_runner;

pub use process_sdk_runner::ProcessSdkRunner;
