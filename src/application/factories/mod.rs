mod formatter_factory;
mod installer_factory;

pub use formatter_factory::FormatterFactory;
pub use installer_factory::InstallerFactory;
