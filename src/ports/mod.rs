/// Ports module defining interfaces for hexagonal architecture
///
/// The command-line front end drives the application layer directly, so
/// only outbound ports (driven ports - infrastructure interfaces) exist.
pub mod outbound;
