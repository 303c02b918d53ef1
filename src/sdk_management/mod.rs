/// SDK management domain - pure version resolution over the local inventory
/// and the remote release catalog. No I/O happens in this layer.
pub mod domain;
pub mod services;
