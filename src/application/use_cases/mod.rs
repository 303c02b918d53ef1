/// Use cases module containing application business logic orchestration
mod manage_sdks;

pub use manage_sdks::ManageSdksUseCase;
