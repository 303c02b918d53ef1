/// Network adapters for the remote release catalog
mod caching_release_repository;
mod dotnet_release_client;

pub use caching_release_repository::{
    release_list_key, CachingReleaseRepository, RELEASE_INDEX_KEY,
};
pub use dotnet_release_client::DotnetReleaseClient;
