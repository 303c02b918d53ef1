pub mod resolver;

pub use resolver::{
    ChannelPlan, InstallTarget, ReleaseRequirement, Resolver, UpdateNotice, ChannelScope,
    UpgradeStep,
};
