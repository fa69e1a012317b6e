// Admin API: flat CRUD resources.

pub mod client;
pub mod types;

pub use client::AdminClient;
pub use types::{
    AutomationRule, AutomationRuleInput, DashboardStats, FeatureConfig, FeatureConfigInput, Group,
    GroupInput, PrivateChat, PrivateChatInput,
};
