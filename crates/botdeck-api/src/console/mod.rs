// Console API: typed per-field management endpoints.

pub mod client;
pub mod types;

pub use client::ConsoleClient;
pub use types::{
    ActivityEntry, ChatMessage, CommandHistoryEntry, CommandHistoryQuery, DashboardSummary,
    EnumOption, FeatureFlag, FeatureFlagResponse, GroupDetail, GroupListItem, GroupListQuery,
    GroupMeta, GroupUpdate, HistoryQuery, Page, PrivateMessage, PrivateMeta, PrivateUserDetail,
    PrivateUserListItem, PrivateUserListQuery, PrivateUserUpdate,
};
