// Checkin Infrastructure - HTTP Adapters
// Implements: RewardsApi

pub mod rewards_client;

pub use rewards_client::{ApiConfig, HttpRewardsApi};
