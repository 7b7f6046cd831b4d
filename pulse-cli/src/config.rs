//! Configuration module
//!
//! Handles CLI configuration including the API endpoint and acting user.

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Pulse API
    pub api_url: String,
    /// User id recorded on submitted tasks
    pub user_id: String,
}
