//! Data models: stored transactions and the account service wire types.

/// Account service request/response types
pub mod account;
/// Transaction records and API types
pub mod transaction;
