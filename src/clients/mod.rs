//! Clients for services this one depends on.

pub mod account_client;
