pub mod app_state;
pub mod config;
pub mod constants;
pub mod crypto;
pub mod errors;
pub mod host;
pub mod models;
pub mod notifications;
pub mod repositories;
pub mod services;
pub mod session;
pub mod storage;

#[cfg(test)]
pub mod test_utils;
