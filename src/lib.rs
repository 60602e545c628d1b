pub mod config;
pub mod dns;
pub mod ip;
pub mod notify;
pub mod reconcile;
