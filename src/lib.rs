// Library for the binary and tests

pub mod config;
pub mod error;
pub mod fetcher;
pub mod history;
pub mod models;
pub mod overlay_window;
pub mod provider;
pub mod reconcile;
pub mod routes;
pub mod settings_file;
pub mod store;
pub mod surface;
pub mod sysinfo_repo;
