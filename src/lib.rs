pub mod api;
pub mod config;
pub mod pages;
pub mod scan;
pub mod session;
pub mod state;
pub mod store;
