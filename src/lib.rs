pub mod api;
pub mod catalog;
pub mod config;
pub mod filters;
pub mod models;
pub mod query;
pub mod service;
pub mod storage;
pub mod types;

#[cfg(test)]
mod test_support;
