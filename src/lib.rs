pub mod answer;
pub mod config;
pub mod db;
pub mod domain;
pub mod handlers;
pub mod paths;
pub mod services;
pub mod srs;
pub mod store;

#[cfg(test)]
pub mod testing;
