pub mod config;
pub mod db;
pub mod mcp;
pub mod ops;

#[cfg(test)]
mod config_test;
