pub mod config;
pub mod documents;
pub mod persistence;
pub mod security;
