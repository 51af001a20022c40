pub mod api;
pub mod career;
pub mod config;
pub mod db;
pub mod sanitize;
pub mod shutdown;
pub mod wizard;
