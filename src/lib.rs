pub mod aggregate;
pub mod config;
pub mod dashboard;
pub mod filter;
pub mod load;
pub mod render;
pub mod session;
pub mod table;
