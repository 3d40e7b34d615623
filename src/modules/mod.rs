pub mod auth;
pub mod example;
