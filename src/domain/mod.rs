pub mod auth;
pub mod company;
pub mod envelope;
pub mod listing;
pub mod session;
pub mod task;
pub mod user;
