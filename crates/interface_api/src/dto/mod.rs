//! Request and response bodies

pub mod analysis;
pub mod health;
pub mod upload;
