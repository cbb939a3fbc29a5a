pub mod bridge;
pub mod health;
