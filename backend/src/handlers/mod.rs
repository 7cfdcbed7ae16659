//! HTTP handlers for the Kitchen Command backend

pub mod health;
pub mod products;
pub mod reports;
pub mod sales;

pub use health::*;
pub use products::*;
pub use reports::*;
pub use sales::*;
