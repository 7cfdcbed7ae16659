//! Domain models for the Kitchen Command inventory platform

mod product;
mod sale;

pub use product::*;
pub use sale::*;
