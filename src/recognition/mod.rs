pub mod client;
pub mod error;
pub mod fal;

pub use client::*;
pub use error::*;
pub use fal::*;
