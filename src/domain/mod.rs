pub mod models;
pub mod ports;
pub mod services;
pub mod status;
pub mod time_math;

mod error;

pub use error::*;
