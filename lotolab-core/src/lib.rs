pub mod analysis;
pub mod config;
pub mod error;
pub mod models;
pub mod recommend;
pub mod report;
pub mod sampler;

pub use error::{LotoError, Result};
pub use models::{Combination, Draw, DrawSet, RawDraw};
