pub mod analysis;
pub mod charts;
pub mod dataset;
pub mod error;
pub mod report;

pub use dataset::{Island, NumericColumn, Penguin, PenguinTable, Sex, Species};
pub use error::PenguinError;
