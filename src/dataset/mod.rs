mod penguin;
mod table;

pub use penguin::{Island, NumericColumn, Penguin, Sex, Species};
pub use table::PenguinTable;
