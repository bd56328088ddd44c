pub mod detail;
mod error;
pub mod export;
pub mod format;
mod macros;
pub mod matrix;
pub mod model;
pub mod summary;
pub mod trend;

pub use crate::error::{Error, Result};
pub use crate::format::NumberFormat;
pub use crate::matrix::{Matrix, MatrixOptions, PeriodFilter, ProjectFilter, ViewMode};
pub use crate::model::{Cell, CellKey, DataModel, Payload, PeriodOrder, Point};
pub use crate::trend::Trend;
