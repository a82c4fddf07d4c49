pub mod aggregation;
pub mod date;
pub mod geo;
pub mod logger;
pub mod merge;
pub mod stats;

pub use aggregation::*;
pub use date::*;
pub use geo::*;
pub use logger::*;
pub use merge::*;
pub use stats::*;
