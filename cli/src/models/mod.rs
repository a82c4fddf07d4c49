pub mod observation;
pub mod period;
pub mod records;
pub mod region;

pub use observation::*;
pub use period::*;
pub use records::*;
pub use region::*;
