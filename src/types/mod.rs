pub mod gps;
pub mod heading;
pub mod options;
pub mod record;
pub mod report;

pub use gps::*;
pub use heading::*;
pub use options::*;
pub use record::*;
pub use report::*;
