pub mod request;
pub mod scan_result;
pub mod vulnerability;

pub use request::*;
pub use scan_result::*;
pub use vulnerability::*;
