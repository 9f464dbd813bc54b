pub mod error;
pub mod request;
pub mod table;
pub mod merge;

pub use error::*;
pub use request::*;
pub use table::*;
