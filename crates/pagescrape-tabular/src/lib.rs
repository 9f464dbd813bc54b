pub mod export;
pub mod load;

pub use export::export;
pub use load::{load_table, TableFormat};
