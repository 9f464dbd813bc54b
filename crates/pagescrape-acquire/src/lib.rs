pub mod extract;
pub mod fetch;
pub mod output;

pub use extract::extract_text;
pub use fetch::fetch_page;
