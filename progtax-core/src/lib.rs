pub mod calculations;
pub mod models;
pub mod parse;

pub use models::*;
pub use parse::parse_lenient_number;
