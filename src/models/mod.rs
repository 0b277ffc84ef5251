pub mod issue;
pub mod search;

pub use issue::*;
pub use search::*;
