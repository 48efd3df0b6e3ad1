pub mod tokens;
pub mod users;

pub use tokens::*;
pub use users::*;
