pub mod user;

pub use user::{StoredPassword, User};
