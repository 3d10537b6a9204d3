mod diff;
mod repository;
mod revision;
mod user;
mod value;

pub use crate::error::{Error, Result};
pub use diff::Diff;
pub use repository::Repository;
pub use revision::Revision;
pub use user::User;
pub use value::{as_i64_lenient, values_of};
