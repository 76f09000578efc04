mod auth;
mod error;

pub use auth::Identity;
pub use error::AppResult;
