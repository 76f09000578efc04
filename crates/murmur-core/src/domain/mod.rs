//! Domain entities - the core business objects.

mod post;
mod rating;
mod user;

pub use post::{NewPost, Page, Post, PostFilter, PostUpdate, PostWithLikes};
pub use rating::Rating;
pub use user::{NewUser, User, validate_email, validate_password};
