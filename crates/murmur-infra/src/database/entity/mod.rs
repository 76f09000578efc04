//! SeaORM entities mirroring the schema in `apps/migration`.

pub mod post;
pub mod rating;
pub mod user;
