//! feiras-adapter-postgres - PostgreSQL 适配器

mod connection;
mod database;
mod market_repository;
mod model;
mod schema;
mod statements;

#[cfg(test)]
mod testing;

pub use connection::*;
pub use database::*;
pub use market_repository::*;
pub use model::*;
pub use schema::*;
pub use statements::*;
