//! Configuration module: exposes `Settings` and the sections it is built from.
//!
//! Loading lives in `config::load`, the schema and defaults in `config::schema`.

mod load;
mod schema;

pub use schema::*;
