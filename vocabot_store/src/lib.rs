#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Relational vocabulary store backed by sea-orm.
//!
//! Holds the global word list, the user registry and the per-user
//! memberships that make up each quiz pool.

mod import;
mod sampling;
mod schema;
mod store;

pub use import::parse_word_list;
pub use schema::create_tables;
pub use store::SeaOrmStore;
