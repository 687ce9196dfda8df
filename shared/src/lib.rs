//! Shared types for the learning center server.
//!
//! Holds the data models exchanged between the API layer and clients, plus a
//! couple of small utilities (timestamps, ID generation). DB row derives are
//! behind the `db` feature so non-server consumers don't pull in sqlx.

pub mod models;
pub mod util;
