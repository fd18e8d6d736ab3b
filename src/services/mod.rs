// src/services/mod.rs

//! Request-independent business rules. Handlers translate HTTP and sessions;
//! everything here works against the repository traits only.

pub mod auth;
pub mod contacts;
pub mod users;
