// src/models/mod.rs

pub mod contact;
pub mod user;
