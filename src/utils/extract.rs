// src/utils/extract.rs

//! `Json` and `Path` wrappers whose rejections go through `AppError`, so
//! malformed bodies and path segments get the same JSON error shape as
//! everything else.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
