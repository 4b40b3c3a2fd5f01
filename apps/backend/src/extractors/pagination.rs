use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use serde::Deserialize;
use std::future::{ready, Ready};

use crate::error::AppError;
use crate::errors::ErrorCode;

pub const DEFAULT_LIMIT: u64 = 20;
pub const MAX_LIMIT: u64 = 100;

#[derive(Deserialize)]
struct RawPage {
    limit: Option<u64>,
    offset: Option<u64>,
}

/// `?limit&offset`, with the limit clamped to `1..=MAX_LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u64,
    pub offset: u64,
}

impl Page {
    pub fn new(limit: Option<u64>, offset: Option<u64>) -> Self {
        Self {
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
            offset: offset.unwrap_or(0),
        }
    }
}

impl FromRequest for Page {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let parsed = web::Query::<RawPage>::from_query(req.query_string())
            .map(|q| Page::new(q.limit, q.offset))
            .map_err(|_| {
                AppError::bad_request(
                    ErrorCode::BadRequest,
                    "limit and offset must be non-negative integers",
                )
            });
        ready(parsed)
    }
}
