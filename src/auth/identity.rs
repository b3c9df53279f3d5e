//! Caller identification by claimed user id.
//!
//! There is no session or signature: whoever sends `X-User-ID: 5` (or
//! `?user_id=5`) acts as user 5.

use std::collections::HashMap;
use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};

use crate::api::errors::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ID_QUERY_PARAM: &str = "user_id";

/// Parses a claimed user id; only positive integers count.
pub fn parse_user_id(raw: &str) -> Option<i32> {
    raw.parse::<i32>().ok().filter(|id| *id > 0)
}

/// Resolve the caller's id from the header, then the query string. Returns 0
/// when neither carries a usable id.
pub fn identify(parts: &Parts) -> i32 {
    let from_header = parts
        .headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_user_id);

    if let Some(user_id) = from_header {
        return user_id;
    }

    Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
        .ok()
        .and_then(|Query(params)| params.get(USER_ID_QUERY_PARAM).and_then(|v| parse_user_id(v)))
        .unwrap_or(0)
}

/// Whatever identity the request claims, possibly none (id 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Caller(identify(parts)))
    }
}

/// A caller with a usable id. Extraction fails with `401` otherwise, so
/// handlers taking this never reach the store for anonymous requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub i32);

impl AuthenticatedUser {
    pub fn id(&self) -> i32 {
        self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match identify(parts) {
            0 => Err(ApiError::Unauthorized),
            user_id => Ok(AuthenticatedUser(user_id)),
        }
    }
}
