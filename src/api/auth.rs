// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

//! Bearer token authentication.
//!
//! Tokens come from `AUTH_TOKENS` and map to a caller id. Every request
//! except `/health` and `/metrics` must send `Authorization: Bearer <token>`.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use subtle::ConstantTimeEq;
use tracing::warn;

use super::AppState;
use crate::error::Error;

/// Registered bearer tokens and the caller each one stands for
#[derive(Debug, Clone, Default)]
pub struct TokenRegistry {
    entries: Vec<(Vec<u8>, i32)>,
}

impl TokenRegistry {
    pub fn new(tokens: &[(String, i32)]) -> Self {
        Self {
            entries: tokens
                .iter()
                .map(|(token, user_id)| (token.as_bytes().to_vec(), *user_id))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves a presented token to its caller id.
    ///
    /// Compares against every entry in constant time over equal-length
    /// buffers, so neither the match position nor the token length leaks.
    pub fn resolve(&self, presented: &str) -> Option<i32> {
        let presented = presented.as_bytes();
        let mut caller = None;

        for (expected, user_id) in &self.entries {
            let max_len = presented.len().max(expected.len());
            let mut padded_presented = vec![0u8; max_len];
            let mut padded_expected = vec![0u8; max_len];
            padded_presented[..presented.len()].copy_from_slice(presented);
            padded_expected[..expected.len()].copy_from_slice(expected);

            let bytes_match: bool = padded_presented.ct_eq(&padded_expected).into();
            if bytes_match && presented.len() == expected.len() && caller.is_none() {
                caller = Some(*user_id);
            }
        }
        caller
    }
}

/// Authenticated caller id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller(pub i32);

impl FromRequestParts<AppState> for Caller {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        let Some(header_value) = header_value else {
            warn!(reason = "missing_authorization_header", "Authentication failed");
            return Err(Error::Unauthorized);
        };

        let token = header_value
            .strip_prefix("Bearer ")
            .unwrap_or(header_value)
            .trim();

        match state.tokens.resolve(token) {
            Some(user_id) => Ok(Caller(user_id)),
            None => {
                warn!(reason = "invalid_token", "Authentication failed");
                Err(Error::Unauthorized)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> TokenRegistry {
        TokenRegistry::new(&[("alpha-token".into(), 1), ("beta".into(), 2)])
    }

    #[test]
    fn resolves_known_tokens() {
        let tokens = registry();
        assert_eq!(tokens.resolve("alpha-token"), Some(1));
        assert_eq!(tokens.resolve("beta"), Some(2));
    }

    #[test]
    fn rejects_prefixes_and_unknown_tokens() {
        let tokens = registry();
        assert_eq!(tokens.resolve("alpha"), None);
        assert_eq!(tokens.resolve("beta-extra"), None);
        assert_eq!(tokens.resolve(""), None);
    }

    #[test]
    fn empty_registry_rejects_everything() {
        let tokens = TokenRegistry::default();
        assert!(tokens.is_empty());
        assert_eq!(tokens.resolve("anything"), None);
    }
}
