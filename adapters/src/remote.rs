//! HTTP-backed identity adapter.
//!
//! This file contains the implementation of the `IdentityAdapter` trait for a
//! real identity backend. The backend is asked to validate the bearer token at
//! `GET {base_url}/auth/validate` and answers with the same `{ "valid": .. }`
//! document the demo adapter produces.

use crate::errors::AdapterError;
use crate::models::Validation;
use crate::IdentityAdapter;
use async_trait::async_trait;
use log::warn;
use reqwest::{Client, StatusCode};

#[derive(Debug, Clone)]
pub struct RemoteAdapter {
    client: Client,
    base_url: String,
}

impl RemoteAdapter {
    pub fn new(base_url: impl Into<String>) -> Result<Self, AdapterError> {
        let client = Client::builder()
            .build()
            .map_err(|err| AdapterError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Performs the validation call, surfacing transport and decode failures.
    pub async fn fetch(&self, token: &str) -> Result<Validation, AdapterError> {
        let url = format!("{}/auth/validate", self.base_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|err| AdapterError::Transport(err.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Ok(Validation::Invalid);
        }
        if !status.is_success() {
            return Err(AdapterError::Status(status.as_u16()));
        }

        response
            .json::<Validation>()
            .await
            .map_err(|err| AdapterError::Decode(err.to_string()))
    }
}

#[async_trait]
impl IdentityAdapter for RemoteAdapter {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn validate(&self, token: Option<&str>) -> Validation {
        let Some(token) = token else {
            return Validation::Invalid;
        };
        match self.fetch(token).await {
            Ok(validation) => validation,
            Err(err) => {
                warn!("remote validation against {} failed: {err}", self.base_url);
                Validation::Invalid
            }
        }
    }

    async fn check(&self, token: Option<&str>) -> Result<Validation, AdapterError> {
        match token {
            Some(token) => self.fetch(token).await,
            None => Ok(Validation::Invalid),
        }
    }
}
