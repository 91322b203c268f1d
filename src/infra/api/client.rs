//! HTTP client for the PokeAPI REST service.

use super::PokemonSource;
use super::dto::{PokemonDetailResponse, PokemonListResponse};
use crate::domain::{
    FALLBACK_TYPE, FetchError, Page, PokemonDetail, PokemonId, PokemonSummary,
};
use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub struct PokeApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl PokeApiClient {
    /// Create a new client for the given API root, e.g. `https://pokeapi.co/api/v2`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("build reqwest client")?;
        Ok(Self::with_client(client, base_url))
    }

    /// Use a preconfigured reqwest client (proxy, TLS or timeout settings).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }

    async fn fetch_detail_response(&self, id: PokemonId) -> Result<PokemonDetailResponse, FetchError> {
        let url = format!("{}/pokemon/{}", self.base_url, id);
        self.get_json(&url).await
    }

    /// Type tags for one entry; a failed lookup degrades to the fallback type.
    async fn resolve_types(&self, id: PokemonId) -> Vec<String> {
        match self.fetch_detail_response(id).await {
            Ok(detail) => {
                let types = detail.type_names();
                if types.is_empty() {
                    vec![FALLBACK_TYPE.to_string()]
                } else {
                    types
                }
            }
            Err(err) => {
                log::warn!("Type lookup for #{} failed, using fallback: {}", id, err);
                vec![FALLBACK_TYPE.to_string()]
            }
        }
    }
}

#[async_trait]
impl PokemonSource for PokeApiClient {
    async fn fetch_page(&self, offset: u32, limit: u32) -> Result<Page, FetchError> {
        let url = format!(
            "{}/pokemon?offset={}&limit={}",
            self.base_url, offset, limit
        );
        log::debug!("Fetching page offset={} limit={}", offset, limit);
        let response: PokemonListResponse = self.get_json(&url).await?;
        let entries = response.entries(offset);

        let types = futures::future::join_all(
            entries.iter().map(|(id, _)| self.resolve_types(*id)),
        )
        .await;

        let items = entries
            .into_iter()
            .zip(types)
            .map(|((id, name), types)| PokemonSummary::new(id, name, types))
            .collect::<Vec<_>>();

        log::debug!(
            "Fetched {} Pokémon at offset {} (total {})",
            items.len(),
            offset,
            response.count
        );

        Ok(Page {
            items,
            total_count: response.count,
            next_page_token: response.next,
        })
    }

    async fn fetch_detail(&self, id: PokemonId) -> Result<PokemonDetail, FetchError> {
        log::debug!("Fetching detail for #{}", id);
        Ok(self.fetch_detail_response(id).await?.into_detail())
    }
}
