use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::PokemonKey,
    protocol::{PokemonDetail, PokemonUpdate},
};
use tracing::debug;
use url::Url;

pub mod error;
pub mod handlers;
pub mod view;

pub use error::ClientError;
pub use handlers::{
    begin_lookup, finish_lookup, finish_update, prepare_update, reveal_update, search,
    split_list, submit_update, LookupRequest, UpdateRequest,
};
pub use view::{DisplayRegion, Phase, PokedexView, RenderedRecord, Tone};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

#[async_trait]
pub trait PokemonApi: Send + Sync {
    async fn fetch_pokemon(&self, key: &PokemonKey) -> Result<PokemonDetail, ClientError>;
    async fn update_pokemon(
        &self,
        key: &PokemonKey,
        update: &PokemonUpdate,
    ) -> Result<PokemonDetail, ClientError>;
}

/// HTTP client for `/api/pokemon/{name}`.
#[derive(Clone)]
pub struct PokedexClient {
    http: Client,
    server_url: Url,
}

impl PokedexClient {
    pub fn new(server_url: &str) -> Result<Self, ClientError> {
        let parsed = Url::parse(server_url).map_err(|e| ClientError::InvalidServerUrl {
            url: server_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ClientError::InvalidServerUrl {
                url: server_url.to_string(),
                reason: "url cannot carry a path".to_string(),
            });
        }
        Ok(Self {
            http: Client::new(),
            server_url: parsed,
        })
    }

    pub fn server_url(&self) -> &Url {
        &self.server_url
    }

    pub fn pokemon_url(&self, key: &PokemonKey) -> Url {
        let mut url = self.server_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["api", "pokemon", key.as_str()]);
        }
        url
    }
}

#[async_trait]
impl PokemonApi for PokedexClient {
    async fn fetch_pokemon(&self, key: &PokemonKey) -> Result<PokemonDetail, ClientError> {
        let url = self.pokemon_url(key);
        debug!(%url, "GET pokemon");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::NotFound {
                status: status.as_u16(),
            });
        }
        Ok(response.json().await?)
    }

    async fn update_pokemon(
        &self,
        key: &PokemonKey,
        update: &PokemonUpdate,
    ) -> Result<PokemonDetail, ClientError> {
        let url = self.pokemon_url(key);
        debug!(%url, "POST pokemon");
        let response = self.http.post(url).json(update).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UpdateFailed {
                status: status.as_u16(),
            });
        }
        Ok(response.json().await?)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
