//! Upstream Pokémon catalog access and the projection into wire records.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shared::{
    domain::PokedexNumber,
    protocol::{PokemonDetail, PokemonUpdate},
};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_CATALOG_URL: &str = "https://pokeapi.co/api/v2";

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("upstream catalog answered with status {status}")]
    Status { status: u16 },
    #[error("upstream catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid catalog url: {0}")]
    Url(#[from] url::ParseError),
    #[error("catalog url '{0}' cannot carry path segments")]
    NotABase(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedResource {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbilitySlot {
    pub ability: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamSprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub back_default: Option<String>,
}

/// Subset of the catalog's pokemon resource that the API exposes.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamPokemon {
    pub id: i64,
    pub name: String,
    pub abilities: Vec<AbilitySlot>,
    #[serde(default)]
    pub sprites: UpstreamSprites,
    pub types: Vec<TypeSlot>,
}

impl UpstreamPokemon {
    pub fn ability_names(&self) -> Vec<String> {
        self.abilities
            .iter()
            .map(|slot| slot.ability.name.clone())
            .collect()
    }

    pub fn type_names(&self) -> Vec<String> {
        self.types.iter().map(|slot| slot.kind.name.clone()).collect()
    }

    /// Front sprite first, then back; missing entries are skipped.
    pub fn sprite_urls(&self) -> Vec<String> {
        [&self.sprites.front_default, &self.sprites.back_default]
            .into_iter()
            .flatten()
            .cloned()
            .collect()
    }

    pub fn into_detail(self) -> PokemonDetail {
        self.with_update(PokemonUpdate::default())
    }

    /// Applies an edit on top of the catalog data. Sprites always come from
    /// the catalog; nothing is written back.
    pub fn with_update(self, update: PokemonUpdate) -> PokemonDetail {
        let abilities = update.abilities.unwrap_or_else(|| self.ability_names());
        let types = update.types.unwrap_or_else(|| self.type_names());
        PokemonDetail {
            sprites: self.sprite_urls(),
            pokedex_number: PokedexNumber(self.id),
            name: self.name,
            abilities,
            types,
        }
    }
}

#[async_trait]
pub trait PokemonSource: Send + Sync {
    async fn fetch(&self, name_or_id: &str) -> Result<UpstreamPokemon, SourceError>;

    /// Canonical catalog URL for a pokedex entry.
    fn resource_url(&self, number: PokedexNumber) -> String;
}

pub struct PokeApiSource {
    http: Client,
    base_url: Url,
}

impl PokeApiSource {
    pub fn new(base_url: &str) -> Result<Self, SourceError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(SourceError::NotABase(base_url.to_string()));
        }
        Ok(Self {
            http: Client::new(),
            base_url,
        })
    }

    fn pokemon_url(&self, segment: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("pokemon").push(segment);
        }
        url
    }
}

#[async_trait]
impl PokemonSource for PokeApiSource {
    async fn fetch(&self, name_or_id: &str) -> Result<UpstreamPokemon, SourceError> {
        let url = self.pokemon_url(name_or_id);
        debug!(%url, "catalog: fetching pokemon");
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            warn!(name_or_id, status = status.as_u16(), "catalog: lookup failed");
            return Err(SourceError::Status {
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }

    fn resource_url(&self, number: PokedexNumber) -> String {
        let mut url = self.pokemon_url(&number.to_string());
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push("");
        }
        url.to_string()
    }
}

#[cfg(test)]
#[path = "tests/pokeapi_tests.rs"]
mod tests;
