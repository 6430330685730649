use serde::{Deserialize, Serialize};

use crate::domain::PokedexNumber;

/// Record returned by `GET` and `POST /api/pokemon/{name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonDetail {
    pub name: String,
    pub abilities: Vec<String>,
    pub pokedex_number: PokedexNumber,
    pub sprites: Vec<String>,
    pub types: Vec<String>,
}

/// Body of `POST /api/pokemon/{name}`. Omitted fields keep the catalog value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abilities: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprites: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
}

/// Body of `GET /api/general?name=...`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonSummary {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralQuery {
    pub name: String,
}
