//! The three user actions: lookup, reveal the edit panel, submit an update.
//!
//! Network-bound actions are split into a synchronous `begin`/`prepare` step
//! that captures the request and a `finish` step that applies the response,
//! so a front end can run the request wherever it likes. [`search`] and
//! [`submit_update`] chain both halves around a [`PokemonApi`] call.

use shared::{
    domain::PokemonKey,
    protocol::{PokemonDetail, PokemonUpdate},
};
use tracing::{info, warn};

use crate::{
    error::ClientError,
    view::{Phase, PokedexView},
    PokemonApi,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub key: PokemonKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    pub key: PokemonKey,
    pub payload: PokemonUpdate,
}

pub fn begin_lookup(view: &mut PokedexView) -> LookupRequest {
    let key = PokemonKey::new(&view.identifier_input);
    view.searched = Some(key.clone());
    view.show_searching();
    LookupRequest { key }
}

pub fn finish_lookup(view: &mut PokedexView, result: Result<PokemonDetail, ClientError>) {
    match result {
        Ok(detail) => {
            info!(name = %detail.name, "lookup: record found");
            view.show_record(detail);
            view.phase = Phase::Found;
            view.update_trigger_visible = true;
        }
        Err(err) => {
            warn!(error = %err, "lookup: failed");
            view.show_inline_error(err.to_string());
            view.phase = Phase::NotFound;
            view.update_trigger_visible = false;
        }
    }
    view.update_fields_visible = false;
}

pub fn reveal_update(view: &mut PokedexView) {
    view.abilities_input.clear();
    view.types_input.clear();
    view.update_fields_visible = true;
    view.update_trigger_visible = false;
    view.phase = Phase::Editing;
}

/// Captures the edited fields for the last searched key. Returns `None`
/// when nothing has been searched yet.
pub fn prepare_update(view: &PokedexView) -> Option<UpdateRequest> {
    let Some(key) = view.searched.clone() else {
        warn!("update: submit without a searched pokemon");
        return None;
    };
    Some(UpdateRequest {
        key,
        payload: PokemonUpdate {
            abilities: Some(split_list(&view.abilities_input)),
            sprites: Some(Vec::new()),
            types: Some(split_list(&view.types_input)),
        },
    })
}

pub fn finish_update(view: &mut PokedexView, result: Result<PokemonDetail, ClientError>) {
    match result {
        Ok(detail) => {
            info!(name = %detail.name, "update: record replaced");
            view.show_record(detail);
            view.update_fields_visible = false;
            view.phase = Phase::Updated;
        }
        Err(err) => {
            warn!(error = %err, "update: failed");
            view.alert = Some(err.to_string());
            view.phase = Phase::UpdateFailed;
        }
    }
}

/// Splits a comma separated field and trims every item. Empty items are
/// kept, so an empty field yields a single empty string.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',').map(|item| item.trim().to_string()).collect()
}

pub async fn search(view: &mut PokedexView, api: &dyn PokemonApi) {
    let request = begin_lookup(view);
    let result = api.fetch_pokemon(&request.key).await;
    finish_lookup(view, result);
}

pub async fn submit_update(view: &mut PokedexView, api: &dyn PokemonApi) {
    let Some(request) = prepare_update(view) else {
        return;
    };
    let result = api.update_pokemon(&request.key, &request.payload).await;
    finish_update(view, result);
}

#[cfg(test)]
#[path = "tests/handlers_tests.rs"]
mod tests;
