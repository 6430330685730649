use std::sync::Arc;

use crate::pokeapi::PokemonSource;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) source: Arc<dyn PokemonSource>,
}
