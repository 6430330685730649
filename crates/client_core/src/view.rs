//! View state for the lookup/update screen and the record renderer.
//!
//! [`PokedexView`] is the only owner of what the screen shows. Front ends
//! bind their widgets to the public input fields and read everything else
//! through accessors; transitions go through [`crate::handlers`].

use std::fmt;

use shared::{domain::PokemonKey, protocol::PokemonDetail};

pub const PLACEHOLDER_SPRITE: &str = "default-image.png";
pub const SEARCHING_TEXT: &str = "Searching...";

/// Screen progression. `Updated` and `UpdateFailed` are only reachable
/// through `Editing`, which is only reachable from `Found`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Initial,
    Searching,
    Found,
    NotFound,
    Editing,
    Updated,
    UpdateFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Normal,
    Error,
}

/// A record as it appears in the display region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRecord {
    pub heading: String,
    pub image_src: String,
    pub image_alt: String,
    pub abilities_line: String,
    pub pokedex_line: String,
    pub types_line: String,
}

impl RenderedRecord {
    pub fn from_detail(detail: &PokemonDetail) -> Self {
        let image_src = detail
            .sprites
            .first()
            .cloned()
            .unwrap_or_else(|| PLACEHOLDER_SPRITE.to_string());
        Self {
            heading: capitalize(&detail.name),
            image_src,
            image_alt: detail.name.clone(),
            abilities_line: format!("Abilities: {}", detail.abilities.join(", ")),
            pokedex_line: format!("Pokédex Number: {}", detail.pokedex_number),
            types_line: format!("Type: {}", detail.types.join(", ")),
        }
    }

    pub fn uses_placeholder(&self) -> bool {
        self.image_src == PLACEHOLDER_SPRITE
    }
}

impl fmt::Display for RenderedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.heading)?;
        writeln!(f, "[{}] {}", self.image_alt, self.image_src)?;
        writeln!(f, "{}", self.abilities_line)?;
        writeln!(f, "{}", self.pokedex_line)?;
        write!(f, "{}", self.types_line)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DisplayRegion {
    #[default]
    Empty,
    Searching,
    Record(RenderedRecord),
    Error(String),
}

impl DisplayRegion {
    pub fn tone(&self) -> Tone {
        match self {
            Self::Error(_) => Tone::Error,
            _ => Tone::Normal,
        }
    }
}

impl fmt::Display for DisplayRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Searching => f.write_str(SEARCHING_TEXT),
            Self::Record(record) => record.fmt(f),
            Self::Error(message) => f.write_str(message),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PokedexView {
    pub identifier_input: String,
    pub abilities_input: String,
    pub types_input: String,
    pub(crate) display: DisplayRegion,
    pub(crate) phase: Phase,
    pub(crate) update_trigger_visible: bool,
    pub(crate) update_fields_visible: bool,
    pub(crate) alert: Option<String>,
    pub(crate) searched: Option<PokemonKey>,
    pub(crate) record: Option<PokemonDetail>,
}

impl PokedexView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display(&self) -> &DisplayRegion {
        &self.display
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn update_trigger_visible(&self) -> bool {
        self.update_trigger_visible
    }

    pub fn update_fields_visible(&self) -> bool {
        self.update_fields_visible
    }

    /// Pending blocking alert, if any. Front ends must show it modally and
    /// call [`PokedexView::dismiss_alert`] once acknowledged.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn searched_key(&self) -> Option<&PokemonKey> {
        self.searched.as_ref()
    }

    /// Last record received from the server.
    pub fn record(&self) -> Option<&PokemonDetail> {
        self.record.as_ref()
    }

    pub(crate) fn show_searching(&mut self) {
        self.display = DisplayRegion::Searching;
        self.phase = Phase::Searching;
    }

    pub(crate) fn show_record(&mut self, detail: PokemonDetail) {
        self.display = DisplayRegion::Record(RenderedRecord::from_detail(&detail));
        self.record = Some(detail);
    }

    pub(crate) fn show_inline_error(&mut self, message: String) {
        self.display = DisplayRegion::Error(message);
        self.record = None;
    }
}

/// Upper-cases the first character and leaves the rest untouched.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
