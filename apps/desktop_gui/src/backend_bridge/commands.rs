//! Backend commands queued from UI to backend worker.

use client_core::{LookupRequest, UpdateRequest};

#[derive(Debug)]
pub enum BackendCommand {
    Lookup(LookupRequest),
    Update(UpdateRequest),
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Lookup(_) => "lookup",
            Self::Update(_) => "update",
        }
    }
}
