use std::path::PathBuf;

use serde::Deserialize;

use crate::confirm::ConfirmState;
use crate::query::SortState;
use crate::store::RecordStore;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub workspace: Option<PathBuf>,
    pub store: Option<RecordStore>,
    pub search_term: String,
    pub sort: SortState,
    pub confirm: ConfirmState,
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            workspace: None,
            store: None,
            search_term: String::new(),
            sort: SortState::default(),
            confirm: ConfirmState::Idle,
        }
    }
}
