use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::board::PlayerColor;
use crate::registry::generate_player_id;

pub const DEFAULT_IDENTITY_FILE: &str = ".chess-duel.json";

/// What a player keeps between runs: the last session, the color held there
/// and the participant id used to reclaim it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity {
    pub player_id: String,
    pub session_id: Option<String>,
    pub color: Option<PlayerColor>,
}

impl ClientIdentity {
    pub fn new() -> Self {
        Self {
            player_id: generate_player_id(),
            session_id: None,
            color: None,
        }
    }

    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading identity file {}", path.display()))?;
        let identity = serde_json::from_str(&raw)
            .with_context(|| format!("parsing identity file {}", path.display()))?;
        Ok(Some(identity))
    }

    pub fn load_or_new(path: &Path) -> Result<Self> {
        Ok(Self::load(path)?.unwrap_or_else(Self::new))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("writing identity file {}", path.display()))
    }

    pub fn remember(&mut self, session_id: &str, color: PlayerColor, player_id: &str) {
        self.session_id = Some(session_id.to_string());
        self.color = Some(color);
        self.player_id = player_id.to_string();
    }
}

impl Default for ClientIdentity {
    fn default() -> Self {
        Self::new()
    }
}
