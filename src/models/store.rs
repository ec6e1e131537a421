//! PlayerStore: every registered player, keyed by id.

use crate::models::error::GameError;
use crate::models::player::{Player, PlayerId, CPU_PLAYER_ID};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Single source of truth for player records. Serialized as one JSON object keyed by id.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerStore {
    players: HashMap<PlayerId, Player>,
}

impl PlayerStore {
    /// Empty store holding only the CPU singleton.
    pub fn new() -> Self {
        let mut store = Self::default();
        store.ensure_cpu();
        store
    }

    /// Build a store from loaded records.
    ///
    /// Records filed under a key other than their own id are dropped. Only the record at
    /// [`CPU_PLAYER_ID`] may be the CPU: a human there is replaced by a fresh CPU, and any other
    /// record claiming to be a CPU becomes a human. Each record is then normalized.
    pub fn from_records(records: HashMap<PlayerId, Player>) -> Self {
        let mut players = HashMap::with_capacity(records.len());
        for (key, mut p) in records {
            if key != p.id {
                log::warn!(
                    "Dropping record for '{}' stored under key {} (id {})",
                    p.name,
                    key,
                    p.id
                );
                continue;
            }
            if key == CPU_PLAYER_ID {
                if !p.is_cpu {
                    log::warn!("Replacing non-CPU record '{}' at the CPU id", p.name);
                    p = Player::cpu();
                }
            } else if p.is_cpu {
                log::warn!(
                    "Record '{}' ({}) is not the CPU singleton, loading it as human",
                    p.name,
                    key
                );
                p.is_cpu = false;
            }
            p.normalize();
            players.insert(key, p);
        }
        let mut store = Self { players };
        store.ensure_cpu();
        store
    }

    /// Insert the CPU singleton unless it already exists.
    pub fn ensure_cpu(&mut self) {
        self.players
            .entry(CPU_PLAYER_ID)
            .or_insert_with(Player::cpu);
    }

    /// Register a player and return its id plus whether a new record was created.
    ///
    /// Humans always get a fresh record, even when the name is already taken. The CPU is a
    /// singleton, so registering it again returns the existing id.
    pub fn register(&mut self, name: &str, is_cpu: bool) -> Result<(PlayerId, bool), GameError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::EmptyName);
        }
        if is_cpu {
            let created = !self.players.contains_key(&CPU_PLAYER_ID);
            self.ensure_cpu();
            return Ok((CPU_PLAYER_ID, created));
        }
        let player = Player::new(name);
        let id = player.id;
        self.players.insert(id, player);
        Ok((id, true))
    }

    pub fn get(&self, id: PlayerId) -> Result<&Player, GameError> {
        self.players.get(&id).ok_or(GameError::PlayerNotFound(id))
    }

    pub fn get_mut(&mut self, id: PlayerId) -> Result<&mut Player, GameError> {
        self.players
            .get_mut(&id)
            .ok_or(GameError::PlayerNotFound(id))
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.contains_key(&id)
    }

    pub fn is_cpu(&self, id: PlayerId) -> bool {
        self.players.get(&id).is_some_and(|p| p.is_cpu)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    /// Drop every record and re-create the CPU singleton.
    pub fn clear(&mut self) {
        self.players.clear();
        self.ensure_cpu();
    }
}
