//! GameService: the player store, the game session, and the save file behind one handle.
//!
//! Constructed once at startup and shared by the HTTP layer behind a single lock, so each
//! call below is atomic with respect to every other.

use crate::logic::{self, Leaderboard, Prediction};
use crate::models::{
    GameError, GameSession, Move, PlayerId, PlayerStats, PlayerStore, RoundSummary,
};
use crate::storage::Storage;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Result of registering a player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub id: PlayerId,
    /// False when the call returned an existing record (the CPU singleton).
    pub created: bool,
    pub stats: PlayerStats,
}

/// A round played against the CPU, with the prediction that chose its move.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CpuRound {
    pub cpu: Prediction,
    #[serde(flatten)]
    pub summary: RoundSummary,
}

pub struct GameService {
    players: PlayerStore,
    session: GameSession,
    storage: Option<Storage>,
}

impl Default for GameService {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl GameService {
    /// Service with no save file.
    pub fn in_memory() -> Self {
        Self {
            players: PlayerStore::new(),
            session: GameSession::new(),
            storage: None,
        }
    }

    /// Service backed by `storage`, starting from whatever it can load.
    pub fn with_storage(storage: Storage) -> Self {
        Self {
            players: storage.load(),
            session: GameSession::new(),
            storage: Some(storage),
        }
    }

    pub fn players(&self) -> &PlayerStore {
        &self.players
    }

    pub fn register(&mut self, name: &str, is_cpu: bool) -> Result<Registration, GameError> {
        let (id, created) = self.players.register(name, is_cpu)?;
        if created {
            log::info!("Registered player '{}' ({})", name.trim(), id);
            self.persist();
        }
        let stats = self.players.get(id)?.stats();
        Ok(Registration { id, created, stats })
    }

    pub fn stats(&self, id: PlayerId) -> Result<PlayerStats, GameError> {
        logic::player_stats(&self.players, id)
    }

    pub fn leaderboard(&self) -> Leaderboard {
        logic::leaderboard(&self.players)
    }

    pub fn start_game(&mut self, player1: PlayerId, player2: PlayerId) -> Result<(), GameError> {
        logic::start_game(&mut self.session, &self.players, player1, player2)?;
        self.persist();
        Ok(())
    }

    pub fn play_round(&mut self, choice1: Move, choice2: Move) -> Result<RoundSummary, GameError> {
        let summary = logic::play_round(&mut self.session, &mut self.players, choice1, choice2)?;
        self.persist();
        Ok(summary)
    }

    /// Predict the CPU's move against `opponent` from its stored history.
    ///
    /// Must be called before the round it is for is played.
    pub fn cpu_choice<R: Rng + ?Sized>(
        &self,
        opponent: PlayerId,
        rng: &mut R,
    ) -> Result<Prediction, GameError> {
        let player = self.players.get(opponent)?;
        if player.is_cpu {
            return Err(GameError::CpuOpponent);
        }
        let prediction = logic::predict(player, rng);
        log::debug!(
            "CPU vs {}: {:?} -> {} ({}%)",
            opponent,
            prediction.strategy_used,
            prediction.choice,
            prediction.confidence
        );
        Ok(prediction)
    }

    /// Play a round where one participant is the CPU: predict first, then play and record.
    pub fn play_cpu_round<R: Rng + ?Sized>(
        &mut self,
        human_choice: Move,
        rng: &mut R,
    ) -> Result<CpuRound, GameError> {
        if !self.session.game_active {
            return Err(GameError::NoActiveGame);
        }
        let (id1, id2) = self.session.participants().ok_or(GameError::NoActiveGame)?;
        let cpu_is_player1 = match (self.players.is_cpu(id1), self.players.is_cpu(id2)) {
            (true, false) => true,
            (false, true) => false,
            _ => return Err(GameError::NoCpuInGame),
        };
        let human = if cpu_is_player1 { id2 } else { id1 };

        let cpu = self.cpu_choice(human, rng)?;
        let summary = if cpu_is_player1 {
            self.play_round(cpu.choice, human_choice)?
        } else {
            self.play_round(human_choice, cpu.choice)?
        };
        Ok(CpuRound { cpu, summary })
    }

    pub fn game_state(&self) -> &GameSession {
        &self.session
    }

    /// Clear every player and the session. The CPU singleton is re-created.
    pub fn reset(&mut self) {
        self.players.clear();
        self.session = GameSession::new();
        log::info!("Leaderboard reset");
        self.persist();
    }

    fn persist(&self) {
        if let Some(storage) = &self.storage {
            if let Err(e) = storage.save(&self.players) {
                log::error!(
                    "Failed to save leaderboard to {}: {}",
                    storage.data_path().display(),
                    e
                );
            }
        }
    }
}
