use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::actor::{Actor, ActorData, ActorId, Token, TokenId, TokenUpdate};
use crate::error::{StoreError, StoreResult};

/// The in-memory actor directory. Owns all actors and their placed tokens.
#[derive(Debug, Clone, Default)]
pub struct ActorDirectory {
    actors: HashMap<ActorId, Actor>,
    tokens: HashMap<TokenId, Token>,

    // Indexes
    order: Vec<ActorId>,
    by_name_lower: HashMap<String, Vec<ActorId>>,
    tokens_by_actor: HashMap<ActorId, Vec<TokenId>>,
}

/// On-disk form of a directory. Indexes are rebuilt on load.
#[derive(Serialize, Deserialize, Default)]
struct Snapshot {
    actors: Vec<Actor>,
    tokens: Vec<Token>,
}

impl ActorDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Actor CRUD
    // -----------------------------------------------------------------------

    /// Add an actor. Returns its ID.
    pub fn add_actor(&mut self, actor: Actor) -> ActorId {
        let id = actor.id;
        self.order.push(id);
        self.by_name_lower
            .entry(actor.name.to_lowercase())
            .or_default()
            .push(id);
        self.actors.insert(id, actor);
        id
    }

    /// Get an actor by ID.
    pub fn get_actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    /// Find the first-added actor with the given name (case-insensitive).
    pub fn find_by_name(&self, name: &str) -> Option<&Actor> {
        self.by_name_lower
            .get(&name.to_lowercase())
            .and_then(|ids| ids.first())
            .and_then(|id| self.actors.get(id))
    }

    /// Remove every embedded item from an actor. Returns how many were removed.
    pub fn clear_items(&mut self, id: ActorId) -> StoreResult<usize> {
        let actor = self.actors.get_mut(&id).ok_or(StoreError::ActorNotFound(id))?;
        let removed = actor.items.len();
        actor.items.clear();
        Ok(removed)
    }

    /// Apply update data to an actor, keeping the name index current.
    pub fn update_actor(&mut self, id: ActorId, data: ActorData) -> StoreResult<&Actor> {
        let old_name = self
            .actors
            .get(&id)
            .map(|a| a.name.clone())
            .ok_or(StoreError::ActorNotFound(id))?;
        if old_name.to_lowercase() != data.name.to_lowercase() {
            self.unindex_name(&old_name, id);
            self.by_name_lower
                .entry(data.name.to_lowercase())
                .or_default()
                .push(id);
        }
        let actor = self.actors.get_mut(&id).ok_or(StoreError::ActorNotFound(id))?;
        actor.apply(data);
        Ok(actor)
    }

    fn unindex_name(&mut self, name: &str, id: ActorId) {
        let key = name.to_lowercase();
        if let Some(ids) = self.by_name_lower.get_mut(&key) {
            ids.retain(|a| *a != id);
            if ids.is_empty() {
                self.by_name_lower.remove(&key);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Tokens
    // -----------------------------------------------------------------------

    /// Place a token for an actor from its prototype token.
    pub fn place_token(&mut self, actor_id: ActorId) -> StoreResult<TokenId> {
        let actor = self
            .actors
            .get(&actor_id)
            .ok_or(StoreError::ActorNotFound(actor_id))?;
        let token = Token {
            id: TokenId::new(),
            actor_id,
            name: actor.prototype_token.name.clone(),
            img: actor.img.clone(),
            disposition: actor.prototype_token.disposition,
        };
        let id = token.id;
        self.tokens_by_actor.entry(actor_id).or_default().push(id);
        self.tokens.insert(id, token);
        Ok(id)
    }

    /// All placed tokens of an actor.
    pub fn tokens_of(&self, actor_id: ActorId) -> Vec<&Token> {
        self.tokens_by_actor
            .get(&actor_id)
            .map(|ids| ids.iter().filter_map(|id| self.tokens.get(id)).collect())
            .unwrap_or_default()
    }

    /// Overwrite a token's displayed name and image.
    pub fn update_token(&mut self, id: TokenId, update: TokenUpdate) -> StoreResult<()> {
        let token = self.tokens.get_mut(&id).ok_or(StoreError::TokenNotFound(id))?;
        token.name = update.name;
        token.img = update.img;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Queries & statistics
    // -----------------------------------------------------------------------

    /// All actors, in insertion order.
    pub fn all_actors(&self) -> impl Iterator<Item = &Actor> {
        self.order.iter().filter_map(|id| self.actors.get(id))
    }

    /// Number of actors.
    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    /// Number of placed tokens.
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Serialize the directory to pretty JSON.
    pub fn to_json(&self) -> StoreResult<String> {
        let snapshot = Snapshot {
            actors: self.all_actors().cloned().collect(),
            tokens: self
                .all_actors()
                .flat_map(|a| self.tokens_of(a.id))
                .cloned()
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }

    /// Rebuild a directory from JSON produced by [`ActorDirectory::to_json`].
    pub fn from_json(json: &str) -> StoreResult<Self> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        let mut dir = Self::new();
        for actor in snapshot.actors {
            dir.add_actor(actor);
        }
        for token in snapshot.tokens {
            if !dir.actors.contains_key(&token.actor_id) {
                continue;
            }
            dir.tokens_by_actor
                .entry(token.actor_id)
                .or_default()
                .push(token.id);
            dir.tokens.insert(token.id, token);
        }
        Ok(dir)
    }

    /// Load a directory from a file. A missing file yields an empty directory.
    pub fn load(path: &Path) -> StoreResult<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Write the directory to a file.
    pub fn save(&self, path: &Path) -> StoreResult<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
