use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::actor::{Actor, ActorData, ActorId, Token, TokenId, TokenUpdate};
use crate::directory::ActorDirectory;
use crate::error::{StoreError, StoreResult};
use crate::ports::ActorRepository;

/// [`ActorRepository`] over an in-memory [`ActorDirectory`].
///
/// There is no sheet to redraw, so the `render` flag of
/// [`ActorRepository::delete_all_items`] is only logged.
#[derive(Debug, Default)]
pub struct InMemoryActorRepository {
    directory: RwLock<ActorDirectory>,
}

impl InMemoryActorRepository {
    /// An empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing directory.
    pub fn from_directory(directory: ActorDirectory) -> Self {
        Self {
            directory: RwLock::new(directory),
        }
    }

    /// A copy of the current directory contents.
    pub async fn snapshot(&self) -> ActorDirectory {
        self.directory.read().await.clone()
    }

    /// Place a token for an actor.
    pub async fn place_token(&self, actor_id: ActorId) -> StoreResult<TokenId> {
        self.directory.write().await.place_token(actor_id)
    }
}

#[async_trait]
impl ActorRepository for InMemoryActorRepository {
    async fn create_actor(&self, data: ActorData) -> StoreResult<Actor> {
        let actor = Actor::from_data(data);
        let mut dir = self.directory.write().await;
        let id = dir.add_actor(actor.clone());
        tracing::debug!(actor = %id, name = %actor.name, "actor created");
        Ok(actor)
    }

    async fn get_actor(&self, id: ActorId) -> StoreResult<Actor> {
        self.directory
            .read()
            .await
            .get_actor(id)
            .cloned()
            .ok_or(StoreError::ActorNotFound(id))
    }

    async fn delete_all_items(&self, id: ActorId, render: bool) -> StoreResult<usize> {
        let removed = self.directory.write().await.clear_items(id)?;
        tracing::debug!(actor = %id, removed, render, "embedded items deleted");
        Ok(removed)
    }

    async fn update_actor(&self, id: ActorId, data: ActorData) -> StoreResult<Actor> {
        let mut dir = self.directory.write().await;
        dir.update_actor(id, data).cloned()
    }

    async fn active_tokens(&self, id: ActorId) -> StoreResult<Vec<Token>> {
        let dir = self.directory.read().await;
        if dir.get_actor(id).is_none() {
            return Err(StoreError::ActorNotFound(id));
        }
        Ok(dir.tokens_of(id).into_iter().cloned().collect())
    }

    async fn update_token(&self, id: TokenId, update: TokenUpdate) -> StoreResult<()> {
        self.directory.write().await.update_token(id, update)
    }
}
