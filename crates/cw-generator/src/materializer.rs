//! Writing assembled characters to the actor store.

use std::sync::Arc;

use cw_core::actor::{Abilities, ActorSystem, PrototypeToken, Resource};
use cw_core::{Actor, ActorData, ActorId, ActorRepository, TokenUpdate};

use crate::error::GenerationResult;
use crate::record::CharacterRecord;

/// Actor type given to every generated character.
pub const CHARACTER_TYPE: &str = "character";

/// Map a record onto actor data.
///
/// Abilities and hit protection start at their maximum. The prototype token
/// is friendly, linked to the actor and has vision.
pub fn character_to_actor_data(record: CharacterRecord) -> ActorData {
    let CharacterRecord {
        name,
        hp,
        gold,
        abilities,
        background,
        biography,
        items,
    } = record;

    ActorData {
        token: PrototypeToken::friendly(&name),
        name,
        actor_type: CHARACTER_TYPE.to_string(),
        system: ActorSystem {
            abilities: Abilities {
                strength: Resource::full(abilities.strength),
                dexterity: Resource::full(abilities.dexterity),
                willpower: Resource::full(abilities.willpower),
            },
            hp: Resource::full(hp),
            background,
            biography,
            gold,
        },
        items,
    }
}

/// Persists character records as actors.
pub struct CharacterMaterializer {
    actors: Arc<dyn ActorRepository>,
}

impl CharacterMaterializer {
    /// Create a materializer over an actor repository.
    pub fn new(actors: Arc<dyn ActorRepository>) -> Self {
        Self { actors }
    }

    /// Persist the record as a new actor.
    pub async fn create_new(&self, record: CharacterRecord) -> GenerationResult<Actor> {
        let actor = self
            .actors
            .create_actor(character_to_actor_data(record))
            .await?;
        tracing::info!(actor = %actor.id, name = %actor.name, "created character actor");
        Ok(actor)
    }

    /// Overwrite an existing actor with the record.
    ///
    /// Every embedded item is deleted first, so the actor ends up holding
    /// exactly the record's items. Placed tokens are then renamed to match.
    pub async fn regenerate(&self, id: ActorId, record: CharacterRecord) -> GenerationResult<Actor> {
        let removed = self.actors.delete_all_items(id, false).await?;
        let actor = self
            .actors
            .update_actor(id, character_to_actor_data(record))
            .await?;

        let tokens = self.actors.active_tokens(id).await?;
        for token in &tokens {
            self.actors
                .update_token(
                    token.id,
                    TokenUpdate {
                        name: actor.name.clone(),
                        img: actor.img.clone(),
                    },
                )
                .await?;
        }

        tracing::info!(
            actor = %id,
            name = %actor.name,
            removed,
            tokens = tokens.len(),
            "regenerated character actor"
        );
        Ok(actor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cw_core::ports::MockActorRepository;
    use cw_core::{ItemRecord, StoreError, Token, TokenDisposition, TokenId};

    use crate::error::GenerationError;
    use crate::record::AbilityScores;

    fn record() -> CharacterRecord {
        CharacterRecord {
            name: "Ardan Voss".to_string(),
            hp: 4,
            gold: 12,
            abilities: AbilityScores {
                strength: 11,
                dexterity: 8,
                willpower: 14,
            },
            background: "Alchemist".to_string(),
            biography: "A 34-year-old with silver hair.".to_string(),
            items: vec![ItemRecord::new("Torch", "item").with_quantity(1)],
        }
    }

    #[test]
    fn actor_data_starts_at_maximum() {
        let data = character_to_actor_data(record());
        assert_eq!(data.name, "Ardan Voss");
        assert_eq!(data.actor_type, "character");
        assert_eq!(data.system.abilities.strength, Resource { value: 11, max: 11 });
        assert_eq!(data.system.abilities.willpower.max, 14);
        assert_eq!(data.system.hp, Resource { value: 4, max: 4 });
        assert_eq!(data.system.gold, 12);
        assert_eq!(data.items.len(), 1);
    }

    #[test]
    fn prototype_token_is_friendly_linked_with_vision() {
        let token = character_to_actor_data(record()).token;
        assert_eq!(token.name, "Ardan Voss");
        assert_eq!(token.disposition, TokenDisposition::Friendly);
        assert!(token.actor_link);
        assert!(token.vision);
    }

    #[tokio::test]
    async fn regenerate_wipes_without_render_and_resyncs_tokens() {
        let existing = Actor::from_data(character_to_actor_data(record()));
        let id = existing.id;
        let token = Token {
            id: TokenId::new(),
            actor_id: id,
            name: "Old Name".to_string(),
            img: "old.png".to_string(),
            disposition: TokenDisposition::Friendly,
        };
        let token_id = token.id;

        let mut repo = MockActorRepository::new();
        repo.expect_delete_all_items()
            .times(1)
            .returning(|_, render| {
                assert!(!render, "item wipe must not trigger a render");
                Ok(3)
            });
        repo.expect_update_actor()
            .times(1)
            .returning(move |_, data| {
                let mut actor = existing.clone();
                actor.items.clear();
                actor.apply(data);
                Ok(actor)
            });
        repo.expect_active_tokens()
            .times(1)
            .returning(move |_| Ok(vec![token.clone()]));
        repo.expect_update_token()
            .times(1)
            .returning(move |id, update| {
                assert_eq!(id, token_id);
                assert_eq!(update.name, "Ardan Voss");
                assert_eq!(update.img, cw_core::actor::DEFAULT_ACTOR_IMG);
                Ok(())
            });

        let actor = CharacterMaterializer::new(Arc::new(repo))
            .regenerate(id, record())
            .await
            .unwrap();
        assert_eq!(actor.items.len(), 1);
    }

    #[tokio::test]
    async fn regenerate_of_unknown_actor_fails_before_update() {
        let mut repo = MockActorRepository::new();
        repo.expect_delete_all_items()
            .times(1)
            .returning(|id, _| Err(StoreError::ActorNotFound(id)));

        let err = CharacterMaterializer::new(Arc::new(repo))
            .regenerate(ActorId::new(), record())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GenerationError::Store(StoreError::ActorNotFound(_))
        ));
    }
}
