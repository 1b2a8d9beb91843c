use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use futures_util::future::{BoxFuture, FutureExt, Shared};

use crate::api::DataSource;

/// 1x1 transparent GIF shown when a sprite cannot be resolved.
pub const SPRITE_PLACEHOLDER: &str =
    "data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7";

type PendingSprite = Shared<BoxFuture<'static, String>>;

/// Sprite URL lookup scoped to one chain resolution.
///
/// Each species name maps to a single shared future, so a second request for
/// a name awaits the first request's fetch instead of issuing another one.
pub struct SpriteResolver {
    source: Arc<dyn DataSource>,
    pending: Mutex<HashMap<String, PendingSprite>>,
}

impl SpriteResolver {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            source,
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Front sprite URL for `name`, or [`SPRITE_PLACEHOLDER`] on any failure.
    pub async fn resolve(&self, name: &str) -> String {
        let pending = {
            let mut table = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
            table
                .entry(name.to_string())
                .or_insert_with(|| self.lookup(name))
                .clone()
        };
        pending.await
    }

    fn lookup(&self, name: &str) -> PendingSprite {
        let source = Arc::clone(&self.source);
        let name = name.to_string();
        async move {
            match source.fetch_pokemon(&name).await {
                Ok(pokemon) => pokemon.sprites.front_default.unwrap_or_else(|| {
                    tracing::debug!(%name, "no front sprite");
                    SPRITE_PLACEHOLDER.to_string()
                }),
                Err(error) => {
                    tracing::warn!(%name, %error, "sprite lookup failed");
                    SPRITE_PLACEHOLDER.to_string()
                }
            }
        }
        .boxed()
        .shared()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemorySource;
    use serde_json::json;

    fn source() -> Arc<MemorySource> {
        Arc::new(
            MemorySource::new()
                .with_pokemon(json!({
                    "id": 25,
                    "name": "pikachu",
                    "sprites": { "front_default": "https://img.test/25.png" }
                }))
                .with_pokemon(json!({ "id": 132, "name": "ditto", "sprites": {} }))
                .with_failure("pokemon/raichu"),
        )
    }

    #[tokio::test]
    async fn concurrent_requests_share_one_fetch() {
        let source = source();
        let resolver = SpriteResolver::new(source.clone());

        let (first, second) = tokio::join!(resolver.resolve("pikachu"), resolver.resolve("pikachu"));

        assert_eq!(first, "https://img.test/25.png");
        assert_eq!(first, second);
        assert_eq!(source.fetch_count("pokemon/pikachu"), 1);
    }

    #[tokio::test]
    async fn completed_lookups_are_reused() {
        let source = source();
        let resolver = SpriteResolver::new(source.clone());

        resolver.resolve("pikachu").await;
        resolver.resolve("pikachu").await;

        assert_eq!(source.fetch_count("pokemon/pikachu"), 1);
    }

    #[tokio::test]
    async fn failures_degrade_to_placeholder() {
        let source = source();
        let resolver = SpriteResolver::new(source.clone());

        assert_eq!(resolver.resolve("raichu").await, SPRITE_PLACEHOLDER);
        assert_eq!(resolver.resolve("mew").await, SPRITE_PLACEHOLDER);
        assert_eq!(resolver.resolve("ditto").await, SPRITE_PLACEHOLDER);
        // failed names are not retried within the same pass
        resolver.resolve("raichu").await;
        assert_eq!(source.fetch_count("pokemon/raichu"), 1);
    }

    #[tokio::test]
    async fn resolvers_do_not_share_state() {
        let source = source();
        SpriteResolver::new(source.clone()).resolve("pikachu").await;
        SpriteResolver::new(source.clone()).resolve("pikachu").await;
        assert_eq!(source.fetch_count("pokemon/pikachu"), 2);
    }
}
