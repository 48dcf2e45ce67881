//! Remote like service client.
//!
//! Wire contract:
//! - `GET {base}/api/post-likes?ids=a,b` → `[{id, likes, likedByMe?}, ..]`
//! - `POST {base}/api/post-like?id=a` (like) / `DELETE` (unlike) → `{id, likes}`
//!
//! A non-success status is treated identically to a transport failure.
//! Failures never propagate outward: a failed batched read degrades to
//! local-only snapshots, a failed toggle returns `None` and the caller
//! reverts its optimistic state. Overlapping toggles for one identifier
//! are not serialized here; the call site disables the control while a
//! request is in flight.

use cardstock_core::{Error, LikeSnapshot, Result};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;

use crate::snapshot;
use crate::store::LikeStore;

/// One row of the batched read response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LikeRow {
    id: String,
    likes: u64,
    liked_by_me: Option<bool>,
}

/// Toggle response body. The echoed `id` is not used.
#[derive(Debug, Deserialize)]
struct ToggleBody {
    likes: u64,
}

/// Client for the remote like count service, reconciled against an
/// injected local [`LikeStore`].
pub struct LikeClient {
    http: Client,
    base_url: String,
    store: Arc<dyn LikeStore>,
}

impl LikeClient {
    /// Create a client against the given base URL.
    pub fn new(base_url: impl Into<String>, store: Arc<dyn LikeStore>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
            store,
        }
    }

    /// The local store backing this client.
    pub fn store(&self) -> &dyn LikeStore {
        self.store.as_ref()
    }

    /// Fetch snapshots for a batch of identifiers with one remote read.
    ///
    /// Never fails outward: on any failure every identifier gets a
    /// synthesized snapshot with a zero count and the locally cached
    /// liked flag. When the server does attribute the actor
    /// (`likedByMe` present), that value wins and refreshes the local
    /// cache.
    #[instrument(skip(self))]
    pub async fn fetch_snapshots(&self, ids: &[&str]) -> HashMap<String, LikeSnapshot> {
        match self.fetch_remote(ids).await {
            Ok(rows) => {
                let mut snapshots = HashMap::with_capacity(ids.len());
                for row in rows {
                    let liked = match row.liked_by_me {
                        Some(liked) => {
                            self.store.set(&row.id, liked);
                            liked
                        }
                        None => self.store.get(&row.id),
                    };
                    snapshots.insert(row.id.clone(), LikeSnapshot::new(row.id, row.likes, liked));
                }
                // Identifiers the server did not echo still get a snapshot.
                for id in ids {
                    if !snapshots.contains_key(*id) {
                        snapshots
                            .insert(id.to_string(), snapshot::fallback(id, self.store.get(id)));
                    }
                }
                snapshots
            }
            Err(e) => {
                log::warn!("like fetch failed, degrading to local state: {}", e);
                ids.iter()
                    .map(|id| (id.to_string(), snapshot::fallback(id, self.store.get(id))))
                    .collect()
            }
        }
    }

    /// Toggle the current actor's like for one document.
    ///
    /// On success the local cache is updated and the confirmed snapshot
    /// returned: the server's count, with the caller-supplied liked flag.
    /// On failure nothing is mutated and `None` signals the caller to
    /// revert its optimistic update.
    #[instrument(skip(self))]
    pub async fn toggle(&self, id: &str, next_liked: bool) -> Option<LikeSnapshot> {
        match self.toggle_remote(id, next_liked).await {
            Ok(server_likes) => {
                self.store.set(id, next_liked);
                Some(snapshot::confirmed(id, server_likes, next_liked))
            }
            Err(e) => {
                log::warn!("like toggle for '{}' failed: {}", id, e);
                None
            }
        }
    }

    async fn fetch_remote(&self, ids: &[&str]) -> Result<Vec<LikeRow>> {
        let url = format!("{}/api/post-likes", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("ids", ids.join(","))])
            .send()
            .await
            .map_err(|e| Error::remote(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::remote_status(response.status().as_u16()));
        }

        response
            .json::<Vec<LikeRow>>()
            .await
            .map_err(|e| Error::remote(e.to_string()))
    }

    async fn toggle_remote(&self, id: &str, next_liked: bool) -> Result<u64> {
        let url = format!("{}/api/post-like", self.base_url);
        let request = if next_liked {
            self.http.post(&url)
        } else {
            self.http.delete(&url)
        };

        let response = request
            .query(&[("id", id)])
            .send()
            .await
            .map_err(|e| Error::remote(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::remote_status(response.status().as_u16()));
        }

        let body: ToggleBody = response
            .json()
            .await
            .map_err(|e| Error::remote(e.to_string()))?;
        Ok(body.likes)
    }
}
