//! # Edit Session
//!
//! Runs a [`Synchronizer`] against real time and a real backend.
//!
//! The session owns the state behind a mutex and a driver task. Public
//! methods apply events to the synchronizer and forward the resulting
//! effects to the driver over a channel. The driver keeps the debounce
//! timer and spawns one task per commit, so a slow write never holds up
//! editing or the next commit.
//!
//! ```rust,ignore
//! let session = EditSession::builder(bio, Arc::new(backend))
//!     .user(user)
//!     .spawn();
//!
//! session.update_field("bgColor", json!("#111"))?;
//! session.update_range_field("blurIntensity", json!(8))?;
//!
//! // Committed 350ms after the last short edit, or now:
//! session.flush().await?;
//! session.teardown();
//! ```

use crate::blocks::{BlockHistory, BlockOp, DEFAULT_HISTORY_LEVELS};
use crate::collaborators::{HtmlSnapshotSerializer, Persistence, Serializer};
use crate::config::{DebounceClass, SyncConfig};
use crate::errors::{EditorError, PersistError};
use crate::sync::{CommitOutcome, CommitRequest, Effect, SyncEvent, SyncStatus, Synchronizer};
use portyo_model::{Bio, Block, Fields, User};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{mpsc, oneshot};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, instrument, warn};

type Waiter = oneshot::Sender<Result<(), PersistError>>;

struct SessionState {
    core: Synchronizer,
    history: BlockHistory,
}

struct Shared {
    state: Mutex<SessionState>,
    /// Callers of `flush` waiting on a commit, by sequence number
    waiters: Mutex<HashMap<u64, Waiter>>,
    persistence: Arc<dyn Persistence>,
    serializer: Option<Arc<dyn Serializer>>,
    user: Option<User>,
}

impl Shared {
    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn waiters(&self) -> MutexGuard<'_, HashMap<u64, Waiter>> {
        self.waiters.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub struct EditSessionBuilder {
    bio: Bio,
    persistence: Arc<dyn Persistence>,
    config: SyncConfig,
    serializer: Option<Arc<dyn Serializer>>,
    user: Option<User>,
    history_levels: usize,
}

impl EditSessionBuilder {
    pub fn config(mut self, config: SyncConfig) -> Self {
        self.config = config;
        self
    }

    pub fn user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    /// Replace the default [`HtmlSnapshotSerializer`].
    pub fn serializer(mut self, serializer: Arc<dyn Serializer>) -> Self {
        self.serializer = Some(serializer);
        self
    }

    pub fn history_levels(mut self, levels: usize) -> Self {
        self.history_levels = levels;
        self
    }

    /// Start the driver task. Must be called inside a tokio runtime.
    pub fn spawn(self) -> EditSession {
        let serializer = if self.config.regenerate_html {
            Some(
                self.serializer
                    .unwrap_or_else(|| Arc::new(HtmlSnapshotSerializer::new())),
            )
        } else {
            None
        };

        let shared = Arc::new(Shared {
            state: Mutex::new(SessionState {
                core: Synchronizer::new(self.bio, self.config),
                history: BlockHistory::with_max_levels(self.history_levels),
            }),
            waiters: Mutex::new(HashMap::new()),
            persistence: self.persistence,
            serializer,
            user: self.user,
        });

        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(drive(shared.clone(), rx));

        EditSession { shared, tx }
    }
}

/// One bio being edited. Dropping the session tears it down.
pub struct EditSession {
    shared: Arc<Shared>,
    tx: mpsc::UnboundedSender<Vec<Effect>>,
}

impl EditSession {
    pub fn builder(bio: Bio, persistence: Arc<dyn Persistence>) -> EditSessionBuilder {
        EditSessionBuilder {
            bio,
            persistence,
            config: SyncConfig::default(),
            serializer: None,
            user: None,
            history_levels: DEFAULT_HISTORY_LEVELS,
        }
    }

    /// Edit a discrete field (color, toggle, text).
    pub fn update_field(&self, name: &str, value: Value) -> Result<(), EditorError> {
        self.update_fields(single(name, value), DebounceClass::Short)
    }

    /// Edit a continuous field (slider). Uses the longer debounce window.
    pub fn update_range_field(&self, name: &str, value: Value) -> Result<(), EditorError> {
        self.update_fields(single(name, value), DebounceClass::Long)
    }

    pub fn update_fields(&self, fields: Fields, class: DebounceClass) -> Result<(), EditorError> {
        let mut state = self.shared.state();
        self.edit(&mut state, fields, class)
    }

    fn edit(
        &self,
        state: &mut SessionState,
        fields: Fields,
        class: DebounceClass,
    ) -> Result<(), EditorError> {
        ensure_live(state)?;
        let effects = state
            .core
            .handle(SyncEvent::Edit { fields, class }, Instant::now());
        // Sent under the lock so effects reach the driver in order.
        self.send(effects)
    }

    /// Commit pending edits now and wait for the write.
    ///
    /// Returns the commit's sequence number, or `None` when nothing was
    /// pending.
    pub async fn flush(&self) -> Result<Option<u64>, EditorError> {
        let (seq, done) = {
            let mut state = self.shared.state();
            ensure_live(&state)?;
            let effects = state.core.handle(SyncEvent::Flush, Instant::now());

            let seq = effects.iter().find_map(|effect| match effect {
                Effect::Commit(request) => Some(request.seq),
                _ => None,
            });
            let Some(seq) = seq else {
                self.send(effects)?;
                return Ok(None);
            };

            let (waiter, done) = oneshot::channel();
            self.shared.waiters().insert(seq, waiter);
            self.send(effects)?;
            (seq, done)
        };

        done.await.map_err(|_| EditorError::DriverGone)??;
        Ok(Some(seq))
    }

    /// Draft with every local edit applied.
    pub fn live_bio(&self) -> Bio {
        self.shared.state().core.draft().clone()
    }

    /// Last acknowledged bio.
    pub fn canonical(&self) -> Bio {
        self.shared.state().core.canonical().clone()
    }

    pub fn status(&self) -> SyncStatus {
        self.shared.state().core.status()
    }

    /// Adopt a bio changed elsewhere. Local edits not yet acknowledged are
    /// replayed on top of it.
    pub fn replace_canonical(&self, bio: Bio) -> Result<(), EditorError> {
        let mut state = self.shared.state();
        ensure_live(&state)?;
        let effects = state
            .core
            .handle(SyncEvent::CanonicalReplaced(bio), Instant::now());
        self.send(effects)
    }

    /// Apply a structural edit to the block list. It is committed like any
    /// other field edit and can be undone.
    pub fn apply_block_op(&self, op: BlockOp) -> Result<(), EditorError> {
        let mut state = self.shared.state();
        ensure_live(&state)?;
        let before = state.core.draft().blocks().to_vec();
        let after = op.apply(&before)?;

        self.edit(&mut state, blocks_fields(&after), DebounceClass::Short)?;
        state.history.record(before, op.describe());
        Ok(())
    }

    /// Returns `false` when there is nothing to undo.
    pub fn undo_blocks(&self) -> Result<bool, EditorError> {
        let mut state = self.shared.state();
        // History only moves for a live session.
        ensure_live(&state)?;
        let current = state.core.draft().blocks().to_vec();
        let Some(previous) = state.history.undo(current) else {
            return Ok(false);
        };
        self.edit(&mut state, blocks_fields(&previous), DebounceClass::Short)?;
        Ok(true)
    }

    pub fn redo_blocks(&self) -> Result<bool, EditorError> {
        let mut state = self.shared.state();
        ensure_live(&state)?;
        let current = state.core.draft().blocks().to_vec();
        let Some(next) = state.history.redo(current) else {
            return Ok(false);
        };
        self.edit(&mut state, blocks_fields(&next), DebounceClass::Short)?;
        Ok(true)
    }

    pub fn can_undo_blocks(&self) -> bool {
        self.shared.state().history.can_undo()
    }

    pub fn can_redo_blocks(&self) -> bool {
        self.shared.state().history.can_redo()
    }

    /// Stop the session. Pending edits are dropped, not committed. Commits
    /// already dispatched still run to completion.
    pub fn teardown(&self) {
        let mut state = self.shared.state();
        let effects = state.core.handle(SyncEvent::Teardown, Instant::now());
        if !effects.is_empty() && self.tx.send(effects).is_err() {
            debug!("edit session driver already stopped");
        }
    }

    fn send(&self, effects: Vec<Effect>) -> Result<(), EditorError> {
        if effects.is_empty() {
            return Ok(());
        }
        self.tx.send(effects).map_err(|_| EditorError::DriverGone)
    }
}

impl Drop for EditSession {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for EditSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditSession")
            .field("status", &self.status())
            .finish()
    }
}

fn ensure_live(state: &SessionState) -> Result<(), EditorError> {
    if state.core.status().phase == crate::sync::Phase::TornDown {
        return Err(EditorError::TornDown);
    }
    Ok(())
}

fn single(name: &str, value: Value) -> Fields {
    let mut fields = Fields::new();
    fields.insert(name.to_string(), value);
    fields
}

fn blocks_fields(blocks: &[Arc<Block>]) -> Fields {
    let value = Value::Array(blocks.iter().map(|b| b.to_value()).collect());
    single("blocks", value)
}

/// Owns the debounce timer and turns effects into commits.
async fn drive(shared: Arc<Shared>, mut rx: mpsc::UnboundedReceiver<Vec<Effect>>) {
    let mut timer: Option<(u64, Instant)> = None;

    loop {
        let effects = match timer {
            Some((generation, deadline)) => tokio::select! {
                received = rx.recv() => received,
                _ = sleep_until(deadline) => {
                    timer = None;
                    let mut state = shared.state();
                    Some(state.core.handle(SyncEvent::TimerFired { generation }, Instant::now()))
                }
            },
            None => rx.recv().await,
        };

        // Every sender is gone.
        let Some(effects) = effects else {
            break;
        };

        for effect in effects {
            match effect {
                Effect::ArmTimer {
                    generation,
                    deadline,
                } => timer = Some((generation, deadline)),
                Effect::CancelTimer => timer = None,
                Effect::Commit(request) => start_commit(&shared, request),
                Effect::Shutdown => {
                    debug!("edit session driver stopped");
                    return;
                }
            }
        }
    }
}

#[instrument(skip(shared, request), fields(seq = request.seq, bio_id = %request.bio_id))]
fn start_commit(shared: &Arc<Shared>, request: CommitRequest) {
    let CommitRequest {
        seq,
        bio_id,
        mut payload,
        draft,
    } = request;

    if let Some(serializer) = &shared.serializer {
        match serializer.serialize(draft.blocks(), shared.user.as_ref(), &draft) {
            Ok(html) => {
                payload.insert("html".to_string(), Value::String(html));
            }
            Err(err) => warn!(error = %err, "committing without html snapshot"),
        }
    }

    let shared = shared.clone();
    tokio::spawn(async move {
        let result = shared.persistence.persist(&bio_id, payload).await;

        let outcome = match &result {
            Ok(stored) => CommitOutcome::Saved(stored.clone()),
            Err(err) => CommitOutcome::Failed(err.to_string()),
        };
        {
            let mut state = shared.state();
            state
                .core
                .handle(SyncEvent::CommitFinished { seq, outcome }, Instant::now());
        }

        if let Some(waiter) = shared.waiters().remove(&seq) {
            let _ = waiter.send(result.map(|_| ()));
        }
    });
}
