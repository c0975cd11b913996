//! # Draft/Commit Synchronizer
//!
//! Pure state machine behind an edit session. It owns the canonical bio,
//! the optimistic draft, the pending payload and the commit bookkeeping.
//! [`Synchronizer::handle`] is the only transition; it never sleeps or does
//! I/O, it returns [`Effect`]s for a driver to carry out.
//!
//! ## Phases
//!
//! ```text
//!          Edit                 TimerFired / Flush
//!   Idle ───────▶ Pending ─────────────────────────▶ Committing
//!    ▲              │ ▲ Edit (re-arm)                    │
//!    │              └─┘                                  │
//!    └───────────────────── CommitFinished ◀─────────────┘
//!
//!   any ── Teardown ──▶ TornDown
//! ```
//!
//! Field values are never validated here. An edit always joins the pending
//! payload verbatim; the draft takes it only when its typed view can hold
//! it, and keeps the previous value otherwise.
//!
//! A single debounce timer is shared by all fields. Each `Edit` bumps the
//! timer generation and re-arms it, so a fire carrying an older generation
//! is ignored. Commits carry increasing sequence numbers. A success whose
//! sequence is not above the highest acknowledged one is stale: only the
//! fields no newer acknowledged commit wrote reach the canonical bio.

use crate::config::{DebounceClass, SyncConfig};
use portyo_model::{Bio, Fields};
use std::collections::{BTreeMap, HashMap};
use tokio::time::Instant;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    Edit { fields: Fields, class: DebounceClass },
    TimerFired { generation: u64 },
    /// Commit now, without waiting for the timer.
    Flush,
    CommitFinished { seq: u64, outcome: CommitOutcome },
    /// The externally owned canonical bio changed.
    CanonicalReplaced(Bio),
    Teardown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    /// Written; carries the stored bio when the backend returned one.
    Saved(Option<Bio>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ArmTimer { generation: u64, deadline: Instant },
    CancelTimer,
    Commit(CommitRequest),
    Shutdown,
}

/// One write: every field edited since the previous commit.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitRequest {
    pub seq: u64,
    pub bio_id: String,
    pub payload: Fields,
    /// Full draft at dispatch time, for the serializer.
    pub draft: Bio,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Pending,
    Committing,
    TornDown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    pub edits: u64,
    pub commits_dispatched: u64,
    pub commits_succeeded: u64,
    pub commits_failed: u64,
    pub stale_responses: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncStatus {
    pub phase: Phase,
    pub is_saving: bool,
    pub is_dirty: bool,
    pub stats: SyncStats,
}

#[derive(Debug)]
pub struct Synchronizer {
    config: SyncConfig,
    canonical: Bio,
    draft: Bio,
    pending: Fields,
    /// Generation of the armed timer, if any
    timer: Option<u64>,
    generation: u64,
    next_seq: u64,
    acked_seq: u64,
    /// Sequence of the newest acknowledged commit that wrote each field
    acked_fields: HashMap<String, u64>,
    in_flight: BTreeMap<u64, Fields>,
    torn_down: bool,
    stats: SyncStats,
}

impl Synchronizer {
    pub fn new(canonical: Bio, config: SyncConfig) -> Self {
        Self {
            config,
            draft: canonical.clone(),
            canonical,
            pending: Fields::new(),
            timer: None,
            generation: 0,
            next_seq: 0,
            acked_seq: 0,
            acked_fields: HashMap::new(),
            in_flight: BTreeMap::new(),
            torn_down: false,
            stats: SyncStats::default(),
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn canonical(&self) -> &Bio {
        &self.canonical
    }

    pub fn draft(&self) -> &Bio {
        &self.draft
    }

    pub fn pending(&self) -> &Fields {
        &self.pending
    }

    pub fn phase(&self) -> Phase {
        if self.torn_down {
            Phase::TornDown
        } else if self.timer.is_some() {
            Phase::Pending
        } else if !self.in_flight.is_empty() {
            Phase::Committing
        } else {
            Phase::Idle
        }
    }

    pub fn status(&self) -> SyncStatus {
        SyncStatus {
            phase: self.phase(),
            is_saving: !self.in_flight.is_empty(),
            is_dirty: !self.pending.is_empty(),
            stats: self.stats,
        }
    }

    /// Apply one event.
    pub fn handle(&mut self, event: SyncEvent, now: Instant) -> Vec<Effect> {
        if self.torn_down {
            debug!(?event, "ignoring event after teardown");
            return Vec::new();
        }

        match event {
            SyncEvent::Edit { fields, class } => self.on_edit(fields, class, now),
            SyncEvent::TimerFired { generation } => self.on_timer(generation),
            SyncEvent::Flush => self.on_flush(),
            SyncEvent::CommitFinished { seq, outcome } => {
                self.on_commit_finished(seq, outcome);
                Vec::new()
            }
            SyncEvent::CanonicalReplaced(bio) => {
                self.canonical = bio;
                self.rebase_draft();
                Vec::new()
            }
            SyncEvent::Teardown => self.on_teardown(),
        }
    }

    fn on_edit(&mut self, fields: Fields, class: DebounceClass, now: Instant) -> Vec<Effect> {
        self.stats.edits += 1;
        for (name, value) in fields {
            if let Err(err) = self.draft.set_field(&name, value.clone()) {
                debug!(field = %name, error = %err, "draft keeps its previous value");
            }
            self.pending.insert(name, value);
        }

        self.generation += 1;
        self.timer = Some(self.generation);
        vec![Effect::ArmTimer {
            generation: self.generation,
            deadline: now + self.config.delay(class),
        }]
    }

    fn on_timer(&mut self, generation: u64) -> Vec<Effect> {
        if self.timer != Some(generation) {
            debug!(generation, current = ?self.timer, "ignoring stale timer");
            return Vec::new();
        }
        self.timer = None;
        self.dispatch().map(Effect::Commit).into_iter().collect()
    }

    fn on_flush(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.timer.take().is_some() {
            effects.push(Effect::CancelTimer);
        }
        effects.extend(self.dispatch().map(Effect::Commit));
        effects
    }

    fn dispatch(&mut self) -> Option<CommitRequest> {
        // Taken before anything else so edits arriving during the write
        // start a fresh batch.
        let payload = std::mem::take(&mut self.pending);
        if payload.is_empty() {
            return None;
        }

        self.next_seq += 1;
        let seq = self.next_seq;
        self.in_flight.insert(seq, payload.clone());
        self.stats.commits_dispatched += 1;

        debug!(seq, fields = payload.len(), "dispatching commit");
        Some(CommitRequest {
            seq,
            bio_id: self.draft.id().to_string(),
            payload,
            draft: self.draft.clone(),
        })
    }

    fn on_commit_finished(&mut self, seq: u64, outcome: CommitOutcome) {
        let payload = self.in_flight.remove(&seq).unwrap_or_default();

        match outcome {
            CommitOutcome::Saved(stored) => {
                if seq <= self.acked_seq {
                    self.stats.stale_responses += 1;
                    // The server copy is older than canonical; only fields
                    // no newer commit wrote are taken, from the payload.
                    let fresh: Fields = payload
                        .into_iter()
                        .filter(|(name, _)| self.acked_fields.get(name).map_or(true, |acked| *acked < seq))
                        .collect();
                    debug!(seq, acked = self.acked_seq, kept = fresh.len(), "stale commit response");
                    self.acknowledge(seq, &fresh);
                    apply_each(&mut self.canonical, &fresh);
                    return;
                }
                self.acked_seq = seq;
                self.stats.commits_succeeded += 1;
                self.acknowledge(seq, &payload);

                match stored {
                    Some(bio) => {
                        self.canonical = bio;
                        self.rebase_draft();
                    }
                    None => apply_each(&mut self.canonical, &payload),
                }
            }
            CommitOutcome::Failed(error) => {
                self.stats.commits_failed += 1;
                warn!(seq, %error, "commit failed");

                if self.config.requeue_failed {
                    for (name, value) in payload {
                        self.pending.entry(name).or_insert(value);
                    }
                }
            }
        }
    }

    fn acknowledge(&mut self, seq: u64, fields: &Fields) {
        for name in fields.keys() {
            self.acked_fields.insert(name.clone(), seq);
        }
    }

    /// Rebuild the draft from the canonical bio with every unacknowledged
    /// edit replayed on top: in-flight payloads in sequence order, then the
    /// pending payload.
    fn rebase_draft(&mut self) {
        let mut draft = self.canonical.clone();
        for fields in self.in_flight.values().chain(std::iter::once(&self.pending)) {
            apply_each(&mut draft, fields);
        }
        self.draft = draft;
    }

    fn on_teardown(&mut self) -> Vec<Effect> {
        self.torn_down = true;
        if !self.pending.is_empty() {
            debug!(fields = self.pending.len(), "dropping pending edits on teardown");
        }
        self.pending.clear();

        let mut effects = Vec::new();
        if self.timer.take().is_some() {
            effects.push(Effect::CancelTimer);
        }
        effects.push(Effect::Shutdown);
        effects
    }
}

/// Set every field the bio's typed view can hold. A value it cannot hold
/// leaves that field as it was.
fn apply_each(bio: &mut Bio, fields: &Fields) {
    for (name, value) in fields {
        if let Err(err) = bio.set_field(name, value.clone()) {
            debug!(field = %name, error = %err, "value kept out of typed view");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::time::Duration;

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn edit(value: Value) -> SyncEvent {
        SyncEvent::Edit {
            fields: fields(value),
            class: DebounceClass::Short,
        }
    }

    fn sync() -> Synchronizer {
        let bio = Bio::from_value(json!({ "id": "bio-1", "bgColor": "#000" })).unwrap();
        Synchronizer::new(bio, SyncConfig::default())
    }

    fn armed_generation(effects: &[Effect]) -> u64 {
        match effects {
            [Effect::ArmTimer { generation, .. }] => *generation,
            other => panic!("expected ArmTimer, got {:?}", other),
        }
    }

    fn commit(effects: Vec<Effect>) -> CommitRequest {
        effects
            .into_iter()
            .find_map(|e| match e {
                Effect::Commit(request) => Some(request),
                _ => None,
            })
            .expect("expected a commit")
    }

    #[test]
    fn test_edit_updates_draft_and_arms_timer() {
        let mut sync = sync();
        let now = Instant::now();

        let effects = sync.handle(edit(json!({ "bgColor": "#111" })), now);

        assert_eq!(
            effects,
            vec![Effect::ArmTimer {
                generation: 1,
                deadline: now + Duration::from_millis(350)
            }]
        );
        assert_eq!(sync.draft().field("bgColor"), Some(json!("#111")));
        assert_eq!(sync.canonical().field("bgColor"), Some(json!("#000")));
        assert_eq!(sync.phase(), Phase::Pending);
    }

    #[test]
    fn test_long_class_uses_range_window() {
        let mut sync = sync();
        let now = Instant::now();
        let effects = sync
            .handle(
                SyncEvent::Edit {
                    fields: fields(json!({ "blurIntensity": 4 })),
                    class: DebounceClass::Long,
                },
                now,
            );

        assert!(matches!(
            effects[0],
            Effect::ArmTimer { deadline, .. } if deadline == now + Duration::from_millis(650)
        ));
    }

    #[test]
    fn test_last_value_wins_within_window() {
        let mut sync = sync();
        let now = Instant::now();

        sync.handle(edit(json!({ "bgColor": "#111" })), now);
        sync.handle(edit(json!({ "bgColor": "#222", "font": "Lora" })), now);
        let generation = armed_generation(&sync.handle(edit(json!({ "bgColor": "#333" })), now));

        let request = commit(sync.handle(SyncEvent::TimerFired { generation }, now));
        assert_eq!(request.seq, 1);
        assert_eq!(request.payload, fields(json!({ "bgColor": "#333", "font": "Lora" })));
        assert_eq!(request.draft.field("bgColor"), Some(json!("#333")));
        assert!(sync.pending().is_empty());
        assert_eq!(sync.phase(), Phase::Committing);
    }

    #[test]
    fn test_stale_timer_is_ignored() {
        let mut sync = sync();
        let now = Instant::now();

        let first = armed_generation(&sync.handle(edit(json!({ "a": 1 })), now));
        let second = armed_generation(&sync.handle(edit(json!({ "a": 2 })), now));

        assert!(sync.handle(SyncEvent::TimerFired { generation: first }, now).is_empty());
        assert_eq!(sync.status().stats.commits_dispatched, 0);
        assert_eq!(commit(sync.handle(SyncEvent::TimerFired { generation: second }, now)).seq, 1);
    }

    #[test]
    fn test_empty_payload_dispatches_nothing() {
        let mut sync = sync();
        assert!(sync.handle(SyncEvent::Flush, Instant::now()).is_empty());
        assert_eq!(sync.phase(), Phase::Idle);
    }

    #[test]
    fn test_flush_cancels_timer_and_commits() {
        let mut sync = sync();
        let now = Instant::now();
        sync.handle(edit(json!({ "bgColor": "#111" })), now);

        let effects = sync.handle(SyncEvent::Flush, now);
        assert_eq!(effects[0], Effect::CancelTimer);
        assert_eq!(commit(effects).payload, fields(json!({ "bgColor": "#111" })));
    }

    #[test]
    fn test_ack_updates_canonical() {
        let mut sync = sync();
        let now = Instant::now();
        sync.handle(edit(json!({ "bgColor": "#111" })), now);
        let request = commit(sync.handle(SyncEvent::Flush, now));

        sync.handle(
            SyncEvent::CommitFinished {
                seq: request.seq,
                outcome: CommitOutcome::Saved(None),
            },
            now,
        );

        assert_eq!(sync.canonical().field("bgColor"), Some(json!("#111")));
        assert_eq!(sync.phase(), Phase::Idle);
        assert_eq!(sync.status().stats.commits_succeeded, 1);
    }

    #[test]
    fn test_stale_response_does_not_touch_canonical() {
        let mut sync = sync();
        let now = Instant::now();

        sync.handle(edit(json!({ "bgColor": "#111" })), now);
        let first = commit(sync.handle(SyncEvent::Flush, now));
        sync.handle(edit(json!({ "bgColor": "#222" })), now);
        let second = commit(sync.handle(SyncEvent::Flush, now));

        // Responses arrive out of order.
        sync.handle(
            SyncEvent::CommitFinished {
                seq: second.seq,
                outcome: CommitOutcome::Saved(None),
            },
            now,
        );
        let stale_server_copy = Bio::from_value(json!({ "id": "bio-1", "bgColor": "#111" })).unwrap();
        sync.handle(
            SyncEvent::CommitFinished {
                seq: first.seq,
                outcome: CommitOutcome::Saved(Some(stale_server_copy)),
            },
            now,
        );

        assert_eq!(sync.canonical().field("bgColor"), Some(json!("#222")));
        assert_eq!(sync.status().stats.stale_responses, 1);
    }

    #[test]
    fn test_failure_is_counted_not_retried() {
        let mut sync = sync();
        let now = Instant::now();
        sync.handle(edit(json!({ "bgColor": "#111" })), now);
        let request = commit(sync.handle(SyncEvent::Flush, now));

        let effects = sync
            .handle(
                SyncEvent::CommitFinished {
                    seq: request.seq,
                    outcome: CommitOutcome::Failed("offline".to_string()),
                },
                now,
            );

        assert!(effects.is_empty());
        assert!(sync.pending().is_empty());
        assert_eq!(sync.status().stats.commits_failed, 1);
        assert_eq!(sync.canonical().field("bgColor"), Some(json!("#000")));
        assert_eq!(sync.draft().field("bgColor"), Some(json!("#111")));
    }

    #[test]
    fn test_requeue_keeps_newer_pending_values() {
        let bio = Bio::new("bio-1");
        let mut sync = Synchronizer::new(
            bio,
            SyncConfig {
                requeue_failed: true,
                ..SyncConfig::default()
            },
        );
        let now = Instant::now();

        sync.handle(edit(json!({ "bgColor": "#111", "font": "Lora" })), now);
        let request = commit(sync.handle(SyncEvent::Flush, now));
        sync.handle(edit(json!({ "bgColor": "#222" })), now);

        let effects = sync
            .handle(
                SyncEvent::CommitFinished {
                    seq: request.seq,
                    outcome: CommitOutcome::Failed("offline".to_string()),
                },
                now,
            );

        assert!(effects.is_empty());
        assert_eq!(sync.pending(), &fields(json!({ "bgColor": "#222", "font": "Lora" })));
    }

    #[test]
    fn test_canonical_replacement_keeps_local_edits() {
        let mut sync = sync();
        let now = Instant::now();
        sync.handle(edit(json!({ "bgColor": "#111" })), now);
        commit(sync.handle(SyncEvent::Flush, now));
        sync.handle(edit(json!({ "font": "Lora" })), now);

        let remote = Bio::from_value(json!({
            "id": "bio-1", "bgColor": "#fff", "font": "Inter", "sufix": "ana"
        }))
        .unwrap();
        sync.handle(SyncEvent::CanonicalReplaced(remote), now);

        let draft = sync.draft();
        assert_eq!(draft.field("bgColor"), Some(json!("#111")));
        assert_eq!(draft.field("font"), Some(json!("Lora")));
        assert_eq!(draft.field("sufix"), Some(json!("ana")));
    }

    #[test]
    fn test_undecodable_value_is_committed_verbatim() {
        let mut sync = sync();
        let now = Instant::now();
        sync.handle(edit(json!({ "font": "Lora", "blocks": [{ "id": "a" }] })), now);

        assert_eq!(sync.draft().field("font"), Some(json!("Lora")));
        assert_eq!(sync.draft().field("blocks"), Some(json!([])));
        assert_eq!(sync.pending().get("blocks"), Some(&json!([{ "id": "a" }])));

        let request = commit(sync.handle(SyncEvent::Flush, now));
        assert_eq!(request.payload, fields(json!({ "font": "Lora", "blocks": [{ "id": "a" }] })));
    }

    #[test]
    fn test_stale_ack_keeps_fields_no_newer_commit_wrote() {
        let mut sync = sync();
        let now = Instant::now();

        sync.handle(edit(json!({ "font": "Lora" })), now);
        let first = commit(sync.handle(SyncEvent::Flush, now));
        sync.handle(edit(json!({ "bgColor": "#222" })), now);
        let second = commit(sync.handle(SyncEvent::Flush, now));

        for seq in [second.seq, first.seq] {
            sync.handle(
                SyncEvent::CommitFinished {
                    seq,
                    outcome: CommitOutcome::Saved(None),
                },
                now,
            );
        }

        assert_eq!(sync.canonical().field("font"), Some(json!("Lora")));
        assert_eq!(sync.canonical().field("bgColor"), Some(json!("#222")));
        assert_eq!(sync.status().stats.stale_responses, 1);
        assert_eq!(sync.phase(), Phase::Idle);
    }

    #[test]
    fn test_teardown_drops_pending_and_ignores_later_events() {
        let mut sync = sync();
        let now = Instant::now();
        let generation = armed_generation(&sync.handle(edit(json!({ "bgColor": "#111" })), now));

        let effects = sync.handle(SyncEvent::Teardown, now);
        assert_eq!(effects, vec![Effect::CancelTimer, Effect::Shutdown]);

        assert!(sync.handle(SyncEvent::TimerFired { generation }, now).is_empty());
        assert!(sync.handle(edit(json!({ "bgColor": "#222" })), now).is_empty());
        assert_eq!(sync.phase(), Phase::TornDown);
        assert_eq!(sync.status().stats.commits_dispatched, 0);
    }
}
