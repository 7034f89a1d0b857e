#![allow(dead_code)]

use async_trait::async_trait;
use profiledesk_core::{
    EditorSurface, EditorView, Entry, EntryId, EntryIdGenerator, FieldMap, Notifier, Profile,
    ProfileScalars, ProfileStore, SectionKind, ServiceDeps, StoreError, StoreResult,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Fetch,
    ReplaceSection(SectionKind, Vec<Entry>),
    DeleteItem(SectionKind, EntryId),
    ReplaceScalars(ProfileScalars),
}

struct Reply<T> {
    gate: Option<oneshot::Receiver<()>>,
    result: StoreResult<T>,
}

/// Store double with queued replies; unscripted writes echo their input.
#[derive(Default)]
pub struct ScriptedStore {
    profile: Mutex<Profile>,
    calls: Mutex<Vec<Call>>,
    fetch_error: Mutex<Option<StoreError>>,
    replace_replies: Mutex<VecDeque<Reply<Vec<Entry>>>>,
    delete_replies: Mutex<VecDeque<StoreResult<()>>>,
    scalar_replies: Mutex<VecDeque<StoreResult<()>>>,
}

impl ScriptedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(profile: Profile) -> Self {
        let store = Self::default();
        *store.profile.lock().unwrap() = profile;
        store
    }

    pub fn fail_fetch(&self, err: StoreError) {
        *self.fetch_error.lock().unwrap() = Some(err);
    }

    pub fn reply_replace(&self, result: StoreResult<Vec<Entry>>) {
        self.replace_replies
            .lock()
            .unwrap()
            .push_back(Reply { gate: None, result });
    }

    /// Queues a replace-section reply that resolves only after the returned
    /// sender fires.
    pub fn reply_replace_gated(&self, result: StoreResult<Vec<Entry>>) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.replace_replies.lock().unwrap().push_back(Reply {
            gate: Some(rx),
            result,
        });
        tx
    }

    pub fn reply_delete(&self, result: StoreResult<()>) {
        self.delete_replies.lock().unwrap().push_back(result);
    }

    pub fn reply_scalars(&self, result: StoreResult<()>) {
        self.scalar_replies.lock().unwrap().push_back(result);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ProfileStore for ScriptedStore {
    async fn fetch_profile(&self) -> StoreResult<Profile> {
        self.record(Call::Fetch);
        if let Some(err) = self.fetch_error.lock().unwrap().take() {
            return Err(err);
        }
        Ok(self.profile.lock().unwrap().clone())
    }

    async fn replace_section(
        &self,
        section: SectionKind,
        entries: &[Entry],
    ) -> StoreResult<Vec<Entry>> {
        self.record(Call::ReplaceSection(section, entries.to_vec()));
        let reply = self.replace_replies.lock().unwrap().pop_front();
        match reply {
            Some(Reply { gate, result }) => {
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
                result
            }
            None => Ok(entries.to_vec()),
        }
    }

    async fn delete_item(&self, section: SectionKind, id: EntryId) -> StoreResult<()> {
        self.record(Call::DeleteItem(section, id));
        let reply = self.delete_replies.lock().unwrap().pop_front();
        reply.unwrap_or(Ok(()))
    }

    async fn replace_profile_scalars(&self, scalars: &ProfileScalars) -> StoreResult<()> {
        self.record(Call::ReplaceScalars(scalars.clone()));
        let reply = self.scalar_replies.lock().unwrap().pop_front();
        reply.unwrap_or(Ok(()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ack {
    Success(String),
    Failure(String),
}

#[derive(Default)]
pub struct RecordingNotifier {
    acks: Mutex<Vec<Ack>>,
}

impl RecordingNotifier {
    pub fn acks(&self) -> Vec<Ack> {
        self.acks.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.acks
            .lock()
            .unwrap()
            .push(Ack::Success(message.to_string()));
    }

    fn failure(&self, message: &str) {
        self.acks
            .lock()
            .unwrap()
            .push(Ack::Failure(message.to_string()));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    Open(EditorView),
    Close,
}

#[derive(Default)]
pub struct RecordingSurface {
    events: Mutex<Vec<SurfaceEvent>>,
}

impl RecordingSurface {
    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn is_open(&self) -> bool {
        matches!(self.events().last(), Some(SurfaceEvent::Open(_)))
    }
}

impl EditorSurface for RecordingSurface {
    fn open(&self, view: EditorView) {
        self.events.lock().unwrap().push(SurfaceEvent::Open(view));
    }

    fn close(&self) {
        self.events.lock().unwrap().push(SurfaceEvent::Close);
    }
}

/// Ids 1000, 1001, ... for predictable assertions.
pub struct SequentialIds(AtomicI64);

impl SequentialIds {
    pub fn starting_at(first: i64) -> Self {
        Self(AtomicI64::new(first))
    }
}

impl EntryIdGenerator for SequentialIds {
    fn next_id(&self) -> EntryId {
        EntryId(self.0.fetch_add(1, Ordering::Relaxed))
    }
}

pub struct Harness<S: ProfileStore> {
    pub store: Arc<S>,
    pub notifier: Arc<RecordingNotifier>,
    pub deps: ServiceDeps<S>,
}

pub fn harness<S: ProfileStore + 'static>(store: S, first_id: i64) -> Harness<S> {
    let store = Arc::new(store);
    let notifier = Arc::new(RecordingNotifier::default());
    let deps = ServiceDeps::new(
        Arc::clone(&store),
        notifier.clone(),
        Arc::new(SequentialIds::starting_at(first_id)),
    );
    Harness {
        store,
        notifier,
        deps,
    }
}

pub fn fields(pairs: &[(&str, &str)]) -> FieldMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn skill(id: i64, name: &str) -> Entry {
    Entry::new(id, fields(&[("skillName", name)]))
}

pub fn experience(id: i64, company: &str, role: &str, duration: &str) -> Entry {
    Entry::new(
        id,
        fields(&[("company", company), ("role", role), ("duration", duration)]),
    )
}

pub fn rejected(message: &str) -> StoreError {
    StoreError::Rejected {
        status: 500,
        message: message.to_string(),
    }
}
