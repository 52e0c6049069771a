//! Application context: the single owner of session state, the deferred
//! action scheduler, the snapshot store, and the active configuration.
//!
//! Surfaces call [`App::submit`] with user input and [`App::tick`] with the
//! current instant; everything else is wiring. The context is constructed
//! once at startup and passed by reference, there is no global.

use std::time::Instant;

use crate::config::Config;
use crate::dispatch::{self, Outcome, Surface};
use crate::errors::{EntryError, StorageError};
use crate::ledger::Entry;
use crate::session::{Action, Scheduler, SessionState};
use crate::storage::SnapshotStore;

pub struct App {
    pub state: SessionState,
    pub config: Config,
    scheduler: Scheduler,
    store: SnapshotStore,
}

impl App {
    pub fn new(store: SnapshotStore, config: Config) -> Self {
        Self {
            state: SessionState::new(),
            config,
            scheduler: Scheduler::new(),
            store,
        }
    }

    /// One-time hydration of the ledger from the persisted snapshot.
    /// A missing or unreadable snapshot leaves the ledger empty.
    pub fn hydrate(&mut self) {
        match self.store.load_entries() {
            Ok(entries) => self.state.apply(Action::LoadEntries(entries)),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load ledger snapshot; starting empty");
            }
        }
    }

    /// Applies an action to the session state, then rewrites the snapshot
    /// if the ledger changed. Persistence failures are logged and swallowed;
    /// the in-memory ledger stays correct for the session.
    pub fn apply(&mut self, action: Action) {
        let persist = action.mutates_ledger();
        self.state.apply(action);
        if persist {
            if let Err(err) = self.store.save_entries(self.state.ledger.entries()) {
                tracing::warn!(error = %err, "failed to persist ledger snapshot");
            }
        }
    }

    /// Validates and submits a new ledger entry. Rejected entries never
    /// reach the state store.
    pub fn submit_entry(&mut self, entry: Entry) -> Result<(), EntryError> {
        entry.validate()?;
        self.apply(Action::AddEntry(entry));
        Ok(())
    }

    pub fn submit_entry_update(&mut self, entry: Entry) -> Result<(), EntryError> {
        entry.validate()?;
        self.apply(Action::UpdateEntry(entry));
        Ok(())
    }

    /// Runs one line of user input through the shared dispatcher. Records
    /// the command, refreshes the inactivity deadline, applies immediate
    /// actions, and schedules deferred ones.
    pub fn submit(&mut self, input: &str, surface: Surface, now: Instant) -> Outcome {
        self.apply(Action::RecordCommand(input.trim().to_string()));
        self.touch(now);

        let outcome = dispatch::dispatch(input, &self.state, surface);
        for action in &outcome.actions {
            self.apply(action.clone());
        }
        for deferred in &outcome.deferred {
            self.scheduler.schedule(deferred.clone(), now);
        }
        outcome
    }

    /// Recomputes the inactivity deadline. Called on every user input
    /// event; unauthenticated sessions carry no deadline.
    pub fn touch(&mut self, now: Instant) {
        let deadline = self
            .state
            .authenticated
            .then(|| now + self.config.inactivity_timeout());
        self.apply(Action::ResetInactivityDeadline(deadline));
    }

    /// Fires due deferred actions and enforces the inactivity timeout.
    /// Returns true when the session timed out on this tick.
    pub fn tick(&mut self, now: Instant) -> bool {
        for action in self.scheduler.drain_due(now) {
            self.apply(action);
        }

        let expired = self
            .state
            .inactivity_deadline
            .is_some_and(|deadline| deadline <= now);
        if expired && self.state.authenticated {
            tracing::info!("session timed out after inactivity");
            self.scheduler.cancel_all();
            self.apply(Action::SetAuthenticated(false));
            return true;
        }
        false
    }

    pub fn scheduler_idle(&self) -> bool {
        self.scheduler.is_idle()
    }

    pub fn next_due_in(&self, now: Instant) -> Option<std::time::Duration> {
        self.scheduler.next_due_in(now)
    }

    /// Cancels pending timers so nothing mutates state after the surfaces
    /// are gone.
    pub fn teardown(&mut self) {
        self.scheduler.cancel_all();
    }

    pub fn reload_entries(&self) -> Result<Vec<Entry>, StorageError> {
        self.store.load_entries()
    }
}
