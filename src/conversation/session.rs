use serde_json::Value;
use tracing::debug;

use super::message::{Message, MessageLog};
use super::sequencer::{transition, Effect, Event, LookupRequest};
use super::state::{ConversationState, LookupStatus, Mode, Ticket};
use crate::directions::DirectionsService;
use crate::utils::BusChatError;

/// One conversation: the sequencer state plus the message log it writes to
#[derive(Debug, Clone)]
pub struct Session {
    state: ConversationState,
    log: MessageLog,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Start a conversation; the log opens with the introductory prompt
    pub fn new() -> Self {
        let mut session = Self {
            state: ConversationState::default(),
            log: MessageLog::new(),
        };
        session.handle(Event::Start);
        session
    }

    /// Apply one event and return the lookups the caller has to run
    pub fn handle(&mut self, event: Event) -> Vec<LookupRequest> {
        let state = std::mem::take(&mut self.state);
        let (next, effects) = transition(state, event);
        self.state = next;

        let mut lookups = Vec::new();
        for effect in effects {
            match effect {
                Effect::ClearLog => self.log.clear(),
                Effect::Emit { sender, text } => {
                    self.log.push(sender, text);
                }
                Effect::Lookup(request) => lookups.push(request),
            }
        }
        lookups
    }

    /// Record a user utterance without performing any lookup it triggers.
    ///
    /// While a lookup is pending a completed second pair starts nothing; the
    /// bot says it is still busy and the pair is cleared once the pending
    /// lookup settles.
    pub fn utter(&mut self, text: impl Into<String>) -> Vec<LookupRequest> {
        self.handle(Event::Utterance(text.into()))
    }

    /// Feed back the result of a lookup started earlier.
    ///
    /// Returns `false` when the ticket is stale and the answer was dropped.
    pub fn complete(&mut self, ticket: Ticket, result: Result<Value, BusChatError>) -> bool {
        let current = self.state.pending == Some(ticket);
        let follow_up = self.handle(Event::LookupCompleted { ticket, result });
        debug_assert!(follow_up.is_empty());
        current
    }

    /// Handle an utterance and run any resulting lookup to completion
    pub async fn submit<S>(&mut self, text: impl Into<String>, service: &S)
    where
        S: DirectionsService + ?Sized,
    {
        let lookups = self.utter(text);
        self.run_lookups(lookups, service).await;
    }

    /// Look up a route for the recorded locations and append the answer.
    ///
    /// Does nothing when either location is missing.
    pub async fn lookup_and_respond<S>(&mut self, service: &S)
    where
        S: DirectionsService + ?Sized,
    {
        let lookups = self.handle(Event::LookupRequested);
        self.run_lookups(lookups, service).await;
    }

    async fn run_lookups<S>(&mut self, lookups: Vec<LookupRequest>, service: &S)
    where
        S: DirectionsService + ?Sized,
    {
        for request in lookups {
            debug!(ticket = request.ticket.0, "Running directions lookup inline");
            let result = service.directions(&request.query).await;
            self.complete(request.ticket, result);
        }
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    /// Is a lookup in flight?
    pub fn is_waiting(&self) -> bool {
        self.state.pending.is_some()
    }

    pub fn last_lookup(&self) -> Option<LookupStatus> {
        self.state.last_lookup
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    pub fn messages(&self) -> &[Message] {
        self.log.as_slice()
    }
}
