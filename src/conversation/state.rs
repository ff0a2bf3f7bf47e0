use serde::Serialize;

/// Which location the next utterance fills in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    AwaitingFrom,
    AwaitingTo,
}

impl Mode {
    /// Short label for the status bar
    pub fn label(&self) -> &'static str {
        match self {
            Mode::AwaitingFrom => "Starting location",
            Mode::AwaitingTo => "Destination",
        }
    }
}

/// Identifies one outbound lookup so late answers can be told apart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(pub u64);

/// How the most recent lookup settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupStatus {
    Found,
    NoRoutes,
    Failed,
}

/// Everything the sequencer needs to decide what an utterance means
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationState {
    pub mode: Mode,
    pub from: String,
    pub to: String,
    /// Lookup currently in flight, if any
    pub pending: Option<Ticket>,
    /// Next ticket number to hand out; survives resets
    pub next_ticket: u64,
    pub last_lookup: Option<LookupStatus>,
}

impl ConversationState {
    /// Clear the trip so the next utterance starts a new one.
    ///
    /// With `full` set the outcome of the previous lookup is forgotten as
    /// well. The ticket counter is always kept.
    pub fn reset(self, full: bool) -> Self {
        Self {
            next_ticket: self.next_ticket,
            last_lookup: if full { None } else { self.last_lookup },
            ..Self::default()
        }
    }

    pub fn has_both_locations(&self) -> bool {
        !self.from.is_empty() && !self.to.is_empty()
    }
}
