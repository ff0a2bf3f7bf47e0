//! The conversation state machine.
//!
//! `transition` is pure apart from diagnostics logging: it takes the current
//! state and one event and returns the next state plus the effects the
//! caller has to carry out (append a message, clear the log, start a
//! lookup).

use serde_json::Value;
use tracing::{debug, warn};

use super::formatter::{interpret, render_route, DirectionsReply};
use super::message::Sender;
use super::state::{ConversationState, LookupStatus, Mode, Ticket};
use crate::constants::{
    INTRO_PROMPT, LOOKUP_IN_PROGRESS_MSG, NO_ROUTES_FOUND_MSG, PROCESSING_MSG,
    PROMPT_ENTER_DESTINATION, RESET_COMMAND, SERVER_ERROR_MSG,
};
use crate::directions::RouteQuery;
use crate::utils::BusChatError;

/// Something that happened to the conversation
#[derive(Debug)]
pub enum Event {
    /// Session start; greets the user
    Start,
    /// Text submitted by the user
    Utterance(String),
    /// Ask for a lookup with whatever locations are currently recorded
    LookupRequested,
    /// The outbound lookup finished
    LookupCompleted {
        ticket: Ticket,
        result: Result<Value, BusChatError>,
    },
}

/// A lookup the caller must perform and report back with `Event::LookupCompleted`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub ticket: Ticket,
    pub query: RouteQuery,
}

/// Work produced by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ClearLog,
    Emit { sender: Sender, text: String },
    Lookup(LookupRequest),
}

impl Effect {
    fn bot(text: impl Into<String>) -> Self {
        Effect::Emit {
            sender: Sender::Bot,
            text: text.into(),
        }
    }

    fn user(text: impl Into<String>) -> Self {
        Effect::Emit {
            sender: Sender::User,
            text: text.into(),
        }
    }
}

/// Advance the conversation by one event
pub fn transition(state: ConversationState, event: Event) -> (ConversationState, Vec<Effect>) {
    match event {
        Event::Start => (state, vec![Effect::bot(INTRO_PROMPT)]),
        Event::Utterance(text) => on_utterance(state, text),
        Event::LookupRequested => begin_lookup(state, Vec::new()),
        Event::LookupCompleted { ticket, result } => on_lookup_completed(state, ticket, result),
    }
}

fn on_utterance(mut state: ConversationState, text: String) -> (ConversationState, Vec<Effect>) {
    if text == RESET_COMMAND {
        debug!("Conversation reset by user");
        return (
            state.reset(true),
            vec![Effect::ClearLog, Effect::bot(INTRO_PROMPT)],
        );
    }

    let mut effects = vec![Effect::user(text.clone())];
    match state.mode {
        Mode::AwaitingFrom => {
            state.from = text;
            state.mode = Mode::AwaitingTo;
            effects.push(Effect::bot(PROMPT_ENTER_DESTINATION));
            (state, effects)
        }
        Mode::AwaitingTo => {
            state.to = text;
            state.mode = Mode::AwaitingFrom;
            // One lookup at a time; this pair is cleared when the pending one settles.
            if state.pending.is_some() {
                debug!("Second trip entered while a lookup is pending");
                effects.push(Effect::bot(LOOKUP_IN_PROGRESS_MSG));
                return (state, effects);
            }
            begin_lookup(state, effects)
        }
    }
}

fn begin_lookup(
    mut state: ConversationState,
    mut effects: Vec<Effect>,
) -> (ConversationState, Vec<Effect>) {
    if !state.has_both_locations() || state.pending.is_some() {
        return (state, effects);
    }

    let ticket = Ticket(state.next_ticket);
    state.next_ticket += 1;
    state.pending = Some(ticket);

    effects.push(Effect::bot(PROCESSING_MSG));
    effects.push(Effect::Lookup(LookupRequest {
        ticket,
        query: RouteQuery::new(state.from.clone(), state.to.clone()),
    }));
    (state, effects)
}

fn on_lookup_completed(
    state: ConversationState,
    ticket: Ticket,
    result: Result<Value, BusChatError>,
) -> (ConversationState, Vec<Effect>) {
    if state.pending != Some(ticket) {
        debug!(ticket = ticket.0, "Dropping stale directions response");
        return (state, Vec::new());
    }

    // The trip is over whatever the outcome.
    let mut state = state.reset(false);

    let reply = result.and_then(|body| interpret(&body));
    let (status, effects) = match reply {
        Ok(DirectionsReply::NoRoutes) => (
            LookupStatus::NoRoutes,
            vec![Effect::bot(NO_ROUTES_FOUND_MSG)],
        ),
        Ok(DirectionsReply::Route(instructions)) => (
            LookupStatus::Found,
            render_route(&instructions)
                .into_iter()
                .map(Effect::bot)
                .collect(),
        ),
        Err(err) => {
            warn!(ticket = ticket.0, "Directions lookup failed: {}", err);
            (LookupStatus::Failed, vec![Effect::bot(SERVER_ERROR_MSG)])
        }
    };

    state.last_lookup = Some(status);
    (state, effects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{ARRIVED_MSG, PROMPT_ENTER_FROM_LOCATION};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn utter(state: ConversationState, text: &str) -> (ConversationState, Vec<Effect>) {
        transition(state, Event::Utterance(text.to_string()))
    }

    fn bot_texts(effects: &[Effect]) -> Vec<String> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Emit {
                    sender: Sender::Bot,
                    text,
                } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    fn lookup_of(effects: &[Effect]) -> Option<LookupRequest> {
        effects.iter().find_map(|e| match e {
            Effect::Lookup(req) => Some(req.clone()),
            _ => None,
        })
    }

    /// State after "A" then "B", with the lookup in flight
    fn awaiting_answer() -> (ConversationState, Ticket) {
        let (state, _) = utter(ConversationState::default(), "A");
        let (state, effects) = utter(state, "B");
        let ticket = lookup_of(&effects).expect("lookup should start").ticket;
        (state, ticket)
    }

    #[test]
    fn test_start_greets() {
        let (state, effects) = transition(ConversationState::default(), Event::Start);
        assert_eq!(state, ConversationState::default());
        assert_eq!(bot_texts(&effects), vec![INTRO_PROMPT.to_string()]);
    }

    #[test]
    fn test_mode_alternates() {
        let mut state = ConversationState::default();
        let utterances = ["A", "B", "", "  ", "not a place", "D"];
        let mut expected = Mode::AwaitingFrom;
        for text in utterances {
            assert_eq!(state.mode, expected);
            let (next, _) = utter(state, text);
            // Settle any lookup so the next pair can start one too.
            let next = match next.pending {
                Some(ticket) => {
                    transition(
                        next,
                        Event::LookupCompleted {
                            ticket,
                            result: Ok(json!([])),
                        },
                    )
                    .0
                }
                None => next,
            };
            state = next;
            expected = match expected {
                Mode::AwaitingFrom => Mode::AwaitingTo,
                Mode::AwaitingTo => Mode::AwaitingFrom,
            };
        }
        assert_eq!(state.mode, expected);
    }

    #[test]
    fn test_from_utterance_prompts_for_destination() {
        let (state, effects) = utter(ConversationState::default(), "Vinhomes Central Park");
        assert_eq!(state.mode, Mode::AwaitingTo);
        assert_eq!(state.from, "Vinhomes Central Park");
        assert_eq!(
            effects,
            vec![
                Effect::user("Vinhomes Central Park"),
                Effect::bot(PROMPT_ENTER_DESTINATION),
            ]
        );
    }

    #[test]
    fn test_to_utterance_starts_lookup() {
        let (state, _) = utter(ConversationState::default(), "A");
        let (state, effects) = utter(state, "B");

        assert_eq!(state.mode, Mode::AwaitingFrom);
        assert_eq!(state.from, "A");
        assert_eq!(state.to, "B");
        assert_eq!(state.pending, Some(Ticket(0)));
        assert_eq!(
            effects,
            vec![
                Effect::user("B"),
                Effect::bot(PROCESSING_MSG),
                Effect::Lookup(LookupRequest {
                    ticket: Ticket(0),
                    query: RouteQuery::new("A", "B"),
                }),
            ]
        );
    }

    #[test]
    fn test_empty_utterances_are_accepted_verbatim() {
        let (state, effects) = utter(ConversationState::default(), "");
        assert_eq!(state.mode, Mode::AwaitingTo);
        assert_eq!(effects[0], Effect::user(""));

        // An empty "from" means no lookup is possible.
        let (state, effects) = utter(state, "B");
        assert_eq!(state.mode, Mode::AwaitingFrom);
        assert_eq!(lookup_of(&effects), None);
        assert_eq!(effects, vec![Effect::user("B")]);
    }

    #[test]
    fn test_reset_from_any_state() {
        let fresh = ConversationState::default();
        let (after_from, _) = utter(fresh.clone(), "A");
        let (in_flight, _) = awaiting_answer();

        for state in [fresh, after_from, in_flight] {
            let (state, effects) = utter(state, "reset");
            assert_eq!(state.mode, Mode::AwaitingFrom);
            assert!(state.from.is_empty());
            assert!(state.to.is_empty());
            assert_eq!(state.pending, None);
            assert_eq!(effects, vec![Effect::ClearLog, Effect::bot(INTRO_PROMPT)]);
        }
    }

    #[test]
    fn test_reset_is_exact_match() {
        for text in ["Reset", "RESET", " reset", "reset "] {
            let (state, effects) = utter(ConversationState::default(), text);
            assert_eq!(state.mode, Mode::AwaitingTo);
            assert_eq!(state.from, text);
            assert!(!effects.contains(&Effect::ClearLog));
        }
    }

    #[test]
    fn test_no_routes_found() {
        let (state, ticket) = awaiting_answer();
        let (state, effects) = transition(
            state,
            Event::LookupCompleted {
                ticket,
                result: Ok(json!({ "error": "No routes found" })),
            },
        );

        assert_eq!(effects, vec![Effect::bot(NO_ROUTES_FOUND_MSG)]);
        assert_eq!(state.mode, Mode::AwaitingFrom);
        assert!(state.from.is_empty());
        assert!(state.to.is_empty());
        assert_eq!(state.pending, None);
        assert_eq!(state.last_lookup, Some(LookupStatus::NoRoutes));
    }

    #[test]
    fn test_route_is_rendered() {
        let (state, ticket) = awaiting_answer();
        let (state, effects) = transition(
            state,
            Event::LookupCompleted {
                ticket,
                result: Ok(json!(["step1", ["step2a", "step2b"], "step3"])),
            },
        );

        assert_eq!(
            bot_texts(&effects),
            vec![
                "--> step1".to_string(),
                "step2a".to_string(),
                "step2b".to_string(),
                "--> step3".to_string(),
                ARRIVED_MSG.to_string(),
                PROMPT_ENTER_FROM_LOCATION.to_string(),
            ]
        );
        assert!(state.from.is_empty());
        assert_eq!(state.last_lookup, Some(LookupStatus::Found));
    }

    #[test]
    fn test_transport_failure() {
        let (state, ticket) = awaiting_answer();
        let (state, effects) = transition(
            state,
            Event::LookupCompleted {
                ticket,
                result: Err(BusChatError::HttpStatus(502)),
            },
        );

        assert_eq!(effects, vec![Effect::bot(SERVER_ERROR_MSG)]);
        assert_eq!(state.mode, Mode::AwaitingFrom);
        assert!(state.from.is_empty());
        assert!(state.to.is_empty());
        assert_eq!(state.last_lookup, Some(LookupStatus::Failed));
    }

    #[test]
    fn test_malformed_and_service_errors_share_failure_message() {
        for body in [json!({ "routes": [] }), json!({ "error": "Internal error" })] {
            let (state, ticket) = awaiting_answer();
            let (state, effects) = transition(
                state,
                Event::LookupCompleted {
                    ticket,
                    result: Ok(body),
                },
            );
            assert_eq!(effects, vec![Effect::bot(SERVER_ERROR_MSG)]);
            assert_eq!(state.last_lookup, Some(LookupStatus::Failed));
        }
    }

    #[test]
    fn test_lookup_requested_without_locations_is_noop() {
        let (state, effects) = transition(ConversationState::default(), Event::LookupRequested);
        assert!(effects.is_empty());
        assert_eq!(state, ConversationState::default());

        let (state, _) = utter(ConversationState::default(), "A");
        let before = state.clone();
        let (state, effects) = transition(state, Event::LookupRequested);
        assert!(effects.is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn test_lookup_requested_while_pending_is_noop() {
        let (state, _) = awaiting_answer();
        let before = state.clone();
        let (state, effects) = transition(state, Event::LookupRequested);
        assert!(effects.is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn test_second_trip_while_pending_is_answered() {
        let (state, ticket) = awaiting_answer();
        let (state, _) = utter(state, "C");
        let (state, effects) = utter(state, "D");

        assert_eq!(
            effects,
            vec![Effect::user("D"), Effect::bot(LOOKUP_IN_PROGRESS_MSG)]
        );
        assert_eq!(state.mode, Mode::AwaitingFrom);
        assert_eq!(state.pending, Some(ticket));

        // The first trip's answer still lands and ends the conversation round.
        let (state, effects) = transition(
            state,
            Event::LookupCompleted {
                ticket,
                result: Ok(json!({ "error": "No routes found" })),
            },
        );
        assert_eq!(effects, vec![Effect::bot(NO_ROUTES_FOUND_MSG)]);
        assert!(state.from.is_empty());
        assert!(state.to.is_empty());
    }

    #[test]
    fn test_stale_response_after_reset_is_dropped() {
        let (state, ticket) = awaiting_answer();
        let (state, _) = utter(state, "reset");
        let before = state.clone();

        let (state, effects) = transition(
            state,
            Event::LookupCompleted {
                ticket,
                result: Ok(json!(["late"])),
            },
        );
        assert!(effects.is_empty());
        assert_eq!(state, before);

        // The next trip gets a fresh ticket.
        let (state, _) = utter(state, "C");
        let (_, effects) = utter(state, "D");
        assert_eq!(lookup_of(&effects).map(|r| r.ticket), Some(Ticket(1)));
    }
}
