//! Turns the directions service's JSON payload into chat lines.
//!
//! The payload is untyped: either `{"error": "..."}` or an array whose
//! elements are a single instruction string or an array of instruction
//! strings. Anything else is treated as malformed.

use serde_json::Value;

use crate::constants::{ARRIVED_MSG, ARROW, NO_ROUTES_FOUND, PROMPT_ENTER_FROM_LOCATION};
use crate::utils::BusChatError;

/// One element of a route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// A standalone step, shown with an arrow marker
    Step(String),
    /// Grouped steps, each shown as its own message
    Group(Vec<String>),
}

/// A well-formed answer from the directions service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectionsReply {
    NoRoutes,
    Route(Vec<Instruction>),
}

/// Validate the payload shape before anything is shown to the user
pub fn interpret(body: &Value) -> Result<DirectionsReply, BusChatError> {
    match body {
        Value::Object(map) => match map.get("error") {
            Some(Value::String(error)) if error == NO_ROUTES_FOUND => Ok(DirectionsReply::NoRoutes),
            Some(Value::String(error)) => Err(BusChatError::ServiceError(error.clone())),
            Some(other) => Err(BusChatError::MalformedResponse(format!(
                "error field is not a string: {}",
                other
            ))),
            None => Err(BusChatError::MalformedResponse(
                "expected an array of directions, found an object".to_string(),
            )),
        },
        Value::Array(elements) => elements
            .iter()
            .enumerate()
            .map(|(idx, element)| instruction(idx, element))
            .collect::<Result<Vec<_>, _>>()
            .map(DirectionsReply::Route),
        other => Err(BusChatError::MalformedResponse(format!(
            "expected an array of directions, found {}",
            kind(other)
        ))),
    }
}

fn instruction(idx: usize, element: &Value) -> Result<Instruction, BusChatError> {
    match element {
        Value::String(step) => Ok(Instruction::Step(step.clone())),
        Value::Array(inner) => inner
            .iter()
            .map(|sub| match sub {
                Value::String(step) => Ok(step.clone()),
                other => Err(BusChatError::MalformedResponse(format!(
                    "element {} contains {} instead of a string",
                    idx,
                    kind(other)
                ))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Instruction::Group),
        other => Err(BusChatError::MalformedResponse(format!(
            "element {} is {}",
            idx,
            kind(other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Chat lines for a route, including the closing arrival and restart prompts
pub fn render_route(instructions: &[Instruction]) -> Vec<String> {
    let mut lines = Vec::new();
    for instruction in instructions {
        match instruction {
            Instruction::Step(step) => lines.push(format!("{}{}", ARROW, step)),
            Instruction::Group(steps) => lines.extend(steps.iter().cloned()),
        }
    }
    lines.push(ARRIVED_MSG.to_string());
    lines.push(PROMPT_ENTER_FROM_LOCATION.to_string());
    lines
}
