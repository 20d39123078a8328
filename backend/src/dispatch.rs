//! Event dispatch
//!
//! Routes an [`Event`] to exactly one collaborator operation through a fixed
//! table keyed by [`EventKind`]. The table is a `static` built at compile time
//! and never mutated, so the set of routable tags is exactly the vocabulary.
//!
//! | Tag                 | Collaborator call                          | Outcome shape             |
//! |---------------------|--------------------------------------------|---------------------------|
//! | `signup`            | `accounts.signup(data)`                    | `{success, ...result}`    |
//! | `login`             | `accounts.login(email, password)`          | `{success, ...result}`    |
//! | `logout`            | `accounts.logout(token)`                   | `{success: <bool>}`       |
//! | `getProfile`        | `accounts.get_profile(token)`              | `{success, profile}`      |
//! | `addCalculation`    | `calculations.add_calculation(..)`         | `{success, ...result}`    |
//! | `getHistory`        | `calculations.get_calculation_history(..)` | `{success, ...result}`    |
//! | `deleteCalculation` | `calculations.delete_calculation(..)`      | `{success, ...result}`    |
//!
//! Everything here returns `Result<_, DispatchError>`; containment into a
//! failure outcome happens one level up, in the simulator.

use crate::models::{Event, EventKind, HandlerOutcome};
use crate::services::{Calculation, Collaborators, HandlerError, HistoryFilters, SignupRequest};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Why an event could not be handled
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Tag is not in the fixed vocabulary
    #[error("Unknown event type: {0}")]
    UnknownEventType(String),

    /// Payload is missing fields the handler needs
    #[error("Invalid payload for {event_type}: {source}")]
    InvalidPayload {
        event_type: EventKind,
        #[source]
        source: serde_json::Error,
    },

    /// Collaborator raised
    #[error(transparent)]
    Handler(#[from] HandlerError),
}

/// Handler signature shared by every table entry
pub type HandlerFn = fn(&mut Collaborators, &Value) -> Result<HandlerOutcome, DispatchError>;

struct Route {
    kind: EventKind,
    handler: HandlerFn,
}

static DISPATCH_TABLE: [Route; 7] = [
    Route {
        kind: EventKind::Signup,
        handler: handle_signup,
    },
    Route {
        kind: EventKind::Login,
        handler: handle_login,
    },
    Route {
        kind: EventKind::Logout,
        handler: handle_logout,
    },
    Route {
        kind: EventKind::GetProfile,
        handler: handle_get_profile,
    },
    Route {
        kind: EventKind::AddCalculation,
        handler: handle_add_calculation,
    },
    Route {
        kind: EventKind::GetHistory,
        handler: handle_get_history,
    },
    Route {
        kind: EventKind::DeleteCalculation,
        handler: handle_delete_calculation,
    },
];

/// Look up the handler for a raw tag
pub fn resolve(tag: &str) -> Result<(EventKind, HandlerFn), DispatchError> {
    DISPATCH_TABLE
        .iter()
        .find(|route| route.kind.tag() == tag)
        .map(|route| (route.kind, route.handler))
        .ok_or_else(|| DispatchError::UnknownEventType(tag.to_string()))
}

/// Route `event` to its handler and run it
pub fn dispatch(
    collaborators: &mut Collaborators,
    event: &Event,
) -> Result<HandlerOutcome, DispatchError> {
    let (_, handler) = resolve(&event.event_type)?;
    handler(collaborators, &event.data)
}

// ============================================================================
// Payloads
// ============================================================================

#[derive(Deserialize)]
struct LoginPayload {
    email: String,
    password: String,
}

#[derive(Deserialize)]
struct TokenPayload {
    token: String,
}

#[derive(Deserialize)]
struct AddCalculationPayload {
    token: String,
    calculation: Calculation,
}

#[derive(Deserialize)]
struct HistoryPayload {
    token: String,
    #[serde(default)]
    filters: Option<HistoryFilters>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteCalculationPayload {
    token: String,
    transaction_id: String,
}

fn decode<T: DeserializeOwned>(kind: EventKind, data: &Value) -> Result<T, DispatchError> {
    T::deserialize(data).map_err(|source| DispatchError::InvalidPayload {
        event_type: kind,
        source,
    })
}

// ============================================================================
// Handlers
// ============================================================================

fn handle_signup(
    collaborators: &mut Collaborators,
    data: &Value,
) -> Result<HandlerOutcome, DispatchError> {
    let request: SignupRequest = decode(EventKind::Signup, data)?;
    let result = collaborators.accounts.signup(&request)?;
    Ok(HandlerOutcome::spread(result))
}

fn handle_login(
    collaborators: &mut Collaborators,
    data: &Value,
) -> Result<HandlerOutcome, DispatchError> {
    let payload: LoginPayload = decode(EventKind::Login, data)?;
    let result = collaborators
        .accounts
        .login(&payload.email, &payload.password)?;
    Ok(HandlerOutcome::spread(result))
}

fn handle_logout(
    collaborators: &mut Collaborators,
    data: &Value,
) -> Result<HandlerOutcome, DispatchError> {
    let payload: TokenPayload = decode(EventKind::Logout, data)?;
    Ok(HandlerOutcome::flag(
        collaborators.accounts.logout(&payload.token),
    ))
}

fn handle_get_profile(
    collaborators: &mut Collaborators,
    data: &Value,
) -> Result<HandlerOutcome, DispatchError> {
    let payload: TokenPayload = decode(EventKind::GetProfile, data)?;
    let profile = collaborators.accounts.get_profile(&payload.token)?;
    Ok(HandlerOutcome::nested("profile", profile))
}

fn handle_add_calculation(
    collaborators: &mut Collaborators,
    data: &Value,
) -> Result<HandlerOutcome, DispatchError> {
    let payload: AddCalculationPayload = decode(EventKind::AddCalculation, data)?;
    let result = collaborators
        .calculations
        .add_calculation(&payload.token, &payload.calculation)?;
    Ok(HandlerOutcome::spread(result))
}

fn handle_get_history(
    collaborators: &mut Collaborators,
    data: &Value,
) -> Result<HandlerOutcome, DispatchError> {
    let payload: HistoryPayload = decode(EventKind::GetHistory, data)?;
    let filters = payload.filters.unwrap_or_default();
    let result = collaborators
        .calculations
        .get_calculation_history(&payload.token, &filters)?;
    Ok(HandlerOutcome::spread(result))
}

fn handle_delete_calculation(
    collaborators: &mut Collaborators,
    data: &Value,
) -> Result<HandlerOutcome, DispatchError> {
    let payload: DeleteCalculationPayload = decode(EventKind::DeleteCalculation, data)?;
    let result = collaborators
        .calculations
        .delete_calculation(&payload.token, &payload.transaction_id)?;
    Ok(HandlerOutcome::spread(result))
}
