//! Event scripts fed to the simulator at startup

use anyhow::{Context, Result};
use event_simulator_core_rs::Event;
use serde_json::json;
use std::path::Path;

/// The three sample events: signup, login, and a calculation posted with a
/// placeholder token (which the store rejects).
pub fn demo_events() -> Vec<Event> {
    vec![
        Event::new(
            "signup",
            json!({
                "profile": { "firstName": "Ali", "lastName": "Valiyev", "birthDate": "1990-01-01", "gender": "male" },
                "contact": { "email": "ali@example.com", "phone": "+998901234567" },
                "authentication": { "password": "SecurePass123!@#" },
                "preferences": { "theme": "dark", "language": "uz" }
            }),
        ),
        Event::new(
            "login",
            json!({ "email": "ali@example.com", "password": "SecurePass123!@#" }),
        ),
        Event::new(
            "addCalculation",
            json!({
                "token": "dummy-token",
                "calculation": { "type": "income", "amount": 1000000, "month": "Mart", "year": 2025, "category": "salary" }
            }),
        ),
    ]
}

/// Load a JSON array of `{"type": ..., "data": ...}` objects
pub fn load_events(path: &Path) -> Result<Vec<Event>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading event script {}", path.display()))?;
    let events: Vec<Event> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing event script {}", path.display()))?;
    Ok(events)
}
