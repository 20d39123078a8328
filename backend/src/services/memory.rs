//! In-memory collaborators
//!
//! A small simulated database shared by the account, calculation and status
//! collaborators. Nothing is persisted; credential checks are deliberately
//! simple (salted SHA-256, UUID session tokens).

use crate::services::types::{
    Calculation, CalculationKind, ContactInfo, HistoryFilters, Preferences, ProfileInfo,
    SignupRequest,
};
use crate::services::{AccountService, CalculationService, HandlerError, StoreStatusProvider};
use serde::Serialize;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use uuid::Uuid;

const MIN_PASSWORD_LEN: usize = 8;

/// Database handle shared by the in-memory collaborators
pub type SharedDatabase = Rc<RefCell<SimDatabase>>;

#[derive(Debug, Clone)]
struct UserRecord {
    id: Uuid,
    salt: String,
    password_hash: String,
    profile: ProfileInfo,
    contact: ContactInfo,
    preferences: Preferences,
}

impl UserRecord {
    fn summary(&self) -> Value {
        json!({
            "id": self.id,
            "email": self.contact.email,
            "firstName": self.profile.first_name,
            "lastName": self.profile.last_name,
        })
    }
}

/// Stored calculation, tagged with its owner and id
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRecord {
    pub transaction_id: Uuid,
    pub user_id: Uuid,
    #[serde(flatten)]
    pub calculation: Calculation,
}

/// Users, sessions and calculation records
#[derive(Debug, Default)]
pub struct SimDatabase {
    users: HashMap<Uuid, UserRecord>,
    /// Lower-cased email → user id
    emails: HashMap<String, Uuid>,
    /// Session token → user id
    sessions: HashMap<String, Uuid>,
    calculations: Vec<CalculationRecord>,
}

impl SimDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_users(&self) -> usize {
        self.users.len()
    }

    pub fn num_sessions(&self) -> usize {
        self.sessions.len()
    }

    pub fn num_calculations(&self) -> usize {
        self.calculations.len()
    }

    /// User id behind a session token
    pub fn verify_token(&self, token: &str) -> Result<Uuid, HandlerError> {
        self.sessions
            .get(token)
            .copied()
            .ok_or(HandlerError::InvalidToken)
    }

    /// Stored calculations in insertion order
    pub fn calculations(&self) -> &[CalculationRecord] {
        &self.calculations
    }
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validate_signup(request: &SignupRequest) -> Result<(), HandlerError> {
    let email = request.contact.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(HandlerError::Validation(format!(
            "invalid email address '{}'",
            request.contact.email
        )));
    }
    if request.authentication.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(HandlerError::Validation(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    if request.profile.first_name.trim().is_empty() {
        return Err(HandlerError::Validation("first name is required".to_string()));
    }
    Ok(())
}

/// [`AccountService`] over a [`SimDatabase`]
#[derive(Debug, Clone)]
pub struct InMemoryAccounts {
    db: SharedDatabase,
}

impl InMemoryAccounts {
    pub fn new(db: SharedDatabase) -> Self {
        Self { db }
    }
}

impl AccountService for InMemoryAccounts {
    fn signup(&mut self, request: &SignupRequest) -> Result<Value, HandlerError> {
        validate_signup(request)?;

        let mut db = self.db.borrow_mut();
        let email = normalize_email(&request.contact.email);
        if db.emails.contains_key(&email) {
            return Err(HandlerError::Conflict(format!("user with email {}", email)));
        }

        let salt = Uuid::new_v4().simple().to_string();
        let user = UserRecord {
            id: Uuid::new_v4(),
            password_hash: hash_password(&salt, &request.authentication.password),
            salt,
            profile: request.profile.clone(),
            contact: ContactInfo {
                email: email.clone(),
                phone: request.contact.phone.clone(),
            },
            preferences: request.preferences.clone(),
        };

        let summary = user.summary();
        db.emails.insert(email, user.id);
        db.users.insert(user.id, user);

        Ok(json!({ "user": summary }))
    }

    fn login(&mut self, email: &str, password: &str) -> Result<Value, HandlerError> {
        let mut db = self.db.borrow_mut();
        let user_id = db
            .emails
            .get(&normalize_email(email))
            .copied()
            .ok_or(HandlerError::InvalidCredentials)?;
        let user = db
            .users
            .get(&user_id)
            .ok_or(HandlerError::InvalidCredentials)?;

        if hash_password(&user.salt, password) != user.password_hash {
            return Err(HandlerError::InvalidCredentials);
        }

        let summary = user.summary();
        let token = Uuid::new_v4().to_string();
        db.sessions.insert(token.clone(), user_id);

        Ok(json!({ "token": token, "user": summary }))
    }

    fn logout(&mut self, token: &str) -> bool {
        self.db.borrow_mut().sessions.remove(token).is_some()
    }

    fn get_profile(&self, token: &str) -> Result<Value, HandlerError> {
        let db = self.db.borrow();
        let user_id = db.verify_token(token)?;
        let user = db
            .users
            .get(&user_id)
            .ok_or_else(|| HandlerError::NotFound(format!("user {}", user_id)))?;

        Ok(json!({
            "id": user.id,
            "email": user.contact.email,
            "profile": user.profile,
            "contact": user.contact,
            "preferences": user.preferences,
        }))
    }
}

/// [`CalculationService`] over a [`SimDatabase`]
#[derive(Debug, Clone)]
pub struct InMemoryCalculations {
    db: SharedDatabase,
}

impl InMemoryCalculations {
    pub fn new(db: SharedDatabase) -> Self {
        Self { db }
    }
}

impl CalculationService for InMemoryCalculations {
    fn add_calculation(
        &mut self,
        token: &str,
        calculation: &Calculation,
    ) -> Result<Value, HandlerError> {
        let mut db = self.db.borrow_mut();
        let user_id = db.verify_token(token)?;

        if calculation.amount < 0 {
            return Err(HandlerError::Validation(
                "amount must not be negative".to_string(),
            ));
        }

        let record = CalculationRecord {
            transaction_id: Uuid::new_v4(),
            user_id,
            calculation: calculation.clone(),
        };
        let value = json!({ "calculation": record });
        db.calculations.push(record);

        Ok(value)
    }

    fn get_calculation_history(
        &self,
        token: &str,
        filters: &HistoryFilters,
    ) -> Result<Value, HandlerError> {
        let db = self.db.borrow();
        let user_id = db.verify_token(token)?;

        let matching: Vec<&CalculationRecord> = db
            .calculations
            .iter()
            .filter(|record| record.user_id == user_id && filters.matches(&record.calculation))
            .collect();

        let sum_of = |kind: CalculationKind| -> Result<i64, HandlerError> {
            matching
                .iter()
                .filter(|record| record.calculation.kind == kind)
                .try_fold(0i64, |total, record| total.checked_add(record.calculation.amount))
                .ok_or_else(|| {
                    let label = match kind {
                        CalculationKind::Income => "income",
                        CalculationKind::Expense => "expense",
                    };
                    HandlerError::Validation(format!("{} total overflows", label))
                })
        };
        let total_income = sum_of(CalculationKind::Income)?;
        let total_expense = sum_of(CalculationKind::Expense)?;

        Ok(json!({
            "calculations": matching,
            "total": matching.len(),
            "totalIncome": total_income,
            "totalExpense": total_expense,
        }))
    }

    fn delete_calculation(
        &mut self,
        token: &str,
        transaction_id: &str,
    ) -> Result<Value, HandlerError> {
        let mut db = self.db.borrow_mut();
        let user_id = db.verify_token(token)?;

        let position = db
            .calculations
            .iter()
            .position(|record| {
                record.user_id == user_id && record.transaction_id.to_string() == transaction_id
            })
            .ok_or_else(|| HandlerError::NotFound(format!("calculation {}", transaction_id)))?;
        let removed = db.calculations.remove(position);

        Ok(json!({ "deleted": removed.transaction_id }))
    }
}

/// [`StoreStatusProvider`] reporting database counters
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    db: SharedDatabase,
}

impl InMemoryStore {
    pub fn new(db: SharedDatabase) -> Self {
        Self { db }
    }
}

impl StoreStatusProvider for InMemoryStore {
    fn status(&self) -> Value {
        let db = self.db.borrow();
        json!({
            "connected": true,
            "users": db.num_users(),
            "sessions": db.num_sessions(),
            "calculations": db.num_calculations(),
        })
    }
}
