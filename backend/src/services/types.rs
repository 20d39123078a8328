//! Payload types handed to collaborators
//!
//! Field names follow the camelCase JSON used by event scripts.

use serde::{Deserialize, Serialize};

/// Signup payload: profile, contact, authentication and preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub profile: ProfileInfo,
    pub contact: ContactInfo,
    pub authentication: AuthenticationInfo,
    #[serde(default)]
    pub preferences: Preferences,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInfo {
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Clone, PartialEq, Deserialize)]
pub struct AuthenticationInfo {
    pub password: String,
}

impl std::fmt::Debug for AuthenticationInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticationInfo")
            .field("password", &"<redacted>")
            .finish()
    }
}

// Passwords never serialize back out
impl Serialize for AuthenticationInfo {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("AuthenticationInfo", 1)?;
        s.serialize_field("password", "<redacted>")?;
        s.end()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Direction of money in a calculation record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculationKind {
    Income,
    Expense,
}

/// One calculation record as submitted by a client
///
/// Amounts are integer minor units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calculation {
    #[serde(rename = "type")]
    pub kind: CalculationKind,
    pub amount: i64,
    pub month: String,
    pub year: i32,
    pub category: String,
}

/// Optional history filters; an empty set matches everything
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryFilters {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<CalculationKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl HistoryFilters {
    /// Whether `calculation` passes every filter that is set
    pub fn matches(&self, calculation: &Calculation) -> bool {
        self.kind.map_or(true, |kind| kind == calculation.kind)
            && self
                .month
                .as_deref()
                .map_or(true, |month| month == calculation.month)
            && self.year.map_or(true, |year| year == calculation.year)
            && self
                .category
                .as_deref()
                .map_or(true, |category| category == calculation.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn salary() -> Calculation {
        Calculation {
            kind: CalculationKind::Income,
            amount: 1_000_000,
            month: "Mart".to_string(),
            year: 2025,
            category: "salary".to_string(),
        }
    }

    #[test]
    fn test_signup_request_parses_demo_payload() {
        let request: SignupRequest = serde_json::from_value(json!({
            "profile": { "firstName": "Ali", "lastName": "Valiyev", "birthDate": "1990-01-01", "gender": "male" },
            "contact": { "email": "ali@example.com", "phone": "+998901234567" },
            "authentication": { "password": "SecurePass123!@#" },
            "preferences": { "theme": "dark", "language": "uz" }
        }))
        .unwrap();

        assert_eq!(request.profile.first_name, "Ali");
        assert_eq!(request.contact.email, "ali@example.com");
        assert_eq!(request.preferences.language.as_deref(), Some("uz"));
    }

    #[test]
    fn test_password_is_redacted() {
        let auth = AuthenticationInfo {
            password: "hunter22".to_string(),
        };
        assert!(!format!("{:?}", auth).contains("hunter22"));
        assert_eq!(serde_json::to_value(&auth).unwrap()["password"], "<redacted>");
    }

    #[test]
    fn test_empty_filters_match_everything() {
        assert!(HistoryFilters::default().matches(&salary()));
    }

    #[test]
    fn test_filters_combine_with_and() {
        let filters = HistoryFilters {
            kind: Some(CalculationKind::Income),
            year: Some(2024),
            ..Default::default()
        };
        assert!(!filters.matches(&salary()));
    }
}
