use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// `userID` arrives as a number from the API but is kept as text, the way
/// the session stores it.
fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("invalid user id: {}", other))),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub message: String,
    #[serde(rename = "userID", deserialize_with = "id_as_string")]
    pub user_id: String,
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TokenStatus {
    pub valid: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SessionInfo {
    #[serde(deserialize_with = "id_as_string")]
    pub user_id: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hospital {
    pub hospital_id: i64,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AvailableTime {
    pub timeslot_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpcomingAppointment {
    pub appointment_id: i64,
    pub appointment_time: String,
    pub status: String,
    pub hospital_id: i64,
    #[serde(default)]
    pub hospital_name: String,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Condition {
    pub condition_name: String,
    #[serde(default)]
    pub condition_description: Option<String>,
    #[serde(default)]
    pub diagnosed_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Medication {
    pub medication_name: String,
    #[serde(default)]
    pub dosage: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabResult {
    pub history_id: i64,
    pub report_date: String,
    #[serde(default)]
    pub lab_results: Option<String>,
    #[serde(default)]
    pub doctor_notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriorAppointment {
    pub appointment_id: i64,
    pub appointment_time: String,
    pub hospital_id: i64,
    #[serde(default)]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_response_keeps_user_id_as_text() {
        let numeric: LoginResponse = serde_json::from_value(json!({
            "message": "Login successful",
            "userID": 12,
            "token": "abc"
        })).unwrap();
        let text: LoginResponse = serde_json::from_value(json!({
            "message": "Login successful",
            "userID": "12"
        })).unwrap();

        assert_eq!(numeric.user_id, "12");
        assert_eq!(text.user_id, "12");
        assert!(text.token.is_none());
    }
}
