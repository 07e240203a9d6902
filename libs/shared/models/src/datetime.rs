use chrono::NaiveDateTime;

/// Wire format for appointment times: `YYYY-MM-DD HH:MM:SS`.
pub const APPOINTMENT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parses an appointment time as sent by the client, or an ISO-8601 timestamp
/// as returned by the store.
pub fn parse_appointment_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, APPOINTMENT_TIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
}

pub fn format_appointment_time(value: &NaiveDateTime) -> String {
    value.format(APPOINTMENT_TIME_FORMAT).to_string()
}

pub mod appointment_time {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_appointment_time(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_appointment_time(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid appointment time '{}'", s)))
    }
}
