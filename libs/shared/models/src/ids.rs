/// Record ids arrive either as JSON numbers or, from clients that keep them in
/// string storage, as numeric strings.
pub mod flexible_id {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    pub fn serialize<S>(value: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(id) => serializer.serialize_i64(*id),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<RawId>::deserialize(deserializer)? {
            None => Ok(None),
            Some(RawId::Number(id)) => Ok(Some(id)),
            Some(RawId::Text(text)) if text.trim().is_empty() => Ok(None),
            Some(RawId::Text(text)) => text
                .trim()
                .parse::<i64>()
                .map(Some)
                .map_err(|_| serde::de::Error::custom(format!("Invalid id '{}'", text))),
        }
    }
}

/// Ids read from a query string. Anything that is not a number (`user_id=`,
/// `user_id=null` from a client without a session) reads as absent so the
/// handler answers with its own JSON error instead of an extractor rejection.
pub mod query_id {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.and_then(|text| text.trim().parse::<i64>().ok()))
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Deserialize)]
    struct Query {
        #[serde(default, deserialize_with = "super::query_id::deserialize")]
        user_id: Option<i64>,
    }

    fn query(raw: &str) -> Query {
        serde_json::from_value(serde_json::json!({ "user_id": raw })).unwrap()
    }

    #[test]
    fn test_query_id_treats_junk_as_absent() {
        assert_eq!(query("7").user_id, Some(7));
        assert_eq!(query(" 7 ").user_id, Some(7));
        assert_eq!(query("").user_id, None);
        assert_eq!(query("null").user_id, None);
        assert_eq!(query("abc").user_id, None);

        let missing: Query = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.user_id, None);
    }

    #[derive(Serialize, Deserialize)]
    struct Body {
        #[serde(default, with = "super::flexible_id")]
        user_id: Option<i64>,
    }

    #[test]
    fn test_accepts_numbers_and_numeric_strings() {
        let body: Body = serde_json::from_str(r#"{"user_id": 4}"#).unwrap();
        assert_eq!(body.user_id, Some(4));

        let body: Body = serde_json::from_str(r#"{"user_id": "4"}"#).unwrap();
        assert_eq!(body.user_id, Some(4));

        let body: Body = serde_json::from_str(r#"{"user_id": null}"#).unwrap();
        assert_eq!(body.user_id, None);

        let body: Body = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(body.user_id, None);

        let body: Body = serde_json::from_str(r#"{"user_id": ""}"#).unwrap();
        assert_eq!(body.user_id, None);
    }

    #[test]
    fn test_rejects_non_numeric_strings() {
        assert!(serde_json::from_str::<Body>(r#"{"user_id": "null"}"#).is_err());
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&Body { user_id: Some(9) }).unwrap();
        assert_eq!(json, r#"{"user_id":9}"#);
    }
}
