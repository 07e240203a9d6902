use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-2xx status. `message` is the body's
    /// `error` field, empty when the body carried none.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Session storage error: {0}")]
    Session(#[from] std::io::Error),
}

impl ClientError {
    /// The server's message if it sent one, else `fallback`.
    pub fn api_message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self {
            ClientError::Api { message, .. } if !message.is_empty() => message,
            _ => fallback,
        }
    }

    pub fn is_api(&self) -> bool {
        matches!(self, ClientError::Api { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_message_fallback() {
        let with_message = ClientError::Api { status: 409, message: "slot taken".to_string() };
        let without = ClientError::Api { status: 500, message: String::new() };

        assert_eq!(with_message.api_message_or("Failed"), "slot taken");
        assert_eq!(without.api_message_or("Failed"), "Failed");
        assert!(without.is_api());
    }
}
