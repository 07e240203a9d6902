use std::fmt;

/// Bootstrap colour of an alert banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Danger,
    Success,
}

impl AlertKind {
    pub fn color(&self) -> &'static str {
        match self {
            AlertKind::Danger => "danger",
            AlertKind::Success => "success",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub text: String,
}

impl Alert {
    pub fn danger(text: impl Into<String>) -> Self {
        Self { kind: AlertKind::Danger, text: text.into() }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self { kind: AlertKind::Success, text: text.into() }
    }

    pub fn is_error(&self) -> bool {
        self.kind == AlertKind::Danger
    }

    pub fn css_class(&self) -> String {
        format!("alert alert-{}", self.kind.color())
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_classes() {
        assert_eq!(Alert::danger("nope").css_class(), "alert alert-danger");
        assert_eq!(Alert::success("ok").css_class(), "alert alert-success");
        assert!(Alert::danger("nope").is_error());
        assert_eq!(Alert::success("ok").to_string(), "ok");
    }
}
