use std::time::Duration;

use tracing::{info, warn};

use crate::api::ApiClient;
use crate::session::{Session, SessionStore};
use crate::widgets::Alert;

/// How long the signup confirmation stays up before switching to login.
pub const SIGNUP_REDIRECT_DELAY: Duration = Duration::from_secs(2);

pub const MISSING_FIELDS: &str = "Please fill in all required fields";
pub const PASSWORD_MISMATCH: &str = "Passwords do not match";
pub const SIGNUP_SUCCESS: &str = "Account created successfully! Redirecting to login...";
pub const GENERIC_FAILURE: &str = "An error occurred. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Session stored; the caller navigates to the dashboard.
    LoggedIn(Session),
    /// Account created; the caller calls [`AuthForm::finish_signup`] after
    /// [`SIGNUP_REDIRECT_DELAY`].
    SignedUp,
}

#[derive(Debug, Clone)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub alert: Option<Alert>,
}

impl Default for AuthForm {
    fn default() -> Self {
        Self {
            mode: AuthMode::Login,
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            alert: None,
        }
    }
}

impl AuthForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_login(&self) -> bool {
        self.mode == AuthMode::Login
    }

    pub fn reset(&mut self) {
        self.email.clear();
        self.password.clear();
        self.confirm_password.clear();
        self.alert = None;
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::Login,
        };
        self.reset();
    }

    pub fn finish_signup(&mut self) {
        self.mode = AuthMode::Login;
        self.reset();
    }

    fn validate(&self) -> Result<(), &'static str> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(MISSING_FIELDS);
        }
        if !self.is_login() && self.password != self.confirm_password {
            return Err(PASSWORD_MISMATCH);
        }
        Ok(())
    }

    /// Validates and sends the form. Failures land in `alert` and yield `None`.
    pub async fn submit<S>(&mut self, api: &ApiClient, sessions: &S) -> Option<AuthOutcome>
    where
        S: SessionStore + ?Sized,
    {
        self.alert = None;

        if let Err(msg) = self.validate() {
            self.alert = Some(Alert::danger(msg));
            return None;
        }

        match self.mode {
            AuthMode::Login => self.submit_login(api, sessions).await,
            AuthMode::Signup => self.submit_signup(api).await,
        }
    }

    async fn submit_login<S>(&mut self, api: &ApiClient, sessions: &S) -> Option<AuthOutcome>
    where
        S: SessionStore + ?Sized,
    {
        let response = match api.login(&self.email, &self.password).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Login failed: {}", e);
                self.alert = Some(Alert::danger(e.api_message_or(GENERIC_FAILURE)));
                return None;
            }
        };

        let session = Session::new(response.user_id, response.token);
        if let Err(e) = sessions.save(&session) {
            warn!("Could not store session: {}", e);
            self.alert = Some(Alert::danger(GENERIC_FAILURE));
            return None;
        }

        info!("Logged in as user {}", session.user_id);
        self.alert = Some(Alert::success(response.message));
        Some(AuthOutcome::LoggedIn(session))
    }

    async fn submit_signup(&mut self, api: &ApiClient) -> Option<AuthOutcome> {
        let confirm = Some(self.confirm_password.as_str());
        match api.signup(&self.email, &self.password, confirm).await {
            Ok(_) => {
                self.alert = Some(Alert::success(SIGNUP_SUCCESS));
                Some(AuthOutcome::SignedUp)
            }
            Err(e) => {
                warn!("Signup failed: {}", e);
                self.alert = Some(Alert::danger(e.api_message_or(GENERIC_FAILURE)));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        let mut form = AuthForm::new();
        assert_eq!(form.validate(), Err(MISSING_FIELDS));

        form.email = "a@b.co".to_string();
        form.password = "pw".to_string();
        assert_eq!(form.validate(), Ok(()));

        form.mode = AuthMode::Signup;
        form.confirm_password = "other".to_string();
        assert_eq!(form.validate(), Err(PASSWORD_MISMATCH));
    }

    #[test]
    fn test_toggle_clears_form() {
        let mut form = AuthForm::new();
        form.email = "a@b.co".to_string();
        form.alert = Some(Alert::danger("x"));

        form.toggle_mode();

        assert_eq!(form.mode, AuthMode::Signup);
        assert!(form.email.is_empty());
        assert!(form.alert.is_none());
    }
}
