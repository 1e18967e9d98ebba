use std::env;
use tracing::debug;

/// Reddit application credentials, read from the environment (and `.env`, if present).
///
/// Nothing here is validated up front. Missing values only show up once Reddit rejects a
/// request.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub user_agent: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    pub fn from_env() -> Self {
        match dotenv::dotenv() {
            Ok(path) => debug!("Loaded environment from {}", path.display()),
            Err(err) => debug!("No .env file loaded: {err}"),
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            client_id: non_empty("client_id").unwrap_or_default(),
            client_secret: non_empty("client_secret").unwrap_or_default(),
            user_agent: non_empty("user_agent").unwrap_or_default(),
            username: non_empty("username"),
            password: non_empty("password"),
        }
    }

    /// Username and password, when both are set.
    pub fn login(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some((username, password)),
            _ => None,
        }
    }
}

// Keeps secrets out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
