use crate::core::{AuthProvider, Credentials, Notification, Notifier, Result, Session, SessionStore};
use crate::utils::error::{StorefrontError, BACKEND_UNREACHABLE};
use crate::utils::validation::{require_field, require_min_length};
use std::sync::Arc;

const MIN_CREDENTIAL_CHARS: usize = 6;

pub fn validate_login(credentials: &Credentials) -> Result<()> {
    require_field("username", &credentials.username, "Username is a required field")?;
    require_field("password", &credentials.password, "Password is a required field")?;
    Ok(())
}

/// Checks run in order; the first failure is the one reported.
pub fn validate_registration(credentials: &Credentials, confirm_password: &str) -> Result<()> {
    require_field("username", &credentials.username, "Username is a required field")?;
    require_min_length(
        "username",
        &credentials.username,
        MIN_CREDENTIAL_CHARS,
        "Username must be at least 6 characters",
    )?;
    require_field("password", &credentials.password, "Password is a required field")?;
    require_min_length(
        "password",
        &credentials.password,
        MIN_CREDENTIAL_CHARS,
        "Password must be at least 6 characters",
    )?;
    if credentials.password != confirm_password {
        return Err(StorefrontError::validation("confirm_password", "Passwords do not match"));
    }
    Ok(())
}

/// Login, registration and logout. Owns the persisted copy of the session.
pub struct Authenticator<P, S, N>
where
    P: AuthProvider,
    S: SessionStore,
    N: Notifier,
{
    provider: Arc<P>,
    store: S,
    notifier: N,
}

impl<P, S, N> Authenticator<P, S, N>
where
    P: AuthProvider,
    S: SessionStore,
    N: Notifier,
{
    pub fn new(provider: Arc<P>, store: S, notifier: N) -> Self {
        Self {
            provider,
            store,
            notifier,
        }
    }

    /// Session persisted by an earlier login, or anonymous.
    pub async fn restore(&self) -> Result<Session> {
        self.store.load().await
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<Session> {
        self.warn_on_invalid(validate_login(credentials))?;

        let response = match self.provider.login(credentials).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Login for {} failed: {}", credentials.username, e);
                let message = e.server_message().unwrap_or(BACKEND_UNREACHABLE).to_string();
                self.notifier.notify(Notification::error(message));
                return Err(e);
            }
        };

        let session = Session::authenticated(response.token, response.username, response.balance);
        self.store.save(&session).await?;
        tracing::info!("Logged in as {}", credentials.username);
        self.notifier.notify(Notification::success("Logged in successfully"));
        Ok(session)
    }

    pub async fn register(&self, credentials: &Credentials, confirm_password: &str) -> Result<()> {
        self.warn_on_invalid(validate_registration(credentials, confirm_password))?;

        match self.provider.register(credentials).await {
            Ok(()) => {
                tracing::info!("Registered {}", credentials.username);
                self.notifier.notify(Notification::success("Registered successfully"));
                Ok(())
            }
            Err(e) => {
                let message = match &e {
                    StorefrontError::Rejected { status: 400, .. } => "Username is already taken",
                    _ => BACKEND_UNREACHABLE,
                };
                self.notifier.notify(Notification::error(message));
                Err(e)
            }
        }
    }

    /// Wipes the persisted session; the returned value replaces the live one.
    pub async fn logout(&self) -> Result<Session> {
        self.store.clear().await?;
        tracing::info!("Logged out");
        Ok(Session::anonymous())
    }

    fn warn_on_invalid(&self, check: Result<()>) -> Result<()> {
        if let Err(e) = &check {
            self.notifier.notify(Notification::warning(e.to_string()));
        }
        check
    }
}
