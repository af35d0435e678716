use tower_sessions::Session;
use tracing::debug;

use crate::auth::dto::RegisterRequest;
use crate::auth::repo::UserRepository;
use crate::auth::repo_types::{Profile, Role, UserRecord};
use crate::errors::AuthError;

pub const MIN_PASSWORD_LEN: usize = 6;
pub const DEFAULT_NAME: &str = "New User";
pub const DEFAULT_COMPANY: &str = "Personal";

const SESSION_USER_KEY: &str = "user";
const SESSION_AUTHENTICATED_KEY: &str = "authenticated";

pub(crate) fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && email.contains('@')
}

pub(crate) fn validate_registration(email: &str, password: &str) -> Result<(), AuthError> {
    if !is_valid_email(email) {
        return Err(AuthError::InvalidEmail);
    }
    // length in UTF-16 code units, so an emoji counts as two
    if password.encode_utf16().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::WeakPassword);
    }
    Ok(())
}

/// Validate and store a new account. New accounts always get `Role::User`.
pub async fn register(
    repo: &dyn UserRepository,
    req: RegisterRequest,
) -> Result<Profile, AuthError> {
    validate_registration(&req.email, &req.password)?;

    let profile = Profile {
        email: req.email,
        name: req.name.unwrap_or_else(|| DEFAULT_NAME.into()),
        role: Role::User,
        company: req.company.unwrap_or_else(|| DEFAULT_COMPANY.into()),
    };
    repo.insert(UserRecord {
        password: req.password,
        profile,
    })
    .await
}

/// Check credentials. Unknown email and wrong password are indistinguishable.
pub async fn login(
    repo: &dyn UserRepository,
    email: &str,
    password: &str,
) -> Result<Profile, AuthError> {
    match repo.find_by_email(email).await {
        Some(user) if user.password == password => Ok(user.profile),
        _ => Err(AuthError::InvalidCredentials),
    }
}

/// Bind the profile to the session under a fresh session id.
pub async fn establish_session(session: &Session, profile: &Profile) -> Result<(), AuthError> {
    session.cycle_id().await?;
    session.insert(SESSION_USER_KEY, profile).await?;
    session.insert(SESSION_AUTHENTICATED_KEY, true).await?;
    debug!(email = %profile.email, "session established");
    Ok(())
}

pub async fn current_user(session: &Session) -> Result<Option<Profile>, AuthError> {
    Ok(session.get::<Profile>(SESSION_USER_KEY).await?)
}

pub async fn end_session(session: &Session) -> Result<(), AuthError> {
    session.flush().await?;
    Ok(())
}
