use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use tower_sessions::Session;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{
            CheckResponse, LoginRequest, LoginResponse, MessageResponse, RegisterRequest,
            RegisterResponse, UsersResponse,
        },
        services,
    },
    errors::AuthError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/check", get(check))
        .route("/auth/users", get(list_users))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<RegisterResponse>, AuthError> {
    let Json(payload) = payload?;
    let email = payload.email.clone();

    let user = services::register(state.users.as_ref(), payload)
        .await
        .inspect_err(|e| warn!(%email, error = %e, "registration rejected"))?;

    info!(email = %user.email, "user registered");
    Ok(Json(RegisterResponse {
        success: true,
        message: "Account created successfully",
        user,
    }))
}

#[instrument(skip(state, session, payload))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AuthError> {
    let Json(payload) = payload?;

    let user = match services::login(state.users.as_ref(), &payload.email, &payload.password).await
    {
        Ok(u) => u,
        Err(e) => {
            warn!(email = %payload.email, "login invalid credentials");
            return Err(e);
        }
    };

    services::establish_session(&session, &user).await?;

    info!(email = %user.email, role = ?user.role, "user logged in");
    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful",
        user,
        redirect: "/",
    }))
}

#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Json<MessageResponse>, AuthError> {
    services::end_session(&session).await?;
    info!("session invalidated");
    Ok(Json(MessageResponse {
        success: true,
        message: "Logged out successfully",
    }))
}

#[instrument(skip(session))]
pub async fn check(session: Session) -> Result<Json<CheckResponse>, AuthError> {
    let user = services::current_user(&session).await?;
    Ok(Json(CheckResponse {
        authenticated: user.is_some(),
        user,
    }))
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Json<UsersResponse> {
    Json(UsersResponse {
        total_users: state.users.count().await,
        user_emails: state.users.list_emails().await,
    })
}
