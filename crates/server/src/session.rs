// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cookie session state and the admin guard.
//!
//! Session data lives server-side in the session store, keyed by a random
//! cookie id. Two values are kept: the logged-in username and a queue of
//! pending flash messages.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::{debug, warn};

use crate::HttpError;

/// Session key for the authenticated username.
pub const SESSION_USER_KEY: &str = "harbour:auth:user";

/// Session key for pending flash messages.
pub const SESSION_FLASH_KEY: &str = "harbour:flash";

/// Session wrapper for the logged-in administrator.
#[derive(Default, Deserialize, Serialize, Debug)]
pub struct SessionUser(pub String);

impl SessionUser {
    /// Marks the session as logged in.
    ///
    /// The session id is cycled first so a pre-login cookie cannot be
    /// reused.
    pub async fn insert(session: &Session, username: &str) -> Result<(), HttpError> {
        session.cycle_id().await?;
        session
            .insert(SESSION_USER_KEY, Self(username.to_string()))
            .await?;
        Ok(())
    }

    /// Returns the logged-in username, if any.
    pub async fn get(session: &Session) -> Result<Option<String>, HttpError> {
        Ok(session
            .get::<Self>(SESSION_USER_KEY)
            .await?
            .map(|Self(username)| username))
    }
}

/// Severity of a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Danger,
    Warning,
    Info,
}

/// A one-shot message shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    /// Queues a message for the next page view.
    pub async fn push(
        session: &Session,
        level: FlashLevel,
        message: impl Into<String>,
    ) -> Result<(), HttpError> {
        let mut pending: Vec<Self> = session
            .get::<Vec<Self>>(SESSION_FLASH_KEY)
            .await?
            .unwrap_or_default();
        pending.push(Self {
            level,
            message: message.into(),
        });
        session.insert(SESSION_FLASH_KEY, pending).await?;
        Ok(())
    }

    /// Removes and returns every queued message.
    pub async fn take_all(session: &Session) -> Result<Vec<Self>, HttpError> {
        Ok(session
            .remove::<Vec<Self>>(SESSION_FLASH_KEY)
            .await?
            .unwrap_or_default())
    }
}

/// Builds the login URL that returns to `next` afterwards.
pub fn login_redirect_target(next: &str) -> String {
    serde_urlencoded::to_string([("next", next)])
        .map_or_else(|_| String::from("/login"), |query| format!("/login?{query}"))
}

/// Accepts only local absolute paths as a post-login destination.
pub fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path) if is_local_path(path) => path,
        _ => "/",
    }
}

fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.contains('\\')
}

/// Extractor for routes that require the administrator.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(admin: AdminSession) -> Result<Redirect, HttpError> {
///     // admin.username, admin.session
/// }
/// ```
///
/// Anonymous callers never reach the handler: a warning flash is queued
/// and they are redirected to `/login?next=<requested path>`.
pub struct AdminSession {
    pub username: String,
    pub session: Session,
}

impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
{
    type Rejection = SessionError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session: Session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, reason)| {
                warn!(reason, "Session layer missing from request");
                SessionError::Unavailable(HttpError::internal("Session unavailable"))
            })?;

        let username: Option<String> = SessionUser::get(&session)
            .await
            .map_err(SessionError::Unavailable)?;
        if let Some(username) = username {
            debug!(username, path = %parts.uri.path(), "Admin session validated");
            return Ok(Self { username, session });
        }

        debug!(path = %parts.uri.path(), "Anonymous request to admin route");
        Flash::push(
            &session,
            FlashLevel::Warning,
            "Please login to access admin features.",
        )
        .await
        .map_err(SessionError::Unavailable)?;

        Err(SessionError::LoginRequired {
            next: parts.uri.path().to_string(),
        })
    }
}

/// Admin guard rejections.
#[derive(Debug)]
pub enum SessionError {
    /// The caller is not logged in.
    LoginRequired {
        /// The path to return to after login.
        next: String,
    },
    /// The session store failed.
    Unavailable(HttpError),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        match self {
            Self::LoginRequired { next } => {
                Redirect::to(&login_redirect_target(&next)).into_response()
            }
            Self::Unavailable(err) => err.into_response(),
        }
    }
}
