//! Identity provider integration.
//!
//! Sign-in goes against a Google-style identity REST endpoint
//! (`accounts:signInWithPassword`), which returns a uid and an ID token.
//! The token is stored in `localStorage` so a reload can restore the
//! session, and is attached to every backend request by [`super::api`].

use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::state::auth::SessionUser;

/// `localStorage` key holding the serialized [`StoredSession`].
pub const SESSION_KEY: &str = "rollcall_session";

/// Identity endpoint base; the project API key is appended as a query
/// parameter on each call.
#[cfg(feature = "csr")]
fn identity_url(action: &str) -> String {
    let base = option_env!("ROLLCALL_IDP_URL")
        .unwrap_or("https://identitytoolkit.googleapis.com/v1");
    let key = option_env!("ROLLCALL_IDP_KEY").unwrap_or("demo-key");
    format!("{base}/accounts:{action}?key={key}")
}

/// What survives a reload: just enough to re-authenticate requests and
/// re-fetch the profile. Never the password, never the assembled user.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoredSession {
    pub uid: String,
    pub id_token: String,
}

#[cfg(feature = "csr")]
#[derive(Serialize)]
struct PasswordSignIn<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(rename = "returnSecureToken")]
    return_secure_token: bool,
}

#[cfg(feature = "csr")]
#[derive(Deserialize)]
struct SignInResponse {
    #[serde(rename = "localId")]
    local_id: String,
    #[serde(rename = "idToken")]
    id_token: String,
}

#[cfg(feature = "csr")]
#[derive(Deserialize)]
struct IdentityError {
    error: IdentityErrorBody,
}

#[cfg(feature = "csr")]
#[derive(Deserialize)]
struct IdentityErrorBody {
    #[serde(default)]
    message: String,
}

/// Map the identity provider's SCREAMING_CASE error codes to something a
/// login form can show.
#[cfg(feature = "csr")]
fn friendly_identity_error(code: &str) -> String {
    match code {
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            "Invalid email or password".to_owned()
        }
        "USER_DISABLED" => "This account has been disabled".to_owned(),
        "TOO_MANY_ATTEMPTS_TRY_LATER" => {
            "Too many attempts, please try again later".to_owned()
        }
        other => format!("Sign-in failed ({other})"),
    }
}

// -------------------------------------------------------------
// Stored session
// -------------------------------------------------------------

/// The persisted session, if any.
pub fn stored_session() -> Option<StoredSession> {
    #[cfg(feature = "csr")]
    {
        let storage = web_sys::window()?.local_storage().ok()??;
        let raw = storage.get_item(SESSION_KEY).ok()??;
        serde_json::from_str(&raw).ok()
    }
    #[cfg(not(feature = "csr"))]
    {
        None
    }
}

/// Current bearer token for backend requests.
pub fn id_token() -> Option<String> {
    stored_session().map(|s| s.id_token)
}

fn persist(session: &StoredSession) {
    #[cfg(feature = "csr")]
    {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            if let Ok(raw) = serde_json::to_string(session) {
                let _ = storage.set_item(SESSION_KEY, &raw);
            }
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = session;
    }
}

/// Drop the persisted session. Idempotent.
pub fn sign_out() {
    #[cfg(feature = "csr")]
    {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.remove_item(SESSION_KEY);
        }
    }
}

// -------------------------------------------------------------
// Sign-in / restore
// -------------------------------------------------------------

/// Exchange credentials for a session, persist it, and assemble the
/// [`SessionUser`] from the backend profile.
pub async fn sign_in_user(email: &str, password: &str) -> Result<SessionUser, ApiError> {
    #[cfg(feature = "csr")]
    {
        let body = PasswordSignIn { email, password, return_secure_token: true };
        let resp = gloo_net::http::Request::post(&identity_url("signInWithPassword"))
            .json(&body)
            .map_err(|e| ApiError::Request(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        if !resp.ok() {
            let status = resp.status();
            if let Ok(err) = resp.json::<IdentityError>().await {
                return Err(ApiError::Backend(friendly_identity_error(&err.error.message)));
            }
            return Err(ApiError::Status(status));
        }
        let signin: SignInResponse = resp
            .json()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        let session = StoredSession { uid: signin.local_id, id_token: signin.id_token };
        persist(&session);
        load_user(&session.uid, email).await
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (email, password, persist);
        Err(ApiError::Request("not available outside the browser".to_owned()))
    }
}

/// Rebuild the session user from a persisted token, or `None` when nothing
/// is stored or the profile fetch fails (the token may have expired).
pub async fn restore_session() -> Option<SessionUser> {
    let session = stored_session()?;
    match load_user(&session.uid, "").await {
        Ok(user) => Some(user),
        Err(err) => {
            leptos::logging::warn!("session restore failed: {err}");
            sign_out();
            None
        }
    }
}

/// Fetch the backend profile and assemble the session user. If the profile
/// is missing we still have a valid sign-in, so fall back to a minimal
/// student identity rather than failing the login.
async fn load_user(uid: &str, email: &str) -> Result<SessionUser, ApiError> {
    match super::api::fetch_profile(uid).await {
        Ok(profile) => Ok(SessionUser::from_profile(uid, &profile)),
        Err(ApiError::Backend(_)) | Err(ApiError::Status(404)) => Ok(SessionUser {
            uid: uid.to_owned(),
            email: email.to_owned(),
            display_name: if email.is_empty() { uid.to_owned() } else { email.to_owned() },
            photo_url: None,
            role: crate::state::auth::Role::Student,
            student_id: None,
        }),
        Err(err) => Err(err),
    }
}
