//! Middleware that rejects requests without a session cookie.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;

use crate::session::get_session_id_from_cookies;

/// Middleware function that checks for a valid session cookie.
///
/// The session ID is placed into the request and the request executed
/// normally if the cookie is valid, otherwise a 401 Unauthorized response is
/// returned before the route handler runs.
///
/// **Note**: Route handlers can use the function argument `Extension(session_id): Extension<SessionId>` to receive the session ID.
///
/// **Note**: The app state must contain an `axum_extra::extract::cookie::Key` for decrypting and verifying the cookie contents.
pub async fn session_guard(jar: PrivateCookieJar, mut request: Request, next: Next) -> Response {
    match get_session_id_from_cookies(&jar) {
        Ok(session_id) => {
            request.extensions_mut().insert(session_id);
            next.run(request).await
        }
        Err(error) => {
            tracing::debug!(
                "Rejecting {} {}: {error}",
                request.method(),
                request.uri().path()
            );
            error.into_response()
        }
    }
}
