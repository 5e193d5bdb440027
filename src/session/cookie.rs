//! Defines functions for reading and writing the session cookie.

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use time::{Duration, OffsetDateTime};

use crate::{Error, session::SessionId};

/// The name of the cookie that carries the session ID.
pub const SESSION_COOKIE: &str = "sessionId";
/// The default duration for which a newly minted session cookie is valid.
pub const DEFAULT_SESSION_DURATION: Duration = Duration::days(7);

/// Add the session cookie to the cookie jar.
///
/// The cookie is valid site-wide and expires `duration` from now. It is only
/// marked `Secure` when `secure` is true, since browsers discard `Secure`
/// cookies received over plain HTTP.
///
/// Returns the cookie jar with the cookie added.
pub(crate) fn set_session_cookie(
    jar: PrivateCookieJar,
    session_id: SessionId,
    duration: Duration,
    secure: bool,
) -> PrivateCookieJar {
    jar.add(
        Cookie::build((SESSION_COOKIE, session_id.to_string()))
            .path("/")
            .max_age(duration)
            .expires(OffsetDateTime::now_utc() + duration)
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(secure),
    )
}

/// Get the session ID from the session cookie.
///
/// # Errors
///
/// Returns [Error::SessionMissing] if the cookie is not in the jar, could not
/// be decrypted, or does not hold a UUID.
pub(crate) fn get_session_id_from_cookies(jar: &PrivateCookieJar) -> Result<SessionId, Error> {
    let cookie = jar.get(SESSION_COOKIE).ok_or(Error::SessionMissing)?;

    cookie.value_trimmed().parse().map_err(|error| {
        tracing::debug!("Session cookie does not contain a valid session ID: {error}");
        Error::SessionMissing
    })
}
