//! Anonymous sessions identified by a cookie.
//!
//! A session is not stored anywhere. It is only the UUID carried in the
//! session cookie, and every transaction is scoped by that value.

mod cookie;
mod id;
mod middleware;

pub use cookie::{DEFAULT_SESSION_DURATION, SESSION_COOKIE};
pub(crate) use cookie::{get_session_id_from_cookies, set_session_cookie};
pub use id::SessionId;
pub use middleware::session_guard;
