//! Helpers shared by the transaction tests: an in-memory database, a test
//! server running the full router, and shortcuts for starting a session.

use axum_extra::extract::cookie::Cookie;
use axum_test::TestServer;
use rusqlite::Connection;
use serde_json::{Value, json};

use crate::{AppState, build_router, db::initialize, endpoints, session::SESSION_COOKIE};

pub(crate) fn get_test_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    initialize(&conn).unwrap();
    conn
}

pub(crate) fn get_test_server() -> TestServer {
    let state = AppState::new(get_test_connection(), "foobar").unwrap();

    TestServer::new(build_router(state)).expect("Could not create test server.")
}

pub(crate) fn transaction_json(title: &str, amount: f64, transaction_type: &str) -> Value {
    json!({ "title": title, "amount": amount, "type": transaction_type })
}

/// Create a transaction without a session cookie and return the new session cookie.
pub(crate) async fn start_session(server: &TestServer) -> Cookie<'static> {
    let response = server
        .post(endpoints::TRANSACTIONS)
        .json(&transaction_json("Opening balance", 100.0, "credit"))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);

    response.cookie(SESSION_COOKIE)
}

/// Create a transaction in the session and return its ID from the listing.
pub(crate) async fn create_in_session(
    server: &TestServer,
    session_cookie: &Cookie<'static>,
    body: &Value,
) -> String {
    server
        .post(endpoints::TRANSACTIONS)
        .add_cookie(session_cookie.clone())
        .json(body)
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let listing: Value = server
        .get(endpoints::TRANSACTIONS)
        .add_cookie(session_cookie.clone())
        .await
        .json();

    listing["transactions"]
        .as_array()
        .and_then(|transactions| transactions.last())
        .and_then(|transaction| transaction["id"].as_str())
        .expect("listing should contain the new transaction")
        .to_owned()
}
