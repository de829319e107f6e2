//! Local rejections: the callback fires immediately and nothing is sent.

mod common;

use std::sync::{Arc, Mutex};

use common::{MockTransport, session};
use dream_account_config::SharedSettings;
use dream_account_core::AccountSession;
use dream_account_core::model::{Credentials, ErrorKind, OperationKind, OperationResult};

fn captured() -> (Arc<Mutex<Vec<OperationResult>>>, impl FnOnce(OperationResult) + Send + 'static) {
    let results = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&results);
    (results, move |result| sink.lock().unwrap().push(result))
}

#[test]
fn empty_credentials_are_rejected_synchronously() {
    let transport = MockTransport::new();
    let session = session(&transport);

    for (name, password) in [("", "pw"), ("alice", ""), ("", "")] {
        let (results, callback) = captured();
        session.register(Credentials::new(name, password), callback);
        let (login_results, login_callback) = captured();
        session.login(Credentials::new(name, password), login_callback);

        let results = results.lock().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].kind(), OperationKind::Register);
        assert_eq!(results[0].error(), ErrorKind::InputInvalid);
        assert!(results[0].is_valid());

        let login_results = login_results.lock().unwrap();
        assert_eq!(login_results[0].kind(), OperationKind::Login);
        assert_eq!(login_results[0].error(), ErrorKind::InputInvalid);
    }

    assert_eq!(transport.call_count(), 0);
}

#[test]
fn authenticate_without_token_is_rejected() {
    let transport = MockTransport::new();
    let session = session(&transport);

    let (results, callback) = captured();
    session.authenticate(callback);

    let results = results.lock().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].kind(), OperationKind::Auth);
    assert_eq!(results[0].error(), ErrorKind::TokenInvalid);
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn empty_token_counts_as_missing() {
    let transport = MockTransport::new();
    let session = session(&transport);
    session.set_token("");

    assert!(!session.has_token());
    let result = session.authenticate_async().await;
    assert_eq!(result.error(), ErrorKind::TokenInvalid);
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn unavailable_settings_are_a_local_error() {
    let transport = MockTransport::new();
    let settings = SharedSettings::default();
    let session = AccountSession::new(Arc::clone(&transport), settings.clone());

    let register = session
        .register_async(Credentials::new("alice", "pw"))
        .await;
    assert_eq!(register.error(), ErrorKind::InputInvalid);

    let login = session.login_async(Credentials::new("alice", "pw")).await;
    assert_eq!(login.error(), ErrorKind::InputInvalid);

    session.set_token("abc123");
    let auth = session.authenticate_async().await;
    assert_eq!(auth.error(), ErrorKind::TokenInvalid);

    assert_eq!(transport.call_count(), 0);
    assert_eq!(session.token().as_deref(), Some("abc123"));
}
