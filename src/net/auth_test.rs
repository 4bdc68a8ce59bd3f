use super::*;

#[test]
fn login_url_appends_login_path() {
    assert_eq!(login_url("http://localhost:3003/"), "http://localhost:3003/api/auth/login");
}

#[test]
fn interpret_login_returns_token_on_success() {
    let resp = LoginResponse { success: true, token: Some("jwt".into()), message: None };
    assert_eq!(interpret_login(resp).unwrap(), "jwt");
}

#[test]
fn interpret_login_uses_server_message_on_failure() {
    let resp = LoginResponse { success: false, token: None, message: Some("Wrong password".into()) };
    let err = interpret_login(resp).unwrap_err();
    assert!(matches!(err, AuthError::Rejected(ref m) if m == "Wrong password"));
}

#[test]
fn interpret_login_defaults_failure_message() {
    let err = interpret_login(LoginResponse::default()).unwrap_err();
    assert_eq!(err.to_string(), "Login failed");
}

#[test]
fn interpret_login_rejects_success_without_token() {
    let resp = LoginResponse { success: true, token: Some(String::new()), message: None };
    assert!(matches!(interpret_login(resp), Err(AuthError::Rejected(_))));
}
