//! Account API handlers.
//!
//! ```text
//! POST /signup {"username":"alice","password":"s3cret!"}
//! POST /signin {"username":"alice","password":"s3cret!"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{LoginCredentials, SignupCredentials};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::session_cookie;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{map_login_validation_error, map_signup_validation_error};

/// Credentials body shared by `POST /signup` and `POST /signin`.
///
/// Example JSON:
/// `{"username":"alice","password":"s3cret!"}`
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

/// Plain acknowledgement body.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    #[schema(example = "signup successful")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body returned by a successful signin.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/signup",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Account created", body = MessageResponse),
        (status = 400, description = "Invalid or taken username, or invalid password", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let CredentialsRequest { username, password } = payload.into_inner();
    let credentials = SignupCredentials::try_from_parts(&username, &password)
        .map_err(map_signup_validation_error)?;
    state.accounts.signup(credentials).await?;
    Ok(web::Json(MessageResponse::new("signup successful")))
}

/// Authenticate and hand out a session token.
///
/// The token is returned in the body and set as the `token` cookie.
#[utoipa::path(
    post,
    path = "/signin",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Signin success", body = TokenResponse,
            headers(("Set-Cookie" = String, description = "Session token cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid username or password", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "signin",
    security([])
)]
#[post("/signin")]
pub async fn signin(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let CredentialsRequest { username, password } = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&username, &password)
        .map_err(map_login_validation_error)?;
    let token = state.accounts.signin(credentials).await?;
    let cookie = session_cookie(&token, state.cookie_secure);
    Ok(HttpResponse::Ok().cookie(cookie).json(TokenResponse {
        token: String::from(token),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockAccountCommand, MockNoteCommand, MockNoteQuery};
    use crate::domain::{Error, ErrorCode, UserId};
    use crate::inbound::http::auth::TOKEN_COOKIE;
    use crate::inbound::http::state::HttpStatePorts;
    use crate::inbound::http::test_utils::TestHarness;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use mockable::Clock;
    use rstest::rstest;
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn body(username: &str, password: &str) -> CredentialsRequest {
        CredentialsRequest {
            username: username.to_owned(),
            password: password.to_owned(),
        }
    }

    async fn post_json(
        harness: &TestHarness,
        uri: &str,
        payload: &CredentialsRequest,
    ) -> actix_web::dev::ServiceResponse {
        let app = actix_test::init_service(
            App::new()
                .app_data(harness.state())
                .service(signup)
                .service(signin),
        )
        .await;
        let req = actix_test::TestRequest::post()
            .uri(uri)
            .set_json(payload)
            .to_request();
        actix_test::call_service(&app, req).await
    }

    #[rstest]
    #[actix_web::test]
    async fn signup_then_signin_sets_token_cookie() {
        let harness = TestHarness::new();

        let res = post_json(&harness, "/signup", &body("alice", "s3cret!")).await;
        assert_eq!(res.status(), StatusCode::OK);
        let ack: MessageResponse = actix_test::read_body_json(res).await;
        assert_eq!(ack.message, "signup successful");

        let res = post_json(&harness, "/signin", &body("alice", "s3cret!")).await;
        assert_eq!(res.status(), StatusCode::OK);
        let cookie = res
            .response()
            .cookies()
            .find(|c| c.name() == TOKEN_COOKIE)
            .expect("token cookie set")
            .into_owned();
        assert_eq!(cookie.http_only(), Some(true));
        let token: TokenResponse = actix_test::read_body_json(res).await;
        assert_eq!(cookie.value(), token.token);
    }

    #[rstest]
    #[case("bob", "s3cret!", "username", "username_too_short")]
    #[case("alice smith", "s3cret!", "username", "username_invalid_characters")]
    #[case("alice", "12345", "password", "password_too_short")]
    #[case("alice", "has space", "password", "password_invalid_characters")]
    #[actix_web::test]
    async fn signup_rejects_invalid_shapes(
        #[case] username: &str,
        #[case] password: &str,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let harness = TestHarness::new();
        let res = post_json(&harness, "/signup", &body(username, password)).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let err: Value = actix_test::read_body_json(res).await;
        assert_eq!(err["code"], "invalid_request");
        assert_eq!(err["details"], json!({"field": field, "code": code}));
    }

    #[rstest]
    #[actix_web::test]
    async fn duplicate_signup_is_bad_request() {
        let harness = TestHarness::new();
        post_json(&harness, "/signup", &body("alice", "s3cret!")).await;
        let res = post_json(&harness, "/signup", &body("alice", "other1!")).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let err: Value = actix_test::read_body_json(res).await;
        assert_eq!(err["details"]["code"], "username_taken");
    }

    #[rstest]
    #[case::wrong_password("alice", "wrong!!")]
    #[case::unknown_user("mallory", "s3cret!")]
    #[actix_web::test]
    async fn bad_credentials_are_unauthorised(#[case] username: &str, #[case] password: &str) {
        let harness = TestHarness::new();
        post_json(&harness, "/signup", &body("alice", "s3cret!")).await;

        let res = post_json(&harness, "/signin", &body(username, password)).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(res.response().cookies().next().is_none());
        let err: Value = actix_test::read_body_json(res).await;
        assert_eq!(err["message"], "invalid username or password");
    }

    #[rstest]
    #[actix_web::test]
    async fn blank_signin_fields_are_rejected_before_the_port() {
        let mut accounts = MockAccountCommand::new();
        accounts.expect_signin().times(0);
        let harness = TestHarness::new().with_ports(HttpStatePorts {
            accounts: Arc::new(accounts),
            notes: Arc::new(MockNoteCommand::new()),
            notes_query: Arc::new(MockNoteQuery::new()),
        });

        let res = post_json(&harness, "/signin", &body("  ", "pw")).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let err: Value = actix_test::read_body_json(res).await;
        assert_eq!(err["details"]["code"], "empty_username");
    }

    #[rstest]
    #[actix_web::test]
    async fn signin_forwards_port_token() {
        let base = TestHarness::new();
        let issued = base
            .tokens
            .issue(UserId::new(9), base.clock.utc())
            .expect("issue token");
        let expected = issued.as_str().to_owned();
        let mut accounts = MockAccountCommand::new();
        accounts
            .expect_signin()
            .withf(|creds| creds.username() == "alice")
            .return_once(move |_| Ok(issued));
        let harness = base.with_ports(HttpStatePorts {
            accounts: Arc::new(accounts),
            notes: Arc::new(MockNoteCommand::new()),
            notes_query: Arc::new(MockNoteQuery::new()),
        });

        let res = post_json(&harness, "/signin", &body("alice", "whatever")).await;
        let token: TokenResponse = actix_test::read_body_json(res).await;
        assert_eq!(token.token, expected);
    }

    #[rstest]
    #[actix_web::test]
    async fn store_outage_surfaces_as_service_unavailable() {
        let mut accounts = MockAccountCommand::new();
        accounts
            .expect_signup()
            .return_once(|_| Err(Error::service_unavailable("user store unavailable")));
        let harness = TestHarness::new().with_ports(HttpStatePorts {
            accounts: Arc::new(accounts),
            notes: Arc::new(MockNoteCommand::new()),
            notes_query: Arc::new(MockNoteQuery::new()),
        });

        let res = post_json(&harness, "/signup", &body("alice", "s3cret!")).await;
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
        let err: Error = actix_test::read_body_json(res).await;
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
