//! Shared fixture for HTTP-level note tests over in-memory stores.

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::http::Method;
use actix_web::test as actix_test;
use actix_web::{App, web};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use backend::Trace;
use backend::domain::{AccountService, NoteService, TokenService};
use backend::inbound::http::configure;
use backend::inbound::http::state::{HttpState, HttpStatePorts, SessionSettings};
use backend::test_support::{
    InMemoryNoteRepository, InMemoryUserRepository, MutableClock, PlaintextPasswordHasher,
};

pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0)
        .single()
        .expect("valid instant")
}

/// In-memory wiring shared by a test's requests.
pub struct World {
    pub clock: Arc<MutableClock>,
    pub notes: Arc<InMemoryNoteRepository>,
    state: web::Data<HttpState>,
}

impl World {
    pub fn new(max_length: usize) -> Self {
        let clock = Arc::new(MutableClock::new(at(1, 9)));
        let tokens =
            TokenService::new("integration-secret-integration-secret", "notes-it").expect("secret");
        let users = Arc::new(InMemoryUserRepository::default());
        let notes = Arc::new(InMemoryNoteRepository::default());
        let accounts = Arc::new(AccountService::new(
            users.clone(),
            Arc::new(PlaintextPasswordHasher),
            tokens.clone(),
            clock.clone(),
        ));
        let service = Arc::new(
            NoteService::new(users, notes.clone(), clock.clone()).with_max_length(max_length),
        );
        let state = web::Data::new(HttpState::new(
            HttpStatePorts {
                accounts,
                notes: service.clone(),
                notes_query: service,
            },
            SessionSettings {
                tokens,
                clock: clock.clone(),
                cookie_secure: false,
            },
        ));
        Self {
            clock,
            notes,
            state,
        }
    }

    /// Send a request and return status plus JSON body.
    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&Cookie<'static>>,
        body: Option<Value>,
    ) -> (u16, Value) {
        let app = actix_test::init_service(
            App::new()
                .app_data(self.state.clone())
                .wrap(Trace)
                .configure(configure),
        )
        .await;
        let mut req = actix_test::TestRequest::default().method(method).uri(uri);
        if let Some(cookie) = cookie {
            req = req.cookie(cookie.clone());
        }
        if let Some(body) = body {
            req = req.set_json(body);
        }
        let res = actix_test::call_service(&app, req.to_request()).await;
        let status = res.status().as_u16();
        let bytes = actix_test::read_body(res).await;
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON body")
        };
        (status, json)
    }

    /// Register and sign in, returning the `token` cookie.
    pub async fn account(&self, username: &str) -> Cookie<'static> {
        let (status, _) = self
            .call(Method::POST, "/signup", None, Some(credentials(username)))
            .await;
        assert_eq!(status, 200, "signup {username}");
        self.signin(username).await
    }

    /// Sign in at the clock's current time, returning the `token` cookie.
    pub async fn signin(&self, username: &str) -> Cookie<'static> {
        let app = actix_test::init_service(
            App::new()
                .app_data(self.state.clone())
                .wrap(Trace)
                .configure(configure),
        )
        .await;
        let req = actix_test::TestRequest::post()
            .uri("/signin")
            .set_json(credentials(username))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status().as_u16(), 200, "signin {username}");
        res.response()
            .cookies()
            .find(|c| c.name() == "token")
            .expect("token cookie")
            .into_owned()
    }

    /// Create a note at the clock's current time and return its id.
    pub async fn note(&self, cookie: &Cookie<'static>, title: &str) -> i64 {
        let (status, body) = self
            .call(
                Method::POST,
                "/note",
                Some(cookie),
                Some(serde_json::json!({"title": title, "text": "text"})),
            )
            .await;
        assert_eq!(status, 200, "create {title}");
        body["id"].as_i64().expect("numeric id")
    }
}

fn credentials(username: &str) -> Value {
    serde_json::json!({"username": username, "password": "s3cret!"})
}

/// Titles of a listing response in order.
pub fn titles(body: &Value) -> Vec<String> {
    body.as_array()
        .expect("array body")
        .iter()
        .filter_map(|n| n["title"].as_str().map(str::to_owned))
        .collect()
}
