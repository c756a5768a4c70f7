//! Note-taking REST service.
//!
//! Accounts sign in for a 24-hour HS256 session token carried in the `token`
//! cookie. Notes belong to their author, can be edited for 24 hours after
//! creation and deleted at any time by the owner, and are listed with
//! username and date filters plus pagination.
//!
//! Layout follows a hexagonal split: [`domain`] holds the rules and ports,
//! [`inbound`] adapts HTTP, [`outbound`] adapts PostgreSQL and Argon2.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
