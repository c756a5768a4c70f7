//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint, the schema wrappers for domain
//! types and the `token` cookie security scheme. The document backs Swagger
//! UI in debug builds and is exported by `cargo run --bin openapi-dump`.

use crate::inbound::http::accounts::{CredentialsRequest, MessageResponse, TokenResponse};
use crate::inbound::http::notes::NoteRequest;
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, ListedNoteSchema, NotePayloadSchema,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the token cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "TokenCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "token",
                "HS256 session token issued by POST /signin.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Notes API",
        description = "Accounts, token sessions and owner-scoped notes with a 24-hour edit window."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("TokenCookie" = [])),
    paths(
        crate::inbound::http::accounts::signup,
        crate::inbound::http::accounts::signin,
        crate::inbound::http::notes::create_note,
        crate::inbound::http::notes::edit_note,
        crate::inbound::http::notes::delete_note,
        crate::inbound::http::notes::list_notes,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        NotePayloadSchema,
        ListedNoteSchema,
        CredentialsRequest,
        MessageResponse,
        TokenResponse,
        NoteRequest
    )),
    tags(
        (name = "accounts", description = "Signup and signin"),
        (name = "notes", description = "Note creation, editing, deletion and listing"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
