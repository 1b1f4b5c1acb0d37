use super::handlers::{admin, auth, health, root};
use utoipa::openapi::{Contact, InfoBuilder, License, OpenApiBuilder, Tag};
use utoipa_axum::{router::OpenApiRouter, routes};

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    let (_router, openapi) = api_router().split_for_parts();
    openapi
}

/// Build the router that also drives the `OpenAPI` document.
///
/// New endpoints go here via `.routes(routes!(...))` so they are both served
/// and documented.
pub(crate) fn api_router() -> OpenApiRouter {
    let mut router = OpenApiRouter::with_openapi(cargo_openapi())
        .routes(routes!(root::root))
        .routes(routes!(health::health))
        .routes(routes!(auth::password_strength::check_password_strength))
        .routes(routes!(admin::login::admin_login))
        .routes(routes!(admin::login::admin_logout))
        .routes(routes!(admin::login::admin_verify))
        .routes(routes!(admin::sessions::list_sessions))
        .routes(routes!(admin::sessions::revoke_session));

    let mut portero_tag = Tag::new("portero");
    portero_tag.description = Some("Admin dashboard API".to_string());

    let mut health_tag = Tag::new("health");
    health_tag.description = Some("Liveness and database status".to_string());

    let mut auth_tag = Tag::new("auth");
    auth_tag.description = Some("Password strength checks".to_string());

    let mut admin_tag = Tag::new("admin");
    admin_tag.description = Some("Admin login and session management".to_string());

    router.get_openapi_mut().tags = Some(vec![portero_tag, health_tag, auth_tag, admin_tag]);

    router
}

fn cargo_openapi() -> utoipa::openapi::OpenApi {
    let mut info = InfoBuilder::new()
        .title(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .description(optional_str(env!("CARGO_PKG_DESCRIPTION")))
        .build();

    info.contact = cargo_contact();
    info.license = cargo_license();

    OpenApiBuilder::new().info(info).build()
}

fn cargo_contact() -> Option<Contact> {
    // Cargo authors are `;` separated and may include "Name <email>".
    let primary = env!("CARGO_PKG_AUTHORS").split(';').next().map(str::trim)?;
    let (name, email) = parse_author(primary);
    if name.is_none() && email.is_none() {
        return None;
    }

    let mut contact = Contact::new();
    contact.name = name.map(str::to_string);
    contact.email = email.map(str::to_string);
    Some(contact)
}

fn cargo_license() -> Option<License> {
    let identifier = optional_str(env!("CARGO_PKG_LICENSE"))?;
    let mut license = License::new(identifier);
    license.identifier = Some(identifier.to_string());
    Some(license)
}

fn optional_str(value: &str) -> Option<&str> {
    Some(value.trim()).filter(|value| !value.is_empty())
}

fn parse_author(author: &str) -> (Option<&str>, Option<&str>) {
    match author.split_once('<') {
        Some((name, email)) => (
            optional_str(name),
            optional_str(email.trim_end_matches('>')),
        ),
        None => (optional_str(author), None),
    }
}
