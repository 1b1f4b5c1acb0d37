use crate::GIT_COMMIT_HASH;
use axum::response::IntoResponse;

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service banner", body = String)
    ),
    tag = "portero"
)]
pub async fn root() -> impl IntoResponse {
    let short_hash = GIT_COMMIT_HASH.get(..7).unwrap_or(GIT_COMMIT_HASH);
    format!(
        "{} {} ({short_hash})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    )
}
