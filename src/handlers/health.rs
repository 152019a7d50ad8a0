/// Liveness probe. Does not touch the backend.
pub async fn health() -> &'static str {
    "ok"
}
