/// Liveness line for anyone hitting the root.
pub async fn root() -> &'static str {
    "🟢 MaduroDólar backend is running"
}
