//! Backend readiness check behind `twin health`.

use crate::api::Backend;
use crate::error::ClientResult;
use crate::models::Health;

/// Fetches `/api/health` and renders it as `label: value` lines.
pub async fn check(backend: &dyn Backend) -> ClientResult<String> {
    let health = backend.health().await?;
    Ok(render(&health))
}

/// Readiness flags the backend omits are left out.
pub fn render(health: &Health) -> String {
    let mut lines = vec![format!("status:      {}", health.status)];
    if let Some(ready) = health.index_ready {
        lines.push(format!("index_ready: {}", ready));
    }
    if let Some(ready) = health.groq_ready {
        lines.push(format!("llm_ready:   {}", ready));
    }
    lines.join("\n")
}
