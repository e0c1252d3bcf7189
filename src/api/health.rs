//! Health Check

use reqwest::Method;

use super::send;

/// True when `GET /health` answers with a 2xx status
pub async fn check_health() -> bool {
    match send(Method::GET, "/health", None, None).await {
        Ok(_) => true,
        Err(e) => {
            log::error!("health check failed: {}", e);
            false
        }
    }
}
