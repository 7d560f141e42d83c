use std::sync::Once;

use citadel_core::CitadelHttpClient;
use citadel_domain::ClientConfig;
use serde_json::{json, Value};

pub const TEST_PSK: &str = "integration-pre-shared-key";

static TRACING: Once = Once::new();

/// Install a test subscriber once; honours `RUST_LOG`.
pub fn init_test_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Client pointed at `base_url` with short timeouts.
pub fn client_for(base_url: &str) -> CitadelHttpClient {
    let config = ClientConfig::new(base_url, TEST_PSK).with_timeout_secs(5);
    citadel_infra::build_client(&config).expect("client should build")
}

/// Run blocking client code off the async runtime.
///
/// The blocking reqwest client owns its own runtime, so it must be created
/// and dropped outside of tokio worker threads.
pub async fn blocking<T, F>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.expect("blocking task should not panic")
}

/// Session payload with one identity carrying every kind of claim value.
pub fn session_json() -> Value {
    json!({
        "id": "sess_1",
        "sid": "abc",
        "audience": "gateway",
        "issuedAt": "2024-05-01T10:00:00Z",
        "refreshedAt": "2024-05-01T10:05:00Z",
        "expiresAt": "2024-05-01T11:00:00Z",
        "resolvedAt": "2024-05-01T10:06:00Z",
        "identities": [{
            "id": "ident_1",
            "assignedAt": "2024-05-01T10:00:00Z",
            "user": "user_1",
            "data": [
                {"name": "role", "value": "admin", "from": "directory"},
                {"name": "level", "value": 3, "from": "directory"},
                {"name": "mfa", "value": true, "from": "auth"},
                {"name": "nickname", "value": null, "from": "profile"}
            ]
        }]
    })
}
