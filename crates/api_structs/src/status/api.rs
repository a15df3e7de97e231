use serde::{Deserialize, Serialize};

pub mod get_service_health {
    use super::*;

    /// Answer of the health check, also tells whether notifications really leave the server
    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub message: String,
        pub push_enabled: bool,
    }
}
