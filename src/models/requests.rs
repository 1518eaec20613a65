use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to find matches for a posted ride request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "request_id", rename = "requestId")]
    pub request_id: String,
}
