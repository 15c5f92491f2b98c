/// Top-level `Status` reported by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Ok,
    Failed,
}

/// Decoded gateway reply.
///
/// Non-2xx HTTP replies and unreadable bodies are represented as
/// [`Status::Failed`] with an extracted or synthesized `message`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: Status,
    pub message: Option<String>,
    pub follow_up_code: Option<String>,
    pub balance: Option<String>,
    pub cost: Option<String>,
}

impl ApiResponse {
    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }

    pub(crate) fn failed(message: impl Into<String>) -> Self {
        Self {
            status: Status::Failed,
            message: Some(message.into()),
            follow_up_code: None,
            balance: None,
            cost: None,
        }
    }
}
