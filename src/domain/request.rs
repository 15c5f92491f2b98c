use crate::domain::validation::ValidationError;
use crate::domain::value::{MessageText, PhoneNumber, SenderId};

/// Delivery priority understood by the gateway.
///
/// Serialized as the strings `"0"` (highest) to `"4"` (lowest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MessagePriority {
    #[default]
    Highest,
    High,
    Normal,
    Low,
    Lowest,
}

impl MessagePriority {
    /// JSON field name used inside `msgdata` (`priority`).
    pub const FIELD: &'static str = "priority";

    /// Wire value sent to the gateway.
    pub fn as_wire(self) -> &'static str {
        match self {
            Self::Highest => "0",
            Self::High => "1",
            Self::Normal => "2",
            Self::Low => "3",
            Self::Lowest => "4",
        }
    }
}

/// Gateway method named in the envelope's `method` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    SendSms,
    Balance,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SendSms => "SendSms",
            Self::Balance => "Balance",
        }
    }
}

/// Per-call overrides for [`crate::EgoSmsClient::send_message_with`].
#[derive(Debug, Clone, Default)]
pub struct SendOptions {
    /// Sender id for this call; the client's sender id is used when `None`.
    pub sender_id: Option<SenderId>,
    pub priority: MessagePriority,
}

impl SendOptions {
    /// Override the sender id. A blank value keeps the client's sender id.
    pub fn sender_id(mut self, value: impl Into<String>) -> Self {
        self.sender_id = SenderId::new(value).ok();
        self
    }

    pub fn priority(mut self, priority: MessagePriority) -> Self {
        self.priority = priority;
        self
    }
}

/// One outgoing message fanned out to validated recipients.
#[derive(Debug, Clone)]
pub struct MessageRequest {
    numbers: Vec<PhoneNumber>,
    text: MessageText,
    sender_id: SenderId,
    priority: MessagePriority,
}

impl MessageRequest {
    pub fn new(
        numbers: Vec<PhoneNumber>,
        text: MessageText,
        sender_id: SenderId,
        priority: MessagePriority,
    ) -> Result<Self, ValidationError> {
        if numbers.is_empty() {
            return Err(ValidationError::EmptyNumbers);
        }
        Ok(Self {
            numbers,
            text,
            sender_id,
            priority,
        })
    }

    pub fn numbers(&self) -> &[PhoneNumber] {
        &self.numbers
    }

    pub fn text(&self) -> &MessageText {
        &self.text
    }

    pub fn sender_id(&self) -> &SenderId {
        &self.sender_id
    }

    pub fn priority(&self) -> MessagePriority {
        self.priority
    }
}
