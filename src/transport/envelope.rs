use serde::Serialize;

use crate::domain::{MessageRequest, Method};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("could not encode request: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Credentials as embedded in the envelope's `userdata` object.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct UserData<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
struct MessageData<'a> {
    number: &'a str,
    message: &'a str,
    senderid: &'a str,
    priority: &'static str,
}

/// JSON request body: `{method, userdata, msgdata}`.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<'a> {
    method: &'static str,
    userdata: UserData<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    msgdata: Option<Vec<MessageData<'a>>>,
}

impl Envelope<'_> {
    pub fn method(&self) -> &'static str {
        self.method
    }
}

pub fn balance_envelope(userdata: UserData<'_>) -> Envelope<'_> {
    Envelope {
        method: Method::Balance.as_str(),
        userdata,
        msgdata: None,
    }
}

pub fn send_sms_envelope<'a>(userdata: UserData<'a>, request: &'a MessageRequest) -> Envelope<'a> {
    let msgdata = request
        .numbers()
        .iter()
        .map(|number| MessageData {
            number: number.as_str(),
            message: request.text().as_str(),
            senderid: request.sender_id().as_str(),
            priority: request.priority().as_wire(),
        })
        .collect();

    Envelope {
        method: Method::SendSms.as_str(),
        userdata,
        msgdata: Some(msgdata),
    }
}

pub fn encode_envelope(envelope: &Envelope<'_>) -> Result<String, TransportError> {
    Ok(serde_json::to_string(envelope)?)
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use crate::domain::{MessagePriority, MessageText, NumberValidator, PhoneNumber, SenderId};

    use super::*;

    const USER: UserData<'static> = UserData {
        username: "user",
        password: "pass",
    };

    #[test]
    fn balance_envelope_omits_msgdata() {
        let body = encode_envelope(&balance_envelope(USER)).unwrap();
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            value,
            json!({
                "method": "Balance",
                "userdata": { "username": "user", "password": "pass" }
            })
        );
    }

    #[test]
    fn send_sms_envelope_fans_out_one_entry_per_number() {
        let numbers = NumberValidator::default()
            .validate(&["+256771234567", "0701234567"])
            .numbers;
        let request = MessageRequest::new(
            numbers,
            MessageText::new("Test message").unwrap(),
            SenderId::new("MySender").unwrap(),
            MessagePriority::High,
        )
        .unwrap();

        let envelope = send_sms_envelope(USER, &request);
        assert_eq!(envelope.method(), "SendSms");

        let value: Value = serde_json::from_str(&encode_envelope(&envelope).unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "method": "SendSms",
                "userdata": { "username": "user", "password": "pass" },
                "msgdata": [
                    {
                        "number": "256771234567",
                        "message": "Test message",
                        "senderid": "MySender",
                        "priority": "1"
                    },
                    {
                        "number": "256701234567",
                        "message": "Test message",
                        "senderid": "MySender",
                        "priority": "1"
                    }
                ]
            })
        );
    }

    #[test]
    fn msgdata_keys_match_domain_field_names() {
        let request = MessageRequest::new(
            NumberValidator::default().validate(&["0771234567"]).numbers,
            MessageText::new("hi there").unwrap(),
            SenderId::default(),
            MessagePriority::default(),
        )
        .unwrap();

        let value: Value =
            serde_json::from_str(&encode_envelope(&send_sms_envelope(USER, &request)).unwrap())
                .unwrap();
        let mut keys: Vec<&str> = value["msgdata"][0]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();

        let mut expected = [
            PhoneNumber::FIELD,
            MessageText::FIELD,
            SenderId::FIELD,
            MessagePriority::FIELD,
        ];
        expected.sort_unstable();
        assert_eq!(keys, expected);
    }
}
