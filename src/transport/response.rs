use serde::Deserialize;

use super::scalar::TransportScalar;
use crate::domain::{ApiResponse, Status};

#[derive(Debug, Clone, Deserialize)]
struct JsonResponse {
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "Message", default)]
    message: Option<String>,
    #[serde(rename = "MsgFollowUpUniqueCode", default)]
    follow_up_code: Option<TransportScalar>,
    #[serde(rename = "Balance", default)]
    balance: Option<TransportScalar>,
    #[serde(rename = "Cost", default)]
    cost: Option<TransportScalar>,
}

/// Decode one HTTP reply into an [`ApiResponse`].
///
/// Never fails: non-2xx statuses and unreadable bodies become [`Status::Failed`]
/// with the gateway's `Message` when one can be extracted, or a synthesized one.
pub fn decode_response(http_status: u16, body: &str) -> ApiResponse {
    let parsed = serde_json::from_str::<JsonResponse>(body);

    if !(200..=299).contains(&http_status) {
        let message = parsed
            .ok()
            .and_then(|it| it.message)
            .filter(|it| !it.trim().is_empty())
            .unwrap_or_else(|| format!("unexpected HTTP status: {http_status}"));
        return ApiResponse::failed(message);
    }

    match parsed {
        Ok(parsed) => ApiResponse {
            status: if parsed.status.eq_ignore_ascii_case("OK") {
                Status::Ok
            } else {
                Status::Failed
            },
            message: parsed.message,
            follow_up_code: parsed.follow_up_code.map(TransportScalar::into_string),
            balance: parsed.balance.map(TransportScalar::into_string),
            cost: parsed.cost.map(TransportScalar::into_string),
        },
        Err(err) => ApiResponse::failed(format!("invalid JSON response: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_ok_send_response() {
        let json = r#"
        {
          "Status": "OK",
          "Message": "Message Sent",
          "Cost": 35,
          "MsgFollowUpUniqueCode": "12345"
        }
        "#;

        let parsed = decode_response(200, json);
        assert!(parsed.is_ok());
        assert_eq!(parsed.message.as_deref(), Some("Message Sent"));
        assert_eq!(parsed.cost.as_deref(), Some("35"));
        assert_eq!(parsed.follow_up_code.as_deref(), Some("12345"));
        assert_eq!(parsed.balance, None);
    }

    #[test]
    fn decode_balance_supports_numeric_and_string_values() {
        let parsed = decode_response(200, r#"{"Status":"OK","Balance":"UGX 10000"}"#);
        assert_eq!(parsed.balance.as_deref(), Some("UGX 10000"));

        let parsed = decode_response(200, r#"{"Status":"OK","Balance":10500.50}"#);
        assert_eq!(parsed.balance.as_deref(), Some("10500.50"));

        let parsed = decode_response(200, r#"{"Status":"OK","Balance":null}"#);
        assert_eq!(parsed.balance, None);
    }

    #[test]
    fn status_is_matched_case_insensitively() {
        assert!(decode_response(200, r#"{"Status":"ok"}"#).is_ok());

        let parsed = decode_response(200, r#"{"Status":"Failed","Message":"Invalid credentials"}"#);
        assert_eq!(parsed.status, Status::Failed);
        assert_eq!(parsed.message.as_deref(), Some("Invalid credentials"));
    }

    #[test]
    fn malformed_body_becomes_failed_response() {
        let parsed = decode_response(200, "{ not json }");
        assert_eq!(parsed.status, Status::Failed);
        assert!(
            parsed
                .message
                .as_deref()
                .unwrap()
                .starts_with("invalid JSON response:")
        );

        let parsed = decode_response(200, r#"{"Message":"no status"}"#);
        assert_eq!(parsed.status, Status::Failed);
    }

    #[test]
    fn non_success_http_status_extracts_or_synthesizes_message() {
        let parsed = decode_response(401, r#"{"Status":"OK","Message":"Unauthorized"}"#);
        assert_eq!(parsed.status, Status::Failed);
        assert_eq!(parsed.message.as_deref(), Some("Unauthorized"));

        let parsed = decode_response(503, "Service Unavailable");
        assert_eq!(parsed.status, Status::Failed);
        assert_eq!(parsed.message.as_deref(), Some("unexpected HTTP status: 503"));
    }
}
