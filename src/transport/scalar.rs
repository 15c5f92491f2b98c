use serde::Deserialize;
use serde::de::Error as DeError;
use serde_json::value::RawValue;

/// Text-or-number field of a gateway reply.
///
/// EgoSMS is loose about the JSON type of `Balance`, `Cost` and
/// `MsgFollowUpUniqueCode`: the same account may see `"Balance": "UGX 10000"` in
/// one reply and `"Balance": 10000` in another, and follow-up codes are numeric
/// ids that are quoted by some gateway versions and bare by others. Callers only
/// ever display or compare these values, so both forms collapse to the text the
/// gateway sent. Bare numbers keep their literal token (`10500.50` stays
/// `"10500.50"`), since reformatting through `f64` would change what the account
/// page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportScalar(String);

impl TransportScalar {
    pub fn into_string(self) -> String {
        self.0
    }
}

fn text_from_token(token: &str) -> Result<String, String> {
    if token.starts_with('"') {
        return serde_json::from_str(token).map_err(|err| err.to_string());
    }
    if token.starts_with(|c: char| c == '-' || c.is_ascii_digit()) {
        return Ok(token.to_owned());
    }
    Err(format!("expected a JSON string or number, found `{token}`"))
}

impl<'de> Deserialize<'de> for TransportScalar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = <Box<RawValue>>::deserialize(deserializer)?;
        text_from_token(raw.get()).map(Self).map_err(D::Error::custom)
    }
}
