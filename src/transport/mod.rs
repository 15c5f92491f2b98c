//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod envelope;
mod response;
mod scalar;

pub use envelope::{Envelope, UserData, balance_envelope, encode_envelope, send_sms_envelope};
pub use response::decode_response;
