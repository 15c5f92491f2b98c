//! Domain layer: strong types with validation and invariants (no I/O).

mod number;
mod request;
mod response;
mod validation;
mod value;

pub use number::{NumberIssue, NumberPlan, NumberValidator, ValidatedNumbers};
pub use request::{MessagePriority, MessageRequest, Method, SendOptions};
pub use response::{ApiResponse, Status};
pub use validation::ValidationError;
pub use value::{ApiKey, MessageText, Password, PhoneNumber, SenderId, Username};
