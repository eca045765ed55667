pub mod response;
pub mod status_code;

pub use response::{ErrorBody, Saved};
pub use status_code::ErrorCode;
