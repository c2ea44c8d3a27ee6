pub mod body;
pub mod response;

pub use body::JsonObject;
pub use response::{ApiResponse, ApiResult, Message};
