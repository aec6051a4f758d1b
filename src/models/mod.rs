pub mod captured_request;
pub mod endpoint;

pub use captured_request::*;
pub use endpoint::*;
