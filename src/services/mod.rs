pub mod capture;

pub use capture::{CaptureService, UNKNOWN_SOURCE};
