pub mod request;

pub use request::{ApiResponse, FormInput, OpenSessionRequest, SubmitResponse};
