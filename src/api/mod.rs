//! HTTP clients for the remote MegaChat endpoints
//!
//! Two opaque services are consumed: an auth endpoint that exchanges a
//! provider + user payload for a bearer token, and an inference endpoint
//! that answers a single user message. Only the wire shapes are contract;
//! the URLs come from configuration.

mod client;
mod error;
mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use types::{
    AssistRequest, AssistResponse, AuthProvider, AuthRequest, AuthSession, Subject, TaskType,
    UserData,
};
