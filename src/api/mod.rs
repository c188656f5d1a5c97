pub mod client;
pub mod messages;
pub mod service;

pub use client::ApiClient;
pub use messages::{language_name, AnswerRequest, AnswerResponse, ListenResponse};
pub use service::AnswerService;
