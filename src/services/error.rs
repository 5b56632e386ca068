use std::time::Duration;

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CompletionError {
	#[error("no API key configured")]
	NotConfigured,
	#[error("network error: {0}")]
	Transport(String),
	#[error("completion service returned {status}: {body}")]
	Status { status: u16, body: String },
	#[error("unexpected response format: {0}")]
	Malformed(String),
	#[error("no response after {0:?}")]
	Timeout(Duration),
}
