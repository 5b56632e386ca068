use chrono::{DateTime, Utc};
use log::warn;

use crate::services::{CompletionError, Role, Turn};

pub const GREETING: &str = "Hello! I am your DGX H100 architecture assistant. Ask me about the system topology, interconnects, or specific components.";
pub const EMPTY_REPLY: &str = "I couldn't generate a response.";
pub const NOT_CONFIGURED_REPLY: &str =
	"Error: API Key not configured. Please check your environment variables.";
pub const FAILURE_REPLY: &str =
	"I'm having trouble connecting to the DGX knowledge base right now. Please try again.";

#[derive(Clone, Debug, PartialEq)]
pub struct ChatTurn {
	pub role: Role,
	pub text: String,
	pub timestamp: DateTime<Utc>,
	/// Written by the app itself (greeting, canned fallbacks), never by the model.
	pub local: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
	#[default]
	Idle,
	Sending,
}

/// What to hand to the completion service for one send.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingSend {
	pub history: Vec<Turn>,
	pub message: String,
}

/// Append-only chat log plus the send state machine.
#[derive(Clone, Debug, PartialEq)]
pub struct Transcript {
	turns: Vec<ChatTurn>,
	phase: Phase,
}

impl Transcript {
	pub fn new(now: DateTime<Utc>) -> Self {
		Self {
			turns: vec![ChatTurn {
				role: Role::Assistant,
				text: GREETING.into(),
				timestamp: now,
				local: true,
			}],
			phase: Phase::Idle,
		}
	}

	pub fn turns(&self) -> &[ChatTurn] {
		&self.turns
	}

	pub fn is_sending(&self) -> bool {
		self.phase == Phase::Sending
	}

	/// Appends the user turn and enters `Sending`. Blank input or a send already
	/// in flight leaves the transcript untouched. Local turns are left out of the
	/// history handed to the completion service.
	pub fn begin_send(&mut self, input: &str, now: DateTime<Utc>) -> Option<PendingSend> {
		if input.trim().is_empty() || self.is_sending() {
			return None;
		}
		let history = self
			.turns
			.iter()
			.filter(|t| !t.local)
			.map(|t| Turn {
				role: t.role,
				text: t.text.clone(),
			})
			.collect();
		self.turns.push(ChatTurn {
			role: Role::User,
			text: input.to_string(),
			timestamp: now,
			local: false,
		});
		self.phase = Phase::Sending;
		Some(PendingSend {
			history,
			message: input.to_string(),
		})
	}

	/// Records the assistant's answer (or a canned stand-in) and returns to `Idle`.
	pub fn complete(&mut self, outcome: Result<String, CompletionError>, now: DateTime<Utc>) {
		if !self.is_sending() {
			warn!("dropping completion that arrived with no send in flight");
			return;
		}
		let (text, local) = match outcome {
			Ok(text) if text.trim().is_empty() => (EMPTY_REPLY.to_string(), true),
			Ok(text) => (text, false),
			Err(CompletionError::NotConfigured) => (NOT_CONFIGURED_REPLY.to_string(), true),
			Err(_) => (FAILURE_REPLY.to_string(), true),
		};
		self.turns.push(ChatTurn {
			role: Role::Assistant,
			text,
			timestamp: now,
			local,
		});
		self.phase = Phase::Idle;
	}
}
