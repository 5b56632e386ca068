use std::future::Future;
use std::pin::pin;
use std::time::Duration;

use futures::future::{Either, select};
use log::{debug, error, warn};
use serde::{Deserialize, Serialize};

use super::config::{ChatConfig, DEFAULT_TIMEOUT, ReplayPolicy, SYSTEM_INSTRUCTION};
use super::error::CompletionError;
use super::gemini::GeminiClient;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
	#[serde(rename = "user")]
	User,
	#[serde(rename = "model")]
	Assistant,
}

/// Role and text of one exchanged message, without its timestamp.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
	pub role: Role,
	pub text: String,
}

impl Turn {
	pub fn user(text: impl Into<String>) -> Self {
		Self {
			role: Role::User,
			text: text.into(),
		}
	}

	pub fn assistant(text: impl Into<String>) -> Self {
		Self {
			role: Role::Assistant,
			text: text.into(),
		}
	}
}

/// One stateless model call: instruction plus ordered context in, reply text out.
#[allow(async_fn_in_trait)]
pub trait GenerateContent {
	async fn generate(&self, system: &str, contents: &[Turn]) -> Result<String, CompletionError>;
}

/// Chat front for a completion transport. Without a transport every reply is
/// `NotConfigured` and no request is made.
#[derive(Clone, Debug)]
pub struct Assistant<T = GeminiClient> {
	transport: Option<T>,
	replay: ReplayPolicy,
	timeout: Duration,
}

impl Assistant<GeminiClient> {
	pub fn from_config(config: &ChatConfig) -> Self {
		let transport = GeminiClient::new(config);
		if transport.is_none() {
			warn!("Gemini API key is missing. The chat feature will not work.");
		}
		Self::new(transport, config.replay).with_timeout(config.timeout)
	}
}

impl<T: GenerateContent> Assistant<T> {
	pub fn new(transport: Option<T>, replay: ReplayPolicy) -> Self {
		Self {
			transport,
			replay,
			timeout: DEFAULT_TIMEOUT,
		}
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	pub fn is_configured(&self) -> bool {
		self.transport.is_some()
	}

	/// Upper bound on one whole send, replayed calls included.
	pub fn timeout(&self) -> Duration {
		self.timeout
	}

	/// Builds a fresh remote context from `history` and asks for a reply to `message`.
	/// Every request of the send races the single `deadline`; when it fires first the
	/// send fails with `Timeout`.
	pub async fn reply(
		&self,
		history: &[Turn],
		message: &str,
		deadline: impl Future<Output = ()>,
	) -> Result<String, CompletionError> {
		let Some(transport) = &self.transport else {
			return Err(CompletionError::NotConfigured);
		};
		debug!(
			"sending chat message ({} prior turns, {:?})",
			history.len(),
			self.replay
		);

		let exchange = pin!(self.exchange(transport, history, message));
		let result = match select(exchange, pin!(deadline)).await {
			Either::Left((result, _)) => result,
			Either::Right(_) => Err(CompletionError::Timeout(self.timeout)),
		};
		if let Err(e) = &result {
			error!("Gemini API error: {e}");
		}
		result
	}

	async fn exchange(
		&self,
		transport: &T,
		history: &[Turn],
		message: &str,
	) -> Result<String, CompletionError> {
		match self.replay {
			ReplayPolicy::UserTurnsOnly => replay_user_turns(transport, history, message).await,
			ReplayPolicy::FullTranscript => {
				let mut contents: Vec<Turn> = history
					.iter()
					.skip_while(|t| t.role == Role::Assistant)
					.cloned()
					.collect();
				contents.push(Turn::user(message));
				transport.generate(SYSTEM_INSTRUCTION, &contents).await
			}
		}
	}
}

async fn replay_user_turns<T: GenerateContent>(
	transport: &T,
	history: &[Turn],
	message: &str,
) -> Result<String, CompletionError> {
	let mut contents = Vec::new();
	for turn in history.iter().filter(|t| t.role == Role::User) {
		contents.push(Turn::user(turn.text.clone()));
		let reply = transport.generate(SYSTEM_INSTRUCTION, &contents).await?;
		if !reply.is_empty() {
			contents.push(Turn::assistant(reply));
		}
	}
	contents.push(Turn::user(message));
	transport.generate(SYSTEM_INSTRUCTION, &contents).await
}


#[cfg(test)]
mod tests {
	use futures::executor::block_on;
	use futures::future::{pending, ready};

	use super::fake::ScriptedTransport;
	use super::*;

	fn history() -> Vec<Turn> {
		vec![
			Turn::assistant("greeting"),
			Turn::user("first"),
			Turn::assistant("local answer"),
			Turn::user("second"),
			Turn::assistant("another"),
		]
	}

	#[test]
	fn missing_transport_short_circuits() {
		let assistant: Assistant<ScriptedTransport> = Assistant::new(None, ReplayPolicy::default());
		assert!(!assistant.is_configured());
		assert_eq!(
			block_on(assistant.reply(&history(), "hi", pending())),
			Err(CompletionError::NotConfigured)
		);
	}

	#[test]
	fn from_config_without_key_is_unconfigured() {
		let assistant = Assistant::from_config(&ChatConfig::default());
		assert!(!assistant.is_configured());
	}

	#[test]
	fn user_turns_are_replayed_with_fresh_replies() {
		let assistant = Assistant::new(
			Some(ScriptedTransport::default()),
			ReplayPolicy::UserTurnsOnly,
		);
		let reply = block_on(assistant.reply(&history(), "third", pending())).unwrap();
		assert_eq!(reply, "re: third");

		let transport = assistant.transport.as_ref().unwrap();
		let calls = transport.calls.borrow();
		assert_eq!(calls.len(), 3);
		assert_eq!(calls[0], vec![Turn::user("first")]);
		assert_eq!(
			calls[2],
			vec![
				Turn::user("first"),
				Turn::assistant("re: first"),
				Turn::user("second"),
				Turn::assistant("re: second"),
				Turn::user("third"),
			]
		);
		assert!(calls.iter().flatten().all(|t| t.text != "local answer"));
	}

	#[test]
	fn full_transcript_is_one_call() {
		let assistant = Assistant::new(
			Some(ScriptedTransport::default()),
			ReplayPolicy::FullTranscript,
		);
		block_on(assistant.reply(&history(), "third", pending())).unwrap();

		let calls = assistant.transport.as_ref().unwrap().calls.borrow().clone();
		assert_eq!(calls.len(), 1);
		assert_eq!(calls[0].first(), Some(&Turn::user("first")));
		assert_eq!(calls[0].len(), 5);
		assert_eq!(calls[0].last(), Some(&Turn::user("third")));
	}

	#[test]
	fn replay_failure_stops_early() {
		let transport = ScriptedTransport::with_replies(vec![Err(CompletionError::Transport(
			"offline".into(),
		))]);
		let assistant = Assistant::new(Some(transport), ReplayPolicy::UserTurnsOnly);
		let result = block_on(assistant.reply(&history(), "third", pending()));
		assert_eq!(result, Err(CompletionError::Transport("offline".into())));
		assert_eq!(assistant.transport.as_ref().unwrap().calls.borrow().len(), 1);
	}

	#[test]
	fn first_message_is_a_single_call() {
		let assistant = Assistant::new(
			Some(ScriptedTransport::default()),
			ReplayPolicy::UserTurnsOnly,
		);
		let reply = block_on(assistant.reply(&[Turn::assistant("greeting")], "hello", pending()));
		assert_eq!(reply.as_deref(), Ok("re: hello"));
		assert_eq!(assistant.transport.as_ref().unwrap().calls.borrow().len(), 1);
	}

	#[test]
	fn one_deadline_bounds_the_whole_replay() {
		// Two earlier user turns: the first replayed call answers, the second hangs.
		let assistant = Assistant::new(
			Some(ScriptedTransport::stalling_after(1)),
			ReplayPolicy::UserTurnsOnly,
		)
		.with_timeout(Duration::from_secs(5));
		let result = block_on(assistant.reply(&history(), "third", ready(())));
		assert_eq!(result, Err(CompletionError::Timeout(Duration::from_secs(5))));
		assert_eq!(assistant.transport.as_ref().unwrap().calls.borrow().len(), 2);
	}

	#[test]
	fn stalled_single_call_times_out() {
		let assistant = Assistant::new(
			Some(ScriptedTransport::stalling_after(0)),
			ReplayPolicy::FullTranscript,
		);
		assert_eq!(
			block_on(assistant.reply(&history(), "third", ready(()))),
			Err(CompletionError::Timeout(DEFAULT_TIMEOUT))
		);
	}

	#[test]
	fn finished_exchange_beats_a_due_deadline() {
		let assistant = Assistant::new(
			Some(ScriptedTransport::default()),
			ReplayPolicy::UserTurnsOnly,
		);
		let reply = block_on(assistant.reply(&history(), "third", ready(())));
		assert_eq!(reply.as_deref(), Ok("re: third"));
	}

	#[test]
	fn configured_timeout_is_carried() {
		let config = ChatConfig {
			timeout: Duration::from_secs(12),
			..ChatConfig::default()
		};
		assert_eq!(Assistant::from_config(&config).timeout(), Duration::from_secs(12));
	}

	#[test]
	fn roles_use_wire_names() {
		assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
		assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"model\"");
	}
}
