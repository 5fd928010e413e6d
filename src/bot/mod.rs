//! Long-polling chat bot front end
//!
//! Updates are received and handled one at a time. Each chat may have one
//! guided `/new` flow in progress; any other message is treated as a command.

pub mod api;
pub mod command;
pub mod conversation;
pub mod handlers;

use std::collections::HashMap;
use std::time::Duration;

use crate::format::added_line;
use crate::storage::FrameStore;
use crate::{Error, Result};

pub use api::{ChatApi, TelegramClient, Update};
pub use command::BotCommand;
pub use conversation::{FlowOutcome, NewFrameFlow};
pub use handlers::{BotSettings, Reply, handle_command};

/// Longest message the chat service accepts
pub const MAX_MESSAGE_CHARS: usize = 4096;

/// Pause before polling again after a failed poll
const RETRY_PAUSE: Duration = Duration::from_secs(3);

pub struct Bot<A: ChatApi> {
    api: A,
    store: FrameStore,
    flows: HashMap<i64, NewFrameFlow>,
    settings: BotSettings,
    offset: Option<i64>,
}

impl<A: ChatApi> Bot<A> {
    pub fn new(api: A, store: FrameStore, settings: BotSettings) -> Self {
        Self {
            api,
            store,
            flows: HashMap::new(),
            settings,
            offset: None,
        }
    }

    /// Poll until Ctrl+C. Updates queued before start-up are skipped.
    pub async fn run(&mut self) -> Result<()> {
        if let Err(e) = self.drop_pending().await {
            tracing::warn!(error = %e, "Could not skip pending updates");
        }
        tracing::info!("Bot is polling for messages");

        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Shutting down bot");
                    break;
                }
                result = self.poll_once() => {
                    if let Err(e) = result {
                        tracing::warn!(error = %e, "Polling failed, retrying in {}s", RETRY_PAUSE.as_secs());
                        tokio::time::sleep(RETRY_PAUSE).await;
                    }
                }
            }
        }
        Ok(())
    }

    /// Acknowledge everything already queued so old messages are not replayed
    async fn drop_pending(&mut self) -> Result<()> {
        let updates = self.api.get_updates(Some(-1), 0).await?;
        if let Some(last) = updates.last() {
            self.offset = Some(last.update_id + 1);
            tracing::debug!(offset = last.update_id + 1, "Skipped pending updates");
        }
        Ok(())
    }

    /// Fetch one batch of updates and handle them in order
    pub async fn poll_once(&mut self) -> Result<usize> {
        let updates = self
            .api
            .get_updates(self.offset, self.settings.poll_timeout_secs)
            .await?;
        let handled = updates.len();
        for update in updates {
            self.offset = Some(update.update_id + 1);
            self.handle_update(update).await;
        }
        Ok(handled)
    }

    async fn handle_update(&mut self, update: Update) {
        let Some(message) = update.message else {
            return;
        };
        let Some(text) = message.text else {
            return;
        };
        let chat_id = message.chat.id;
        for reply in self.respond(chat_id, &text) {
            if let Err(e) = self.deliver(chat_id, reply).await {
                tracing::warn!(chat_id, error = %e, "Failed to deliver reply");
            }
        }
    }

    /// Work out the replies to one incoming message
    fn respond(&mut self, chat_id: i64, text: &str) -> Vec<Reply> {
        let Some(command) = BotCommand::parse(text) else {
            return match self.flows.get_mut(&chat_id) {
                Some(flow) => {
                    let outcome = flow.advance(text);
                    vec![self.finish_step(chat_id, outcome)]
                }
                None => vec![Reply::text("Send /help to see the available commands.")],
            };
        };

        tracing::info!(chat_id, command = command.name(), "Handling command");
        match command {
            BotCommand::New => {
                let (flow, question) = NewFrameFlow::start();
                self.flows.insert(chat_id, flow);
                vec![Reply::text(question)]
            }
            BotCommand::Cancel => match self.flows.remove(&chat_id) {
                Some(_) => vec![Reply::text("Cancelled.")],
                None => vec![Reply::text("Nothing to cancel.")],
            },
            command => match handle_command(&self.store, &command, &self.settings) {
                Ok(reply) => vec![reply],
                Err(e) => vec![error_reply(&command, e)],
            },
        }
    }

    fn finish_step(&mut self, chat_id: i64, outcome: FlowOutcome) -> Reply {
        match outcome {
            FlowOutcome::Reply(text) => Reply::Text(text),
            FlowOutcome::Cancelled => {
                self.flows.remove(&chat_id);
                Reply::text("Cancelled.")
            }
            FlowOutcome::Save(frame) => {
                self.flows.remove(&chat_id);
                match self.store.insert(&frame) {
                    Ok(id) => {
                        tracing::info!(id, model = %frame.model_code, "Frame added");
                        Reply::Text(added_line(id, &frame))
                    }
                    Err(e) => {
                        tracing::warn!(chat_id, error = %e, "Saving guided frame failed");
                        Reply::Text(format!("Could not save: {}", e))
                    }
                }
            }
        }
    }

    async fn deliver(&self, chat_id: i64, reply: Reply) -> Result<()> {
        match reply {
            Reply::Text(text) => {
                for chunk in split_message(&text, MAX_MESSAGE_CHARS) {
                    self.api.send_message(chat_id, &chunk).await?;
                }
            }
            Reply::Document { file_name, bytes } => {
                self.api.send_document(chat_id, &file_name, bytes).await?;
            }
        }
        Ok(())
    }
}

fn error_reply(command: &BotCommand, e: Error) -> Reply {
    if e.is_validation() {
        tracing::debug!(command = command.name(), error = %e, "Rejected command input");
    } else {
        tracing::error!(command = command.name(), error = %e, "Command failed");
    }
    Reply::Text(e.to_string())
}

/// Split text into chunks of at most `max_chars` characters, preferring line breaks
pub fn split_message(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for mut line in text.split('\n') {
        loop {
            let line_len = line.chars().count();
            let sep = usize::from(!current.is_empty());
            if current_len + sep + line_len <= max_chars {
                if sep == 1 {
                    current.push('\n');
                }
                current.push_str(line);
                current_len += sep + line_len;
                break;
            }
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
                continue;
            }
            // a single line longer than a whole message
            let cut = line
                .char_indices()
                .nth(max_chars)
                .map(|(i, _)| i)
                .unwrap_or(line.len());
            chunks.push(line[..cut].to_string());
            line = &line[cut..];
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
