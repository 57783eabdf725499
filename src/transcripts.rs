// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::model::{ChannelRef, ticket_channel_name};
use miette::Diagnostic;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;

#[derive(Debug, Diagnostic)]
pub enum TranscriptError {
	/// The channel isn't a ticket channel, so it has no transcript.
	NotATicket,
	/// The writer task has stopped.
	Closed,
}

impl std::error::Error for TranscriptError {}

impl fmt::Display for TranscriptError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::NotATicket => write!(f, "transcript lines can only be written for ticket channels"),
			Self::Closed => write!(f, "the transcript writer is no longer running"),
		}
	}
}

#[derive(Debug)]
struct TranscriptLine {
	file_name: String,
	line: String,
}

/// Handle for appending to ticket transcripts.
///
/// Lines are written by a single background task in the order they were queued, so the transcript for a channel
/// follows the order its messages were handed to [append](Self::append).
#[derive(Clone, Debug)]
pub struct TranscriptLog {
	sender: UnboundedSender<TranscriptLine>,
	ticket_prefix: String,
}

/// The background task behind a [TranscriptLog]. It finishes once every handle is dropped.
pub struct TranscriptWriter {
	task: JoinHandle<()>,
}

impl TranscriptLog {
	/// Starts the writer task, creating the log directory if needed.
	pub async fn spawn(
		directory: impl Into<PathBuf>,
		ticket_prefix: impl Into<String>,
	) -> std::io::Result<(Self, TranscriptWriter)> {
		let directory = directory.into();
		fs::create_dir_all(&directory).await?;
		let (sender, receiver) = unbounded_channel();
		let task = tokio::spawn(write_lines(directory, receiver));
		let log = Self {
			sender,
			ticket_prefix: ticket_prefix.into(),
		};
		Ok((log, TranscriptWriter { task }))
	}

	/// Queues a line for the channel's transcript.
	pub fn append(&self, channel: &ChannelRef, line: String) -> Result<(), TranscriptError> {
		let Some(requester) = channel.ticket_requester() else {
			return Err(TranscriptError::NotATicket);
		};
		let file_name = format!("{}.txt", ticket_channel_name(&self.ticket_prefix, requester));
		self.sender
			.send(TranscriptLine { file_name, line })
			.map_err(|_| TranscriptError::Closed)
	}
}

impl TranscriptWriter {
	/// Waits for all queued lines to be written. Every [TranscriptLog] handle must already be dropped.
	pub async fn finish(self) {
		if let Err(error) = self.task.await {
			tracing::error!(source = ?error, "transcript writer panicked");
		}
	}
}

async fn write_lines(directory: PathBuf, mut receiver: UnboundedReceiver<TranscriptLine>) {
	while let Some(entry) = receiver.recv().await {
		let path = directory.join(&entry.file_name);
		if let Err(error) = append_line(&path, &entry.line).await {
			tracing::error!(source = ?error, file = %path.display(), "couldn't write transcript line");
		}
	}
}

async fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
	let mut file = OpenOptions::new().create(true).append(true).open(path).await?;
	file.write_all(format!("{}\n", line).as_bytes()).await?;
	file.flush().await
}
