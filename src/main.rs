// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use miette::IntoDiagnostic;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use twilight_desk::config::parse_config;
use twilight_desk::discord::{run_bot, set_up_client};
use twilight_desk::dispatch::Dispatcher;
use twilight_desk::store::StateStore;
use twilight_desk::transcripts::TranscriptLog;

const TRANSCRIPT_FLUSH_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> miette::Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("twilight_desk=info")))
		.init();

	let config = Arc::new(parse_config("config.kdl").await?);

	let store = Arc::new(StateStore::open(&config.storage.data_directory).await?);
	let (transcripts, transcript_writer) =
		TranscriptLog::spawn(&config.tickets.log_directory, &config.tickets.channel_prefix)
			.await
			.into_diagnostic()?;
	let dispatcher = Arc::new(Dispatcher::new(store, &config));
	let http_client = set_up_client(&config);

	tokio::select! {
		bot_result = run_bot(Arc::clone(&config), http_client, dispatcher, transcripts) => bot_result?,
		signal_result = tokio::signal::ctrl_c() => {
			signal_result.into_diagnostic()?;
			tracing::info!("shutting down");
		}
	}

	if tokio::time::timeout(TRANSCRIPT_FLUSH_TIMEOUT, transcript_writer.finish())
		.await
		.is_err()
	{
		tracing::warn!("timed out waiting for ticket transcripts to be written");
	}

	Ok(())
}
