// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::commands::{command_definitions, route_command};
use super::context::BotContext;
use super::incoming_messages::handle_message;
use super::interactions::route_interaction;
use super::panel::post_ticket_panel;
use crate::config::ConfigData;
use crate::dispatch::Dispatcher;
use crate::transcripts::TranscriptLog;
use miette::IntoDiagnostic;
use std::sync::Arc;
use twilight_cache_inmemory::{DefaultInMemoryCache, ResourceType};
use twilight_gateway::{EventTypeFlags, Intents, Shard, ShardId, StreamExt};
use twilight_http::client::Client;
use twilight_model::application::interaction::InteractionData;
use twilight_model::gateway::event::Event;

pub fn set_up_client(config: &ConfigData) -> Arc<Client> {
	Arc::new(Client::new(config.discord.bot_token.clone()))
}

pub async fn run_bot(
	config: Arc<ConfigData>,
	http_client: Arc<Client>,
	dispatcher: Arc<Dispatcher>,
	transcripts: TranscriptLog,
) -> miette::Result<()> {
	let intents = Intents::GUILDS | Intents::GUILD_MESSAGES | Intents::MESSAGE_CONTENT;

	let mut shard = Shard::new(ShardId::ONE, config.discord.bot_token.clone(), intents);

	let cache = DefaultInMemoryCache::builder()
		.resource_types(ResourceType::CHANNEL)
		.build();

	let application_id = {
		let application_response = http_client.current_user_application().await.into_diagnostic()?;
		application_response.model().await.into_diagnostic()?.id
	};

	{
		let interaction_client = http_client.interaction(application_id);
		let commands = command_definitions();
		interaction_client
			.set_guild_commands(config.discord.guild, &commands)
			.await
			.into_diagnostic()?;
	}

	let context = Arc::new(BotContext {
		config,
		http_client,
		application_id,
		dispatcher,
		transcripts,
	});

	while let Some(event) = shard.next_event(EventTypeFlags::all()).await {
		let event = match event {
			Ok(event) => event,
			Err(error) => {
				tracing::warn!(source = ?error, "error receiving event");
				continue;
			}
		};
		cache.update(&event);

		// Messages are handled in gateway order so ticket transcripts keep the order messages arrived in.
		if let Event::MessageCreate(message) = &event {
			if let Err(error) = handle_message(message, &cache, &context).await {
				tracing::error!(source = ?error, "An error occurred handling a message");
			}
			continue;
		}

		tokio::spawn(handle_event(event, Arc::clone(&context)));
	}

	Ok(())
}

async fn handle_event(event: Event, context: Arc<BotContext>) {
	let event_result = handle_event_route(event, &context).await;
	if let Err(error) = event_result {
		tracing::error!(source = ?error, "An error occurred handling a gateway event");
	}
}

async fn handle_event_route(event: Event, context: &BotContext) -> miette::Result<()> {
	tracing::debug!("Incoming gateway message: {:?}", event);
	match event {
		Event::InteractionCreate(interaction) => match &interaction.data {
			Some(InteractionData::ApplicationCommand(command_data)) => {
				route_command(&interaction, command_data, context).await?;
			}
			Some(InteractionData::MessageComponent(interaction_data)) => {
				route_interaction(&interaction, interaction_data, context).await?;
			}
			_ => (),
		},
		Event::Ready(ready) => {
			tracing::info!("Discord gateway is ready");
			post_ticket_panel(context, ready.user.id).await?;
		}
		_ => (),
	}
	Ok(())
}
