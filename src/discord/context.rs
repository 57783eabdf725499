// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::effects::DiscordEffects;
use crate::config::ConfigData;
use crate::dispatch::Dispatcher;
use crate::transcripts::TranscriptLog;
use std::sync::Arc;
use twilight_http::client::Client;
use twilight_model::application::interaction::Interaction;
use twilight_model::id::Id;
use twilight_model::id::marker::ApplicationMarker;

/// Everything an event handler needs, shared between all of the event tasks.
pub struct BotContext {
	pub config: Arc<ConfigData>,
	pub http_client: Arc<Client>,
	pub application_id: Id<ApplicationMarker>,
	pub dispatcher: Arc<Dispatcher>,
	pub transcripts: TranscriptLog,
}

impl BotContext {
	/// Effects that reply to the given interaction.
	pub fn interaction_effects<'a>(&'a self, interaction: &'a Interaction) -> DiscordEffects<'a> {
		DiscordEffects {
			http_client: &self.http_client,
			application_id: self.application_id,
			guild_id: self.config.discord.guild,
			interaction: Some(interaction),
			transcripts: &self.transcripts,
		}
	}

	/// Effects for events that have nobody to reply to.
	pub fn background_effects(&self) -> DiscordEffects<'_> {
		DiscordEffects {
			http_client: &self.http_client,
			application_id: self.application_id,
			guild_id: self.config.discord.guild,
			interaction: None,
			transcripts: &self.transcripts,
		}
	}

	pub fn ticket_prefix(&self) -> &str {
		&self.config.tickets.channel_prefix
	}
}
