// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::utils::permissions::ticket_channel_overwrites;
use super::utils::shared_components::giveaway_buttons;
use crate::dispatch::{Applied, Effect, EffectSink};
use crate::transcripts::TranscriptLog;
use async_trait::async_trait;
use miette::IntoDiagnostic;
use twilight_http::client::Client;
use twilight_http::request::AuditLogReason;
use twilight_model::application::interaction::Interaction;
use twilight_model::channel::ChannelType;
use twilight_model::channel::message::{Embed, MessageFlags};
use twilight_model::http::interaction::{InteractionResponse, InteractionResponseType};
use twilight_model::id::Id;
use twilight_model::id::marker::{ApplicationMarker, GuildMarker};
use twilight_util::builder::InteractionResponseDataBuilder;
use twilight_util::builder::embed::{EmbedBuilder, EmbedFooterBuilder};
use twilight_validate::embed::EmbedValidationError;

const GIVEAWAY_COLOR: u32 = 0xF1C40F;
const GIVEAWAY_FOOTER: &str = "Use the buttons below to join or leave the giveaway.";

/// Builds the announcement embed for a giveaway.
pub fn giveaway_embed(title: String, body: String) -> Result<Embed, EmbedValidationError> {
	let footer = EmbedFooterBuilder::new(GIVEAWAY_FOOTER).build();
	let embed = EmbedBuilder::new()
		.title(title)
		.description(body)
		.color(GIVEAWAY_COLOR)
		.footer(footer)
		.validate()?
		.build();
	Ok(embed)
}

/// Carries out dispatcher effects against Discord.
pub struct DiscordEffects<'a> {
	pub http_client: &'a Client,
	pub application_id: Id<ApplicationMarker>,
	pub guild_id: Id<GuildMarker>,
	/// The interaction replies go to. Events that didn't come from an interaction have nowhere to reply.
	pub interaction: Option<&'a Interaction>,
	pub transcripts: &'a TranscriptLog,
}

impl DiscordEffects<'_> {
	async fn reply(&self, text: &str, ephemeral: bool) -> miette::Result<()> {
		let Some(interaction) = self.interaction else {
			tracing::debug!(reply = text, "dropping a reply with no interaction to reply to");
			return Ok(());
		};

		let mut response = InteractionResponseDataBuilder::new().content(text);
		if ephemeral {
			response = response.flags(MessageFlags::EPHEMERAL);
		}
		let response = InteractionResponse {
			kind: InteractionResponseType::ChannelMessageWithSource,
			data: Some(response.build()),
		};
		self.http_client
			.interaction(self.application_id)
			.create_response(interaction.id, &interaction.token, &response)
			.await
			.into_diagnostic()?;
		Ok(())
	}
}

#[async_trait]
impl EffectSink for DiscordEffects<'_> {
	async fn apply(&self, effect: Effect) -> miette::Result<Applied> {
		match effect {
			Effect::CreateChannel { name, visibility } => {
				let overwrites = ticket_channel_overwrites(self.guild_id, visibility);
				let channel = self
					.http_client
					.create_guild_channel(self.guild_id, &name)
					.kind(ChannelType::GuildText)
					.permission_overwrites(&overwrites)
					.await
					.into_diagnostic()?
					.model()
					.await
					.into_diagnostic()?;
				Ok(Applied::ChannelCreated(channel.id))
			}
			Effect::DeleteChannel { channel } => {
				self.http_client
					.delete_channel(channel)
					.reason("Ticket closed")
					.await
					.into_diagnostic()?;
				Ok(Applied::Done)
			}
			Effect::SendEphemeralReply { text } => {
				self.reply(&text, true).await?;
				Ok(Applied::Done)
			}
			Effect::SendPublicReply { text } => {
				self.reply(&text, false).await?;
				Ok(Applied::Done)
			}
			Effect::SendPublicMessage { channel, text } => {
				self.http_client
					.create_message(channel)
					.content(&text)
					.await
					.into_diagnostic()?;
				Ok(Applied::Done)
			}
			Effect::DeleteMessage { channel, message } => {
				self.http_client
					.delete_message(channel, message)
					.reason("Giveaway couldn't be recorded")
					.await
					.into_diagnostic()?;
				Ok(Applied::Done)
			}
			Effect::PostGiveaway { channel, title, body } => {
				let embed = giveaway_embed(title, body).into_diagnostic()?;

				// The buttons carry the message's own ID, so they can only be added once the message exists.
				let message = self
					.http_client
					.create_message(channel)
					.embeds(&[embed])
					.await
					.into_diagnostic()?
					.model()
					.await
					.into_diagnostic()?;
				let buttons = [giveaway_buttons(message.id)];
				self.http_client
					.update_message(channel, message.id)
					.components(Some(buttons.as_slice()))
					.await
					.into_diagnostic()?;
				Ok(Applied::MessagePosted(message.id))
			}
			Effect::AppendLogLine { channel, line } => {
				self.transcripts.append(&channel, line)?;
				Ok(Applied::Done)
			}
		}
	}
}
