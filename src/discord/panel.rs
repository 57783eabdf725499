// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::context::BotContext;
use super::utils::shared_components::new_ticket_button;
use miette::IntoDiagnostic;
use twilight_model::id::Id;
use twilight_model::id::marker::UserMarker;
use twilight_util::builder::embed::EmbedBuilder;

const PANEL_TITLE: &str = "Support Tickets";
const PANEL_DESCRIPTION: &str = "Need help from the staff? Press the button below to open a private ticket channel.";
const PANEL_COLOR: u32 = 0x3498DB;
const RECENT_MESSAGE_LIMIT: u16 = 5;

/// Posts the ticket panel in the configured channel unless one of the bot's messages is already among the most
/// recent ones there.
pub async fn post_ticket_panel(context: &BotContext, bot_user: Id<UserMarker>) -> miette::Result<()> {
	let Some(panel_channel) = context.config.tickets.panel_channel else {
		return Ok(());
	};

	let recent_messages = context
		.http_client
		.channel_messages(panel_channel)
		.limit(RECENT_MESSAGE_LIMIT)
		.await
		.into_diagnostic()?
		.models()
		.await
		.into_diagnostic()?;
	if recent_messages.iter().any(|message| message.author.id == bot_user) {
		tracing::debug!(channel = %panel_channel, "ticket panel is already posted");
		return Ok(());
	}

	let embed = EmbedBuilder::new()
		.title(PANEL_TITLE)
		.description(PANEL_DESCRIPTION)
		.color(PANEL_COLOR)
		.validate()
		.into_diagnostic()?
		.build();
	context
		.http_client
		.create_message(panel_channel)
		.embeds(&[embed])
		.components(&[new_ticket_button()])
		.await
		.into_diagnostic()?;
	tracing::info!(channel = %panel_channel, "posted the ticket panel");
	Ok(())
}
