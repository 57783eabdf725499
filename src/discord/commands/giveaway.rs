// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{channel_option, string_option};
use crate::discord::context::BotContext;
use crate::discord::utils::users::interaction_actor;
use crate::dispatch::Action;
use twilight_model::application::command::{Command, CommandType};
use twilight_model::application::interaction::InteractionContextType;
use twilight_model::application::interaction::application_command::CommandData;
use twilight_model::channel::ChannelType;
use twilight_model::gateway::payload::incoming::InteractionCreate;
use twilight_util::builder::command::{ChannelBuilder, CommandBuilder, StringBuilder};

pub fn command_definition() -> Command {
	let channel = ChannelBuilder::new("channel", "The channel to post the giveaway in")
		.channel_types([ChannelType::GuildText])
		.required(true)
		.build();
	let title = StringBuilder::new("title", "The giveaway's title")
		.required(true)
		.max_length(256)
		.build();
	let body = StringBuilder::new("body", "What's being given away and how")
		.required(true)
		.max_length(4000)
		.build();
	CommandBuilder::new("giveaway", "Start a giveaway", CommandType::ChatInput)
		.contexts([InteractionContextType::Guild])
		.option(channel)
		.option(title)
		.option(body)
		.build()
}

pub async fn handle_command(
	interaction: &InteractionCreate,
	command_data: &CommandData,
	context: &BotContext,
) -> miette::Result<()> {
	let actor = interaction_actor(interaction)?;
	let channel = channel_option(command_data, "channel")?;
	let title = string_option(command_data, "title")?;
	let body = string_option(command_data, "body")?;
	let action = Action::StartGiveaway {
		actor,
		channel,
		title,
		body,
	};
	context
		.dispatcher
		.dispatch(action, &context.interaction_effects(interaction))
		.await
}
