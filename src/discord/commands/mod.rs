// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::context::BotContext;
use miette::bail;
use twilight_model::application::command::Command;
use twilight_model::application::interaction::application_command::{CommandData, CommandOptionValue};
use twilight_model::gateway::payload::incoming::InteractionCreate;
use twilight_model::id::Id;
use twilight_model::id::marker::ChannelMarker;

mod close;
mod draw;
mod giveaway;
mod say;

pub fn command_definitions() -> Vec<Command> {
	vec![
		close::command_definition(),
		draw::command_definition(),
		giveaway::command_definition(),
		say::command_definition(),
	]
}

pub async fn route_command(
	interaction: &InteractionCreate,
	command_data: &CommandData,
	context: &BotContext,
) -> miette::Result<()> {
	match command_data.name.as_str() {
		"close" => close::handle_command(interaction, context).await,
		"draw" => draw::handle_command(interaction, command_data, context).await,
		"giveaway" => giveaway::handle_command(interaction, command_data, context).await,
		"say" => say::handle_command(interaction, command_data, context).await,
		_ => bail!("Unknown command encountered: {}\n{:?}", command_data.name, command_data),
	}
}

fn string_option(command_data: &CommandData, name: &str) -> miette::Result<String> {
	for option in command_data.options.iter() {
		if option.name == name {
			if let CommandOptionValue::String(value) = &option.value {
				return Ok(value.clone());
			}
		}
	}
	bail!("Command {} is missing its {} option", command_data.name, name);
}

fn channel_option(command_data: &CommandData, name: &str) -> miette::Result<Id<ChannelMarker>> {
	for option in command_data.options.iter() {
		if option.name == name {
			if let CommandOptionValue::Channel(channel) = option.value {
				return Ok(channel);
			}
		}
	}
	bail!("Command {} is missing its {} option", command_data.name, name);
}
