// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::string_option;
use crate::discord::context::BotContext;
use crate::discord::utils::users::interaction_actor;
use crate::dispatch::Action;
use twilight_model::application::command::{Command, CommandType};
use twilight_model::application::interaction::InteractionContextType;
use twilight_model::application::interaction::application_command::CommandData;
use twilight_model::gateway::payload::incoming::InteractionCreate;
use twilight_util::builder::command::{CommandBuilder, StringBuilder};

pub fn command_definition() -> Command {
	// Message IDs don't fit in the integer option type, so the ID is taken as text.
	let message_id = StringBuilder::new("message_id", "The ID of the giveaway's announcement message")
		.required(true)
		.build();
	CommandBuilder::new("draw", "Draw a winner for a giveaway", CommandType::ChatInput)
		.contexts([InteractionContextType::Guild])
		.option(message_id)
		.build()
}

pub async fn handle_command(
	interaction: &InteractionCreate,
	command_data: &CommandData,
	context: &BotContext,
) -> miette::Result<()> {
	let actor = interaction_actor(interaction)?;
	let giveaway = string_option(command_data, "message_id")?;
	let action = Action::DrawGiveaway { actor, giveaway };
	context
		.dispatcher
		.dispatch(action, &context.interaction_effects(interaction))
		.await
}
