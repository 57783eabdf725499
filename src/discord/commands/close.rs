// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::discord::context::BotContext;
use crate::discord::utils::users::{interaction_actor, interaction_channel};
use crate::dispatch::Action;
use twilight_model::application::command::{Command, CommandType};
use twilight_model::application::interaction::InteractionContextType;
use twilight_model::gateway::payload::incoming::InteractionCreate;
use twilight_util::builder::command::CommandBuilder;

pub fn command_definition() -> Command {
	CommandBuilder::new("close", "Close this ticket", CommandType::ChatInput)
		.contexts([InteractionContextType::Guild])
		.build()
}

pub async fn handle_command(interaction: &InteractionCreate, context: &BotContext) -> miette::Result<()> {
	let actor = interaction_actor(interaction)?;
	let ticket = interaction_channel(interaction, context.ticket_prefix())?;
	let action = Action::CloseTicket { ticket, actor };
	context
		.dispatcher
		.dispatch(action, &context.interaction_effects(interaction))
		.await
}
