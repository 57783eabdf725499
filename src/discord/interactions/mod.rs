// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::context::BotContext;
use super::utils::shared_components::{CREATE_TICKET_ID, GIVEAWAY_ID_PREFIX};
use crate::dispatch::Action;
use miette::bail;
use twilight_model::application::interaction::message_component::MessageComponentInteractionData;
use twilight_model::gateway::payload::incoming::InteractionCreate;
use twilight_model::id::Id;
use twilight_model::id::marker::UserMarker;

pub async fn route_interaction(
	interaction: &InteractionCreate,
	interaction_data: &MessageComponentInteractionData,
	context: &BotContext,
) -> miette::Result<()> {
	let Some(user) = interaction.author_id() else {
		bail!("Component interaction has no author");
	};
	let action = component_action(&interaction_data.custom_id, user)?;
	context
		.dispatcher
		.dispatch(action, &context.interaction_effects(interaction))
		.await
}

/// Translates a button's custom ID into the action it requests.
fn component_action(custom_id: &str, user: Id<UserMarker>) -> miette::Result<Action> {
	let custom_id_path: Vec<&str> = custom_id.split('/').collect();

	match custom_id_path.as_slice() {
		[id] if *id == CREATE_TICKET_ID => Ok(Action::CreateTicket { requester: user }),
		[prefix, giveaway, "join"] if *prefix == GIVEAWAY_ID_PREFIX => Ok(Action::JoinGiveaway {
			giveaway: giveaway.to_string(),
			user,
		}),
		[prefix, giveaway, "leave"] if *prefix == GIVEAWAY_ID_PREFIX => Ok(Action::LeaveGiveaway {
			giveaway: giveaway.to_string(),
			user,
		}),
		_ => bail!("Unknown component interaction encountered: {}", custom_id),
	}
}
