// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::dispatch::Actor;
use crate::model::ChannelRef;
use miette::bail;
use twilight_model::application::interaction::Interaction;

/// Gets the guild member who triggered an interaction, with their roles.
pub fn interaction_actor(interaction: &Interaction) -> miette::Result<Actor> {
	let Some(member) = &interaction.member else {
		bail!("Interaction isn't from a guild member");
	};
	let Some(user) = interaction.author_id() else {
		bail!("Interaction has no author");
	};
	Ok(Actor {
		user,
		roles: member.roles.clone(),
	})
}

/// Classifies the channel an interaction was used in.
pub fn interaction_channel(interaction: &Interaction, ticket_prefix: &str) -> miette::Result<ChannelRef> {
	let Some(channel) = &interaction.channel else {
		bail!("Interaction wasn't used in a channel");
	};
	Ok(ChannelRef::classify(channel.id, channel.name.as_deref(), ticket_prefix))
}
