// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::model::ChannelRef;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, RoleMarker, UserMarker};

/// The user behind an action, along with the roles they have in the guild.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Actor {
	pub user: Id<UserMarker>,
	pub roles: Vec<Id<RoleMarker>>,
}

impl Actor {
	pub fn has_role(&self, role: Id<RoleMarker>) -> bool {
		self.roles.contains(&role)
	}
}

/// A request from a user, already translated out of whatever Discord event carried it.
///
/// Giveaway references are kept as the raw text they arrived as; the dispatcher decides whether they're valid.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Action {
	CreateTicket {
		requester: Id<UserMarker>,
	},
	CloseTicket {
		ticket: ChannelRef,
		actor: Actor,
	},
	StartGiveaway {
		actor: Actor,
		channel: Id<ChannelMarker>,
		title: String,
		body: String,
	},
	JoinGiveaway {
		giveaway: String,
		user: Id<UserMarker>,
	},
	LeaveGiveaway {
		giveaway: String,
		user: Id<UserMarker>,
	},
	DrawGiveaway {
		actor: Actor,
		giveaway: String,
	},
	IncomingMessage {
		channel: ChannelRef,
		author: String,
		text: String,
	},
	Say {
		actor: Actor,
		channel: Id<ChannelMarker>,
		text: String,
	},
}

impl Action {
	/// A short name for logging.
	pub fn name(&self) -> &'static str {
		match self {
			Self::CreateTicket { .. } => "create_ticket",
			Self::CloseTicket { .. } => "close_ticket",
			Self::StartGiveaway { .. } => "start_giveaway",
			Self::JoinGiveaway { .. } => "join_giveaway",
			Self::LeaveGiveaway { .. } => "leave_giveaway",
			Self::DrawGiveaway { .. } => "draw_giveaway",
			Self::IncomingMessage { .. } => "incoming_message",
			Self::Say { .. } => "say",
		}
	}
}
