// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::model::ChannelRef;
use async_trait::async_trait;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, MessageMarker, RoleMarker, UserMarker};

/// Who can see a newly created channel besides the bot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ChannelVisibility {
	pub member: Id<UserMarker>,
	pub staff_role: Id<RoleMarker>,
}

/// Something the bot needs done on Discord.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Effect {
	CreateChannel {
		name: String,
		visibility: ChannelVisibility,
	},
	DeleteChannel {
		channel: Id<ChannelMarker>,
	},
	/// Replies to the triggering interaction so only the invoking user sees it.
	SendEphemeralReply {
		text: String,
	},
	/// Replies to the triggering interaction in public.
	SendPublicReply {
		text: String,
	},
	SendPublicMessage {
		channel: Id<ChannelMarker>,
		text: String,
	},
	DeleteMessage {
		channel: Id<ChannelMarker>,
		message: Id<MessageMarker>,
	},
	/// Posts a giveaway announcement along with its join and leave buttons.
	PostGiveaway {
		channel: Id<ChannelMarker>,
		title: String,
		body: String,
	},
	AppendLogLine {
		channel: ChannelRef,
		line: String,
	},
}

impl Effect {
	pub fn ephemeral(text: impl Into<String>) -> Self {
		Self::SendEphemeralReply { text: text.into() }
	}
}

/// What applying an [Effect] produced, for effects whose results later effects depend on.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Applied {
	Done,
	ChannelCreated(Id<ChannelMarker>),
	MessagePosted(Id<MessageMarker>),
}

/// Carries out effects on behalf of the dispatcher.
#[async_trait]
pub trait EffectSink: Send + Sync {
	async fn apply(&self, effect: Effect) -> miette::Result<Applied>;
}
