// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::context::BotContext;
use crate::dispatch::Action;
use crate::model::ChannelRef;
use twilight_cache_inmemory::DefaultInMemoryCache;
use twilight_model::channel::message::Message;
use twilight_model::id::Id;
use twilight_model::id::marker::ChannelMarker;

/// Handles a message on the gateway loop itself. Nothing in here may wait on Discord, or every later event would wait
/// with it.
pub async fn handle_message(message: &Message, cache: &DefaultInMemoryCache, context: &BotContext) -> miette::Result<()> {
	if message.author.bot || message.guild_id.is_none() {
		return Ok(());
	}

	let channel = cached_channel(cache, message.channel_id, context.ticket_prefix());
	if !channel.is_ticket() {
		return Ok(());
	}

	let action = Action::IncomingMessage {
		channel,
		author: message.author.name.clone(),
		text: message.content.clone(),
	};
	context.dispatcher.dispatch(action, &context.background_effects()).await
}

/// Classifies a channel from the cache alone. A channel missing from the cache is treated as an ordinary channel.
fn cached_channel(cache: &DefaultInMemoryCache, channel_id: Id<ChannelMarker>, ticket_prefix: &str) -> ChannelRef {
	let Some(channel) = cache.channel(channel_id) else {
		tracing::debug!(channel = %channel_id, "message in a channel missing from the cache");
		return ChannelRef::other(channel_id);
	};
	ChannelRef::classify(channel_id, channel.name.as_deref(), ticket_prefix)
}
