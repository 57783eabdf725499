// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use twilight_mention::fmt::Mention;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, MessageMarker, UserMarker};

pub const NO_PERMISSION: &str = "You don't have permission to do that.";
pub const GENERIC_FAILURE: &str = "Something went wrong handling that. Please try again later.";

pub const TICKET_ALREADY_OPEN: &str = "You already have an open ticket.";
pub const TICKET_CREATED: &str = "Your ticket has been created.";
pub const TICKET_CREATION_FAILED: &str = "Your ticket couldn't be created. Please try again later.";
pub const NOT_A_TICKET: &str = "This isn't an open ticket channel.";
pub const TICKET_CLOSING: &str = "Closing this ticket.";
pub const TICKET_CLOSE_FAILED: &str = "This ticket's channel couldn't be deleted. The ticket is still open; try closing it again.";

pub const GIVEAWAY_POST_FAILED: &str = "The giveaway couldn't be posted. Check that the title and text fit in an embed and that I can post in that channel.";
pub const GIVEAWAY_JOINED: &str = "You've joined the giveaway!";
pub const GIVEAWAY_ALREADY_JOINED: &str = "You've already joined this giveaway.";
pub const GIVEAWAY_LEFT: &str = "You've left the giveaway.";
pub const GIVEAWAY_NOT_JOINED: &str = "You haven't joined this giveaway.";
pub const GIVEAWAY_NOT_FOUND: &str = "This giveaway couldn't be found. It may already have been drawn.";
pub const GIVEAWAY_NO_PARTICIPANTS: &str = "Nobody has joined this giveaway yet.";
pub const INVALID_GIVEAWAY_REFERENCE: &str = "That isn't a valid giveaway message ID.";

pub const MESSAGE_SENT: &str = "Message sent.";

pub fn ticket_welcome(requester: Id<UserMarker>) -> String {
	format!(
		"Welcome, {}! A member of staff will be with you shortly.",
		requester.mention()
	)
}

pub fn giveaway_started(channel: Id<ChannelMarker>, giveaway: Id<MessageMarker>) -> String {
	format!(
		"The giveaway is open in {}. Its message ID is {}.",
		channel.mention(),
		giveaway
	)
}

pub fn giveaway_winner(winner: Id<UserMarker>) -> String {
	format!("🎉 The winner is {}. Congratulations!", winner.mention())
}
