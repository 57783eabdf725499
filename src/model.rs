// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, Utc};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, MessageMarker, UserMarker};

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum TicketStatus {
	Open,
	Closed,
}

/// A support ticket opened by a user.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Ticket {
	/// The user who opened the ticket. Also the ticket's key; a user has at most one open ticket.
	pub requester: Id<UserMarker>,
	pub status: TicketStatus,
	pub created_at: DateTime<Utc>,
	/// The ticket's channel, once Discord has created it.
	pub channel: Option<Id<ChannelMarker>>,
}

impl Ticket {
	pub fn open(requester: Id<UserMarker>) -> Self {
		Self {
			requester,
			status: TicketStatus::Open,
			created_at: Utc::now(),
			channel: None,
		}
	}

	pub fn is_open(&self) -> bool {
		self.status == TicketStatus::Open
	}
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum GiveawayStatus {
	Open,
	Drawn,
}

/// A giveaway users can enter until it's drawn.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Giveaway {
	/// The ID of the announcement message, which also keys the giveaway.
	pub id: Id<MessageMarker>,
	pub channel: Id<ChannelMarker>,
	pub participants: BTreeSet<Id<UserMarker>>,
	pub status: GiveawayStatus,
	pub created_at: DateTime<Utc>,
}

impl Giveaway {
	pub fn new(id: Id<MessageMarker>, channel: Id<ChannelMarker>) -> Self {
		Self {
			id,
			channel,
			participants: BTreeSet::new(),
			status: GiveawayStatus::Open,
			created_at: Utc::now(),
		}
	}

	pub fn is_open(&self) -> bool {
		self.status == GiveawayStatus::Open
	}
}

/// What kind of channel a [ChannelRef] points at.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ChannelKind {
	/// A ticket channel, along with the user the ticket belongs to.
	Ticket { requester: Id<UserMarker> },
	Other,
}

/// A channel, classified once when an event comes in.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ChannelRef {
	pub id: Id<ChannelMarker>,
	pub kind: ChannelKind,
}

impl ChannelRef {
	/// Classifies a channel by name. Ticket channels are named with the ticket prefix followed by the requester's
	/// user ID.
	pub fn classify(id: Id<ChannelMarker>, name: Option<&str>, ticket_prefix: &str) -> Self {
		let requester = name
			.and_then(|name| name.strip_prefix(ticket_prefix))
			.and_then(|requester| requester.parse::<u64>().ok())
			.and_then(Id::new_checked);
		let kind = match requester {
			Some(requester) => ChannelKind::Ticket { requester },
			None => ChannelKind::Other,
		};
		Self { id, kind }
	}

	pub fn other(id: Id<ChannelMarker>) -> Self {
		Self {
			id,
			kind: ChannelKind::Other,
		}
	}

	pub fn ticket_requester(&self) -> Option<Id<UserMarker>> {
		match self.kind {
			ChannelKind::Ticket { requester } => Some(requester),
			ChannelKind::Other => None,
		}
	}

	pub fn is_ticket(&self) -> bool {
		self.ticket_requester().is_some()
	}
}

/// Builds the name of a user's ticket channel.
pub fn ticket_channel_name(ticket_prefix: &str, requester: Id<UserMarker>) -> String {
	format!("{}{}", ticket_prefix, requester)
}

/// An identifier from outside the bot (a command argument or button ID) that isn't a valid ID at all.
#[derive(Debug, Diagnostic)]
pub struct InvalidReference(pub String);

impl fmt::Display for InvalidReference {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "invalid reference: {:?}", self.0)
	}
}

impl std::error::Error for InvalidReference {}

/// Parses a giveaway reference (the giveaway message's ID) as given by a user or embedded in a button.
pub fn parse_giveaway_id(reference: &str) -> Result<Id<MessageMarker>, InvalidReference> {
	reference
		.trim()
		.parse::<u64>()
		.ok()
		.and_then(Id::new_checked)
		.ok_or_else(|| InvalidReference(reference.to_string()))
}
