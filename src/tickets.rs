// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::dispatch::{ChannelVisibility, Effect};
use crate::model::{ChannelRef, Ticket, ticket_channel_name};
use crate::store::{Deleted, Mutation, StateStore, StoreError, StoreKey};
use std::sync::Arc;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, RoleMarker, UserMarker};

#[derive(Debug)]
pub enum CreateTicketOutcome {
	/// The ticket was recorded; its channel still has to be created with the included effect.
	Created { ticket: Ticket, channel: Effect },
	AlreadyOpen,
}

#[derive(Debug, Eq, PartialEq)]
pub enum CloseTicketOutcome {
	/// The ticket can be closed by applying the included effect and then calling
	/// [TicketManager::finish_close].
	Closing(Effect),
	NotATicket,
}

/// Owns the open/closed lifecycle of tickets. All ticket state lives in the store.
#[derive(Debug)]
pub struct TicketManager {
	store: Arc<StateStore>,
	channel_prefix: String,
	staff_role: Id<RoleMarker>,
}

impl TicketManager {
	pub fn new(store: Arc<StateStore>, channel_prefix: impl Into<String>, staff_role: Id<RoleMarker>) -> Self {
		Self {
			store,
			channel_prefix: channel_prefix.into(),
			staff_role,
		}
	}

	pub fn channel_prefix(&self) -> &str {
		&self.channel_prefix
	}

	pub async fn get(&self, requester: Id<UserMarker>) -> Result<Option<Ticket>, StoreError> {
		self.store.get(&StoreKey::ticket(requester)).await
	}

	/// Opens a ticket for the requester unless they already have one open.
	pub async fn create_ticket(&self, requester: Id<UserMarker>) -> Result<CreateTicketOutcome, StoreError> {
		let created = self
			.store
			.mutate(&StoreKey::ticket(requester), |current: Option<Ticket>| match current {
				Some(ticket) if ticket.is_open() => (Mutation::Keep, None),
				_ => {
					let ticket = Ticket::open(requester);
					(Mutation::Put(ticket.clone()), Some(ticket))
				}
			})
			.await?;

		let Some(ticket) = created else {
			return Ok(CreateTicketOutcome::AlreadyOpen);
		};
		tracing::info!(requester = %requester, "ticket opened");

		let channel = Effect::CreateChannel {
			name: ticket_channel_name(&self.channel_prefix, requester),
			visibility: ChannelVisibility {
				member: requester,
				staff_role: self.staff_role,
			},
		};
		Ok(CreateTicketOutcome::Created { ticket, channel })
	}

	/// Records the channel created for a requester's open ticket.
	pub async fn attach_channel(
		&self,
		requester: Id<UserMarker>,
		channel: Id<ChannelMarker>,
	) -> Result<(), StoreError> {
		self.store
			.mutate(&StoreKey::ticket(requester), |current: Option<Ticket>| match current {
				Some(mut ticket) if ticket.is_open() => {
					ticket.channel = Some(channel);
					(Mutation::Put(ticket), ())
				}
				_ => (Mutation::Keep, ()),
			})
			.await
	}

	/// Drops a ticket whose channel never came into existence so the requester can try again.
	pub async fn abandon(&self, requester: Id<UserMarker>) -> Result<Deleted, StoreError> {
		let deleted = self.store.delete(&StoreKey::ticket(requester)).await?;
		tracing::info!(requester = %requester, "ticket abandoned");
		Ok(deleted)
	}

	/// Checks that the channel belongs to a live ticket and produces the effect that removes the channel. The record
	/// stays until [finish_close](Self::finish_close) runs, so a channel that couldn't be deleted can still be closed
	/// later. The caller is responsible for having checked that the actor is staff.
	pub async fn close_ticket(
		&self,
		ticket: &ChannelRef,
		actor: Id<UserMarker>,
	) -> Result<CloseTicketOutcome, StoreError> {
		let Some(requester) = ticket.ticket_requester() else {
			return Ok(CloseTicketOutcome::NotATicket);
		};
		let record: Option<Ticket> = self.get(requester).await?;
		if !record.is_some_and(|record| owns_channel(&record, ticket.id)) {
			return Ok(CloseTicketOutcome::NotATicket);
		}
		tracing::info!(requester = %requester, closed_by = %actor, "closing ticket");
		Ok(CloseTicketOutcome::Closing(Effect::DeleteChannel { channel: ticket.id }))
	}

	/// Removes the record of a ticket whose channel has been deleted.
	pub async fn finish_close(&self, ticket: &ChannelRef) -> Result<Deleted, StoreError> {
		let Some(requester) = ticket.ticket_requester() else {
			return Ok(Deleted::NotFound);
		};
		let channel_id = ticket.id;

		let deleted = self
			.store
			.mutate(&StoreKey::ticket(requester), |current: Option<Ticket>| match current {
				Some(record) if owns_channel(&record, channel_id) => (Mutation::Remove, Deleted::Removed),
				_ => (Mutation::Keep, Deleted::NotFound),
			})
			.await?;
		if deleted == Deleted::Removed {
			tracing::info!(requester = %requester, "ticket closed");
		}
		Ok(deleted)
	}

	/// Produces the transcript line for a message sent in a ticket channel. Messages elsewhere aren't logged.
	pub fn record_message(&self, ticket: &ChannelRef, author: &str, text: &str) -> Option<Effect> {
		if !ticket.is_ticket() {
			return None;
		}
		Some(Effect::AppendLogLine {
			channel: *ticket,
			line: format!("{}: {}", author, text),
		})
	}
}

/// A record without a channel yet is still matched, so a ticket stuck before its channel was attached can be closed.
fn owns_channel(ticket: &Ticket, channel: Id<ChannelMarker>) -> bool {
	ticket.channel.is_none_or(|ticket_channel| ticket_channel == channel)
}
