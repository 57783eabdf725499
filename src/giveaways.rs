// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::model::Giveaway;
use crate::store::{Mutation, StateStore, StoreError, StoreKey};
use rand::seq::IteratorRandom;
use std::sync::Arc;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, MessageMarker, UserMarker};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum JoinOutcome {
	Joined,
	AlreadyJoined,
	GiveawayNotFound,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LeaveOutcome {
	Left,
	NotJoined,
	GiveawayNotFound,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DrawOutcome {
	Winner(Id<UserMarker>),
	/// Nobody entered. The giveaway stays open.
	NoParticipants,
	GiveawayNotFound,
}

/// Owns giveaway membership and drawing. Every operation is a single atomic store mutation.
#[derive(Debug)]
pub struct GiveawayManager {
	store: Arc<StateStore>,
}

impl GiveawayManager {
	pub fn new(store: Arc<StateStore>) -> Self {
		Self { store }
	}

	pub async fn get(&self, giveaway: Id<MessageMarker>) -> Result<Option<Giveaway>, StoreError> {
		self.store.get(&StoreKey::giveaway(giveaway)).await
	}

	/// Opens an empty giveaway keyed by its announcement message.
	pub async fn start(
		&self,
		giveaway: Id<MessageMarker>,
		channel: Id<ChannelMarker>,
	) -> Result<Giveaway, StoreError> {
		let created = Giveaway::new(giveaway, channel);
		let stored = created.clone();
		self.store
			.mutate(&StoreKey::giveaway(giveaway), move |_: Option<Giveaway>| {
				(Mutation::Put(stored), ())
			})
			.await?;
		tracing::info!(giveaway = %giveaway, channel = %channel, "giveaway started");
		Ok(created)
	}

	pub async fn join(&self, giveaway: Id<MessageMarker>, user: Id<UserMarker>) -> Result<JoinOutcome, StoreError> {
		self.store
			.mutate(&StoreKey::giveaway(giveaway), |current: Option<Giveaway>| match current {
				Some(mut record) if record.is_open() => {
					if record.participants.insert(user) {
						(Mutation::Put(record), JoinOutcome::Joined)
					} else {
						(Mutation::Keep, JoinOutcome::AlreadyJoined)
					}
				}
				_ => (Mutation::Keep, JoinOutcome::GiveawayNotFound),
			})
			.await
	}

	pub async fn leave(&self, giveaway: Id<MessageMarker>, user: Id<UserMarker>) -> Result<LeaveOutcome, StoreError> {
		self.store
			.mutate(&StoreKey::giveaway(giveaway), |current: Option<Giveaway>| match current {
				Some(mut record) if record.is_open() => {
					if record.participants.remove(&user) {
						(Mutation::Put(record), LeaveOutcome::Left)
					} else {
						(Mutation::Keep, LeaveOutcome::NotJoined)
					}
				}
				_ => (Mutation::Keep, LeaveOutcome::GiveawayNotFound),
			})
			.await
	}

	/// Picks a winner uniformly from the participants and removes the giveaway in the same mutation, so a giveaway
	/// can only ever be drawn once.
	pub async fn draw(&self, giveaway: Id<MessageMarker>) -> Result<DrawOutcome, StoreError> {
		let outcome = self
			.store
			.mutate(&StoreKey::giveaway(giveaway), |current: Option<Giveaway>| match current {
				Some(record) if record.is_open() => {
					let winner = record.participants.iter().copied().choose(&mut rand::thread_rng());
					match winner {
						Some(winner) => (Mutation::Remove, DrawOutcome::Winner(winner)),
						None => (Mutation::Keep, DrawOutcome::NoParticipants),
					}
				}
				_ => (Mutation::Keep, DrawOutcome::GiveawayNotFound),
			})
			.await?;
		if let DrawOutcome::Winner(winner) = outcome {
			tracing::info!(giveaway = %giveaway, winner = %winner, "giveaway drawn");
		}
		Ok(outcome)
	}
}
