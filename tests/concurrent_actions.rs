// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::BTreeSet;
use std::sync::Arc;
use tempfile::TempDir;
use twilight_desk::giveaways::{DrawOutcome, GiveawayManager, JoinOutcome, LeaveOutcome};
use twilight_desk::store::StateStore;
use twilight_desk::tickets::{CreateTicketOutcome, TicketManager};
use twilight_model::id::Id;
use twilight_model::id::marker::UserMarker;

const USERS: u64 = 100;

async fn open_store() -> (TempDir, Arc<StateStore>) {
	let dir = TempDir::new().unwrap();
	let store = StateStore::open(dir.path()).await.unwrap();
	(dir, Arc::new(store))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn simultaneous_joins_are_all_kept() {
	let (_dir, store) = open_store().await;
	let giveaways = Arc::new(GiveawayManager::new(store));
	giveaways.start(Id::new(1), Id::new(2)).await.unwrap();

	let mut tasks = Vec::new();
	for user in 1..=USERS {
		let giveaways = Arc::clone(&giveaways);
		tasks.push(tokio::spawn(async move { giveaways.join(Id::new(1), Id::new(user)).await }));
	}
	for task in tasks {
		assert_eq!(task.await.unwrap().unwrap(), JoinOutcome::Joined);
	}

	let giveaway = giveaways.get(Id::new(1)).await.unwrap().unwrap();
	let expected: BTreeSet<Id<UserMarker>> = (1..=USERS).map(Id::new).collect();
	assert_eq!(giveaway.participants, expected);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn simultaneous_joins_by_one_user_converge() {
	let (_dir, store) = open_store().await;
	let giveaways = Arc::new(GiveawayManager::new(store));
	giveaways.start(Id::new(1), Id::new(2)).await.unwrap();

	let mut tasks = Vec::new();
	for _ in 0..32 {
		let giveaways = Arc::clone(&giveaways);
		tasks.push(tokio::spawn(async move { giveaways.join(Id::new(1), Id::new(5)).await }));
	}
	let mut joined = 0;
	for task in tasks {
		match task.await.unwrap().unwrap() {
			JoinOutcome::Joined => joined += 1,
			JoinOutcome::AlreadyJoined => (),
			JoinOutcome::GiveawayNotFound => panic!("giveaway vanished"),
		}
	}
	assert_eq!(joined, 1);

	let giveaway = giveaways.get(Id::new(1)).await.unwrap().unwrap();
	assert_eq!(giveaway.participants, BTreeSet::from([Id::new(5)]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn joins_and_leaves_interleave_without_losses() {
	let (_dir, store) = open_store().await;
	let giveaways = Arc::new(GiveawayManager::new(store));
	giveaways.start(Id::new(1), Id::new(2)).await.unwrap();
	for user in 1..=USERS {
		giveaways.join(Id::new(1), Id::new(user)).await.unwrap();
	}

	// Odd users leave while new users join.
	let mut tasks = Vec::new();
	for user in 1..=USERS {
		let giveaways = Arc::clone(&giveaways);
		tasks.push(tokio::spawn(async move {
			if user % 2 == 1 {
				assert_eq!(
					giveaways.leave(Id::new(1), Id::new(user)).await.unwrap(),
					LeaveOutcome::Left
				);
			} else {
				assert_eq!(
					giveaways.join(Id::new(1), Id::new(user + USERS)).await.unwrap(),
					JoinOutcome::Joined
				);
			}
		}));
	}
	for task in tasks {
		task.await.unwrap();
	}

	let giveaway = giveaways.get(Id::new(1)).await.unwrap().unwrap();
	let expected: BTreeSet<Id<UserMarker>> = (1..=USERS)
		.filter(|user| user % 2 == 0)
		.flat_map(|user| [Id::new(user), Id::new(user + USERS)])
		.collect();
	assert_eq!(giveaway.participants, expected);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn a_giveaway_is_drawn_exactly_once() {
	let (_dir, store) = open_store().await;
	let giveaways = Arc::new(GiveawayManager::new(store));
	giveaways.start(Id::new(1), Id::new(2)).await.unwrap();
	for user in 1..=10 {
		giveaways.join(Id::new(1), Id::new(user)).await.unwrap();
	}

	let mut tasks = Vec::new();
	for _ in 0..16 {
		let giveaways = Arc::clone(&giveaways);
		tasks.push(tokio::spawn(async move { giveaways.draw(Id::new(1)).await }));
	}
	let mut winners = 0;
	for task in tasks {
		match task.await.unwrap().unwrap() {
			DrawOutcome::Winner(_) => winners += 1,
			DrawOutcome::GiveawayNotFound => (),
			DrawOutcome::NoParticipants => panic!("participants disappeared"),
		}
	}
	assert_eq!(winners, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn one_ticket_per_requester_under_contention() {
	let (_dir, store) = open_store().await;
	let tickets = Arc::new(TicketManager::new(store, "ticket-", Id::new(9)));

	let mut tasks = Vec::new();
	for _ in 0..32 {
		let tickets = Arc::clone(&tickets);
		tasks.push(tokio::spawn(async move { tickets.create_ticket(Id::new(3)).await }));
	}
	let mut created = 0;
	for task in tasks {
		if let CreateTicketOutcome::Created { .. } = task.await.unwrap().unwrap() {
			created += 1;
		}
	}
	assert_eq!(created, 1);
}
