// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::config::{ConfigData, RoleConfig};
use crate::giveaways::{DrawOutcome, GiveawayManager, JoinOutcome, LeaveOutcome};
use crate::model::{ChannelRef, parse_giveaway_id};
use crate::store::{StateStore, StoreError};
use crate::tickets::{CloseTicketOutcome, CreateTicketOutcome, TicketManager};
use miette::miette;
use std::sync::Arc;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, MessageMarker, UserMarker};

mod action;
mod effect;
pub mod responses;

pub use action::{Action, Actor};
pub use effect::{Applied, ChannelVisibility, Effect, EffectSink};

enum DispatchError {
	Storage(StoreError),
	Platform(miette::Report),
}

impl From<StoreError> for DispatchError {
	fn from(error: StoreError) -> Self {
		Self::Storage(error)
	}
}

impl From<miette::Report> for DispatchError {
	fn from(error: miette::Report) -> Self {
		Self::Platform(error)
	}
}

type DispatchResult = Result<(), DispatchError>;

/// Routes actions to the ticket and giveaway managers and carries out the results.
///
/// Every action that comes from an interaction gets exactly one reply. Store failures are logged and reported to the
/// user as a generic failure; failures applying effects are returned to the caller.
#[derive(Debug)]
pub struct Dispatcher {
	tickets: TicketManager,
	giveaways: GiveawayManager,
	roles: RoleConfig,
}

impl Dispatcher {
	pub fn new(store: Arc<StateStore>, config: &ConfigData) -> Self {
		Self {
			tickets: TicketManager::new(Arc::clone(&store), config.tickets.channel_prefix.clone(), config.roles.staff),
			giveaways: GiveawayManager::new(store),
			roles: config.roles,
		}
	}

	pub fn tickets(&self) -> &TicketManager {
		&self.tickets
	}

	pub fn giveaways(&self) -> &GiveawayManager {
		&self.giveaways
	}

	pub async fn dispatch<S: EffectSink + ?Sized>(&self, action: Action, effects: &S) -> miette::Result<()> {
		let action_name = action.name();
		let result = match action {
			Action::CreateTicket { requester } => self.create_ticket(requester, effects).await,
			Action::CloseTicket { ticket, actor } => self.close_ticket(ticket, actor, effects).await,
			Action::StartGiveaway {
				actor,
				channel,
				title,
				body,
			} => self.start_giveaway(actor, channel, title, body, effects).await,
			Action::JoinGiveaway { giveaway, user } => self.join_giveaway(&giveaway, user, effects).await,
			Action::LeaveGiveaway { giveaway, user } => self.leave_giveaway(&giveaway, user, effects).await,
			Action::DrawGiveaway { actor, giveaway } => self.draw_giveaway(actor, &giveaway, effects).await,
			Action::IncomingMessage { channel, author, text } => {
				self.incoming_message(channel, &author, &text, effects).await
			}
			Action::Say { actor, channel, text } => self.say(actor, channel, text, effects).await,
		};

		match result {
			Ok(()) => Ok(()),
			Err(DispatchError::Storage(error)) => {
				tracing::error!(source = ?error, action = action_name, "state store failure");
				effects.apply(Effect::ephemeral(responses::GENERIC_FAILURE)).await?;
				Ok(())
			}
			Err(DispatchError::Platform(error)) => Err(error),
		}
	}

	async fn create_ticket<S: EffectSink + ?Sized>(&self, requester: Id<UserMarker>, effects: &S) -> DispatchResult {
		let (ticket, create_channel) = match self.tickets.create_ticket(requester).await? {
			CreateTicketOutcome::Created { ticket, channel } => (ticket, channel),
			CreateTicketOutcome::AlreadyOpen => {
				reply(effects, responses::TICKET_ALREADY_OPEN).await?;
				return Ok(());
			}
		};

		let channel = match effects.apply(create_channel).await {
			Ok(Applied::ChannelCreated(channel)) => channel,
			result => {
				self.tickets.abandon(ticket.requester).await?;
				reply(effects, responses::TICKET_CREATION_FAILED).await?;
				let error = match result {
					Err(error) => error,
					Ok(applied) => miette!("Creating a ticket channel produced {:?}", applied),
				};
				return Err(error.into());
			}
		};
		self.tickets.attach_channel(requester, channel).await?;

		let welcome = Effect::SendPublicMessage {
			channel,
			text: responses::ticket_welcome(requester),
		};
		if let Err(error) = effects.apply(welcome).await {
			tracing::warn!(source = ?error, channel = %channel, "couldn't post the ticket welcome message");
		}
		reply(effects, responses::TICKET_CREATED).await
	}

	async fn close_ticket<S: EffectSink + ?Sized>(&self, ticket: ChannelRef, actor: Actor, effects: &S) -> DispatchResult {
		if !actor.has_role(self.roles.staff) {
			return reply(effects, responses::NO_PERMISSION).await;
		}

		match self.tickets.close_ticket(&ticket, actor.user).await? {
			CloseTicketOutcome::Closing(delete_channel) => {
				// The reply has to go out while the channel still exists.
				reply(effects, responses::TICKET_CLOSING).await?;
				if let Err(error) = effects.apply(delete_channel).await {
					// The record is untouched, so closing can be tried again.
					let notice = Effect::SendPublicMessage {
						channel: ticket.id,
						text: String::from(responses::TICKET_CLOSE_FAILED),
					};
					if let Err(notice_error) = effects.apply(notice).await {
						tracing::warn!(source = ?notice_error, channel = %ticket.id, "couldn't report a failed ticket close");
					}
					return Err(error.into());
				}
				if let Err(error) = self.tickets.finish_close(&ticket).await {
					tracing::error!(source = ?error, channel = %ticket.id, "ticket channel was deleted but its record remains");
				}
				Ok(())
			}
			CloseTicketOutcome::NotATicket => reply(effects, responses::NOT_A_TICKET).await,
		}
	}

	async fn start_giveaway<S: EffectSink + ?Sized>(
		&self,
		actor: Actor,
		channel: Id<ChannelMarker>,
		title: String,
		body: String,
		effects: &S,
	) -> DispatchResult {
		if !actor.has_role(self.roles.operator) {
			return reply(effects, responses::NO_PERMISSION).await;
		}

		let posted = effects.apply(Effect::PostGiveaway { channel, title, body }).await;
		let giveaway = match posted {
			Ok(Applied::MessagePosted(message)) => message,
			result => {
				reply(effects, responses::GIVEAWAY_POST_FAILED).await?;
				let error = match result {
					Err(error) => error,
					Ok(applied) => miette!("Posting a giveaway produced {:?}", applied),
				};
				return Err(error.into());
			}
		};

		if let Err(error) = self.giveaways.start(giveaway, channel).await {
			// Without a record the announcement's buttons could never work.
			let withdraw = Effect::DeleteMessage {
				channel,
				message: giveaway,
			};
			if let Err(withdraw_error) = effects.apply(withdraw).await {
				tracing::warn!(source = ?withdraw_error, message = %giveaway, "couldn't remove an unrecorded giveaway announcement");
			}
			return Err(error.into());
		}
		reply(effects, &responses::giveaway_started(channel, giveaway)).await
	}

	async fn join_giveaway<S: EffectSink + ?Sized>(
		&self,
		giveaway: &str,
		user: Id<UserMarker>,
		effects: &S,
	) -> DispatchResult {
		let Some(giveaway) = giveaway_reference(giveaway) else {
			return reply(effects, responses::INVALID_GIVEAWAY_REFERENCE).await;
		};
		let response = match self.giveaways.join(giveaway, user).await? {
			JoinOutcome::Joined => responses::GIVEAWAY_JOINED,
			JoinOutcome::AlreadyJoined => responses::GIVEAWAY_ALREADY_JOINED,
			JoinOutcome::GiveawayNotFound => responses::GIVEAWAY_NOT_FOUND,
		};
		reply(effects, response).await
	}

	async fn leave_giveaway<S: EffectSink + ?Sized>(
		&self,
		giveaway: &str,
		user: Id<UserMarker>,
		effects: &S,
	) -> DispatchResult {
		let Some(giveaway) = giveaway_reference(giveaway) else {
			return reply(effects, responses::INVALID_GIVEAWAY_REFERENCE).await;
		};
		let response = match self.giveaways.leave(giveaway, user).await? {
			LeaveOutcome::Left => responses::GIVEAWAY_LEFT,
			LeaveOutcome::NotJoined => responses::GIVEAWAY_NOT_JOINED,
			LeaveOutcome::GiveawayNotFound => responses::GIVEAWAY_NOT_FOUND,
		};
		reply(effects, response).await
	}

	async fn draw_giveaway<S: EffectSink + ?Sized>(&self, actor: Actor, giveaway: &str, effects: &S) -> DispatchResult {
		if !actor.has_role(self.roles.operator) {
			return reply(effects, responses::NO_PERMISSION).await;
		}
		let Some(giveaway) = giveaway_reference(giveaway) else {
			return reply(effects, responses::INVALID_GIVEAWAY_REFERENCE).await;
		};

		match self.giveaways.draw(giveaway).await? {
			DrawOutcome::Winner(winner) => {
				effects
					.apply(Effect::SendPublicReply {
						text: responses::giveaway_winner(winner),
					})
					.await?;
				Ok(())
			}
			DrawOutcome::NoParticipants => reply(effects, responses::GIVEAWAY_NO_PARTICIPANTS).await,
			DrawOutcome::GiveawayNotFound => reply(effects, responses::GIVEAWAY_NOT_FOUND).await,
		}
	}

	async fn incoming_message<S: EffectSink + ?Sized>(
		&self,
		channel: ChannelRef,
		author: &str,
		text: &str,
		effects: &S,
	) -> DispatchResult {
		if let Some(log_line) = self.tickets.record_message(&channel, author, text) {
			effects.apply(log_line).await?;
		}
		Ok(())
	}

	async fn say<S: EffectSink + ?Sized>(
		&self,
		actor: Actor,
		channel: Id<ChannelMarker>,
		text: String,
		effects: &S,
	) -> DispatchResult {
		if !actor.has_role(self.roles.operator) {
			return reply(effects, responses::NO_PERMISSION).await;
		}
		effects.apply(Effect::SendPublicMessage { channel, text }).await?;
		reply(effects, responses::MESSAGE_SENT).await
	}
}

fn giveaway_reference(reference: &str) -> Option<Id<MessageMarker>> {
	match parse_giveaway_id(reference) {
		Ok(giveaway) => Some(giveaway),
		Err(error) => {
			tracing::debug!(%error, "rejected giveaway reference");
			None
		}
	}
}

async fn reply<S: EffectSink + ?Sized>(effects: &S, text: &str) -> DispatchResult {
	effects.apply(Effect::ephemeral(text)).await?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::parse_config_document;
	use async_trait::async_trait;
	use miette::bail;
	use std::sync::Mutex;
	use std::sync::atomic::{AtomicU64, Ordering};
	use tempfile::TempDir;
	use twilight_model::id::marker::RoleMarker;

	const CONFIG: &str = r#"
discord {
	bot-token "token"
	guild-id 1
}
roles {
	staff 500
	operator 600
}
"#;

	const STAFF: Id<RoleMarker> = Id::new(500);
	const OPERATOR: Id<RoleMarker> = Id::new(600);

	#[derive(Default)]
	struct RecordingSink {
		effects: Mutex<Vec<Effect>>,
		next_id: AtomicU64,
		refuse: Option<fn(&Effect) -> bool>,
	}

	impl RecordingSink {
		/// A sink where Discord rejects every effect matching `refuse`.
		fn refusing(refuse: fn(&Effect) -> bool) -> Self {
			Self {
				refuse: Some(refuse),
				..Self::default()
			}
		}

		fn take(&self) -> Vec<Effect> {
			std::mem::take(&mut *self.effects.lock().unwrap())
		}
	}

	#[async_trait]
	impl EffectSink for RecordingSink {
		async fn apply(&self, effect: Effect) -> miette::Result<Applied> {
			let id = 1000 + self.next_id.fetch_add(1, Ordering::SeqCst);
			if self.refuse.is_some_and(|refuse| refuse(&effect)) {
				bail!("missing permissions");
			}
			let applied = match &effect {
				Effect::CreateChannel { .. } => Applied::ChannelCreated(Id::new(id)),
				Effect::PostGiveaway { .. } => Applied::MessagePosted(Id::new(id)),
				_ => Applied::Done,
			};
			self.effects.lock().unwrap().push(effect);
			Ok(applied)
		}
	}

	async fn dispatcher() -> (TempDir, Dispatcher) {
		let dir = TempDir::new().unwrap();
		let store = Arc::new(StateStore::open(dir.path()).await.unwrap());
		let config = parse_config_document(CONFIG, None).unwrap();
		(dir, Dispatcher::new(store, &config))
	}

	fn actor(user: u64, roles: &[Id<RoleMarker>]) -> Actor {
		Actor {
			user: Id::new(user),
			roles: roles.to_vec(),
		}
	}

	#[tokio::test]
	async fn ticket_creation_flow() {
		let (_dir, dispatcher) = dispatcher().await;
		let sink = RecordingSink::default();

		dispatcher
			.dispatch(Action::CreateTicket { requester: Id::new(42) }, &sink)
			.await
			.unwrap();
		assert_eq!(
			sink.take(),
			vec![
				Effect::CreateChannel {
					name: String::from("ticket-42"),
					visibility: ChannelVisibility {
						member: Id::new(42),
						staff_role: STAFF,
					},
				},
				Effect::SendPublicMessage {
					channel: Id::new(1000),
					text: responses::ticket_welcome(Id::new(42)),
				},
				Effect::ephemeral(responses::TICKET_CREATED),
			]
		);
		let ticket = dispatcher.tickets().get(Id::new(42)).await.unwrap().unwrap();
		assert_eq!(ticket.channel, Some(Id::new(1000)));

		dispatcher
			.dispatch(Action::CreateTicket { requester: Id::new(42) }, &sink)
			.await
			.unwrap();
		assert_eq!(sink.take(), vec![Effect::ephemeral(responses::TICKET_ALREADY_OPEN)]);
	}

	#[tokio::test]
	async fn failed_channel_creation_releases_the_ticket() {
		let (_dir, dispatcher) = dispatcher().await;
		let sink = RecordingSink::refusing(|effect| matches!(effect, Effect::CreateChannel { .. }));

		let result = dispatcher
			.dispatch(Action::CreateTicket { requester: Id::new(42) }, &sink)
			.await;
		assert!(result.is_err());
		assert_eq!(sink.take(), vec![Effect::ephemeral(responses::TICKET_CREATION_FAILED)]);
		assert_eq!(dispatcher.tickets().get(Id::new(42)).await.unwrap(), None);
	}

	#[tokio::test]
	async fn closing_requires_staff() {
		let (_dir, dispatcher) = dispatcher().await;
		let sink = RecordingSink::default();
		dispatcher
			.dispatch(Action::CreateTicket { requester: Id::new(42) }, &sink)
			.await
			.unwrap();
		sink.take();
		let ticket = ChannelRef::classify(Id::new(1000), Some("ticket-42"), "ticket-");

		dispatcher
			.dispatch(
				Action::CloseTicket {
					ticket,
					actor: actor(7, &[OPERATOR]),
				},
				&sink,
			)
			.await
			.unwrap();
		assert_eq!(sink.take(), vec![Effect::ephemeral(responses::NO_PERMISSION)]);
		assert!(dispatcher.tickets().get(Id::new(42)).await.unwrap().is_some());

		dispatcher
			.dispatch(
				Action::CloseTicket {
					ticket,
					actor: actor(7, &[STAFF]),
				},
				&sink,
			)
			.await
			.unwrap();
		assert_eq!(
			sink.take(),
			vec![
				Effect::ephemeral(responses::TICKET_CLOSING),
				Effect::DeleteChannel { channel: Id::new(1000) },
			]
		);
		assert_eq!(dispatcher.tickets().get(Id::new(42)).await.unwrap(), None);
	}

	#[tokio::test]
	async fn closing_outside_a_ticket() {
		let (_dir, dispatcher) = dispatcher().await;
		let sink = RecordingSink::default();
		dispatcher
			.dispatch(
				Action::CloseTicket {
					ticket: ChannelRef::classify(Id::new(5), Some("general"), "ticket-"),
					actor: actor(7, &[STAFF]),
				},
				&sink,
			)
			.await
			.unwrap();
		assert_eq!(sink.take(), vec![Effect::ephemeral(responses::NOT_A_TICKET)]);
	}

	#[tokio::test]
	async fn giveaway_lifecycle() {
		let (_dir, dispatcher) = dispatcher().await;
		let sink = RecordingSink::default();

		dispatcher
			.dispatch(
				Action::StartGiveaway {
					actor: actor(1, &[OPERATOR]),
					channel: Id::new(30),
					title: String::from("Prize"),
					body: String::from("Win something"),
				},
				&sink,
			)
			.await
			.unwrap();
		assert_eq!(
			sink.take(),
			vec![
				Effect::PostGiveaway {
					channel: Id::new(30),
					title: String::from("Prize"),
					body: String::from("Win something"),
				},
				Effect::ephemeral(responses::giveaway_started(Id::new(30), Id::new(1000))),
			]
		);

		let join = Action::JoinGiveaway {
			giveaway: String::from("1000"),
			user: Id::new(8),
		};
		dispatcher.dispatch(join.clone(), &sink).await.unwrap();
		dispatcher.dispatch(join, &sink).await.unwrap();
		dispatcher
			.dispatch(
				Action::LeaveGiveaway {
					giveaway: String::from("1000"),
					user: Id::new(9),
				},
				&sink,
			)
			.await
			.unwrap();
		assert_eq!(
			sink.take(),
			vec![
				Effect::ephemeral(responses::GIVEAWAY_JOINED),
				Effect::ephemeral(responses::GIVEAWAY_ALREADY_JOINED),
				Effect::ephemeral(responses::GIVEAWAY_NOT_JOINED),
			]
		);

		let draw = Action::DrawGiveaway {
			actor: actor(1, &[OPERATOR]),
			giveaway: String::from("1000"),
		};
		dispatcher.dispatch(draw.clone(), &sink).await.unwrap();
		dispatcher.dispatch(draw, &sink).await.unwrap();
		assert_eq!(
			sink.take(),
			vec![
				Effect::SendPublicReply {
					text: responses::giveaway_winner(Id::new(8)),
				},
				Effect::ephemeral(responses::GIVEAWAY_NOT_FOUND),
			]
		);
	}

	#[tokio::test]
	async fn giveaways_need_an_operator() {
		let (_dir, dispatcher) = dispatcher().await;
		let sink = RecordingSink::default();
		dispatcher
			.dispatch(
				Action::StartGiveaway {
					actor: actor(1, &[STAFF]),
					channel: Id::new(30),
					title: String::from("Prize"),
					body: String::from("Win something"),
				},
				&sink,
			)
			.await
			.unwrap();
		dispatcher
			.dispatch(
				Action::DrawGiveaway {
					actor: actor(1, &[]),
					giveaway: String::from("1000"),
				},
				&sink,
			)
			.await
			.unwrap();
		assert_eq!(
			sink.take(),
			vec![
				Effect::ephemeral(responses::NO_PERMISSION),
				Effect::ephemeral(responses::NO_PERMISSION),
			]
		);
	}

	#[tokio::test]
	async fn malformed_references_are_not_missing_giveaways() {
		let (_dir, dispatcher) = dispatcher().await;
		let sink = RecordingSink::default();
		dispatcher
			.dispatch(
				Action::DrawGiveaway {
					actor: actor(1, &[OPERATOR]),
					giveaway: String::from("not-a-number"),
				},
				&sink,
			)
			.await
			.unwrap();
		dispatcher
			.dispatch(
				Action::DrawGiveaway {
					actor: actor(1, &[OPERATOR]),
					giveaway: String::from("123"),
				},
				&sink,
			)
			.await
			.unwrap();
		assert_eq!(
			sink.take(),
			vec![
				Effect::ephemeral(responses::INVALID_GIVEAWAY_REFERENCE),
				Effect::ephemeral(responses::GIVEAWAY_NOT_FOUND),
			]
		);
	}

	#[tokio::test]
	async fn empty_draw_is_reported() {
		let (_dir, dispatcher) = dispatcher().await;
		let sink = RecordingSink::default();
		dispatcher.giveaways().start(Id::new(77), Id::new(30)).await.unwrap();
		dispatcher
			.dispatch(
				Action::DrawGiveaway {
					actor: actor(1, &[OPERATOR]),
					giveaway: String::from("77"),
				},
				&sink,
			)
			.await
			.unwrap();
		assert_eq!(
			sink.take(),
			vec![Effect::ephemeral(responses::GIVEAWAY_NO_PARTICIPANTS)]
		);
		assert!(dispatcher.giveaways().get(Id::new(77)).await.unwrap().is_some());
	}

	#[tokio::test]
	async fn ticket_messages_become_log_lines() {
		let (_dir, dispatcher) = dispatcher().await;
		let sink = RecordingSink::default();
		let ticket = ChannelRef::classify(Id::new(5), Some("ticket-42"), "ticket-");
		dispatcher
			.dispatch(
				Action::IncomingMessage {
					channel: ticket,
					author: String::from("someone"),
					text: String::from("help"),
				},
				&sink,
			)
			.await
			.unwrap();
		dispatcher
			.dispatch(
				Action::IncomingMessage {
					channel: ChannelRef::other(Id::new(6)),
					author: String::from("someone"),
					text: String::from("chatter"),
				},
				&sink,
			)
			.await
			.unwrap();
		assert_eq!(
			sink.take(),
			vec![Effect::AppendLogLine {
				channel: ticket,
				line: String::from("someone: help"),
			}]
		);
	}

	#[tokio::test]
	async fn say_posts_for_operators() {
		let (_dir, dispatcher) = dispatcher().await;
		let sink = RecordingSink::default();
		dispatcher
			.dispatch(
				Action::Say {
					actor: actor(1, &[OPERATOR]),
					channel: Id::new(30),
					text: String::from("hello"),
				},
				&sink,
			)
			.await
			.unwrap();
		assert_eq!(
			sink.take(),
			vec![
				Effect::SendPublicMessage {
					channel: Id::new(30),
					text: String::from("hello"),
				},
				Effect::ephemeral(responses::MESSAGE_SENT),
			]
		);
	}

	#[tokio::test]
	async fn storage_failures_get_a_generic_reply() {
		let (dir, dispatcher) = dispatcher().await;
		let sink = RecordingSink::default();
		std::fs::write(dir.path().join("giveaways").join("88.json"), b"{").unwrap();
		dispatcher
			.dispatch(
				Action::JoinGiveaway {
					giveaway: String::from("88"),
					user: Id::new(8),
				},
				&sink,
			)
			.await
			.unwrap();
		assert_eq!(sink.take(), vec![Effect::ephemeral(responses::GENERIC_FAILURE)]);
	}

	#[tokio::test]
	async fn missing_welcome_message_still_confirms_the_ticket() {
		let (_dir, dispatcher) = dispatcher().await;
		let sink = RecordingSink::refusing(|effect| matches!(effect, Effect::SendPublicMessage { .. }));

		dispatcher
			.dispatch(Action::CreateTicket { requester: Id::new(42) }, &sink)
			.await
			.unwrap();
		assert_eq!(
			sink.take(),
			vec![
				Effect::CreateChannel {
					name: String::from("ticket-42"),
					visibility: ChannelVisibility {
						member: Id::new(42),
						staff_role: STAFF,
					},
				},
				Effect::ephemeral(responses::TICKET_CREATED),
			]
		);
		let ticket = dispatcher.tickets().get(Id::new(42)).await.unwrap().unwrap();
		assert_eq!(ticket.channel, Some(Id::new(1000)));
	}

	#[tokio::test]
	async fn failed_channel_delete_keeps_the_ticket_open() {
		let (_dir, dispatcher) = dispatcher().await;
		let sink = RecordingSink::default();
		dispatcher
			.dispatch(Action::CreateTicket { requester: Id::new(42) }, &sink)
			.await
			.unwrap();
		let ticket = ChannelRef::classify(Id::new(1000), Some("ticket-42"), "ticket-");
		let close = Action::CloseTicket {
			ticket,
			actor: actor(7, &[STAFF]),
		};

		let refusing_sink = RecordingSink::refusing(|effect| matches!(effect, Effect::DeleteChannel { .. }));
		let result = dispatcher.dispatch(close.clone(), &refusing_sink).await;
		assert!(result.is_err());
		assert_eq!(
			refusing_sink.take(),
			vec![
				Effect::ephemeral(responses::TICKET_CLOSING),
				Effect::SendPublicMessage {
					channel: Id::new(1000),
					text: String::from(responses::TICKET_CLOSE_FAILED),
				},
			]
		);
		let record = dispatcher.tickets().get(Id::new(42)).await.unwrap().unwrap();
		assert_eq!(record.channel, Some(Id::new(1000)));

		// The requester still can't open a second ticket alongside the surviving channel.
		sink.take();
		dispatcher
			.dispatch(Action::CreateTicket { requester: Id::new(42) }, &sink)
			.await
			.unwrap();
		assert_eq!(sink.take(), vec![Effect::ephemeral(responses::TICKET_ALREADY_OPEN)]);

		dispatcher.dispatch(close, &sink).await.unwrap();
		assert_eq!(
			sink.take(),
			vec![
				Effect::ephemeral(responses::TICKET_CLOSING),
				Effect::DeleteChannel { channel: Id::new(1000) },
			]
		);
		assert_eq!(dispatcher.tickets().get(Id::new(42)).await.unwrap(), None);
	}

	#[tokio::test]
	async fn unrecorded_giveaway_announcement_is_withdrawn() {
		let (dir, dispatcher) = dispatcher().await;
		let sink = RecordingSink::default();
		// A directory where the record file belongs makes the store fail for this giveaway.
		std::fs::create_dir(dir.path().join("giveaways").join("1000.json")).unwrap();

		dispatcher
			.dispatch(
				Action::StartGiveaway {
					actor: actor(1, &[OPERATOR]),
					channel: Id::new(30),
					title: String::from("Prize"),
					body: String::from("Win something"),
				},
				&sink,
			)
			.await
			.unwrap();
		assert_eq!(
			sink.take(),
			vec![
				Effect::PostGiveaway {
					channel: Id::new(30),
					title: String::from("Prize"),
					body: String::from("Win something"),
				},
				Effect::DeleteMessage {
					channel: Id::new(30),
					message: Id::new(1000),
				},
				Effect::ephemeral(responses::GENERIC_FAILURE),
			]
		);
	}
}
