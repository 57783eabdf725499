// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use twilight_model::channel::message::component::{ActionRow, Button, ButtonStyle, Component};
use twilight_model::id::Id;
use twilight_model::id::marker::MessageMarker;

pub const CREATE_TICKET_ID: &str = "create_ticket";
pub const GIVEAWAY_ID_PREFIX: &str = "giveaway";

fn button(custom_id: String, label: &str, style: ButtonStyle) -> Component {
	Component::Button(Button {
		custom_id: Some(custom_id),
		disabled: false,
		emoji: None,
		label: Some(String::from(label)),
		style,
		url: None,
		sku_id: None,
	})
}

pub fn new_ticket_button() -> Component {
	let create_button = button(String::from(CREATE_TICKET_ID), "Create Ticket", ButtonStyle::Success);
	Component::ActionRow(ActionRow {
		components: vec![create_button],
	})
}

/// The join and leave buttons for a giveaway. Their custom IDs are `giveaway/<message ID>/<join|leave>`.
pub fn giveaway_buttons(giveaway: Id<MessageMarker>) -> Component {
	let join_button = button(
		format!("{}/{}/join", GIVEAWAY_ID_PREFIX, giveaway),
		"Join Giveaway",
		ButtonStyle::Success,
	);
	let leave_button = button(
		format!("{}/{}/leave", GIVEAWAY_ID_PREFIX, giveaway),
		"Leave Giveaway",
		ButtonStyle::Danger,
	);
	Component::ActionRow(ActionRow {
		components: vec![join_button, leave_button],
	})
}
