// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::dispatch::ChannelVisibility;
use twilight_model::channel::permission_overwrite::{PermissionOverwrite, PermissionOverwriteType};
use twilight_model::guild::Permissions;
use twilight_model::id::Id;
use twilight_model::id::marker::{GuildMarker, RoleMarker};

/// Permissions given to the people a ticket channel is for.
pub fn ticket_participant_permissions() -> Permissions {
	Permissions::VIEW_CHANNEL | Permissions::READ_MESSAGE_HISTORY | Permissions::SEND_MESSAGES
}

/// Permission overwrites that hide a ticket channel from everyone except the ticket's member and staff.
pub fn ticket_channel_overwrites(guild_id: Id<GuildMarker>, visibility: ChannelVisibility) -> Vec<PermissionOverwrite> {
	let everyone_role: Id<RoleMarker> = guild_id.cast();
	vec![
		PermissionOverwrite {
			allow: Permissions::empty(),
			deny: Permissions::VIEW_CHANNEL,
			id: everyone_role.cast(),
			kind: PermissionOverwriteType::Role,
		},
		PermissionOverwrite {
			allow: ticket_participant_permissions(),
			deny: Permissions::empty(),
			id: visibility.member.cast(),
			kind: PermissionOverwriteType::Member,
		},
		PermissionOverwrite {
			allow: ticket_participant_permissions(),
			deny: Permissions::empty(),
			id: visibility.staff_role.cast(),
			kind: PermissionOverwriteType::Role,
		},
	]
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn only_member_and_staff_can_see_tickets() {
		let visibility = ChannelVisibility {
			member: Id::new(20),
			staff_role: Id::new(30),
		};
		let overwrites = ticket_channel_overwrites(Id::new(10), visibility);
		assert_eq!(overwrites.len(), 3);

		assert_eq!(overwrites[0].id, Id::new(10));
		assert_eq!(overwrites[0].deny, Permissions::VIEW_CHANNEL);
		assert!(overwrites[0].allow.is_empty());
		assert_eq!(overwrites[1].id, Id::new(20));
		assert_eq!(overwrites[1].kind, PermissionOverwriteType::Member);
		assert_eq!(overwrites[2].id, Id::new(30));
		assert!(overwrites[2].allow.contains(Permissions::SEND_MESSAGES));
		assert!(overwrites[2].deny.is_empty());
	}
}
