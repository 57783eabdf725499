// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use kdl::{KdlDocument, KdlValue};
use miette::{IntoDiagnostic, miette};
use std::path::PathBuf;
use tokio::fs::read_to_string;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, GuildMarker, RoleMarker};

const DEFAULT_TICKET_PREFIX: &str = "ticket-";
const DEFAULT_LOG_DIRECTORY: &str = "ticket_logs";
const DEFAULT_DATA_DIRECTORY: &str = "data";

/// Reads the configuration file. The `DISCORD_TOKEN` environment variable, if set, takes precedence over the
/// configured bot token.
pub async fn parse_config(config_path: &str) -> miette::Result<ConfigData> {
	let config_file_contents = read_to_string(config_path).await.into_diagnostic()?;
	let token_override = std::env::var("DISCORD_TOKEN").ok();
	parse_config_document(&config_file_contents, token_override)
}

pub fn parse_config_document(contents: &str, token_override: Option<String>) -> miette::Result<ConfigData> {
	let document: KdlDocument = contents.parse()?;

	let discord = section(&document, "discord")?;
	let bot_token = match token_override {
		Some(token) => token,
		None => string(discord, "discord", "bot-token")?
			.ok_or_else(|| miette!("No bot token configured; set discord.bot-token or DISCORD_TOKEN"))?,
	};
	let guild = required(snowflake(discord, "discord", "guild-id")?, "discord", "guild-id")?;

	let roles = section(&document, "roles")?;
	let staff = required(snowflake(roles, "roles", "staff")?, "roles", "staff")?;
	let operator = required(snowflake(roles, "roles", "operator")?, "roles", "operator")?;

	let (panel_channel, channel_prefix, log_directory) = match document.get("tickets").and_then(|node| node.children()) {
		Some(tickets) => (
			snowflake(tickets, "tickets", "panel-channel")?,
			string(tickets, "tickets", "channel-prefix")?,
			string(tickets, "tickets", "log-directory")?,
		),
		None => (None, None, None),
	};
	let channel_prefix = channel_prefix.unwrap_or_else(|| String::from(DEFAULT_TICKET_PREFIX));
	if channel_prefix.is_empty() {
		return Err(miette!("tickets.channel-prefix may not be empty"));
	}

	let data_directory = match document.get("storage").and_then(|node| node.children()) {
		Some(storage) => string(storage, "storage", "data-directory")?,
		None => None,
	};

	Ok(ConfigData {
		discord: DiscordConfig { bot_token, guild },
		roles: RoleConfig { staff, operator },
		tickets: TicketConfig {
			panel_channel,
			channel_prefix,
			log_directory: PathBuf::from(log_directory.unwrap_or_else(|| String::from(DEFAULT_LOG_DIRECTORY))),
		},
		storage: StorageConfig {
			data_directory: PathBuf::from(data_directory.unwrap_or_else(|| String::from(DEFAULT_DATA_DIRECTORY))),
		},
	})
}

fn section<'a>(document: &'a KdlDocument, name: &str) -> miette::Result<&'a KdlDocument> {
	document
		.get(name)
		.and_then(|node| node.children())
		.ok_or_else(|| miette!("Configuration is missing the `{}` block", name))
}

fn required<T>(value: Option<T>, section: &str, name: &str) -> miette::Result<T> {
	value.ok_or_else(|| miette!("Configuration is missing {}.{}", section, name))
}

fn string(block: &KdlDocument, section: &str, name: &str) -> miette::Result<Option<String>> {
	match block.get_arg(name) {
		Some(KdlValue::String(value)) => Ok(Some(value.clone())),
		Some(other) => Err(miette!("{}.{} must be a string (got {})", section, name, other)),
		None => Ok(None),
	}
}

/// Reads a Discord ID. IDs may be written either as numbers or as strings.
fn snowflake<T>(block: &KdlDocument, section: &str, name: &str) -> miette::Result<Option<Id<T>>> {
	let raw = match block.get_arg(name) {
		Some(KdlValue::Integer(value)) => u64::try_from(*value).ok(),
		Some(KdlValue::String(value)) => value.parse::<u64>().ok(),
		Some(_) => None,
		None => return Ok(None),
	};
	match raw.and_then(Id::new_checked) {
		Some(id) => Ok(Some(id)),
		None => Err(miette!("{}.{} isn't a valid Discord ID", section, name)),
	}
}

#[derive(Debug)]
pub struct ConfigData {
	pub discord: DiscordConfig,
	pub roles: RoleConfig,
	pub tickets: TicketConfig,
	pub storage: StorageConfig,
}

#[derive(Debug)]
pub struct DiscordConfig {
	pub bot_token: String,
	/// The guild the bot serves. Commands are registered to it alone.
	pub guild: Id<GuildMarker>,
}

#[derive(Clone, Copy, Debug)]
pub struct RoleConfig {
	/// Members with this role can see and close tickets.
	pub staff: Id<RoleMarker>,
	/// Members with this role run giveaways and can speak as the bot.
	pub operator: Id<RoleMarker>,
}

#[derive(Debug)]
pub struct TicketConfig {
	/// Where the "create a ticket" panel is posted, if anywhere.
	pub panel_channel: Option<Id<ChannelMarker>>,
	pub channel_prefix: String,
	pub log_directory: PathBuf,
}

#[derive(Debug)]
pub struct StorageConfig {
	pub data_directory: PathBuf,
}
