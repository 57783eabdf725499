// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use miette::Diagnostic;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, OwnedMutexGuard};
use twilight_model::id::Id;
use twilight_model::id::marker::{MessageMarker, UserMarker};

/// The kinds of entity kept in the store. Each kind gets its own directory.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EntityKind {
	Ticket,
	Giveaway,
}

impl EntityKind {
	pub fn all() -> [Self; 2] {
		[Self::Ticket, Self::Giveaway]
	}

	fn directory(&self) -> &'static str {
		match self {
			Self::Ticket => "tickets",
			Self::Giveaway => "giveaways",
		}
	}
}

/// Identifies a single record in the store.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct StoreKey {
	pub kind: EntityKind,
	pub id: u64,
}

impl StoreKey {
	/// Tickets are keyed by the user who opened them.
	pub fn ticket(requester: Id<UserMarker>) -> Self {
		Self {
			kind: EntityKind::Ticket,
			id: requester.get(),
		}
	}

	/// Giveaways are keyed by the ID of their announcement message.
	pub fn giveaway(giveaway: Id<MessageMarker>) -> Self {
		Self {
			kind: EntityKind::Giveaway,
			id: giveaway.get(),
		}
	}
}

impl fmt::Display for StoreKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}", self.kind.directory(), self.id)
	}
}

/// What an update function passed to [StateStore::mutate] wants done with the record.
#[derive(Debug)]
pub enum Mutation<T> {
	/// Leave the stored record exactly as it was.
	Keep,
	/// Replace (or create) the record.
	Put(T),
	/// Remove the record.
	Remove,
}

/// Result of [StateStore::delete].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Deleted {
	Removed,
	NotFound,
}

#[derive(Debug, Diagnostic)]
pub enum StoreError {
	Io(std::io::Error),
	Serialization(serde_json::Error),
}

impl From<std::io::Error> for StoreError {
	fn from(error: std::io::Error) -> Self {
		Self::Io(error)
	}
}

impl From<serde_json::Error> for StoreError {
	fn from(error: serde_json::Error) -> Self {
		Self::Serialization(error)
	}
}

impl std::error::Error for StoreError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Io(error) => Some(error),
			Self::Serialization(error) => Some(error),
		}
	}
}

impl fmt::Display for StoreError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Io(error) => write!(f, "state store I/O error: {}", error),
			Self::Serialization(error) => write!(f, "state store record error: {}", error),
		}
	}
}

type LockTable = HashMap<StoreKey, Arc<Mutex<()>>>;

/// Durable key-value store holding one JSON file per record.
///
/// Every [mutate](Self::mutate) and [delete](Self::delete) holds an exclusive lock on its key for the whole
/// read-modify-write, so operations on the same key never interleave. Operations on different keys only share the
/// lock table, which is held just long enough to look a lock up.
///
/// Records are written to a temporary sibling file and renamed into place, so readers see either the old or the new
/// record and a failed write leaves the old record authoritative.
#[derive(Debug)]
pub struct StateStore {
	root: PathBuf,
	/// Never held across an await.
	locks: std::sync::Mutex<LockTable>,
}

impl StateStore {
	/// Opens the store rooted at `root`, creating its directories if needed.
	pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
		let root = root.into();
		for kind in EntityKind::all() {
			fs::create_dir_all(root.join(kind.directory())).await?;
		}
		Ok(Self {
			root,
			locks: std::sync::Mutex::new(HashMap::new()),
		})
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Reads the current record for a key.
	///
	/// Doesn't take the key lock; record files are only ever replaced by rename.
	pub async fn get<T: DeserializeOwned>(&self, key: &StoreKey) -> Result<Option<T>, StoreError> {
		read_record(&self.record_path(key)).await
	}

	/// Applies `update` to the current record for `key` (or `None` if there isn't one) and persists its decision,
	/// all under the key's lock. Returns whatever result `update` produced alongside its [Mutation].
	///
	/// If persisting fails, the error is returned and the previous record is untouched.
	pub async fn mutate<T, R, F>(&self, key: &StoreKey, update: F) -> Result<R, StoreError>
	where
		T: Serialize + DeserializeOwned,
		F: FnOnce(Option<T>) -> (Mutation<T>, R),
	{
		let _lock = self.lock_key(key).await;
		self.mutate_locked(key, update).await
	}

	/// Removes the record for `key`.
	pub async fn delete(&self, key: &StoreKey) -> Result<Deleted, StoreError> {
		let _lock = self.lock_key(key).await;
		remove_record(&self.record_path(key)).await
	}

	async fn mutate_locked<T, R, F>(&self, key: &StoreKey, update: F) -> Result<R, StoreError>
	where
		T: Serialize + DeserializeOwned,
		F: FnOnce(Option<T>) -> (Mutation<T>, R),
	{
		let path = self.record_path(key);
		let current = read_record(&path).await?;
		let (mutation, result) = update(current);
		match mutation {
			Mutation::Keep => (),
			Mutation::Put(value) => write_record(&path, &value).await?,
			Mutation::Remove => {
				remove_record(&path).await?;
			}
		}
		Ok(result)
	}

	fn record_path(&self, key: &StoreKey) -> PathBuf {
		self.root.join(key.kind.directory()).join(format!("{}.json", key.id))
	}

	async fn lock_key(&self, key: &StoreKey) -> KeyLock<'_> {
		// Created before waiting so the table entry is pruned even if the caller gives up while waiting.
		let mut key_lock = KeyLock {
			table: &self.locks,
			key: key.clone(),
			guard: None,
		};
		let lock = {
			let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
			Arc::clone(locks.entry(key.clone()).or_default())
		};
		key_lock.guard = Some(lock.lock_owned().await);
		key_lock
	}

	#[cfg(test)]
	fn held_locks(&self) -> usize {
		self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
	}
}

/// Exclusive hold on one key. Dropping it releases the key and removes its table entry once nobody else wants it.
struct KeyLock<'a> {
	table: &'a std::sync::Mutex<LockTable>,
	key: StoreKey,
	guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for KeyLock<'_> {
	fn drop(&mut self) {
		self.guard.take();
		let mut locks = self.table.lock().unwrap_or_else(PoisonError::into_inner);
		// Only the table itself still holds the lock, so nobody is waiting on it.
		if locks.get(&self.key).is_some_and(|lock| Arc::strong_count(lock) == 1) {
			locks.remove(&self.key);
		}
	}
}

async fn read_record<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
	match fs::read(path).await {
		Ok(contents) => Ok(Some(serde_json::from_slice(&contents)?)),
		Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
		Err(error) => Err(error.into()),
	}
}

async fn write_record<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
	let contents = serde_json::to_vec_pretty(value)?;
	let temp_path = path.with_extension("json.tmp");
	let mut file = fs::File::create(&temp_path).await?;
	file.write_all(&contents).await?;
	file.sync_all().await?;
	drop(file);
	fs::rename(&temp_path, path).await?;
	Ok(())
}

async fn remove_record(path: &Path) -> Result<Deleted, StoreError> {
	match fs::remove_file(path).await {
		Ok(()) => Ok(Deleted::Removed),
		Err(error) if error.kind() == ErrorKind::NotFound => Ok(Deleted::NotFound),
		Err(error) => Err(error.into()),
	}
}
