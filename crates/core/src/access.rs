//! Ownership-based access guard.
//!
//! A record is readable by its owner or by anyone when it is public, and
//! writable only by its owner. Failed checks surface as
//! [`CoreError::NotFound`] rather than a "forbidden" outcome, so callers
//! cannot probe for other users' private records.

use crate::error::CoreError;
use crate::types::DbId;

/// The resolved identity of the user making a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub id: DbId,
}

impl Caller {
    pub fn new(id: DbId) -> Self {
        Self { id }
    }
}

/// A record with a single owner and an optional public read flag.
pub trait Owned {
    fn owner_id(&self) -> DbId;
    fn is_public(&self) -> bool;
}

/// True when the caller owns the record or the record is public.
pub fn can_read<T: Owned + ?Sized>(caller: &Caller, record: &T) -> bool {
    record.owner_id() == caller.id || record.is_public()
}

/// True only when the caller owns the record.
pub fn can_write<T: Owned + ?Sized>(caller: &Caller, record: &T) -> bool {
    record.owner_id() == caller.id
}

/// Keep `record` only if the caller may read it.
///
/// Both a missing record and an unreadable one produce the same
/// `NotFound { entity, id }` error.
pub fn ensure_readable<T: Owned>(
    caller: &Caller,
    record: Option<T>,
    entity: &'static str,
    id: DbId,
) -> Result<T, CoreError> {
    record
        .filter(|r| can_read(caller, r))
        .ok_or_else(|| CoreError::not_found(entity, id))
}
