//! Module identifiers.
//!
//! Modules are keyed by a random 128-bit identifier, not by a hash of their
//! code, so two byte-identical binaries still get distinct rows.

use uuid::Uuid;

/// Source of fresh module identifiers.
pub trait ModuleIdGenerator {
    fn next_id(&mut self) -> Uuid;
}

/// Draws random version 4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomModuleIds;

impl ModuleIdGenerator for RandomModuleIds {
    fn next_id(&mut self) -> Uuid {
        Uuid::new_v4()
    }
}

impl<F> ModuleIdGenerator for F
where
    F: FnMut() -> Uuid,
{
    fn next_id(&mut self) -> Uuid {
        self()
    }
}
