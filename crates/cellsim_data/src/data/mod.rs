//! Plain data types: identities, lineage records and reporting snapshots.

pub mod cell;
pub mod snapshot;
