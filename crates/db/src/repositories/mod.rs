//! Repository layer.
//!
//! Repositories are constructed with the [`TableStore`](crate::store::TableStore)
//! they operate on, so each caller (and each test) supplies its own state.
//! They speak UI shape on the outside and DB shape to the store.

pub mod case_repo;
pub mod profile_repo;
pub mod record_repo;

pub use case_repo::{CaseDetail, CaseRepo};
pub use profile_repo::{Profile, ProfileRepo, PROFILES_TABLE};
pub use record_repo::RecordRepo;
