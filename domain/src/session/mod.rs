//! Persisted session state: plenary voting results and the snapshot format

pub mod record;
pub mod snapshot;
pub mod store;

pub use record::VotingSessionRecord;
pub use snapshot::{SessionSnapshot, SpeechesDefaults, default_voting_config};
pub use store::{SaveOutcome, VotingSessionStore};
