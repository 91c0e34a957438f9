//! In-memory storage backends for Motormind.
//!
//! Both backends here are process-lifetime only: nothing survives a
//! restart. They implement the traits from `motormind_core::store`.

pub mod conversation;
pub mod vector;

pub use conversation::InMemoryConversationStore;
pub use vector::InMemoryVectorIndex;
