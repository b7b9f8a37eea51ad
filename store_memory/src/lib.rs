//! In-memory storage backend and deterministic clock.
//!
//! `MemoryStore` implements every storage trait behind `Mutex<HashMap>`,
//! so tests (and small deployments) can inject it wherever a backend is
//! required. The optimistic-concurrency compare happens under the same
//! lock as the write, which is what makes `update_record` atomic.

pub mod clock;
pub mod store;

pub use clock::NullClock;
pub use store::MemoryStore;
