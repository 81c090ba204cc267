// The core module contains all business logic.
// Each feature gets its own submodule.

#[path = "sources/mod.rs"]
pub mod sources;
