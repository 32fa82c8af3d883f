//! `des-core` — foundational types for the airport fuel station simulation.
//!
//! This crate is a dependency of every other `des-*` crate.  It intentionally
//! has no `des-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                                  |
//! |-----------|-----------------------------------------------------------|
//! | [`ids`]   | `ProcessId`, `ResourceId`, `StoreId`, `EventId`           |
//! | [`time`]  | `SimTime`, `Clock`, `RunConfig`                           |
//! | [`rng`]   | `UniformSource`, `SimRng`, `ScriptedSource`               |
//! | [`error`] | `DesError`, `DesResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, `SimTime`, `RunConfig`. |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{DesError, DesResult};
pub use ids::{EventId, ProcessId, ResourceId, StoreId};
pub use rng::{ScriptedSource, SimRng, UniformSource};
pub use time::{Clock, RunConfig, SimTime};
