//! `des-station` — the airport fuel station scenario.
//!
//! Planes arrive at random intervals, queue for one of a few pumps, and draw
//! fuel from a shared reservoir.  A controller polls the reservoir and sends
//! a tank truck when it runs low.  The processes never talk to each other
//! directly; they interact only through the pump pool, the reservoir, and
//! timeouts.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`config`]     | `StationConfig` — serde/JSON parameters and validation    |
//! | [`state`]      | `StationState` — records, counters, random source         |
//! | [`record`]     | `CompletionRecord`                                        |
//! | [`plane`]      | `Plane` process                                           |
//! | [`controller`] | `Controller` process                                      |
//! | [`truck`]      | `Truck` process                                           |
//! | [`arrivals`]   | `ArrivalGenerator` process                                |
//! | [`station`]    | `build_station`, `run_station`, `StationReport`           |
//! | [`error`]      | `StationError`, `StationResult<T>`                        |

pub mod arrivals;
pub mod config;
pub mod controller;
pub mod error;
pub mod plane;
pub mod record;
pub mod state;
pub mod station;
pub mod truck;


pub use arrivals::ArrivalGenerator;
pub use config::StationConfig;
pub use controller::Controller;
pub use error::{StationError, StationResult};
pub use plane::Plane;
pub use record::CompletionRecord;
pub use state::StationState;
pub use station::{build_station, run_station, StationHandles, StationReport};
pub use truck::Truck;
