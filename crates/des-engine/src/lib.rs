//! `des-engine` — discrete-event scheduler, processes, and shared resources.
//!
//! # Event loop
//!
//! ```text
//! while next event time < horizon:
//!   ① Pop        — earliest event; equal instants pop in scheduling order.
//!   ② Advance    — clock jumps to the event's instant.
//!   ③ Resume     — the target process runs until it yields a Condition
//!                  (or a callback runs against the environment).
//!   ④ Register   — the condition is dispatched:
//!                    Timeout(d)     → wake scheduled at now + d
//!                    Request(r)     → granted now, or queued FIFO on r
//!                    Get/Put(s, a)  → served now, or queued FIFO on s
//!                    Join(p)        → woken when p terminates
//! ```
//!
//! Every satisfied condition goes back through the queue at the current
//! instant instead of resuming the waiter inline, so simultaneous wake-ups
//! happen in a single well-defined order.
//!
//! # Crate layout
//!
//! | Module        | Contents                                               |
//! |---------------|--------------------------------------------------------|
//! | [`queue`]     | `EventQueue<T>` — clock + FIFO-stable time buckets      |
//! | [`condition`] | `Condition`, `Wake`, `Step`                            |
//! | [`process`]   | `Process<S>` trait                                     |
//! | [`context`]   | `Context<'_, S>` handed to every resumption            |
//! | [`resource`]  | `CountedResource`                                      |
//! | [`store`]     | `QuantityStore`                                        |
//! | [`env`]       | `Environment<S>`, `RunSummary`, `ProcessFailure`       |
//! | [`builder`]   | `EnvironmentBuilder<S>`                                |
//! | [`observer`]  | `SimObserver<S>`, `NoopObserver`, `ProcessOutcome`     |
//! | [`error`]     | `EngineError`, `EngineResult<T>`                       |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let mut builder = EnvironmentBuilder::new(State::default());
//! let pumps = builder.resource(2);
//! let mut env = builder.build()?;
//! env.spawn(Worker::new(pumps));
//! env.run(Some(SimTime::new(100.0)?), &mut NoopObserver)?;
//! ```

pub mod builder;
pub mod condition;
pub mod context;
pub mod env;
pub mod error;
pub mod observer;
pub mod process;
pub mod queue;
pub mod resource;
pub mod store;

#[cfg(test)]
mod tests;

pub use builder::EnvironmentBuilder;
pub use condition::{Condition, Step, Wake};
pub use context::Context;
pub use env::{Environment, ProcessFailure, RunSummary};
pub use error::{EngineError, EngineResult};
pub use observer::{NoopObserver, ProcessOutcome, SimObserver};
pub use process::Process;
pub use queue::EventQueue;
pub use resource::CountedResource;
pub use store::{QuantityStore, Served, StoreOp};
