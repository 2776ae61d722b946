//! Event bus - subject-based publish/subscribe.
//!
//! This module provides the transport contract and the in-process
//! implementation.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     EventBus (trait)                         │
//! │  publish(ctx, subject, event)                               │
//! │  subscribe(pattern, handler)            -> fan-out          │
//! │  subscribe_with_handler_group(pattern, group, handler)      │
//! │                                         -> one per group    │
//! │  close()                                                    │
//! └─────────────────────────────────────────────────────────────┘
//!          │                                  │
//!          ▼                                  ▼
//! ┌──────────────────────┐        ┌──────────────────────────┐
//! │      MemoryBus       │        │  NATS / other brokers    │
//! │  (included)          │        │  (external)              │
//! │  Registry:           │        │  queue groups map to     │
//! │   pattern -> handlers│        │  handler groups          │
//! │   pattern -> group ->│        └──────────────────────────┘
//! │     handlers + cursor│
//! └──────────────────────┘
//! ```
//!
//! ## Broadcast vs handler groups
//!
//! Broadcast subscribers each see every matching event. Handlers in the
//! same group compete: each event goes to one of them, round-robin.
//! Distinct groups are independent, so two groups on the same pattern
//! each get every event once.

mod config;
mod event_bus;
mod memory_bus;
mod registry;

pub use config::{BusConfig, DispatchPolicy};
pub use event_bus::EventBus;
pub use memory_bus::{BusStats, MemoryBus};
