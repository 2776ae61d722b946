//! MemoryBus integration tests.

mod support;
mod matching;
mod broadcast;
mod validation;
