//! Router-level tests over in-memory fakes of the store, generator and notifier.

mod common;
mod settings_tests;
