//! Synchronization primitives shared by the automaton and the simulation shell

pub mod mutex;

pub use mutex::Mutex;
