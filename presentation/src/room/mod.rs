//! Interactive voting room

pub mod repl;

pub use repl::RoomRepl;
