//! Projector library for the image beaming toolchain.
//!
//! This crate provides the core pieces used by the `projector` binary:
//! - The `commands` module contains CLI subcommands and wiring to execute the
//!   different beaming flows (stdout for piping into a QR renderer, HTTP for
//!   posting straight to a receiver).
//! - The `encoder` module turns an image file into base64 text and splits it
//!   into framed payloads that fit one scan each.
//! - The `frame` module defines the JSON chunk frame the receiving side
//!   reassembles transfers from.
//! - The `error` module defines error types used across the library.
//!
//! The library exposes a small `CommandHandler` trait which CLI types
//! implement to perform their respective operation when invoked by the CLI
//! entrypoint.
//!
//! Design notes:
//! - Ownership is preferred for command handlers: `handle(self)` consumes the
//!   command struct so implementations can move resources (paths, network
//!   clients) without cloning.
//! - Encoding utilities are intentionally kept separate from command
//!   implementations so they can be reused and tested independently.

pub mod commands;
pub mod encoder;
pub mod error;
pub mod frame;

/// A thin abstraction implemented by CLI command structs to execute work.
///
/// Implementors should perform whatever IO/networking or processing the
/// command represents inside `handle`. The method takes ownership of `self`
/// so implementors can move owned fields (file paths, configuration,
/// clients) without requiring extra cloning.
pub trait CommandHandler {
    /// Execute the command, consuming the implementor.
    fn handle(self) -> crate::error::Result<()>;
}
