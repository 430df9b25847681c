//! Shared types for the wasmrender backend.
//!
//! This crate defines the in-memory module graph handed to the binary
//! encoder: functions, locals, memory segments, value types, signatures and
//! the expression trees that make up function bodies. Everything here is
//! read-only from the encoder's point of view.

pub mod expr;
mod module;
mod ty;

pub use expr::{walk_expr, BinaryOp, Expr, ExprVisitor};
pub use module::{Function, ImportDescriptor, Local, MemorySegment, Module};
pub use ty::{Signature, ValueType};
