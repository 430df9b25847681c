//! wasmrender binary encoder: serializes a resolved module graph into a
//! binary module.
//!
//! # Architecture
//!
//! Two revisions of the binary format are supported, 0xB and 0xC (see
//! [`BinaryVersion`]). They share section contents but differ in section
//! framing and in how function indices are numbered.
//!
//! Rendering runs in two phases:
//!
//! 1. **Resolution** ([`IndexSpace::resolve`]): every function signature and
//!    every signature used by an indirect call is registered in a
//!    [`SignatureCatalog`]; imports and defined functions receive indices.
//! 2. **Emission** ([`ModuleRenderer`]): the header and each section are
//!    written from the finished tables. Function bodies are delegated to an
//!    [`InstructionEncoder`].
//!
//! ```
//! use wasmrender_codegen::{render, BinaryVersion};
//! use wasmrender_types::{Expr, Function, Module, ValueType};
//!
//! let mut module = Module::new();
//! module.add_function(
//!     Function::new("answer")
//!         .with_result(ValueType::I32)
//!         .with_body(vec![Expr::I32Const(42)])
//!         .with_export("answer"),
//! );
//! let bytes = render(&module, BinaryVersion::V0xC).unwrap();
//! assert_eq!(&bytes[..8], &[0x00, 0x61, 0x73, 0x6d, 0x0c, 0, 0, 0]);
//! ```

pub mod body;
pub mod error;
pub mod index;
pub mod instr;
pub mod options;
pub mod renderer;
pub mod sections;
pub mod signatures;
pub mod types;
pub mod version;
pub mod writer;

pub use error::{RenderError, RenderResult};
pub use index::IndexSpace;
pub use instr::{EncodeContext, InstructionEncoder, OpcodeEncoder};
pub use options::RenderOptions;
pub use renderer::{render, ModuleRenderer};
pub use signatures::SignatureCatalog;
pub use version::BinaryVersion;
pub use writer::BinaryWriter;
