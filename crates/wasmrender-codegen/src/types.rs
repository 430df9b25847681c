//! Binary format constants shared by both supported revisions.
//!
//! ```text
//! offset+0 : u32 (LE)   MAGIC
//! offset+4 : u32 (LE)   revision tag (0xB or 0xC)
//! offset+8 : sections, in the order written by ModuleRenderer::render
//! ```

/// `\0asm`, written as a little-endian u32.
pub const MAGIC: u32 = 0x6d73_6100;

// ── Section ids (revision 0xC framing) ──────────────────────────────────────

pub const SECTION_CUSTOM: u8 = 0;
pub const SECTION_TYPE: u8 = 1;
pub const SECTION_IMPORT: u8 = 2;
pub const SECTION_FUNCTION: u8 = 3;
pub const SECTION_TABLE: u8 = 4;
pub const SECTION_MEMORY: u8 = 5;
pub const SECTION_EXPORT: u8 = 7;
pub const SECTION_START: u8 = 8;
pub const SECTION_ELEMENT: u8 = 9;
pub const SECTION_CODE: u8 = 10;
pub const SECTION_DATA: u8 = 11;

// ── Type and kind tags ──────────────────────────────────────────────────────

/// Leading byte of every type-section entry.
pub const FUNC_FORM: u8 = 0x40;
/// Element type of the indirect-call table.
pub const ANYFUNC: u8 = 0x20;
/// External kind of an imported or exported function.
pub const EXTERNAL_KIND_FUNCTION: u8 = 0;
/// Resizable-limits flag: maximum present.
pub const LIMITS_HAS_MAXIMUM: u8 = 1;

// ── Opcodes ─────────────────────────────────────────────────────────────────
// Pre-MVP numbering, shared by 0xB and 0xC except where noted.

pub const OP_UNREACHABLE: u8 = 0x00;
pub const OP_BLOCK: u8 = 0x01;
pub const OP_LOOP: u8 = 0x02;
pub const OP_IF: u8 = 0x03;
pub const OP_ELSE: u8 = 0x04;
pub const OP_BR: u8 = 0x06;
pub const OP_BR_IF: u8 = 0x07;
pub const OP_RETURN: u8 = 0x09;
pub const OP_NOP: u8 = 0x0a;
pub const OP_DROP: u8 = 0x0b;
pub const OP_END: u8 = 0x0f;
pub const OP_I32_CONST: u8 = 0x10;
pub const OP_I64_CONST: u8 = 0x11;
pub const OP_F64_CONST: u8 = 0x12;
pub const OP_F32_CONST: u8 = 0x13;
pub const OP_GET_LOCAL: u8 = 0x14;
pub const OP_SET_LOCAL: u8 = 0x15;
pub const OP_CALL: u8 = 0x16;
pub const OP_CALL_INDIRECT: u8 = 0x17;
/// 0xB only: imports live in their own index space.
pub const OP_CALL_IMPORT: u8 = 0x18;
pub const OP_I32_LOAD: u8 = 0x2a;
pub const OP_I64_LOAD: u8 = 0x2b;
pub const OP_F32_LOAD: u8 = 0x2c;
pub const OP_F64_LOAD: u8 = 0x2d;
pub const OP_I32_STORE: u8 = 0x33;
pub const OP_I64_STORE: u8 = 0x34;
pub const OP_F32_STORE: u8 = 0x35;
pub const OP_F64_STORE: u8 = 0x36;

// ── Buffering ───────────────────────────────────────────────────────────────

/// Largest slice of a data segment copied into the output per write.
pub const DATA_CHUNK_SIZE: usize = 65536;
