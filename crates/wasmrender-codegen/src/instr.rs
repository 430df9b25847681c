//! Instruction encoding.
//!
//! Function bodies are handed to an [`InstructionEncoder`] once every index
//! space is final. [`OpcodeEncoder`] is the built-in implementation: it
//! linearizes expression trees in post-order using the pre-MVP opcode table.

use std::collections::HashMap;

use wasmrender_types::{BinaryOp, Expr, ValueType};

use crate::error::{RenderError, RenderResult};
use crate::signatures::SignatureCatalog;
use crate::types::*;
use crate::version::BinaryVersion;
use crate::writer::BinaryWriter;

/// Read-only view of the resolved index spaces for instruction encoding.
#[derive(Debug, Clone, Copy)]
pub struct EncodeContext<'a> {
    pub version: BinaryVersion,
    /// Function name → function index.
    pub function_indexes: &'a HashMap<String, u32>,
    /// Function name → index used when calling an import. Under 0xC this is
    /// the same mapping as `function_indexes`.
    pub import_indexes: &'a HashMap<String, u32>,
    pub signatures: &'a SignatureCatalog,
}

/// Appends the binary encoding of one top-level body expression.
pub trait InstructionEncoder {
    fn encode(
        &mut self,
        expr: &Expr,
        ctx: &EncodeContext<'_>,
        out: &mut BinaryWriter,
    ) -> RenderResult<()>;
}

/// Built-in stack-code encoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpcodeEncoder;

impl InstructionEncoder for OpcodeEncoder {
    fn encode(
        &mut self,
        expr: &Expr,
        ctx: &EncodeContext<'_>,
        out: &mut BinaryWriter,
    ) -> RenderResult<()> {
        emit_expr(expr, ctx, out)
    }
}

fn emit_expr(expr: &Expr, ctx: &EncodeContext<'_>, out: &mut BinaryWriter) -> RenderResult<()> {
    match expr {
        // ── Control ──────────────────────────────────────────────────────
        Expr::Unreachable => out.write_byte(OP_UNREACHABLE),
        Expr::Nop => out.write_byte(OP_NOP),
        Expr::Block(body) => {
            out.write_byte(OP_BLOCK);
            emit_all(body, ctx, out)?;
            out.write_byte(OP_END);
        }
        Expr::Loop(body) => {
            out.write_byte(OP_LOOP);
            emit_all(body, ctx, out)?;
            out.write_byte(OP_END);
        }
        Expr::Conditional {
            condition,
            then_branch,
            else_branch,
        } => {
            emit_expr(condition, ctx, out)?;
            out.write_byte(OP_IF);
            emit_all(then_branch, ctx, out)?;
            if !else_branch.is_empty() {
                out.write_byte(OP_ELSE);
                emit_all(else_branch, ctx, out)?;
            }
            out.write_byte(OP_END);
        }
        Expr::Branch { depth, condition } => match condition {
            Some(condition) => {
                emit_expr(condition, ctx, out)?;
                out.write_byte(OP_BR_IF);
                out.write_leb(*depth);
            }
            None => {
                out.write_byte(OP_BR);
                out.write_leb(*depth);
            }
        },
        Expr::Return(value) => {
            if let Some(value) = value {
                emit_expr(value, ctx, out)?;
            }
            out.write_byte(OP_RETURN);
        }
        Expr::Drop(value) => {
            emit_expr(value, ctx, out)?;
            out.write_byte(OP_DROP);
        }

        // ── Constants and locals ─────────────────────────────────────────
        Expr::I32Const(v) => {
            out.write_byte(OP_I32_CONST);
            out.write_sleb32(*v);
        }
        Expr::I64Const(v) => {
            out.write_byte(OP_I64_CONST);
            out.write_sleb64(*v);
        }
        Expr::F32Const(v) => {
            out.write_byte(OP_F32_CONST);
            out.write_f32(*v);
        }
        Expr::F64Const(v) => {
            out.write_byte(OP_F64_CONST);
            out.write_f64(*v);
        }
        Expr::GetLocal(index) => {
            out.write_byte(OP_GET_LOCAL);
            out.write_leb(*index);
        }
        Expr::SetLocal { index, value } => {
            emit_expr(value, ctx, out)?;
            out.write_byte(OP_SET_LOCAL);
            out.write_leb(*index);
        }

        // ── Memory ───────────────────────────────────────────────────────
        Expr::Load { ty, offset, address } => {
            emit_expr(address, ctx, out)?;
            out.write_byte(load_opcode(*ty));
            out.write_leb(natural_alignment(*ty));
            out.write_leb(*offset);
        }
        Expr::Store {
            ty,
            offset,
            address,
            value,
        } => {
            emit_expr(address, ctx, out)?;
            emit_expr(value, ctx, out)?;
            out.write_byte(store_opcode(*ty));
            out.write_leb(natural_alignment(*ty));
            out.write_leb(*offset);
        }

        // ── Arithmetic ───────────────────────────────────────────────────
        Expr::Binary { op, left, right } => {
            emit_expr(left, ctx, out)?;
            emit_expr(right, ctx, out)?;
            out.write_byte(binary_opcode(*op));
        }

        // ── Calls ────────────────────────────────────────────────────────
        Expr::Call { function, args } => {
            emit_all(args, ctx, out)?;
            emit_call(function, ctx, out)?;
        }
        Expr::CallIndirect {
            signature,
            selector,
            args,
        } => {
            emit_all(args, ctx, out)?;
            emit_expr(selector, ctx, out)?;
            out.write_byte(OP_CALL_INDIRECT);
            out.write_leb(ctx.signatures.index_of(signature)?);
        }
    }
    Ok(())
}

fn emit_all(exprs: &[Expr], ctx: &EncodeContext<'_>, out: &mut BinaryWriter) -> RenderResult<()> {
    for expr in exprs {
        emit_expr(expr, ctx, out)?;
    }
    Ok(())
}

/// 0xB calls imports with a dedicated opcode over the import index space;
/// under 0xC a plain `call` covers both.
fn emit_call(function: &str, ctx: &EncodeContext<'_>, out: &mut BinaryWriter) -> RenderResult<()> {
    if !ctx.version.combined_function_space() {
        if let Some(index) = ctx.import_indexes.get(function) {
            out.write_byte(OP_CALL_IMPORT);
            out.write_leb(*index);
            return Ok(());
        }
    }
    let index = ctx
        .function_indexes
        .get(function)
        .copied()
        .ok_or_else(|| RenderError::UnresolvedFunction(function.to_string()))?;
    out.write_byte(OP_CALL);
    out.write_leb(index);
    Ok(())
}

/// log2 of the access width.
fn natural_alignment(ty: ValueType) -> u32 {
    match ty {
        ValueType::I32 | ValueType::F32 => 2,
        ValueType::I64 | ValueType::F64 => 3,
    }
}

fn load_opcode(ty: ValueType) -> u8 {
    match ty {
        ValueType::I32 => OP_I32_LOAD,
        ValueType::I64 => OP_I64_LOAD,
        ValueType::F32 => OP_F32_LOAD,
        ValueType::F64 => OP_F64_LOAD,
    }
}

fn store_opcode(ty: ValueType) -> u8 {
    match ty {
        ValueType::I32 => OP_I32_STORE,
        ValueType::I64 => OP_I64_STORE,
        ValueType::F32 => OP_F32_STORE,
        ValueType::F64 => OP_F64_STORE,
    }
}

fn binary_opcode(op: BinaryOp) -> u8 {
    match op {
        BinaryOp::I32Add => 0x40,
        BinaryOp::I32Sub => 0x41,
        BinaryOp::I32Mul => 0x42,
        BinaryOp::I32DivS => 0x43,
        BinaryOp::I32And => 0x47,
        BinaryOp::I32Or => 0x48,
        BinaryOp::I32Xor => 0x49,
        BinaryOp::I32Eq => 0x4d,
        BinaryOp::I32Ne => 0x4e,
        BinaryOp::I32LtS => 0x4f,
        BinaryOp::I32GtS => 0x53,
        BinaryOp::I64Add => 0x5b,
        BinaryOp::I64Sub => 0x5c,
        BinaryOp::I64Mul => 0x5d,
        BinaryOp::F32Add => 0x75,
        BinaryOp::F32Sub => 0x76,
        BinaryOp::F32Mul => 0x77,
        BinaryOp::F32Div => 0x78,
        BinaryOp::F64Add => 0x89,
        BinaryOp::F64Sub => 0x8a,
        BinaryOp::F64Mul => 0x8b,
        BinaryOp::F64Div => 0x8c,
    }
}
