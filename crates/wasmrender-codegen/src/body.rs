//! Function body encoding.
//!
//! ```text
//! body := run_count:leb (count:leb type:u8)* instructions [end:u8 (0xC only)]
//! ```
//!
//! Parameters are part of the signature, so only the locals declared after
//! them are listed. Consecutive locals of one type collapse into a single
//! run; runs are never reordered.

use wasmrender_types::{Function, Local, ValueType};

use crate::error::RenderResult;
use crate::index::IndexSpace;
use crate::instr::{EncodeContext, InstructionEncoder};
use crate::types::OP_END;
use crate::writer::BinaryWriter;

/// A run of consecutive locals sharing one type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalEntry {
    pub ty: ValueType,
    pub count: u32,
}

/// Collapse `locals` into runs of equal adjacent types.
pub fn local_entries(locals: &[Local]) -> Vec<LocalEntry> {
    locals.iter().fold(Vec::new(), |mut entries, local| {
        match entries.last_mut() {
            Some(LocalEntry { ty, count }) if *ty == local.ty => *count += 1,
            _ => entries.push(LocalEntry {
                ty: local.ty,
                count: 1,
            }),
        }
        entries
    })
}

/// Encode the body of one defined function, without its length prefix.
pub fn encode_function_body(
    function: &Function,
    space: &IndexSpace<'_>,
    encoder: &mut dyn InstructionEncoder,
) -> RenderResult<Vec<u8>> {
    let mut code = BinaryWriter::new();

    let entries = local_entries(function.body_locals());
    code.write_len(entries.len())?;
    for entry in &entries {
        code.write_leb(entry.count);
        code.write_type(entry.ty);
    }

    let ctx = EncodeContext {
        version: space.version(),
        function_indexes: space.function_indexes(),
        import_indexes: space.import_indexes(),
        signatures: space.signatures(),
    };
    for part in &function.body {
        encoder.encode(part, &ctx, &mut code)?;
    }
    if space.version().combined_function_space() {
        code.write_byte(OP_END);
    }

    Ok(code.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instr::OpcodeEncoder;
    use crate::types::OP_I32_CONST;
    use crate::version::BinaryVersion;
    use wasmrender_types::{Expr, Module};

    fn local(ty: ValueType) -> Local {
        Local { ty }
    }

    #[test]
    fn test_runs_are_not_merged_across_gaps() {
        use ValueType::*;
        let locals: Vec<_> = [I32, I32, F64, F64, F64, I32].into_iter().map(local).collect();
        assert_eq!(
            local_entries(&locals),
            vec![
                LocalEntry { ty: I32, count: 2 },
                LocalEntry { ty: F64, count: 3 },
                LocalEntry { ty: I32, count: 1 },
            ]
        );
    }

    #[test]
    fn test_no_locals_no_runs() {
        assert!(local_entries(&[]).is_empty());
    }

    fn module_with(function: Function) -> Module {
        let mut module = Module::new();
        module.add_function(function);
        module
    }

    #[test]
    fn test_body_skips_params_and_terminates_under_0xc() {
        let function = Function::new("f")
            .with_param(ValueType::I32)
            .with_param(ValueType::I32)
            .with_local(ValueType::I64)
            .with_local(ValueType::I64)
            .with_body(vec![Expr::I32Const(5)]);
        let module = module_with(function);
        let space = IndexSpace::resolve(&module, BinaryVersion::V0xC).unwrap();
        let body = encode_function_body(
            module.function("f").unwrap(),
            &space,
            &mut OpcodeEncoder,
        )
        .unwrap();
        assert_eq!(body, vec![1, 2, 0x02, OP_I32_CONST, 5, OP_END]);
    }

    #[test]
    fn test_body_without_terminator_under_0xb() {
        let function = Function::new("f")
            .with_param(ValueType::F32)
            .with_body(vec![Expr::Nop]);
        let module = module_with(function);
        let space = IndexSpace::resolve(&module, BinaryVersion::V0xB).unwrap();
        let body = encode_function_body(
            module.function("f").unwrap(),
            &space,
            &mut OpcodeEncoder,
        )
        .unwrap();
        assert_eq!(body, vec![0, crate::types::OP_NOP]);
    }
}
