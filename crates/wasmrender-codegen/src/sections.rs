//! Section renderers.
//!
//! Each renderer reads the module and the resolved [`IndexSpace`] and returns
//! the unframed payload of one section, or `None` when the section is omitted
//! for this module. Framing is left to [`BinaryVersion::write_section`].

use wasmrender_types::Module;

use crate::body::encode_function_body;
use crate::error::RenderResult;
use crate::index::IndexSpace;
use crate::instr::InstructionEncoder;
use crate::types::*;
use crate::version::BinaryVersion;
use crate::writer::BinaryWriter;

/// The unframed payload of one section.
#[derive(Debug, Clone)]
pub struct Section {
    pub id: u8,
    pub name: &'static str,
    pub payload: Vec<u8>,
}

impl Section {
    fn new(id: u8, name: &'static str, payload: BinaryWriter) -> Self {
        Self {
            id,
            name,
            payload: payload.into_inner(),
        }
    }
}

// ── Type section ─────────────────────────────────────────────────────────────

pub fn type_section(space: &IndexSpace<'_>) -> RenderResult<Section> {
    let mut section = BinaryWriter::new();
    section.write_len(space.signatures().len())?;
    for signature in space.signatures().iter() {
        section.write_byte(FUNC_FORM);
        section.write_len(signature.params.len())?;
        for param in &signature.params {
            section.write_type(*param);
        }
        match signature.result {
            Some(result) => {
                section.write_byte(1);
                section.write_type(result);
            }
            None => section.write_byte(0),
        }
    }
    Ok(Section::new(SECTION_TYPE, "type", section))
}

// ── Import section ───────────────────────────────────────────────────────────

pub fn import_section(space: &IndexSpace<'_>) -> RenderResult<Option<Section>> {
    let imported = space.imported();
    if imported.is_empty() {
        return Ok(None);
    }

    let mut section = BinaryWriter::new();
    section.write_len(imported.len())?;
    for &(function, import) in imported {
        let signature_index = space.signature_index(function)?;
        if space.version() == BinaryVersion::V0xB {
            section.write_leb(signature_index);
        }
        section.write_ascii_string(import.module.as_deref().unwrap_or(""))?;
        section.write_ascii_string(&import.name)?;
        if space.version() == BinaryVersion::V0xC {
            section.write_byte(EXTERNAL_KIND_FUNCTION);
            section.write_leb(signature_index);
        }
    }
    Ok(Some(Section::new(SECTION_IMPORT, "import", section)))
}

// ── Function section ─────────────────────────────────────────────────────────

pub fn function_section(space: &IndexSpace<'_>) -> RenderResult<Section> {
    let mut section = BinaryWriter::new();
    section.write_len(space.defined().len())?;
    for function in space.defined() {
        section.write_leb(space.signature_index(function)?);
    }
    Ok(Section::new(SECTION_FUNCTION, "function", section))
}

// ── Table section ────────────────────────────────────────────────────────────

/// 0xB lists the table contents here. 0xC only declares an anyfunc table with
/// one slot per table entry; contents go to the element section.
pub fn table_section(module: &Module, space: &IndexSpace<'_>) -> RenderResult<Option<Section>> {
    if module.function_table.is_empty() {
        return Ok(None);
    }

    let mut section = BinaryWriter::new();
    match space.version() {
        BinaryVersion::V0xB => {
            section.write_len(module.function_table.len())?;
            for name in &module.function_table {
                section.write_leb(space.function_index(name)?);
            }
        }
        BinaryVersion::V0xC => {
            section.write_byte(1);
            section.write_byte(ANYFUNC);
            section.write_byte(0);
            section.write_len(module.function_table.len())?;
        }
    }
    Ok(Some(Section::new(SECTION_TABLE, "table", section)))
}

// ── Memory section ───────────────────────────────────────────────────────────

pub fn memory_section(module: &Module, version: BinaryVersion) -> Section {
    let mut section = BinaryWriter::new();
    if version == BinaryVersion::V0xC {
        section.write_byte(1);
        section.write_byte(LIMITS_HAS_MAXIMUM);
    }
    section.write_leb(module.memory_size);
    section.write_leb(module.memory_size);
    if version == BinaryVersion::V0xB {
        section.write_byte(1);
    }
    Section::new(SECTION_MEMORY, "memory", section)
}

// ── Export section ───────────────────────────────────────────────────────────

pub fn export_section(module: &Module, space: &IndexSpace<'_>) -> RenderResult<Option<Section>> {
    let exported: Vec<_> = module
        .functions()
        .filter_map(|f| f.export_name.as_deref().map(|export| (f.name(), export)))
        .collect();
    if exported.is_empty() {
        return Ok(None);
    }

    let mut section = BinaryWriter::new();
    section.write_len(exported.len())?;
    for (name, export_name) in exported {
        let function_index = space.function_index(name)?;
        if space.version() == BinaryVersion::V0xB {
            section.write_leb(function_index);
        }
        section.write_ascii_string(export_name)?;
        if space.version() == BinaryVersion::V0xC {
            section.write_byte(EXTERNAL_KIND_FUNCTION);
            section.write_leb(function_index);
        }
    }
    Ok(Some(Section::new(SECTION_EXPORT, "export", section)))
}

// ── Start section ────────────────────────────────────────────────────────────

pub fn start_section(module: &Module, space: &IndexSpace<'_>) -> RenderResult<Option<Section>> {
    let Some(start) = &module.start_function else {
        return Ok(None);
    };
    let mut section = BinaryWriter::new();
    section.write_leb(space.function_index(start)?);
    Ok(Some(Section::new(SECTION_START, "start", section)))
}

// ── Element section ──────────────────────────────────────────────────────────

/// One table initializer at offset `i32.const 0` covering the whole table.
/// 0xC only.
pub fn element_section(module: &Module, space: &IndexSpace<'_>) -> RenderResult<Option<Section>> {
    if module.function_table.is_empty() || space.version() != BinaryVersion::V0xC {
        return Ok(None);
    }

    let mut section = BinaryWriter::new();
    section.write_leb(1);
    section.write_leb(0);
    section.write_byte(OP_I32_CONST);
    section.write_leb(0);
    section.write_byte(OP_END);

    section.write_len(module.function_table.len())?;
    for name in &module.function_table {
        section.write_leb(space.function_index(name)?);
    }
    Ok(Some(Section::new(SECTION_ELEMENT, "element", section)))
}

// ── Code section ─────────────────────────────────────────────────────────────

pub fn code_section(
    space: &IndexSpace<'_>,
    encoder: &mut dyn InstructionEncoder,
) -> RenderResult<Section> {
    let mut section = BinaryWriter::new();
    section.write_len(space.defined().len())?;
    for function in space.defined() {
        let body = encode_function_body(function, space, encoder)?;
        section.write_len(body.len())?;
        section.write_bytes(&body);
    }
    Ok(Section::new(SECTION_CODE, "code", section))
}

// ── Data section ─────────────────────────────────────────────────────────────

pub fn data_section(module: &Module, version: BinaryVersion) -> RenderResult<Option<Section>> {
    if module.segments.is_empty() {
        return Ok(None);
    }

    let mut section = BinaryWriter::new();
    section.write_len(module.segments.len())?;
    for segment in &module.segments {
        match version {
            BinaryVersion::V0xB => section.write_leb(segment.offset),
            BinaryVersion::V0xC => {
                section.write_byte(0);
                section.write_byte(OP_I32_CONST);
                section.write_leb(segment.offset);
                section.write_byte(OP_END);
            }
        }

        section.write_len(segment.len())?;
        for chunk in segment.data.chunks(DATA_CHUNK_SIZE) {
            section.write_bytes(chunk);
        }
    }
    Ok(Some(Section::new(SECTION_DATA, "data", section)))
}

// ── Name section ─────────────────────────────────────────────────────────────

/// Debug names of the defined functions, each with an empty local-name list.
pub fn name_section(space: &IndexSpace<'_>) -> RenderResult<Section> {
    let mut section = BinaryWriter::new();
    section.write_len(space.defined().len())?;
    for function in space.defined() {
        section.write_ascii_string(function.name())?;
        section.write_leb(0);
    }
    Ok(Section::new(SECTION_CUSTOM, "name", section))
}
