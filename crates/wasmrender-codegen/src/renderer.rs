//! Module renderer: header plus sections in their fixed order.
//!
//! Rendering is two-phase. [`IndexSpace::resolve`] discovers signatures and
//! numbers every function; only then are sections emitted, each reading the
//! finished tables:
//!
//! ```text
//! magic · version · type · import · function · table · memory · export ·
//! start · element · code · data · name
//! ```

use log::debug;
use wasmrender_types::Module;

use crate::error::RenderResult;
use crate::index::IndexSpace;
use crate::instr::{InstructionEncoder, OpcodeEncoder};
use crate::options::RenderOptions;
use crate::sections::{self, Section};
use crate::types::MAGIC;
use crate::version::BinaryVersion;
use crate::writer::BinaryWriter;

/// Render `module` as a binary module of revision `version`, encoding bodies
/// with the built-in [`OpcodeEncoder`].
pub fn render(module: &Module, version: BinaryVersion) -> RenderResult<Vec<u8>> {
    ModuleRenderer::new(RenderOptions::new(version)).render(module)
}

/// Renders modules with fixed options and instruction encoder.
pub struct ModuleRenderer<E = OpcodeEncoder> {
    options: RenderOptions,
    encoder: E,
}

impl ModuleRenderer<OpcodeEncoder> {
    pub fn new(options: RenderOptions) -> Self {
        Self::with_encoder(options, OpcodeEncoder)
    }
}

impl<E: InstructionEncoder> ModuleRenderer<E> {
    pub fn with_encoder(options: RenderOptions, encoder: E) -> Self {
        Self { options, encoder }
    }

    /// Produce the complete binary. Either every byte is produced or an error
    /// is returned.
    pub fn render(&mut self, module: &Module) -> RenderResult<Vec<u8>> {
        let version = self.options.version;
        let space = IndexSpace::resolve(module, version)?;

        let mut output = BinaryWriter::new();
        output.write_u32(MAGIC);
        output.write_u32(version.tag());

        let sections = [
            Some(sections::type_section(&space)?),
            sections::import_section(&space)?,
            Some(sections::function_section(&space)?),
            sections::table_section(module, &space)?,
            Some(sections::memory_section(module, version)),
            sections::export_section(module, &space)?,
            sections::start_section(module, &space)?,
            sections::element_section(module, &space)?,
            Some(sections::code_section(&space, &mut self.encoder)?),
            sections::data_section(module, version)?,
            if self.options.name_section {
                Some(sections::name_section(&space)?)
            } else {
                None
            },
        ];

        for section in sections.iter().flatten() {
            write_section(&mut output, version, section)?;
        }

        debug!("rendered module: {} bytes", output.len());
        Ok(output.into_inner())
    }
}

fn write_section(
    output: &mut BinaryWriter,
    version: BinaryVersion,
    section: &Section,
) -> RenderResult<()> {
    debug!(
        "{} section: {} bytes",
        section.name,
        section.payload.len()
    );
    version.write_section(output, section.id, section.name, &section.payload)
}
