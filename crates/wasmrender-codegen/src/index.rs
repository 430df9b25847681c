//! Index space resolution.
//!
//! Resolution runs once, before any section is written, and produces
//! read-only tables: signature indices, import indices and function indices.
//! Section renderers and the instruction encoder only ever read them.
//!
//! | | imports | defined functions |
//! |---|---|---|
//! | 0xB | own counter from 0 (`import_index`) | own counter from 0 (`function_index`) |
//! | 0xC | `function_index` from 0 | `function_index` continuing after imports |

use std::collections::HashMap;

use log::debug;
use wasmrender_types::{Function, ImportDescriptor, Module, Signature};

use crate::error::{to_u32, RenderError, RenderResult};
use crate::signatures::{collect_signatures, SignatureCatalog};
use crate::version::BinaryVersion;

/// Resolved numbering for one render pass.
#[derive(Debug)]
pub struct IndexSpace<'m> {
    version: BinaryVersion,
    signatures: SignatureCatalog,
    imported: Vec<(&'m Function, &'m ImportDescriptor)>,
    defined: Vec<&'m Function>,
    import_indexes: HashMap<String, u32>,
    function_indexes: HashMap<String, u32>,
}

impl<'m> IndexSpace<'m> {
    /// Discover signatures and number every function of `module`.
    pub fn resolve(module: &'m Module, version: BinaryVersion) -> RenderResult<Self> {
        let signatures = collect_signatures(module)?;

        let mut imported = Vec::new();
        let mut defined = Vec::new();
        for function in module.functions() {
            match &function.import {
                Some(import) => imported.push((function, import)),
                None => defined.push(function),
            }
        }

        let mut import_indexes = HashMap::new();
        let mut function_indexes = HashMap::new();
        for (index, (function, _)) in imported.iter().enumerate() {
            let target = if version.combined_function_space() {
                &mut function_indexes
            } else {
                &mut import_indexes
            };
            target.insert(function.name().to_string(), to_u32("import index", index)?);
        }
        for function in &defined {
            let index = to_u32("function index", function_indexes.len())?;
            function_indexes.insert(function.name().to_string(), index);
        }

        debug!(
            "resolved {} signatures, {} imports, {} defined functions for version {:#x}",
            signatures.len(),
            imported.len(),
            defined.len(),
            version.tag()
        );

        Ok(Self {
            version,
            signatures,
            imported,
            defined,
            import_indexes,
            function_indexes,
        })
    }

    pub fn version(&self) -> BinaryVersion {
        self.version
    }

    pub fn signatures(&self) -> &SignatureCatalog {
        &self.signatures
    }

    /// Imported functions with their import descriptors, in enumeration order.
    pub fn imported(&self) -> &[(&'m Function, &'m ImportDescriptor)] {
        &self.imported
    }

    /// Locally defined functions in enumeration order.
    pub fn defined(&self) -> &[&'m Function] {
        &self.defined
    }

    /// Index of the function named `name` in the function index space.
    pub fn function_index(&self, name: &str) -> RenderResult<u32> {
        self.function_indexes
            .get(name)
            .copied()
            .ok_or_else(|| RenderError::UnresolvedFunction(name.to_string()))
    }

    /// Index of an imported function as seen by call instructions.
    pub fn import_index(&self, name: &str) -> RenderResult<u32> {
        self.import_indexes()
            .get(name)
            .copied()
            .ok_or_else(|| RenderError::UnresolvedFunction(name.to_string()))
    }

    /// Index of the declared signature of `function`.
    pub fn signature_index(&self, function: &Function) -> RenderResult<u32> {
        self.signatures.index_of(&Signature::of(function))
    }

    /// The function index mapping.
    pub fn function_indexes(&self) -> &HashMap<String, u32> {
        &self.function_indexes
    }

    /// The mapping call instructions use for imported functions: the separate
    /// import space under 0xB, the combined function space under 0xC.
    pub fn import_indexes(&self) -> &HashMap<String, u32> {
        if self.version.combined_function_space() {
            &self.function_indexes
        } else {
            &self.import_indexes
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasmrender_types::ValueType;

    fn sample_module() -> Module {
        let mut module = Module::new();
        module.add_function(Function::new("first"));
        module.add_function(Function::imported("print", Some("env"), "print").with_param(ValueType::I32));
        module.add_function(Function::new("second").with_result(ValueType::I32));
        module.add_function(Function::imported("abort", None, "abort"));
        module
    }

    #[test]
    fn test_separate_spaces_for_0xb() {
        let module = sample_module();
        let space = IndexSpace::resolve(&module, BinaryVersion::V0xB).unwrap();
        assert_eq!(space.import_index("print").unwrap(), 0);
        assert_eq!(space.import_index("abort").unwrap(), 1);
        assert_eq!(space.function_index("first").unwrap(), 0);
        assert_eq!(space.function_index("second").unwrap(), 1);
        assert!(space.function_index("print").is_err());
        assert_eq!(space.function_indexes().len(), 2);
    }

    #[test]
    fn test_combined_space_for_0xc() {
        let module = sample_module();
        let space = IndexSpace::resolve(&module, BinaryVersion::V0xC).unwrap();
        assert_eq!(space.function_index("print").unwrap(), 0);
        assert_eq!(space.function_index("abort").unwrap(), 1);
        assert_eq!(space.function_index("first").unwrap(), 2);
        assert_eq!(space.function_index("second").unwrap(), 3);
        assert_eq!(space.import_index("abort").unwrap(), 1);
        assert_eq!(space.function_indexes().len(), 4);
    }

    #[test]
    fn test_partition_keeps_enumeration_order() {
        let module = sample_module();
        let space = IndexSpace::resolve(&module, BinaryVersion::V0xC).unwrap();
        let imported: Vec<_> = space.imported().iter().map(|(f, _)| f.name()).collect();
        let defined: Vec<_> = space.defined().iter().map(|f| f.name()).collect();
        assert_eq!(imported, vec!["print", "abort"]);
        assert_eq!(defined, vec!["first", "second"]);
    }

    #[test]
    fn test_imports_carry_their_descriptor() {
        let module = sample_module();
        let space = IndexSpace::resolve(&module, BinaryVersion::V0xB).unwrap();
        let origins: Vec<_> = space
            .imported()
            .iter()
            .map(|(_, import)| (import.module.as_deref(), import.name.as_str()))
            .collect();
        assert_eq!(origins, vec![(Some("env"), "print"), (None, "abort")]);
    }

    #[test]
    fn test_dangling_name_fails() {
        let module = sample_module();
        let space = IndexSpace::resolve(&module, BinaryVersion::V0xC).unwrap();
        let err = space.function_index("missing").unwrap_err();
        assert!(matches!(err, RenderError::UnresolvedFunction(ref name) if name == "missing"));
    }
}
