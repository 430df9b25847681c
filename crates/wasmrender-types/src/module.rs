//! The module graph consumed by the binary encoder.
//!
//! A [`Module`] owns its functions in an insertion-ordered map keyed by name.
//! That insertion order is the enumeration order every encoder pass follows,
//! so callers that want reproducible output must build modules in a stable
//! order.

use indexmap::IndexMap;

use crate::expr::Expr;
use crate::ty::ValueType;

// ══════════════════════════════════════════════════════════════════════════════
// Module
// ══════════════════════════════════════════════════════════════════════════════

/// A complete program ready for binary encoding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Module {
    functions: IndexMap<String, Function>,
    /// Functions reachable through indirect calls, by name, in table order.
    pub function_table: Vec<String>,
    /// Linear memory size in pages (both initial and maximum).
    pub memory_size: u32,
    pub segments: Vec<MemorySegment>,
    /// Name of the function run on instantiation.
    pub start_function: Option<String>,
}

impl Module {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a function. A function with the same name is replaced in place,
    /// keeping its original enumeration position.
    pub fn add_function(&mut self, function: Function) {
        self.functions.insert(function.name.clone(), function);
    }

    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    /// All functions in enumeration order.
    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.functions.values()
    }

    /// Append a function to the indirect-call table.
    pub fn add_table_entry(&mut self, name: impl Into<String>) {
        self.function_table.push(name.into());
    }

    pub fn add_segment(&mut self, segment: MemorySegment) {
        self.segments.push(segment);
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Function
// ══════════════════════════════════════════════════════════════════════════════

/// Where an imported function comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDescriptor {
    /// Origin module. Encoded as an empty string when absent.
    pub module: Option<String>,
    pub name: String,
}

/// A declared local variable slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Local {
    pub ty: ValueType,
}

/// A function, either imported (no body) or defined locally.
///
/// The locals list always starts with the parameters, in declaration order.
/// [`Function::add_param`] and [`Function::add_local`] keep that invariant.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    name: String,
    locals: Vec<Local>,
    params: Vec<ValueType>,
    result: Option<ValueType>,
    pub body: Vec<Expr>,
    pub import: Option<ImportDescriptor>,
    pub export_name: Option<String>,
}

impl Function {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locals: Vec::new(),
            params: Vec::new(),
            result: None,
            body: Vec::new(),
            import: None,
            export_name: None,
        }
    }

    /// An imported function declaration.
    pub fn imported(
        name: impl Into<String>,
        module: Option<&str>,
        import_name: impl Into<String>,
    ) -> Self {
        let mut function = Self::new(name);
        function.import = Some(ImportDescriptor {
            module: module.map(str::to_string),
            name: import_name.into(),
        });
        function
    }

    /// Declare a parameter. Parameters must be declared before any
    /// non-parameter local; a parameter declared later is inserted after the
    /// existing parameters.
    pub fn add_param(&mut self, ty: ValueType) -> u32 {
        let index = self.params.len();
        self.params.push(ty);
        self.locals.insert(index, Local { ty });
        index as u32
    }

    /// Declare a non-parameter local. Returns its local index.
    pub fn add_local(&mut self, ty: ValueType) -> u32 {
        self.locals.push(Local { ty });
        (self.locals.len() - 1) as u32
    }

    pub fn with_param(mut self, ty: ValueType) -> Self {
        self.add_param(ty);
        self
    }

    pub fn with_local(mut self, ty: ValueType) -> Self {
        self.add_local(ty);
        self
    }

    pub fn with_result(mut self, ty: ValueType) -> Self {
        self.result = Some(ty);
        self
    }

    pub fn with_body(mut self, body: Vec<Expr>) -> Self {
        self.body = body;
        self
    }

    pub fn with_export(mut self, export_name: impl Into<String>) -> Self {
        self.export_name = Some(export_name.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[ValueType] {
        &self.params
    }

    /// All locals, parameters first.
    pub fn locals(&self) -> &[Local] {
        &self.locals
    }

    /// Locals declared after the parameters.
    pub fn body_locals(&self) -> &[Local] {
        &self.locals[self.params.len()..]
    }

    pub fn result(&self) -> Option<ValueType> {
        self.result
    }

    pub fn is_imported(&self) -> bool {
        self.import.is_some()
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Memory
// ══════════════════════════════════════════════════════════════════════════════

/// Initial contents of a region of linear memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorySegment {
    /// Byte offset into linear memory.
    pub offset: u32,
    pub data: Vec<u8>,
}

impl MemorySegment {
    pub fn new(offset: u32, data: impl Into<Vec<u8>>) -> Self {
        Self {
            offset,
            data: data.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
