//! Signature discovery and numbering.
//!
//! Every signature the binary refers to needs a type-section entry. Most are
//! declared by functions themselves, but indirect call sites name only a
//! signature, so bodies have to be walked to find them all.

use indexmap::IndexSet;
use log::trace;
use wasmrender_types::{walk_expr, Expr, ExprVisitor, Module, Signature};

use crate::error::{to_u32, RenderError, RenderResult};

// ══════════════════════════════════════════════════════════════════════════════
// Catalog
// ══════════════════════════════════════════════════════════════════════════════

/// Deduplicated signatures, numbered in first-registration order.
#[derive(Debug, Clone, Default)]
pub struct SignatureCatalog {
    signatures: IndexSet<Signature>,
}

impl SignatureCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of `signature`, appending it if it has not been seen.
    pub fn register(&mut self, signature: Signature) -> RenderResult<u32> {
        let (index, inserted) = self.signatures.insert_full(signature);
        if inserted {
            trace!("registered signature #{index}: {}", self.signatures[index]);
        }
        to_u32("signature index", index)
    }

    /// Index of an already registered signature.
    pub fn index_of(&self, signature: &Signature) -> RenderResult<u32> {
        let index = self
            .signatures
            .get_index_of(signature)
            .ok_or_else(|| RenderError::UnregisteredSignature(signature.clone()))?;
        to_u32("signature index", index)
    }

    /// Signatures in type-section order.
    pub fn iter(&self) -> impl Iterator<Item = &Signature> {
        self.signatures.iter()
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Collector
// ══════════════════════════════════════════════════════════════════════════════

/// Registers the callee signature of every indirect call it visits.
///
/// Operands are visited before the call itself, so a signature nested in an
/// argument is numbered ahead of the enclosing call's. The first failed
/// registration stops collection and is reported by [`finish`].
///
/// [`finish`]: SignatureCollector::finish
pub struct SignatureCollector<'a> {
    catalog: &'a mut SignatureCatalog,
    error: Option<RenderError>,
}

impl<'a> SignatureCollector<'a> {
    pub fn new(catalog: &'a mut SignatureCatalog) -> Self {
        Self {
            catalog,
            error: None,
        }
    }

    pub fn finish(self) -> RenderResult<()> {
        self.error.map_or(Ok(()), Err)
    }
}

impl ExprVisitor for SignatureCollector<'_> {
    fn visit_expr(&mut self, expr: &Expr) {
        if self.error.is_some() {
            return;
        }
        walk_expr(self, expr);
        if let Expr::CallIndirect { signature, .. } = expr {
            if let Err(err) = self.catalog.register(signature.clone()) {
                self.error.get_or_insert(err);
            }
        }
    }
}

/// Build the catalog for `module`.
///
/// For each function in enumeration order: its own signature first, then the
/// indirect-call signatures found in its body.
pub fn collect_signatures(module: &Module) -> RenderResult<SignatureCatalog> {
    let mut catalog = SignatureCatalog::new();
    for function in module.functions() {
        catalog.register(Signature::of(function))?;
        let mut collector = SignatureCollector::new(&mut catalog);
        for part in &function.body {
            collector.visit_expr(part);
        }
        collector.finish()?;
    }
    Ok(catalog)
}
