//! Expression trees for function bodies.
//!
//! Bodies are sequences of [`Expr`] nodes. Operands are nested rather than
//! pushed on an explicit stack, so every node knows its own children; the
//! encoder linearizes them in post-order.

use crate::ty::{Signature, ValueType};

/// Binary operators over numeric operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    I32Add,
    I32Sub,
    I32Mul,
    I32DivS,
    I32And,
    I32Or,
    I32Xor,
    I32Eq,
    I32Ne,
    I32LtS,
    I32GtS,
    I64Add,
    I64Sub,
    I64Mul,
    F32Add,
    F32Sub,
    F32Mul,
    F32Div,
    F64Add,
    F64Sub,
    F64Mul,
    F64Div,
}

/// One node of a function body.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Unreachable,
    Nop,
    Block(Vec<Expr>),
    Loop(Vec<Expr>),
    Conditional {
        condition: Box<Expr>,
        then_branch: Vec<Expr>,
        else_branch: Vec<Expr>,
    },
    /// `br` to the enclosing block `depth` levels up; conditional when
    /// `condition` is present.
    Branch {
        depth: u32,
        condition: Option<Box<Expr>>,
    },
    Return(Option<Box<Expr>>),
    Drop(Box<Expr>),
    I32Const(i32),
    I64Const(i64),
    F32Const(f32),
    F64Const(f64),
    GetLocal(u32),
    SetLocal {
        index: u32,
        value: Box<Expr>,
    },
    Load {
        ty: ValueType,
        offset: u32,
        address: Box<Expr>,
    },
    Store {
        ty: ValueType,
        offset: u32,
        address: Box<Expr>,
        value: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Direct call to a function of the module, by name.
    Call {
        function: String,
        args: Vec<Expr>,
    },
    /// Call through the indirect-call table. The callee is known only by its
    /// signature.
    CallIndirect {
        signature: Signature,
        selector: Box<Expr>,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn call(function: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Call {
            function: function.into(),
            args,
        }
    }

    pub fn call_indirect(signature: Signature, selector: Expr, args: Vec<Expr>) -> Self {
        Self::CallIndirect {
            signature,
            selector: Box::new(selector),
            args,
        }
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Self::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn set_local(index: u32, value: Expr) -> Self {
        Self::SetLocal {
            index,
            value: Box::new(value),
        }
    }

    /// Direct children in evaluation order.
    ///
    /// For calls the arguments come before the indirect selector, matching
    /// the order the operands are pushed.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Self::Unreachable
            | Self::Nop
            | Self::I32Const(_)
            | Self::I64Const(_)
            | Self::F32Const(_)
            | Self::F64Const(_)
            | Self::GetLocal(_) => Vec::new(),
            Self::Block(body) | Self::Loop(body) => body.iter().collect(),
            Self::Conditional {
                condition,
                then_branch,
                else_branch,
            } => std::iter::once(condition.as_ref())
                .chain(then_branch)
                .chain(else_branch)
                .collect(),
            Self::Branch { condition, .. } => condition.iter().map(Box::as_ref).collect(),
            Self::Return(value) => value.iter().map(Box::as_ref).collect(),
            Self::Drop(value) => vec![value.as_ref()],
            Self::SetLocal { value, .. } => vec![value.as_ref()],
            Self::Load { address, .. } => vec![address.as_ref()],
            Self::Store { address, value, .. } => vec![address.as_ref(), value.as_ref()],
            Self::Binary { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            Self::Call { args, .. } => args.iter().collect(),
            Self::CallIndirect { selector, args, .. } => {
                args.iter().chain(std::iter::once(selector.as_ref())).collect()
            }
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Visitor
// ══════════════════════════════════════════════════════════════════════════════

/// A read-only pass over expression trees.
///
/// The default [`ExprVisitor::visit_expr`] descends into every child, so an
/// implementation only overrides what it is interested in and calls
/// [`walk_expr`] to keep descending.
pub trait ExprVisitor {
    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }
}

/// Visit the children of `expr`, depth-first, in evaluation order.
pub fn walk_expr<V: ExprVisitor + ?Sized>(visitor: &mut V, expr: &Expr) {
    for child in expr.children() {
        visitor.visit_expr(child);
    }
}
