//! Access chains: the expression side of the semantic model.
//!
//! Every identifier use in a body or type position becomes one link. Dotted
//! accesses are chained, so `a.b().c` is three links where `c.parent` is `b`
//! and `b.parent` is `a`. What a link refers to is computed lazily by the
//! [`Walker`](super::Walker).

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use super::ids::{ExprId, SymbolId};
use crate::syntax::visit::{self, Visitor};
use crate::syntax::{Expr, ExprKind, IdentPath, TypeName, TypeNameKind};

/// One segment of an access chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedExpression {
    pub name: SmolStr,
    /// Span of the identifier.
    pub range: TextRange,
    /// The link this one is accessed on (`a` for `a.b`).
    pub parent: Option<ExprId>,
    /// The link accessed on this one (`b` for `a.b`).
    pub child: Option<ExprId>,
    /// The link is called: `a()`.
    pub is_call: bool,
    /// Number of `[...]` applied directly to the link.
    pub index_count: u32,
    /// Accessed on something that is not a chain (`(a + b).c`, `address(x).c`),
    /// so it cannot be resolved.
    pub opaque_base: bool,
    /// Innermost enclosing declaration.
    pub container: Option<SymbolId>,
}

impl ParsedExpression {
    pub fn contains(&self, offset: TextSize) -> bool {
        self.range.start() <= offset && offset <= self.range.end()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none() && !self.opaque_base
    }
}

/// Lowers expressions and type names into chain links.
pub(crate) struct ExpressionLowering<'a> {
    exprs: &'a mut Vec<ParsedExpression>,
    container: Option<SymbolId>,
}

impl<'a> ExpressionLowering<'a> {
    pub(crate) fn new(exprs: &'a mut Vec<ParsedExpression>, container: Option<SymbolId>) -> Self {
        Self { exprs, container }
    }

    fn push(&mut self, name: &SmolStr, range: TextRange, parent: Option<ExprId>) -> ExprId {
        let id = ExprId(self.exprs.len() as u32);
        self.exprs.push(ParsedExpression {
            name: name.clone(),
            range,
            parent,
            child: None,
            is_call: false,
            index_count: 0,
            opaque_base: false,
            container: self.container,
        });
        if let Some(parent) = parent {
            self.exprs[parent.index()].child = Some(id);
        }
        id
    }

    /// Lower a dotted path (`Lib.Point`, `Base`, `onlyOwner`).
    pub(crate) fn lower_path(&mut self, path: &IdentPath) -> Option<ExprId> {
        let mut last = None;
        for segment in &path.segments {
            last = Some(self.push(&segment.name, segment.range, last));
        }
        last
    }

    /// Lower `expr` and return the last link of its chain, if it has one.
    fn lower_chain(&mut self, expr: &Expr) -> Option<ExprId> {
        match &expr.kind {
            ExprKind::Ident(ident) => Some(self.push(&ident.name, ident.range, None)),
            ExprKind::Member { base, member } => {
                let parent = self.lower_chain(base);
                let id = self.push(&member.name, member.range, parent);
                if parent.is_none() {
                    self.exprs[id.index()].opaque_base = true;
                }
                Some(id)
            }
            ExprKind::Call { callee, args } => {
                let id = self.lower_chain(callee);
                if let Some(id) = id {
                    self.exprs[id.index()].is_call = true;
                }
                for arg in args.exprs() {
                    self.visit_expr(arg);
                }
                id
            }
            ExprKind::CallOptions { callee, options } => {
                let id = self.lower_chain(callee);
                for option in options {
                    self.visit_expr(&option.value);
                }
                id
            }
            ExprKind::Index { base, index } => {
                let id = self.lower_chain(base);
                if let Some(id) = id {
                    self.exprs[id.index()].index_count += 1;
                }
                if let Some(index) = index {
                    self.visit_expr(index);
                }
                id
            }
            ExprKind::Slice { base, start, end } => {
                let id = self.lower_chain(base);
                for part in [start, end].into_iter().flatten() {
                    self.visit_expr(part);
                }
                id
            }
            ExprKind::Tuple(items) if items.len() == 1 => match &items[0] {
                Some(inner) => self.lower_chain(inner),
                None => None,
            },
            ExprKind::New(ty) => match &ty.kind {
                TypeNameKind::UserDefined(path) => self.lower_path(path),
                _ => {
                    self.visit_type_name(ty);
                    None
                }
            },
            _ => {
                visit::walk_expr(self, expr);
                None
            }
        }
    }
}

impl Visitor for ExpressionLowering<'_> {
    fn visit_expr(&mut self, expr: &Expr) {
        self.lower_chain(expr);
    }

    fn visit_type_name(&mut self, ty: &TypeName) {
        if let TypeNameKind::UserDefined(path) = &ty.kind {
            self.lower_path(path);
        }
        visit::walk_type_name(self, ty);
    }
}
