//! Lazy resolution of access chains and declared types.
//!
//! Results are memoized per (file, version, expression) in the walker's memo
//! table. The lock is only held for the map access itself, never while
//! resolving, so nested resolution of parent links cannot deadlock.

use rustc_hash::FxHashSet;
use text_size::TextSize;

use super::ids::{ExprRef, SymbolRef};
use super::symbols::{HirSymbol, ImportBinding, SymbolKind};
use super::types::DeclarationType;
use super::walker::Walker;
use crate::base::FileId;
use crate::syntax::IdentPath;

/// What an expression evaluates to, as far as member lookup cares.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExpressionType {
    /// A value of a declared type. `target` is the user-defined type it
    /// names, when the type is neither an array nor a mapping.
    Value {
        ty: DeclarationType,
        target: Option<SymbolRef>,
    },
    /// A name denoting a type, a library or an import namespace.
    Static(SymbolRef),
}

impl ExpressionType {
    pub fn target(&self) -> Option<SymbolRef> {
        match self {
            ExpressionType::Value { target, .. } => *target,
            ExpressionType::Static(symbol) => Some(*symbol),
        }
    }

    pub fn declared(&self) -> Option<&DeclarationType> {
        match self {
            ExpressionType::Value { ty, .. } => Some(ty),
            ExpressionType::Static(_) => None,
        }
    }
}

fn any_kind(_: SymbolKind) -> bool {
    true
}

impl Walker {
    /// The symbol an expression link refers to.
    pub fn reference(&self, expr: ExprRef) -> Option<SymbolRef> {
        let key = self.memo_key(expr.file, expr.id)?;
        let cached = self.memo.lock().references.get(&key).copied();
        if let Some(hit) = cached {
            return hit;
        }
        let value = self.compute_reference(expr);
        self.memo.lock().references.insert(key, value);
        value
    }

    fn compute_reference(&self, expr: ExprRef) -> Option<SymbolRef> {
        let doc = self.document(expr.file)?;
        let link = doc.expression(expr.id)?;
        if link.opaque_base {
            return None;
        }
        let offset = link.range.start();
        match link.parent {
            None => match link.name.as_str() {
                "this" => doc
                    .enclosing_contract(offset)
                    .map(|id| SymbolRef::new(expr.file, id)),
                "super" => {
                    let contract = SymbolRef::new(expr.file, doc.enclosing_contract(offset)?);
                    self.contract_hierarchy(contract).get(1).copied()
                }
                name => self.find_in_scope(name, offset, expr.file),
            },
            Some(parent) => {
                let on = self.expression_type(ExprRef::new(expr.file, parent))?;
                self.member_named(&on, &link.name, expr.file, offset)
            }
        }
    }

    /// The type of an expression link, after its calls and indexing.
    pub fn expression_type(&self, expr: ExprRef) -> Option<ExpressionType> {
        let key = self.memo_key(expr.file, expr.id)?;
        let cached = self.memo.lock().types.get(&key).cloned();
        if let Some(hit) = cached {
            return hit;
        }
        let value = self.compute_expression_type(expr);
        self.memo.lock().types.insert(key, value.clone());
        value
    }

    fn compute_expression_type(&self, expr: ExprRef) -> Option<ExpressionType> {
        let link = self.document(expr.file)?.expression(expr.id)?;
        let reference = self.reference(expr)?;
        if link.is_root() && link.name == "this" {
            let contract = self.symbol(reference)?;
            return Some(ExpressionType::Value {
                ty: DeclarationType::named(contract.name.clone(), contract.name_range),
                target: Some(reference),
            });
        }
        self.type_of_symbol(reference, link.is_call, link.index_count)
    }

    /// Type of `symbol` used as an expression, optionally called and then
    /// indexed `index_count` times.
    pub fn type_of_symbol(&self, symbol: SymbolRef, is_call: bool, index_count: u32) -> Option<ExpressionType> {
        let hir = self.symbol(symbol)?;
        let (mut ty, context) = match hir.kind {
            kind if kind.is_type() => {
                if index_count > 0 {
                    return None;
                }
                if is_call && kind != SymbolKind::Library {
                    return Some(ExpressionType::Value {
                        ty: DeclarationType::named(hir.name.clone(), hir.name_range),
                        target: Some(symbol),
                    });
                }
                return Some(ExpressionType::Static(symbol));
            }
            SymbolKind::Import => {
                return (index_count == 0).then_some(ExpressionType::Static(symbol));
            }
            SymbolKind::EnumMember => {
                let enum_id = hir.container?;
                let enum_symbol = self.document(symbol.file)?.symbol(enum_id)?;
                return Some(ExpressionType::Value {
                    ty: DeclarationType::named(enum_symbol.name.clone(), enum_symbol.name_range),
                    target: Some(SymbolRef::new(symbol.file, enum_id)),
                });
            }
            kind if kind.is_variable() => (hir.declared_type()?.clone(), symbol),
            kind if kind.is_callable() => {
                if !is_call {
                    return None;
                }
                let ret = *hir.as_function()?.returns.first()?;
                let ret_ref = SymbolRef::new(symbol.file, ret);
                (self.symbol(ret_ref)?.declared_type()?.clone(), ret_ref)
            }
            _ => return None,
        };
        for _ in 0..index_count {
            ty = ty.indexed()?;
        }
        Some(self.value_type(ty, context))
    }

    /// Wrap a declared type, resolving its user-defined target from the
    /// scope of the declaring symbol `context`.
    pub fn value_type(&self, ty: DeclarationType, context: SymbolRef) -> ExpressionType {
        let target = if ty.is_scalar() && !ty.elementary {
            self.resolve_declared_type(&ty, context)
        } else {
            None
        };
        ExpressionType::Value { ty, target }
    }

    /// The declaration a user-defined type name refers to.
    pub fn resolve_declared_type(&self, ty: &DeclarationType, context: SymbolRef) -> Option<SymbolRef> {
        if ty.elementary {
            return None;
        }
        let offset = self.symbol(context)?.range.start();
        let file = context.file;
        let Some(parent) = &ty.parent else {
            return self.find_type_in_scope(&ty.name, offset, file);
        };
        let mut segments = parent.split('.');
        let first = segments.next()?;
        let mut current = self.find_type_in_scope(first, offset, file)?;
        for segment in segments.chain(std::iter::once(ty.name.as_str())) {
            current = self.find_member(current, segment, &|k| k.is_type() || k == SymbolKind::Import)?;
        }
        Some(current)
    }

    /// Member `name` of a value or static type; falls back to functions
    /// attached with `using ... for`.
    pub fn member_named(&self, on: &ExpressionType, name: &str, file: FileId, offset: TextSize) -> Option<SymbolRef> {
        let direct = match on {
            ExpressionType::Static(symbol) => self.find_member(*symbol, name, &any_kind),
            ExpressionType::Value { target: Some(target), .. } => {
                let kind = self.symbol(*target)?.kind;
                if kind.is_contract_like() || kind == SymbolKind::Struct {
                    self.find_member(*target, name, &any_kind)
                } else {
                    None
                }
            }
            ExpressionType::Value { target: None, .. } => None,
        };
        direct.or_else(|| {
            let ty = on.declared()?;
            self.using_functions(ty, file, offset)
                .into_iter()
                .find(|f| self.symbol(*f).is_some_and(|s| s.name == name))
        })
    }

    /// Members offered after `expr.` for a value or static type, excluding
    /// builtins.
    pub fn members_of(&self, on: &ExpressionType, file: FileId, offset: TextSize) -> Vec<SymbolRef> {
        let mut members = match on {
            ExpressionType::Static(symbol) => match self.symbol(*symbol).map(|s| s.kind) {
                Some(kind) if kind.is_contract_like() => self.contract_members(*symbol),
                Some(SymbolKind::Enum) => self.direct_members(*symbol),
                Some(SymbolKind::Import) => match self.import_target(*symbol) {
                    Some(target) => self
                        .exported_symbols(target, &mut FxHashSet::default())
                        .into_iter()
                        .filter(|(_, s)| self.symbol(*s).is_some_and(|s| s.kind != SymbolKind::Import))
                        .map(|(_, s)| s)
                        .collect(),
                    None => Vec::new(),
                },
                _ => Vec::new(),
            },
            ExpressionType::Value { target: Some(target), .. } => match self.symbol(*target).map(|s| s.kind) {
                Some(SymbolKind::Struct) => self.direct_members(*target),
                Some(kind) if kind.is_contract_like() => self
                    .contract_members(*target)
                    .into_iter()
                    .filter(|m| {
                        self.symbol(*m).is_some_and(|s| {
                            matches!(s.kind, SymbolKind::Function | SymbolKind::StateVariable | SymbolKind::Constant)
                        })
                    })
                    .collect(),
                _ => Vec::new(),
            },
            ExpressionType::Value { target: None, .. } => Vec::new(),
        };
        if let Some(ty) = on.declared() {
            for function in self.using_functions(ty, file, offset) {
                if !members.contains(&function) {
                    members.push(function);
                }
            }
        }
        members
    }

    fn direct_members(&self, container: SymbolRef) -> Vec<SymbolRef> {
        self.symbol(container)
            .map(|s| {
                s.members()
                    .iter()
                    .map(|&id| SymbolRef::new(container.file, id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Library functions attached to `ty` by `using` directives in force at
    /// `offset`: those of the enclosing contract and its bases, file-level
    /// ones, and `global` ones from any file.
    ///
    /// A library function qualifies when its first parameter has the shape
    /// of `ty`.
    pub fn using_functions(&self, ty: &DeclarationType, file: FileId, offset: TextSize) -> Vec<SymbolRef> {
        let mut directives: Vec<SymbolRef> = Vec::new();
        if let Some(doc) = self.document(file) {
            if let Some(contract) = doc.enclosing_contract(offset) {
                for current in self.contract_hierarchy(SymbolRef::new(file, contract)) {
                    directives.extend(
                        self.direct_members(current)
                            .into_iter()
                            .filter(|m| self.symbol(*m).is_some_and(|s| s.kind == SymbolKind::Using)),
                    );
                }
            }
            directives.extend(doc.usings().map(|id| SymbolRef::new(file, id)));
        }
        for doc in self.documents().filter(|d| d.file() != file) {
            for id in doc.usings() {
                if doc.symbol(id).and_then(HirSymbol::as_using).is_some_and(|u| u.global) {
                    directives.push(SymbolRef::new(doc.file(), id));
                }
            }
        }

        let mut out = Vec::new();
        for directive in directives {
            let Some(using) = self.symbol(directive).and_then(HirSymbol::as_using) else {
                continue;
            };
            if using.for_type.as_ref().is_some_and(|target| !target.matches_using_target(ty)) {
                continue;
            }
            let at = self.symbol(directive).map(|s| s.range.start()).unwrap_or_default();

            let mut candidates = Vec::new();
            if let Some(library) = &using.library {
                if let Some(library) = self.resolve_path(library, directive.file, at) {
                    candidates.extend(self.direct_members(library).into_iter().filter(|m| {
                        self.symbol(*m).is_some_and(|s| s.kind == SymbolKind::Function)
                    }));
                }
            }
            for path in &using.functions {
                candidates.extend(self.resolve_path(path, directive.file, at));
            }

            for candidate in candidates {
                if !out.contains(&candidate) && self.first_param_accepts(candidate, ty) {
                    out.push(candidate);
                }
            }
        }
        out
    }

    fn first_param_accepts(&self, function: SymbolRef, ty: &DeclarationType) -> bool {
        let Some(first) = self
            .symbol(function)
            .and_then(HirSymbol::as_function)
            .and_then(|f| f.params.first().copied())
        else {
            return false;
        };
        self.symbol(SymbolRef::new(function.file, first))
            .and_then(HirSymbol::declared_type)
            .is_some_and(|param| param.matches_using_target(ty))
    }

    /// Resolve a dotted path written at `offset`.
    pub fn resolve_path(&self, path: &IdentPath, file: FileId, offset: TextSize) -> Option<SymbolRef> {
        let (first, rest) = path.segments.split_first()?;
        let mut current = self.find_in_scope(&first.name, offset, file)?;
        for segment in rest {
            current = self.find_member(current, &segment.name, &any_kind)?;
        }
        Some(current)
    }

    /// Every expression link, in any indexed document, that refers to
    /// `target`.
    pub fn references_to(&self, target: SymbolRef) -> Vec<ExprRef> {
        let Some(name) = self.symbol(target).map(|s| s.name.clone()) else {
            return Vec::new();
        };
        // `import {A as B}` makes `B` a spelling of `A`.
        let mut names = vec![name.clone()];
        for doc in self.documents() {
            for id in doc.imports() {
                let Some(ImportBinding::Symbols(symbols)) =
                    doc.symbol(id).and_then(HirSymbol::as_import).map(|i| &i.binding)
                else {
                    continue;
                };
                for (original, alias) in symbols {
                    let Some(alias) = alias else { continue };
                    if *original == name && !names.contains(alias) {
                        names.push(alias.clone());
                    }
                }
            }
        }

        let mut out = Vec::new();
        for doc in self.documents() {
            for (id, expr) in doc.expressions() {
                if !names.contains(&expr.name) {
                    continue;
                }
                let expr = ExprRef::new(doc.file(), id);
                if self.reference(expr) == Some(target) {
                    out.push(expr);
                }
            }
        }
        out
    }
}
