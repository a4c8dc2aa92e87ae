//! Scoped name lookup.
//!
//! Search order for a bare name, first match wins:
//!
//! 1. locals of the enclosing function visible at the offset, innermost first
//! 2. parameters and named returns of the enclosing function
//! 3. members of the enclosing contract, then of each base in declaration order
//! 4. file-level declarations, including import aliases
//! 5. file-level declarations of imported files, transitively
//! 6. contracts, structs and enums of any indexed file

use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use text_size::TextSize;

use super::ids::{SymbolId, SymbolRef};
use super::symbols::{HirSymbol, ImportBinding, SymbolData, SymbolKind};
use super::walker::Walker;
use crate::base::FileId;
use crate::syntax::IdentPath;

/// Filter applied to candidate symbols during lookup.
pub type KindFilter<'a> = &'a dyn Fn(SymbolKind) -> bool;

fn any_kind(_: SymbolKind) -> bool {
    true
}

fn type_or_namespace(kind: SymbolKind) -> bool {
    kind.is_type() || kind == SymbolKind::Import
}

impl Walker {
    /// Resolve `name` as written at `offset` in `file`.
    pub fn find_in_scope(&self, name: &str, offset: TextSize, file: FileId) -> Option<SymbolRef> {
        self.find_in_scope_where(name, offset, file, &any_kind)
    }

    /// Like [`Self::find_in_scope`], skipping everything that cannot name a type.
    pub fn find_type_in_scope(&self, name: &str, offset: TextSize, file: FileId) -> Option<SymbolRef> {
        self.find_in_scope_where(name, offset, file, &type_or_namespace)
    }

    pub fn find_in_scope_where(
        &self,
        name: &str,
        offset: TextSize,
        file: FileId,
        filter: KindFilter<'_>,
    ) -> Option<SymbolRef> {
        if name.is_empty() {
            return None;
        }
        let doc = self.document(file)?;
        let found = doc
            .enclosing_function(offset)
            .and_then(|function| self.find_in_function(file, function, name, offset, filter))
            .or_else(|| {
                let contract = doc.enclosing_contract(offset)?;
                self.find_member(SymbolRef::new(file, contract), name, filter)
            })
            .or_else(|| self.find_in_file_scope(file, name, filter));
        tracing::trace!(%name, ?offset, ?found, "scoped lookup");
        found
    }

    fn find_in_function(
        &self,
        file: FileId,
        function: SymbolId,
        name: &str,
        offset: TextSize,
        filter: KindFilter<'_>,
    ) -> Option<SymbolRef> {
        let doc = self.document(file)?;
        let data = doc.symbol(function)?.as_function()?;
        let matches = |id: &SymbolId| {
            doc.symbol(*id)
                .is_some_and(|s| s.name == name && filter(s.kind))
        };

        let local = data
            .locals
            .iter()
            .filter(|id| matches(id))
            .filter_map(|&id| {
                let scope = local_scope(doc.symbol(id)?)?;
                (scope.start() <= offset && offset <= scope.end()).then_some((id, scope.len()))
            })
            .min_by_key(|(_, len)| *len)
            .map(|(id, _)| id);

        local
            .or_else(|| data.params.iter().chain(&data.returns).copied().find(|id| matches(id)))
            .map(|id| SymbolRef::new(file, id))
    }

    /// Steps 4 to 6: what a name means outside any contract.
    pub fn find_in_file_scope(&self, file: FileId, name: &str, filter: KindFilter<'_>) -> Option<SymbolRef> {
        let mut visited = FxHashSet::default();
        self.find_exported(file, name, filter, &mut visited)
            .or_else(|| self.find_global_type(name, filter))
    }

    /// Top-level declaration of `file` or of anything it imports.
    fn find_exported(
        &self,
        file: FileId,
        name: &str,
        filter: KindFilter<'_>,
        visited: &mut FxHashSet<FileId>,
    ) -> Option<SymbolRef> {
        if !visited.insert(file) {
            return None;
        }
        let doc = self.document(file)?;
        let local = doc.top_level().iter().copied().find(|&id| {
            doc.symbol(id).is_some_and(|s| {
                s.name == name && s.kind != SymbolKind::Using && filter(s.kind)
            })
        });
        if let Some(id) = local {
            return Some(SymbolRef::new(file, id));
        }

        for import in doc.imports() {
            let Some(binding) = doc.symbol(import).and_then(HirSymbol::as_import).map(|i| &i.binding) else {
                continue;
            };
            let Some(target) = self.import_target(SymbolRef::new(file, import)) else {
                continue;
            };
            let found = match binding {
                ImportBinding::All => self.find_exported(target, name, filter, visited),
                ImportBinding::Symbols(_) => binding
                    .original_name(name)
                    .and_then(|original| self.find_exported(target, original, filter, visited)),
                ImportBinding::Namespace(_) => None,
            };
            if found.is_some() {
                return found;
            }
        }
        None
    }

    fn find_global_type(&self, name: &str, filter: KindFilter<'_>) -> Option<SymbolRef> {
        self.documents().find_map(|doc| {
            doc.top_level().iter().copied().find_map(|id| {
                let symbol = doc.symbol(id)?;
                let global = symbol.kind.is_contract_like()
                    || matches!(symbol.kind, SymbolKind::Struct | SymbolKind::Enum);
                (global && symbol.name == name && filter(symbol.kind)).then(|| SymbolRef::new(doc.file(), id))
            })
        })
    }

    /// Member `name` of a contract (bases included), struct, enum or import
    /// namespace.
    pub fn find_member(&self, container: SymbolRef, name: &str, filter: KindFilter<'_>) -> Option<SymbolRef> {
        let symbol = self.symbol(container)?;
        match symbol.kind {
            kind if kind.is_contract_like() => self.contract_hierarchy(container).into_iter().find_map(|contract| {
                let doc = self.document(contract.file)?;
                doc.symbol(contract.id)?.members().iter().copied().find_map(|id| {
                    let member = doc.symbol(id)?;
                    (member.name == name && member.kind != SymbolKind::Using && filter(member.kind))
                        .then(|| SymbolRef::new(contract.file, id))
                })
            }),
            SymbolKind::Struct | SymbolKind::Enum => {
                let doc = self.document(container.file)?;
                symbol.members().iter().copied().find_map(|id| {
                    let member = doc.symbol(id)?;
                    (member.name == name && filter(member.kind)).then(|| SymbolRef::new(container.file, id))
                })
            }
            SymbolKind::Import => {
                let target = self.import_target(container)?;
                self.find_exported(target, name, filter, &mut FxHashSet::default())
            }
            _ => None,
        }
    }

    /// `contract` followed by its bases, depth first in declaration order.
    /// Each contract appears once, so cyclic hierarchies terminate.
    pub fn contract_hierarchy(&self, contract: SymbolRef) -> Vec<SymbolRef> {
        let mut order = Vec::new();
        let mut visited = FxHashSet::default();
        self.collect_hierarchy(contract, &mut order, &mut visited);
        order
    }

    fn collect_hierarchy(&self, contract: SymbolRef, order: &mut Vec<SymbolRef>, visited: &mut FxHashSet<SymbolRef>) {
        if !visited.insert(contract) {
            return;
        }
        order.push(contract);
        let Some(data) = self.symbol(contract).and_then(HirSymbol::as_contract) else {
            return;
        };
        for base in &data.bases {
            if let Some(base) = self.resolve_base(contract.file, base) {
                self.collect_hierarchy(base, order, visited);
            }
        }
    }

    /// Resolve an inheritance path. Only file scope is searched, so base
    /// resolution never re-enters contract member lookup.
    pub fn resolve_base(&self, file: FileId, path: &IdentPath) -> Option<SymbolRef> {
        let (first, rest) = path.segments.split_first()?;
        let mut current = self.find_in_file_scope(file, &first.name, &type_or_namespace)?;
        for segment in rest {
            current = self.find_member(current, &segment.name, &type_or_namespace)?;
        }
        self.symbol(current)
            .is_some_and(|s| s.kind.is_contract_like())
            .then_some(current)
    }

    /// Every name visible at `offset`, in lookup order, first binding of
    /// each name only. Import aliases are reported under their local name.
    pub fn visible_symbols(&self, offset: TextSize, file: FileId) -> Vec<(SmolStr, SymbolRef)> {
        let mut seen: FxHashSet<SmolStr> = FxHashSet::default();
        let mut out = Vec::new();
        let mut add = |name: &SmolStr, symbol: SymbolRef| {
            if !name.is_empty() && seen.insert(name.clone()) {
                out.push((name.clone(), symbol));
            }
        };
        let Some(doc) = self.document(file) else {
            return Vec::new();
        };

        let function = doc
            .enclosing_function(offset)
            .and_then(|function| doc.symbol(function))
            .and_then(HirSymbol::as_function);
        if let Some(data) = function {
            let mut locals: Vec<_> = data
                .locals
                .iter()
                .filter_map(|&id| {
                    let symbol = doc.symbol(id)?;
                    let scope = local_scope(symbol)?;
                    (scope.start() <= offset && offset <= scope.end()).then_some((id, symbol, scope.len()))
                })
                .collect();
            locals.sort_by_key(|(_, _, len)| *len);
            for (id, symbol, _) in locals {
                add(&symbol.name, SymbolRef::new(file, id));
            }
            for &id in data.params.iter().chain(&data.returns) {
                if let Some(symbol) = doc.symbol(id) {
                    add(&symbol.name, SymbolRef::new(file, id));
                }
            }
        }

        if let Some(contract) = doc.enclosing_contract(offset) {
            for member in self.contract_members(SymbolRef::new(file, contract)) {
                if let Some(symbol) = self.symbol(member) {
                    add(&symbol.name, member);
                }
            }
        }

        let mut visited = FxHashSet::default();
        for (name, symbol) in self.exported_symbols(file, &mut visited) {
            add(&name, symbol);
        }
        for doc in self.documents() {
            for &id in doc.top_level() {
                let Some(symbol) = doc.symbol(id) else {
                    continue;
                };
                if symbol.kind.is_contract_like() || matches!(symbol.kind, SymbolKind::Struct | SymbolKind::Enum) {
                    add(&symbol.name, SymbolRef::new(doc.file(), id));
                }
            }
        }
        out
    }

    /// Members of a contract and its bases, nearest declaration first.
    /// Special functions and using directives are left out.
    pub fn contract_members(&self, contract: SymbolRef) -> Vec<SymbolRef> {
        let mut seen: FxHashSet<SmolStr> = FxHashSet::default();
        let mut out = Vec::new();
        for current in self.contract_hierarchy(contract) {
            let Some(doc) = self.document(current.file) else {
                continue;
            };
            let Some(symbol) = doc.symbol(current.id) else {
                continue;
            };
            for &id in symbol.members() {
                let Some(member) = doc.symbol(id) else {
                    continue;
                };
                let special = matches!(
                    member.kind,
                    SymbolKind::Using | SymbolKind::Constructor | SymbolKind::Fallback | SymbolKind::Receive
                );
                if !special && !member.name.is_empty() && seen.insert(member.name.clone()) {
                    out.push(SymbolRef::new(current.file, id));
                }
            }
        }
        out
    }

    /// Top-level names a file exposes to an `import "file";`, its own first.
    pub fn exported_symbols(&self, file: FileId, visited: &mut FxHashSet<FileId>) -> Vec<(SmolStr, SymbolRef)> {
        if !visited.insert(file) {
            return Vec::new();
        }
        let Some(doc) = self.document(file) else {
            return Vec::new();
        };
        let mut out: Vec<(SmolStr, SymbolRef)> = doc
            .top_level()
            .iter()
            .filter_map(|&id| {
                let symbol = doc.symbol(id)?;
                (!symbol.name.is_empty() && symbol.kind != SymbolKind::Using)
                    .then(|| (symbol.name.clone(), SymbolRef::new(file, id)))
            })
            .collect();

        for import in doc.imports() {
            let Some(binding) = doc.symbol(import).and_then(HirSymbol::as_import).map(|i| &i.binding) else {
                continue;
            };
            let Some(target) = self.import_target(SymbolRef::new(file, import)) else {
                continue;
            };
            match binding {
                ImportBinding::All => out.extend(self.exported_symbols(target, visited)),
                ImportBinding::Symbols(symbols) => {
                    for (original, alias) in symbols {
                        let local = alias.as_ref().unwrap_or(original);
                        let mut inner = FxHashSet::default();
                        if let Some(found) = self.find_exported(target, original, &any_kind, &mut inner) {
                            out.push((local.clone(), found));
                        }
                    }
                }
                ImportBinding::Namespace(_) => {}
            }
        }
        out
    }
}

fn local_scope(symbol: &HirSymbol) -> Option<text_size::TextRange> {
    match &symbol.data {
        SymbolData::Variable(var) => var.scope,
        _ => None,
    }
}
