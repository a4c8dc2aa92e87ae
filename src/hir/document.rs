//! The semantic document model: one parsed file at one text version.

use std::sync::Arc;

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use super::expressions::{ExpressionLowering, ParsedExpression};
use super::ids::{ExprId, SymbolId};
use super::symbols::{
    ContractData, FunctionData, HirSymbol, ImportBinding, ImportData, SymbolData, SymbolKind,
    UsingData, VariableData,
};
use super::types::DeclarationType;
use crate::base::{FileId, LineIndex};
use crate::parser::ParseError;
use crate::project::{ImportStatement, SourceDocument};
use crate::syntax::visit::{self, Visitor};
use crate::syntax::*;

/// Symbols and access chains of one file.
///
/// Immutable once built; the walker replaces the whole document when the
/// text changes.
#[derive(Debug)]
pub struct ParsedDocument {
    file: FileId,
    path: Arc<str>,
    text: Arc<str>,
    version: u64,
    line_index: LineIndex,
    symbols: Vec<HirSymbol>,
    top_level: Vec<SymbolId>,
    expressions: Vec<ParsedExpression>,
    blanked_lines: Vec<u32>,
    diagnostics: Vec<ParseError>,
}

/// The node that contains an offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selected {
    Symbol(SymbolId),
    Expression(ExprId),
}

/// Innermost node of each kind containing an offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub contract: Option<SymbolId>,
    pub function: Option<SymbolId>,
    pub symbol: Option<SymbolId>,
    pub expression: Option<ExprId>,
}

impl ParsedDocument {
    /// Build the model for `unit`, the parse of `source.text` (or of a copy
    /// with some lines blanked, which keeps every offset).
    pub fn build(file: FileId, unit: &SourceUnit, source: &SourceDocument, version: u64) -> Self {
        let mut builder = DocumentBuilder {
            symbols: Vec::new(),
            top_level: Vec::new(),
            expressions: Vec::new(),
            imports: &source.imports,
        };
        for item in &unit.items {
            if let Some(id) = builder.add_item(item) {
                builder.top_level.push(id);
            }
        }
        Self {
            file,
            path: Arc::from(source.path.as_str()),
            line_index: LineIndex::new(&source.text),
            text: source.text.clone(),
            version,
            symbols: builder.symbols,
            top_level: builder.top_level,
            expressions: builder.expressions,
            blanked_lines: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Record that this model came from a degraded parse.
    pub fn with_recovery(mut self, blanked_lines: Vec<u32>, diagnostics: Vec<ParseError>) -> Self {
        self.blanked_lines = blanked_lines;
        self.diagnostics = diagnostics;
        self
    }

    pub fn file(&self) -> FileId {
        self.file
    }

    pub fn path(&self) -> &Arc<str> {
        &self.path
    }

    pub fn text(&self) -> &Arc<str> {
        &self.text
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Lines blanked to make the file parse (0-indexed).
    pub fn blanked_lines(&self) -> &[u32] {
        &self.blanked_lines
    }

    /// Parse errors that forced the blanking.
    pub fn diagnostics(&self) -> &[ParseError] {
        &self.diagnostics
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&HirSymbol> {
        self.symbols.get(id.index())
    }

    pub fn symbols(&self) -> impl Iterator<Item = (SymbolId, &HirSymbol)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(idx, symbol)| (SymbolId(idx as u32), symbol))
    }

    pub fn top_level(&self) -> &[SymbolId] {
        &self.top_level
    }

    /// First top-level symbol called `name`, imports excluded.
    pub fn top_level_named(&self, name: &str) -> Option<SymbolId> {
        self.top_level.iter().copied().find(|&id| {
            self.symbol(id)
                .is_some_and(|s| s.name == name && !matches!(s.kind, SymbolKind::Import | SymbolKind::Using))
        })
    }

    fn top_level_where<'a>(&'a self, pred: impl Fn(SymbolKind) -> bool + 'a) -> impl Iterator<Item = SymbolId> + 'a {
        self.top_level
            .iter()
            .copied()
            .filter(move |&id| self.symbol(id).is_some_and(|s| pred(s.kind)))
    }

    /// Contracts, interfaces and libraries.
    pub fn contracts(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.top_level_where(|k| k.is_contract_like())
    }

    /// File-level functions.
    pub fn functions(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.top_level_where(|k| k == SymbolKind::Function)
    }

    pub fn events(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.top_level_where(|k| k == SymbolKind::Event)
    }

    pub fn errors(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.top_level_where(|k| k == SymbolKind::Error)
    }

    pub fn structs(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.top_level_where(|k| k == SymbolKind::Struct)
    }

    pub fn enums(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.top_level_where(|k| k == SymbolKind::Enum)
    }

    pub fn constants(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.top_level_where(|k| k == SymbolKind::Constant)
    }

    pub fn custom_types(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.top_level_where(|k| k == SymbolKind::CustomType)
    }

    pub fn usings(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.top_level_where(|k| k == SymbolKind::Using)
    }

    pub fn imports(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.top_level_where(|k| k == SymbolKind::Import)
    }

    pub fn expression(&self, id: ExprId) -> Option<&ParsedExpression> {
        self.expressions.get(id.index())
    }

    pub fn expressions(&self) -> impl Iterator<Item = (ExprId, &ParsedExpression)> {
        self.expressions
            .iter()
            .enumerate()
            .map(|(idx, expr)| (ExprId(idx as u32), expr))
    }

    /// Smallest symbol or expression whose span contains `offset`.
    pub fn select(&self, offset: TextSize) -> Option<Selected> {
        let symbol = self.innermost_symbol(offset, |_| true);
        let expression = self.expression_at(offset);
        match (symbol, expression) {
            (Some(s), Some(e)) => {
                let s_len = self.symbols[s.index()].range.len();
                let e_len = self.expressions[e.index()].range.len();
                Some(if e_len <= s_len {
                    Selected::Expression(e)
                } else {
                    Selected::Symbol(s)
                })
            }
            (Some(s), None) => Some(Selected::Symbol(s)),
            (None, Some(e)) => Some(Selected::Expression(e)),
            (None, None) => None,
        }
    }

    /// The selected node of each kind at `offset`.
    pub fn selection(&self, offset: TextSize) -> Selection {
        Selection {
            contract: self.enclosing_contract(offset),
            function: self.enclosing_function(offset),
            symbol: self.innermost_symbol(offset, |_| true),
            expression: self.expression_at(offset),
        }
    }

    pub fn enclosing_contract(&self, offset: TextSize) -> Option<SymbolId> {
        self.innermost_symbol(offset, |k| k.is_contract_like())
    }

    pub fn enclosing_function(&self, offset: TextSize) -> Option<SymbolId> {
        self.innermost_symbol(offset, |k| k.is_callable())
    }

    fn innermost_symbol(&self, offset: TextSize, pred: impl Fn(SymbolKind) -> bool) -> Option<SymbolId> {
        self.symbols()
            .filter(|(_, s)| pred(s.kind) && s.contains(offset))
            .min_by_key(|(_, s)| s.range.len())
            .map(|(id, _)| id)
    }

    /// Declaration whose name contains `offset`.
    pub fn declaration_at(&self, offset: TextSize) -> Option<SymbolId> {
        self.symbols()
            .filter(|(_, s)| !s.name.is_empty() && s.kind != SymbolKind::Import && s.name_contains(offset))
            .min_by_key(|(_, s)| s.name_range.len())
            .map(|(id, _)| id)
    }

    /// Access-chain link whose identifier contains `offset`.
    pub fn expression_at(&self, offset: TextSize) -> Option<ExprId> {
        self.expressions()
            .filter(|(_, e)| e.contains(offset))
            .min_by_key(|(_, e)| e.range.len())
            .map(|(id, _)| id)
    }

    /// Import whose path literal contains `offset`.
    pub fn import_at(&self, offset: TextSize) -> Option<SymbolId> {
        self.imports().find(|&id| {
            self.symbol(id)
                .and_then(HirSymbol::as_import)
                .is_some_and(|import| import.path_range.contains_inclusive(offset))
        })
    }

    /// Source text of a range, empty when out of bounds.
    pub fn slice(&self, range: TextRange) -> &str {
        self.text
            .get(usize::from(range.start())..usize::from(range.end()))
            .unwrap_or_default()
    }
}

struct DocumentBuilder<'a> {
    symbols: Vec<HirSymbol>,
    top_level: Vec<SymbolId>,
    expressions: Vec<ParsedExpression>,
    imports: &'a [ImportStatement],
}

impl DocumentBuilder<'_> {
    fn push(&mut self, symbol: HirSymbol) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(symbol);
        id
    }

    fn lowering(&mut self, container: Option<SymbolId>) -> ExpressionLowering<'_> {
        ExpressionLowering::new(&mut self.expressions, container)
    }

    fn add_item(&mut self, item: &SourceItem) -> Option<SymbolId> {
        match item {
            SourceItem::Pragma(_) => None,
            SourceItem::Import(import) => Some(self.add_import(import)),
            SourceItem::Contract(contract) => Some(self.add_contract(contract)),
            SourceItem::Function(function) => Some(self.add_function(function, None)),
            SourceItem::Variable(var) => Some(self.add_variable(var, None)),
            SourceItem::Struct(def) => Some(self.add_struct(def, None)),
            SourceItem::Enum(def) => Some(self.add_enum(def, None)),
            SourceItem::Event(def) => Some(self.add_signature(
                SymbolKind::Event,
                &def.name,
                &def.params,
                def.doc.clone(),
                def.range,
                None,
            )),
            SourceItem::Error(def) => Some(self.add_signature(
                SymbolKind::Error,
                &def.name,
                &def.params,
                def.doc.clone(),
                def.range,
                None,
            )),
            SourceItem::UserType(def) => Some(self.add_user_type(def, None)),
            SourceItem::Using(using) => Some(self.add_using(using, None)),
        }
    }

    fn add_contract(&mut self, contract: &ContractDefinition) -> SymbolId {
        let id = self.push(HirSymbol {
            name: contract.name.name.clone(),
            kind: SymbolKind::from_contract_kind(contract.kind),
            range: contract.range,
            name_range: contract.name.range,
            container: None,
            doc: contract.doc.clone(),
            data: SymbolData::None,
        });

        for base in &contract.bases {
            let mut lowering = self.lowering(Some(id));
            lowering.lower_path(&base.path);
            for arg in base.args.iter().flatten() {
                lowering.visit_expr(arg);
            }
        }

        let members = contract
            .parts
            .iter()
            .map(|part| self.add_part(part, id))
            .collect();

        self.symbols[id.index()].data = SymbolData::Contract(ContractData {
            is_abstract: contract.is_abstract,
            bases: contract.bases.iter().map(|b| b.path.clone()).collect(),
            members,
        });
        id
    }

    fn add_part(&mut self, part: &ContractPart, contract: SymbolId) -> SymbolId {
        let container = Some(contract);
        match part {
            ContractPart::Function(function) => self.add_function(function, container),
            ContractPart::Variable(var) => self.add_variable(var, container),
            ContractPart::Struct(def) => self.add_struct(def, container),
            ContractPart::Enum(def) => self.add_enum(def, container),
            ContractPart::Event(def) => self.add_signature(
                SymbolKind::Event,
                &def.name,
                &def.params,
                def.doc.clone(),
                def.range,
                container,
            ),
            ContractPart::Error(def) => self.add_signature(
                SymbolKind::Error,
                &def.name,
                &def.params,
                def.doc.clone(),
                def.range,
                container,
            ),
            ContractPart::UserType(def) => self.add_user_type(def, container),
            ContractPart::Using(using) => self.add_using(using, container),
        }
    }

    fn add_function(&mut self, function: &FunctionDefinition, container: Option<SymbolId>) -> SymbolId {
        let kind = SymbolKind::from_function_kind(function.kind);
        let (name, name_range) = match &function.name {
            Some(ident) => (ident.name.clone(), ident.range),
            None if kind == SymbolKind::Constructor => {
                let len = TextSize::of("constructor").min(function.range.len());
                ("constructor".into(), TextRange::at(function.range.start(), len))
            }
            None => (SmolStr::default(), function.range),
        };
        let id = self.push(HirSymbol {
            name,
            kind,
            range: function.range,
            name_range,
            container,
            doc: function.doc.clone(),
            data: SymbolData::None,
        });

        let scope = Some(function.range);
        let params = function
            .params
            .iter()
            .map(|p| self.add_parameter(p, id, scope))
            .collect();
        let returns = function
            .returns
            .iter()
            .map(|p| self.add_parameter(p, id, scope))
            .collect();

        let mut modifiers = Vec::new();
        let mut is_virtual = false;
        for attribute in &function.attributes {
            match attribute {
                FunctionAttribute::Modifier(invocation) => {
                    let mut lowering = self.lowering(Some(id));
                    lowering.lower_path(&invocation.path);
                    for arg in invocation.args.iter().flatten() {
                        lowering.visit_expr(arg);
                    }
                    modifiers.push(invocation.path.clone());
                }
                FunctionAttribute::Override(paths) => {
                    let mut lowering = self.lowering(Some(id));
                    for path in paths {
                        lowering.lower_path(path);
                    }
                }
                FunctionAttribute::Virtual => is_virtual = true,
                FunctionAttribute::Visibility(_) | FunctionAttribute::Mutability(_) => {}
            }
        }

        let mut locals = Vec::new();
        if let Some(body) = &function.body {
            let mut collector = LocalCollector::default();
            collector.visit_block(body);
            for local in collector.locals {
                locals.push(self.add_local(local, id));
            }
            self.lowering(Some(id)).visit_block(body);
        }

        self.symbols[id.index()].data = SymbolData::Function(FunctionData {
            params,
            returns,
            locals,
            visibility: function.visibility(),
            mutability: function.mutability(),
            is_virtual,
            modifiers,
            body: function.body.as_ref().map(|b| b.range),
        });
        id
    }

    /// Parameters get a symbol even when unnamed, so return types stay
    /// addressable by position.
    fn add_parameter(&mut self, param: &Parameter, container: SymbolId, scope: Option<TextRange>) -> SymbolId {
        self.lowering(Some(container)).visit_type_name(&param.ty);
        let (name, name_range) = match &param.name {
            Some(ident) => (ident.name.clone(), ident.range),
            None => (SmolStr::default(), param.range),
        };
        self.push(HirSymbol {
            name,
            kind: SymbolKind::Parameter,
            range: param.range,
            name_range,
            container: Some(container),
            doc: None,
            data: SymbolData::Variable(VariableData {
                ty: DeclarationType::from_type_name(&param.ty),
                location: param.location,
                visibility: None,
                constant: false,
                immutable: false,
                indexed: param.indexed,
                scope,
            }),
        })
    }

    fn add_local(&mut self, local: LocalDeclaration, function: SymbolId) -> SymbolId {
        self.push(HirSymbol {
            name: local.name,
            kind: SymbolKind::LocalVariable,
            range: local.range,
            name_range: local.name_range,
            container: Some(function),
            doc: None,
            data: SymbolData::Variable(VariableData {
                ty: local.ty,
                location: local.location,
                visibility: None,
                constant: false,
                immutable: false,
                indexed: false,
                scope: Some(local.scope),
            }),
        })
    }

    fn add_variable(&mut self, var: &VariableDefinition, container: Option<SymbolId>) -> SymbolId {
        let kind = if container.is_none() || var.is_constant() {
            SymbolKind::Constant
        } else {
            SymbolKind::StateVariable
        };
        let id = self.push(HirSymbol {
            name: var.name.name.clone(),
            kind,
            range: var.range,
            name_range: var.name.range,
            container,
            doc: var.doc.clone(),
            data: SymbolData::Variable(VariableData {
                ty: DeclarationType::from_type_name(&var.ty),
                location: None,
                visibility: var.visibility(),
                constant: var.is_constant(),
                immutable: var
                    .attributes
                    .iter()
                    .any(|a| matches!(a, VariableAttribute::Immutable)),
                indexed: false,
                scope: None,
            }),
        });

        let mut lowering = self.lowering(container.or(Some(id)));
        lowering.visit_type_name(&var.ty);
        for attribute in &var.attributes {
            if let VariableAttribute::Override(paths) = attribute {
                for path in paths {
                    lowering.lower_path(path);
                }
            }
        }
        if let Some(init) = &var.initializer {
            lowering.visit_expr(init);
        }
        id
    }

    fn add_struct(&mut self, def: &StructDefinition, container: Option<SymbolId>) -> SymbolId {
        let id = self.push(HirSymbol {
            name: def.name.name.clone(),
            kind: SymbolKind::Struct,
            range: def.range,
            name_range: def.name.range,
            container,
            doc: def.doc.clone(),
            data: SymbolData::None,
        });
        let fields = def
            .fields
            .iter()
            .map(|field| {
                self.lowering(Some(id)).visit_type_name(&field.ty);
                self.push(HirSymbol {
                    name: field.name.name.clone(),
                    kind: SymbolKind::StructMember,
                    range: field.range,
                    name_range: field.name.range,
                    container: Some(id),
                    doc: None,
                    data: SymbolData::Variable(VariableData {
                        ty: DeclarationType::from_type_name(&field.ty),
                        location: None,
                        visibility: None,
                        constant: false,
                        immutable: false,
                        indexed: false,
                        scope: None,
                    }),
                })
            })
            .collect();
        self.symbols[id.index()].data = SymbolData::Struct { fields };
        id
    }

    fn add_enum(&mut self, def: &EnumDefinition, container: Option<SymbolId>) -> SymbolId {
        let id = self.push(HirSymbol {
            name: def.name.name.clone(),
            kind: SymbolKind::Enum,
            range: def.range,
            name_range: def.name.range,
            container,
            doc: def.doc.clone(),
            data: SymbolData::None,
        });
        let values = def
            .values
            .iter()
            .map(|value| {
                self.push(HirSymbol {
                    name: value.name.clone(),
                    kind: SymbolKind::EnumMember,
                    range: value.range,
                    name_range: value.range,
                    container: Some(id),
                    doc: None,
                    data: SymbolData::None,
                })
            })
            .collect();
        self.symbols[id.index()].data = SymbolData::Enum { values };
        id
    }

    fn add_signature(
        &mut self,
        kind: SymbolKind,
        name: &Ident,
        params: &[Parameter],
        doc: Option<String>,
        range: TextRange,
        container: Option<SymbolId>,
    ) -> SymbolId {
        let id = self.push(HirSymbol {
            name: name.name.clone(),
            kind,
            range,
            name_range: name.range,
            container,
            doc,
            data: SymbolData::None,
        });
        let params = params
            .iter()
            .map(|p| self.add_parameter(p, id, None))
            .collect();
        self.symbols[id.index()].data = SymbolData::Signature { params };
        id
    }

    fn add_user_type(&mut self, def: &TypeDefinition, container: Option<SymbolId>) -> SymbolId {
        self.push(HirSymbol {
            name: def.name.name.clone(),
            kind: SymbolKind::CustomType,
            range: def.range,
            name_range: def.name.range,
            container,
            doc: def.doc.clone(),
            data: SymbolData::CustomType {
                underlying: DeclarationType::from_type_name(&def.ty),
            },
        })
    }

    fn add_using(&mut self, using: &UsingDirective, container: Option<SymbolId>) -> SymbolId {
        let (library, functions) = match &using.target {
            UsingTarget::Library(path) => (Some(path.clone()), Vec::new()),
            UsingTarget::Functions(functions) => {
                (None, functions.iter().map(|f| f.path.clone()).collect())
            }
        };
        let name = library
            .as_ref()
            .map(IdentPath::to_dotted)
            .unwrap_or_default();

        let mut lowering = self.lowering(container);
        if let Some(path) = &library {
            lowering.lower_path(path);
        }
        for path in &functions {
            lowering.lower_path(path);
        }
        if let Some(ty) = &using.for_type {
            lowering.visit_type_name(ty);
        }

        self.push(HirSymbol {
            name: name.into(),
            kind: SymbolKind::Using,
            range: using.range,
            name_range: using.range,
            container,
            doc: None,
            data: SymbolData::Using(UsingData {
                library,
                functions,
                for_type: using.for_type.as_ref().map(DeclarationType::from_type_name),
                global: using.global,
            }),
        })
    }

    fn add_import(&mut self, import: &ImportDirective) -> SymbolId {
        let resolved = self
            .imports
            .iter()
            .find(|statement| import.path.range.contains_range(statement.range))
            .and_then(|statement| statement.resolved.clone());
        let (name, name_range, binding) = match &import.kind {
            ImportKind::Plain { alias: None } => {
                (SmolStr::default(), import.path.range, ImportBinding::All)
            }
            ImportKind::Plain { alias: Some(alias) } | ImportKind::Glob { alias } => (
                alias.name.clone(),
                alias.range,
                ImportBinding::Namespace(alias.name.clone()),
            ),
            ImportKind::Symbols(symbols) => (
                SmolStr::default(),
                import.path.range,
                ImportBinding::Symbols(
                    symbols
                        .iter()
                        .map(|s| (s.name.name.clone(), s.alias.as_ref().map(|a| a.name.clone())))
                        .collect(),
                ),
            ),
        };
        self.push(HirSymbol {
            name,
            kind: SymbolKind::Import,
            range: import.range,
            name_range,
            container: None,
            doc: None,
            data: SymbolData::Import(ImportData {
                path: import.path.value.clone(),
                path_range: import.path.range,
                resolved,
                binding,
            }),
        })
    }
}

/// A local variable found in a function body.
struct LocalDeclaration {
    name: SmolStr,
    name_range: TextRange,
    range: TextRange,
    ty: DeclarationType,
    location: Option<StorageLocation>,
    /// From the declaration to the end of the enclosing block.
    scope: TextRange,
}

/// Collects locals together with the span they are visible in.
#[derive(Default)]
struct LocalCollector {
    scope_ends: Vec<TextSize>,
    locals: Vec<LocalDeclaration>,
}

impl LocalCollector {
    fn scope_end(&self, fallback: TextSize) -> TextSize {
        self.scope_ends.last().copied().unwrap_or(fallback)
    }

    fn declare(&mut self, name: &Ident, range: TextRange, ty: &TypeName, location: Option<StorageLocation>) {
        let end = self.scope_end(range.end()).max(range.end());
        self.locals.push(LocalDeclaration {
            name: name.name.clone(),
            name_range: name.range,
            range,
            ty: DeclarationType::from_type_name(ty),
            location,
            scope: TextRange::new(range.start(), end),
        });
    }

    fn declare_params(&mut self, params: &[Parameter], scope: TextRange) {
        for param in params {
            if let Some(name) = &param.name {
                self.scope_ends.push(scope.end());
                self.declare(name, param.range, &param.ty, param.location);
                self.scope_ends.pop();
            }
        }
    }
}

impl Visitor for LocalCollector {
    fn visit_block(&mut self, block: &Block) {
        self.scope_ends.push(block.range.end());
        visit::walk_block(self, block);
        self.scope_ends.pop();
    }

    fn visit_statement(&mut self, stmt: &Statement) {
        match &stmt.kind {
            StatementKind::For { .. } => {
                self.scope_ends.push(stmt.range.end());
                visit::walk_statement(self, stmt);
                self.scope_ends.pop();
            }
            StatementKind::Try {
                returns,
                body,
                catches,
                ..
            } => {
                self.declare_params(returns, body.range);
                self.visit_block(body);
                for catch in catches {
                    self.declare_params(&catch.params, catch.range);
                    self.visit_block(&catch.body);
                }
            }
            _ => visit::walk_statement(self, stmt),
        }
    }

    fn visit_variable_declaration(&mut self, decl: &VariableDeclaration) {
        self.declare(&decl.name, decl.range, &decl.ty, decl.location);
    }

    fn visit_expr(&mut self, _expr: &Expr) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{SolidityParser, SourceParser};
    use crate::project::{MemoryFileSystem, Project};

    fn build(text: &str) -> ParsedDocument {
        let fs = MemoryFileSystem::new();
        let project = Project::detached("/p");
        let source = SourceDocument::new("/p/A.sol", text, &project, &fs);
        let unit = SolidityParser.parse(text).unwrap();
        ParsedDocument::build(FileId::new(0), &unit, &source, 1)
    }

    fn named<'a>(doc: &'a ParsedDocument, name: &str) -> (SymbolId, &'a HirSymbol) {
        doc.symbols().find(|(_, s)| s.name == name).unwrap()
    }

    const TOKEN: &str = r#"
import "./Lib.sol" as L;
uint constant MAX = 10;
struct Point { uint x; uint y; }
/// A token.
contract Token is Base {
    enum Color { Red, Green }
    event Moved(address indexed who);
    error Nope();
    mapping(address => uint) balances;
    function transfer(address to, uint amount) public returns (bool) {
        Point memory p;
        for (uint i = 0; i < amount; i++) { p.x += i; }
        return true;
    }
}
"#;

    #[test]
    fn test_top_level_collections() {
        let doc = build(TOKEN);
        assert_eq!(doc.contracts().count(), 1);
        assert_eq!(doc.structs().count(), 1);
        assert_eq!(doc.constants().count(), 1);
        assert_eq!(doc.imports().count(), 1);
        let (_, token) = named(&doc, "Token");
        assert_eq!(token.doc.as_deref(), Some("A token."));
        assert_eq!(token.members().len(), 5);
        assert_eq!(token.as_contract().unwrap().bases[0].to_dotted(), "Base");
    }

    #[test]
    fn test_function_params_and_locals() {
        let doc = build(TOKEN);
        let (_, transfer) = named(&doc, "transfer");
        let function = transfer.as_function().unwrap();
        assert_eq!(function.params.len(), 2);
        assert_eq!(function.returns.len(), 1);
        let locals: Vec<_> = function
            .locals
            .iter()
            .map(|&id| doc.symbol(id).unwrap().name.as_str())
            .collect();
        assert_eq!(locals, vec!["p", "i"]);

        let (_, i) = named(&doc, "i");
        let scope = match &i.data {
            SymbolData::Variable(var) => var.scope.unwrap(),
            _ => panic!("expected variable"),
        };
        assert!(doc.slice(scope).starts_with("uint i"));
        assert!(doc.slice(scope).ends_with('}'));
    }

    #[test]
    fn test_spans_are_ordered_and_contain_names() {
        let doc = build(TOKEN);
        for (_, symbol) in doc.symbols() {
            assert!(symbol.range.start() <= symbol.range.end());
            assert!(symbol.range.contains_range(symbol.name_range), "{}", symbol.name);
        }
    }

    #[test]
    fn test_select_smallest_node() {
        let doc = build(TOKEN);
        let offset = TextSize::from(TOKEN.find("p.x").unwrap() as u32 + 2);
        let Some(Selected::Expression(id)) = doc.select(offset) else {
            panic!("expected expression");
        };
        assert_eq!(doc.expression(id).unwrap().name, "x");

        let selection = doc.selection(offset);
        assert_eq!(doc.symbol(selection.contract.unwrap()).unwrap().name, "Token");
        assert_eq!(doc.symbol(selection.function.unwrap()).unwrap().name, "transfer");
    }

    #[test]
    fn test_import_binding() {
        let doc = build(TOKEN);
        let id = doc.imports().next().unwrap();
        let symbol = doc.symbol(id).unwrap();
        assert_eq!(symbol.name, "L");
        let import = symbol.as_import().unwrap();
        assert_eq!(import.resolved.as_deref(), Some("/p/Lib.sol"));
        assert_eq!(import.binding, ImportBinding::Namespace("L".into()));
    }
}
