//! Completion suggestions implementation.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use super::access_chain::{AccessChain, ChainLink, import_path_prefix, parse_access_chain};
use super::globals::{self, Builtin};
use crate::base::{FileId, TextSize, paths};
use crate::hir::{DeclarationType, ExpressionType, HirSymbol, SymbolKind, SymbolRef, Walker};
use crate::project::Project;

/// Kind of completion item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionKind {
    Contract,
    Interface,
    Library,
    Function,
    Modifier,
    Event,
    Struct,
    Field,
    Enum,
    EnumMember,
    Variable,
    Constant,
    TypeParameter,
    Module,
    Keyword,
    File,
}

impl CompletionKind {
    pub fn from_symbol_kind(kind: SymbolKind) -> Self {
        match kind {
            SymbolKind::Contract => CompletionKind::Contract,
            SymbolKind::Interface => CompletionKind::Interface,
            SymbolKind::Library => CompletionKind::Library,
            SymbolKind::Function | SymbolKind::Constructor | SymbolKind::Fallback | SymbolKind::Receive => {
                CompletionKind::Function
            }
            SymbolKind::Modifier => CompletionKind::Modifier,
            SymbolKind::Event => CompletionKind::Event,
            SymbolKind::Error | SymbolKind::Struct => CompletionKind::Struct,
            SymbolKind::StructMember => CompletionKind::Field,
            SymbolKind::Enum => CompletionKind::Enum,
            SymbolKind::EnumMember => CompletionKind::EnumMember,
            SymbolKind::Constant => CompletionKind::Constant,
            SymbolKind::CustomType => CompletionKind::TypeParameter,
            SymbolKind::Import | SymbolKind::Using => CompletionKind::Module,
            SymbolKind::StateVariable | SymbolKind::Parameter | SymbolKind::LocalVariable => {
                CompletionKind::Variable
            }
        }
    }
}

/// A completion suggestion.
#[derive(Clone, Debug)]
pub struct CompletionItem {
    /// The text to insert.
    pub label: Arc<str>,
    /// The kind of completion.
    pub kind: CompletionKind,
    /// Detail text (shown after label).
    pub detail: Option<Arc<str>>,
    /// Documentation (shown in popup).
    pub documentation: Option<Arc<str>>,
    /// Sort priority (lower = higher priority).
    pub sort_priority: u32,
}

impl CompletionItem {
    /// Create a new completion item.
    pub fn new(label: impl Into<Arc<str>>, kind: CompletionKind) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
            documentation: None,
            sort_priority: 100,
        }
    }

    /// Set the detail text.
    pub fn with_detail(mut self, detail: impl Into<Arc<str>>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Set the documentation.
    pub fn with_documentation(mut self, doc: impl Into<Arc<str>>) -> Self {
        self.documentation = Some(doc.into());
        self
    }

    /// Set the sort priority.
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.sort_priority = priority;
        self
    }

    /// Create from a HirSymbol.
    pub fn from_symbol(symbol: &HirSymbol) -> Self {
        let mut item = Self::new(symbol.name.as_str(), CompletionKind::from_symbol_kind(symbol.kind));
        item.detail = Some(Arc::from(match symbol.declared_type() {
            Some(ty) => ty.to_string(),
            None => symbol.kind.display().to_string(),
        }));
        if let Some(doc) = &symbol.doc {
            item.documentation = Some(Arc::from(doc.as_str()));
        }
        item
    }

    fn from_builtin(builtin: &Builtin, kind: CompletionKind) -> Self {
        Self::new(builtin.name, kind)
            .with_detail(builtin.detail)
            .with_documentation(builtin.doc)
    }
}

/// Get completion suggestions at a position.
///
/// # Arguments
/// * `walker` - The indexed documents
/// * `project` - Used for import path suggestions
/// * `file` - The file containing the cursor
/// * `offset` - Cursor offset in that file
/// * `line_prefix` - Text of the cursor line up to the cursor, taken from the
///   live buffer rather than the (possibly blanked) indexed text
///
/// # Returns
/// List of completion suggestions.
pub fn completions(
    walker: &Walker,
    project: &Project,
    file: FileId,
    offset: TextSize,
    line_prefix: &str,
) -> Vec<CompletionItem> {
    if let Some(prefix) = import_path_prefix(line_prefix) {
        let from = walker.path(file).map(|p| p.to_string()).unwrap_or_default();
        return import_path_completions(walker, project, &from, prefix);
    }
    if let Some(chain) = parse_access_chain(line_prefix) {
        return member_completions(walker, file, offset, &chain);
    }
    general_completions(walker, file, offset)
}

/// Keywords, elementary types, globals and every symbol visible at `offset`.
fn general_completions(walker: &Walker, file: FileId, offset: TextSize) -> Vec<CompletionItem> {
    let mut items = Vec::new();
    let mut seen = FxHashSet::default();

    for (name, symbol) in walker.visible_symbols(offset, file) {
        let Some(hir) = walker.symbol(symbol) else {
            continue;
        };
        if name.is_empty() || !seen.insert(name.clone()) {
            continue;
        }
        let mut item = CompletionItem::from_symbol(hir).with_priority(10);
        if name != hir.name {
            item.label = Arc::from(name.as_str());
        }
        items.push(item);
    }
    for builtin in globals::GLOBAL_OBJECTS {
        items.push(CompletionItem::from_builtin(builtin, CompletionKind::Variable).with_priority(50));
    }
    for builtin in globals::GLOBAL_FUNCTIONS {
        items.push(CompletionItem::from_builtin(builtin, CompletionKind::Function).with_priority(50));
    }
    for ty in globals::ELEMENTARY_TYPES {
        items.push(CompletionItem::new(*ty, CompletionKind::Keyword).with_priority(80));
    }
    for keyword in globals::KEYWORDS {
        items.push(CompletionItem::new(*keyword, CompletionKind::Keyword).with_priority(90));
    }
    items
}

/// What a scanned chain prefix evaluates to.
enum ChainValue {
    Resolved(ExpressionType),
    /// A builtin object such as `msg`.
    Object(&'static [Builtin]),
}

fn member_completions(walker: &Walker, file: FileId, offset: TextSize, chain: &AccessChain) -> Vec<CompletionItem> {
    let Some(value) = resolve_chain(walker, file, offset, &chain.links) else {
        tracing::trace!(?chain, "chain not resolved");
        return Vec::new();
    };
    match value {
        ChainValue::Object(members) => members
            .iter()
            .map(|b| CompletionItem::from_builtin(b, CompletionKind::Field))
            .collect(),
        ChainValue::Resolved(ty) => {
            let mut items: Vec<CompletionItem> = walker
                .members_of(&ty, file, offset)
                .into_iter()
                .filter_map(|member| walker.symbol(member))
                .map(CompletionItem::from_symbol)
                .collect();
            if let Some(declared) = ty.declared() {
                items.extend(
                    globals::type_members(declared)
                        .iter()
                        .map(|b| CompletionItem::from_builtin(b, CompletionKind::Field).with_priority(50)),
                );
            }
            items
        }
    }
}

fn resolve_chain(walker: &Walker, file: FileId, offset: TextSize, links: &[ChainLink]) -> Option<ChainValue> {
    let (root, rest) = links.split_first()?;
    let mut value = resolve_root(walker, file, offset, root)?;
    for link in rest {
        value = match value {
            ChainValue::Object(members) => {
                let member = members.iter().find(|m| m.name == link.name)?;
                builtin_value(member, link)?
            }
            ChainValue::Resolved(ty) => match walker.member_named(&ty, &link.name, file, offset) {
                Some(member) => ChainValue::Resolved(walker.type_of_symbol(member, link.is_call, link.index_count)?),
                None => {
                    let member = globals::type_members(ty.declared()?)
                        .iter()
                        .find(|m| m.name == link.name)?;
                    builtin_value(member, link)?
                }
            },
        };
    }
    Some(value)
}

fn resolve_root(walker: &Walker, file: FileId, offset: TextSize, root: &ChainLink) -> Option<ChainValue> {
    let doc = walker.document(file)?;
    match root.name.as_str() {
        "this" => {
            let contract = SymbolRef::new(file, doc.enclosing_contract(offset)?);
            let name = walker.symbol(contract)?.name.clone();
            return Some(ChainValue::Resolved(ExpressionType::Value {
                ty: DeclarationType::named(name, Default::default()),
                target: Some(contract),
            }));
        }
        "super" => {
            let contract = SymbolRef::new(file, doc.enclosing_contract(offset)?);
            let base = walker.contract_hierarchy(contract).get(1).copied()?;
            return Some(ChainValue::Resolved(ExpressionType::Static(base)));
        }
        _ => {}
    }
    if let Some(symbol) = walker.find_in_scope(&root.name, offset, file) {
        return walker
            .type_of_symbol(symbol, root.is_call, root.index_count)
            .map(ChainValue::Resolved);
    }
    if let Some(members) = globals::object_members(&root.name) {
        return Some(ChainValue::Object(members));
    }
    let function = globals::GLOBAL_FUNCTIONS.iter().find(|f| f.name == root.name)?;
    builtin_value(function, root)
}

fn builtin_value(builtin: &Builtin, link: &ChainLink) -> Option<ChainValue> {
    if builtin.ty.is_empty() {
        return None;
    }
    let mut ty = DeclarationType::elementary(builtin.ty);
    for _ in 0..link.index_count {
        ty = ty.indexed()?;
    }
    Some(ChainValue::Resolved(ExpressionType::Value { ty, target: None }))
}

/// Import strings starting with `prefix`: remapping prefixes and the
/// shortest import string of every indexed document.
fn import_path_completions(walker: &Walker, project: &Project, from: &str, prefix: &str) -> Vec<CompletionItem> {
    let mut seen = FxHashSet::default();
    let mut items = Vec::new();

    for remapping in &project.remappings {
        let label = remapping.prefix.as_str();
        if label.starts_with(prefix) && seen.insert(label.to_string()) {
            items.push(
                CompletionItem::new(label, CompletionKind::Module)
                    .with_detail(remapping.to_string())
                    .with_priority(10),
            );
        }
    }

    for doc in walker.documents() {
        if &**doc.path() == from {
            continue;
        }
        let import = project.import_string_for(doc.path(), from);
        if import.starts_with(prefix) && seen.insert(import.clone()) {
            items.push(
                CompletionItem::new(import.as_str(), CompletionKind::File)
                    .with_detail(paths::file_name(doc.path()).to_string())
                    .with_priority(20),
            );
        }
    }
    items
}
