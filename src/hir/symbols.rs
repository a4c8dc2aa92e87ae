//! Symbol nodes of the semantic model.

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use super::ids::SymbolId;
use super::types::DeclarationType;
use crate::syntax::{ContractKind, FunctionKind, IdentPath, Mutability, StorageLocation, Visibility};

/// The kind of a symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Contract,
    Interface,
    Library,
    Function,
    Modifier,
    Constructor,
    Fallback,
    Receive,
    Event,
    Error,
    Struct,
    StructMember,
    Enum,
    EnumMember,
    Constant,
    CustomType,
    StateVariable,
    Using,
    Import,
    Parameter,
    LocalVariable,
}

impl SymbolKind {
    pub fn from_contract_kind(kind: ContractKind) -> Self {
        match kind {
            ContractKind::Contract => Self::Contract,
            ContractKind::Interface => Self::Interface,
            ContractKind::Library => Self::Library,
        }
    }

    pub fn from_function_kind(kind: FunctionKind) -> Self {
        match kind {
            FunctionKind::Function => Self::Function,
            FunctionKind::Constructor => Self::Constructor,
            FunctionKind::Modifier => Self::Modifier,
            FunctionKind::Fallback => Self::Fallback,
            FunctionKind::Receive => Self::Receive,
        }
    }

    /// Get a display string for this kind.
    pub fn display(&self) -> &'static str {
        match self {
            Self::Contract => "contract",
            Self::Interface => "interface",
            Self::Library => "library",
            Self::Function => "function",
            Self::Modifier => "modifier",
            Self::Constructor => "constructor",
            Self::Fallback => "fallback",
            Self::Receive => "receive",
            Self::Event => "event",
            Self::Error => "error",
            Self::Struct => "struct",
            Self::StructMember => "struct member",
            Self::Enum => "enum",
            Self::EnumMember => "enum member",
            Self::Constant => "constant",
            Self::CustomType => "type",
            Self::StateVariable => "state variable",
            Self::Using => "using",
            Self::Import => "import",
            Self::Parameter => "parameter",
            Self::LocalVariable => "local variable",
        }
    }

    pub fn is_contract_like(&self) -> bool {
        matches!(self, Self::Contract | Self::Interface | Self::Library)
    }

    /// Kinds that can appear in type position.
    pub fn is_type(&self) -> bool {
        self.is_contract_like() || matches!(self, Self::Struct | Self::Enum | Self::CustomType)
    }

    /// Kinds that own a body with parameters and locals.
    pub fn is_callable(&self) -> bool {
        matches!(
            self,
            Self::Function | Self::Modifier | Self::Constructor | Self::Fallback | Self::Receive
        )
    }

    /// Kinds whose declaration carries a [`DeclarationType`].
    pub fn is_variable(&self) -> bool {
        matches!(
            self,
            Self::StateVariable
                | Self::Constant
                | Self::Parameter
                | Self::LocalVariable
                | Self::StructMember
        )
    }

    /// Symbols that are outline entries rather than implementation detail.
    pub fn is_outline(&self) -> bool {
        !matches!(
            self,
            Self::Using | Self::Import | Self::Parameter | Self::LocalVariable
        )
    }
}

/// A named declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct HirSymbol {
    pub name: SmolStr,
    pub kind: SymbolKind,
    /// Span of the whole declaration.
    pub range: TextRange,
    /// Span of the declared name; equals `range` for unnamed declarations.
    pub name_range: TextRange,
    /// Owning contract, struct, enum or function; `None` at file level.
    pub container: Option<SymbolId>,
    /// NatSpec attached to the declaration.
    pub doc: Option<String>,
    pub data: SymbolData,
}

impl HirSymbol {
    /// Does `offset` fall inside the declaration (end inclusive)?
    pub fn contains(&self, offset: TextSize) -> bool {
        self.range.start() <= offset && offset <= self.range.end()
    }

    /// Is `offset` on the declared name?
    pub fn name_contains(&self, offset: TextSize) -> bool {
        self.name_range.start() <= offset && offset <= self.name_range.end()
    }

    /// Declared type of a variable-like symbol.
    pub fn declared_type(&self) -> Option<&DeclarationType> {
        match &self.data {
            SymbolData::Variable(var) => Some(&var.ty),
            SymbolData::CustomType { underlying } => Some(underlying),
            _ => None,
        }
    }

    /// Directly owned members: contract parts, struct fields or enum values.
    pub fn members(&self) -> &[SymbolId] {
        match &self.data {
            SymbolData::Contract(contract) => &contract.members,
            SymbolData::Struct { fields } => fields,
            SymbolData::Enum { values } => values,
            _ => &[],
        }
    }

    pub fn as_contract(&self) -> Option<&ContractData> {
        match &self.data {
            SymbolData::Contract(contract) => Some(contract),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionData> {
        match &self.data {
            SymbolData::Function(function) => Some(function),
            _ => None,
        }
    }

    pub fn as_import(&self) -> Option<&ImportData> {
        match &self.data {
            SymbolData::Import(import) => Some(import),
            _ => None,
        }
    }

    pub fn as_using(&self) -> Option<&UsingData> {
        match &self.data {
            SymbolData::Using(using) => Some(using),
            _ => None,
        }
    }
}

/// Kind-specific payload of a [`HirSymbol`].
#[derive(Clone, Debug, PartialEq)]
pub enum SymbolData {
    Contract(ContractData),
    Function(FunctionData),
    Variable(VariableData),
    Struct { fields: Vec<SymbolId> },
    Enum { values: Vec<SymbolId> },
    /// Events and errors.
    Signature { params: Vec<SymbolId> },
    CustomType { underlying: DeclarationType },
    Using(UsingData),
    Import(ImportData),
    None,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ContractData {
    pub is_abstract: bool,
    /// Base contracts as written; resolved by name when needed, which keeps
    /// self-referential and cyclic hierarchies harmless.
    pub bases: Vec<IdentPath>,
    pub members: Vec<SymbolId>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionData {
    pub params: Vec<SymbolId>,
    pub returns: Vec<SymbolId>,
    pub locals: Vec<SymbolId>,
    pub visibility: Option<Visibility>,
    pub mutability: Option<Mutability>,
    pub is_virtual: bool,
    pub modifiers: Vec<IdentPath>,
    pub body: Option<TextRange>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VariableData {
    pub ty: DeclarationType,
    pub location: Option<StorageLocation>,
    pub visibility: Option<Visibility>,
    pub constant: bool,
    pub immutable: bool,
    pub indexed: bool,
    /// Where a local or parameter is visible; `None` for members.
    pub scope: Option<TextRange>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UsingData {
    /// `using L for T;`
    pub library: Option<IdentPath>,
    /// `using {f, g as +} for T;`
    pub functions: Vec<IdentPath>,
    /// `None` for `*`.
    pub for_type: Option<DeclarationType>,
    pub global: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImportData {
    /// Import string exactly as written.
    pub path: String,
    /// Span of the path literal, quotes included.
    pub path_range: TextRange,
    /// Absolute target path when resolution succeeded.
    pub resolved: Option<String>,
    pub binding: ImportBinding,
}

/// What an import brings into scope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImportBinding {
    /// `import "x";`: every top-level symbol of the target.
    All,
    /// `import "x" as X;` and `import * as X from "x";`
    Namespace(SmolStr),
    /// `import {A, B as C} from "x";` as `(original, alias)` pairs.
    Symbols(Vec<(SmolStr, Option<SmolStr>)>),
}

impl ImportBinding {
    /// Original name in the target file bound to `local`, if any.
    pub fn original_name(&self, local: &str) -> Option<&str> {
        match self {
            ImportBinding::Symbols(symbols) => symbols.iter().find_map(|(name, alias)| {
                (alias.as_deref().unwrap_or(name.as_str()) == local).then_some(name.as_str())
            }),
            _ => None,
        }
    }
}
