//! Typed syntax tree for Solidity sources.
//!
//! One struct or enum per grammar production, each carrying the byte range
//! it covers. The tree is produced by [`crate::parser`] and consumed by the
//! HIR builders; nothing here knows about scopes or resolution.

use smol_str::SmolStr;
use text_size::TextRange;

/// Anything that covers a range of the source text.
pub trait HasRange {
    fn range(&self) -> TextRange;
}

macro_rules! impl_has_range {
    ($($ty:ty),* $(,)?) => {
        $(impl HasRange for $ty {
            fn range(&self) -> TextRange {
                self.range
            }
        })*
    };
}

impl_has_range!(
    Ident,
    IdentPath,
    StringLiteral,
    SourceUnit,
    PragmaDirective,
    ImportDirective,
    ContractDefinition,
    InheritanceSpecifier,
    FunctionDefinition,
    ModifierInvocation,
    Parameter,
    VariableDefinition,
    VariableDeclaration,
    StructDefinition,
    EnumDefinition,
    EventDefinition,
    ErrorDefinition,
    TypeDefinition,
    UsingDirective,
    TypeName,
    Block,
    Statement,
    CatchClause,
    Expr,
);

// ============================================================================
// NAMES
// ============================================================================

/// A single identifier token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ident {
    pub name: SmolStr,
    pub range: TextRange,
}

/// A dotted identifier path such as `Lib.Point`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentPath {
    pub segments: Vec<Ident>,
    pub range: TextRange,
}

impl IdentPath {
    /// Last segment (the name actually being referenced).
    pub fn last(&self) -> Option<&Ident> {
        self.segments.last()
    }

    /// Segments joined with `.`.
    pub fn to_dotted(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// A quoted string literal; `value` excludes the quotes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StringLiteral {
    pub value: String,
    pub range: TextRange,
}

// ============================================================================
// SOURCE UNIT
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct SourceUnit {
    pub items: Vec<SourceItem>,
    pub range: TextRange,
}

/// A top-level declaration.
#[derive(Clone, Debug, PartialEq)]
pub enum SourceItem {
    Pragma(PragmaDirective),
    Import(ImportDirective),
    Contract(ContractDefinition),
    Function(FunctionDefinition),
    Variable(VariableDefinition),
    Struct(StructDefinition),
    Enum(EnumDefinition),
    Event(EventDefinition),
    Error(ErrorDefinition),
    UserType(TypeDefinition),
    Using(UsingDirective),
}

impl HasRange for SourceItem {
    fn range(&self) -> TextRange {
        match self {
            SourceItem::Pragma(it) => it.range,
            SourceItem::Import(it) => it.range,
            SourceItem::Contract(it) => it.range,
            SourceItem::Function(it) => it.range,
            SourceItem::Variable(it) => it.range,
            SourceItem::Struct(it) => it.range,
            SourceItem::Enum(it) => it.range,
            SourceItem::Event(it) => it.range,
            SourceItem::Error(it) => it.range,
            SourceItem::UserType(it) => it.range,
            SourceItem::Using(it) => it.range,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PragmaDirective {
    /// Raw text between `pragma` and `;`.
    pub text: String,
    pub range: TextRange,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportDirective {
    pub path: StringLiteral,
    pub kind: ImportKind,
    pub range: TextRange,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImportKind {
    /// `import "x";` or `import "x" as X;`
    Plain { alias: Option<Ident> },
    /// `import * as X from "x";`
    Glob { alias: Ident },
    /// `import {A, B as C} from "x";`
    Symbols(Vec<ImportSymbol>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportSymbol {
    pub name: Ident,
    pub alias: Option<Ident>,
}

// ============================================================================
// CONTRACTS
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContractKind {
    Contract,
    Interface,
    Library,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ContractDefinition {
    pub kind: ContractKind,
    pub is_abstract: bool,
    pub name: Ident,
    pub bases: Vec<InheritanceSpecifier>,
    pub parts: Vec<ContractPart>,
    pub doc: Option<String>,
    pub range: TextRange,
}

/// `is Base(args)` entry.
#[derive(Clone, Debug, PartialEq)]
pub struct InheritanceSpecifier {
    pub path: IdentPath,
    pub args: Option<Vec<Expr>>,
    pub range: TextRange,
}

/// A member declared inside a contract body.
#[derive(Clone, Debug, PartialEq)]
pub enum ContractPart {
    Function(FunctionDefinition),
    Variable(VariableDefinition),
    Struct(StructDefinition),
    Enum(EnumDefinition),
    Event(EventDefinition),
    Error(ErrorDefinition),
    UserType(TypeDefinition),
    Using(UsingDirective),
}

impl HasRange for ContractPart {
    fn range(&self) -> TextRange {
        match self {
            ContractPart::Function(it) => it.range,
            ContractPart::Variable(it) => it.range,
            ContractPart::Struct(it) => it.range,
            ContractPart::Enum(it) => it.range,
            ContractPart::Event(it) => it.range,
            ContractPart::Error(it) => it.range,
            ContractPart::UserType(it) => it.range,
            ContractPart::Using(it) => it.range,
        }
    }
}

// ============================================================================
// FUNCTIONS
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Function,
    Constructor,
    Modifier,
    Fallback,
    Receive,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Private,
    Internal,
    External,
}

impl Visibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Internal => "internal",
            Visibility::External => "external",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mutability {
    Pure,
    View,
    Payable,
    Constant,
}

impl Mutability {
    pub fn as_str(self) -> &'static str {
        match self {
            Mutability::Pure => "pure",
            Mutability::View => "view",
            Mutability::Payable => "payable",
            Mutability::Constant => "constant",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FunctionAttribute {
    Visibility(Visibility),
    Mutability(Mutability),
    Virtual,
    Override(Vec<IdentPath>),
    Modifier(ModifierInvocation),
}

/// `onlyOwner` or `Base(arg)` in a function header.
#[derive(Clone, Debug, PartialEq)]
pub struct ModifierInvocation {
    pub path: IdentPath,
    pub args: Option<Vec<Expr>>,
    pub range: TextRange,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDefinition {
    pub kind: FunctionKind,
    pub name: Option<Ident>,
    pub params: Vec<Parameter>,
    pub returns: Vec<Parameter>,
    pub attributes: Vec<FunctionAttribute>,
    pub body: Option<Block>,
    pub doc: Option<String>,
    pub range: TextRange,
}

impl FunctionDefinition {
    pub fn visibility(&self) -> Option<Visibility> {
        self.attributes.iter().find_map(|a| match a {
            FunctionAttribute::Visibility(v) => Some(*v),
            _ => None,
        })
    }

    pub fn mutability(&self) -> Option<Mutability> {
        self.attributes.iter().find_map(|a| match a {
            FunctionAttribute::Mutability(m) => Some(*m),
            _ => None,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StorageLocation {
    Memory,
    Storage,
    Calldata,
}

impl StorageLocation {
    pub fn as_str(self) -> &'static str {
        match self {
            StorageLocation::Memory => "memory",
            StorageLocation::Storage => "storage",
            StorageLocation::Calldata => "calldata",
        }
    }
}

/// Function, event or error parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    pub ty: TypeName,
    pub location: Option<StorageLocation>,
    pub indexed: bool,
    pub name: Option<Ident>,
    pub range: TextRange,
}

// ============================================================================
// VARIABLES AND TYPES DECLARATIONS
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub enum VariableAttribute {
    Visibility(Visibility),
    Constant,
    Immutable,
    Transient,
    Override(Vec<IdentPath>),
}

/// State variable or file-level constant.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableDefinition {
    pub ty: TypeName,
    pub attributes: Vec<VariableAttribute>,
    pub name: Ident,
    pub initializer: Option<Expr>,
    pub doc: Option<String>,
    pub range: TextRange,
}

impl VariableDefinition {
    pub fn is_constant(&self) -> bool {
        self.attributes
            .iter()
            .any(|a| matches!(a, VariableAttribute::Constant))
    }

    pub fn visibility(&self) -> Option<Visibility> {
        self.attributes.iter().find_map(|a| match a {
            VariableAttribute::Visibility(v) => Some(*v),
            _ => None,
        })
    }
}

/// Struct field or local variable declaration (`uint x`, `Point memory p`).
#[derive(Clone, Debug, PartialEq)]
pub struct VariableDeclaration {
    pub ty: TypeName,
    pub location: Option<StorageLocation>,
    pub name: Ident,
    pub range: TextRange,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StructDefinition {
    pub name: Ident,
    pub fields: Vec<VariableDeclaration>,
    pub doc: Option<String>,
    pub range: TextRange,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumDefinition {
    pub name: Ident,
    pub values: Vec<Ident>,
    pub doc: Option<String>,
    pub range: TextRange,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EventDefinition {
    pub name: Ident,
    pub params: Vec<Parameter>,
    pub anonymous: bool,
    pub doc: Option<String>,
    pub range: TextRange,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ErrorDefinition {
    pub name: Ident,
    pub params: Vec<Parameter>,
    pub doc: Option<String>,
    pub range: TextRange,
}

/// `type Price is uint128;`
#[derive(Clone, Debug, PartialEq)]
pub struct TypeDefinition {
    pub name: Ident,
    pub ty: TypeName,
    pub doc: Option<String>,
    pub range: TextRange,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UsingDirective {
    pub target: UsingTarget,
    /// `None` for `using L for *;`
    pub for_type: Option<TypeName>,
    pub global: bool,
    pub range: TextRange,
}

#[derive(Clone, Debug, PartialEq)]
pub enum UsingTarget {
    Library(IdentPath),
    Functions(Vec<UsingFunction>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct UsingFunction {
    pub path: IdentPath,
    pub operator: Option<SmolStr>,
}

// ============================================================================
// TYPE NAMES
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct TypeName {
    pub kind: TypeNameKind,
    pub range: TextRange,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TypeNameKind {
    /// `uint256`, `address payable`, `string`, ...
    Elementary { name: SmolStr, payable: bool },
    /// `Token`, `Lib.Point`
    UserDefined(IdentPath),
    Mapping {
        key: Box<TypeName>,
        key_name: Option<Ident>,
        value: Box<TypeName>,
        value_name: Option<Ident>,
    },
    Array {
        base: Box<TypeName>,
        size: Option<Box<Expr>>,
    },
    Function {
        params: Vec<Parameter>,
        returns: Vec<Parameter>,
        attributes: Vec<SmolStr>,
    },
}

// ============================================================================
// STATEMENTS
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub unchecked: bool,
    pub range: TextRange,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Statement {
    pub kind: StatementKind,
    pub range: TextRange,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StatementKind {
    Block(Block),
    /// `uint x = 1;` or `(uint a, , bool c) = f();`
    VariableDeclaration {
        declarations: Vec<Option<VariableDeclaration>>,
        initializer: Option<Expr>,
    },
    Expression(Expr),
    If {
        condition: Expr,
        then_branch: Box<Statement>,
        else_branch: Option<Box<Statement>>,
    },
    For {
        init: Option<Box<Statement>>,
        condition: Option<Expr>,
        update: Option<Expr>,
        body: Box<Statement>,
    },
    While {
        condition: Expr,
        body: Box<Statement>,
    },
    DoWhile {
        body: Box<Statement>,
        condition: Expr,
    },
    Return(Option<Expr>),
    Emit(Expr),
    /// `revert CustomError(args);`
    Revert(Expr),
    Try {
        expr: Expr,
        returns: Vec<Parameter>,
        body: Block,
        catches: Vec<CatchClause>,
    },
    /// Inline assembly; the Yul body is not modelled.
    Assembly,
    Break,
    Continue,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CatchClause {
    pub ident: Option<Ident>,
    pub params: Vec<Parameter>,
    pub body: Block,
    pub range: TextRange,
}

// ============================================================================
// EXPRESSIONS
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub range: TextRange,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Ident(Ident),
    Literal(Literal),
    /// An elementary type used as a value, e.g. the callee of `uint256(x)`.
    ElementaryType(TypeName),
    Member {
        base: Box<Expr>,
        member: Ident,
    },
    Index {
        base: Box<Expr>,
        index: Option<Box<Expr>>,
    },
    Slice {
        base: Box<Expr>,
        start: Option<Box<Expr>>,
        end: Option<Box<Expr>>,
    },
    Call {
        callee: Box<Expr>,
        args: CallArgs,
    },
    /// `target.call{value: v}`
    CallOptions {
        callee: Box<Expr>,
        options: Vec<NamedArgument>,
    },
    Unary {
        op: SmolStr,
        operand: Box<Expr>,
        prefix: bool,
    },
    Binary {
        op: SmolStr,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Assign {
        op: SmolStr,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Conditional {
        condition: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
    },
    New(TypeName),
    /// `(a, , b)`; a parenthesised expression is a one-element tuple.
    Tuple(Vec<Option<Expr>>),
    Array(Vec<Expr>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum CallArgs {
    Positional(Vec<Expr>),
    Named(Vec<NamedArgument>),
}

impl CallArgs {
    /// All argument expressions in source order.
    pub fn exprs(&self) -> Vec<&Expr> {
        match self {
            CallArgs::Positional(args) => args.iter().collect(),
            CallArgs::Named(args) => args.iter().map(|a| &a.value).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NamedArgument {
    pub name: Ident,
    pub value: Expr,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Literal {
    Bool(bool),
    /// Number text including an optional unit (`1 ether`).
    Number(String),
    String(String),
    HexString(String),
}
