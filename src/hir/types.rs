//! Declared types of variables, parameters and return values.

use std::fmt;

use smol_str::SmolStr;
use text_size::TextRange;

use crate::syntax::{TypeName, TypeNameKind};

/// The type a symbol was declared with, reduced to what lookup needs.
///
/// User-defined names stay unresolved here; the walker resolves them against
/// the declaring document's scope on demand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeclarationType {
    /// Last path segment (`Point` in `Lib.Point`), the elementary type name,
    /// `mapping` or `function`.
    pub name: SmolStr,
    /// Qualifying path in front of `name` (`Lib` in `Lib.Point`).
    pub parent: Option<SmolStr>,
    pub elementary: bool,
    pub payable: bool,
    /// Number of trailing `[]` / `[N]` suffixes.
    pub array_dims: u32,
    pub mapping: Option<Box<MappingType>>,
    pub range: TextRange,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MappingType {
    pub key: DeclarationType,
    pub value: DeclarationType,
}

impl DeclarationType {
    /// An elementary type with no source location, e.g. the result of
    /// `msg.sender`.
    pub fn elementary(name: &str) -> Self {
        let (name, payable) = match name.strip_suffix(" payable") {
            Some(base) => (base, true),
            None => (name, false),
        };
        Self {
            name: name.into(),
            parent: None,
            elementary: true,
            payable,
            array_dims: 0,
            mapping: None,
            range: TextRange::default(),
        }
    }

    /// A reference to a user-defined type by name.
    pub fn named(name: impl Into<SmolStr>, range: TextRange) -> Self {
        Self {
            name: name.into(),
            parent: None,
            elementary: false,
            payable: false,
            array_dims: 0,
            mapping: None,
            range,
        }
    }

    pub fn from_type_name(ty: &TypeName) -> Self {
        match &ty.kind {
            TypeNameKind::Elementary { name, payable } => Self {
                name: name.clone(),
                parent: None,
                elementary: true,
                payable: *payable,
                array_dims: 0,
                mapping: None,
                range: ty.range,
            },
            TypeNameKind::UserDefined(path) => {
                let mut segments: Vec<&str> = path.segments.iter().map(|s| s.name.as_str()).collect();
                let name = segments.pop().unwrap_or_default();
                Self {
                    name: name.into(),
                    parent: (!segments.is_empty()).then(|| segments.join(".").into()),
                    elementary: false,
                    payable: false,
                    array_dims: 0,
                    mapping: None,
                    range: ty.range,
                }
            }
            TypeNameKind::Mapping { key, value, .. } => Self {
                name: "mapping".into(),
                parent: None,
                elementary: false,
                payable: false,
                array_dims: 0,
                mapping: Some(Box::new(MappingType {
                    key: Self::from_type_name(key),
                    value: Self::from_type_name(value),
                })),
                range: ty.range,
            },
            TypeNameKind::Array { base, .. } => {
                let mut inner = Self::from_type_name(base);
                inner.array_dims += 1;
                inner.range = ty.range;
                inner
            }
            TypeNameKind::Function { .. } => Self {
                name: "function".into(),
                parent: None,
                elementary: true,
                payable: false,
                array_dims: 0,
                mapping: None,
                range: ty.range,
            },
        }
    }

    pub fn is_array(&self) -> bool {
        self.array_dims > 0
    }

    pub fn is_mapping(&self) -> bool {
        self.array_dims == 0 && self.mapping.is_some()
    }

    /// Neither an array nor a mapping at the outermost level.
    pub fn is_scalar(&self) -> bool {
        !self.is_array() && !self.is_mapping()
    }

    /// Type after one `[index]`: an array loses a dimension, a mapping
    /// yields its value type. `bytes` indexes to `bytes1`.
    pub fn indexed(&self) -> Option<Self> {
        if self.array_dims > 0 {
            let mut inner = self.clone();
            inner.array_dims -= 1;
            return Some(inner);
        }
        if let Some(mapping) = &self.mapping {
            return Some(mapping.value.clone());
        }
        (self.elementary && self.name.starts_with("bytes")).then(|| Self::elementary("bytes1"))
    }

    /// Does a `using L for <self>` directive apply to a value of type `other`?
    ///
    /// Compares name, qualifier, array-ness and mapping-ness; `address` and
    /// `address payable` are interchangeable, as are `uint` and `uint256`.
    pub fn matches_using_target(&self, other: &Self) -> bool {
        if self.array_dims != other.array_dims || self.is_mapping() != other.is_mapping() {
            return false;
        }
        if let (Some(a), Some(b)) = (&self.mapping, &other.mapping) {
            return a.key.matches_using_target(&b.key) && a.value.matches_using_target(&b.value);
        }
        if self.elementary && other.elementary {
            return canonical_elementary(&self.name) == canonical_elementary(&other.name);
        }
        self.name == other.name && (self.elementary || self.parent == other.parent || other.parent.is_none())
    }
}

/// Spell out the elementary aliases: `uint` is `uint256`, `int` is `int256`
/// and `byte` is `bytes1`.
fn canonical_elementary(name: &str) -> &str {
    match name {
        "uint" => "uint256",
        "int" => "int256",
        "byte" => "bytes1",
        other => other,
    }
}

impl fmt::Display for DeclarationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.mapping {
            Some(mapping) => write!(f, "mapping({} => {})", mapping.key, mapping.value)?,
            None => {
                if let Some(parent) = &self.parent {
                    write!(f, "{parent}.")?;
                }
                f.write_str(&self.name)?;
                if self.payable {
                    f.write_str(" payable")?;
                }
            }
        }
        for _ in 0..self.array_dims {
            f.write_str("[]")?;
        }
        Ok(())
    }
}
