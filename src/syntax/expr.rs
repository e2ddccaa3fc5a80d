//! Identifiers, references, types and expressions.

use smol_str::SmolStr;

use crate::base::TextRange;

// ============================================================================
// Identifiers
// ============================================================================

/// A source identifier and where it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub text: SmolStr,
    pub range: Option<TextRange>,
}

impl Ident {
    pub fn new(text: impl Into<SmolStr>) -> Self {
        Self {
            text: text.into(),
            range: None,
        }
    }

    pub fn at(text: impl Into<SmolStr>, range: TextRange) -> Self {
        Self {
            text: text.into(),
            range: Some(range),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl From<&str> for Ident {
    fn from(text: &str) -> Self {
        Ident::new(text)
    }
}

// ============================================================================
// Reference paths - `pkg::item`, `inst.port`, `obj.field::x`
// ============================================================================

/// The separator in front of a path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    /// `::` - package or class scope member
    Scope,
    /// `.` - member of a value (struct field, instance port, class property)
    Dot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    pub separator: Separator,
    pub name: Ident,
}

/// A textual reference: a root identifier followed by qualified accesses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    pub root: Ident,
    pub rest: Vec<PathSegment>,
}

impl Path {
    pub fn new(root: impl Into<Ident>) -> Self {
        Self {
            root: root.into(),
            rest: Vec::new(),
        }
    }

    /// Split a written path like `a::b.c` into its segments (no ranges).
    pub fn parse(text: &str) -> Self {
        let (root, mut rest) = split_name(text);
        let mut path = Path::new(root);
        while let Some((separator, tail)) = strip_separator(rest) {
            let (name, next) = split_name(tail);
            path.rest.push(PathSegment {
                separator,
                name: Ident::new(name),
            });
            rest = next;
        }
        path
    }

    /// Append a `::` segment.
    pub fn scoped(mut self, name: impl Into<Ident>) -> Self {
        self.rest.push(PathSegment {
            separator: Separator::Scope,
            name: name.into(),
        });
        self
    }

    /// Append a `.` segment.
    pub fn member(mut self, name: impl Into<Ident>) -> Self {
        self.rest.push(PathSegment {
            separator: Separator::Dot,
            name: name.into(),
        });
        self
    }

    /// True for a lone identifier with no qualification.
    pub fn is_simple(&self) -> bool {
        self.rest.is_empty()
    }

    pub fn last(&self) -> &Ident {
        self.rest.last().map(|s| &s.name).unwrap_or(&self.root)
    }
}

fn split_name(text: &str) -> (&str, &str) {
    let end = text.find([':', '.']).unwrap_or(text.len());
    text.split_at(end)
}

fn strip_separator(text: &str) -> Option<(Separator, &str)> {
    if let Some(tail) = text.strip_prefix("::") {
        Some((Separator::Scope, tail))
    } else {
        text.strip_prefix('.').map(|tail| (Separator::Dot, tail))
    }
}

// ============================================================================
// Types
// ============================================================================

/// Named or positional association, as in `f(.a(x))`, `#(.N(4))` or `(x)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    Named { name: Ident, value: Option<Expr> },
    Positional(Expr),
}

impl Argument {
    pub fn named(name: impl Into<Ident>, value: Option<Expr>) -> Self {
        Argument::Named {
            name: name.into(),
            value,
        }
    }

    pub fn positional(value: Expr) -> Self {
        Argument::Positional(value)
    }
}

/// Parameter value assignment in a type name (`#(.T(int))`).
pub type ParamAssignment = Argument;

/// One `::`-separated piece of a type name with its parameter values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSegment {
    pub name: Ident,
    pub params: Vec<ParamAssignment>,
}

/// A user-defined type name such as `pkg::cls#(.T(x))::inner_t`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeName {
    pub segments: Vec<TypeSegment>,
}

impl TypeName {
    pub fn new(name: impl Into<Ident>) -> Self {
        Self {
            segments: vec![TypeSegment {
                name: name.into(),
                params: Vec::new(),
            }],
        }
    }

    /// Split a written type name like `pkg::T` into segments (no ranges).
    pub fn parse(text: &str) -> Self {
        Self {
            segments: text
                .split("::")
                .map(|name| TypeSegment {
                    name: Ident::new(name),
                    params: Vec::new(),
                })
                .collect(),
        }
    }

    /// Attach parameter values to the last segment.
    pub fn with_params(mut self, params: Vec<ParamAssignment>) -> Self {
        if let Some(last) = self.segments.last_mut() {
            last.params = params;
        }
        self
    }

    /// The name as written, without parameter lists.
    pub fn text(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join("::")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructMember {
    pub data_type: DataType,
    pub names: Vec<Ident>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumConstant {
    pub name: Ident,
    pub value: Option<Expr>,
}

/// The type part of a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    /// No type written (`input a`, `wire a`, implicit nets)
    Implicit,
    /// Built-in type like `int` or `logic [7:0]`
    Primitive(SmolStr),
    /// User-defined type name
    Named(TypeName),
    /// Unnamed `struct { ... }`
    Struct(Vec<StructMember>),
    /// Unnamed `enum { ... }`
    Enum(Vec<EnumConstant>),
}

impl DataType {
    pub fn primitive(text: impl Into<SmolStr>) -> Self {
        DataType::Primitive(text.into())
    }

    pub fn named(text: &str) -> Self {
        DataType::Named(TypeName::parse(text))
    }

    pub fn is_implicit(&self) -> bool {
        matches!(self, DataType::Implicit)
    }

    /// Source-like rendering used in definition dumps.
    pub fn source_text(&self) -> Option<String> {
        match self {
            DataType::Implicit => None,
            DataType::Primitive(text) => Some(text.to_string()),
            DataType::Named(name) => Some(name.text()),
            DataType::Struct(_) => Some("struct".to_string()),
            DataType::Enum(_) => Some("enum".to_string()),
        }
    }
}

// ============================================================================
// Expressions
// ============================================================================

/// A call to a function, task or method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub target: Path,
    pub args: Vec<Argument>,
}

/// Expressions, reduced to the references they contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Literal(SmolStr),
    Reference(Path),
    Call(Call),
    /// Operator application; only the operands matter here
    Operation(Vec<Expr>),
}

impl Expr {
    pub fn literal(text: impl Into<SmolStr>) -> Self {
        Expr::Literal(text.into())
    }

    pub fn reference(text: &str) -> Self {
        Expr::Reference(Path::parse(text))
    }

    pub fn call(target: &str, args: Vec<Argument>) -> Self {
        Expr::Call(Call {
            target: Path::parse(target),
            args,
        })
    }
}
