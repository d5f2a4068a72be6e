//! Member model of a proxied subject.
//!
//! The model is the immutable, ordered description produced by
//! [`extract`] and consumed by the emitter: the subject's own descriptor
//! plus every property and method that survived the eligibility filter.

pub mod eligibility;
pub mod extract;

pub use extract::extract;

use bitflags::bitflags;
use proxy_types::{DeclarationKind, ParameterRefKind, SourceLocation};
use serde_derive::Serialize;

bitflags! {
    /// Declaration modifiers carried by subjects and members.
    ///
    /// `REF_STRUCT` marks a ref-like (stack-only) type; `REF` and
    /// `REF_READ_ONLY` mark by-reference method returns.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    #[serde(transparent)]
    pub struct Modifiers: u16 {
        const STATIC = 1 << 0;
        const OVERRIDE = 1 << 1;
        const READ_ONLY = 1 << 2;
        const UNSAFE = 1 << 3;
        const REF_STRUCT = 1 << 4;
        const PARTIAL = 1 << 5;
        const REF = 1 << 6;
        const REF_READ_ONLY = 1 << 7;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDescriptor {
    pub name: String,
    pub namespace: Option<String>,
    /// Fully qualified self reference, usable as a field or parameter type.
    pub reference: String,
    pub kind: DeclarationKind,
    pub modifiers: Modifiers,
    pub generic_parameters: Vec<String>,
    pub location: Option<SourceLocation>,
}

impl TypeDescriptor {
    pub fn is_static(&self) -> bool {
        self.modifiers.contains(Modifiers::STATIC)
    }

    /* Struct and record struct subjects; the companion's null plumbing cannot wrap them */
    pub fn is_value_type(&self) -> bool {
        self.kind.is_value_type()
    }

    /* Reference without the `global::` alias qualifier, for human-facing text */
    pub fn display_reference(&self) -> &str {
        self.reference
            .strip_prefix("global::")
            .unwrap_or(&self.reference)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyDescriptor {
    pub name: String,
    pub type_name: String,
    pub modifiers: Modifiers,
}

impl PropertyDescriptor {
    pub fn is_static(&self) -> bool {
        self.modifiers.contains(Modifiers::STATIC)
    }

    /* No fragment declared a setter */
    pub fn is_read_only(&self) -> bool {
        self.modifiers.contains(Modifiers::READ_ONLY)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PassingMode {
    ByValue,
    Ref,
    Out,
    In,
    RefReadOnly,
}

impl PassingMode {
    /* Modifier written in front of the parameter type, trailing space included */
    pub fn parameter_keyword(self) -> &'static str {
        match self {
            PassingMode::ByValue => "",
            PassingMode::Ref => "ref ",
            PassingMode::Out => "out ",
            PassingMode::In => "in ",
            PassingMode::RefReadOnly => "ref readonly ",
        }
    }

    /* Modifier written in front of the argument at a call site */
    pub fn argument_keyword(self) -> &'static str {
        match self {
            PassingMode::RefReadOnly => "in ",
            other => other.parameter_keyword(),
        }
    }
}

impl From<ParameterRefKind> for PassingMode {
    fn from(kind: ParameterRefKind) -> Self {
        match kind {
            ParameterRefKind::None => PassingMode::ByValue,
            ParameterRefKind::Ref => PassingMode::Ref,
            ParameterRefKind::Out => PassingMode::Out,
            ParameterRefKind::In => PassingMode::In,
            ParameterRefKind::RefReadonly => PassingMode::RefReadOnly,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterDescriptor {
    pub name: String,
    pub type_name: String,
    pub passing: PassingMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeParameterDescriptor {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDescriptor {
    pub name: String,
    pub return_type: String,
    pub modifiers: Modifiers,
    pub parameters: Vec<ParameterDescriptor>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<TypeParameterDescriptor>,
}

impl MethodDescriptor {
    pub fn is_static(&self) -> bool {
        self.modifiers.contains(Modifiers::STATIC)
    }

    pub fn returns_void(&self) -> bool {
        self.return_type == "void"
    }

    pub fn returns_by_ref(&self) -> bool {
        self.modifiers
            .intersects(Modifiers::REF | Modifiers::REF_READ_ONLY)
    }
}

/// Everything extraction learned about one subject.
///
/// For a static subject the member lists are always empty: extraction
/// stops after classifying it, and generation reports a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectModel {
    pub subject: TypeDescriptor,
    pub properties: Vec<PropertyDescriptor>,
    pub methods: Vec<MethodDescriptor>,
}

impl SubjectModel {
    pub fn is_supported(&self) -> bool {
        !self.subject.is_static()
    }

    /// Whether a companion is emitted at all.
    ///
    /// Only class and record subjects are wrapped; other declaration kinds
    /// are left alone without a diagnostic.
    pub fn is_emitted(&self) -> bool {
        self.subject.kind.is_class_like()
    }

    pub fn find_property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|property| property.name == name)
    }

    pub fn find_methods<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MethodDescriptor> {
        self.methods.iter().filter(move |method| method.name == name)
    }
}
