use crate::types::{Accessibility, SourceLocation, TypeRef};
use serde_derive::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DeclarationKind {
    #[default]
    Class,
    Record,
    Struct,
    RecordStruct,
    Interface,
}

impl DeclarationKind {
    /* Stored inline and copied on assignment; never null */
    pub fn is_value_type(self) -> bool {
        matches!(self, DeclarationKind::Struct | DeclarationKind::RecordStruct)
    }

    /* Class-like declarations are the only ones a companion can wrap by reference */
    pub fn is_class_like(self) -> bool {
        matches!(self, DeclarationKind::Class | DeclarationKind::Record)
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MethodKind {
    #[default]
    Ordinary,
    Constructor,
    StaticConstructor,
    Destructor,
    Operator,
    Conversion,
    PropertyAccessor,
    EventAccessor,
    ExplicitInterfaceImplementation,
    LocalFunction,
}

/* How an argument is passed to a parameter */
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ParameterRefKind {
    #[default]
    None,
    Ref,
    Out,
    In,
    RefReadonly,
}

/* How a method hands back its result */
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ReturnRefKind {
    #[default]
    None,
    Ref,
    RefReadonly,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OtherMemberKind {
    #[default]
    Field,
    Event,
    NestedType,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct PropertyDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub property_type: TypeRef,
    #[serde(default)]
    pub accessibility: Accessibility,
    #[serde(default)]
    pub is_static: bool,
    /// True when the property has no setter (init-only setters still count as writable).
    #[serde(default)]
    pub is_read_only: bool,
    #[serde(default)]
    pub location: Option<SourceLocation>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct ParameterDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub parameter_type: TypeRef,
    #[serde(default)]
    pub ref_kind: ParameterRefKind,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct TypeParameterDecl {
    pub name: String,
    #[serde(default)]
    pub constraints: Vec<TypeRef>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct MethodDecl {
    pub name: String,
    #[serde(default)]
    pub kind: MethodKind,
    #[serde(default = "TypeRef::void")]
    pub return_type: TypeRef,
    #[serde(default)]
    pub returns_by: ReturnRefKind,
    #[serde(default)]
    pub parameters: Vec<ParameterDecl>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameterDecl>,
    #[serde(default)]
    pub accessibility: Accessibility,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub location: Option<SourceLocation>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct OtherMemberDecl {
    pub name: String,
    #[serde(default)]
    pub kind: OtherMemberKind,
}

/* A member of a subject, as listed by the front end in declaration order */
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(tag = "member", rename_all = "kebab-case")]
pub enum MemberDecl {
    Property(PropertyDecl),
    Method(MethodDecl),
    Other(OtherMemberDecl),
}

impl MemberDecl {
    pub fn name(&self) -> &str {
        match self {
            MemberDecl::Property(property) => &property.name,
            MemberDecl::Method(method) => &method.name,
            MemberDecl::Other(other) => &other.name,
        }
    }
}

/// A type declaration marked for proxying, already resolved by the front end.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct SubjectDecl {
    pub name: String,
    #[serde(default)]
    pub namespace: Option<String>,
    /// Fully qualified self reference, e.g. `global::Test.User` or `global::Test.Box<T>`.
    pub reference: String,
    #[serde(default)]
    pub kind: DeclarationKind,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_ref_like: bool,
    #[serde(default)]
    pub is_unsafe: bool,
    #[serde(default)]
    pub generic_parameters: Vec<String>,
    #[serde(default)]
    pub location: Option<SourceLocation>,
    #[serde(default)]
    pub members: Vec<MemberDecl>,
}

impl SubjectDecl {
    pub fn new(name: impl Into<String>, namespace: Option<&str>) -> Self {
        let name = name.into();
        let reference = match namespace {
            Some(namespace) => format!("global::{}.{}", namespace, name),
            None => format!("global::{}", name),
        };
        Self {
            name,
            namespace: namespace.map(str::to_string),
            reference,
            kind: DeclarationKind::Class,
            is_static: false,
            is_ref_like: false,
            is_unsafe: false,
            generic_parameters: Vec::new(),
            location: None,
            members: Vec::new(),
        }
    }

    pub fn with_member(mut self, member: MemberDecl) -> Self {
        self.members.push(member);
        self
    }

    pub fn properties(&self) -> impl Iterator<Item = &PropertyDecl> {
        self.members.iter().filter_map(|member| match member {
            MemberDecl::Property(property) => Some(property),
            _ => None,
        })
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodDecl> {
        self.members.iter().filter_map(|member| match member {
            MemberDecl::Method(method) => Some(method),
            _ => None,
        })
    }
}

impl PropertyDecl {
    pub fn new(name: impl Into<String>, property_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            property_type,
            accessibility: Accessibility::Public,
            is_static: false,
            is_read_only: false,
            location: None,
        }
    }
}

impl MethodDecl {
    pub fn new(name: impl Into<String>, return_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            kind: MethodKind::Ordinary,
            return_type,
            returns_by: ReturnRefKind::None,
            parameters: Vec::new(),
            type_parameters: Vec::new(),
            accessibility: Accessibility::Public,
            is_static: false,
            location: None,
        }
    }

    pub fn with_parameter(
        mut self,
        name: impl Into<String>,
        parameter_type: TypeRef,
        ref_kind: ParameterRefKind,
    ) -> Self {
        self.parameters.push(ParameterDecl {
            name: name.into(),
            parameter_type,
            ref_kind,
        });
        self
    }
}
