use serde_derive::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Accessibility {
    #[default]
    Public,
    Internal,
    Protected,
    ProtectedInternal,
    PrivateProtected,
    Private,
    /// Constructed types (pointers, arrays, type parameters) carry no accessibility of their own.
    NotApplicable,
}

impl Accessibility {
    pub fn is_public(self) -> bool {
        matches!(self, Accessibility::Public)
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Default)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TypeShape {
    #[default]
    Named,
    Void,
    Pointer {
        pointee: Box<TypeRef>,
    },
    Array {
        element: Box<TypeRef>,
    },
    TypeParameter {
        #[serde(default)]
        constraints: Vec<TypeRef>,
    },
}

/// A resolved reference to a type as it appears in a member signature.
///
/// `display` is the fully qualified spelling and is emitted verbatim into
/// generated code. A bare YAML string deserializes as a public named type.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case", from = "TypeRefRepr")]
pub struct TypeRef {
    pub display: String,
    pub accessibility: Accessibility,
    pub shape: TypeShape,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub type_arguments: Vec<TypeRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub containing_type: Option<Box<TypeRef>>,
}

impl TypeRef {
    /* Public, non-nested, non-generic named type */
    pub fn named(display: impl Into<String>) -> Self {
        Self {
            display: display.into(),
            accessibility: Accessibility::Public,
            shape: TypeShape::Named,
            type_arguments: Vec::new(),
            containing_type: None,
        }
    }

    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    pub fn void() -> Self {
        Self {
            display: "void".to_string(),
            accessibility: Accessibility::NotApplicable,
            shape: TypeShape::Void,
            type_arguments: Vec::new(),
            containing_type: None,
        }
    }

    pub fn pointer(pointee: TypeRef) -> Self {
        Self {
            display: format!("{}*", pointee.display),
            accessibility: Accessibility::NotApplicable,
            shape: TypeShape::Pointer {
                pointee: Box::new(pointee),
            },
            type_arguments: Vec::new(),
            containing_type: None,
        }
    }

    pub fn array(element: TypeRef) -> Self {
        Self {
            display: format!("{}[]", element.display),
            accessibility: Accessibility::NotApplicable,
            shape: TypeShape::Array {
                element: Box::new(element),
            },
            type_arguments: Vec::new(),
            containing_type: None,
        }
    }

    pub fn type_parameter(name: impl Into<String>, constraints: Vec<TypeRef>) -> Self {
        Self {
            display: name.into(),
            accessibility: Accessibility::NotApplicable,
            shape: TypeShape::TypeParameter { constraints },
            type_arguments: Vec::new(),
            containing_type: None,
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self.shape, TypeShape::Void)
    }

    /* Check whether a raw pointer appears anywhere in this reference */
    pub fn contains_pointer(&self) -> bool {
        match &self.shape {
            TypeShape::Pointer { .. } => true,
            TypeShape::Array { element } => element.contains_pointer(),
            TypeShape::Named | TypeShape::Void | TypeShape::TypeParameter { .. } => {
                self.type_arguments.iter().any(TypeRef::contains_pointer)
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TypeRefRepr {
    Display(String),
    Full(TypeRefFields),
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct TypeRefFields {
    display: String,
    #[serde(default)]
    accessibility: Accessibility,
    #[serde(default)]
    shape: TypeShape,
    #[serde(default)]
    type_arguments: Vec<TypeRef>,
    #[serde(default)]
    containing_type: Option<Box<TypeRef>>,
}

impl From<TypeRefRepr> for TypeRef {
    fn from(repr: TypeRefRepr) -> Self {
        match repr {
            TypeRefRepr::Display(display) => TypeRef::named(display),
            TypeRefRepr::Full(fields) => TypeRef {
                display: fields.display,
                accessibility: fields.accessibility,
                shape: fields.shape,
                type_arguments: fields.type_arguments,
                containing_type: fields.containing_type,
            },
        }
    }
}

/* Position of a declaration in its source file, 1-based */
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct SourceLocation {
    pub path: String,
    pub line: u32,
    pub column: u32,
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({},{})", self.path, self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_string_is_public_named_type() {
        let ty: TypeRef = serde_yml::from_str("global::System.String").unwrap();
        assert_eq!(ty, TypeRef::named("global::System.String"));
    }

    #[test]
    fn full_form_reads_shape_and_accessibility() {
        let yaml = r#"
display: "global::Test.UnsafeClass.NonPublicStruct*"
shape:
  kind: pointer
  pointee:
    display: global::Test.UnsafeClass.NonPublicStruct
    accessibility: private
    containing-type: global::Test.UnsafeClass
"#;
        let ty: TypeRef = serde_yml::from_str(yaml).unwrap();
        assert_eq!(ty.accessibility, Accessibility::Public);
        let TypeShape::Pointer { pointee } = &ty.shape else {
            panic!("expected pointer shape, got {:?}", ty.shape);
        };
        assert_eq!(pointee.accessibility, Accessibility::Private);
        assert_eq!(
            pointee.containing_type.as_deref(),
            Some(&TypeRef::named("global::Test.UnsafeClass"))
        );
        assert!(ty.contains_pointer());
    }

    #[test]
    fn type_parameter_constraints_default_to_empty() {
        let yaml = r#"
display: T
accessibility: not-applicable
shape: { kind: type-parameter }
"#;
        let ty: TypeRef = serde_yml::from_str(yaml).unwrap();
        assert_eq!(ty.shape, TypeShape::TypeParameter { constraints: vec![] });
        assert!(!ty.contains_pointer());
    }

    #[test]
    fn pointer_inside_generic_argument_is_detected() {
        let mut span = TypeRef::named("global::System.Span<int*>");
        span.type_arguments.push(TypeRef::pointer(TypeRef::named("int")));
        assert!(span.contains_pointer());
        assert!(!TypeRef::array(TypeRef::named("int")).contains_pointer());
    }

    #[test]
    fn location_display_matches_compiler_format() {
        let location = SourceLocation {
            path: "StaticClass.cs".to_string(),
            line: 6,
            column: 19,
        };
        assert_eq!(location.to_string(), "StaticClass.cs(6,19)");
    }
}
