/* Eligibility tests deciding which members can be forwarded from generated code */

use proxy_types::{MethodDecl, MethodKind, PropertyDecl, TypeRef, TypeShape};

/* Check whether `name` is a legal identifier (keywords are legal here; emission escapes them) */
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_alphanumeric())
}

/// Whether generated code outside the subject's assembly can name `ty`.
///
/// Constructed types are judged by their parts: a pointer by its pointee,
/// an array by its element, a type parameter by its constraint types, and
/// a named type by its own accessibility, every enclosing type and every
/// type argument. `void` is not a nameable type; callers that accept it
/// as a return type check for it separately.
pub fn is_publicly_visible(ty: &TypeRef) -> bool {
    match &ty.shape {
        TypeShape::Void => false,
        TypeShape::Pointer { pointee } => is_publicly_visible(pointee),
        TypeShape::Array { element } => is_publicly_visible(element),
        TypeShape::TypeParameter { constraints } => constraints.iter().all(is_publicly_visible),
        TypeShape::Named => {
            ty.accessibility.is_public()
                && ty.containing_type.as_deref().is_none_or(is_publicly_visible)
                && ty.type_arguments.iter().all(is_publicly_visible)
        }
    }
}

pub fn can_proxy_property(property: &PropertyDecl) -> bool {
    is_valid_identifier(&property.name) && is_publicly_visible(&property.property_type)
}

pub fn can_proxy_method(method: &MethodDecl) -> bool {
    if method.kind != MethodKind::Ordinary || !is_valid_identifier(&method.name) {
        return false;
    }

    if !method.return_type.is_void() && !is_publicly_visible(&method.return_type) {
        return false;
    }

    if method
        .type_parameters
        .iter()
        .any(|tp| !tp.constraints.iter().all(is_publicly_visible))
    {
        return false;
    }

    method
        .parameters
        .iter()
        .all(|parameter| is_publicly_visible(&parameter.parameter_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proxy_types::{Accessibility, ParameterRefKind};

    #[test]
    fn identifiers() {
        assert!(is_valid_identifier("UserName"));
        assert!(is_valid_identifier("_value2"));
        assert!(is_valid_identifier("Größe"));
        assert!(is_valid_identifier("class"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("2fast"));
        assert!(!is_valid_identifier("<Clone>$"));
        assert!(!is_valid_identifier("this[]"));
        assert!(!is_valid_identifier(".ctor"));
    }

    #[test]
    fn nested_public_type_inside_private_type_is_hidden() {
        let mut nested = TypeRef::named("global::Test.Outer.Inner");
        nested.containing_type =
            Some(Box::new(TypeRef::named("global::Test.Outer").with_accessibility(Accessibility::Private)));
        assert!(!is_publicly_visible(&nested));
    }

    #[test]
    fn generic_argument_visibility_is_recursive() {
        let mut list = TypeRef::named("global::System.Collections.Generic.List<global::Test.Secret>");
        list.type_arguments
            .push(TypeRef::named("global::Test.Secret").with_accessibility(Accessibility::Internal));
        assert!(!is_publicly_visible(&list));

        list.type_arguments[0].accessibility = Accessibility::Public;
        assert!(is_publicly_visible(&list));
    }

    #[test]
    fn pointers_are_judged_by_pointee() {
        assert!(is_publicly_visible(&TypeRef::pointer(TypeRef::named("int"))));
        let hidden = TypeRef::named("global::Test.UnsafeClass.NonPublicStruct")
            .with_accessibility(Accessibility::Private);
        assert!(!is_publicly_visible(&TypeRef::pointer(hidden)));
    }

    #[test]
    fn type_parameters_are_judged_by_constraints() {
        assert!(is_publicly_visible(&TypeRef::type_parameter("T", vec![])));
        let hidden = TypeRef::named("global::Test.IHidden").with_accessibility(Accessibility::Internal);
        assert!(!is_publicly_visible(&TypeRef::type_parameter("T", vec![hidden])));
    }

    #[test]
    fn void_is_only_accepted_as_return_type() {
        assert!(!is_publicly_visible(&TypeRef::void()));
        assert!(can_proxy_method(&MethodDecl::new("Run", TypeRef::void())));

        let takes_void = MethodDecl::new("Run", TypeRef::void()).with_parameter(
            "x",
            TypeRef::void(),
            ParameterRefKind::None,
        );
        assert!(!can_proxy_method(&takes_void));
    }

    #[test]
    fn non_ordinary_methods_are_rejected() {
        let mut ctor = MethodDecl::new("Widget", TypeRef::void());
        ctor.kind = MethodKind::Constructor;
        assert!(!can_proxy_method(&ctor));

        let mut accessor = MethodDecl::new("get_Name", TypeRef::named("string"));
        accessor.kind = MethodKind::PropertyAccessor;
        assert!(!can_proxy_method(&accessor));
    }
}
