use super::eligibility::{can_proxy_method, can_proxy_property};
use super::{
    MethodDescriptor, Modifiers, ParameterDescriptor, PropertyDescriptor, SubjectModel,
    TypeDescriptor, TypeParameterDescriptor,
};
use indexmap::IndexMap;
use proxy_types::{MemberDecl, MethodDecl, PropertyDecl, ReturnRefKind, SubjectDecl};
use tracing::{debug, trace};

/// Builds the member model for one subject.
///
/// Never fails: members that cannot be forwarded are left out. A static
/// subject is classified and returned with no members so the caller can
/// route it to the diagnostic path.
pub fn extract(decl: &SubjectDecl) -> SubjectModel {
    let subject = describe_subject(decl);

    if subject.is_static() {
        debug!(subject = %subject.reference, "static subject, skipping member extraction");
        return SubjectModel {
            subject,
            properties: Vec::new(),
            methods: Vec::new(),
        };
    }

    let mut properties: IndexMap<String, PropertyDescriptor> = IndexMap::new();
    let mut methods = Vec::new();

    for member in &decl.members {
        match member {
            MemberDecl::Property(property) if can_proxy_property(property) => {
                merge_property(&mut properties, describe_property(property));
            }
            MemberDecl::Method(method) if can_proxy_method(method) => {
                methods.push(describe_method(method));
            }
            MemberDecl::Property(_) | MemberDecl::Method(_) => {
                trace!(subject = %subject.reference, member = member.name(), "member not eligible");
            }
            MemberDecl::Other(_) => {}
        }
    }

    debug!(
        subject = %subject.reference,
        properties = properties.len(),
        methods = methods.len(),
        "extracted member model"
    );

    SubjectModel {
        subject,
        properties: properties.into_values().collect(),
        methods,
    }
}

fn describe_subject(decl: &SubjectDecl) -> TypeDescriptor {
    /* The companion must itself be a fragment since the subject may have others */
    let mut modifiers = Modifiers::PARTIAL;
    modifiers.set(Modifiers::STATIC, decl.is_static);
    modifiers.set(Modifiers::REF_STRUCT, decl.is_ref_like);
    modifiers.set(Modifiers::UNSAFE, decl.is_unsafe);

    TypeDescriptor {
        name: decl.name.clone(),
        namespace: decl.namespace.clone().filter(|ns| !ns.is_empty()),
        reference: decl.reference.clone(),
        kind: decl.kind,
        modifiers,
        generic_parameters: decl.generic_parameters.clone(),
        location: decl.location.clone(),
    }
}

/* Writable wins: a property stays read-only only if every fragment declared it so */
fn merge_property(properties: &mut IndexMap<String, PropertyDescriptor>, property: PropertyDescriptor) {
    match properties.get_mut(&property.name) {
        Some(existing) => {
            if !property.is_read_only() {
                existing.modifiers.remove(Modifiers::READ_ONLY);
            }
        }
        None => {
            properties.insert(property.name.clone(), property);
        }
    }
}

fn describe_property(property: &PropertyDecl) -> PropertyDescriptor {
    let mut modifiers = Modifiers::empty();
    modifiers.set(Modifiers::STATIC, property.is_static);
    modifiers.set(Modifiers::READ_ONLY, property.is_read_only);
    modifiers.set(Modifiers::UNSAFE, property.property_type.contains_pointer());

    PropertyDescriptor {
        name: property.name.clone(),
        type_name: property.property_type.display.clone(),
        modifiers,
    }
}

fn describe_method(method: &MethodDecl) -> MethodDescriptor {
    let parameters: Vec<ParameterDescriptor> = method
        .parameters
        .iter()
        .map(|parameter| ParameterDescriptor {
            name: parameter.name.clone(),
            type_name: parameter.parameter_type.display.clone(),
            passing: parameter.ref_kind.into(),
        })
        .collect();

    let type_parameters = method
        .type_parameters
        .iter()
        .map(|tp| TypeParameterDescriptor {
            name: tp.name.clone(),
            constraints: tp.constraints.iter().map(|c| c.display.clone()).collect(),
        })
        .collect();

    let uses_pointers = method.return_type.contains_pointer()
        || method
            .parameters
            .iter()
            .any(|parameter| parameter.parameter_type.contains_pointer());

    let mut modifiers = Modifiers::empty();
    modifiers.set(Modifiers::STATIC, method.is_static);
    modifiers.set(Modifiers::UNSAFE, uses_pointers);
    match method.returns_by {
        ReturnRefKind::None => {}
        ReturnRefKind::Ref => modifiers |= Modifiers::REF,
        ReturnRefKind::RefReadonly => modifiers |= Modifiers::REF_READ_ONLY,
    }

    let mut descriptor = MethodDescriptor {
        name: method.name.clone(),
        return_type: method.return_type.display.clone(),
        modifiers,
        parameters,
        type_parameters,
    };
    if is_well_known_override(&descriptor) {
        descriptor.modifiers |= Modifiers::OVERRIDE;
    }
    descriptor
}

/* `ToString()`, `Equals(object)` and `GetHashCode()` replace the companion's own inherited members */
fn is_well_known_override(method: &MethodDescriptor) -> bool {
    if method.is_static() || !method.type_parameters.is_empty() {
        return false;
    }

    match method.name.as_str() {
        "ToString" => {
            is_type(method.return_type.trim_end_matches('?'), "string", "String") && method.parameters.is_empty()
        }
        "Equals" => {
            is_type(&method.return_type, "bool", "Boolean")
                && matches!(
                    method.parameters.as_slice(),
                    [only] if only.passing == super::PassingMode::ByValue
                        && is_type(only.type_name.trim_end_matches('?'), "object", "Object")
                )
        }
        "GetHashCode" => is_type(&method.return_type, "int", "Int32") && method.parameters.is_empty(),
        _ => false,
    }
}

/* Match either the keyword spelling or the System type spelling of a built-in type */
fn is_type(display: &str, keyword: &str, system_name: &str) -> bool {
    if display == keyword {
        return true;
    }
    let unqualified = display.strip_prefix("global::").unwrap_or(display);
    unqualified
        .strip_prefix("System.")
        .is_some_and(|name| name == system_name)
}

#[cfg(test)]
#[path = "extract_tests.rs"]
mod extract_tests;
