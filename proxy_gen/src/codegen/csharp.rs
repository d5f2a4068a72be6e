use super::ProxyUnit;
use super::writer::CodeWriter;
use crate::model::{MethodDescriptor, Modifiers, ParameterDescriptor, PropertyDescriptor};

const UNSAFE_ACCESSOR: &str = "global::System.Runtime.CompilerServices.UnsafeAccessor";
const ACCESSOR_KIND_METHOD: &str = "global::System.Runtime.CompilerServices.UnsafeAccessorKind.Method";
const ACCESSOR_KIND_STATIC_METHOD: &str =
    "global::System.Runtime.CompilerServices.UnsafeAccessorKind.StaticMethod";
const GUARD: &str = "ThrowInvalidOperationIfNotInitialized";
const BACKING_FIELD: &str = "_target";
const STATIC_TARGET: &str = "null!";

/* C# reserved keywords that need to be escaped with @ */
const CSHARP_KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked", "class",
    "const", "continue", "decimal", "default", "delegate", "do", "double", "else", "enum", "event",
    "explicit", "extern", "false", "finally", "fixed", "float", "for", "foreach", "goto", "if",
    "implicit", "in", "int", "interface", "internal", "is", "lock", "long", "namespace", "new",
    "null", "object", "operator", "out", "override", "params", "private", "protected", "public",
    "readonly", "ref", "return", "sbyte", "sealed", "short", "sizeof", "stackalloc", "static",
    "string", "struct", "switch", "this", "throw", "true", "try", "typeof", "uint", "ulong",
    "unchecked", "unsafe", "ushort", "using", "virtual", "void", "volatile", "while",
];

/* Escape C# keywords by prefixing with @ */
pub fn escape_csharp_keyword(name: &str) -> String {
    if CSHARP_KEYWORDS.contains(&name) {
        format!("@{}", name)
    } else {
        name.to_string()
    }
}

/// Renders the companion type for `unit` as C# source text.
///
/// Output depends only on `unit`: the same unit always renders to the same bytes.
pub fn emit_proxy(unit: &ProxyUnit<'_>) -> String {
    let mut writer = CodeWriter::new();

    match unit.namespace {
        Some(namespace) => {
            writer.write_line(&format!("namespace {}", namespace));
            writer.block(|w| write_type(w, unit));
        }
        None => write_type(&mut writer, unit),
    }

    writer.finish()
}

fn write_type(writer: &mut CodeWriter, unit: &ProxyUnit<'_>) {
    write_declaration(writer, &unit.name, "struct", unit.modifiers);
    if !unit.generic_parameters.is_empty() {
        writer.write("<");
        writer.write(&unit.generic_parameters.join(", "));
        writer.write(">");
    }
    writer.end_line();

    writer.block(|w| {
        write_instance_members(w, unit);

        for property in unit.properties {
            write_property(w, unit.target_type, property);
            w.blank_line();
        }

        for method in unit.methods {
            write_method(w, unit.target_type, method);
            w.blank_line();
        }

        if unit.implicit_conversion && !unit.modifiers.contains(Modifiers::STATIC) {
            w.write_line(&format!(
                "public static implicit operator {}({} target) => new {}(target);",
                unit.declared_name(),
                unit.target_type,
                unit.declared_name()
            ));
            w.blank_line();
        }
    });
}

/* Backing field, null-rejecting constructor and the validity guard */
fn write_instance_members(writer: &mut CodeWriter, unit: &ProxyUnit<'_>) {
    if unit.modifiers.contains(Modifiers::STATIC) {
        return;
    }

    writer.write_line(&format!("private readonly {} {};", unit.target_type, BACKING_FIELD));
    writer.blank_line();

    writer.write_line(&format!("public {}({} target)", unit.name, unit.target_type));
    writer.block(|w| {
        w.write_line(&format!(
            "{} = target ?? throw new global::System.ArgumentNullException(nameof(target));",
            BACKING_FIELD
        ));
    });
    writer.blank_line();

    writer.write_line(&format!("private readonly void {}()", GUARD));
    writer.block(|w| {
        w.write_line(&format!("if ({} is null)", BACKING_FIELD));
        w.block(|w| {
            w.write_line(&format!(
                "throw new global::System.InvalidOperationException(\"Proxy for '{}' is uninitialized\");",
                unit.subject_display
            ));
        });
    });
    writer.blank_line();
}

/* Writes `public <modifiers><type> <name>` without a line terminator */
fn write_declaration(writer: &mut CodeWriter, name: &str, type_name: &str, modifiers: Modifiers) {
    writer.write("public ");
    if modifiers.contains(Modifiers::STATIC) {
        writer.write("static ");
    }
    if modifiers.contains(Modifiers::OVERRIDE) {
        writer.write("override ");
    }
    if modifiers.contains(Modifiers::READ_ONLY) {
        writer.write("readonly ");
    }
    if modifiers.contains(Modifiers::UNSAFE) {
        writer.write("unsafe ");
    }
    if modifiers.contains(Modifiers::REF_STRUCT) {
        writer.write("ref ");
    }
    if modifiers.contains(Modifiers::PARTIAL) {
        writer.write("partial ");
    }
    if modifiers.contains(Modifiers::REF) {
        writer.write("ref ");
    }
    if modifiers.contains(Modifiers::REF_READ_ONLY) {
        writer.write("ref readonly ");
    }
    writer.write(type_name);
    writer.write(" ");
    writer.write(name);
}

fn accessor_attribute(is_static: bool, member_name: &str) -> String {
    let kind = if is_static {
        ACCESSOR_KIND_STATIC_METHOD
    } else {
        ACCESSOR_KIND_METHOD
    };
    format!("[{}({}, Name = \"{}\")]", UNSAFE_ACCESSOR, kind, member_name)
}

pub fn write_property(writer: &mut CodeWriter, target_type: &str, property: &PropertyDescriptor) {
    let is_static = property.is_static();
    let target = if is_static { STATIC_TARGET } else { BACKING_FIELD };

    /* READ_ONLY on the descriptor means "no setter"; on the declaration it marks a readonly instance member */
    let mut modifiers = property.modifiers - Modifiers::READ_ONLY;
    modifiers.set(Modifiers::READ_ONLY, !is_static);

    write_declaration(
        writer,
        &escape_csharp_keyword(&property.name),
        &property.type_name,
        modifiers,
    );
    writer.end_line();

    writer.block(|w| {
        w.write_line("get");
        w.block(|w| {
            if !is_static {
                w.write_line(&format!("{}();", GUARD));
            }
            w.write_line(&format!("return Get{}({});", property.name, target));
            w.blank_line();
            w.write_line(&accessor_attribute(is_static, &format!("get_{}", property.name)));
            w.write_line(&format!(
                "extern static {} Get{}({} target);",
                property.type_name, property.name, target_type
            ));
        });

        if !property.is_read_only() {
            w.blank_line();
            w.write_line("set");
            w.block(|w| {
                if !is_static {
                    w.write_line(&format!("{}();", GUARD));
                }
                w.write_line(&format!("Set{}({}, value);", property.name, target));
                w.blank_line();
                w.write_line(&accessor_attribute(is_static, &format!("set_{}", property.name)));
                w.write_line(&format!(
                    "extern static void Set{}({} target, {} value);",
                    property.name, target_type, property.type_name
                ));
            });
        }
    });
}

pub fn write_method(writer: &mut CodeWriter, target_type: &str, method: &MethodDescriptor) {
    let is_static = method.is_static();
    let type_parameters = type_parameter_list(method);
    let constraints = constraint_clauses(method);

    /* A parameter named like the backing field shadows it inside the body */
    let target = if is_static {
        STATIC_TARGET.to_string()
    } else if method.parameters.iter().any(|p| p.name == BACKING_FIELD) {
        format!("this.{}", BACKING_FIELD)
    } else {
        BACKING_FIELD.to_string()
    };
    let receiver = receiver_parameter_name(&method.parameters);

    write_declaration(
        writer,
        &format!("{}{}", escape_csharp_keyword(&method.name), type_parameters),
        &method.return_type,
        method.modifiers,
    );
    writer.write("(");
    write_parameters(writer, &method.parameters, false);
    writer.write(")");
    writer.write(&constraints);
    writer.end_line();

    writer.block(|w| {
        if !is_static {
            w.write_line(&format!("{}();", GUARD));
        }
        if method.returns_by_ref() {
            w.write("return ref ");
        } else if !method.returns_void() {
            w.write("return ");
        }
        w.write(&format!("Call{}{}({}", method.name, type_parameters, target));
        write_arguments(w, &method.parameters, true);
        w.write(");");
        w.end_line();
        w.blank_line();

        w.write_line(&accessor_attribute(is_static, &method.name));
        w.write("extern static ");
        if method.modifiers.contains(Modifiers::REF) {
            w.write("ref ");
        }
        if method.modifiers.contains(Modifiers::REF_READ_ONLY) {
            w.write("ref readonly ");
        }
        w.write(&format!(
            "{} Call{}{}({} {}",
            method.return_type, method.name, type_parameters, target_type, receiver
        ));
        write_parameters(w, &method.parameters, true);
        w.write(")");
        w.write(&constraints);
        w.write(";");
        w.end_line();
    });
}

/* Name for the accessor's receiver parameter that no forwarded parameter already uses */
fn receiver_parameter_name(parameters: &[ParameterDescriptor]) -> String {
    let mut name = String::from("target");
    while parameters.iter().any(|p| p.name == name) {
        name.push('_');
    }
    name
}

fn type_parameter_list(method: &MethodDescriptor) -> String {
    if method.type_parameters.is_empty() {
        return String::new();
    }
    let names: Vec<&str> = method
        .type_parameters
        .iter()
        .map(|tp| tp.name.as_str())
        .collect();
    format!("<{}>", names.join(", "))
}

fn constraint_clauses(method: &MethodDescriptor) -> String {
    method
        .type_parameters
        .iter()
        .filter(|tp| !tp.constraints.is_empty())
        .map(|tp| format!(" where {} : {}", tp.name, tp.constraints.join(", ")))
        .collect()
}

pub fn write_parameters(writer: &mut CodeWriter, parameters: &[ParameterDescriptor], prepend_comma: bool) {
    let mut is_first = !prepend_comma;
    for parameter in parameters {
        if !is_first {
            writer.write(", ");
        } else {
            is_first = false;
        }
        writer.write(parameter.passing.parameter_keyword());
        writer.write(&parameter.type_name);
        writer.write(" ");
        writer.write(&escape_csharp_keyword(&parameter.name));
    }
}

pub fn write_arguments(writer: &mut CodeWriter, parameters: &[ParameterDescriptor], prepend_comma: bool) {
    let mut is_first = !prepend_comma;
    for parameter in parameters {
        if !is_first {
            writer.write(", ");
        } else {
            is_first = false;
        }
        writer.write(parameter.passing.argument_keyword());
        writer.write(&escape_csharp_keyword(&parameter.name));
    }
}
