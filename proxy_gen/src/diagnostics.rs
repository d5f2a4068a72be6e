//! Reportable generator conditions.
//!
//! Member-level ineligibility is silent; the only reportable condition is
//! a subject shape the generator does not support yet.

use crate::model::TypeDescriptor;
use proxy_types::SourceLocation;
use serde_derive::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Hidden,
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Severity::Hidden => "hidden",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        f.write_str(text)
    }
}

/// Static description of a diagnostic kind.
///
/// `message_format` uses positional `{0}`, `{1}` placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticDescriptor {
    pub id: &'static str,
    pub title: &'static str,
    pub message_format: &'static str,
    pub category: &'static str,
    pub default_severity: Severity,
    pub enabled_by_default: bool,
}

pub const UNSUPPORTED_STATIC_TYPE: DiagnosticDescriptor = DiagnosticDescriptor {
    id: "RFL0001",
    title: "Unsupported Static Type",
    message_format: "Unsupported static type '{0}'. Static types will be supported from a future release onward.",
    category: "Usage",
    default_severity: Severity::Error,
    enabled_by_default: true,
};

impl DiagnosticDescriptor {
    /* Substitute positional arguments into the message format */
    pub fn format_message(&self, arguments: &[&str]) -> String {
        let mut message = self.message_format.to_string();
        for (index, argument) in arguments.iter().enumerate() {
            message = message.replace(&format!("{{{}}}", index), argument);
        }
        message
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub id: &'static str,
    pub title: &'static str,
    pub message: String,
    pub severity: Severity,
    pub category: &'static str,
    pub location: Option<SourceLocation>,
}

impl Diagnostic {
    pub fn new(descriptor: &DiagnosticDescriptor, location: Option<SourceLocation>, arguments: &[&str]) -> Self {
        Self {
            id: descriptor.id,
            title: descriptor.title,
            message: descriptor.format_message(arguments),
            severity: descriptor.default_severity,
            category: descriptor.category,
            location,
        }
    }

    pub fn unsupported_static_type(subject: &TypeDescriptor) -> Self {
        Self::new(&UNSUPPORTED_STATIC_TYPE, subject.location.clone(), &[&subject.name])
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(location) = &self.location {
            write!(f, "{}: ", location)?;
        }
        write!(f, "{} {}: {}", self.severity, self.id, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Modifiers;
    use proxy_types::DeclarationKind;

    fn static_subject(location: Option<SourceLocation>) -> TypeDescriptor {
        TypeDescriptor {
            name: "StaticClass".to_string(),
            namespace: Some("Test".to_string()),
            reference: "global::Test.StaticClass".to_string(),
            kind: DeclarationKind::Class,
            modifiers: Modifiers::STATIC | Modifiers::PARTIAL,
            generic_parameters: Vec::new(),
            location,
        }
    }

    #[test]
    fn unsupported_static_type_message() {
        let diagnostic = Diagnostic::unsupported_static_type(&static_subject(None));
        assert_eq!(diagnostic.id, "RFL0001");
        assert_eq!(diagnostic.severity, Severity::Error);
        assert_eq!(
            diagnostic.message,
            "Unsupported static type 'StaticClass'. Static types will be supported from a future release onward."
        );
        assert!(diagnostic.is_error());
    }

    #[test]
    fn display_includes_location_when_known() {
        let location = SourceLocation {
            path: "StaticClass.cs".to_string(),
            line: 3,
            column: 21,
        };
        let diagnostic = Diagnostic::unsupported_static_type(&static_subject(Some(location)));
        assert_eq!(
            diagnostic.to_string(),
            "StaticClass.cs(3,21): error RFL0001: Unsupported static type 'StaticClass'. Static types will be supported from a future release onward."
        );

        let without = Diagnostic::unsupported_static_type(&static_subject(None));
        assert!(without.to_string().starts_with("error RFL0001: "));
    }

    #[test]
    fn descriptor_metadata() {
        assert_eq!(UNSUPPORTED_STATIC_TYPE.title, "Unsupported Static Type");
        assert_eq!(UNSUPPORTED_STATIC_TYPE.category, "Usage");
        assert!(UNSUPPORTED_STATIC_TYPE.enabled_by_default);
    }
}
