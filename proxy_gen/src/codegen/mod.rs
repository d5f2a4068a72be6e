pub mod csharp;
pub mod writer;

use crate::cache::ProxyCache;
use crate::config::GeneratorOptions;
use crate::diagnostics::Diagnostic;
use crate::error::OutputError;
use crate::model::{self, MethodDescriptor, Modifiers, PropertyDescriptor, SubjectModel};
use proxy_types::{DeclarationKind, SubjectDecl};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Emitter input for one supported subject.
///
/// Borrows everything from the [`SubjectModel`] it was built from; only
/// the companion name is computed.
#[derive(Debug, Clone)]
pub struct ProxyUnit<'a> {
    /// Companion type name without generic parameters, e.g. `UserProxy`.
    pub name: String,
    pub namespace: Option<&'a str>,
    /// Fully qualified subject reference used for the field and receiver parameters.
    pub target_type: &'a str,
    /// Subject reference as shown in the runtime guard message.
    pub subject_display: &'a str,
    pub modifiers: Modifiers,
    pub generic_parameters: &'a [String],
    pub properties: &'a [PropertyDescriptor],
    pub methods: &'a [MethodDescriptor],
    pub implicit_conversion: bool,
}

impl<'a> ProxyUnit<'a> {
    pub fn new(model: &'a SubjectModel, options: &GeneratorOptions) -> Self {
        let subject = &model.subject;
        Self {
            name: format!("{}{}", subject.name, options.proxy_suffix),
            namespace: subject.namespace.as_deref(),
            target_type: &subject.reference,
            subject_display: subject.display_reference(),
            modifiers: subject.modifiers,
            generic_parameters: &subject.generic_parameters,
            properties: &model.properties,
            methods: &model.methods,
            implicit_conversion: options.implicit_conversion,
        }
    }

    /* Name as written where the companion is used as a type, e.g. `GenericClassProxy<T>` */
    pub fn declared_name(&self) -> String {
        if self.generic_parameters.is_empty() {
            self.name.clone()
        } else {
            format!("{}<{}>", self.name, self.generic_parameters.join(", "))
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.g.cs", self.name)
    }
}

/// One named source artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSource {
    /// Reference of the subject the text was generated for.
    pub subject: String,
    pub hint_name: String,
    pub text: String,
}

/// Result of generating a single subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutput {
    Source(GeneratedSource),
    /// The subject is unsupported and reported instead of generated.
    Diagnostic(Diagnostic),
    /// The subject is not a class or record; nothing is emitted for it.
    Skipped { subject: String, kind: DeclarationKind },
}

/// Generates the companion for one extracted subject.
///
/// A static subject yields `RFL0001` and no text. Struct, record struct
/// and interface subjects are skipped.
pub fn generate(model: &SubjectModel, options: &GeneratorOptions) -> GenerationOutput {
    if !model.is_supported() {
        return GenerationOutput::Diagnostic(Diagnostic::unsupported_static_type(&model.subject));
    }

    if !model.is_emitted() {
        return GenerationOutput::Skipped {
            subject: model.subject.reference.clone(),
            kind: model.subject.kind,
        };
    }

    let unit = ProxyUnit::new(model, options);
    GenerationOutput::Source(GeneratedSource {
        subject: model.subject.reference.clone(),
        hint_name: unit.file_name(),
        text: csharp::emit_proxy(&unit),
    })
}

/// Aggregated result of a multi-subject run.
#[derive(Debug, Default, Clone)]
pub struct GenerationReport {
    pub sources: Vec<GeneratedSource>,
    pub diagnostics: Vec<Diagnostic>,
    /* References of subjects that were neither generated nor reported */
    pub skipped: Vec<String>,
}

impl GenerationReport {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/* Extract and generate every subject; one subject's diagnostic never blocks the others */
pub fn generate_subjects<'a>(
    subjects: impl IntoIterator<Item = &'a SubjectDecl>,
    options: &GeneratorOptions,
    cache: &mut ProxyCache,
) -> GenerationReport {
    let mut report = GenerationReport::default();

    for decl in subjects {
        let model = model::extract(decl);
        match cache.get_or_generate(&model, options) {
            GenerationOutput::Source(source) => {
                debug!(subject = %decl.reference, file = %source.hint_name, "generated proxy");
                report.sources.push(source);
            }
            GenerationOutput::Diagnostic(diagnostic) => {
                debug!(subject = %decl.reference, id = diagnostic.id, "subject not supported");
                report.diagnostics.push(diagnostic);
            }
            GenerationOutput::Skipped { subject, kind } => {
                warn!(subject = %subject, kind = ?kind, "only class and record subjects get a proxy");
                report.skipped.push(subject);
            }
        }
    }

    report
}

/// Writes each source into `output_dir`, creating the directory if needed.
///
/// Fails before writing anything when two sources share a hint name.
pub fn write_sources(output_dir: &Path, sources: &[GeneratedSource]) -> Result<Vec<PathBuf>, OutputError> {
    check_unique_hint_names(sources)?;

    std::fs::create_dir_all(output_dir).map_err(|source| OutputError::CreateDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(sources.len());
    for generated in sources {
        let path = output_dir.join(&generated.hint_name);
        std::fs::write(&path, &generated.text).map_err(|source| OutputError::Write {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), "wrote generated source");
        written.push(path);
    }

    Ok(written)
}

/* Subjects with the same simple name in different namespaces would overwrite each other */
fn check_unique_hint_names(sources: &[GeneratedSource]) -> Result<(), OutputError> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for generated in sources {
        if let Some(first) = seen.insert(&generated.hint_name, &generated.subject) {
            return Err(OutputError::DuplicateHintName {
                hint_name: generated.hint_name.clone(),
                first: first.to_string(),
                second: generated.subject.clone(),
            });
        }
    }
    Ok(())
}
