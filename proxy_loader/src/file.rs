use proxy_types::SubjectDecl;
use serde_derive::{Deserialize, Serialize};

/* Path import of another manifest, resolved relative to the importer first */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct ImportSource {
    pub path: String,
}

/* Metadata for a declaration manifest */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct ManifestMetadata {
    /* Assembly the subjects were declared in (e.g., "Contoso.Models") */
    pub assembly: String,

    /* Optional free-form description */
    #[serde(default)]
    pub description: Option<String>,

    /* Other manifests holding further subjects or partial fragments */
    #[serde(default)]
    pub imports: Vec<ImportSource>,
}

/* Complete manifest structure with metadata and subject declarations */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct DeclarationFile {
    /* Manifest metadata */
    pub manifest: ManifestMetadata,

    /* Subjects (or fragments of subjects) declared by this manifest */
    #[serde(default)]
    pub subjects: Vec<SubjectDecl>,
}

impl DeclarationFile {
    /* Parse a manifest from YAML text */
    pub fn from_yaml(contents: &str) -> Result<Self, serde_yml::Error> {
        serde_yml::from_str(contents)
    }

    pub fn assembly(&self) -> &str {
        &self.manifest.assembly
    }

    pub fn imports(&self) -> &[ImportSource] {
        &self.manifest.imports
    }

    pub fn subjects(&self) -> &[SubjectDecl] {
        &self.subjects
    }
}
