use proxy_types::SubjectDecl;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::LoadError;
use crate::file::DeclarationFile;
use crate::merge::SubjectMerger;

/* Resolver for loading manifests, following their imports and merging fragments */
pub struct DeclarationResolver {
    /* Track loaded files to skip duplicates and break import cycles */
    loaded_files: HashSet<PathBuf>,

    /* Include directories for searching imports */
    include_dirs: Vec<PathBuf>,

    /* All loaded manifests, in load order */
    all_files: Vec<DeclarationFile>,

    /* Subjects merged across every loaded manifest */
    merger: SubjectMerger,
}

impl DeclarationResolver {
    /* Create a new resolver with the given include directories */
    pub fn new(include_dirs: Vec<PathBuf>) -> Self {
        Self {
            loaded_files: HashSet::new(),
            include_dirs,
            all_files: Vec::new(),
            merger: SubjectMerger::new(),
        }
    }

    /* Resolve an import path relative to the importing file or the include directories */
    fn resolve_import_path(&self, import_path: &str, base_file: &Path) -> Result<PathBuf, LoadError> {
        let candidates = base_file
            .parent()
            .map(|parent| parent.join(import_path))
            .into_iter()
            .chain(self.include_dirs.iter().map(|dir| dir.join(import_path)));

        for candidate in candidates {
            if candidate.exists() {
                return candidate.canonicalize().map_err(|source| LoadError::Io {
                    path: candidate.clone(),
                    source,
                });
            }
        }

        Err(LoadError::ImportNotFound {
            import: import_path.to_string(),
            importer: base_file.to_path_buf(),
        })
    }

    /* Load a manifest and recursively load its imports */
    pub fn load_file_with_imports(&mut self, file_path: &Path) -> Result<(), LoadError> {
        let canonical_path = file_path.canonicalize().map_err(|source| LoadError::Io {
            path: file_path.to_path_buf(),
            source,
        })?;

        if self.loaded_files.contains(&canonical_path) {
            debug!(file = %file_path.display(), "skipping already loaded manifest");
            return Ok(());
        }

        /* Mark as loaded before processing imports so cycles terminate */
        self.loaded_files.insert(canonical_path.clone());

        info!(file = %file_path.display(), "loading declaration manifest");
        let contents = std::fs::read_to_string(file_path).map_err(|source| LoadError::Io {
            path: file_path.to_path_buf(),
            source,
        })?;
        let file = DeclarationFile::from_yaml(&contents).map_err(|source| LoadError::Parse {
            origin: file_path.display().to_string(),
            source,
        })?;

        debug!(
            assembly = file.assembly(),
            subjects = file.subjects().len(),
            imports = file.imports().len(),
            "parsed manifest"
        );

        for import in file.imports() {
            debug!(import = %import.path, "resolving path import");
            let import_path = self.resolve_import_path(&import.path, &canonical_path)?;
            self.load_file_with_imports(&import_path)?;
        }

        self.register(file)
    }

    /* Load a manifest held in memory; imports are resolved against the include directories */
    pub fn load_str(&mut self, origin: &str, contents: &str) -> Result<(), LoadError> {
        let file = DeclarationFile::from_yaml(contents).map_err(|source| LoadError::Parse {
            origin: origin.to_string(),
            source,
        })?;

        for import in file.imports() {
            let import_path = self.resolve_import_path(&import.path, Path::new(""))?;
            self.load_file_with_imports(&import_path)?;
        }

        self.register(file)
    }

    fn register(&mut self, file: DeclarationFile) -> Result<(), LoadError> {
        for subject in file.subjects() {
            self.merger.add(subject.clone())?;
        }
        self.all_files.push(file);
        Ok(())
    }

    /* Get all loaded manifests */
    pub fn get_all_files(&self) -> &[DeclarationFile] {
        &self.all_files
    }

    /* Get the number of loaded files (in-memory manifests are not counted) */
    pub fn loaded_file_count(&self) -> usize {
        self.loaded_files.len()
    }

    /* Merged subjects in first-appearance order */
    pub fn subjects(&self) -> Vec<&SubjectDecl> {
        self.merger.subjects().collect()
    }

    pub fn into_subjects(self) -> Vec<SubjectDecl> {
        self.merger.into_subjects()
    }

    /* Look up a merged subject by its simple name or its fully qualified reference */
    pub fn find_subject(&self, name: &str) -> Option<&SubjectDecl> {
        self.merger
            .get(name)
            .or_else(|| self.merger.subjects().find(|subject| subject.name == name))
    }

    /* Get all assemblies that contributed subjects */
    pub fn get_assemblies(&self) -> Vec<String> {
        let mut assemblies: Vec<String> =
            self.all_files.iter().map(|file| file.assembly().to_string()).collect();
        assemblies.sort();
        assemblies.dedup();
        assemblies
    }
}
