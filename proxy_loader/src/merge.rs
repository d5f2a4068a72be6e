use crate::error::LoadError;
use indexmap::IndexMap;
use proxy_types::SubjectDecl;
use tracing::debug;

/// Collects subject fragments and folds fragments of the same subject together.
///
/// Subjects are keyed by their fully qualified reference and keep the
/// position of their first fragment. Members of later fragments are
/// appended in arrival order; the per-member merge rules (such as the
/// read-only rule for properties) belong to extraction, not to loading.
#[derive(Debug, Default)]
pub struct SubjectMerger {
    subjects: IndexMap<String, SubjectDecl>,
}

impl SubjectMerger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, fragment: SubjectDecl) -> Result<(), LoadError> {
        let Some(existing) = self.subjects.get_mut(&fragment.reference) else {
            debug!(subject = %fragment.reference, "new subject");
            self.subjects.insert(fragment.reference.clone(), fragment);
            return Ok(());
        };

        debug!(
            subject = %fragment.reference,
            members = fragment.members.len(),
            "merging partial fragment"
        );

        if existing.generic_parameters != fragment.generic_parameters {
            return Err(LoadError::FragmentMismatch {
                reference: fragment.reference,
                what: "generic parameters",
                first: existing.generic_parameters.join(", "),
                second: fragment.generic_parameters.join(", "),
            });
        }
        if existing.kind != fragment.kind {
            return Err(LoadError::FragmentMismatch {
                reference: fragment.reference,
                what: "declaration kind",
                first: format!("{:?}", existing.kind),
                second: format!("{:?}", fragment.kind),
            });
        }

        /* A modifier written on any one fragment applies to the whole type */
        existing.is_static |= fragment.is_static;
        existing.is_ref_like |= fragment.is_ref_like;
        existing.is_unsafe |= fragment.is_unsafe;
        if existing.namespace.is_none() {
            existing.namespace = fragment.namespace;
        }
        if existing.location.is_none() {
            existing.location = fragment.location;
        }
        existing.members.extend(fragment.members);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    pub fn get(&self, reference: &str) -> Option<&SubjectDecl> {
        self.subjects.get(reference)
    }

    /* Merged subjects in order of first appearance */
    pub fn subjects(&self) -> impl Iterator<Item = &SubjectDecl> {
        self.subjects.values()
    }

    pub fn into_subjects(self) -> Vec<SubjectDecl> {
        self.subjects.into_values().collect()
    }
}
