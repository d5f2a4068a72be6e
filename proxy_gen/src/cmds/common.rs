/* Common utilities shared between analyze and generate commands */

use proxy_loader::DeclarationResolver;
use std::path::PathBuf;

/* Load every input manifest together with its imports */
pub fn load_declarations(
  files: &[PathBuf],
  include_dirs: &[PathBuf],
  verbose: bool,
) -> anyhow::Result<DeclarationResolver> {
  let mut resolver = DeclarationResolver::new(include_dirs.to_vec());

  if verbose {
    println!("[~] Loading declaration manifests and resolving imports...");
    if !include_dirs.is_empty() {
      println!("    Include directories:");
      for dir in include_dirs {
        println!("      - {}", dir.display());
      }
    }
    println!();
  }

  for file in files {
    resolver.load_file_with_imports(file)?;
  }

  if verbose {
    println!("[~] Loaded {} file(s) total (including imports)", resolver.loaded_file_count());
    println!("[~] Assemblies loaded:");
    for assembly in resolver.get_assemblies() {
      println!("    - {}", assembly);
    }
    println!("[~] Subjects:");
    for subject in resolver.subjects() {
      println!("    - {}", subject.reference);
    }
    println!();
  }

  Ok(resolver)
}
