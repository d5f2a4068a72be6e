/* Generate command - write proxy sources for every declared subject */

use super::common::load_declarations;
use proxy_gen::config::resolve_options;
use proxy_gen::{ConfigFile, ProxyCache, generate_subjects, write_sources};
use std::path::PathBuf;
use tracing::info;

const DEFAULT_OUTPUT_DIR: &str = "generated";

pub struct GenerateArgs {
  pub files: Vec<PathBuf>,
  pub include_dirs: Vec<PathBuf>,
  pub output_dir: Option<PathBuf>,
  pub config: Option<PathBuf>,
  pub implicit_conversion: bool,
  pub verbose: bool,
}

/* Execute the generate command; returns false when any error diagnostic was reported */
pub fn run(args: GenerateArgs) -> anyhow::Result<bool> {
  /* Defaults, then the config file, then command-line flags */
  let config = args.config.as_deref().map(ConfigFile::load).transpose()?;
  let options = resolve_options(config.as_ref(), args.implicit_conversion)?;
  let output_dir = args
    .output_dir
    .clone()
    .or_else(|| config.as_ref().and_then(|config| config.output_dir.clone()))
    .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

  if args.verbose {
    println!("Proxy Generator - Code Generation Tool");
    println!("======================================\n");
    println!("[~] Configuration:");
    println!("  Output directory: {}", output_dir.display());
    println!("  Proxy suffix: {}", options.proxy_suffix);
    println!("  Implicit conversion: {}", options.implicit_conversion);
    println!("  Input files: {}", args.files.len());
    for file in &args.files {
      println!("    - {}", file.display());
    }
    println!();
  }

  let resolver = load_declarations(&args.files, &args.include_dirs, args.verbose)?;
  let subjects = resolver.subjects();
  if subjects.is_empty() {
    anyhow::bail!("no subjects declared in {} input file(s)", args.files.len());
  }

  let mut cache = ProxyCache::new();
  let report = generate_subjects(subjects, &options, &mut cache);

  for diagnostic in &report.diagnostics {
    eprintln!("{}", diagnostic);
  }
  for subject in &report.skipped {
    println!("[~] Skipped {} (only classes and records get a proxy)", subject);
  }

  let written = write_sources(&output_dir, &report.sources)?;
  info!(files = written.len(), diagnostics = report.diagnostics.len(), "generation finished");

  if args.verbose {
    for path in &written {
      println!("[✓] Generated {}", path.display());
    }
  }

  if report.has_errors() {
    println!(
      "[✗] Generated {} proxy file(s) with {} error(s)",
      written.len(),
      report.diagnostics.iter().filter(|d| d.is_error()).count()
    );
    return Ok(false);
  }

  println!("[✓] Generated {} proxy file(s) in {}", written.len(), output_dir.display());
  Ok(true)
}
