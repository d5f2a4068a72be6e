/* Analyze command - print extracted member models */

use super::common::load_declarations;
use anyhow::{Context, anyhow};
use clap::ValueEnum;
use proxy_gen::model::{self, SubjectModel};
use proxy_gen::config::resolve_options;
use proxy_gen::{ConfigFile, Diagnostic, GenerationOutput, GeneratorOptions, generate};
use serde_derive::Serialize;
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModelOutputFormat {
  Json,
  Yaml,
}

/* Serialized analysis: every model plus the diagnostics that replace unsupported subjects */
#[derive(Serialize)]
struct AnalysisReport<'a> {
  models: &'a [SubjectModel],
  diagnostics: Vec<Diagnostic>,
}

/* Execute the analyze command */
pub fn run(
  files: Vec<PathBuf>,
  include_dirs: Vec<PathBuf>,
  format: ModelOutputFormat,
  print_proxy: Option<String>,
  config: Option<PathBuf>,
) -> anyhow::Result<()> {
  println!("Proxy Generator - Member Model Analysis");
  println!("=======================================\n");

  let resolver = load_declarations(&files, &include_dirs, true)?;

  let models: Vec<SubjectModel> = resolver.subjects().into_iter().map(model::extract).collect();
  for model in &models {
    let status = if model.is_supported() { "[✓]" } else { "[✗]" };
    println!(
      "{} {}: {} propert(ies), {} method(s)",
      status,
      model.subject.reference,
      model.properties.len(),
      model.methods.len()
    );
  }
  println!();

  let report = AnalysisReport {
    models: &models,
    diagnostics: models
      .iter()
      .filter(|model| !model.is_supported())
      .map(|model| Diagnostic::unsupported_static_type(&model.subject))
      .collect(),
  };
  print_report(&report, format)?;

  if let Some(name) = print_proxy.as_deref() {
    /* Preview with the same options generate would use */
    let config = config.as_deref().map(ConfigFile::load).transpose()?;
    let options = resolve_options(config.as_ref(), false)?;
    print_proxy_preview(name, &models, &options)?;
  }

  Ok(())
}

fn print_report(report: &AnalysisReport<'_>, format: ModelOutputFormat) -> anyhow::Result<()> {
  match format {
    ModelOutputFormat::Json => {
      println!("[~] Member Models (JSON)");
      println!("========================");
      let json = serde_json::to_string_pretty(report).context("failed to serialize member models")?;
      println!("{}", json);
    }
    ModelOutputFormat::Yaml => {
      println!("[~] Member Models (YAML)");
      println!("========================");
      let yaml = serde_yml::to_string(report).context("failed to serialize member models")?;
      println!("{}", yaml);
    }
  }
  println!();
  Ok(())
}

fn print_proxy_preview(name: &str, models: &[SubjectModel], options: &GeneratorOptions) -> anyhow::Result<()> {
  let model = models
    .iter()
    .find(|model| model.subject.name == name || model.subject.reference == name)
    .ok_or_else(|| anyhow!("subject '{}' not found", name))?;

  match generate(model, options) {
    GenerationOutput::Source(source) => {
      println!("[~] {}", source.hint_name);
      println!("==============================");
      print!("{}", source.text);
    }
    GenerationOutput::Diagnostic(diagnostic) => {
      println!("[✗] {}", diagnostic);
    }
    GenerationOutput::Skipped { subject, kind } => {
      println!("[~] {} is a {:?}; only classes and records get a proxy", subject, kind);
    }
  }
  Ok(())
}
