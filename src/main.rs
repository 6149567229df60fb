use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use jsonld_audit::{extract, flatten, repair};
use serde::Serialize;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "jsonld-audit")]
#[command(about = "Extract, repair, and flatten LLM-proposed JSON-LD", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Turn a saved LLM response into a structured audit report.
    Audit {
        /// Raw LLM response text file.
        #[arg(long)]
        response: String,

        #[arg(short = 'o', long)]
        out: String,
    },
}

/// Report shape written to disk; field names are the report's public API.
#[derive(Serialize)]
struct AuditReport {
    page_intent: String,
    visibility_diagnosis: String,
    fix_plan: String,
    json_ld: Option<serde_json::Value>,
    json_ld_corrections: Vec<repair::Correction>,
    suggested_concepts: Vec<String>,
    flattened_schema: String,
    best_practices: &'static str,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Audit { response, out } => {
            // 1) Read the raw model output.
            let text = std::fs::read_to_string(&response)
                .with_context(|| format!("read response file {}", response))?;
            if text.trim().is_empty() {
                bail!("response file {} is empty", response);
            }

            // 2) Cut out the prose sections and locate the fenced payloads.
            let sections = extract::extract_sections(&text);
            let document = extract::find_jsonld(&text);
            let suggested_concepts = extract::suggested_concepts(&text);

            // 3) Repair whatever JSON-LD was found, then flatten it.
            let (json_ld, corrections, flattened) = match &document {
                Some(doc) => {
                    let (repaired, corrections) = repair::run_pipeline(doc);
                    let flattened = flatten::flatten_graph(&repaired);
                    (Some(repaired), corrections, flattened)
                }
                None => (None, Vec::new(), String::new()),
            };

            // 4) Write one JSON report.
            let report = AuditReport {
                page_intent: sections.page_intent,
                visibility_diagnosis: sections.visibility_diagnosis,
                fix_plan: sections.fix_plan,
                json_ld,
                json_ld_corrections: corrections,
                suggested_concepts,
                flattened_schema: flattened,
                best_practices: flatten::BEST_PRACTICES,
            };
            std::fs::write(&out, serde_json::to_string_pretty(&report)?)
                .with_context(|| format!("write report {}", out))?;
            println!("Wrote {}", out);
        }
    }

    Ok(())
}
