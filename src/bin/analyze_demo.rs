//! Demo that runs one resume through the matching pipeline and prints the
//! result JSON. With no `config/ai.json` present the deterministic fallback
//! path runs end to end, so this works offline.
//!
//! Usage: analyze-demo <resume.txt> [job.json]

use anyhow::{Context, Result};
use resume_matcher::{Analyzer, JobRequirement};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_target(false).init();

    let mut args = std::env::args().skip(1);
    let resume_path = args
        .next()
        .context("usage: analyze-demo <resume.txt> [job.json]")?;
    let resume_text = std::fs::read_to_string(&resume_path)
        .with_context(|| format!("reading resume text from {resume_path}"))?;

    let job: Option<JobRequirement> = match args.next() {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading job profile from {path}"))?;
            Some(serde_json::from_str(&raw).context("parsing job profile JSON")?)
        }
        None => None,
    };

    let analyzer = Analyzer::from_config_files();
    let result = analyzer.analyze(&resume_text, job.as_ref()).await;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
