//! Render CLI: the stand-in for the host's print/download facility.
//!
//! Usage: `examcraft <exam.json> [student|teacher|both] [out_dir]`
//! Reads a (possibly loosely-shaped) exam record, normalizes it, and writes
//! the requested paper copies next to the input or into `out_dir`, named by
//! the `{title}_{Grade}_{Copy}.html` contract.

use std::path::{Path, PathBuf};

use anyhow::Context;

use examcraft::core::{config::Settings, telemetry};
use examcraft::services::documents::{self, CopyType};
use examcraft::services::normalize::normalize_display;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    telemetry::init_tracing(&settings)?;

    let mut args = std::env::args().skip(1);
    let input = args.next().context("usage: examcraft <exam.json> [student|teacher|both] [out_dir]")?;
    let copy_arg = args.next().unwrap_or_else(|| "both".to_string());
    let out_dir = args.next().map(PathBuf::from);

    let copies: Vec<CopyType> = match copy_arg.to_ascii_lowercase().as_str() {
        "both" => vec![CopyType::Student, CopyType::Teacher],
        other => vec![other.parse().map_err(anyhow::Error::msg)?],
    };

    let raw = std::fs::read_to_string(&input).with_context(|| format!("reading {input}"))?;
    let value: serde_json::Value =
        serde_json::from_str(&raw).with_context(|| format!("parsing {input} as JSON"))?;
    let exam = normalize_display(&value);
    let school = settings.school_info();

    let target_dir = match out_dir {
        Some(dir) => dir,
        None => Path::new(&input).parent().unwrap_or_else(|| Path::new(".")).to_path_buf(),
    };

    for copy in copies {
        let html = documents::render(&exam, copy, &school);
        let filename = documents::document_filename(&exam, copy);
        let path = target_dir.join(&filename);
        std::fs::write(&path, html).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(file = %path.display(), copy = %copy, "Rendered exam paper");
    }

    Ok(())
}
