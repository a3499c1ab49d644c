use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use serde::Deserialize;

use drillkit::{
    init_logging, load_tool_table, DrillPoint, DrillPointRecord, JobPipeline, PipelineConfig,
    ToolTable, Workpiece, WorkpieceRecord,
};

/// One extracted drilling job, as written by the CAD extractor.
#[derive(Debug, Deserialize)]
struct JobFile {
    workpiece: WorkpieceRecord,
    drill_points: Vec<DrillPointRecord>,
    #[serde(default)]
    config: PipelineConfig,
}

struct Args {
    job_path: PathBuf,
    tools_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
}

const USAGE: &str = "Usage: drillkit <job.json> [--tools <tool-data.json>] [--output <report.json>]";

fn parse_args() -> anyhow::Result<Option<Args>> {
    let mut job_path = None;
    let mut tools_path = None;
    let mut output_path = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--tools" => {
                tools_path = Some(PathBuf::from(
                    args.next().context("--tools requires a path")?,
                ));
            }
            "--output" => {
                output_path = Some(PathBuf::from(
                    args.next().context("--output requires a path")?,
                ));
            }
            "--version" => {
                println!(
                    "drillkit {} (built {})",
                    env!("CARGO_PKG_VERSION"),
                    env!("BUILD_DATE")
                );
                return Ok(None);
            }
            "--help" | "-h" => {
                println!("{USAGE}");
                return Ok(None);
            }
            other if job_path.is_none() && !other.starts_with('-') => {
                job_path = Some(PathBuf::from(other));
            }
            other => bail!("Unexpected argument: {other}\n{USAGE}"),
        }
    }

    match job_path {
        Some(job_path) => Ok(Some(Args {
            job_path,
            tools_path,
            output_path,
        })),
        None => bail!("{USAGE}"),
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let contents = fs::read_to_string(&args.job_path)
        .with_context(|| format!("Failed to read job file {}", args.job_path.display()))?;
    let job: JobFile = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse job file {}", args.job_path.display()))?;

    let workpiece = Workpiece::from_record(job.workpiece)?;
    let points: Vec<DrillPoint> = job.drill_points.into_iter().map(Into::into).collect();

    let table: Option<ToolTable> = args
        .tools_path
        .as_ref()
        .map(load_tool_table)
        .transpose()
        .context("Failed to load tool table")?;

    let pipeline = JobPipeline::new(job.config);
    let outcome = pipeline.run(workpiece, points, table.as_ref())?;

    eprintln!("{}", outcome.report.summary());

    let json = serde_json::to_string_pretty(&outcome)?;
    match args.output_path {
        Some(path) => {
            fs::write(&path, json)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            eprintln!("Report written to {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging()?;

    match parse_args()? {
        Some(args) => run(args),
        None => Ok(()),
    }
}
