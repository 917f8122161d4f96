mod config;
mod telemetry;

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use backlog_core::app::GenerationPlan;
use backlog_core::ports::IdAllocator;
use backlog_core::{GeneratorBuilder, GeneratorConfig, StoryRecord};
use clap::Parser;
use config::{CliArgs, Command};

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    telemetry::init_logging();

    let config = GeneratorConfig::try_from(&args)?;
    tracing::debug!(?config, "resolved configuration");

    match args.command {
        Command::Generate {
            input,
            dry_run,
            json,
        } => run_generate(config, &input, dry_run, json),
        Command::NextId => run_next_id(config),
    }
}

fn run_generate(config: GeneratorConfig, input: &Path, dry_run: bool, json: bool) -> anyhow::Result<()> {
    let records = load_records(input)?;
    let mut generator = GeneratorBuilder::new(config).build()?;

    if dry_run {
        let plan = generator.plan(records).context("planning stories")?;
        print_plan(&plan, json)?;
        return Ok(());
    }

    let report = generator
        .generate(records)
        .context("generating stories")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.summary());
    }
    Ok(())
}

fn run_next_id(config: GeneratorConfig) -> anyhow::Result<()> {
    let allocator = GeneratorBuilder::new(config).build_allocator()?;
    let id = allocator.next_id().context("scanning stories directory")?;
    println!("{id}");
    Ok(())
}

/// Reads a JSON array of story records from a file, or stdin for `-`.
fn load_records(input: &Path) -> anyhow::Result<Vec<StoryRecord>> {
    let json = if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading story records from stdin")?;
        buf
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("reading story records from {}", input.display()))?
    };

    serde_json::from_str(&json)
        .with_context(|| format!("parsing story records from {}", input.display()))
}

fn print_plan(plan: &GenerationPlan, json: bool) -> anyhow::Result<()> {
    if json {
        let docs: Vec<_> = plan
            .documents
            .iter()
            .map(|doc| {
                serde_json::json!({
                    "key": doc.story.key(),
                    "file_name": doc.file_name,
                    "record": doc.story.record,
                    "body": doc.body,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&docs)?);
        return Ok(());
    }

    for doc in &plan.documents {
        println!("==> {} <==", doc.file_name);
        print!("{}", doc.body);
        println!();
    }
    println!("Would generate {} stories.", plan.len());
    Ok(())
}
