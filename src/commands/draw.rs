use super::display::{print_status, print_table};
use super::{require_quota, InputArgs};
use colored::*;
use fair_draw::draw::{prepare, DrawResult, RandomShuffler, Severity};
use fair_draw::formats::delimited::write_csv;
use fair_draw::metrics::{Stage, StageTimer};
use fair_draw::reports::{DrawContext, DrawReport, InputFile};
use fair_draw::util::write_serialized;
use std::error::Error;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct DrawArgs {
    pub inputs: InputArgs,
    /// Winners CSV; defaults to `winners_YYYYMMDD.csv` in the working directory.
    pub output: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub timings: bool,
}

pub fn draw(args: &DrawArgs) -> Result<Severity, Box<dyn Error>> {
    let config = args.inputs.resolve_config()?;
    let quota = require_quota(&config)?;
    let mut timer = StageTimer::new();

    println!(
        "🎲 Drawing {} {} from {}",
        quota.to_string().bright_yellow(),
        if config.group_column.is_some() {
            "winners per group"
        } else {
            "winners"
        },
        args.inputs.registrations.display().to_string().bright_cyan()
    );

    timer.start(Stage::Loading);
    let (registrations, previous_winners) = args.inputs.load_tables()?;
    timer.end(
        Stage::Loading,
        Some((registrations.len() + previous_winners.len()) as u64),
    );

    timer.start(Stage::Validation);
    let prepared = prepare(
        &registrations,
        &previous_winners,
        &config.name_column,
        config.group_column.as_deref(),
        quota,
        &config.pinned,
    )?;
    timer.end(Stage::Validation, Some(prepared.registrants.len() as u64));

    let mut shuffler = match config.seed {
        Some(seed) => RandomShuffler::from_seed(seed),
        None => RandomShuffler::fresh(),
    };
    info!(seed = shuffler.seed(), "shuffler ready");

    timer.start(Stage::Drawing);
    let result = prepared.run(&mut shuffler)?;
    timer.end(Stage::Drawing, Some(result.winners().len() as u64));

    println!("\n{}", "🎉 Draw Results".bright_green().bold());
    println!("{}", "=".repeat(50).bright_green());
    if let DrawResult::Grouped(grouped) = &result {
        for group in &grouped.groups {
            let label = if group.group.is_empty() {
                "(no group)".to_string()
            } else {
                group.group.clone()
            };
            print_status(
                group.severity(),
                &format!("[{}] {}", label.bold(), group.message()),
            );
        }
        println!("{}", "-".repeat(50).bright_green());
    }
    print_status(result.severity(), &result.message());
    println!(
        "{}: {}",
        "Seed".bright_white().bold(),
        shuffler.seed().to_string().bright_yellow()
    );

    let winners = result.winners();
    if winners.is_empty() {
        println!("No winners to export.");
    } else {
        println!();
        print_table(winners);

        let output = args.output.clone().unwrap_or_else(default_output_path);
        timer.start(Stage::Export);
        write_csv(winners, &output)
            .map_err(|e| format!("Could not write {}: {}", output.display(), e))?;
        timer.end(Stage::Export, Some(winners.len() as u64));

        println!(
            "\n📥 Winners written to {}",
            output.display().to_string().bright_green()
        );
    }

    if let Some(report_path) = &args.report {
        let context = DrawContext {
            seed: shuffler.seed(),
            registrations: InputFile::from_path(&args.inputs.registrations)?,
            previous_winners: InputFile::from_path(&args.inputs.previous_winners)?,
            name_column: config.name_column.clone(),
            group_column: config.group_column.clone(),
            quota,
            pinned: prepared.pinned.clone(),
        };
        let report = DrawReport::new(context, &result, prepared.registrants.name_index());
        write_serialized(report_path, &report)
            .map_err(|e| format!("Could not write {}: {}", report_path.display(), e))?;

        println!(
            "🧾 Audit report written to {}",
            report_path.display().to_string().bright_green()
        );
    }

    if args.timings {
        timer.print_summary();
    }

    Ok(result.severity())
}

fn default_output_path() -> PathBuf {
    PathBuf::from(chrono::Local::now().format("winners_%Y%m%d.csv").to_string())
}
