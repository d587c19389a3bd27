use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, info_span};

use colclass_cli::report::{ClassificationReport, print_report};
use colclass_cli::settings::Settings;
use colclass_cli::workflow::{POLL_INTERVAL, export_session, prepare_session, wait_with_timeout};
use colclass_core::{ExportOptions, Session, TaskOutcome};

use crate::cli::{AverageArgs, ClassifyArgs, ExportArgs, InspectArgs, ReportFormat};

fn load(args: &ClassifyArgs, settings: &Settings) -> Result<Session> {
    prepare_session(
        &args.input,
        args.threshold.as_deref(),
        &args.types,
        settings,
    )
}

pub fn run_inspect(args: &InspectArgs, settings: &Settings) -> Result<()> {
    let _span = info_span!("inspect", input = %args.classify.input.display()).entered();
    let session = load(&args.classify, settings)?;
    let report = ClassificationReport::from_session(&session)?;
    match args.format {
        ReportFormat::Table => print_report(&report),
        ReportFormat::Json => {
            let json = serde_json::to_string_pretty(&report).context("serialize report")?;
            println!("{json}");
        }
    }
    Ok(())
}

pub fn run_export(args: &ExportArgs, settings: &Settings) -> Result<()> {
    let _span = info_span!("export", input = %args.classify.input.display()).entered();
    let session = load(&args.classify, settings)?;
    let options = ExportOptions {
        overwrite: args.force || settings.export.overwrite,
    };
    let summary = export_session(&session, &args.output, options)?;
    println!(
        "Exported {} columns to {}",
        summary.columns.len(),
        summary.path.display()
    );
    println!("Column order: {}", summary.columns.join(", "));
    Ok(())
}

pub fn run_average(args: &AverageArgs, settings: &Settings) -> Result<()> {
    let _span = info_span!("average", input = %args.classify.input.display()).entered();
    let timeout = args
        .timeout
        .map(Duration::try_from_secs_f64)
        .transpose()
        .context("invalid --timeout")?;
    let session = load(&args.classify, settings)?;
    let handle = session.start_average()?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").context("spinner style")?);
    spinner.enable_steady_tick(POLL_INTERVAL);
    let outcome = wait_with_timeout(handle, timeout, |elapsed| {
        spinner.set_message(format!("Calculating... {:.1}s", elapsed.as_secs_f64()));
    });
    spinner.finish_and_clear();

    match outcome {
        TaskOutcome::Completed(result) => {
            match result.mean {
                Some(mean) => println!("Average of data: {mean:.4}"),
                None => println!("Average of data: no numeric columns"),
            }
            info!(
                numeric_columns = result.numeric_columns,
                elapsed_ms = result.elapsed.as_millis() as u64,
                "averaging completed"
            );
            Ok(())
        }
        TaskOutcome::Cancelled => {
            println!("Calculation stopped.");
            Ok(())
        }
        TaskOutcome::Failed(error) => Err(anyhow::Error::new(error).context("averaging failed")),
    }
}
