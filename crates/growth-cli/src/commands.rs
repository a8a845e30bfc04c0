use anyhow::{Context, Result};
use tracing::{info, info_span};

use growth_cli::pipeline::{
    SeriesRequest, annotation_report, chart_report, load_measurements, load_series, percentile,
    to_json,
};
use growth_ingest::{standardize_directories, write_standardized};
use growth_model::{BuildOptions, LookupStrategy};

use crate::cli::{
    LookupArg, MeasurementArgs, OutputFormatArg, PercentileArgs, SeriesArgs, StandardizeArgs,
};
use crate::summary::{print_annotations, print_chart, print_estimate, print_indicators};

pub fn run_indicators() -> Result<()> {
    print_indicators();
    Ok(())
}

pub fn run_percentile(args: &PercentileArgs) -> Result<()> {
    let request = series_request(&args.series);
    let series = load_series(&request)?;
    let estimate = percentile(&series, request.lookup, args.axis, args.value);
    print_estimate(estimate.as_ref());
    Ok(())
}

pub fn run_chart(args: &MeasurementArgs) -> Result<()> {
    let _span = info_span!("chart").entered();
    let request = series_request(&args.series);
    let series = load_series(&request)?;
    let measurements = load_measurements(&args.measurements)?;
    let report = chart_report(&series, &measurements, request.lookup);
    match args.format {
        OutputFormatArg::Table => print_chart(&report),
        OutputFormatArg::Json => println!("{}", to_json(&report)?),
    }
    Ok(())
}

pub fn run_annotate(args: &MeasurementArgs) -> Result<()> {
    let _span = info_span!("annotate").entered();
    let request = series_request(&args.series);
    let series = load_series(&request)?;
    let measurements = load_measurements(&args.measurements)?;
    let report = annotation_report(&series, &measurements, request.lookup);
    match args.format {
        OutputFormatArg::Table => print_annotations(&report),
        OutputFormatArg::Json => println!("{}", to_json(&report)?),
    }
    Ok(())
}

pub fn run_standardize(args: &StandardizeArgs) -> Result<()> {
    let _span = info_span!("standardize").entered();
    let tables = standardize_directories(args.who_dir.as_deref(), args.cdc_dir.as_deref())
        .context("standardize raw reference tables")?;
    let written = write_standardized(&args.output_dir, &tables)
        .with_context(|| format!("write tables to {}", args.output_dir.display()))?;
    info!(written, "standardization complete");
    println!(
        "Wrote {written} standardized tables to {}",
        args.output_dir.display()
    );
    Ok(())
}

fn series_request(args: &SeriesArgs) -> SeriesRequest {
    let options = if args.strict_monotone {
        BuildOptions::strict()
    } else {
        BuildOptions::default()
    };
    SeriesRequest {
        data_dir: args.data_dir.clone(),
        indicator: args.indicator,
        gender: args.gender,
        source: args.source,
        lookup: match args.lookup {
            LookupArg::Linear => LookupStrategy::Linear,
            LookupArg::Binary => LookupStrategy::Binary,
        },
        options,
    }
}
