use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use growth_core::{EstimateMethod, MergeRule, PercentileEstimate};
use growth_model::{Indicator, PercentileLabel, ReferenceSource, TableKind};
use growth_cli::pipeline::{AnnotationReport, ChartReport};

pub fn print_indicators() {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Indicator"),
        header_cell("Metric"),
        header_cell("Axis"),
        header_cell("WHO tables"),
        header_cell("CDC tables"),
    ]);
    apply_table_style(&mut table);
    for indicator in Indicator::ALL {
        table.add_row(vec![
            Cell::new(indicator.as_str())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(format!("{} ({})", indicator.metric(), indicator.metric().unit())),
            Cell::new(indicator.axis().label()),
            Cell::new(table_codes(indicator, ReferenceSource::Who)),
            Cell::new(table_codes(indicator, ReferenceSource::Cdc)),
        ]);
    }
    println!("{table}");
}

fn table_codes(indicator: Indicator, source: ReferenceSource) -> String {
    MergeRule::for_indicator(indicator, source)
        .required_tables()
        .iter()
        .map(TableKind::code)
        .collect::<Vec<_>>()
        .join(" + ")
}

pub fn print_estimate(estimate: Option<&PercentileEstimate>) {
    match estimate {
        Some(estimate) => {
            let z = estimate
                .z_score
                .map(|z| format!(" (z = {z:.2})"))
                .unwrap_or_default();
            println!("{}{z} [{}]", estimate.label, method_name(estimate.method));
        }
        None => println!("-"),
    }
}

pub fn print_chart(report: &ChartReport) {
    println!(
        "Chart: {} ({}, {})",
        report.indicator, report.gender, report.source
    );
    let mut table = Table::new();
    table.set_header(vec![
        header_cell(report.axis.label()),
        header_cell("P3"),
        header_cell("P15"),
        header_cell("P50"),
        header_cell("P85"),
        header_cell("P97"),
        header_cell("Patient"),
        header_cell("Measured at"),
    ]);
    apply_report_style(&mut table);
    for column in 0..8 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for point in &report.points {
        let curves = &point.percentiles;
        let (patient, measured_at) = match point.patient {
            Some(sample) => (
                Cell::new(format!("{:.2}", sample.value))
                    .fg(Color::Green)
                    .add_attribute(Attribute::Bold),
                Cell::new(format!("{:.3}", sample.axis)),
            ),
            None => (dim_cell("-"), dim_cell("-")),
        };
        table.add_row(vec![
            Cell::new(format!("{:.3}", point.axis)),
            value_cell(curves.p3),
            value_cell(curves.p15),
            value_cell(curves.p50),
            value_cell(curves.p85),
            value_cell(curves.p97),
            patient,
            measured_at,
        ]);
    }
    println!("{table}");
    println!(
        "{} of {} reference points carry a measurement",
        report.patient_count(),
        report.points.len()
    );
}

pub fn print_annotations(report: &AnnotationReport) {
    println!(
        "Annotations: {} ({}, {})",
        report.indicator, report.gender, report.source
    );
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Date"),
        header_cell("Axis"),
        header_cell("Value"),
        header_cell("Reference"),
        header_cell("Percentile"),
        header_cell("Z"),
        header_cell("Method"),
    ]);
    apply_report_style(&mut table);
    for column in 1..6 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    align_column(&mut table, 6, CellAlignment::Center);
    for row in &report.rows {
        let (label, z, method) = match &row.estimate {
            Some(estimate) => (
                label_cell(estimate.label),
                estimate
                    .z_score
                    .map_or_else(|| dim_cell("-"), |z| Cell::new(format!("{z:.2}"))),
                Cell::new(method_name(estimate.method)),
            ),
            None => (dim_cell("-"), dim_cell("-"), dim_cell("-")),
        };
        table.add_row(vec![
            Cell::new(row.date),
            Cell::new(format!("{:.3}", row.axis)),
            Cell::new(format!("{:.2}", row.value)),
            Cell::new(format!("{:.3}", row.reference_axis)),
            label,
            z,
            method,
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_report_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn method_name(method: EstimateMethod) -> &'static str {
    match method {
        EstimateMethod::Lms => "LMS",
        EstimateMethod::Linear => "linear",
    }
}

fn label_cell(label: PercentileLabel) -> Cell {
    match label {
        PercentileLabel::BelowTenthOfPercent | PercentileLabel::AboveNinetyNineNine => {
            Cell::new(label).fg(Color::Red).add_attribute(Attribute::Bold)
        }
        PercentileLabel::BelowThird | PercentileLabel::AboveNinetySeventh => {
            Cell::new(label).fg(Color::Yellow)
        }
        PercentileLabel::Percentile(_) => Cell::new(label),
    }
}

fn value_cell(value: Option<f64>) -> Cell {
    match value {
        Some(value) => Cell::new(format!("{value:.2}")),
        None => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
