use super::common;
use crate::Result;
use crate::table::Table;
use core::fmt::Write;
use std::borrow::Cow;

pub fn generate<W: Write>(table: &Table<'_>, writer: &mut W) -> Result<()> {
    for (i, column) in table.columns().iter().enumerate() {
        if i > 0 {
            write!(writer, ",")?;
        }
        write!(writer, "{}", escape_csv(common::labelled_header(column)))?;
    }
    writeln!(writer)?;

    for row in table.rows() {
        for (i, cell) in row.cells.iter().enumerate() {
            if i > 0 {
                write!(writer, ",")?;
            }
            write!(writer, "{}", escape_csv(cell.text()))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

/// Escape a value for RFC compliant CSV output.
///
/// Wraps the value in double quotes if it contains commas, newlines, or double quotes.
/// Internal double quotes are doubled per the RFC.
fn escape_csv(s: &str) -> Cow<'_, str> {
    if s.contains('"') {
        Cow::Owned(format!("\"{}\"", s.replace('"', "\"\"")))
    } else if s.contains(',') || s.contains('\n') || s.contains('\r') {
        Cow::Owned(format!("\"{s}\""))
    } else {
        Cow::Borrowed(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{MetricCatalog, MetricDefinition, MetricKind};
    use crate::projects::{GateStatus, Measure, Project, ProjectStatus};
    use crate::table::ColumnBuilder;
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("1,234"), "\"1,234\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv("two\nlines"), "\"two\nlines\"");
        assert!(matches!(escape_csv("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_csv_report() {
        let catalog: MetricCatalog = [
            MetricDefinition::new("ncloc", "Lines", MetricKind::Int),
            MetricDefinition::new("coverage", "Coverage", MetricKind::Percent),
        ]
        .into_iter()
        .collect();
        let projects = vec![
            Project::new("shop", "Shop, Inc.")
                .with_analysis_date(now() - TimeDelta::minutes(5))
                .with_measure(Measure::new("ncloc", "1234"))
                .with_measure(Measure::new("coverage", "80.04"))
                .with_status(ProjectStatus::new(GateStatus::Ok, Vec::new())),
            Project::new("tools", "Tools").with_analysis_date(now() - TimeDelta::days(2)),
        ];
        let table = Table::build(ColumnBuilder::new(&catalog, &[], "", now()).build(), &projects);

        let mut output = String::new();
        generate(&table, &mut output).unwrap();
        insta::assert_snapshot!(output, @r#"
        Status,Name,Lines,Coverage,Last Analysis
        OK,"Shop, Inc.","1,234",80.0%,5 minutes ago
        ,Tools,,,2 days ago
        "#);
    }
}
