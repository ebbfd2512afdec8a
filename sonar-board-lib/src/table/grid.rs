use super::{Cell, CellValue, Column, SortDirection};
use crate::projects::{GateStatus, Project};
use crate::status::project_status;
use compact_str::CompactString;

/// One project's row: the extracted values (for sorting) and their rendered cells.
#[derive(Debug, Clone)]
pub struct Row {
    pub project_key: CompactString,
    pub status: GateStatus,
    pub values: Vec<CellValue>,
    pub cells: Vec<Cell>,
}

/// A fully rendered table, ready for any report surface.
#[derive(Debug, Clone)]
pub struct Table<'a> {
    columns: Vec<Column<'a>>,
    rows: Vec<Row>,
}

impl<'a> Table<'a> {
    /// Render every project through every column, then apply the first column's default sort.
    #[must_use]
    pub fn build<'p>(columns: Vec<Column<'a>>, projects: impl IntoIterator<Item = &'p Project>) -> Self {
        let rows = projects
            .into_iter()
            .map(|project| {
                let values: Vec<CellValue> = columns.iter().map(|c| c.value(project)).collect();
                let cells = columns.iter().zip(&values).map(|(c, v)| c.render(v, project)).collect();
                Row {
                    project_key: project.key().into(),
                    status: project_status(project),
                    values,
                    cells,
                }
            })
            .collect();

        let mut table = Self { columns, rows };
        let default_sort = table
            .columns
            .iter()
            .enumerate()
            .find_map(|(i, c)| c.default_sort().map(|direction| (i, direction)));
        if let Some((index, direction)) = default_sort {
            table.sort_by_index(index, direction);
        }
        table
    }

    #[must_use]
    pub fn columns(&self) -> &[Column<'a>] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn column_index(&self, column_id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id().as_str() == column_id)
    }

    /// Sort rows by the column with id `column_id`. Returns `false` if there is no such column.
    pub fn sort_by(&mut self, column_id: &str, direction: SortDirection) -> bool {
        match self.column_index(column_id) {
            Some(index) => {
                self.sort_by_index(index, direction);
                true
            }
            None => false,
        }
    }

    fn sort_by_index(&mut self, index: usize, direction: SortDirection) {
        self.rows.sort_by(|a, b| {
            let ordering = match (a.values.get(index), b.values.get(index)) {
                (Some(a), Some(b)) => a.compare(b),
                _ => core::cmp::Ordering::Equal,
            };
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{MetricCatalog, MetricDefinition, MetricKind};
    use crate::projects::{Measure, ProjectStatus};
    use crate::table::ColumnBuilder;
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap()
    }

    fn catalog() -> MetricCatalog {
        core::iter::once(MetricDefinition::new("ncloc", "Lines", MetricKind::Int)).collect()
    }

    fn projects() -> Vec<Project> {
        vec![
            Project::new("a", "Alpha")
                .with_analysis_date(now() - TimeDelta::days(3))
                .with_measure(Measure::new("ncloc", "50"))
                .with_status(ProjectStatus::new(GateStatus::Error, Vec::new())),
            Project::new("b", "Beta")
                .with_analysis_date(now() - TimeDelta::hours(1))
                .with_measure(Measure::new("ncloc", "1000")),
            Project::new("c", "Gamma").with_measure(Measure::new("ncloc", "7")),
        ]
    }

    fn keys(table: &Table<'_>) -> Vec<String> {
        table.rows().iter().map(|r| r.project_key.to_string()).collect()
    }

    #[test]
    fn test_default_sort_is_newest_first() {
        let catalog = catalog();
        let projects = projects();
        let table = Table::build(ColumnBuilder::new(&catalog, &[], "", now()).build(), &projects);
        assert_eq!(keys(&table), vec!["b", "a", "c"]);
        assert_eq!(table.rows()[0].cells.len(), table.columns().len());
    }

    #[test]
    fn test_sort_by_metric() {
        let catalog = catalog();
        let projects = projects();
        let mut table = Table::build(ColumnBuilder::new(&catalog, &[], "", now()).build(), &projects);

        assert!(table.sort_by("ncloc", SortDirection::Ascending));
        assert_eq!(keys(&table), vec!["c", "a", "b"]);

        assert!(table.sort_by("ncloc", SortDirection::Descending));
        assert_eq!(keys(&table), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_sort_by_name_and_status() {
        let catalog = catalog();
        let projects = projects();
        let mut table = Table::build(ColumnBuilder::new(&catalog, &[], "", now()).build(), &projects);

        assert!(table.sort_by("name", SortDirection::Ascending));
        assert_eq!(keys(&table), vec!["a", "b", "c"]);

        assert!(table.sort_by("status", SortDirection::Descending));
        assert_eq!(table.rows()[0].project_key, "a");
        assert_eq!(table.rows()[0].status, GateStatus::Error);
    }

    #[test]
    fn test_sort_by_unknown_column() {
        let catalog = catalog();
        let projects = projects();
        let mut table = Table::build(ColumnBuilder::new(&catalog, &[], "", now()).build(), &projects);
        assert!(!table.sort_by("complexity", SortDirection::Ascending));
        assert_eq!(keys(&table), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_empty_project_list() {
        let catalog = MetricCatalog::new();
        let table = Table::build(ColumnBuilder::new(&catalog, &[], "", now()).build(), core::iter::empty::<&Project>());
        assert!(table.rows().is_empty());
        assert_eq!(table.columns().len(), 3);
    }
}
