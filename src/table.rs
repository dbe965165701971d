//! Tabular view over one worksheet's cell values.
//!
//! First row of the sheet is the header row; every cell is kept as text with
//! no type coercion. Rows shorter than the header (the Sheets API trims
//! trailing empty cells) are padded with empty strings so column indexing is
//! uniform.

/// Column that identifies an agent. The sheet is unusable without it.
pub const AGENT_COLUMN: &str = "ES Last Name, First Name";

/// Header substring marking "missed opportunity" category columns.
pub const MISSED_MARKER: &str = "Skill Performance Area Missed";

/// Header substring marking "strength" category columns.
pub const STRENGTH_MARKER: &str = "Strength";

#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Whether any row names this agent in the agent column.
    pub fn contains_agent(&self, agent: &str) -> bool {
        let Some(col) = self.column_index(AGENT_COLUMN) else {
            return false;
        };
        self.rows.iter().any(|row| row[col] == agent)
    }

    /// Sorted, deduplicated agent names from the agent column.
    /// Empty cells are not agents.
    pub fn unique_agents(&self) -> Vec<String> {
        let Some(col) = self.column_index(AGENT_COLUMN) else {
            return Vec::new();
        };
        let mut names: Vec<String> = self
            .rows
            .iter()
            .map(|row| row[col].clone())
            .filter(|name| !name.is_empty())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Indices of the last `lookback` rows whose agent column equals `agent`,
    /// in original row order ("last" meaning the bottom of the sheet as
    /// loaded, not re-sorted by any date field).
    pub fn agent_rows(&self, agent: &str, lookback: usize) -> Vec<usize> {
        let Some(col) = self.column_index(AGENT_COLUMN) else {
            return Vec::new();
        };
        let matched: Vec<usize> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row[col] == agent)
            .map(|(i, _)| i)
            .collect();
        let skip = matched.len().saturating_sub(lookback);
        matched[skip..].to_vec()
    }

    /// Every non-empty cell from any column whose header contains `marker`,
    /// for the given rows. Column-major: all matched rows of the first
    /// matching column, then the next column.
    pub fn collect_fields(&self, rows: &[usize], marker: &str) -> Vec<String> {
        let mut values = Vec::new();
        for (col, header) in self.headers.iter().enumerate() {
            if !header.contains(marker) {
                continue;
            }
            for &row in rows {
                let cell = &self.rows[row][col];
                if !cell.is_empty() {
                    values.push(cell.clone());
                }
            }
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(
            vec![
                AGENT_COLUMN.to_string(),
                "Skill Performance Area Missed 1".to_string(),
                "Strength 1".to_string(),
            ],
            vec![
                vec!["Doe, Jane".into(), "m1".into(), "s1".into()],
                vec!["Smith, Al".into(), "m2".into(), "s2".into()],
                vec!["Doe, Jane".into(), "m3".into(), String::new()],
                vec!["Doe, Jane".into(), String::new(), "s3".into()],
            ],
        )
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = Table::new(
            vec!["a".into(), "b".into(), "c".into()],
            vec![vec!["1".into()]],
        );
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.collect_fields(&[0], "b"), Vec::<String>::new());
    }

    #[test]
    fn test_has_column_is_exact_match() {
        let table = sample();
        assert!(table.has_column(AGENT_COLUMN));
        assert!(!table.has_column("ES Last Name"));
    }

    #[test]
    fn test_agent_rows_takes_tail_in_order() {
        let table = sample();
        assert_eq!(table.agent_rows("Doe, Jane", 2), vec![2, 3]);
        assert_eq!(table.agent_rows("Doe, Jane", 5), vec![0, 2, 3]);
        assert_eq!(table.agent_rows("Smith, Al", 1), vec![1]);
    }

    #[test]
    fn test_agent_rows_unknown_agent_is_empty() {
        let table = sample();
        assert!(table.agent_rows("Nobody", 5).is_empty());
    }

    #[test]
    fn test_collect_fields_skips_empty_cells() {
        let table = sample();
        let rows = table.agent_rows("Doe, Jane", 5);
        assert_eq!(table.collect_fields(&rows, MISSED_MARKER), vec!["m1", "m3"]);
        assert_eq!(
            table.collect_fields(&rows, STRENGTH_MARKER),
            vec!["s1", "s3"]
        );
    }

    #[test]
    fn test_collect_fields_is_column_major() {
        let table = Table::new(
            vec![
                AGENT_COLUMN.to_string(),
                "Strength A".to_string(),
                "Strength B".to_string(),
            ],
            vec![
                vec!["X".into(), "a1".into(), "b1".into()],
                vec!["X".into(), "a2".into(), "b2".into()],
            ],
        );
        let rows = table.agent_rows("X", 5);
        assert_eq!(
            table.collect_fields(&rows, "Strength"),
            vec!["a1", "a2", "b1", "b2"]
        );
    }

    #[test]
    fn test_unique_agents_sorted_dedup() {
        let table = sample();
        assert_eq!(table.unique_agents(), vec!["Doe, Jane", "Smith, Al"]);
    }

    #[test]
    fn test_unique_agents_ignores_empty_names() {
        let table = Table::new(
            vec![AGENT_COLUMN.to_string()],
            vec![vec![String::new()], vec!["Z".into()]],
        );
        assert_eq!(table.unique_agents(), vec!["Z"]);
    }
}
