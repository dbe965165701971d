//! Agent selection: which (agent, coaching date) pairs a run processes.
//!
//! Two mutually exclusive modes mirror the operator-facing views: the fixed
//! roster with per-agent checkboxes, and free search over every agent the
//! sheet knows. Both produce an ordered list of [`SelectionEntry`] values.

use std::str::FromStr;

use anyhow::{bail, Error, Result};
use chrono::NaiveDate;

use crate::table::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// "My Team Only": roster agents present in the sheet.
    Team,
    /// "Search All Agents from Sheet": any agent name the sheet contains.
    Search,
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "team" => Ok(Self::Team),
            "search" => Ok(Self::Search),
            other => bail!("Unknown selection mode: {} (expected team or search)", other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEntry {
    pub agent: String,
    pub date: NaiveDate,
}

#[derive(Debug)]
struct TeamRow {
    agent: String,
    checked: bool,
    date: NaiveDate,
}

/// Roster-mode selection state. Offers only roster agents present in the
/// table's agent column, in roster order; each row has an independent
/// checkbox and date.
#[derive(Debug)]
pub struct TeamSelection {
    rows: Vec<TeamRow>,
}

impl TeamSelection {
    pub fn new(roster: &[String], table: &Table, default_date: NaiveDate) -> Self {
        let rows = roster
            .iter()
            .filter(|agent| table.contains_agent(agent))
            .map(|agent| TeamRow {
                agent: agent.clone(),
                checked: false,
                date: default_date,
            })
            .collect();
        Self { rows }
    }

    /// Agents offered for selection, in roster order.
    pub fn offered(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.agent.as_str()).collect()
    }

    /// Force every checkbox to `state`. One-way sync: later individual
    /// toggles do not feed back into any select-all state (none is kept).
    pub fn select_all(&mut self, state: bool) {
        for row in &mut self.rows {
            row.checked = state;
        }
    }

    /// Returns false when the agent is not offered.
    pub fn set_checked(&mut self, agent: &str, checked: bool) -> bool {
        match self.rows.iter_mut().find(|row| row.agent == agent) {
            Some(row) => {
                row.checked = checked;
                true
            }
            None => false,
        }
    }

    pub fn set_date(&mut self, agent: &str, date: NaiveDate) -> bool {
        match self.rows.iter_mut().find(|row| row.agent == agent) {
            Some(row) => {
                row.date = date;
                true
            }
            None => false,
        }
    }

    pub fn entries(&self) -> Vec<SelectionEntry> {
        self.rows
            .iter()
            .filter(|row| row.checked)
            .map(|row| SelectionEntry {
                agent: row.agent.clone(),
                date: row.date,
            })
            .collect()
    }
}

/// Search-mode selection state. Candidates are the table's unique agent
/// names; every selected agent is implicitly included (the checkbox is
/// forced), with its own date. Output order is selection order.
#[derive(Debug)]
pub struct SearchSelection {
    available: Vec<String>,
    selected: Vec<(String, NaiveDate)>,
    default_date: NaiveDate,
}

impl SearchSelection {
    pub fn new(table: &Table, default_date: NaiveDate) -> Self {
        Self {
            available: table.unique_agents(),
            selected: Vec::new(),
            default_date,
        }
    }

    /// Sorted unique agent names offered by the search list.
    pub fn available(&self) -> &[String] {
        &self.available
    }

    /// Select an agent by name. Unknown names and repeats are ignored;
    /// returns whether the agent is selected afterwards.
    pub fn select(&mut self, agent: &str) -> bool {
        if !self.available.iter().any(|name| name == agent) {
            return false;
        }
        if !self.selected.iter().any(|(name, _)| name == agent) {
            self.selected.push((agent.to_string(), self.default_date));
        }
        true
    }

    pub fn set_date(&mut self, agent: &str, date: NaiveDate) -> bool {
        match self
            .selected
            .iter_mut()
            .find(|(name, _)| name == agent)
        {
            Some((_, d)) => {
                *d = date;
                true
            }
            None => false,
        }
    }

    pub fn entries(&self) -> Vec<SelectionEntry> {
        self.selected
            .iter()
            .map(|(agent, date)| SelectionEntry {
                agent: agent.clone(),
                date: *date,
            })
            .collect()
    }
}
