//! Monthly Report Model
//!
//! One report document per (employee, month, year). The document has
//! three sections, each a map of slot key → cell:
//! - `faltantes`: one slot per day of the month (keys "1".."31")
//! - `guias`: two fortnightly guide submissions (keys "1", "2")
//! - `tableros`: four weekly board evidences (keys "1".."4")

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Cell status meaning "done" for compliance scoring.
pub const COMPLETE_STATUS: &str = "check";

/// Report row. `month` is stored one-based.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Report {
    pub id: i64,
    pub employee_id: i64,
    pub month: i64,
    pub year: i64,
    /// JSON-encoded [`ReportData`].
    pub data: String,
    pub updated_at: i64,
}

impl Report {
    pub fn parsed_data(&self) -> ReportData {
        serde_json::from_str(&self.data).unwrap_or_default()
    }
}

/// One marked cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportCell {
    pub status: String,
    #[serde(default)]
    pub comment: Option<String>,
}

/// The three named sections of a report document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportSection {
    Faltantes,
    Guias,
    Tableros,
}

impl ReportSection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Faltantes => "faltantes",
            Self::Guias => "guias",
            Self::Tableros => "tableros",
        }
    }
}

impl FromStr for ReportSection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "faltantes" => Ok(Self::Faltantes),
            "guias" => Ok(Self::Guias),
            "tableros" => Ok(Self::Tableros),
            other => Err(format!("Unknown report section: {other}")),
        }
    }
}

/// Nested report document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportData {
    #[serde(default)]
    pub faltantes: BTreeMap<String, ReportCell>,
    #[serde(default)]
    pub guias: BTreeMap<String, ReportCell>,
    #[serde(default)]
    pub tableros: BTreeMap<String, ReportCell>,
}

impl ReportData {
    fn section_mut(&mut self, section: ReportSection) -> &mut BTreeMap<String, ReportCell> {
        match section {
            ReportSection::Faltantes => &mut self.faltantes,
            ReportSection::Guias => &mut self.guias,
            ReportSection::Tableros => &mut self.tableros,
        }
    }

    pub fn section(&self, section: ReportSection) -> &BTreeMap<String, ReportCell> {
        match section {
            ReportSection::Faltantes => &self.faltantes,
            ReportSection::Guias => &self.guias,
            ReportSection::Tableros => &self.tableros,
        }
    }

    /// Merge-patch a single cell. Status `"empty"` removes the slot.
    pub fn apply_cell(&mut self, section: ReportSection, key: &str, status: &str, comment: Option<String>) {
        let slots = self.section_mut(section);
        if status == "empty" {
            slots.remove(key);
        } else {
            slots.insert(
                key.to_string(),
                ReportCell {
                    status: status.to_string(),
                    comment,
                },
            );
        }
    }

    /// Number of cells across all sections marked complete.
    pub fn complete_count(&self) -> usize {
        [&self.faltantes, &self.guias, &self.tableros]
            .into_iter()
            .flat_map(|s| s.values())
            .filter(|c| c.status == COMPLETE_STATUS)
            .count()
    }

    /// Presence-based completeness: every business day slot plus every
    /// guide and board slot carries a mark (any status).
    pub fn is_fully_filled(&self, business_day_slots: &[u32], guide_slots: u32, board_slots: u32) -> bool {
        business_day_slots
            .iter()
            .all(|d| self.faltantes.contains_key(&d.to_string()))
            && (1..=guide_slots).all(|k| self.guias.contains_key(&k.to_string()))
            && (1..=board_slots).all(|k| self.tableros.contains_key(&k.to_string()))
    }
}

/// Single-cell update payload. The month arrives zero-based from the
/// frontend; the server converts at its boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportCellUpdate {
    pub employee_id: i64,
    pub month: i64,
    pub year: i64,
    #[serde(rename = "type")]
    pub section: ReportSection,
    pub key: String,
    pub status: String,
    #[serde(default)]
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_cell_inserts_and_clears() {
        let mut data = ReportData::default();
        data.apply_cell(ReportSection::Faltantes, "3", "check", None);
        data.apply_cell(ReportSection::Guias, "1", "cross", Some("late".into()));
        assert_eq!(data.complete_count(), 1);

        data.apply_cell(ReportSection::Faltantes, "3", "empty", None);
        assert!(data.faltantes.is_empty());
        assert_eq!(data.complete_count(), 0);
    }

    #[test]
    fn fully_filled_requires_every_slot() {
        let mut data = ReportData::default();
        let days = [1u32, 2, 3];
        for d in days {
            data.apply_cell(ReportSection::Faltantes, &d.to_string(), "check", None);
        }
        for k in 1..=2u32 {
            data.apply_cell(ReportSection::Guias, &k.to_string(), "check", None);
        }
        for k in 1..=3u32 {
            data.apply_cell(ReportSection::Tableros, &k.to_string(), "cross", None);
        }
        // One board slot still missing
        assert!(!data.is_fully_filled(&days, 2, 4));

        data.apply_cell(ReportSection::Tableros, "4", "check", None);
        assert!(data.is_fully_filled(&days, 2, 4));
    }

    #[test]
    fn parses_original_document_shape() {
        let raw = r#"{"faltantes":{"1":{"status":"check","comment":""}},"guias":{},"tableros":{"2":{"status":"cross","comment":"sin evidencia"}}}"#;
        let data: ReportData = serde_json::from_str(raw).unwrap();
        assert_eq!(data.faltantes.len(), 1);
        assert_eq!(data.tableros["2"].status, "cross");
    }
}
