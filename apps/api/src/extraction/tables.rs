//! Table/Section Detector: a greedy single pass over a page's lines.
//!
//! The scan is a two-state machine folded over the lines top-to-bottom:
//! `Idle` until an accepted row opens a region, `Accumulating` until a rejected
//! line (or the end of the page) closes it. No backtracking, no merging across
//! gaps, no continuation across pages.

use crate::extraction::lines::LineGroups;
use crate::extraction::models::{Line, RegionKind, TableCell, TableRegion, TableRow};
use crate::extraction::patterns::resume_marker;

/// A line needs more than this many items to be considered a row.
const MIN_ROW_ITEMS: usize = 2;
/// Maximum relative deviation of a spacing from the mean.
const SPACING_DEVIATION: f64 = 0.3;
/// Mean spacing must exceed this for a geometric match.
const MIN_MEAN_SPACING: f64 = 50.0;

/// How a candidate line relates to table detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowVerdict {
    /// ≤ 2 items; never evaluated further.
    NotCandidate,
    Rejected,
    Accepted { resume_pattern: bool },
}

pub fn classify_line(line: &Line) -> RowVerdict {
    if line.glyphs.len() <= MIN_ROW_ITEMS {
        return RowVerdict::NotCandidate;
    }

    let xs: Vec<f64> = line.glyphs.iter().map(|g| g.x()).collect();
    let consistent = spacing_is_consistent(&xs);
    let resume_pattern = line
        .glyphs
        .iter()
        .any(|g| resume_marker(&g.text).is_some());

    if consistent || resume_pattern {
        RowVerdict::Accepted { resume_pattern }
    } else {
        RowVerdict::Rejected
    }
}

/// Every gap between consecutive x-starts stays within 30% of the mean gap,
/// and the mean gap exceeds 50 units.
pub fn spacing_is_consistent(xs: &[f64]) -> bool {
    if xs.len() < 2 {
        return false;
    }
    let spacings: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
    let mean = spacings.iter().sum::<f64>() / spacings.len() as f64;
    let within = spacings
        .iter()
        .all(|s| (s - mean).abs() < mean * SPACING_DEVIATION);
    within && mean > MIN_MEAN_SPACING
}

enum ScanState {
    Idle,
    Accumulating(TableRegion),
}

struct TableScan {
    page_number: u32,
    state: ScanState,
    last_y: Option<f64>,
    closed: Vec<TableRegion>,
}

impl TableScan {
    fn new(page_number: u32) -> Self {
        Self {
            page_number,
            state: ScanState::Idle,
            last_y: None,
            closed: Vec::new(),
        }
    }

    fn step(mut self, line: &Line) -> Self {
        let state = std::mem::replace(&mut self.state, ScanState::Idle);
        self.state = match (state, classify_line(line)) {
            (ScanState::Idle, RowVerdict::Accepted { resume_pattern }) => {
                let kind = if resume_pattern {
                    RegionKind::ResumeSection
                } else {
                    RegionKind::Table
                };
                ScanState::Accumulating(TableRegion {
                    page_number: self.page_number,
                    start_y: line.y,
                    end_y: line.y,
                    rows: vec![to_row(line)],
                    kind,
                })
            }
            (ScanState::Accumulating(mut region), RowVerdict::Accepted { .. }) => {
                region.rows.push(to_row(line));
                ScanState::Accumulating(region)
            }
            (ScanState::Accumulating(mut region), _) => {
                region.end_y = self.last_y.unwrap_or(line.y);
                self.closed.push(region);
                ScanState::Idle
            }
            (ScanState::Idle, _) => ScanState::Idle,
        };
        self.last_y = Some(line.y);
        self
    }

    fn finish(mut self) -> Vec<TableRegion> {
        if let ScanState::Accumulating(mut region) = self.state {
            region.end_y = self.last_y.unwrap_or(region.start_y);
            self.closed.push(region);
        }
        self.closed
    }
}

fn to_row(line: &Line) -> TableRow {
    TableRow {
        y: line.y,
        cells: line
            .glyphs
            .iter()
            .map(|g| TableCell {
                text: g.text.clone(),
                x: g.x(),
                width: g.width,
            })
            .collect(),
    }
}

/// Detects table-like and resume-section regions on one page.
pub fn detect_regions(groups: &LineGroups, page_number: u32) -> Vec<TableRegion> {
    groups
        .top_to_bottom()
        .fold(TableScan::new(page_number), TableScan::step)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::lines::group_into_lines;
    use crate::extraction::lines::tests::glyph;
    use crate::extraction::models::Glyph;

    fn row_at(y: f64, xs: &[f64], texts: &[&str]) -> Vec<Glyph> {
        xs.iter()
            .zip(texts)
            .map(|(x, t)| glyph(t, *x, y))
            .collect()
    }

    fn line_of(glyphs: Vec<Glyph>) -> Line {
        group_into_lines(&glyphs, 5.0).into_lines().remove(0)
    }

    #[test]
    fn test_consistent_spacing_is_a_table_row() {
        // spacings [100, 102, 98]
        let line = line_of(row_at(
            500.0,
            &[10.0, 110.0, 212.0, 310.0],
            &["Name", "Role", "Team", "Years"],
        ));
        assert_eq!(
            classify_line(&line),
            RowVerdict::Accepted {
                resume_pattern: false
            }
        );
    }

    #[test]
    fn test_inconsistent_spacing_is_rejected() {
        // spacings [100, 10, 300]
        let line = line_of(row_at(
            500.0,
            &[10.0, 110.0, 120.0, 420.0],
            &["Name", "Role", "Team", "Years"],
        ));
        assert_eq!(classify_line(&line), RowVerdict::Rejected);
    }

    #[test]
    fn test_small_mean_spacing_is_rejected() {
        let line = line_of(row_at(500.0, &[10.0, 40.0, 70.0], &["a", "b", "c"]));
        assert_eq!(classify_line(&line), RowVerdict::Rejected);
    }

    #[test]
    fn test_single_heading_item_is_not_a_candidate() {
        let line = line_of(vec![glyph("Experience", 10.0, 600.0)]);
        assert_eq!(classify_line(&line), RowVerdict::NotCandidate);

        let groups = group_into_lines(&[glyph("Experience", 10.0, 600.0)], 5.0);
        assert!(detect_regions(&groups, 1).is_empty());
    }

    #[test]
    fn test_date_opens_resume_section_despite_inconsistent_spacing() {
        let glyphs = row_at(
            500.0,
            &[10.0, 20.0, 400.0],
            &["Acme", "Engineer", "2020-01-15"],
        );
        let groups = group_into_lines(&glyphs, 5.0);
        let regions = detect_regions(&groups, 3);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].kind, RegionKind::ResumeSection);
        assert_eq!(regions[0].page_number, 3);
        assert_eq!(regions[0].rows.len(), 1);
    }

    #[test]
    fn test_region_closes_on_rejected_line_with_previous_y() {
        let mut glyphs = row_at(700.0, &[10.0, 110.0, 210.0], &["a", "b", "c"]);
        glyphs.extend(row_at(680.0, &[10.0, 110.0, 210.0], &["d", "e", "f"]));
        glyphs.push(glyph("plain prose line", 10.0, 660.0));
        glyphs.extend(row_at(640.0, &[10.0, 110.0, 210.0], &["g", "h", "i"]));

        let regions = detect_regions(&group_into_lines(&glyphs, 5.0), 1);
        assert_eq!(regions.len(), 2);

        assert_eq!(regions[0].kind, RegionKind::Table);
        assert_eq!(regions[0].rows.len(), 2);
        assert!((regions[0].start_y - 700.0).abs() < f64::EPSILON);
        assert!((regions[0].end_y - 680.0).abs() < f64::EPSILON);

        // Still open at page end: closed with the last line's y.
        assert_eq!(regions[1].rows.len(), 1);
        assert!((regions[1].start_y - 640.0).abs() < f64::EPSILON);
        assert!((regions[1].end_y - 640.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_region_kind_fixed_by_opening_line() {
        let mut glyphs = row_at(700.0, &[10.0, 110.0, 210.0], &["a", "b", "c"]);
        glyphs.extend(row_at(680.0, &[10.0, 20.0, 400.0], &["x", "y", "2019/05/01"]));
        let regions = detect_regions(&group_into_lines(&glyphs, 5.0), 1);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].kind, RegionKind::Table);
        assert_eq!(regions[0].rows.len(), 2);
        assert_eq!(regions[0].rows[1].pipe_joined(), "x | y | 2019/05/01");
    }

    #[test]
    fn test_empty_page_has_no_regions() {
        assert!(detect_regions(&group_into_lines(&[], 5.0), 1).is_empty());
    }
}
