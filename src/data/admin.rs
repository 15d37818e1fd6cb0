//! Admin coordinate picking: a bounded log of clicks read off the diagram,
//! exportable as catalog stubs for authors placing new points.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::geometry::Coord;
use super::mirror::EarSide;

pub const DEFAULT_PICK_CAPACITY: usize = 32;

/// One recorded admin click, in canonical (left-ear) intrinsic coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdminPick {
    pub side: EarSide,
    pub pos: Coord,
}

#[derive(Debug, thiserror::Error)]
pub enum PickExportError {
    #[error("nothing to export: the pick log is empty")]
    Empty,
    #[error("failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Serialize)]
struct PickStub {
    id: String,
    x: f64,
    y: f64,
}

/// Most recent admin picks, oldest first. Older entries are dropped once
/// the capacity is reached.
#[derive(Debug, Clone)]
pub struct AdminPickLog {
    picks: VecDeque<AdminPick>,
    capacity: usize,
}

impl Default for AdminPickLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_PICK_CAPACITY)
    }
}

impl AdminPickLog {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            picks: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, pick: AdminPick) {
        if self.picks.len() == self.capacity {
            self.picks.pop_front();
        }
        self.picks.push_back(pick);
    }

    pub fn clear(&mut self) {
        self.picks.clear();
    }

    pub fn last(&self) -> Option<&AdminPick> {
        self.picks.back()
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Picks oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &AdminPick> + ExactSizeIterator {
        self.picks.iter()
    }

    /// YAML list of `{ id: NEW_n, x, y }` stubs, coordinates to one decimal.
    pub fn to_yaml_snippet(&self) -> String {
        let stubs: Vec<PickStub> = self
            .picks
            .iter()
            .enumerate()
            .map(|(i, p)| PickStub {
                id: format!("NEW_{}", i + 1),
                x: round1(p.pos.x),
                y: round1(p.pos.y),
            })
            .collect();
        let body = match serde_yaml::to_string(&stubs) {
            Ok(body) => body,
            Err(e) => {
                log::warn!("admin picks could not be serialized: {e}");
                String::new()
            }
        };
        format!(
            "# earmap admin picks, {}\n{}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            body
        )
    }

    pub fn export_to_path(&self, path: &Path) -> Result<(), PickExportError> {
        if self.is_empty() {
            return Err(PickExportError::Empty);
        }
        std::fs::write(path, self.to_yaml_snippet()).map_err(|source| PickExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("exported {} admin picks to {:?}", self.len(), path);
        Ok(())
    }
}

/// Round to one decimal place, as shown in the admin readout.
pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// The `x=…, y=…` readout shown on the diagram badge.
pub fn format_readout(pos: Coord) -> String {
    format!("x={:.1}, y={:.1}", pos.x, pos.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pick(x: f64, y: f64) -> AdminPick {
        AdminPick {
            side: EarSide::Left,
            pos: Coord::new(x, y),
        }
    }

    #[test]
    fn log_is_bounded_and_drops_oldest() {
        let mut log = AdminPickLog::with_capacity(2);
        log.push(pick(1.0, 1.0));
        log.push(pick(2.0, 2.0));
        log.push(pick(3.0, 3.0));
        assert_eq!(log.len(), 2);
        assert_eq!(log.iter().next().unwrap().pos.x, 2.0);
        assert_eq!(log.last().unwrap().pos.x, 3.0);
    }

    #[test]
    fn snippet_rounds_and_numbers_stubs() {
        let mut log = AdminPickLog::default();
        log.push(pick(300.04, 400.06));
        log.push(pick(10.0, 20.0));
        let yaml = log.to_yaml_snippet();
        assert!(yaml.starts_with("# earmap admin picks"));
        assert!(yaml.contains("id: NEW_1"));
        assert!(yaml.contains("x: 300.0"));
        assert!(yaml.contains("y: 400.1"));
        assert!(yaml.contains("id: NEW_2"));
    }

    #[test]
    fn empty_log_refuses_export() {
        let log = AdminPickLog::default();
        let path = std::env::temp_dir().join("earmap_empty_picks.yaml");
        assert!(matches!(log.export_to_path(&path), Err(PickExportError::Empty)));
    }

    #[test]
    fn readout_uses_one_decimal() {
        assert_eq!(format_readout(Coord::new(12.345, 7.0)), "x=12.3, y=7.0");
    }

    #[test]
    fn listing_runs_newest_first_with_stable_numbers() {
        let mut log = AdminPickLog::default();
        log.push(pick(1.0, 1.0));
        log.push(pick(2.0, 2.0));
        log.push(pick(3.0, 3.0));
        let listed: Vec<(usize, f64)> = log
            .iter()
            .enumerate()
            .rev()
            .map(|(i, p)| (i + 1, p.pos.x))
            .collect();
        assert_eq!(listed, [(3, 3.0), (2, 2.0), (1, 1.0)]);
    }

    #[test]
    fn zero_capacity_is_clamped() {
        assert_eq!(AdminPickLog::with_capacity(0).capacity(), 1);
    }
}
