//! History of absences and returns, kept in memory and appended to a JSONL file.
use std::{
    collections::VecDeque,
    fs::{create_dir_all, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use bevy::{log::warn, prelude::*};
use serde::Serialize;

use super::{
    events::{AbsenceAppliedEvent, UserReturnedEvent},
    tracker::{AbsenceEpisode, AbsenceTracker, ReturnNotice},
};

/// Rolling window of recent absence records.
#[derive(Resource, Debug)]
pub struct AbsenceHistory {
    capacity: usize,
    records: VecDeque<AbsenceHistoryRecord>,
}

impl AbsenceHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            records: VecDeque::new(),
        }
    }

    pub fn push(&mut self, record: AbsenceHistoryRecord) {
        while self.records.len() >= self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn records(&self) -> impl Iterator<Item = &AbsenceHistoryRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AbsenceHistoryRecord {
    /// Wall-clock seconds since the Unix epoch.
    pub recorded_at: f64,
    pub event: AbsenceHistoryEvent,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum AbsenceHistoryEvent {
    Departed(AbsenceEpisode),
    Returned(ReturnNotice),
}

pub fn record_absence_history(
    tracker: Res<AbsenceTracker>,
    mut applied: MessageReader<AbsenceAppliedEvent>,
    mut returned: MessageReader<UserReturnedEvent>,
    mut history: ResMut<AbsenceHistory>,
    mut log: ResMut<AbsenceHistoryLog>,
) {
    let now = tracker.now();

    for event in applied.read() {
        let record = AbsenceHistoryRecord {
            recorded_at: now,
            event: AbsenceHistoryEvent::Departed(event.episode.clone()),
        };
        log.push(&record);
        history.push(record);
    }

    for event in returned.read() {
        let record = AbsenceHistoryRecord {
            recorded_at: now,
            event: AbsenceHistoryEvent::Returned(event.notice.clone()),
        };
        log.push(&record);
        history.push(record);
    }
}

/// Pending records waiting to be appended to disk.
#[derive(Resource, Debug)]
pub struct AbsenceHistoryLog {
    output_path: PathBuf,
    pending: Vec<AbsenceHistoryRecord>,
}

impl AbsenceHistoryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: path.into(),
            pending: Vec::new(),
        }
    }

    pub fn push(&mut self, record: &AbsenceHistoryRecord) {
        self.pending.push(record.clone());
    }

    pub fn path(&self) -> &Path {
        &self.output_path
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }

        if let Some(parent) = self.output_path.parent() {
            create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.output_path)?;

        for record in std::mem::take(&mut self.pending) {
            serde_json::to_writer(&mut file, &record)?;
            file.write_all(b"\n")?;
        }

        file.flush()
    }
}

pub fn flush_absence_history_log(mut log: ResMut<AbsenceHistoryLog>) {
    if let Err(err) = log.flush() {
        warn!(
            "Failed to persist absence history to {:?}: {}",
            log.path(),
            err
        );
    }
}
