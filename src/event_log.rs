//! Line-delimited JSON log of game events.
//!
//! One object per line, `{"seq":N,"elapsed_ms":T,"type":"...",...}`, appended to
//! the file named by `BLOCKFALL_EVENT_LOG`.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::GameEvent;

#[derive(Debug, Serialize)]
struct EventRecord<'a> {
    seq: u64,
    elapsed_ms: u64,
    #[serde(flatten)]
    event: EventBody<'a>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum EventBody<'a> {
    Moved {
        dx: i8,
        dy: i8,
    },
    RotateSucceeded {
        rotation: &'static str,
        kick: (i8, i8),
        t_spin: bool,
    },
    RotateFailed,
    Locked {
        kind: &'static str,
        cells: [(i8, i8); 4],
    },
    LinesCleared {
        count: u8,
        rows: &'a [u8],
    },
    Scored {
        points: u32,
        total: u32,
    },
    LevelUp {
        level: u32,
    },
    GameOver,
    Paused,
    Resumed,
    Restarted,
}

impl<'a> From<&'a GameEvent> for EventBody<'a> {
    fn from(event: &'a GameEvent) -> Self {
        match event {
            GameEvent::Moved { dx, dy } => EventBody::Moved { dx: *dx, dy: *dy },
            GameEvent::RotateSucceeded {
                rotation,
                kick,
                t_spin,
            } => EventBody::RotateSucceeded {
                rotation: rotation.as_str(),
                kick: *kick,
                t_spin: *t_spin,
            },
            GameEvent::RotateFailed => EventBody::RotateFailed,
            GameEvent::Locked { kind, cells } => EventBody::Locked {
                kind: kind.as_str(),
                cells: *cells,
            },
            GameEvent::LinesCleared { count, rows } => EventBody::LinesCleared {
                count: *count,
                rows: rows.as_slice(),
            },
            GameEvent::Scored { points, total } => EventBody::Scored {
                points: *points,
                total: *total,
            },
            GameEvent::LevelUp(level) => EventBody::LevelUp { level: *level },
            GameEvent::GameOver => EventBody::GameOver,
            GameEvent::Paused => EventBody::Paused,
            GameEvent::Resumed => EventBody::Resumed,
            GameEvent::Restarted => EventBody::Restarted,
        }
    }
}

/// Appends game events to a writer, one JSON object per line
#[derive(Debug)]
pub struct EventLog<W: Write = BufWriter<File>> {
    out: W,
    seq: u64,
    buf: Vec<u8>,
}

impl EventLog {
    /// Open `path` in append mode, creating it if needed
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening event log {}", path.display()))?;
        Ok(Self::from_writer(BufWriter::new(file)))
    }
}

impl<W: Write> EventLog<W> {
    pub fn from_writer(out: W) -> Self {
        Self {
            out,
            seq: 0,
            buf: Vec::with_capacity(256),
        }
    }

    /// Number of events written so far
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Write one event stamped with the game clock
    pub fn record(&mut self, elapsed_ms: u64, event: &GameEvent) -> Result<()> {
        self.seq += 1;
        let record = EventRecord {
            seq: self.seq,
            elapsed_ms,
            event: EventBody::from(event),
        };

        self.buf.clear();
        serde_json::to_writer(&mut self.buf, &record)?;
        self.buf.push(b'\n');
        self.out.write_all(&self.buf)?;
        Ok(())
    }

    /// Write every event from one step, then flush
    pub fn record_all<'e>(
        &mut self,
        elapsed_ms: u64,
        events: impl IntoIterator<Item = &'e GameEvent>,
    ) -> Result<()> {
        for event in events {
            self.record(elapsed_ms, event)?;
        }
        self.flush()
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
