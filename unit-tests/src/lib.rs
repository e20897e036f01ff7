//! Host-side test doubles for the light node.
//!
//! The doubles are cheap handles over shared state, so a test can keep a
//! clone to inspect after handing the other one to the code under test.

use std::cell::RefCell;
use std::rc::Rc;

use embedded_storage::{ReadStorage, Storage};
use esp_rgbw_light::DeviceState;
use esp_rgbw_light::domain::ports::{DriverError, LightDriver, PublishError, StatePublisher};

/// Value of an erased flash byte
pub const ERASED: u8 = 0xFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediumError;

#[derive(Debug, Default)]
struct Medium {
    data: Vec<u8>,
    reads: Vec<(u32, usize)>,
    writes: usize,
    fail_read: bool,
    fail_write: bool,
    drop_writes: bool,
}

/// In-memory byte-addressable storage, initially erased.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    medium: Rc<RefCell<Medium>>,
}

impl MemoryStorage {
    pub fn new(capacity: usize) -> Self {
        Self {
            medium: Rc::new(RefCell::new(Medium {
                data: vec![ERASED; capacity],
                ..Medium::default()
            })),
        }
    }

    /// Copy `bytes` to `offset`, bypassing failure injection
    pub fn preload(&self, offset: u32, bytes: &[u8]) {
        let start = offset as usize;
        self.medium.borrow_mut().data[start..start + bytes.len()].copy_from_slice(bytes);
    }

    pub fn bytes(&self, offset: u32, len: usize) -> Vec<u8> {
        let start = offset as usize;
        self.medium.borrow().data[start..start + len].to_vec()
    }

    /// Every read as `(offset, length)`, in order
    pub fn reads(&self) -> Vec<(u32, usize)> {
        self.medium.borrow().reads.clone()
    }

    pub fn bytes_read(&self) -> usize {
        self.medium.borrow().reads.iter().map(|(_, len)| len).sum()
    }

    pub fn writes(&self) -> usize {
        self.medium.borrow().writes
    }

    pub fn set_fail_read(&self, fail: bool) {
        self.medium.borrow_mut().fail_read = fail;
    }

    pub fn set_fail_write(&self, fail: bool) {
        self.medium.borrow_mut().fail_write = fail;
    }

    /// Accept writes without storing them
    pub fn set_drop_writes(&self, drop: bool) {
        self.medium.borrow_mut().drop_writes = drop;
    }
}

impl ReadStorage for MemoryStorage {
    type Error = MediumError;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        let mut medium = self.medium.borrow_mut();
        if medium.fail_read {
            return Err(MediumError);
        }
        let start = offset as usize;
        let end = start + bytes.len();
        if end > medium.data.len() {
            return Err(MediumError);
        }
        medium.reads.push((offset, bytes.len()));
        bytes.copy_from_slice(&medium.data[start..end]);
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.medium.borrow().data.len()
    }
}

impl Storage for MemoryStorage {
    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        let mut medium = self.medium.borrow_mut();
        if medium.fail_write {
            return Err(MediumError);
        }
        let start = offset as usize;
        let end = start + bytes.len();
        if end > medium.data.len() {
            return Err(MediumError);
        }
        medium.writes += 1;
        if !medium.drop_writes {
            medium.data[start..end].copy_from_slice(bytes);
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct DriverLog {
    rendered: Vec<DeviceState>,
    fail: bool,
}

/// Light driver that records every rendered state
#[derive(Debug, Clone, Default)]
pub struct RecordingDriver {
    log: Rc<RefCell<DriverLog>>,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rendered(&self) -> Vec<DeviceState> {
        self.log.borrow().rendered.clone()
    }

    pub fn last(&self) -> Option<DeviceState> {
        self.log.borrow().rendered.last().copied()
    }

    pub fn set_fail(&self, fail: bool) {
        self.log.borrow_mut().fail = fail;
    }
}

impl LightDriver for RecordingDriver {
    fn render(&mut self, state: &DeviceState) -> Result<(), DriverError> {
        let mut log = self.log.borrow_mut();
        if log.fail {
            return Err(DriverError::Output);
        }
        log.rendered.push(*state);
        Ok(())
    }
}

/// State publisher that keeps every payload
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    pub published: Vec<Vec<u8>>,
    pub fail: bool,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_str(&self) -> Option<&str> {
        self.published
            .last()
            .and_then(|payload| std::str::from_utf8(payload).ok())
    }
}

impl StatePublisher for RecordingPublisher {
    fn publish_state(&mut self, payload: &[u8]) -> Result<(), PublishError> {
        if self.fail {
            return Err(PublishError::QueueFull);
        }
        self.published.push(payload.to_vec());
        Ok(())
    }
}
