//! Device state store on byte-addressable non-volatile storage.

use core::fmt::Debug;

use embedded_storage::Storage;
use log::{debug, error, info};

use crate::domain::entity::DeviceState;
use crate::domain::ports::{LightStateStore, StoreError};
use crate::infrastructure::repositories::state_record::{
    STATE_RECORD_SIZE, StateRecord, decode_state, encode_state,
};

/// Persistent state store over any [`Storage`] medium.
///
/// The record occupies [`STATE_RECORD_SIZE`] bytes starting at `offset`.
pub struct PersistentStateStore<F: Storage> {
    storage: F,
    offset: u32,
}

impl<F> PersistentStateStore<F>
where
    F: Storage,
    F::Error: Debug,
{
    pub const fn new(storage: F, offset: u32) -> Self {
        Self { storage, offset }
    }

    fn check_bounds(&self) -> Result<(), StoreError> {
        let end = self.offset as usize + STATE_RECORD_SIZE;
        if end > self.storage.capacity() {
            error!(
                "storage: record at {:#x} exceeds capacity {}",
                self.offset,
                self.storage.capacity()
            );
            return Err(StoreError::OutOfBounds);
        }
        Ok(())
    }

    fn read(&mut self, offset: u32, buffer: &mut [u8]) -> Result<(), StoreError> {
        self.storage.read(offset, buffer).map_err(|e| {
            error!("storage: read at {:#x} failed: {:?}", offset, e);
            StoreError::Read
        })
    }

    /// Read the record back and compare it with what was written
    fn verify(&mut self, expected: &[u8; STATE_RECORD_SIZE]) -> Result<(), StoreError> {
        let mut stored = [0u8; STATE_RECORD_SIZE];
        self.read(self.offset, &mut stored)?;
        if &stored != expected {
            error!("storage: record mismatch after write: {:?}", stored);
            return Err(StoreError::CommitMismatch);
        }
        Ok(())
    }
}

impl<F> LightStateStore for PersistentStateStore<F>
where
    F: Storage,
    F::Error: Debug,
{
    fn save(&mut self, state: &DeviceState) -> Result<(), StoreError> {
        self.check_bounds()?;

        let record = encode_state(state);
        debug!("storage: saving light state at {:#x}", self.offset);
        self.storage.write(self.offset, &record).map_err(|e| {
            error!("storage: write at {:#x} failed: {:?}", self.offset, e);
            StoreError::Write
        })?;
        self.verify(&record)?;

        debug!("storage: light state committed");
        Ok(())
    }

    fn restore(&mut self) -> Result<DeviceState, StoreError> {
        self.check_bounds()?;

        // Bytes after an invalid marker may be garbage and are not read
        let mut marker = [0u8; 1];
        self.read(self.offset, &mut marker)?;
        if !StateRecord::is_valid_marker(marker[0]) {
            info!("storage: no valid light state stored, using defaults");
            return Ok(DeviceState::new());
        }

        let mut record = [0u8; STATE_RECORD_SIZE];
        record[0] = marker[0];
        self.read(self.offset + 1, &mut record[1..])?;

        Ok(decode_state(record).unwrap_or_default())
    }
}
