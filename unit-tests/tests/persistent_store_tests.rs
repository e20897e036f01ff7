//! Integration tests for the flash-backed state store.

use esp_rgbw_light::domain::ports::{LightStateStore, StoreError};
use esp_rgbw_light::infrastructure::repositories::{STATE_RECORD_SIZE, VALID_MARKER};
use esp_rgbw_light::{DeviceState, Effect, PersistentStateStore, Power, RgbColor};
use tests::{ERASED, MemoryStorage};

const OFFSET: u32 = 0x40;

fn sample_state() -> DeviceState {
    DeviceState {
        power: Power::On,
        color: RgbColor::new(255, 128, 0),
        white: 7,
        brightness: 200,
        effect: Effect::CrossFadeFast,
        flashing: false,
    }
}

// -----------------------------------------------------------------------------
// Restore
// -----------------------------------------------------------------------------

#[test]
fn erased_medium_restores_defaults() {
    let storage = MemoryStorage::new(256);
    let mut store = PersistentStateStore::new(storage.clone(), OFFSET);

    assert_eq!(store.restore(), Ok(DeviceState::new()));
}

#[test]
fn invalid_marker_reads_only_the_marker() {
    let storage = MemoryStorage::new(256);
    storage.preload(OFFSET, &[0x5A, 1, 2, 3, 4, 5, 6, 7]);
    let mut store = PersistentStateStore::new(storage.clone(), OFFSET);

    assert_eq!(store.restore(), Ok(DeviceState::new()));
    assert_eq!(storage.reads(), vec![(OFFSET, 1)]);
}

#[test]
fn valid_record_is_trusted_verbatim() {
    let storage = MemoryStorage::new(256);
    storage.preload(OFFSET, &[VALID_MARKER, 1, 10, 20, 30, 40, 50, 4]);
    let mut store = PersistentStateStore::new(storage.clone(), OFFSET);

    assert_eq!(
        store.restore(),
        Ok(DeviceState {
            power: Power::On,
            color: RgbColor::new(10, 20, 30),
            white: 40,
            brightness: 50,
            effect: Effect::Christmas,
            flashing: false,
        })
    );
    assert_eq!(storage.bytes_read(), STATE_RECORD_SIZE);
}

#[test]
fn read_failure_is_reported() {
    let storage = MemoryStorage::new(256);
    storage.set_fail_read(true);
    let mut store = PersistentStateStore::new(storage, OFFSET);

    assert_eq!(store.restore(), Err(StoreError::Read));
}

// -----------------------------------------------------------------------------
// Save
// -----------------------------------------------------------------------------

#[test]
fn saved_state_survives_a_restart() {
    let storage = MemoryStorage::new(256);
    let mut store = PersistentStateStore::new(storage.clone(), OFFSET);
    store.save(&sample_state()).unwrap();
    drop(store);

    let mut rebooted = PersistentStateStore::new(storage, OFFSET);
    assert_eq!(rebooted.restore(), Ok(sample_state()));
}

#[test]
fn save_writes_at_the_configured_offset() {
    let storage = MemoryStorage::new(256);
    let mut store = PersistentStateStore::new(storage.clone(), OFFSET);
    store.save(&sample_state()).unwrap();

    assert_eq!(
        storage.bytes(OFFSET, STATE_RECORD_SIZE),
        vec![VALID_MARKER, 1, 255, 128, 0, 7, 200, 2]
    );
    assert_eq!(storage.bytes(0, OFFSET as usize), vec![ERASED; OFFSET as usize]);
    assert_eq!(storage.writes(), 1);
}

#[test]
fn flashing_is_not_persisted() {
    let storage = MemoryStorage::new(256);
    let mut store = PersistentStateStore::new(storage.clone(), OFFSET);
    let flashing = DeviceState {
        flashing: true,
        ..sample_state()
    };
    store.save(&flashing).unwrap();

    let restored = PersistentStateStore::new(storage, OFFSET).restore().unwrap();
    assert!(!restored.flashing);
    assert_eq!(restored.effect, Effect::CrossFadeFast);
}

#[test]
fn rejected_write_is_reported() {
    let storage = MemoryStorage::new(256);
    storage.set_fail_write(true);
    let mut store = PersistentStateStore::new(storage.clone(), OFFSET);

    assert_eq!(store.save(&sample_state()), Err(StoreError::Write));
    assert_eq!(storage.bytes(OFFSET, 1), vec![ERASED]);
}

#[test]
fn lost_write_fails_the_commit() {
    let storage = MemoryStorage::new(256);
    storage.set_drop_writes(true);
    let mut store = PersistentStateStore::new(storage, OFFSET);

    assert_eq!(store.save(&sample_state()), Err(StoreError::CommitMismatch));
}

#[test]
fn record_past_capacity_is_out_of_bounds() {
    let storage = MemoryStorage::new(16);
    let mut store = PersistentStateStore::new(storage.clone(), 12);

    assert_eq!(store.save(&sample_state()), Err(StoreError::OutOfBounds));
    assert_eq!(store.restore(), Err(StoreError::OutOfBounds));
    assert_eq!(storage.writes(), 0);
}
