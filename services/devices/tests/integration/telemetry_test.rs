use chrono::{Duration, Utc};
use uuid::Uuid;

use iothub_devices::domain::repository::TelemetryRepository;
use iothub_devices::error::DevicesServiceError;
use iothub_devices::usecase::telemetry::{
    HistoryInput, HistoryUseCase, RecordReadingInput, RecordReadingUseCase,
};
use iothub_domain::device::DeviceStatus;

use crate::helpers::{MockDeviceRepo, MockTelemetryRepo, reading_at, test_device, test_owner_id};

#[tokio::test]
async fn should_project_last_reading_onto_device() {
    let device = test_device(test_owner_id());
    let repo = MockDeviceRepo::new(vec![device.clone()]);
    let devices_handle = repo.devices_handle();
    let telemetry = MockTelemetryRepo::new(devices_handle.clone());
    let readings_handle = telemetry.readings_handle();

    let uc = RecordReadingUseCase {
        devices: repo,
        telemetry,
    };

    let updated = uc
        .execute(
            test_owner_id(),
            RecordReadingInput {
                device_id: device.id,
                value: 21.5,
            },
        )
        .await
        .unwrap();

    // The caller observes the refreshed projection in the same round trip.
    assert_eq!(updated.current_value, 21.5);
    assert_eq!(
        updated.status,
        DeviceStatus::Online,
        "an accepted reading flips the device online"
    );

    let devices = devices_handle.lock().unwrap();
    assert_eq!(devices[0].current_value, 21.5);
    assert_eq!(devices[0].last_updated, updated.last_updated);
    assert_eq!(readings_handle.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_recording_against_foreign_device() {
    let theirs = test_device(Uuid::new_v4());
    let repo = MockDeviceRepo::new(vec![theirs.clone()]);
    let devices_handle = repo.devices_handle();
    let telemetry = MockTelemetryRepo::new(devices_handle);
    let readings_handle = telemetry.readings_handle();

    let uc = RecordReadingUseCase {
        devices: repo,
        telemetry,
    };

    let result = uc
        .execute(
            test_owner_id(),
            RecordReadingInput {
                device_id: theirs.id,
                value: 5.0,
            },
        )
        .await;

    assert!(
        matches!(result, Err(DevicesServiceError::DeviceNotFound)),
        "expected DeviceNotFound, got {result:?}"
    );
    assert!(
        readings_handle.lock().unwrap().is_empty(),
        "rejected write must not land in the log"
    );
}

#[tokio::test]
async fn should_not_roll_projection_backwards_on_stale_write() {
    let device = test_device(test_owner_id());
    let devices_handle = MockDeviceRepo::new(vec![device.clone()]).devices_handle();
    let telemetry = MockTelemetryRepo::new(devices_handle.clone());

    let now = Utc::now();
    telemetry
        .record(&reading_at(device.id, 30.0, now))
        .await
        .unwrap();
    // A writer that captured its value earlier commits after the newer one.
    let after_stale = telemetry
        .record(&reading_at(device.id, 10.0, now - Duration::seconds(5)))
        .await
        .unwrap();

    assert_eq!(
        after_stale.current_value, 30.0,
        "the stale writer is handed the projection as committed, not its own value"
    );

    let devices = devices_handle.lock().unwrap();
    assert_eq!(
        devices[0].current_value, 30.0,
        "stale writer must not overwrite a newer projection"
    );
    assert_eq!(devices[0].last_updated, now);
    assert_eq!(
        telemetry.readings_handle().lock().unwrap().len(),
        2,
        "the stale reading still belongs in the log"
    );
}

#[tokio::test]
async fn should_return_history_ascending_within_window() {
    let device = test_device(test_owner_id());
    let repo = MockDeviceRepo::new(vec![device.clone()]);
    let telemetry = MockTelemetryRepo::new(repo.devices_handle());

    let now = Utc::now();
    // Inserted out of order; one reading falls outside the default window.
    telemetry
        .record(&reading_at(device.id, 2.0, now - Duration::hours(2)))
        .await
        .unwrap();
    telemetry
        .record(&reading_at(device.id, 1.0, now - Duration::hours(30)))
        .await
        .unwrap();
    telemetry
        .record(&reading_at(device.id, 3.0, now - Duration::minutes(5)))
        .await
        .unwrap();

    let uc = HistoryUseCase {
        devices: repo,
        telemetry,
    };

    let readings = uc
        .execute(
            test_owner_id(),
            HistoryInput {
                device_id: device.id,
                hours: None,
            },
        )
        .await
        .unwrap();

    let values: Vec<f64> = readings.iter().map(|r| r.value).collect();
    assert_eq!(
        values,
        vec![2.0, 3.0],
        "default 24h window, oldest first, out-of-window reading excluded"
    );
}

#[tokio::test]
async fn should_honor_explicit_history_window() {
    let device = test_device(test_owner_id());
    let repo = MockDeviceRepo::new(vec![device.clone()]);
    let telemetry = MockTelemetryRepo::new(repo.devices_handle());

    let now = Utc::now();
    telemetry
        .record(&reading_at(device.id, 1.0, now - Duration::hours(30)))
        .await
        .unwrap();
    telemetry
        .record(&reading_at(device.id, 2.0, now - Duration::hours(2)))
        .await
        .unwrap();

    let uc = HistoryUseCase {
        devices: repo,
        telemetry,
    };

    let readings = uc
        .execute(
            test_owner_id(),
            HistoryInput {
                device_id: device.id,
                hours: Some(48),
            },
        )
        .await
        .unwrap();

    assert_eq!(readings.len(), 2, "a wider window includes older readings");
    assert_eq!(readings[0].value, 1.0);
}

#[tokio::test]
async fn should_treat_oversized_history_window_as_unbounded() {
    let device = test_device(test_owner_id());
    let repo = MockDeviceRepo::new(vec![device.clone()]);
    let telemetry = MockTelemetryRepo::new(repo.devices_handle());

    let now = Utc::now();
    telemetry
        .record(&reading_at(device.id, 1.0, now - Duration::hours(30)))
        .await
        .unwrap();
    telemetry
        .record(&reading_at(device.id, 2.0, now - Duration::minutes(5)))
        .await
        .unwrap();

    let uc = HistoryUseCase {
        devices: repo,
        telemetry,
    };

    // A window too large for chrono must not abort the request; it just
    // means "everything".
    let readings = uc
        .execute(
            test_owner_id(),
            HistoryInput {
                device_id: device.id,
                hours: Some(i64::MAX),
            },
        )
        .await
        .unwrap();

    assert_eq!(readings.len(), 2);
    assert_eq!(readings[0].value, 1.0);
}

#[tokio::test]
async fn should_hide_foreign_device_history_behind_not_found() {
    let theirs = test_device(Uuid::new_v4());
    let repo = MockDeviceRepo::new(vec![theirs.clone()]);
    let telemetry = MockTelemetryRepo::new(repo.devices_handle());

    let uc = HistoryUseCase {
        devices: repo,
        telemetry,
    };

    let result = uc
        .execute(
            test_owner_id(),
            HistoryInput {
                device_id: theirs.id,
                hours: None,
            },
        )
        .await;

    assert!(matches!(result, Err(DevicesServiceError::DeviceNotFound)));
}

#[tokio::test]
async fn should_follow_create_record_read_scenario() {
    let device = test_device(test_owner_id());
    let repo = MockDeviceRepo::new(vec![device.clone()]);
    let devices_handle = repo.devices_handle();
    let telemetry = MockTelemetryRepo::new(devices_handle.clone());

    let record = RecordReadingUseCase {
        devices: MockDeviceRepo {
            devices: devices_handle.clone(),
        },
        telemetry: MockTelemetryRepo {
            readings: telemetry.readings_handle(),
            devices: devices_handle.clone(),
        },
    };

    let mut last_view = None;
    for value in [18.0, 19.5, 22.0] {
        last_view = Some(
            record
                .execute(
                    test_owner_id(),
                    RecordReadingInput {
                        device_id: device.id,
                        value,
                    },
                )
                .await
                .unwrap(),
        );
    }

    // Projection reflects the last accepted reading, both in the returned
    // view and in the store.
    let last_view = last_view.unwrap();
    assert_eq!(last_view.current_value, 22.0);
    assert_eq!(last_view.status, DeviceStatus::Online);
    {
        let devices = devices_handle.lock().unwrap();
        assert_eq!(devices[0].current_value, 22.0);
        assert_eq!(devices[0].status, DeviceStatus::Online);
    }

    let uc = HistoryUseCase {
        devices: repo,
        telemetry,
    };
    let readings = uc
        .execute(
            test_owner_id(),
            HistoryInput {
                device_id: device.id,
                hours: None,
            },
        )
        .await
        .unwrap();

    let values: Vec<f64> = readings.iter().map(|r| r.value).collect();
    assert_eq!(values, vec![18.0, 19.5, 22.0], "full log in capture order");
}
