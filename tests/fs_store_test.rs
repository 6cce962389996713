use clinic::error::ClinicError;
use clinic::model::{Gender, Patient, PatientDraft};
use clinic::registry::PatientRegistry;
use clinic::store::fs::JsonFileStore;
use clinic::store::PatientStore;
use std::fs;
use tempfile::TempDir;

fn patient(id: u32, last: &str, first: &str) -> Patient {
    Patient {
        id,
        last_name: last.to_string(),
        first_name: first.to_string(),
        middle_name: Some("Иванович".to_string()),
        birth_date: "12.03.1975".to_string(),
        gender: Gender::Male,
        address: "ул. Ленина, 5".to_string(),
        phone: "+7 900 000-00-00".to_string(),
        email: None,
        insurance_number: "1234 5678".to_string(),
        registration_date: "01.09.2024 10:15".to_string(),
        medical_history: "Аллергия на пенициллин".to_string(),
        diagnosis: "ОРВИ".to_string(),
        attending_doctor: "Смирнова А.В.".to_string(),
    }
}

#[test]
fn missing_file_loads_empty() {
    let temp = TempDir::new().unwrap();
    let store = JsonFileStore::new(temp.path().join("patients.json"));
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn round_trip_keeps_non_ascii_text() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("patients.json");
    let mut store = JsonFileStore::new(&path);

    let patients = vec![patient(1, "Петров", "Иван"), patient(2, "Smith", "John")];
    store.save(&patients).unwrap();

    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.contains("Петров"), "snapshot should hold readable text");
    assert_eq!(store.load().unwrap(), patients);
}

#[test]
fn malformed_file_is_a_load_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("patients.json");
    fs::write(&path, "{ not a roster").unwrap();

    let err = JsonFileStore::new(&path).load().unwrap_err();
    assert!(err.is_load());
    assert!(matches!(err, ClinicError::Load { path: p, .. } if p == path));
}

#[test]
fn save_creates_missing_directories_and_leaves_no_temp_files() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("nested").join("data");
    let mut store = JsonFileStore::new(dir.join("patients.json"));

    store.save(&[patient(1, "Петров", "Иван")]).unwrap();
    store.save(&[]).unwrap();

    let names: Vec<String> = fs::read_dir(&dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["patients.json".to_string()]);
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn reads_legacy_gender_labels() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("patients.json");
    let mut value = serde_json::to_value(vec![patient(1, "Петрова", "Анна")]).unwrap();
    value[0]["gender"] = serde_json::Value::String("Женский".to_string());
    fs::write(&path, serde_json::to_string(&value).unwrap()).unwrap();

    let loaded = JsonFileStore::new(&path).load().unwrap();
    assert_eq!(loaded[0].gender, Gender::Female);
}

#[test]
fn registry_persists_through_reopen() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("patients.json");

    let (mut registry, err) = PatientRegistry::open(JsonFileStore::new(&path));
    assert!(err.is_none());
    registry
        .add(PatientDraft::new("Сидоров", "Пётр", Gender::Male))
        .unwrap();
    registry
        .add(PatientDraft::new("Smith", "Anna", Gender::Female))
        .unwrap();
    registry.delete(1).unwrap();

    let (reopened, err) = PatientRegistry::open(JsonFileStore::new(&path));
    assert!(err.is_none());
    assert_eq!(reopened.len(), 1);
    assert_eq!(reopened.patients()[0].id, 2);
    assert_eq!(reopened.next_id(), 3);
}

#[test]
fn unreadable_file_is_backed_up_before_overwrite() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("patients.json");
    fs::write(&path, "[{\"id\": 1, \"last_name\": \"Петров\"").unwrap();

    let mut store = JsonFileStore::new(&path);
    assert!(store.load().unwrap_err().is_load());
    store.save(&[patient(1, "Smith", "John")]).unwrap();

    let backup = temp.path().join("patients.json.bak");
    assert_eq!(store.backup_path(), backup);
    assert_eq!(
        fs::read_to_string(&backup).unwrap(),
        "[{\"id\": 1, \"last_name\": \"Петров\""
    );
    assert_eq!(store.load().unwrap().len(), 1);

    // Only the first overwrite after a failed load is backed up.
    store.save(&[]).unwrap();
    assert!(fs::read_to_string(&backup).unwrap().contains("Петров"));
}

#[test]
fn readable_file_is_not_backed_up() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("patients.json");
    let mut store = JsonFileStore::new(&path);

    store.save(&[patient(1, "Smith", "John")]).unwrap();
    store.load().unwrap();
    store.save(&[]).unwrap();

    assert!(!temp.path().join("patients.json.bak").exists());
}
