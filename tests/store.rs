use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde_json::{Value as JsonValue, json};
use taller::core::db;
use taller::core::schemas;
use taller::core::store::{EntityStore, SqliteStore, audit_timestamps};
use tempfile::TempDir;

fn servicio_store() -> (TempDir, SqliteStore) {
    let tmp = tempfile::tempdir().expect("tempdir");
    let db_path: PathBuf = tmp.path().join(schemas::TALLER_DB_NAME);
    db::initialize_db(&db_path).expect("init db");
    let conn = db::db_connect(&db_path).expect("connect");
    let store = SqliteStore::new(
        Arc::new(Mutex::new(conn)),
        "servicios",
        schemas::SERVICIOS_COLUMNS,
        None,
    );
    (tmp, store)
}

fn servicio_fields(nombre: &str, tipo: &str) -> Vec<(String, JsonValue)> {
    let mut fields = vec![
        ("nombre".to_string(), json!(nombre)),
        ("descripcion".to_string(), json!("Descripción")),
        ("tipo".to_string(), json!(tipo)),
        ("precio_base".to_string(), json!(120.5)),
        ("duracion_estimada".to_string(), json!(45)),
        ("estado".to_string(), json!("activo")),
    ];
    fields.extend(audit_timestamps());
    fields
}

#[test]
fn create_and_find_round_trip() {
    let (_tmp, store) = servicio_store();

    let id = store
        .create(&servicio_fields("Cambio de aceite", "mantenimiento"))
        .expect("create");
    assert!(id > 0);

    let record = store.find_by_id(id).expect("find").expect("row");
    assert_eq!(record["id"], json!(id));
    assert_eq!(record["nombre"], json!("Cambio de aceite"));
    assert_eq!(record["precio_base"], json!(120.5));
    assert_eq!(record["duracion_estimada"], json!(45));

    let all = store.find_all().expect("find_all");
    assert_eq!(all.len(), 1);
}

#[test]
fn unknown_fields_are_dropped_on_write() {
    let (_tmp, store) = servicio_store();

    let mut fields = servicio_fields("Alineado", "mantenimiento");
    fields.push(("no_such_column".to_string(), json!("x")));
    fields.push(("id".to_string(), json!(999)));
    let id = store.create(&fields).expect("create ignores unknown fields");
    assert_ne!(id, 999, "id is never written directly");

    let record = store.find_by_id(id).expect("find").expect("row");
    assert!(record.get("no_such_column").is_none());
}

#[test]
fn update_and_delete_report_affected_rows() {
    let (_tmp, store) = servicio_store();
    let id = store
        .create(&servicio_fields("Frenos", "reparacion"))
        .expect("create");

    let updated = store
        .update(id, &[("nombre".to_string(), json!("Frenos y discos"))])
        .expect("update");
    assert!(updated);
    let record = store.find_by_id(id).expect("find").expect("row");
    assert_eq!(record["nombre"], json!("Frenos y discos"));

    assert!(!store
        .update(9999, &[("nombre".to_string(), json!("x"))])
        .expect("update missing"));

    assert!(store.delete(id).expect("delete"));
    assert!(!store.delete(id).expect("delete twice"));
    assert_eq!(store.find_by_id(id).expect("find"), None);
}

#[test]
fn counts_total_and_by_field() {
    let (_tmp, store) = servicio_store();
    store
        .create(&servicio_fields("Cambio de aceite", "mantenimiento"))
        .expect("create");
    store
        .create(&servicio_fields("Alineado", "mantenimiento"))
        .expect("create");
    store
        .create(&servicio_fields("Escaneo", "diagnostico"))
        .expect("create");

    assert_eq!(store.count().expect("count"), 3);
    assert_eq!(
        store.count_by_field("tipo", "mantenimiento").expect("count"),
        2
    );
    assert_eq!(store.count_by_field("tipo", "pintura").expect("count"), 0);
}

#[test]
fn generated_codes_carry_the_entity_prefix() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let db_path = tmp.path().join(schemas::TALLER_DB_NAME);
    db::initialize_db(&db_path).expect("init db");
    let conn = Arc::new(Mutex::new(db::db_connect(&db_path).expect("connect")));

    let pagos = SqliteStore::new(Arc::clone(&conn), "pagos", schemas::PAGOS_COLUMNS, Some("PAG"));
    let code = pagos.generate_code().expect("code");
    assert!(code.starts_with("PAG-"), "{code}");
    assert_ne!(code, pagos.generate_code().expect("second code"));

    let servicios = SqliteStore::new(conn, "servicios", schemas::SERVICIOS_COLUMNS, None);
    assert_eq!(servicios.generate_code(), None);
}
