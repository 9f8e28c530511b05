use cdm_model::{ClassKind, Deprecatable, LibraryId, MeasurementUnit, ReferenceLibrary, Thing};
use cdm_rows::{DataItemRow, DeprecatableRowTable, Row, RowTable};
use cdm_session::{SessionAccess, SessionError, ThingChangeSet, Transaction};
use cdm_test_utils::{init_tracing, test_session};
use pretty_assertions::assert_eq;

type UnitRow = DataItemRow<MeasurementUnit>;

fn unit(name: &str, short_name: &str, library: LibraryId) -> MeasurementUnit {
    MeasurementUnit::new(name, short_name, library)
}

#[tokio::test]
async fn table_follows_session_change_batches() {
    init_tracing();
    let session = test_session(&[ClassKind::MeasurementUnit]);
    let library = ReferenceLibrary::new("Generic RDL", "RDL");

    let metre = unit("metre", "m", library.iid);
    let second = unit("Second", "s", library.iid);
    session.seed_thing(metre.clone());
    session.seed_thing(second.clone());

    let mut table: RowTable<UnitRow> = RowTable::new();
    table.initialize(session.cached_of::<MeasurementUnit>(), session.as_ref());
    assert_eq!(
        table.rows().map(Row::name).collect::<Vec<_>>(),
        vec!["metre", "Second"]
    );

    let mut batches = session.bus().subscribe::<ThingChangeSet<MeasurementUnit>>();

    let mut renamed = metre.clone();
    renamed.name = "meter".to_string();
    let kelvin = unit("kelvin", "K", library.iid);
    session
        .submit(
            Transaction::new()
                .update(renamed)
                .create(kelvin)
                .delete(second.iid.as_uuid()),
        )
        .await
        .unwrap();

    let batch = batches.recv().await.unwrap();
    table.apply_change_set(&batch, session.as_ref());

    assert_eq!(
        table.rows().map(Row::name).collect::<Vec<_>>(),
        vec!["meter", "kelvin"]
    );
    assert!(table.rows().all(Row::is_allowed_to_write));
}

#[tokio::test]
async fn container_rename_reaches_contained_rows() {
    init_tracing();
    let session = test_session(&[]);
    let library = ReferenceLibrary::new("Generic RDL", "RDL");
    let other = ReferenceLibrary::new("Project RDL", "PRDL");

    session.seed_thing(unit("metre", "m", library.iid));
    session.seed_thing(unit("point", "pt", other.iid));

    let mut table: RowTable<UnitRow> = RowTable::new();
    table.initialize(session.cached_of::<MeasurementUnit>(), session.as_ref());

    table.refresh_container_name(library.iid.as_uuid(), "Generic RDL v2");

    for row in table.rows() {
        if row.item().container() == Some(library.iid.as_uuid()) {
            assert_eq!(row.container_name(), "Generic RDL v2");
        } else {
            assert_eq!(row.container_name(), "");
        }
    }
}

#[tokio::test]
async fn deprecation_toggle_round_trips_through_session() {
    init_tracing();
    let session = test_session(&[ClassKind::MeasurementUnit]);
    let library = ReferenceLibrary::new("Generic RDL", "RDL");
    let metre = unit("metre", "m", library.iid);
    session.seed_thing(metre.clone());

    let mut table: DeprecatableRowTable<UnitRow> = DeprecatableRowTable::new();
    table
        .table_mut()
        .initialize(session.cached_of::<MeasurementUnit>(), session.as_ref());

    let mut batches = session.bus().subscribe::<ThingChangeSet<MeasurementUnit>>();

    table
        .toggle_deprecation(session.as_ref(), metre.iid.as_uuid())
        .await
        .unwrap();
    assert!(!table.is_loading());

    // the session published the update; the table catches up from the batch
    let batch = batches.recv().await.unwrap();
    table.apply_change_set(&batch, session.as_ref());

    let row = table.table().get(metre.iid.as_uuid()).unwrap();
    assert!(row.item().is_deprecated());

    // toggling again un-deprecates
    table
        .toggle_deprecation(session.as_ref(), metre.iid.as_uuid())
        .await
        .unwrap();
    let batch = batches.recv().await.unwrap();
    table.apply_change_set(&batch, session.as_ref());
    assert!(!table.table().get(metre.iid.as_uuid()).unwrap().item().is_deprecated());
}

#[tokio::test]
async fn failed_toggle_resets_loading_and_leaves_rows_unchanged() {
    init_tracing();
    let session = test_session(&[ClassKind::MeasurementUnit]);
    let library = ReferenceLibrary::new("Generic RDL", "RDL");
    let metre = unit("metre", "m", library.iid);
    session.seed_thing(metre.clone());

    let mut table: DeprecatableRowTable<UnitRow> = DeprecatableRowTable::new();
    table
        .table_mut()
        .initialize(session.cached_of::<MeasurementUnit>(), session.as_ref());

    session.set_offline(true);
    let result = table
        .toggle_deprecation(session.as_ref(), metre.iid.as_uuid())
        .await;

    assert!(matches!(result, Err(SessionError::ConnectionLost)));
    assert!(!table.is_loading());
    let row = table.table().get(metre.iid.as_uuid()).unwrap();
    assert!(!row.item().is_deprecated());

    // the session cache is untouched as well
    let cached: MeasurementUnit = session.thing(metre.iid.as_uuid()).unwrap().try_into().unwrap();
    assert!(!cached.is_deprecated());
}

#[tokio::test]
async fn toggle_without_row_is_a_caller_bug() {
    init_tracing();
    let session = test_session(&[]);
    let table: DeprecatableRowTable<UnitRow> = DeprecatableRowTable::new();

    let result = table
        .toggle_deprecation(session.as_ref(), uuid::Uuid::new_v4())
        .await;
    assert!(matches!(result, Err(SessionError::ThingNotFound(_))));
}
