//! Dispatcher behavior: reference transforms, failure containment, merge
//! purity and same-record serialization.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, bail};
use async_trait::async_trait;

use importkit_hooks::reference::{email_change_hook, email_column_hook, email_init_hook};
use importkit_hooks::{
    ColumnEntry, FieldHook, HookDispatcher, PatchEntry, RecordEvent, RecordHook, RecordSlot,
    field_hook_fn, record_hook_fn,
};
use importkit_model::{CellValue, FieldPatch, HookResponse, IssueKind, Record, Severity};

fn email_record(value: &str) -> Record {
    Record::from_values([("email", CellValue::from(value))])
}

#[tokio::test]
async fn column_hook_appends_marker_to_every_element() {
    let dispatcher =
        HookDispatcher::new().with_field_hook("email", Arc::new(email_column_hook()));
    assert_eq!(dispatcher.field_hook_keys().collect::<Vec<_>>(), vec!["email"]);

    let column: Vec<ColumnEntry> = vec![
        (CellValue::from("alice"), 0),
        (CellValue::from("bob"), 1),
    ];
    let patches = dispatcher.run_column("email", column).await;

    assert_eq!(patches.len(), 2);
    assert_eq!(patches[0].0.value, CellValue::from("alice@"));
    assert_eq!(patches[0].1, 0);
    assert_eq!(patches[1].0.value, CellValue::from("bob@"));
    assert_eq!(patches[1].1, 1);
    for (patch, _) in &patches {
        assert_eq!(patch.info.len(), 1);
        assert_eq!(patch.info[0].message, "added @ after the email");
        assert_eq!(patch.info[0].level, Severity::Warning);
    }
}

#[tokio::test]
async fn init_and_change_hooks_produce_the_reference_patches() {
    let record = email_record("x");

    let init = email_init_hook().on_record(&record, 0).await.expect("init hook");
    let patch = init.get("email").expect("email patch");
    assert_eq!(patch.value, CellValue::from("x@"));
    assert_eq!(patch.info.len(), 1);
    assert_eq!(patch.info[0].message, "added @ on init");
    assert_eq!(patch.info[0].level, Severity::Info);

    let change = email_change_hook().on_record(&record, 0).await.expect("change hook");
    let patch = change.get("email").expect("email patch");
    assert_eq!(patch.value, CellValue::from("x#"));
    assert_eq!(patch.info[0].message, "added # on change");
    assert_eq!(patch.info[0].level, Severity::Warning);
}

#[tokio::test]
async fn record_events_merge_only_patched_fields() {
    let dispatcher = HookDispatcher::new().with_record_init(Arc::new(email_init_hook()));
    let slot: RecordSlot = RecordSlot::new(Record::from_values([
        ("email", CellValue::from("x")),
        ("fullName", CellValue::from("Ada")),
    ]));

    dispatcher.apply_record_event(RecordEvent::Init, 0, &slot).await;

    let record = slot.lock().await;
    assert_eq!(record.value("email"), Some(&CellValue::from("x@")));
    assert_eq!(record.value("fullName"), Some(&CellValue::from("Ada")));
    assert!(record.field_notes("fullName").is_empty());
}

#[tokio::test]
async fn failing_record_hook_is_contained_to_its_record() {
    let hook = |_record: &Record, index: usize| -> Result<HookResponse> {
        if index == 1 {
            bail!("lookup service unavailable");
        }
        Ok(HookResponse::single(
            "email",
            FieldPatch::new("ok"),
        ))
    };
    let dispatcher = HookDispatcher::new().with_record_init(Arc::new(record_hook_fn(hook)));

    let slots: Vec<RecordSlot> = (0..3).map(|_| RecordSlot::new(email_record("x"))).collect();
    for (index, slot) in slots.iter().enumerate() {
        dispatcher.apply_record_event(RecordEvent::Init, index, slot).await;
    }

    let ok_record = slots[0].lock().await;
    assert_eq!(ok_record.value("email"), Some(&CellValue::from("ok")));
    assert!(ok_record.notes().is_empty());

    let failed = slots[1].lock().await;
    // prior value kept, failure reported as a record-scoped diagnostic
    assert_eq!(failed.value("email"), Some(&CellValue::from("x")));
    assert_eq!(failed.notes().len(), 1);
    assert_eq!(failed.notes()[0].kind, Some(IssueKind::HookExecutionFailure));
    assert_eq!(failed.notes()[0].level, Severity::Error);

    let ok_record = slots[2].lock().await;
    assert_eq!(ok_record.value("email"), Some(&CellValue::from("ok")));
}

#[tokio::test]
async fn failing_field_hook_keeps_values_and_spares_other_fields() {
    struct Broken;

    #[async_trait]
    impl FieldHook for Broken {
        async fn transform(&self, _column: Vec<ColumnEntry>) -> Result<Vec<PatchEntry>> {
            bail!("remote normalizer down")
        }
    }

    let dispatcher = HookDispatcher::new()
        .with_field_hook("email", Arc::new(Broken))
        .with_field_hook("personnelCode", Arc::new(email_column_hook_for("personnelCode")));

    let mut batch = vec![Record::from_values([
        ("email", CellValue::from("a@x.io")),
        ("personnelCode", CellValue::from("p1")),
    ])];
    dispatcher.run_field_hooks(&mut batch).await;

    // broken hook: value unchanged, failure diagnostic attached to the field
    assert_eq!(batch[0].value("email"), Some(&CellValue::from("a@x.io")));
    let notes = batch[0].field_notes("email");
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].kind, Some(IssueKind::HookExecutionFailure));

    // the other registered hook still ran
    assert_eq!(batch[0].value("personnelCode"), Some(&CellValue::from("p1@")));
}

fn email_column_hook_for(field: &str) -> importkit_hooks::reference::MarkerHook {
    importkit_hooks::reference::MarkerHook::new(field, '@', Severity::Warning, "marked")
}

#[tokio::test]
async fn out_of_order_patches_are_restored_by_index() {
    let reversing = |column: Vec<ColumnEntry>| -> Result<Vec<PatchEntry>> {
        let mut patches: Vec<PatchEntry> = column
            .into_iter()
            .map(|(value, index)| {
                (
                    FieldPatch::new(format!("{}!", value.as_text())),
                    index,
                )
            })
            .collect();
        patches.reverse();
        Ok(patches)
    };
    let dispatcher =
        HookDispatcher::new().with_field_hook("email", Arc::new(field_hook_fn(reversing)));

    let column = vec![
        (CellValue::from("a"), 0),
        (CellValue::from("b"), 1),
        (CellValue::from("c"), 2),
    ];
    let patches = dispatcher.run_column("email", column).await;

    let indices: Vec<usize> = patches.iter().map(|(_, index)| *index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
    assert_eq!(patches[2].0.value, CellValue::from("c!"));
}

#[tokio::test]
async fn same_record_events_apply_in_arrival_order() {
    struct SlowInit;

    #[async_trait]
    impl RecordHook for SlowInit {
        async fn on_record(&self, record: &Record, _index: usize) -> Result<HookResponse> {
            let current = record.value_or_null("email").as_text();
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(HookResponse::single(
                "email",
                FieldPatch::new(format!("{current}@")),
            ))
        }
    }

    let dispatcher = Arc::new(
        HookDispatcher::new()
            .with_record_init(Arc::new(SlowInit))
            .with_record_change(Arc::new(email_change_hook())),
    );
    let slot = Arc::new(RecordSlot::new(email_record("x")));

    let init = {
        let dispatcher = Arc::clone(&dispatcher);
        let slot = Arc::clone(&slot);
        tokio::spawn(async move {
            dispatcher.apply_record_event(RecordEvent::Init, 0, &slot).await;
        })
    };
    // give the init task time to take the slot lock
    tokio::time::sleep(Duration::from_millis(10)).await;
    dispatcher.apply_record_event(RecordEvent::Change, 0, &slot).await;
    init.await.expect("init task");

    // the change hook observed the fully merged init result
    let record = slot.lock().await;
    assert_eq!(record.value("email"), Some(&CellValue::from("x@#")));
}
