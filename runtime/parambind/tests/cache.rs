use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;

use parambind::plan::DefaultMode;
use parambind::{Bind, BindError, Binder, BinderConfig, ErrorKind, FormValues, Kind, Value};

#[derive(Bind, Debug, Default, PartialEq, Clone)]
pub struct Page {
    #[bind(params = "p;Min(1)", default = "1")]
    page: i64,
    #[bind(params = "size;Range(1,100)", default = "-")]
    size: i64,
    #[bind(params = "q;Length(1,32)")]
    query: String,
}

#[test]
fn binders_are_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Binder>();
}

#[test]
fn binders_expose_their_configuration_and_validators() {
    let binder = Binder::with_config(BinderConfig::new().sequence_delimiter(';'));

    assert_eq!(binder.config().sequence_delimiter, ';');
    let names = ["Range", "Min", "Length"];
    assert!(names.iter().all(|name| binder.registry().get(name).is_some()));
    assert!(binder.registry().get("Max").is_none());
    assert_eq!(Binder::new().config(), &BinderConfig::default());
}

#[test]
fn plans_are_compiled_once_and_reused() {
    let binder = Binder::new();

    let first = binder.plan::<Page>().unwrap();
    let second = binder.plan::<Page>().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn plans_describe_each_field_in_declaration_order() {
    let binder = Binder::new();
    let plan = binder.plan::<Page>().unwrap();

    let summary: Vec<_> = plan
        .entries()
        .iter()
        .map(|e| (e.field(), e.key(), e.kind(), e.validators().len()))
        .collect();
    assert_eq!(
        summary,
        [
            ("page", "p", Kind::I64, 1),
            ("size", "size", Kind::I64, 1),
            ("query", "q", Kind::String, 1),
        ]
    );

    let defaults: Vec<_> = plan.entries().iter().map(|e| e.default_mode()).collect();
    assert_eq!(
        defaults,
        [
            &DefaultMode::Value(Value::I64(1)),
            &DefaultMode::Omit,
            &DefaultMode::None,
        ]
    );
}

#[test]
fn concurrent_binds_agree() {
    let binder = Binder::new();
    let input = FormValues::parse("p=0&size=50&q=rust");
    let (binder_ref, input_ref) = (&binder, &input);

    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(move || {
                    let mut page = Page::default();
                    binder_ref.bind(&mut page, input_ref).map(|()| page)
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap().unwrap())
            .collect()
    });

    let expected = Page {
        page: 1,
        size: 50,
        query: "rust".into(),
    };
    assert!(results.iter().all(|page| page == &expected));
    assert!(Arc::ptr_eq(
        &binder.plan::<Page>().unwrap(),
        &binder.plan::<Page>().unwrap()
    ));
}

#[test]
fn dynamic_binds_require_a_registered_type() {
    let binder = Binder::new();
    let input = FormValues::parse("p=2&q=rust");
    let mut record: Box<dyn Any> = Box::new(Page::default());

    let err = binder.bind_dyn(record.as_mut(), &input).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ObjType);
    assert!(matches!(err, BindError::ObjType(_)));
    assert_eq!(record.downcast_ref::<Page>(), Some(&Page::default()));

    binder.register::<Page>().unwrap();
    binder.bind_dyn(record.as_mut(), &input).unwrap();
    assert_eq!(
        record.downcast_ref::<Page>(),
        Some(&Page {
            page: 2,
            size: 0,
            query: "rust".into()
        })
    );
}

#[test]
fn non_record_values_are_rejected_by_dynamic_binds() {
    let binder = Binder::new();
    binder.register::<Page>().unwrap();
    let mut not_a_record = 42_u32;

    let err = binder
        .bind_dyn(&mut not_a_record, &FormValues::new())
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ObjType);
    assert_eq!(not_a_record, 42);
}

#[test]
fn any_multi_map_can_be_used_as_input() {
    let binder = Binder::new();
    let mut input: BTreeMap<String, Vec<&str>> = BTreeMap::new();
    input.insert("p".into(), vec!["3", "4"]);
    input.insert("q".into(), vec!["tokio"]);

    let mut page = Page::default();
    binder.bind(&mut page, &input).unwrap();

    assert_eq!(page.page, 3);
    assert_eq!(page.query, "tokio");
}
