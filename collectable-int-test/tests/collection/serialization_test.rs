use std::rc::Rc;

use collectable::collection::{
    ArrayCollection, Collectable, Collection, IndexCollection, LazyCollection, ObjectCollection,
};
use collectable::common::{Key, Serializable, Value};
use collectable::{arr, assoc_map, key, val};
use collectable_int_test::test_util::{create_test_context, create_test_records, run_test};

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
struct Host {
    name: String,
    port: u16,
}

#[test]
fn test_dynamic_map_round_trip() {
    run_test(
        || create_test_context(),
        |ctx| {
            let collection = ctx.counting_collection(create_test_records());
            let bytes = collection.serialize()?;
            assert_eq!(ctx.calls(), 1);

            let restored = ArrayCollection::unserialize(&bytes)?;
            assert_eq!(restored.all()?, collection.all()?);

            let mixed = ArrayCollection::from_items(
                assoc_map! { 7 => 1.5, "name" => Value::Null, "tags" => arr!["a"] },
            );
            assert_eq!(ArrayCollection::unserialize(&mixed.serialize()?)?.all()?, mixed.all()?);
            Ok(())
        },
    )
}

#[test]
fn test_fixed_index_round_trip() {
    run_test(
        || create_test_context(),
        |ctx| {
            let collection = ctx.counting_index(vec![val!("a"), Value::Null, val!(3)]);
            let restored = IndexCollection::unserialize(&collection.serialize()?)?;
            assert_eq!(restored.size()?, 3);
            assert_eq!(restored.all()?, collection.all()?);
            assert_eq!(collection.to_json()?, r#"["a",null,3]"#);
            Ok(())
        },
    )
}

#[test]
fn test_lazy_round_trip_keeps_every_entry() {
    run_test(
        || create_test_context(),
        |_| {
            let build = || {
                Collection::lazy(|| {
                    vec![
                        (key!("k"), val!(1)),
                        (key!(3), val!("three")),
                        (key!("k"), val!(2)),
                    ]
                })
            };
            let restored = LazyCollection::unserialize(&build().serialize()?)?;
            let expected: Vec<(Key, Value)> = build().iter().collect();
            assert_eq!(restored.all()?, expected);
            Ok(())
        },
    )
}

#[test]
fn test_object_round_trip_creates_new_identities() {
    run_test(
        || create_test_context(),
        |_| {
            let hosts = vec![
                Rc::new(Host { name: "alpha".into(), port: 80 }),
                Rc::new(Host { name: "beta".into(), port: 443 }),
            ];
            let collection =
                Collection::object_from(hosts.clone(), |host: &Host| val!(host.port > 100));
            let restored = ObjectCollection::<Host>::unserialize(&collection.serialize()?)?;

            let pairs: Vec<(Host, Value)> = restored
                .all()?
                .iter()
                .map(|(host, value)| (host.as_ref().clone(), value.clone()))
                .collect();
            assert_eq!(
                pairs,
                vec![
                    (hosts[0].as_ref().clone(), val!(false)),
                    (hosts[1].as_ref().clone(), val!(true)),
                ]
            );
            assert!(!restored.contains(&hosts[0])?);
            Ok(())
        },
    )
}

#[test]
fn test_json_export() {
    run_test(
        || create_test_context(),
        |_| {
            let list = Collection::create(|| Ok(arr![1, "two", 3.5, true, Value::Null]));
            assert_eq!(list.to_json()?, r#"[1,"two",3.5,true,null]"#);

            let record = Collection::create(|| Ok(assoc_map! { "name" => "Ada", 5 => arr![1, 2] }));
            let json = record.to_json()?;
            assert_eq!(json, r#"{"name":"Ada","5":[1,2]}"#);

            let parsed: ArrayCollection = serde_json::from_str(&json)?;
            assert_eq!(parsed.get(5)?, &Value::Array(arr![1, 2]));

            let lazy: LazyCollection = serde_json::from_str(r#"["x","y"]"#)?;
            assert_eq!(lazy.to_array()?, arr!["x", "y"]);
            Ok(())
        },
    )
}
