use std::rc::Rc;

use collectable::collection::{Collectable, Collection, ObjectCollection, ObjectStorage};
use collectable::errors::ErrorKind;
use collectable::{arr, val};
use collectable_int_test::test_util::{create_test_context, run_test};

#[derive(Debug, PartialEq)]
struct Session {
    user: String,
}

fn session(user: &str) -> Rc<Session> {
    Rc::new(Session { user: user.to_string() })
}

fn by_user(sessions: &[Rc<Session>]) -> ObjectCollection<Session> {
    Collection::object_from(sessions.to_vec(), |session: &Session| val!(session.user.len()))
}

#[test]
fn test_equal_objects_are_distinct_keys() {
    run_test(
        || create_test_context(),
        |_| {
            let first = session("ada");
            let twin = session("ada");
            assert_eq!(first, twin);

            let mut collection = by_user(&[Rc::clone(&first)]);
            assert!(collection.contains(&first)?);
            assert!(!collection.contains(&twin)?);
            assert_eq!(collection.get(&twin).unwrap_err().kind(), &ErrorKind::KeyNotFound);

            collection.attach(Rc::clone(&twin), "second")?;
            assert_eq!(collection.count()?, 2);
            assert_eq!(collection.get(&first)?, &val!(3));
            assert_eq!(collection.get(&twin)?, &val!("second"));
            Ok(())
        },
    )
}

#[test]
fn test_attach_same_object_replaces_value() {
    run_test(
        || create_test_context(),
        |_| {
            let ada = session("ada");
            let mut collection = by_user(&[Rc::clone(&ada)]);
            collection.attach(Rc::clone(&ada), "updated")?;
            assert_eq!(collection.count()?, 1);
            assert_eq!(collection.search(&ada)?, Some(&val!("updated")));

            assert_eq!(
                collection.add(Rc::clone(&ada), 1).unwrap_err().kind(),
                &ErrorKind::KeyAlreadyExists
            );
            assert_eq!(
                collection.replace(&session("ada"), 1).unwrap_err().kind(),
                &ErrorKind::KeyNotFound
            );
            assert_eq!(collection.detach(&ada)?, Some(val!("updated")));
            assert!(collection.is_empty()?);
            Ok(())
        },
    )
}

#[test]
fn test_filters_and_identity_selection() {
    run_test(
        || create_test_context(),
        |_| {
            let sessions = vec![session("ada"), session("grace"), session("linus")];
            let collection = by_user(&sessions);

            let long_names = collection.filter(|_, length| length.as_int() > Some(3));
            assert_eq!(long_names.to_array()?, arr![5, 5]);
            assert!(!long_names.contains(&sessions[0])?);

            let picked = collection.only(&[Rc::clone(&sessions[2])]);
            assert_eq!(picked.count()?, 1);
            assert!(picked.contains(&sessions[2])?);
            assert_eq!(collection.except(&[Rc::clone(&sessions[2])]).count()?, 2);
            Ok(())
        },
    )
}

#[test]
fn test_merge_and_chunk() {
    run_test(
        || create_test_context(),
        |_| {
            let mut collection = Collection::object::<Session, _>(|| Ok(ObjectStorage::new()));
            let extra = vec![session("ada"), session("alan"), session("barbara")];
            collection.merge(|storage| {
                for (position, item) in extra.iter().enumerate() {
                    storage.attach(Rc::clone(item), position);
                }
            })?;
            assert_eq!(collection.to_array()?, arr![0, 1, 2]);

            let mut batches = Vec::new();
            collection.chunk(2, |batch| batches.push(batch.count().unwrap_or_default()))?;
            assert_eq!(batches, vec![2, 1]);

            let doubled =
                collection.map(|_, position| val!(position.as_int().unwrap_or_default() * 2));
            assert_eq!(doubled.get(&extra[2])?, &val!(4));
            assert!(doubled.every(|item, _| item.user.starts_with('a') || item.user == "barbara")?);
            Ok(())
        },
    )
}
