//! Cross-crate integration tests: full lifecycle flows through the
//! facade, exercising both access paths together.

use floe::prelude::*;

/// A nullable element kind defined outside the workspace, the way a host
/// runtime would define one.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Tag(u32);

impl Element for Tag {
    fn hash_value(&self) -> u64 {
        u64::from(self.0)
    }
}

#[test]
fn allocate_populate_freeze_share() {
    let frozen = with_region(|region| {
        let mut buf = region.alloc::<Tag>(4);
        for i in 0..4 {
            buf.set_required(i, Tag(i as u32 * 10)).unwrap();
        }
        buf.freeze()
    });

    // Frozen handles are freely shareable across threads.
    let handle = frozen.clone();
    let worker = std::thread::spawn(move || handle.values().map(|t| t.0).sum::<u32>());
    assert_eq!(worker.join().unwrap(), 60);
    assert_eq!(frozen.get_required(3).unwrap(), &Tag(30));
}

#[test]
fn fresh_frozen_array_is_all_default() {
    let nullable = with_region(|region| region.alloc::<Tag>(3).freeze());
    assert_eq!(nullable.len(), 3);
    assert!(nullable.slots().all(|s| s.is_none()));

    let primitive = with_region(|region| region.alloc::<i64>(3).freeze());
    assert!(primitive.slots().all(|s| s == Some(&0)));
}

#[test]
fn typed_and_reflective_paths_agree() {
    let typed = Array::from_seq(vec![Tag(1), Tag(2)]);
    let erased = typed.erase();

    assert_eq!(erased.kind(), ElemKind::of::<Tag>());
    assert_eq!(erased.get_required_value::<Tag>(0).unwrap(), &Tag(1));

    let back = erased.downcast::<Tag>().unwrap();
    assert_eq!(back, typed);
    assert_eq!(back.content_hash(), typed.content_hash());
}

#[test]
fn reflective_path_for_a_capability_free_type() {
    // No Element impl anywhere in scope for this type.
    #[derive(Debug, PartialEq)]
    struct Opaque(&'static str);

    let frozen = with_region(|region| {
        let mut buf = region.alloc_erased::<Opaque>(2);
        buf.set_required_value(0, Opaque("reflected")).unwrap();
        buf.freeze()
    });
    assert_eq!(
        frozen.get_value::<Opaque>(0).unwrap(),
        Some(&Opaque("reflected"))
    );
    assert_eq!(frozen.get_value::<Opaque>(1).unwrap(), None);

    let err = frozen.get_value::<String>(0).unwrap_err();
    assert!(matches!(err, ArrayError::TypeMismatch { .. }));
}

#[test]
fn registry_drives_reflective_allocation() {
    let mut registry = KindRegistry::new();
    registry.register::<f32>();
    registry.register::<Tag>();

    let kind = registry.lookup(std::any::TypeId::of::<f32>()).unwrap();
    let frozen = with_region(|region| {
        let mut buf = region.alloc_kind(kind, 2);
        buf.set_required_value(1, 2.5f32).unwrap();
        buf.freeze()
    });
    // The registry descriptor carried the primitive default.
    assert_eq!(frozen.get_value::<f32>(0).unwrap(), Some(&0.0));
    assert_eq!(frozen.get_value::<f32>(1).unwrap(), Some(&2.5));
}

#[test]
fn equality_and_hash_across_construction_routes() {
    let a = Array::from_seq(vec![1i32, 2, 3]);
    let b = Array::from_pairs(vec![(0, 1i32), (1, 2), (2, 3)]);
    assert_eq!(a, b);
    assert_eq!(a.content_hash(), b.content_hash());

    let c = Array::from_pairs(vec![(0, 1i32), (1, 2), (2, 4)]);
    assert_ne!(a, c);
}

#[test]
fn generate_reads_only_its_prefix() {
    // A triangular-number table, each entry built from the previous one.
    let table = Array::generate(6, |i, prev| {
        Ok(if i == 0 {
            0u32
        } else {
            prev.get_required(i - 1)? + i as u32
        })
    })
    .unwrap();
    assert_eq!(
        table.values().copied().collect::<Vec<_>>(),
        vec![0, 1, 3, 6, 10, 15]
    );
}

#[test]
fn bulk_constructor_failure_leaves_nothing_behind() {
    let result: Result<Array<u32>, ArrayError> = Array::generate(3, |i, _| {
        if i == 1 {
            Err(ArrayError::MissingValue { index: i })
        } else {
            Ok(0)
        }
    });
    // The unfrozen buffer is discarded with the error; only the error
    // escapes.
    assert_eq!(result.unwrap_err(), ArrayError::MissingValue { index: 1 });
}
