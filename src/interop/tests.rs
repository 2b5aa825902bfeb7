//! Unit tests for the call layer, run against the in-memory VM

use super::args::ArgCells;
use super::lookup;
use super::*;
use crate::errors::{JniError, MemberKind};
use crate::mock::{MockVm, Thrown, Value};

fn quiet() -> EnvOptions {
    EnvOptions {
        describe_faults: false,
        ..EnvOptions::default()
    }
}

fn demo_vm() -> MockVm {
    let vm = MockVm::new();
    vm.define_class("com/example/Demo")
        .field("count", "I")
        .field("label", "Ljava/lang/String;")
        .static_field("LIMIT", "J", 99i64)
        .static_method("answer", "()I", |_, _| Ok(Value::Int(42)))
        .static_method("sum", "(II)I", |_, inv| {
            let a = inv.arg(0).as_int().unwrap_or_default();
            let b = inv.arg(1).as_int().unwrap_or_default();
            Ok(Value::Int(a + b))
        })
        .static_method("fail", "()V", |_, _| Err(Thrown::new("java/lang/IllegalStateException", "boom")))
        .method("count", "()I", |vm, inv| Ok(vm.field(inv.this, "count")));
    vm
}

// ============================================================================
// Exception bridge
// ============================================================================

#[test]
fn test_check_exception_without_pending_is_noop() {
    let vm = MockVm::new();
    assert!(check_exception(&vm).is_ok());
    assert_eq!(vm.describe_count(), 0);
}

#[test]
fn test_check_exception_captures_and_clears() {
    let vm = MockVm::new();
    vm.throw("java/lang/IllegalStateException", "boom");

    let err = check_exception(&vm).unwrap_err();
    assert!(err.is_foreign_fault());
    assert!(!err.exception().is_null());
    assert!(!vm.has_pending_exception());
    assert_eq!(vm.describe_count(), 1);

    let thrown = vm.thrown(err.exception()).unwrap();
    assert_eq!(thrown.class, "java/lang/IllegalStateException");
    assert_eq!(thrown.message, "boom");
}

#[test]
fn test_describe_is_optional() {
    let vm = MockVm::new().with_options(quiet());
    vm.throw("java/lang/RuntimeException", "quiet");

    assert!(check_exception(&vm).is_err());
    assert_eq!(vm.describe_count(), 0);
    assert!(!vm.has_pending_exception());
}

#[test]
fn test_checked_returns_value() {
    let vm = MockVm::new();
    assert_eq!(checked(&vm, |_| 7).unwrap(), 7);
}

// ============================================================================
// Local references
// ============================================================================

#[test]
fn test_guard_deletes_on_drop() {
    let vm = MockVm::new();
    let string = vm.new_string("owned");
    {
        let guard = LocalRef::new(&vm, string);
        assert_eq!(guard.get(), string);
        assert!(!guard.is_null());
    }
    assert!(!vm.is_live(string.as_object()));
    assert_eq!(vm.released_refs(), vec![string.as_object()]);
}

#[test]
fn test_guard_release_transfers_ownership() {
    let vm = MockVm::new();
    let string = vm.new_string("kept");

    let mut guard = LocalRef::new(&vm, string);
    assert_eq!(guard.release(), string);
    assert!(guard.is_null());
    drop(guard);

    assert!(vm.is_live(string.as_object()));
    assert!(vm.released_refs().is_empty());

    let guard = LocalRef::new(&vm, string);
    assert_eq!(guard.into_inner(), string);
    assert!(vm.is_live(string.as_object()));
}

#[test]
fn test_null_guard_is_noop() {
    let vm = MockVm::new();
    drop(LocalRef::new(&vm, JObject::null()));
    assert!(vm.released_refs().is_empty());
    assert_eq!(vm.double_releases(), 0);
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn test_string_read_releases_chars() {
    let vm = MockVm::new();
    let string = vm.new_string("h\u{e9}llo");
    assert_eq!(foreign_to_local_string(&vm, string), "h\u{e9}llo");
    assert_eq!(vm.outstanding_utf_buffers(), 0);
}

#[test]
fn test_null_string_reads_empty() {
    let vm = MockVm::new();
    assert_eq!(foreign_to_local_string(&vm, JString::null()), "");
    assert!(!vm.has_pending_exception());
}

#[test]
fn test_refused_chars_read_empty_and_clear() {
    let vm = MockVm::new().with_options(quiet());
    let string = vm.new_string("unreadable");
    vm.refuse_utf_chars(true);

    assert_eq!(foreign_to_local_string(&vm, string), "");
    assert!(!vm.has_pending_exception());
}

#[test]
fn test_string_creation_fault() {
    let vm = MockVm::new().with_options(quiet());
    vm.fail_strings_after(Some(0));

    let err = local_to_foreign_string(&vm, "nope").unwrap_err();
    assert!(err.is_foreign_fault());
    assert_eq!(vm.thrown(err.exception()).unwrap().class, "java/lang/OutOfMemoryError");
}

// ============================================================================
// Lookup
// ============================================================================

#[test]
fn test_missing_class_is_lookup_failure() {
    let vm = MockVm::new().with_options(quiet());

    match lookup::find_class(&vm, "com/example/Missing").unwrap_err() {
        JniError::LookupFailed { member, name, exception, .. } => {
            assert_eq!(member, MemberKind::Class);
            assert_eq!(name, "com/example/Missing");
            assert_eq!(vm.thrown(exception).unwrap().class, "java/lang/NoClassDefFoundError");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!vm.has_pending_exception());
}

#[test]
fn test_signature_mismatch_is_lookup_failure() {
    let vm = demo_vm().with_options(quiet());
    let class = LocalRef::new(&vm, lookup::find_class(&vm, "com/example/Demo").unwrap());

    assert!(lookup::static_method_id(&vm, class.get(), "answer", "()I").is_ok());
    let err = lookup::static_method_id(&vm, class.get(), "answer", "()J").unwrap_err();
    assert!(err.is_lookup_failure());
    assert_eq!(vm.thrown(err.exception()).unwrap().class, "java/lang/NoSuchMethodError");

    let err = lookup::field_id(&vm, class.get(), "count", "J").unwrap_err();
    assert_eq!(vm.thrown(err.exception()).unwrap().class, "java/lang/NoSuchFieldError");
}

#[test]
fn test_null_receiver_fails_before_any_call() {
    let vm = MockVm::new();
    let err = lookup::object_class(&vm, JObject::null()).unwrap_err();
    assert!(err.is_lookup_failure());
    assert!(err.exception().is_null());
    assert!(!vm.has_pending_exception());
}

// ============================================================================
// Argument packing
// ============================================================================

#[test]
fn test_empty_list_packs_placeholder() {
    let vm = MockVm::new();
    let cells = ArgCells::pack(&vm, ()).unwrap();
    assert_eq!(cells.len(), 1);
    assert!(cells.transient_strings().is_empty());
}

#[test]
fn test_cells_follow_declaration_order() {
    let vm = MockVm::new();
    let cells = ArgCells::pack(&vm, (7i32, true, 2.5f64, 'x' as u16, Null)).unwrap();
    let slice = cells.as_slice();

    assert_eq!(slice.len(), 5);
    unsafe {
        assert_eq!(slice[0].i, 7);
        assert_eq!(slice[1].z, jni_sys::JNI_TRUE);
        assert_eq!(slice[2].d, 2.5);
        assert_eq!(slice[3].c, 'x' as u16);
        assert!(slice[4].l.is_null());
    }
}

#[test]
fn test_references_are_not_duplicated() {
    let vm = MockVm::new();
    let string = vm.new_string("shared");
    let guard = LocalRef::new(&vm, vm.new_string("guarded"));
    let live = vm.live_local_refs();

    let cells = ArgCells::pack(&vm, (string, &guard, None::<JObject>)).unwrap();
    unsafe {
        assert_eq!(cells.as_slice()[0].l, string.as_raw());
        assert_eq!(cells.as_slice()[1].l, guard.get().as_raw());
        assert!(cells.as_slice()[2].l.is_null());
    }
    assert_eq!(vm.live_local_refs(), live);
}

#[test]
fn test_transient_strings_released_after_use() {
    let vm = MockVm::new();
    let cells = ArgCells::pack(&vm, ("first", String::from("second"))).unwrap();
    let created: Vec<JString> = cells.transient_strings().to_vec();

    assert_eq!(created.len(), 2);
    assert_eq!(vm.string_value(created[0]).as_deref(), Some("first"));
    drop(cells);

    for string in created {
        assert!(!vm.is_live(string.as_object()));
    }
}

#[test]
fn test_frame_teardown_keeps_transient_strings() {
    let vm = MockVm::new().with_options(EnvOptions {
        transient_strings: TransientPolicy::FrameTeardown,
        ..EnvOptions::default()
    });
    let cells = ArgCells::pack(&vm, ("kept",)).unwrap();
    let string = cells.transient_strings()[0];
    drop(cells);

    assert!(vm.is_live(string.as_object()));
    assert!(vm.released_refs().is_empty());
}

#[test]
fn test_partial_pack_releases_created_strings() {
    let vm = MockVm::new().with_options(quiet());
    vm.fail_strings_after(Some(1));

    let err = ArgCells::pack(&vm, ("ok", "refused")).unwrap_err();
    assert!(err.is_foreign_fault());
    assert_eq!(vm.released_refs().len(), 1);
    assert!(!vm.has_pending_exception());
}

// ============================================================================
// Dispatch and calls
// ============================================================================

#[test]
fn test_zero_argument_call_uses_direct_primitive() {
    let vm = demo_vm();
    let answer: i32 = call_static_method(&vm, "com/example/Demo", "answer", "()I", ()).unwrap();
    assert_eq!(answer, 42);
    assert!(vm.calls().last().unwrap().direct);

    let sum: i32 = call_static_method(&vm, "com/example/Demo", "sum", "(II)I", (40i32, 2i32)).unwrap();
    assert_eq!(sum, 42);
    let call = vm.calls().last().cloned().unwrap();
    assert!(!call.direct);
    assert_eq!(call.args, vec![Value::Int(40), Value::Int(2)]);
}

#[test]
fn test_class_reference_released_on_every_path() {
    let vm = demo_vm().with_options(quiet());

    let _: i32 = call_static_method(&vm, "com/example/Demo", "answer", "()I", ()).unwrap();
    assert_eq!(vm.released_refs().len(), 1);

    assert!(call_static_method::<(), _, _>(&vm, "com/example/Demo", "fail", "()V", ()).is_err());
    assert_eq!(vm.released_refs().len(), 2);

    assert!(call_static_method::<i32, _, _>(&vm, "com/example/Demo", "missing", "()I", ()).is_err());
    assert_eq!(vm.released_refs().len(), 3);
    assert_eq!(vm.double_releases(), 0);
}

#[test]
fn test_instance_call_and_field_read() {
    let vm = demo_vm();
    let obj = vm.new_instance("com/example/Demo");
    vm.set_field(obj, "count", 5i32);

    let count: i32 = call_method(&vm, obj, "count", "()I", ()).unwrap();
    assert_eq!(count, 5);
    assert_eq!(get_field::<i32, _>(&vm, obj, "count").unwrap(), 5);
    assert_eq!(get_static_field::<i64, _>(&vm, "com/example/Demo", "LIMIT").unwrap(), 99);
}

#[test]
fn test_signature_override_reads_reference_field() {
    let vm = demo_vm();
    let obj = vm.new_instance("com/example/Demo");
    vm.set_field(obj, "label", vm.new_string("tag"));

    let label: JString = get_field_with_signature(&vm, obj, "label", "Ljava/lang/String;").unwrap();
    assert_eq!(vm.string_value(label).as_deref(), Some("tag"));

    let generic: JObject = get_field_with_signature(&vm, obj, "label", "Ljava/lang/String;").unwrap();
    assert!(!generic.is_null());
}

#[test]
fn test_bad_override_rejected_without_lookup() {
    let vm = demo_vm();
    let obj = vm.new_instance("com/example/Demo");

    let err = get_field_with_signature::<JString, _>(&vm, obj, "count", "I").unwrap_err();
    assert!(err.is_lookup_failure());
    assert!(err.exception().is_null());

    let err = get_static_field_with_signature::<JString, _>(&vm, "com/example/Demo", "LIMIT", "Ljava/lang/Object;")
        .unwrap_err();
    assert!(err.is_lookup_failure());

    // No class handle was resolved, so none was released.
    assert!(vm.released_refs().is_empty());
}
