use jnicall::mock::{MockVm, Value};
use jnicall::prelude::*;

#[test]
fn test_guard_deletes_on_drop() {
    let vm = MockVm::new();
    let string = vm.new_string("owned");
    {
        let guard = LocalRef::new(&vm, string);
        assert!(vm.is_live(guard.get().as_object()));
    }
    assert!(!vm.is_live(string.as_object()));
    assert_eq!(vm.released_refs(), vec![string.as_object()]);
}

#[test]
fn test_null_guard_is_a_no_op() {
    let vm = MockVm::new();
    {
        let guard: LocalRef<'_, MockVm, JString> = LocalRef::new(&vm, JString::null());
        assert!(guard.is_null());
    }
    assert!(vm.released_refs().is_empty());
    assert_eq!(vm.double_releases(), 0);
}

#[test]
fn test_release_hands_back_ownership() {
    let vm = MockVm::new();
    let obj = vm.new_instance("java/lang/Object");

    let mut guard = LocalRef::new(&vm, obj);
    assert_eq!(guard.release(), obj);
    assert!(guard.is_null());
    // Releasing twice yields null the second time
    assert!(guard.release().is_null());
    drop(guard);

    assert!(vm.is_live(obj));
    assert!(vm.released_refs().is_empty());

    vm.delete_local_ref(obj);
    assert_eq!(vm.double_releases(), 0);
}

#[test]
fn test_into_inner_keeps_reference() {
    let vm = MockVm::new();
    let obj = vm.new_instance("java/lang/Object");

    let kept = LocalRef::new(&vm, obj).into_inner();
    assert_eq!(kept, obj);
    assert!(vm.is_live(obj));
}

#[test]
fn test_moved_guard_deletes_once() {
    let vm = MockVm::new();
    let obj = vm.new_instance("java/lang/Object");

    let guards: Vec<LocalRef<'_, MockVm>> = vec![LocalRef::new(&vm, obj)];
    let moved: Vec<_> = guards.into_iter().collect();
    drop(moved);

    assert_eq!(vm.released_refs(), vec![obj]);
    assert_eq!(vm.double_releases(), 0);
}

#[test]
fn test_guard_as_call_argument() {
    let vm = MockVm::new();
    vm.define_class("com/example/Box")
        .field("content", "Ljava/lang/Object;")
        .constructor("(Ljava/lang/Object;)V", |vm, inv| {
            vm.set_field(inv.this, "content", inv.arg(0));
            Ok(Value::Void)
        })
        .method("isEmpty", "()Z", |vm, inv| {
            let content = vm.field(inv.this, "content").as_object().unwrap_or_default();
            Ok(content.is_null().into())
        });

    let item = LocalRef::new(&vm, vm.new_instance("java/lang/Object"));
    let full = LocalRef::new(&vm, new_object(&vm, "com/example/Box", "(Ljava/lang/Object;)V", (&item,)).unwrap());
    let empty = LocalRef::new(&vm, new_object(&vm, "com/example/Box", "(Ljava/lang/Object;)V", (Null,)).unwrap());

    // The guard is borrowed, never consumed, by the call
    assert!(vm.is_live(item.get()));
    assert!(!call_method::<bool, _, _>(&vm, full.get(), "isEmpty", "()Z", ()).unwrap());
    assert!(call_method::<bool, _, _>(&vm, empty.get(), "isEmpty", "()Z", ()).unwrap());

    let target = item.get();
    drop(item);
    assert!(!vm.is_live(target));
    assert_eq!(vm.double_releases(), 0);
}

#[test]
fn test_optional_reference_arguments() {
    let vm = MockVm::new();
    vm.define_class("com/example/Maybe").static_method("isNull", "(Ljava/lang/String;)Z", |_, inv| {
        Ok(inv.arg(0).as_object().map_or(true, |obj| obj.is_null()).into())
    });

    let text = LocalRef::new(&vm, vm.new_string("x"));
    let none: Option<JString> = None;
    assert!(call_static_method::<bool, _, _>(&vm, "com/example/Maybe", "isNull", "(Ljava/lang/String;)Z", (none,)).unwrap());
    assert!(!call_static_method::<bool, _, _>(
        &vm,
        "com/example/Maybe",
        "isNull",
        "(Ljava/lang/String;)Z",
        (Some(text.get()),)
    )
    .unwrap());
}

#[test]
fn test_failed_error_owns_its_throwable() {
    let vm = MockVm::new().with_options(EnvOptions {
        describe_faults: false,
        ..EnvOptions::default()
    });
    vm.define_class("com/example/Thrower")
        .static_method("fail", "()V", |_, _| Err(jnicall::mock::Thrown::new("java/lang/Error", "bad")));

    let err = call_static_method::<(), _, _>(&vm, "com/example/Thrower", "fail", "()V", ()).unwrap_err();
    let throwable = LocalRef::new(&vm, err.exception());
    assert!(vm.is_live(throwable.get().as_object()));

    let raw = throwable.get().as_object();
    drop(throwable);
    assert!(!vm.is_live(raw));
}
