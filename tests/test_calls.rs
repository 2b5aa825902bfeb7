use jnicall::mock::{MockVm, Thrown, Value};
use jnicall::prelude::*;

const GREETER: &str = "com/example/Greeter";

fn quiet() -> EnvOptions {
    EnvOptions {
        describe_faults: false,
        ..EnvOptions::default()
    }
}

fn text(vm: &MockVm, value: Value) -> String {
    value
        .as_object()
        .map(JString::from_object)
        .and_then(|string| vm.string_value(string))
        .unwrap_or_default()
}

fn greeter_vm() -> MockVm {
    let vm = MockVm::new().with_options(quiet());
    vm.define_class(GREETER)
        .field("name", "Ljava/lang/String;")
        .field("greeted", "I")
        .constructor("(Ljava/lang/String;)V", |vm, inv| {
            if text(vm, inv.arg(0)).is_empty() {
                return Err(Thrown::new("java/lang/IllegalArgumentException", "empty name"));
            }
            vm.set_field(inv.this, "name", inv.arg(0));
            Ok(Value::Void)
        })
        .method("greet", "(Ljava/lang/String;)Ljava/lang/String;", |vm, inv| {
            let greeted = vm.field(inv.this, "greeted").as_int().unwrap_or_default();
            vm.set_field(inv.this, "greeted", greeted + 1);
            let greeting = format!("Hello {}, I am {}", text(vm, inv.arg(0)), text(vm, vm.field(inv.this, "name")));
            Ok(vm.new_string(&greeting).into())
        })
        .method("greeted", "()I", |vm, inv| Ok(vm.field(inv.this, "greeted")))
        .method("reset", "()V", |vm, inv| {
            vm.set_field(inv.this, "greeted", 0i32);
            Ok(Value::Void)
        })
        .method("explode", "()V", |_, _| Err(Thrown::new("java/lang/IllegalStateException", "boom")))
        .static_method("valueOf", "(I)Ljava/lang/String;", |vm, inv| {
            let n = inv.arg(0).as_int().unwrap_or_default();
            Ok(vm.new_string(&n.to_string()).into())
        });
    vm
}

fn new_greeter(vm: &MockVm, name: &str) -> JObject {
    new_object(vm, GREETER, "(Ljava/lang/String;)V", (name,)).unwrap()
}

#[test]
fn test_static_call_with_arguments() {
    let vm = greeter_vm();
    let string: JString = call_static_method(&vm, GREETER, "valueOf", "(I)Ljava/lang/String;", (42i32,)).unwrap();
    let string = LocalRef::new(&vm, string);
    assert_eq!(foreign_to_local_string(&vm, string.get()), "42");
}

#[test]
fn test_construct_then_call() {
    let vm = greeter_vm();
    let greeter = LocalRef::new(&vm, new_greeter(&vm, "Ada"));

    let greeting: JString = call_method(
        &vm,
        greeter.get(),
        "greet",
        "(Ljava/lang/String;)Ljava/lang/String;",
        ("Bob",),
    )
    .unwrap();
    assert_eq!(foreign_to_local_string(&vm, greeting), "Hello Bob, I am Ada");

    let greeted: i32 = call_method(&vm, greeter.get(), "greeted", "()I", ()).unwrap();
    assert_eq!(greeted, 1);
}

#[test]
fn test_void_method() {
    let vm = greeter_vm();
    let greeter = new_greeter(&vm, "Ada");
    vm.set_field(greeter, "greeted", 3i32);

    call_method::<(), _, _>(&vm, greeter, "reset", "()V", ()).unwrap();
    assert_eq!(vm.field(greeter, "greeted"), Value::Int(0));
}

#[test]
fn test_constructor_runs_with_arguments() {
    let vm = greeter_vm();
    let greeter = new_greeter(&vm, "Grace");

    let record = vm.calls().into_iter().find(|call| call.name == "<init>").unwrap();
    assert_eq!(record.class, GREETER);
    assert!(!record.direct);
    assert_eq!(text(&vm, vm.field(greeter, "name")), "Grace");
}

#[test]
fn test_missing_member_is_lookup_failure() {
    let vm = greeter_vm();
    let greeter = new_greeter(&vm, "Ada");

    let err = call_method::<i32, _, _>(&vm, greeter, "missing", "()I", ()).unwrap_err();
    assert!(err.is_lookup_failure());

    // Right name, wrong descriptor
    let err = call_method::<i64, _, _>(&vm, greeter, "greeted", "()J", ()).unwrap_err();
    assert!(err.is_lookup_failure());

    let err = call_static_method::<JString, _, _>(&vm, GREETER, "valueOf", "(J)Ljava/lang/String;", (1i64,))
        .unwrap_err();
    assert!(err.is_lookup_failure());

    assert!(!vm.has_pending_exception());
}

#[test]
fn test_missing_class_is_lookup_failure() {
    let vm = greeter_vm();

    let err = call_static_method::<(), _, _>(&vm, "com/example/Nowhere", "run", "()V", ()).unwrap_err();
    match err {
        JniError::LookupFailed { member, name, .. } => {
            assert_eq!(member, MemberKind::Class);
            assert_eq!(name, "com/example/Nowhere");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let err = new_object(&vm, "com/example/Nowhere", "()V", ()).unwrap_err();
    assert!(err.is_lookup_failure());

    let err = new_object(&vm, GREETER, "()V", ()).unwrap_err();
    match err {
        JniError::LookupFailed { member, .. } => assert_eq!(member, MemberKind::Constructor),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_fault_is_cleared_before_next_call() {
    let vm = greeter_vm();
    let greeter = new_greeter(&vm, "Ada");

    let err = call_method::<(), _, _>(&vm, greeter, "explode", "()V", ()).unwrap_err();
    assert!(err.is_foreign_fault());
    assert!(!err.exception().is_null());
    assert_eq!(vm.thrown(err.exception()).unwrap().message, "boom");

    let greeted: i32 = call_method(&vm, greeter, "greeted", "()I", ()).unwrap();
    assert_eq!(greeted, 0);
    assert_eq!(vm.calls_with_pending_exception(), 0);
}

#[test]
fn test_constructor_fault() {
    let vm = greeter_vm();

    let err = new_object(&vm, GREETER, "(Ljava/lang/String;)V", ("",)).unwrap_err();
    assert!(err.is_foreign_fault());
    assert_eq!(vm.thrown(err.exception()).unwrap().class, "java/lang/IllegalArgumentException");
    assert!(!vm.has_pending_exception());
}

#[test]
fn test_faults_are_described_by_default() {
    let vm = greeter_vm().with_options(EnvOptions::default());
    let greeter = new_greeter(&vm, "Ada");

    assert!(call_method::<(), _, _>(&vm, greeter, "explode", "()V", ()).is_err());
    assert_eq!(vm.describe_count(), 1);
}

#[test]
fn test_call_releases_class_and_argument_strings() {
    let vm = greeter_vm();
    let greeter = new_greeter(&vm, "Ada");
    let released_before = vm.released_refs().len();

    let _: JString = call_method(
        &vm,
        greeter,
        "greet",
        "(Ljava/lang/String;)Ljava/lang/String;",
        ("Bob",),
    )
    .unwrap();

    // Receiver class and the "Bob" argument
    assert_eq!(vm.released_refs().len(), released_before + 2);
    assert_eq!(vm.double_releases(), 0);
}

#[test]
fn test_every_primitive_return_kind() {
    let vm = MockVm::new();
    vm.define_class("com/example/Kinds")
        .static_method("z", "()Z", |_, _| Ok(true.into()))
        .static_method("b", "()B", |_, _| Ok((-3i8).into()))
        .static_method("c", "()C", |_, _| Ok(('q' as u16).into()))
        .static_method("s", "()S", |_, _| Ok((-300i16).into()))
        .static_method("i", "()I", |_, _| Ok(70_000i32.into()))
        .static_method("j", "()J", |_, _| Ok((1i64 << 40).into()))
        .static_method("f", "()F", |_, _| Ok(1.5f32.into()))
        .static_method("d", "()D", |_, _| Ok(2.25f64.into()))
        .static_method("neg", "(Z)Z", |_, inv| Ok((!inv.arg(0).as_bool().unwrap_or_default()).into()))
        .static_method("twice", "(D)D", |_, inv| Ok((inv.arg(0).as_double().unwrap_or_default() * 2.0).into()));
    let class = "com/example/Kinds";

    assert!(call_static_method::<bool, _, _>(&vm, class, "z", "()Z", ()).unwrap());
    assert_eq!(call_static_method::<i8, _, _>(&vm, class, "b", "()B", ()).unwrap(), -3);
    assert_eq!(call_static_method::<u16, _, _>(&vm, class, "c", "()C", ()).unwrap(), 'q' as u16);
    assert_eq!(call_static_method::<i16, _, _>(&vm, class, "s", "()S", ()).unwrap(), -300);
    assert_eq!(call_static_method::<i32, _, _>(&vm, class, "i", "()I", ()).unwrap(), 70_000);
    assert_eq!(call_static_method::<i64, _, _>(&vm, class, "j", "()J", ()).unwrap(), 1 << 40);
    assert_eq!(call_static_method::<f32, _, _>(&vm, class, "f", "()F", ()).unwrap(), 1.5);
    assert_eq!(call_static_method::<f64, _, _>(&vm, class, "d", "()D", ()).unwrap(), 2.25);

    assert!(!call_static_method::<bool, _, _>(&vm, class, "neg", "(Z)Z", (true,)).unwrap());
    assert_eq!(call_static_method::<f64, _, _>(&vm, class, "twice", "(D)D", (1.25f64,)).unwrap(), 2.5);

    assert!(vm.calls().iter().take(8).all(|call| call.direct));
    assert!(vm.calls().iter().skip(8).all(|call| !call.direct));
}

#[test]
fn test_reference_returns_without_arguments() {
    let vm = MockVm::new().with_options(quiet());
    vm.throw("java/lang/IllegalStateException", "kept");
    let failure = vm.exception_occurred();
    vm.exception_clear();

    let holder_class = "com/example/Holder";
    vm.define_class(holder_class)
        .field("id", "I")
        .field("peer", "Ljava/lang/Object;")
        .method("peer", "()Ljava/lang/Object;", |vm, inv| Ok(vm.field(inv.this, "peer")))
        .method("label", "()Ljava/lang/String;", |vm, _| Ok(vm.new_string("holder").into()))
        .method("kind", "()Ljava/lang/Class;", |vm, inv| Ok(vm.get_object_class(inv.this).as_object().into()))
        .method("failure", "()Ljava/lang/Throwable;", move |_, _| Ok(failure.as_object().into()));

    let holder = vm.new_instance(holder_class);
    let peer = vm.new_instance(holder_class);
    vm.set_field(peer, "id", 7i32);
    vm.set_field(holder, "peer", peer);

    let got: JObject = call_method(&vm, holder, "peer", "()Ljava/lang/Object;", ()).unwrap();
    assert_eq!(get_field::<i32, _>(&vm, got, "id").unwrap(), 7);

    let label: JString = call_method(&vm, holder, "label", "()Ljava/lang/String;", ()).unwrap();
    assert_eq!(foreign_to_local_string(&vm, label), "holder");

    let kind: JClass = call_method(&vm, holder, "kind", "()Ljava/lang/Class;", ()).unwrap();
    assert!(!kind.is_null());

    let thrown: JThrowable = call_method(&vm, holder, "failure", "()Ljava/lang/Throwable;", ()).unwrap();
    assert_eq!(vm.thrown(thrown).unwrap().message, "kept");

    assert_eq!(vm.calls().len(), 4);
    assert!(vm.calls().iter().all(|call| call.direct));
}
