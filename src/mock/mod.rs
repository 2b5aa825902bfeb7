//! In-memory JVM for tests
//!
//! `MockVm` implements `JniEnv` over a small heap of classes, instances,
//! strings and throwables. Methods and constructors are Rust closures.
//! Lookups of unknown members leave `NoClassDefFoundError`,
//! `NoSuchMethodError` or `NoSuchFieldError` pending and return null, the way
//! a JVM does. Misuse a JVM would punish with a crash (a deleted reference,
//! an id from elsewhere, a primitive of the wrong kind) panics instead.
//!
//! ```ignore
//! let vm = MockVm::new();
//! vm.define_class("com/example/Counter")
//!     .field("count", "I")
//!     .method("add", "(I)I", |vm, inv| {
//!         let total = vm.field(inv.this, "count").as_int().unwrap_or(0) + inv.arg(0).as_int().unwrap_or(0);
//!         vm.set_field(inv.this, "count", total);
//!         Ok(total.into())
//!     });
//! ```

mod class;
mod state;
mod value;

pub use class::ClassBuilder;
pub use state::Body;
pub use value::{CallRecord, Invocation, Kind, Thrown, Value};

use crate::interop::{
    mutf8, EnvOptions, FieldId, JClass, JObject, JString, JThrowable, JavaType, JniEnv, MethodId, Reference,
};
use jni_sys::{jvalue, JNI_FALSE};
use state::{HeapEntry, MethodKind, State};
use std::cell::{Cell, RefCell};
use std::ffi::CStr;
use std::fmt;
use std::os::raw::c_char;

const NO_CLASS_DEF: &str = "java/lang/NoClassDefFoundError";
const NO_SUCH_METHOD: &str = "java/lang/NoSuchMethodError";
const NO_SUCH_FIELD: &str = "java/lang/NoSuchFieldError";
const NULL_POINTER: &str = "java/lang/NullPointerException";
const OUT_OF_MEMORY: &str = "java/lang/OutOfMemoryError";

enum Target {
    Instance(JObject),
    Static(JClass),
}

/// In-memory `JniEnv`. Single-threaded, like the env of one attached thread.
pub struct MockVm {
    state: RefCell<State>,
    options: Cell<EnvOptions>,
}

impl Default for MockVm {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MockVm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("MockVm")
            .field("classes", &state.classes.len())
            .field("live_local_refs", &state.live_locals())
            .field("pending_exception", &state.pending.is_some())
            .field("options", &self.options.get())
            .finish()
    }
}

impl MockVm {
    /// A VM knowing only `java/lang/Object`, `java/lang/String` and
    /// `java/lang/Class`.
    pub fn new() -> Self {
        let mut state = State::default();
        for name in ["java/lang/Object", "java/lang/String", "java/lang/Class"] {
            state.define_class(name);
        }
        Self {
            state: RefCell::new(state),
            options: Cell::new(EnvOptions::default()),
        }
    }

    pub fn with_options(self, options: EnvOptions) -> Self {
        self.options.set(options);
        self
    }

    pub fn set_options(&self, options: EnvOptions) {
        self.options.set(options);
    }

    // ========================================================================
    // Setup
    // ========================================================================

    /// Declare a class, or add members to an existing one.
    pub fn define_class(&self, name: &str) -> ClassBuilder<'_> {
        let class = self.state.borrow_mut().define_class(name);
        ClassBuilder::new(self, class)
    }

    /// Allocate an instance without running a constructor.
    ///
    /// # Panics
    /// If the class was never defined.
    pub fn new_instance(&self, class_name: &str) -> JObject {
        let mut state = self.state.borrow_mut();
        let Some(class) = state.class_id(class_name) else {
            panic!("MockVm: class {} is not defined", class_name);
        };
        let id = state.new_instance(class);
        state.new_local(id)
    }

    /// Write an instance field from outside the bridge.
    ///
    /// # Panics
    /// If `obj` has no field `name` or `value` is of the wrong kind.
    pub fn set_field(&self, obj: JObject, name: &str, value: impl Into<Value>) {
        let value = value.into();
        let mut state = self.state.borrow_mut();
        let value = state.pin(value);
        let Some(id) = state.target(obj) else {
            panic!("MockVm: set_field on null");
        };
        match state.entry_mut(id) {
            HeapEntry::Instance { fields, .. } => match fields.get_mut(name) {
                Some(slot) if slot.kind() == value.kind() => *slot = value,
                Some(slot) => panic!("MockVm: field {} holds {:?}, not {:?}", name, slot.kind(), value.kind()),
                None => panic!("MockVm: no instance field {}", name),
            },
            _ => panic!("MockVm: set_field on a non-instance"),
        }
    }

    /// Current value of an instance field; objects come back as new local
    /// references.
    pub fn field(&self, obj: JObject, name: &str) -> Value {
        let mut state = self.state.borrow_mut();
        let stored = match state.target(obj).map(|id| state.entry(id)) {
            Some(HeapEntry::Instance { fields, .. }) => fields.get(name).copied(),
            _ => None,
        };
        stored.map(|value| state.unpin(value)).unwrap_or_default()
    }

    /// # Panics
    /// If the class or static field does not exist, or `value` is of the
    /// wrong kind.
    pub fn set_static_field(&self, class_name: &str, name: &str, value: impl Into<Value>) {
        let value = value.into();
        let mut state = self.state.borrow_mut();
        let Some(class) = state.class_id(class_name) else {
            panic!("MockVm: class {} is not defined", class_name);
        };
        let value = state.pin(value);
        match state.classes[class].statics.get_mut(name) {
            Some(slot) if slot.kind() == value.kind() => *slot = value,
            Some(slot) => panic!("MockVm: static {} holds {:?}, not {:?}", name, slot.kind(), value.kind()),
            None => panic!("MockVm: no static field {}", name),
        }
    }

    pub fn static_field(&self, class_name: &str, name: &str) -> Value {
        let mut state = self.state.borrow_mut();
        let stored = state
            .class_id(class_name)
            .and_then(|class| state.classes[class].statics.get(name).copied());
        stored.map(|value| state.unpin(value)).unwrap_or_default()
    }

    /// New string, returned as a local reference.
    pub fn new_string(&self, text: &str) -> JString {
        let mut state = self.state.borrow_mut();
        let id = state.new_string(text.to_string());
        // SAFETY: the handle comes from this VM's reference table.
        unsafe { JString::from_raw(state.new_local(id).as_raw()) }
    }

    /// Text of a string reference; `None` for null or a non-string.
    pub fn string_value(&self, string: JString) -> Option<String> {
        let state = self.state.borrow();
        state
            .target(string.as_object())
            .and_then(|id| state.string(id).map(str::to_string))
    }

    /// Make an exception pending, as if Java code had thrown it.
    pub fn throw(&self, class: &str, message: &str) {
        self.state.borrow_mut().throw(Thrown::new(class, message));
    }

    /// Class and message of a throwable reference.
    pub fn thrown(&self, throwable: JThrowable) -> Option<Thrown> {
        let state = self.state.borrow();
        state
            .target(throwable.as_object())
            .and_then(|id| state.thrown(id).cloned())
    }

    pub fn pending_exception(&self) -> Option<Thrown> {
        let state = self.state.borrow();
        state.pending.and_then(|id| state.thrown(id).cloned())
    }

    /// Let the next `n` string allocations succeed and fail the rest with a
    /// pending `OutOfMemoryError`. `None` removes the limit.
    pub fn fail_strings_after(&self, n: Option<usize>) {
        self.state.borrow_mut().string_budget = n;
    }

    /// Make `GetStringUTFChars` fail with a pending `OutOfMemoryError`.
    pub fn refuse_utf_chars(&self, refuse: bool) {
        self.state.borrow_mut().refuse_utf_chars = refuse;
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    pub fn has_pending_exception(&self) -> bool {
        self.state.borrow().pending.is_some()
    }

    /// Times `ExceptionDescribe` ran with an exception pending.
    pub fn describe_count(&self) -> usize {
        self.state.borrow().describe_count
    }

    pub fn live_local_refs(&self) -> usize {
        self.state.borrow().live_locals()
    }

    pub fn is_live(&self, obj: JObject) -> bool {
        self.state.borrow().is_live(obj)
    }

    /// Local references deleted through `DeleteLocalRef`, in order.
    pub fn released_refs(&self) -> Vec<JObject> {
        self.state.borrow().released.clone()
    }

    /// `DeleteLocalRef` calls on an already deleted reference.
    pub fn double_releases(&self) -> usize {
        self.state.borrow().double_releases
    }

    /// `GetStringUTFChars` buffers not yet released.
    pub fn outstanding_utf_buffers(&self) -> usize {
        self.state.borrow().utf_buffers.len()
    }

    pub fn calls(&self) -> Vec<CallRecord> {
        self.state.borrow().calls.clone()
    }

    /// Calls made while an exception was already pending, which a JVM
    /// forbids.
    pub fn calls_with_pending_exception(&self) -> usize {
        self.state.borrow().calls_with_pending
    }

    // ========================================================================
    // Execution
    // ========================================================================

    fn invoke(&self, target: Target, method: MethodId, cells: Option<&[jvalue]>, expect: Kind) -> Value {
        let mut state = self.state.borrow_mut();
        let entry = state.method(method);
        let (class, kind, ret) = (entry.class, entry.kind, Kind::of(&entry.signature.ret));
        let (name, descriptor) = (entry.name.clone(), entry.descriptor.clone());
        let params = entry.signature.params.clone();
        let body = entry.body.clone();

        if ret != expect {
            panic!("MockVm: {}{} called through the {:?} primitive", name, descriptor, expect);
        }

        let this = match target {
            Target::Instance(obj) => {
                if kind != MethodKind::Instance {
                    panic!("MockVm: {} is not an instance method", name);
                }
                let Some(id) = state.target(obj) else {
                    state.throw(Thrown::new(NULL_POINTER, format!("{} on null", name)));
                    return Value::zero(expect);
                };
                if state.runtime_class(id) != class {
                    panic!("MockVm: {} called on an instance of another class", name);
                }
                obj
            }
            Target::Static(handle) => {
                if kind != MethodKind::Static {
                    panic!("MockVm: {} is not a static method", name);
                }
                if state.class_of_handle(handle) != Some(class) {
                    panic!("MockVm: {} called through another class", name);
                }
                JObject::null()
            }
        };

        let args = decode_args(&state, &params, cells, &name);
        let class_name = state.classes[class].name.clone();
        if state.pending.is_some() {
            state.calls_with_pending += 1;
        }
        state.calls.push(CallRecord {
            class: class_name.clone(),
            name: name.clone(),
            signature: descriptor.clone(),
            args: args.clone(),
            direct: cells.is_none(),
        });
        drop(state);

        let invocation = Invocation {
            this,
            class: class_name,
            name,
            signature: descriptor,
            args,
        };
        match body(self, &invocation) {
            Ok(value) if value.kind() == expect => self.state.borrow_mut().unpin(value),
            Ok(value) => panic!(
                "MockVm: {}{} returned {:?}",
                invocation.name,
                invocation.signature,
                value.kind()
            ),
            Err(thrown) => {
                self.state.borrow_mut().throw(thrown);
                Value::zero(expect)
            }
        }
    }

    fn construct(&self, class: JClass, constructor: MethodId, cells: &[jvalue]) -> JObject {
        let mut state = self.state.borrow_mut();
        let entry = state.method(constructor);
        if entry.kind != MethodKind::Constructor {
            panic!("MockVm: {} is not a constructor", entry.name);
        }
        let (class_id, descriptor) = (entry.class, entry.descriptor.clone());
        let params = entry.signature.params.clone();
        let body = entry.body.clone();
        if state.class_of_handle(class) != Some(class_id) {
            panic!("MockVm: constructor {} used with another class", descriptor);
        }

        let args = decode_args(&state, &params, Some(cells), "<init>");
        let class_name = state.classes[class_id].name.clone();
        if state.pending.is_some() {
            state.calls_with_pending += 1;
        }
        state.calls.push(CallRecord {
            class: class_name.clone(),
            name: "<init>".to_string(),
            signature: descriptor.clone(),
            args: args.clone(),
            direct: false,
        });
        let instance = state.new_instance(class_id);
        let this = state.new_local(instance);
        drop(state);

        let invocation = Invocation {
            this,
            class: class_name,
            name: "<init>".to_string(),
            signature: descriptor,
            args,
        };
        match body(self, &invocation) {
            Ok(_) => this,
            Err(thrown) => {
                let mut state = self.state.borrow_mut();
                state.discard_local(this);
                state.throw(thrown);
                JObject::null()
            }
        }
    }

    fn read_field(&self, obj: JObject, field: FieldId, expect: Kind) -> Value {
        let mut state = self.state.borrow_mut();
        let entry = state.field(field);
        if entry.is_static {
            panic!("MockVm: {} is a static field", entry.name);
        }
        check_field_kind(&entry.name, &entry.ty, expect);
        let name = entry.name.clone();

        let Some(id) = state.target(obj) else {
            state.throw(Thrown::new(NULL_POINTER, format!("read of {} on null", name)));
            return Value::zero(expect);
        };
        let stored = match state.entry(id) {
            HeapEntry::Instance { fields, .. } => fields.get(&name).copied(),
            _ => None,
        };
        match stored {
            Some(value) => state.unpin(value),
            None => panic!("MockVm: object has no field {}", name),
        }
    }

    fn read_static_field(&self, class: JClass, field: FieldId, expect: Kind) -> Value {
        let mut state = self.state.borrow_mut();
        let entry = state.field(field);
        if !entry.is_static {
            panic!("MockVm: {} is an instance field", entry.name);
        }
        check_field_kind(&entry.name, &entry.ty, expect);
        let (name, class_id) = (entry.name.clone(), entry.class);
        if state.class_of_handle(class) != Some(class_id) {
            panic!("MockVm: static {} read through another class", name);
        }
        let stored = state.classes[class_id].statics.get(&name).copied();
        stored.map(|value| state.unpin(value)).unwrap_or(Value::zero(expect))
    }

    fn resolve_member(&self, class: JClass, name: &CStr, signature: &CStr, member: Member) -> *mut () {
        let (name, signature) = (decode(name), decode(signature));
        let mut state = self.state.borrow_mut();
        let Some(class_id) = state.class_of_handle(class) else {
            state.throw(Thrown::new(NULL_POINTER, format!("lookup of {} on a null class", name)));
            return std::ptr::null_mut();
        };
        let found: Option<*mut ()> = match member {
            Member::Method => state.find_method(class_id, &name, &signature, false).map(|m| m.as_raw().cast()),
            Member::StaticMethod => state.find_method(class_id, &name, &signature, true).map(|m| m.as_raw().cast()),
            Member::Field => state.find_field(class_id, &name, &signature, false).map(|f| f.as_raw().cast()),
            Member::StaticField => state.find_field(class_id, &name, &signature, true).map(|f| f.as_raw().cast()),
        };
        match found {
            Some(id) => id,
            None => {
                let error = match member {
                    Member::Method | Member::StaticMethod => NO_SUCH_METHOD,
                    Member::Field | Member::StaticField => NO_SUCH_FIELD,
                };
                state.throw(Thrown::new(error, format!("{} {}", name, signature)));
                std::ptr::null_mut()
            }
        }
    }
}

#[derive(Clone, Copy)]
enum Member {
    Method,
    StaticMethod,
    Field,
    StaticField,
}

fn decode(text: &CStr) -> String {
    mutf8::decode(text.to_bytes()).into_owned()
}

fn check_field_kind(name: &str, ty: &JavaType, expect: Kind) {
    if Kind::of(ty) != expect {
        panic!("MockVm: field {} of type {} read through the {:?} primitive", name, ty, expect);
    }
}

fn decode_args(state: &State, params: &[JavaType], cells: Option<&[jvalue]>, name: &str) -> Vec<Value> {
    let cells = match cells {
        Some(cells) => cells,
        None if params.is_empty() => return Vec::new(),
        None => panic!("MockVm: {} takes {} arguments, called without any", name, params.len()),
    };
    if cells.len() < params.len() {
        panic!("MockVm: {} takes {} arguments, got {} cells", name, params.len(), cells.len());
    }

    params
        .iter()
        .zip(cells)
        .map(|(ty, cell)| {
            // SAFETY: the descriptor says which union field the caller wrote.
            let value = unsafe {
                match Kind::of(ty) {
                    Kind::Boolean => Value::Boolean(cell.z != JNI_FALSE),
                    Kind::Byte => Value::Byte(cell.b),
                    Kind::Char => Value::Char(cell.c),
                    Kind::Short => Value::Short(cell.s),
                    Kind::Int => Value::Int(cell.i),
                    Kind::Long => Value::Long(cell.j),
                    Kind::Float => Value::Float(cell.f),
                    Kind::Double => Value::Double(cell.d),
                    Kind::Object => Value::Object(JObject::from_raw(cell.l)),
                    Kind::Void => unreachable!("void parameter"),
                }
            };
            if let Value::Object(obj) = value {
                // Panics on a reference deleted before the call.
                state.target(obj);
            }
            value
        })
        .collect()
}

macro_rules! mock_kind {
    (
        $ty:ty, $kind:ident, $as:ident;
        $get:ident, $get_static:ident, $call_a:ident, $call_static_a:ident, $call:ident, $call_static:ident
    ) => {
        fn $get(&self, obj: JObject, field: FieldId) -> $ty {
            self.read_field(obj, field, Kind::$kind).$as().unwrap_or_default()
        }

        fn $get_static(&self, class: JClass, field: FieldId) -> $ty {
            self.read_static_field(class, field, Kind::$kind).$as().unwrap_or_default()
        }

        fn $call_a(&self, obj: JObject, method: MethodId, args: &[jvalue]) -> $ty {
            self.invoke(Target::Instance(obj), method, Some(args), Kind::$kind)
                .$as()
                .unwrap_or_default()
        }

        fn $call_static_a(&self, class: JClass, method: MethodId, args: &[jvalue]) -> $ty {
            self.invoke(Target::Static(class), method, Some(args), Kind::$kind)
                .$as()
                .unwrap_or_default()
        }

        fn $call(&self, obj: JObject, method: MethodId) -> $ty {
            self.invoke(Target::Instance(obj), method, None, Kind::$kind)
                .$as()
                .unwrap_or_default()
        }

        fn $call_static(&self, class: JClass, method: MethodId) -> $ty {
            self.invoke(Target::Static(class), method, None, Kind::$kind)
                .$as()
                .unwrap_or_default()
        }
    };
}

impl JniEnv for MockVm {
    fn options(&self) -> EnvOptions {
        self.options.get()
    }

    fn exception_check(&self) -> bool {
        self.state.borrow().pending.is_some()
    }

    fn exception_occurred(&self) -> JThrowable {
        self.state.borrow_mut().pending_throwable()
    }

    fn exception_describe(&self) {
        let mut state = self.state.borrow_mut();
        if state.pending.is_some() {
            state.describe_count += 1;
        }
    }

    fn exception_clear(&self) {
        self.state.borrow_mut().pending = None;
    }

    fn delete_local_ref(&self, obj: JObject) {
        self.state.borrow_mut().delete_local(obj);
    }

    fn find_class(&self, name: &CStr) -> JClass {
        let name = decode(name);
        let mut state = self.state.borrow_mut();
        match state.class_id(&name) {
            Some(class) => {
                let object = state.classes[class].object;
                // SAFETY: the handle comes from this VM's reference table.
                unsafe { JClass::from_raw(state.new_local(object).as_raw()) }
            }
            None => {
                state.throw(Thrown::new(NO_CLASS_DEF, name));
                JClass::null()
            }
        }
    }

    fn get_object_class(&self, obj: JObject) -> JClass {
        let mut state = self.state.borrow_mut();
        let Some(id) = state.target(obj) else {
            state.throw(Thrown::new(NULL_POINTER, "GetObjectClass on null"));
            return JClass::null();
        };
        let class = state.runtime_class(id);
        let object = state.classes[class].object;
        // SAFETY: the handle comes from this VM's reference table.
        unsafe { JClass::from_raw(state.new_local(object).as_raw()) }
    }

    fn get_method_id(&self, class: JClass, name: &CStr, signature: &CStr) -> MethodId {
        // SAFETY: ids come from this VM's method registry.
        unsafe { MethodId::from_raw(self.resolve_member(class, name, signature, Member::Method).cast()) }
    }

    fn get_static_method_id(&self, class: JClass, name: &CStr, signature: &CStr) -> MethodId {
        // SAFETY: ids come from this VM's method registry.
        unsafe { MethodId::from_raw(self.resolve_member(class, name, signature, Member::StaticMethod).cast()) }
    }

    fn get_field_id(&self, class: JClass, name: &CStr, signature: &CStr) -> FieldId {
        // SAFETY: ids come from this VM's field registry.
        unsafe { FieldId::from_raw(self.resolve_member(class, name, signature, Member::Field).cast()) }
    }

    fn get_static_field_id(&self, class: JClass, name: &CStr, signature: &CStr) -> FieldId {
        // SAFETY: ids come from this VM's field registry.
        unsafe { FieldId::from_raw(self.resolve_member(class, name, signature, Member::StaticField).cast()) }
    }

    fn new_string_utf(&self, utf: &CStr) -> JString {
        let mut state = self.state.borrow_mut();
        match state.string_budget {
            Some(0) => {
                state.throw(Thrown::new(OUT_OF_MEMORY, "string allocation refused"));
                return JString::null();
            }
            Some(n) => state.string_budget = Some(n - 1),
            None => {}
        }
        let id = state.new_string(decode(utf));
        // SAFETY: the handle comes from this VM's reference table.
        unsafe { JString::from_raw(state.new_local(id).as_raw()) }
    }

    fn get_string_utf_chars(&self, string: JString) -> *const c_char {
        let mut state = self.state.borrow_mut();
        if state.refuse_utf_chars {
            state.throw(Thrown::new(OUT_OF_MEMORY, "GetStringUTFChars refused"));
            return std::ptr::null();
        }
        let text = match state.target(string.as_object()) {
            Some(id) => match state.string(id) {
                Some(text) => text.to_string(),
                None => panic!("MockVm: GetStringUTFChars on a non-string"),
            },
            None => panic!("MockVm: GetStringUTFChars on null"),
        };
        let buffer = mutf8::encode(&text);
        let chars = buffer.as_ptr();
        state.utf_buffers.insert(chars as usize, buffer);
        chars
    }

    unsafe fn release_string_utf_chars(&self, _string: JString, chars: *const c_char) {
        if self.state.borrow_mut().utf_buffers.remove(&(chars as usize)).is_none() {
            panic!("MockVm: release of unknown UTF buffer {:p}", chars);
        }
    }

    fn new_object_a(&self, class: JClass, constructor: MethodId, args: &[jvalue]) -> JObject {
        self.construct(class, constructor, args)
    }

    mock_kind!(JObject, Object, as_object;
        get_object_field, get_static_object_field, call_object_method_a, call_static_object_method_a,
        call_object_method, call_static_object_method);
    mock_kind!(bool, Boolean, as_bool;
        get_boolean_field, get_static_boolean_field, call_boolean_method_a, call_static_boolean_method_a,
        call_boolean_method, call_static_boolean_method);
    mock_kind!(i8, Byte, as_byte;
        get_byte_field, get_static_byte_field, call_byte_method_a, call_static_byte_method_a,
        call_byte_method, call_static_byte_method);
    mock_kind!(u16, Char, as_char;
        get_char_field, get_static_char_field, call_char_method_a, call_static_char_method_a,
        call_char_method, call_static_char_method);
    mock_kind!(i16, Short, as_short;
        get_short_field, get_static_short_field, call_short_method_a, call_static_short_method_a,
        call_short_method, call_static_short_method);
    mock_kind!(i32, Int, as_int;
        get_int_field, get_static_int_field, call_int_method_a, call_static_int_method_a,
        call_int_method, call_static_int_method);
    mock_kind!(i64, Long, as_long;
        get_long_field, get_static_long_field, call_long_method_a, call_static_long_method_a,
        call_long_method, call_static_long_method);
    mock_kind!(f32, Float, as_float;
        get_float_field, get_static_float_field, call_float_method_a, call_static_float_method_a,
        call_float_method, call_static_float_method);
    mock_kind!(f64, Double, as_double;
        get_double_field, get_static_double_field, call_double_method_a, call_static_double_method_a,
        call_double_method, call_static_double_method);

    fn call_void_method_a(&self, obj: JObject, method: MethodId, args: &[jvalue]) {
        self.invoke(Target::Instance(obj), method, Some(args), Kind::Void);
    }

    fn call_static_void_method_a(&self, class: JClass, method: MethodId, args: &[jvalue]) {
        self.invoke(Target::Static(class), method, Some(args), Kind::Void);
    }

    fn call_void_method(&self, obj: JObject, method: MethodId) {
        self.invoke(Target::Instance(obj), method, None, Kind::Void);
    }

    fn call_static_void_method(&self, class: JClass, method: MethodId) {
        self.invoke(Target::Static(class), method, None, Kind::Void);
    }
}
