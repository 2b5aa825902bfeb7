//! Heap, reference table and member registries of the mock VM

use super::value::{CallRecord, Invocation, Kind, Thrown, Value};
use super::MockVm;
use crate::interop::{FieldId, JClass, JObject, JThrowable, JavaType, MethodId, MethodSignature, Reference};
use jni_sys::jobject;
use std::collections::HashMap;
use std::ffi::CString;
use std::rc::Rc;

/// Body of a mock method or constructor
pub type Body = Rc<dyn Fn(&MockVm, &Invocation) -> Result<Value, Thrown>>;

pub(super) type HeapId = usize;
pub(super) type ClassId = usize;

pub(super) enum HeapEntry {
    /// The `java.lang.Class` object of a class
    Class(ClassId),
    Instance {
        class: ClassId,
        fields: HashMap<String, Value>,
    },
    Str(String),
    Throwable(Thrown),
}

struct RefSlot {
    target: HeapId,
    global: bool,
    live: bool,
}

pub(super) struct ClassDef {
    pub name: String,
    pub object: HeapId,
    pub instance_fields: Vec<(String, JavaType)>,
    pub statics: HashMap<String, Value>,
}

pub(super) struct FieldEntry {
    pub class: ClassId,
    pub name: String,
    pub descriptor: String,
    pub ty: JavaType,
    pub is_static: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum MethodKind {
    Instance,
    Static,
    Constructor,
}

pub(super) struct MethodEntry {
    pub class: ClassId,
    pub name: String,
    pub descriptor: String,
    pub signature: MethodSignature,
    pub kind: MethodKind,
    pub body: Body,
}

#[derive(Default)]
pub(super) struct State {
    heap: Vec<HeapEntry>,
    refs: Vec<RefSlot>,
    pub classes: Vec<ClassDef>,
    class_names: HashMap<String, ClassId>,
    pub fields: Vec<FieldEntry>,
    pub methods: Vec<MethodEntry>,

    pub pending: Option<HeapId>,
    pub describe_count: usize,
    pub released: Vec<JObject>,
    pub double_releases: usize,
    pub utf_buffers: HashMap<usize, CString>,
    pub calls: Vec<CallRecord>,
    pub calls_with_pending: usize,
    /// Remaining successful `NewStringUTF` calls; unlimited when `None`
    pub string_budget: Option<usize>,
    pub refuse_utf_chars: bool,
}

fn handle(index: usize) -> jobject {
    (index + 1) as jobject
}

impl State {
    // ========================================================================
    // References
    // ========================================================================

    fn alloc(&mut self, entry: HeapEntry) -> HeapId {
        self.heap.push(entry);
        self.heap.len() - 1
    }

    fn new_ref(&mut self, target: HeapId, global: bool) -> JObject {
        self.refs.push(RefSlot {
            target,
            global,
            live: true,
        });
        // SAFETY: the handle indexes `refs` and is only resolved by this VM.
        unsafe { JObject::from_raw(handle(self.refs.len() - 1)) }
    }

    pub fn new_local(&mut self, target: HeapId) -> JObject {
        self.new_ref(target, false)
    }

    fn slot_index(&self, obj: JObject) -> Option<usize> {
        let raw = obj.as_raw() as usize;
        if raw == 0 || raw > self.refs.len() {
            return None;
        }
        Some(raw - 1)
    }

    /// Heap entry behind `obj`, `None` for null.
    ///
    /// # Panics
    /// On a deleted or unknown handle.
    pub fn target(&self, obj: JObject) -> Option<HeapId> {
        if obj.is_null() {
            return None;
        }
        match self.slot_index(obj).map(|i| &self.refs[i]) {
            Some(slot) if slot.live => Some(slot.target),
            Some(_) => panic!("MockVm: use of deleted reference {:p}", obj.as_raw()),
            None => panic!("MockVm: unknown reference {:p}", obj.as_raw()),
        }
    }

    pub fn delete_local(&mut self, obj: JObject) {
        let Some(index) = self.slot_index(obj) else {
            return;
        };
        let slot = &mut self.refs[index];
        if slot.global {
            panic!("MockVm: DeleteLocalRef on a field-held reference {:p}", obj.as_raw());
        }
        if !slot.live {
            self.double_releases += 1;
            return;
        }
        slot.live = false;
        self.released.push(obj);
    }

    /// Drop a local reference without recording it as released by the caller.
    pub fn discard_local(&mut self, obj: JObject) {
        if let Some(index) = self.slot_index(obj) {
            self.refs[index].live = false;
        }
    }

    pub fn is_live(&self, obj: JObject) -> bool {
        self.slot_index(obj).map_or(false, |i| self.refs[i].live)
    }

    pub fn live_locals(&self) -> usize {
        self.refs.iter().filter(|slot| slot.live && !slot.global).count()
    }

    /// Field and static storage holds its own references.
    pub fn pin(&mut self, value: Value) -> Value {
        match value {
            Value::Object(obj) => match self.target(obj) {
                Some(target) => Value::Object(self.new_ref(target, true)),
                None => Value::Object(JObject::null()),
            },
            other => other,
        }
    }

    /// Hand a stored value to native code as a fresh local reference.
    pub fn unpin(&mut self, value: Value) -> Value {
        match value {
            Value::Object(obj) => match self.target(obj) {
                Some(target) => Value::Object(self.new_local(target)),
                None => Value::Object(JObject::null()),
            },
            other => other,
        }
    }

    pub fn entry(&self, id: HeapId) -> &HeapEntry {
        &self.heap[id]
    }

    pub fn entry_mut(&mut self, id: HeapId) -> &mut HeapEntry {
        &mut self.heap[id]
    }

    // ========================================================================
    // Classes
    // ========================================================================

    pub fn define_class(&mut self, name: &str) -> ClassId {
        if let Some(&id) = self.class_names.get(name) {
            return id;
        }
        let id = self.classes.len();
        let object = self.alloc(HeapEntry::Class(id));
        self.classes.push(ClassDef {
            name: name.to_string(),
            object,
            instance_fields: Vec::new(),
            statics: HashMap::new(),
        });
        self.class_names.insert(name.to_string(), id);
        id
    }

    pub fn class_id(&self, name: &str) -> Option<ClassId> {
        self.class_names.get(name).copied()
    }

    /// Class behind a `jclass` handle.
    pub fn class_of_handle(&self, class: JClass) -> Option<ClassId> {
        match self.target(class.as_object()).map(|id| &self.heap[id]) {
            Some(HeapEntry::Class(id)) => Some(*id),
            Some(_) => panic!("MockVm: {:p} is not a class reference", class.as_raw()),
            None => None,
        }
    }

    /// Runtime class of a heap entry, defining library classes on demand.
    pub fn runtime_class(&mut self, id: HeapId) -> ClassId {
        let name = match &self.heap[id] {
            HeapEntry::Instance { class, .. } => return *class,
            HeapEntry::Class(_) => "java/lang/Class".to_string(),
            HeapEntry::Str(_) => "java/lang/String".to_string(),
            HeapEntry::Throwable(thrown) => thrown.class.clone(),
        };
        self.define_class(&name)
    }

    pub fn new_instance(&mut self, class: ClassId) -> HeapId {
        let fields = self.classes[class]
            .instance_fields
            .iter()
            .map(|(name, ty)| (name.clone(), Value::zero(Kind::of(ty))))
            .collect();
        self.alloc(HeapEntry::Instance { class, fields })
    }

    pub fn new_string(&mut self, text: String) -> HeapId {
        self.alloc(HeapEntry::Str(text))
    }

    pub fn string(&self, id: HeapId) -> Option<&str> {
        match &self.heap[id] {
            HeapEntry::Str(text) => Some(text),
            _ => None,
        }
    }

    // ========================================================================
    // Members
    // ========================================================================

    pub fn add_field(&mut self, class: ClassId, name: &str, ty: JavaType, is_static: bool) {
        self.fields.push(FieldEntry {
            class,
            name: name.to_string(),
            descriptor: ty.descriptor(),
            ty: ty.clone(),
            is_static,
        });
        let def = &mut self.classes[class];
        if is_static {
            def.statics.insert(name.to_string(), Value::zero(Kind::of(&ty)));
        } else {
            def.instance_fields.push((name.to_string(), ty));
        }
    }

    pub fn add_method(&mut self, entry: MethodEntry) {
        self.methods.push(entry);
    }

    pub fn find_field(&self, class: ClassId, name: &str, descriptor: &str, is_static: bool) -> Option<FieldId> {
        self.fields
            .iter()
            .position(|f| f.class == class && f.name == name && f.descriptor == descriptor && f.is_static == is_static)
            // SAFETY: the id indexes `fields` and is only resolved by this VM.
            .map(|i| unsafe { FieldId::from_raw(handle(i) as jni_sys::jfieldID) })
    }

    pub fn find_method(&self, class: ClassId, name: &str, descriptor: &str, is_static: bool) -> Option<MethodId> {
        self.methods
            .iter()
            .position(|m| {
                m.class == class
                    && m.name == name
                    && m.descriptor == descriptor
                    && (m.kind == MethodKind::Static) == is_static
            })
            // SAFETY: the id indexes `methods` and is only resolved by this VM.
            .map(|i| unsafe { MethodId::from_raw(handle(i) as jni_sys::jmethodID) })
    }

    /// # Panics
    /// On an id this VM did not hand out.
    pub fn field(&self, field: FieldId) -> &FieldEntry {
        let raw = field.as_raw() as usize;
        match raw.checked_sub(1).and_then(|i| self.fields.get(i)) {
            Some(entry) => entry,
            None => panic!("MockVm: unknown field id {:p}", field.as_raw()),
        }
    }

    /// # Panics
    /// On an id this VM did not hand out.
    pub fn method(&self, method: MethodId) -> &MethodEntry {
        let raw = method.as_raw() as usize;
        match raw.checked_sub(1).and_then(|i| self.methods.get(i)) {
            Some(entry) => entry,
            None => panic!("MockVm: unknown method id {:p}", method.as_raw()),
        }
    }

    // ========================================================================
    // Exceptions
    // ========================================================================

    pub fn throw(&mut self, thrown: Thrown) {
        self.define_class(&thrown.class);
        let id = self.alloc(HeapEntry::Throwable(thrown));
        self.pending = Some(id);
    }

    pub fn pending_throwable(&mut self) -> JThrowable {
        match self.pending {
            // SAFETY: the handle comes from this VM's reference table.
            Some(id) => unsafe { JThrowable::from_raw(self.new_local(id).as_raw()) },
            None => JThrowable::null(),
        }
    }

    pub fn thrown(&self, id: HeapId) -> Option<&Thrown> {
        match &self.heap[id] {
            HeapEntry::Throwable(thrown) => Some(thrown),
            _ => None,
        }
    }
}
