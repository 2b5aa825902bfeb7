//! Declaring mock classes

use super::state::{Body, ClassId, MethodEntry, MethodKind};
use super::value::{Invocation, Thrown, Value};
use super::MockVm;
use crate::interop::lookup::CONSTRUCTOR_NAME;
use crate::interop::{JavaType, MethodSignature};
use std::rc::Rc;

/// Adds members to one class of a `MockVm`.
///
/// # Panics
/// Every method panics on a malformed descriptor.
pub struct ClassBuilder<'vm> {
    vm: &'vm MockVm,
    class: ClassId,
}

impl<'vm> ClassBuilder<'vm> {
    pub(super) fn new(vm: &'vm MockVm, class: ClassId) -> Self {
        Self { vm, class }
    }

    /// Instance field, zero-initialised in every new instance.
    pub fn field(self, name: &str, descriptor: &str) -> Self {
        let ty = field_type(descriptor);
        self.vm.state.borrow_mut().add_field(self.class, name, ty, false);
        self
    }

    /// Static field holding `value`.
    pub fn static_field(self, name: &str, descriptor: &str, value: impl Into<Value>) -> Self {
        let ty = field_type(descriptor);
        {
            let mut state = self.vm.state.borrow_mut();
            state.add_field(self.class, name, ty, true);
            let value = state.pin(value.into());
            state.classes[self.class].statics.insert(name.to_string(), value);
        }
        self
    }

    pub fn method<F>(self, name: &str, descriptor: &str, body: F) -> Self
    where
        F: Fn(&MockVm, &Invocation) -> Result<Value, Thrown> + 'static,
    {
        self.add(name, descriptor, MethodKind::Instance, Rc::new(body))
    }

    pub fn static_method<F>(self, name: &str, descriptor: &str, body: F) -> Self
    where
        F: Fn(&MockVm, &Invocation) -> Result<Value, Thrown> + 'static,
    {
        self.add(name, descriptor, MethodKind::Static, Rc::new(body))
    }

    /// Constructor; `body` runs with `this` set to the new instance and its
    /// return value is ignored.
    pub fn constructor<F>(self, descriptor: &str, body: F) -> Self
    where
        F: Fn(&MockVm, &Invocation) -> Result<Value, Thrown> + 'static,
    {
        self.add(CONSTRUCTOR_NAME, descriptor, MethodKind::Constructor, Rc::new(body))
    }

    fn add(self, name: &str, descriptor: &str, kind: MethodKind, body: Body) -> Self {
        let signature = match MethodSignature::parse(descriptor) {
            Ok(signature) => signature,
            Err(err) => panic!("MockVm: {}", err),
        };
        if kind == MethodKind::Constructor && signature.ret != JavaType::Void {
            panic!("MockVm: constructor descriptor {} must return V", descriptor);
        }
        self.vm.state.borrow_mut().add_method(MethodEntry {
            class: self.class,
            name: name.to_string(),
            descriptor: descriptor.to_string(),
            signature,
            kind,
            body,
        });
        self
    }
}

fn field_type(descriptor: &str) -> JavaType {
    match JavaType::parse_field(descriptor) {
        Ok(ty) => ty,
        Err(err) => panic!("MockVm: {}", err),
    }
}
