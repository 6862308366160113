use std::cell::RefCell;
use std::rc::Rc;

use yew::prelude::*;

use crate::services::forms::{FormDraft, FormError, FormStatus};

/// Submit state of one form instance. The status lives in a shared cell so a
/// second click in the same frame already sees `Submitting`.
#[derive(Clone)]
pub struct FormHandle {
    status: Rc<RefCell<FormStatus>>,
    rerender: UseForceUpdateHandle,
}

impl PartialEq for FormHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.status, &other.status)
    }
}

impl FormHandle {
    pub fn snapshot(&self) -> FormStatus {
        self.status.borrow().clone()
    }

    pub fn begin<D: FormDraft>(&self, draft: &D) -> Result<D::Request, FormError> {
        let result = self.status.borrow_mut().begin(draft);
        self.rerender.force_update();
        result
    }

    pub fn succeed(&self, message: impl Into<String>) {
        self.status.borrow_mut().succeed(message);
        self.rerender.force_update();
    }

    pub fn fail(&self, message: impl Into<String>) {
        self.status.borrow_mut().fail(message);
        self.rerender.force_update();
    }

    pub fn clear(&self) {
        self.status.borrow_mut().clear();
        self.rerender.force_update();
    }
}

#[hook]
pub fn use_form() -> FormHandle {
    let status = use_mut_ref(FormStatus::default);
    let rerender = use_force_update();
    FormHandle { status, rerender }
}
