use std::cell::RefCell;
use std::rc::Rc;

use crate::backend::{RequestCallback, RequestFailure};

/// Correlation record between a request and its completion callback.
///
/// Written exactly once by the callback, then consumed by the bridge.
pub(crate) struct PendingRequest<T> {
    result: Option<T>,
    completed: bool,
}

impl<T: 'static> PendingRequest<T> {
    pub(crate) fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            result: None,
            completed: false,
        }))
    }

    /// The fixed completion callback for `record`.
    ///
    /// `what` names the requested object in the failure diagnostic.
    pub(crate) fn completion(record: &Rc<RefCell<Self>>, what: &'static str) -> RequestCallback<T> {
        let record = Rc::clone(record);
        Box::new(move |outcome| record.borrow_mut().complete(what, outcome))
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.completed
    }

    /// Takes the result out of the record; `None` when the request failed or
    /// never completed.
    pub(crate) fn into_result(record: Rc<RefCell<Self>>) -> Option<T> {
        record.borrow_mut().result.take()
    }

    fn complete(&mut self, what: &str, outcome: Result<T, RequestFailure>) {
        debug_assert!(!self.completed, "{what} request completed twice");

        match outcome {
            Ok(handle) => self.result = Some(handle),
            Err(failure) => log::error!("could not get WebGPU {what}: {failure}"),
        }
        self.completed = true;
    }
}
