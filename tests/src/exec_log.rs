use crate::logging_driver::DriverOp;

use relink_core::driver::{Operation, Response};
use std::{
    fmt,
    sync::{Arc, Mutex},
};

/// A wrapper around the operations log that provides a clean API for tests
pub struct ExecLog {
    ops: Arc<Mutex<Vec<DriverOp>>>,
}

impl ExecLog {
    pub(crate) fn new(ops: Arc<Mutex<Vec<DriverOp>>>) -> Self {
        Self { ops }
    }

    pub fn len(&self) -> usize {
        self.ops.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.lock().unwrap().is_empty()
    }

    pub fn clear(&mut self) {
        self.ops.lock().unwrap().clear();
    }

    /// Remove and return the first operation from the log
    #[track_caller]
    pub fn pop(&mut self) -> (Operation, Response) {
        let mut ops = self.ops.lock().unwrap();
        if ops.is_empty() {
            panic!("no operations in log");
        } else {
            let driver_op = ops.remove(0);
            (driver_op.operation, driver_op.response)
        }
    }

    /// Every logged operation, oldest first
    pub fn operations(&self) -> Vec<Operation> {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .map(|op| op.operation.clone())
            .collect()
    }

    /// Index of the first logged operation matching `f`
    pub fn first(&self, f: impl Fn(&Operation) -> bool) -> Option<usize> {
        self.operations().iter().position(f)
    }

    /// Index of the last logged operation matching `f`
    pub fn last(&self, f: impl Fn(&Operation) -> bool) -> Option<usize> {
        self.operations().iter().rposition(f)
    }
}

impl fmt::Debug for ExecLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ops = self.ops.lock().unwrap();
        f.debug_struct("ExecLog").field("ops", &*ops).finish()
    }
}
