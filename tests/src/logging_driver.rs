use relink_core::{
    async_trait,
    driver::{Driver, Operation, Response},
    Error, Result, Schema,
};

use std::{
    fmt,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

pub type Predicate = Arc<dyn Fn(&Operation) -> bool + Send + Sync>;

/// A driver wrapper that logs every operation and can be told to fail some.
pub struct LoggingDriver {
    inner: Box<dyn Driver>,

    /// Log of all operations executed through this driver
    ops_log: Arc<Mutex<Vec<DriverOp>>>,

    /// Operations matching the predicate fail without reaching `inner`
    fail_when: Arc<Mutex<Option<Predicate>>>,

    concurrency: Arc<Concurrency>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DriverOp {
    pub operation: Operation,
    pub response: Response,
}

/// Tracks how many operations were in flight at once.
#[derive(Debug, Default)]
pub struct Concurrency {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl Concurrency {
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl LoggingDriver {
    pub fn new(driver: Box<dyn Driver>) -> Self {
        Self {
            inner: driver,
            ops_log: Arc::new(Mutex::new(Vec::new())),
            fail_when: Arc::new(Mutex::new(None)),
            concurrency: Arc::new(Concurrency::default()),
        }
    }

    /// Get a handle to access the operations log
    pub fn ops_log_handle(&self) -> Arc<Mutex<Vec<DriverOp>>> {
        self.ops_log.clone()
    }

    pub fn fail_when_handle(&self) -> Arc<Mutex<Option<Predicate>>> {
        self.fail_when.clone()
    }

    pub fn concurrency_handle(&self) -> Arc<Concurrency> {
        self.concurrency.clone()
    }

    fn should_fail(&self, operation: &Operation) -> bool {
        let fail_when = self.fail_when.lock().unwrap();
        fail_when.as_ref().is_some_and(|f| f(operation))
    }
}

impl fmt::Debug for LoggingDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingDriver")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Driver for LoggingDriver {
    async fn register_schema(&mut self, schema: &Schema) -> Result<()> {
        self.inner.register_schema(schema).await
    }

    async fn exec(&self, schema: &Arc<Schema>, operation: Operation) -> Result<Response> {
        if self.should_fail(&operation) {
            return Err(Error::driver(std::io::Error::other(format!(
                "injected failure: {operation}"
            ))));
        }

        let now = self.concurrency.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.concurrency.peak.fetch_max(now, Ordering::SeqCst);

        // Give sibling operations a chance to start
        tokio::task::yield_now().await;

        let res = self.inner.exec(schema, operation.clone()).await;
        self.concurrency.in_flight.fetch_sub(1, Ordering::SeqCst);
        let response = res?;

        self.ops_log.lock().unwrap().push(DriverOp {
            operation,
            response: response.clone(),
        });

        Ok(response)
    }
}
