//! Cached CRUD operations over the taskboard API.
//!
//! # Design
//! `TaskStore` composes the stateless `TaskClient`, a `Transport`
//! implementation, and the `ListCache`. Reads serve the cache while it is
//! fresh; every successful mutation invalidates it so the next read
//! refetches the whole collection. A failed mutation leaves the cache
//! untouched — the caller keeps seeing the last fetched state.

use taskboard_core::{ApiError, CreateTask, ListCache, Task, TaskClient, UpdateTask};

use crate::transport::Transport;

pub struct TaskStore<T: Transport> {
    client: TaskClient,
    transport: T,
    cache: ListCache,
}

impl<T: Transport> TaskStore<T> {
    pub fn new(client: TaskClient, transport: T) -> Self {
        Self {
            client,
            transport,
            cache: ListCache::new(),
        }
    }

    /// The task collection, refetched from the server if the cache is stale.
    pub fn tasks(&mut self) -> Result<&[Task], ApiError> {
        if self.cache.is_stale() {
            let req = self.client.build_list_tasks();
            let response = self.transport.execute(req)?;
            let tasks = self.client.parse_list_tasks(response)?;
            self.cache.store(tasks);
        }
        Ok(self.cache.get().unwrap_or_default())
    }

    /// The last fetched list regardless of staleness, for rendering while
    /// a refetch is pending or after a failed one.
    pub fn last_known(&self) -> Option<&[Task]> {
        self.cache.last_known()
    }

    pub fn create(&mut self, input: &CreateTask) -> Result<Task, ApiError> {
        let req = self.client.build_create_task(input)?;
        let response = self.transport.execute(req)?;
        let task = self.client.parse_create_task(response)?;
        self.cache.invalidate();
        Ok(task)
    }

    pub fn update(&mut self, id: i64, input: &UpdateTask) -> Result<Task, ApiError> {
        let req = self.client.build_update_task(id, input)?;
        let response = self.transport.execute(req)?;
        let task = self.client.parse_update_task(response)?;
        self.cache.invalidate();
        Ok(task)
    }

    pub fn delete(&mut self, id: i64) -> Result<(), ApiError> {
        let req = self.client.build_delete_task(id);
        let response = self.transport.execute(req)?;
        self.client.parse_delete_task(response)?;
        self.cache.invalidate();
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use taskboard_core::HttpMethod;

    use super::*;
    use crate::transport::fake::{FakeTransport, RequestLog};

    fn store() -> (TaskStore<FakeTransport>, RequestLog) {
        let (transport, log) = FakeTransport::new();
        let store = TaskStore::new(TaskClient::new("http://localhost:8000"), transport);
        (store, log)
    }

    fn list_body(completed: bool) -> serde_json::Value {
        json!([{"id": 1, "title": "A", "description": "d", "completed": completed}])
    }

    #[test]
    fn tasks_are_served_from_cache_until_invalidated() {
        let (mut store, log) = store();
        store.transport.respond_json(200, list_body(false));

        assert_eq!(store.tasks().unwrap().len(), 1);
        assert_eq!(store.tasks().unwrap().len(), 1);
        // one GET despite two reads
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn successful_create_invalidates_the_cache() {
        let (mut store, log) = store();
        store.transport.respond_json(200, json!([]));
        store.tasks().unwrap();

        store.transport.respond_json(
            201,
            json!({"id": 1, "title": "A", "description": "d", "completed": false}),
        );
        let input = CreateTask {
            title: "A".to_string(),
            description: "d".to_string(),
            completed: false,
        };
        store.create(&input).unwrap();

        store.transport.respond_json(200, list_body(false));
        assert_eq!(store.tasks().unwrap().len(), 1);

        let log = log.borrow();
        assert_eq!(log.len(), 3);
        assert_eq!(log[0].method, HttpMethod::Get);
        assert_eq!(log[1].method, HttpMethod::Post);
        assert_eq!(log[2].method, HttpMethod::Get);
    }

    #[test]
    fn failed_mutation_leaves_cache_fresh() {
        let (mut store, log) = store();
        store.transport.respond_json(200, list_body(false));
        store.tasks().unwrap();

        store.transport.fail("connection refused");
        let err = store.update(1, &UpdateTask::toggle(true)).unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));

        // no refetch: the cached list is still considered fresh
        store.tasks().unwrap();
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn http_error_from_mutation_leaves_cache_fresh() {
        let (mut store, log) = store();
        store.transport.respond_json(200, list_body(false));
        store.tasks().unwrap();

        store.transport.respond_json(500, json!({"detail": "boom"}));
        let err = store.delete(1).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));

        store.tasks().unwrap();
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn update_sends_only_the_given_fields() {
        let (mut store, log) = store();
        store.transport.respond_json(
            200,
            json!({"id": 1, "title": "A", "description": "d", "completed": true}),
        );
        store.update(1, &UpdateTask::toggle(true)).unwrap();

        let log = log.borrow();
        let body: serde_json::Value =
            serde_json::from_str(log[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"completed": true}));
    }

    #[test]
    fn delete_invalidates_and_next_read_refetches() {
        let (mut store, log) = store();
        store.transport.respond_json(200, list_body(false));
        store.tasks().unwrap();

        store.transport.respond_json(204, json!(null));
        // the fake serializes json!(null) as "null"; delete ignores the body
        store.delete(1).unwrap();

        store.transport.respond_json(200, json!([]));
        assert!(store.tasks().unwrap().is_empty());
        assert_eq!(log.borrow().len(), 3);
    }
}
