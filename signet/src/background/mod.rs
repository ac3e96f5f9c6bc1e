use std::collections::HashMap;
use std::future::Future;
use tokio::task::JoinHandle;

/// Tracks in-flight authority requests and cancels them on shutdown
pub struct BackgroundTaskManager {
    tasks: HashMap<String, JoinHandle<()>>,
}

impl BackgroundTaskManager {
    pub fn new() -> Self {
        Self {
            tasks: HashMap::new(),
        }
    }

    /// Spawn a task under `task_id`, aborting any previous task with that id
    pub fn spawn_task<F>(&mut self, task_id: &str, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Some(handle) = self.tasks.remove(task_id) {
            if !handle.is_finished() {
                tracing::debug!(task_id, "Replacing in-flight task");
            }
            handle.abort();
        }

        let handle = tokio::spawn(future);
        self.tasks.insert(task_id.to_string(), handle);
    }

    pub fn running(&self) -> usize {
        self.tasks.values().filter(|h| !h.is_finished()).count()
    }

    /// Abort everything (used on shutdown)
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

impl Default for BackgroundTaskManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for BackgroundTaskManager {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
