use tokio::task::JoinHandle;

/// Tracks the client's background tasks (transport reader, heartbeat) so
/// disconnect can tear them all down.
pub struct TaskManager {
    handles: Vec<JoinHandle<()>>,
}

impl TaskManager {
    pub fn new() -> Self {
        Self {
            handles: Vec::new(),
        }
    }

    /// Spawn a task and track it.
    pub fn spawn<F>(&mut self, future: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        self.reap();
        self.handles.push(tokio::spawn(future));
    }

    /// Abort all tracked tasks without waiting.
    pub fn abort_all(&mut self) {
        for handle in &self.handles {
            handle.abort();
        }
        self.handles.clear();
    }

    /// Drop handles of tasks that already ran to completion. Keeps the list
    /// from growing across reconnect cycles.
    fn reap(&mut self) {
        self.handles.retain(|handle| !handle.is_finished());
    }
}

impl Default for TaskManager {
    fn default() -> Self {
        Self::new()
    }
}
