//! Transient notification messages

use crate::constants::TOAST_EXIT_MS;
use crate::scheduler::TimerService;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

/// Which feature raised the toast. A new form message replaces older ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastChannel {
    Form,
    Download,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: ToastId,
    pub kind: ToastKind,
    pub channel: ToastChannel,
    pub message: String,
    pub leaving: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastTask {
    BeginExit(ToastId),
    Remove(ToastId),
}

#[derive(Debug, Default)]
pub struct Toasts {
    items: Vec<Toast>,
    next_id: u64,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show<T>(
        &mut self,
        channel: ToastChannel,
        kind: ToastKind,
        message: impl Into<String>,
        visible_ms: u64,
        timers: &mut impl TimerService<T>,
    ) -> ToastId
    where
        T: From<ToastTask>,
    {
        if channel == ToastChannel::Form {
            self.items.retain(|t| t.channel != ToastChannel::Form);
        }

        let id = ToastId(self.next_id);
        self.next_id += 1;
        let message = message.into();
        tracing::debug!("Toast {:?}: {}", kind, message);

        self.items.push(Toast {
            id,
            kind,
            channel,
            message,
            leaving: false,
        });
        timers.set_timeout(visible_ms, ToastTask::BeginExit(id).into());
        id
    }

    pub fn handle<T>(&mut self, task: ToastTask, timers: &mut impl TimerService<T>)
    where
        T: From<ToastTask>,
    {
        match task {
            ToastTask::BeginExit(id) => {
                if let Some(toast) = self.items.iter_mut().find(|t| t.id == id) {
                    toast.leaving = true;
                    timers.set_timeout(TOAST_EXIT_MS, ToastTask::Remove(id).into());
                }
            }
            ToastTask::Remove(id) => {
                self.items.retain(|t| t.id != id);
            }
        }
    }

    /// Visible toasts, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
