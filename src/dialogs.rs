//! Dialog state machines.
//!
//! `Closed → Open → Submitting → Closed` on success, or back to `Open` with
//! the error shown. Closing drops the form, so reopening starts fresh.

use std::fmt::Display;
use std::future::Future;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogState<F> {
    Closed,
    Open { form: F, error: Option<String> },
    Submitting { form: F },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog<F> {
    state: DialogState<F>,
}

impl<F> Default for Dialog<F> {
    fn default() -> Self {
        Self {
            state: DialogState::Closed,
        }
    }
}

impl<F: Clone> Dialog<F> {
    pub fn state(&self) -> &DialogState<F> {
        &self.state
    }

    pub fn open(&mut self, form: F) {
        self.state = DialogState::Open { form, error: None };
    }

    pub fn close(&mut self) {
        self.state = DialogState::Closed;
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, DialogState::Closed)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, DialogState::Submitting { .. })
    }

    pub fn form(&self) -> Option<&F> {
        match &self.state {
            DialogState::Closed => None,
            DialogState::Open { form, .. } | DialogState::Submitting { form } => Some(form),
        }
    }

    /// Editable only while open and idle.
    pub fn form_mut(&mut self) -> Option<&mut F> {
        match &mut self.state {
            DialogState::Open { form, .. } => Some(form),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            DialogState::Open { error, .. } => error.as_deref(),
            _ => None,
        }
    }

    /// Run `action` with the current form. Returns `None` when the dialog is
    /// not open or a submission is already running.
    pub async fn submit<T, E, Fut>(&mut self, action: impl FnOnce(F) -> Fut) -> Option<Result<T, E>>
    where
        E: Display,
        Fut: Future<Output = Result<T, E>>,
    {
        let form = match &self.state {
            DialogState::Open { form, .. } => form.clone(),
            _ => return None,
        };
        self.state = DialogState::Submitting { form: form.clone() };

        let result = action(form.clone()).await;
        self.state = match &result {
            Ok(_) => DialogState::Closed,
            Err(err) => DialogState::Open {
                form,
                error: Some(err.to_string()),
            },
        };
        Some(result)
    }
}

impl<F: Clone + Default> Dialog<F> {
    pub fn open_default(&mut self) {
        self.open(F::default());
    }
}
