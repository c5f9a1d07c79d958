use uuid::Uuid;

use crate::error::AppResult;
use crate::models::DEFAULT_SENSOR_NAME;

/// Identifies one edit session of one field.
///
/// A remote call only affects the field if the field is still in the session
/// that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionToken(Uuid);

impl SessionToken {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldState {
    Display,
    Editing {
        session: SessionToken,
        original: String,
        draft: String,
    },
    Committing {
        session: SessionToken,
        original: String,
        pending: String,
    },
}

/// Keys the input reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Enter,
    Escape,
    Other,
}

/// What a host should draw for the field right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldView<'a> {
    Text(&'a str),
    Input { value: &'a str, focused: bool },
}

/// Update to send after an edit is confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRequest {
    pub session: SessionToken,
    pub mac: String,
    pub name: String,
}

/// A sensor name that can be edited in place.
#[derive(Debug, Clone)]
pub struct EditableField {
    mac: String,
    text: String,
    state: FieldState,
}

impl EditableField {
    #[must_use]
    pub fn new(mac: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            mac: mac.into(),
            text: text.into(),
            state: FieldState::Display,
        }
    }

    #[must_use]
    pub fn mac(&self) -> &str {
        &self.mac
    }

    /// Text currently shown when the field is not being edited.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn state(&self) -> &FieldState {
        &self.state
    }

    #[must_use]
    pub fn view(&self) -> FieldView<'_> {
        match &self.state {
            FieldState::Display => FieldView::Text(&self.text),
            FieldState::Editing { draft, .. } => FieldView::Input {
                value: draft,
                focused: true,
            },
            FieldState::Committing { pending, .. } => FieldView::Input {
                value: pending,
                focused: false,
            },
        }
    }

    /// Pointer interaction on the display text: swap in a focused input.
    ///
    /// Returns `None` while a session is already open on this field.
    pub fn activate(&mut self) -> Option<SessionToken> {
        if self.state != FieldState::Display {
            return None;
        }
        let trimmed = self.text.trim();
        let original = if trimmed.is_empty() {
            DEFAULT_SENSOR_NAME.to_string()
        } else {
            trimmed.to_string()
        };
        let session = SessionToken::new();
        self.state = FieldState::Editing {
            session,
            draft: original.clone(),
            original,
        };
        Some(session)
    }

    /// Replace the input's content.
    pub fn set_draft(&mut self, value: impl Into<String>) {
        if let FieldState::Editing { draft, .. } = &mut self.state {
            *draft = value.into();
        }
    }

    pub fn blur(&mut self) -> Option<CommitRequest> {
        self.begin_commit()
    }

    pub fn key(&mut self, key: EditKey) -> Option<CommitRequest> {
        match key {
            EditKey::Enter => self.begin_commit(),
            EditKey::Escape => {
                self.cancel();
                None
            }
            EditKey::Other => None,
        }
    }

    /// Abandon the session and show the original text again.
    ///
    /// A commit already in flight is not aborted; its result will be ignored.
    pub fn cancel(&mut self) {
        match std::mem::replace(&mut self.state, FieldState::Display) {
            FieldState::Editing { original, .. } | FieldState::Committing { original, .. } => {
                self.text = original;
            }
            FieldState::Display => {}
        }
    }

    fn begin_commit(&mut self) -> Option<CommitRequest> {
        let FieldState::Editing {
            session,
            original,
            draft,
        } = &self.state
        else {
            return None;
        };

        let trimmed = draft.trim();
        let name = if trimmed.is_empty() {
            original.clone()
        } else {
            trimmed.to_string()
        };
        let request = CommitRequest {
            session: *session,
            mac: self.mac.clone(),
            name: name.clone(),
        };
        let next = FieldState::Committing {
            session: *session,
            original: original.clone(),
            pending: name,
        };
        self.state = next;
        Some(request)
    }

    /// Apply the outcome of a commit.
    ///
    /// Returns `false` and leaves the field untouched when `session` is no
    /// longer the field's current session.
    pub fn resolve(&mut self, session: SessionToken, outcome: &AppResult<()>) -> bool {
        let current = matches!(
            &self.state,
            FieldState::Committing { session: s, .. } if *s == session
        );
        if !current {
            tracing::debug!(mac = %self.mac, "Ignoring result of a stale edit session");
            return false;
        }

        if let FieldState::Committing {
            original, pending, ..
        } = std::mem::replace(&mut self.state, FieldState::Display)
        {
            match outcome {
                Ok(()) => self.text = pending,
                Err(e) => {
                    tracing::warn!(mac = %self.mac, error = %e, "Rename failed, restoring previous name");
                    self.text = original;
                }
            }
        }
        true
    }
}
