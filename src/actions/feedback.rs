use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

pub const OK_COLOR: &str = "#28a745";
pub const ERROR_COLOR: &str = "#dc3545";

/// Short status line shown under a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub message: String,
    pub ok: bool,
}

impl Feedback {
    #[must_use]
    pub fn color(&self) -> &'static str {
        if self.ok { OK_COLOR } else { ERROR_COLOR }
    }
}

#[derive(Debug, Default)]
struct SlotState {
    generation: u64,
    current: Option<Feedback>,
}

/// Inline message area of one form. Messages clear themselves after a delay.
#[derive(Debug, Clone)]
pub struct FeedbackSlot {
    state: Arc<RwLock<SlotState>>,
    clear_after: Duration,
}

impl FeedbackSlot {
    #[must_use]
    pub fn new(clear_after: Duration) -> Self {
        Self {
            state: Arc::new(RwLock::new(SlotState::default())),
            clear_after,
        }
    }

    /// Show `message` and schedule its removal.
    ///
    /// A later message restarts the timer; the earlier timer then leaves it alone.
    pub async fn show(&self, message: impl Into<String>, ok: bool) {
        let generation = {
            let mut state = self.state.write().await;
            state.generation += 1;
            state.current = Some(Feedback {
                message: message.into(),
                ok,
            });
            state.generation
        };

        let state = Arc::clone(&self.state);
        let delay = self.clear_after;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut state = state.write().await;
            if state.generation == generation {
                state.current = None;
            }
        });
    }

    pub async fn current(&self) -> Option<Feedback> {
        self.state.read().await.current.clone()
    }
}
