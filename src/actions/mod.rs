pub mod dispatcher;
pub mod feedback;
pub mod forms;
pub mod modal;

pub use dispatcher::Dispatcher;
pub use feedback::{Feedback, FeedbackSlot};
pub use forms::{AlarmForm, ExportForm, ExportRequest, ScheduleForm};
pub use modal::Modal;

use std::future::Future;
use url::Url;

use crate::error::AppResult;

/// Where export URLs are sent. In a browser this is a page navigation that
/// starts a file download.
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: Url) -> impl Future<Output = AppResult<()>> + Send;
}
