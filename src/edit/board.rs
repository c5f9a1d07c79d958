use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::api::SensorApi;
use crate::edit::field::{CommitRequest, EditableField};
use crate::error::{AppError, AppResult};

pub type SharedField = Arc<Mutex<EditableField>>;

/// Send a confirmed edit and apply the result to the field.
///
/// The field lock is not held during the remote call, so the field can be
/// cancelled and re-edited meanwhile; the result then lands on a stale
/// session and is dropped. Returns whether the result was applied.
pub async fn commit<A: SensorApi>(
    api: &A,
    field: &Mutex<EditableField>,
    request: CommitRequest,
) -> bool {
    tracing::debug!(mac = %request.mac, name = %request.name, "Committing sensor name");
    let outcome = api.rename_sensor(&request.mac, &request.name).await;
    field.lock().await.resolve(request.session, &outcome)
}

/// All editable sensor names on a page, one lock per sensor.
#[derive(Default)]
pub struct FieldBoard {
    fields: HashMap<String, SharedField>,
}

impl FieldBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sensor name as editable. Replaces an existing entry for the same mac.
    pub fn insert(&mut self, mac: &str, text: &str) -> SharedField {
        let field = Arc::new(Mutex::new(EditableField::new(mac, text)));
        self.fields.insert(mac.to_string(), Arc::clone(&field));
        field
    }

    /// # Errors
    ///
    /// Returns `AppError::MissingTarget` if no field is registered for `mac`.
    pub fn get(&self, mac: &str) -> AppResult<SharedField> {
        self.fields
            .get(mac)
            .cloned()
            .ok_or_else(|| AppError::MissingTarget(format!("editable name for sensor {mac}")))
    }

    /// Current display text of every field, sorted by mac.
    pub async fn snapshot(&self) -> Vec<(String, String)> {
        let mut out = Vec::with_capacity(self.fields.len());
        for (mac, field) in &self.fields {
            out.push((mac.clone(), field.lock().await.text().to_string()));
        }
        out.sort();
        out
    }

    /// Activate the field, type `name`, confirm, and wait for the result.
    ///
    /// Returns the text shown afterwards.
    ///
    /// # Errors
    ///
    /// Returns `AppError::MissingTarget` for an unknown mac and
    /// `AppError::Validation` when the field is already being edited.
    pub async fn rename<A: SensorApi>(
        &self,
        api: &A,
        mac: &str,
        name: &str,
    ) -> AppResult<String> {
        let field = self.get(mac)?;
        let request = {
            let mut guard = field.lock().await;
            if guard.activate().is_none() {
                return Err(AppError::Validation(format!(
                    "Sensor {mac} is already being edited"
                )));
            }
            guard.set_draft(name);
            guard.blur()
        };

        if let Some(request) = request {
            commit(api, &field, request).await;
        }
        let text = field.lock().await.text().to_string();
        Ok(text)
    }
}
