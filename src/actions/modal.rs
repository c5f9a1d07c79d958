/// A dialog holding the form of the sensor it was opened for.
///
/// Each opening receives its own form, so nothing carries over from the
/// previous sensor.
#[derive(Debug, Clone)]
pub struct Modal<F> {
    form: Option<F>,
}

impl<F> Default for Modal<F> {
    fn default() -> Self {
        Self { form: None }
    }
}

impl<F> Modal<F> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, form: F) {
        self.form = Some(form);
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.form.is_some()
    }

    #[must_use]
    pub fn form(&self) -> Option<&F> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut F> {
        self.form.as_mut()
    }

    pub fn close(&mut self) -> Option<F> {
        self.form.take()
    }
}
