use image_pattern_core::{Context, FontCache, Pattern, PatternDocument, PatternError};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiImage {
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum FfiError {
    #[error("{message}")]
    Pattern { message: String },
}

impl From<PatternError> for FfiError {
    fn from(value: PatternError) -> Self {
        FfiError::Pattern {
            message: value.to_string(),
        }
    }
}

struct State {
    document: PatternDocument,
    context: Context,
    fonts: FontCache,
}

#[derive(uniffi::Object)]
pub struct CorePattern {
    state: Mutex<State>,
}

#[uniffi::export]
impl CorePattern {
    #[uniffi::constructor]
    pub fn from_json(json: String) -> Result<Arc<Self>, FfiError> {
        let document = PatternDocument::from_json(&json)?;
        Ok(Arc::new(Self {
            state: Mutex::new(State {
                document,
                context: Context::new(),
                fonts: FontCache::new(),
            }),
        }))
    }

    pub fn set_text(&self, name: String, value: String) {
        self.state
            .lock()
            .expect("mutex poisoned")
            .context
            .insert(name, value);
    }

    pub fn set_number(&self, name: String, value: f64) {
        self.state
            .lock()
            .expect("mutex poisoned")
            .context
            .insert(name, value);
    }

    pub fn set_flag(&self, name: String, value: bool) {
        self.state
            .lock()
            .expect("mutex poisoned")
            .context
            .insert(name, value);
    }

    pub fn clear_variables(&self) {
        self.state.lock().expect("mutex poisoned").context = Context::new();
    }

    pub fn variables(&self) -> Result<Vec<String>, FfiError> {
        Ok(self
            .state
            .lock()
            .expect("mutex poisoned")
            .document
            .variables()?)
    }

    pub fn missing_variables(&self) -> Result<Vec<String>, FfiError> {
        let state = self.state.lock().expect("mutex poisoned");
        let mut names = state.document.variables()?;
        names.retain(|name| !state.context.contains(name));
        Ok(names)
    }

    pub fn render_png(&self) -> Result<FfiImage, FfiError> {
        let mut guard = self.state.lock().expect("mutex poisoned");
        let State {
            document,
            context,
            fonts,
        } = &mut *guard;
        let image = document.render_with(context, fonts)?;
        Ok(FfiImage {
            width: image.width(),
            height: image.height(),
            png: image_pattern_core::patterns::encode_png(&image)?,
        })
    }

    pub fn to_json(&self) -> Result<String, FfiError> {
        Ok(self
            .state
            .lock()
            .expect("mutex poisoned")
            .document
            .to_json()?)
    }
}
