use crate::merge::Upload;

/// Files staged for a merge together with the key of the upload widget that
/// collected them.
///
/// Clearing the session bumps the key so a front end can discard its widget
/// state and start over. The merge itself never looks at the key.
#[derive(Debug)]
pub struct UploadSession<U> {
    key: u64,
    files: Vec<U>,
}

impl<U> Default for UploadSession<U> {
    fn default() -> Self {
        Self {
            key: 0,
            files: Vec::new(),
        }
    }
}

impl<U: Upload> UploadSession<U> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(&self) -> u64 {
        self.key
    }

    /// Widget identifier derived from the current key.
    pub fn widget_key(&self) -> String {
        format!("uploader_{}", self.key)
    }

    pub fn stage(&mut self, file: U) {
        self.files.push(file);
    }

    pub fn files(&self) -> &[U] {
        &self.files
    }

    pub fn files_mut(&mut self) -> &mut [U] {
        &mut self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Drops every staged file and rotates the widget key.
    pub fn clear(&mut self) {
        self.files.clear();
        self.key += 1;
    }
}
