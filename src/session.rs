//! Session-scoped output store.
//!
//! The session exclusively owns the documents of the current run. A new
//! generation trigger replaces the list wholesale via [`Session::begin_batch`]
//! — output never accumulates across runs.

/// One generated document held in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFile {
    pub name: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct Session {
    generated_files: Vec<GeneratedFile>,
    batch_complete: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// The defined reset point: clears any previous output and the
    /// completion flag before a run starts.
    pub fn begin_batch(&mut self) {
        self.generated_files.clear();
        self.batch_complete = false;
    }

    pub fn record(&mut self, file: GeneratedFile) {
        self.generated_files.push(file);
    }

    pub fn finish_batch(&mut self) {
        self.batch_complete = true;
    }

    pub fn batch_complete(&self) -> bool {
        self.batch_complete
    }

    pub fn files(&self) -> &[GeneratedFile] {
        &self.generated_files
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> GeneratedFile {
        GeneratedFile {
            name: name.to_string(),
            data: vec![1, 2, 3],
        }
    }

    #[test]
    fn test_begin_batch_replaces_wholesale() {
        let mut session = Session::new();
        session.record(file("old.docx"));
        session.finish_batch();

        session.begin_batch();
        assert!(session.files().is_empty());
        assert!(!session.batch_complete());

        session.record(file("new.docx"));
        session.finish_batch();
        assert_eq!(session.files().len(), 1);
        assert_eq!(session.files()[0].name, "new.docx");
        assert!(session.batch_complete());
    }

    #[test]
    fn test_records_keep_order() {
        let mut session = Session::new();
        session.begin_batch();
        session.record(file("a.docx"));
        session.record(file("b.docx"));
        let names: Vec<&str> = session.files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.docx", "b.docx"]);
    }
}
