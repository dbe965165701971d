// Config loading and on-disk template tests
use std::fs;
use std::io::{Cursor, Write};

use coachgen::config::Config;
use coachgen::docx::{document_xml, DocxTemplate};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

#[test]
fn test_load_with_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("coachgen.toml");
    fs::write(
        &path,
        r#"
        [access]
        password_env = "TEAM_LEAD_PASSWORD"

        [team]
        agents = ["Smith, Al", "Doe, Jane"]

        [generation]
        lookback = 7
        template_path = "plans/template.docx"
        "#,
    )
    .unwrap();

    let config = Config::load_with_path(Some(path.to_string_lossy().to_string())).unwrap();
    assert_eq!(config.access.password_env, "TEAM_LEAD_PASSWORD");
    assert_eq!(config.generation.lookback, 7);
    assert_eq!(config.generation.template_path, "plans/template.docx");
    // Unset sections keep their defaults.
    assert_eq!(config.llm.api_key_env, "GEMINI_KEY");
    // Roster comes back sorted.
    assert_eq!(config.roster(), vec!["Doe, Jane", "Smith, Al"]);
}

#[test]
fn test_load_with_explicit_path_missing_file_fails() {
    let result = Config::load_with_path(Some("/nonexistent/coachgen.toml".to_string()));
    assert!(result.is_err());
}

#[test]
fn test_load_with_invalid_toml_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("coachgen.toml");
    fs::write(&path, "this is not toml [[").unwrap();
    let result = Config::load_with_path(Some(path.to_string_lossy().to_string()));
    assert!(result.is_err());
}

#[test]
fn test_template_from_path() {
    let document = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
         <w:body><w:p><w:r><w:t>Agent: {{Agent Name}}</w:t></w:r></w:p></w:body></w:document>";
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    writer.start_file("[Content_Types].xml", options).unwrap();
    writer.write_all(b"<Types/>").unwrap();
    writer.start_file("word/document.xml", options).unwrap();
    writer.write_all(document.as_bytes()).unwrap();
    let bytes = writer.finish().unwrap().into_inner();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("template.docx");
    fs::write(&path, bytes).unwrap();

    let template = DocxTemplate::from_path(&path).unwrap();
    let rendered = template
        .render(&[("{{Agent Name}}", "Doe, Jane".to_string())])
        .unwrap();
    let xml = document_xml(&rendered).unwrap();
    assert!(xml.contains("Agent: Doe, Jane"));
}

#[test]
fn test_template_from_missing_path_fails() {
    assert!(DocxTemplate::from_path("/nonexistent/template.docx").is_err());
}
