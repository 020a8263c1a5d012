/*!
 * Tests for file and directory utilities
 */

use anyhow::Result;
use std::path::PathBuf;

use mdtranslate::file_utils::FileManager;

use crate::common;

#[test]
fn test_generateOutputPath_shouldInsertLanguageBeforeExtension() {
    let path = FileManager::generate_output_path("docs/article.md", "out", "fr", "md");
    assert_eq!(path, PathBuf::from("out/article.fr.md"));

    let path = FileManager::generate_output_path("notes.markdown", "out", "de", ".markdown");
    assert_eq!(path, PathBuf::from("out/notes.de.markdown"));
}

#[test]
fn test_findMarkdownFiles_shouldRecurseAndSkipOutputs() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();

    common::create_test_file(root, "b.md", "# B")?;
    common::create_test_file(root, "a.markdown", "# A")?;
    common::create_test_file(root, "a.en.markdown", "# A translated")?;
    common::create_test_file(root, "notes.txt", "not markdown")?;
    common::create_test_file(root, "nested/c.md", "# C")?;
    common::create_test_file(root, "nested/c.fr.md", "# C translated")?;

    let files = FileManager::find_markdown_files(root)?;
    let names: Vec<String> = files
        .iter()
        .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();

    assert_eq!(names, vec!["a.markdown", "b.md", "nested/c.md"]);
    Ok(())
}

#[test]
fn test_writeToFile_shouldCreateParentDirectories() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("deep/inside/out.md");

    FileManager::write_to_file(&path, "hola")?;

    assert!(FileManager::file_exists(&path));
    assert!(FileManager::dir_exists(temp_dir.path().join("deep/inside")));
    assert_eq!(FileManager::read_to_string(&path)?, "hola");
    Ok(())
}

#[test]
fn test_readToString_withMissingFile_shouldFail() {
    assert!(FileManager::read_to_string("/definitely/not/here.md").is_err());
}

#[test]
fn test_isTranslatedOutput_shouldValidateLanguageCode() {
    assert!(FileManager::is_translated_output("guide.es.md"));
    assert!(FileManager::is_translated_output("guide.ES.MD"));
    assert!(!FileManager::is_translated_output("guide.zz.md"));
    assert!(!FileManager::is_translated_output("guide.md"));
}
