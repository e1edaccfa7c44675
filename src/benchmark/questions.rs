//! Benchmark question sets

use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

/// Questions asked when the caller supplies none
pub const DEFAULT_QUESTIONS: [&str; 5] = [
    "What services do you offer?",
    "What is your pricing?",
    "Where are you located?",
    "What are your business hours?",
    "Do you offer refunds or a money-back guarantee?",
];

/// The default question set as owned strings
pub fn default_questions() -> Vec<String> {
    DEFAULT_QUESTIONS.iter().map(|q| q.to_string()).collect()
}

/// The questions to run: `questions` when non-empty, the defaults otherwise
pub fn resolve_questions(questions: Option<Vec<String>>) -> Vec<String> {
    match questions {
        Some(questions) if !questions.is_empty() => questions,
        _ => default_questions(),
    }
}

/// Load questions from a file
///
/// A `.json` file must hold an array of strings. Any other file is read as
/// one question per line; blank lines and lines starting with `#` are skipped.
pub async fn load_questions(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path).await?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let questions: Vec<String> = if is_json {
        serde_json::from_str(&content)?
    } else {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect()
    };

    if questions.is_empty() {
        return Err(Error::Config(format!(
            "no questions found in {}",
            path.display()
        )));
    }
    debug!(count = questions.len(), path = %path.display(), "Loaded questions");
    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_resolve_questions() {
        assert_eq!(resolve_questions(None).len(), 5);
        assert_eq!(resolve_questions(Some(Vec::new())), default_questions());

        let custom = vec!["Do you ship abroad?".to_string()];
        assert_eq!(resolve_questions(Some(custom.clone())), custom);
    }

    #[tokio::test]
    async fn test_load_text_questions() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# shipping").unwrap();
        writeln!(file, "Do you ship abroad?").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  What is your phone number?  ").unwrap();

        let questions = load_questions(file.path()).await.unwrap();

        assert_eq!(
            questions,
            vec![
                "Do you ship abroad?".to_string(),
                "What is your phone number?".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_load_json_questions() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"["Where are you located?", "Who founded the company?"]"#).unwrap();

        let questions = load_questions(file.path()).await.unwrap();

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[1], "Who founded the company?");
    }

    #[tokio::test]
    async fn test_load_empty_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# nothing here").unwrap();

        let result = load_questions(file.path()).await;

        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let result = load_questions("/definitely/not/here.txt").await;
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
