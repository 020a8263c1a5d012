/*!
 * Layout of the published document.
 *
 * A translated article can be written on its own, or next to the original
 * either separated by a thematic break (`simple`) or folded into a
 * `<details>` block under the original (`details`).
 */

use serde::{Deserialize, Serialize};

use crate::translation::workflow::{Article, TranslatedArticle};

/// How the original and the translation are laid out in the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BilingualFormat {
    /// Only the translation
    #[default]
    Translated,
    /// Original, `---`, translated body
    Simple,
    /// Original, then the translation inside `<details>`
    Details,
}

impl std::fmt::Display for BilingualFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Translated => "translated",
            Self::Simple => "simple",
            Self::Details => "details",
        };
        write!(f, "{}", name)
    }
}

fn heading(level: usize, title: &str) -> String {
    if title.is_empty() {
        String::new()
    } else {
        format!("{} {}\n\n", "#".repeat(level), title)
    }
}

/// Build the document to publish
///
/// Without a translated body the original is returned as is (title + body),
/// whatever the format. The `simple` layout carries the translated body only;
/// the translated title appears in `details` and `translated` layouts.
pub fn combine(
    article: &Article,
    translated: Option<&TranslatedArticle>,
    format: BilingualFormat,
    summary_text: &str,
) -> String {
    let translated_title = translated.map(|t| t.title.as_str()).unwrap_or_default();
    let translated_body = translated.map(|t| t.body.as_str()).unwrap_or_default();

    if article.title.is_empty()
        && article.body.is_empty()
        && translated_title.is_empty()
        && translated_body.is_empty()
    {
        return String::new();
    }

    let original_title = heading(1, &article.title);
    if translated_body.is_empty() {
        return format!("{}{}", original_title, article.body);
    }

    match format {
        BilingualFormat::Translated => {
            format!("{}{}", heading(1, translated_title), translated_body)
        }
        BilingualFormat::Simple => {
            format!("{}{}\n\n---\n\n{}", original_title, article.body, translated_body)
        }
        BilingualFormat::Details => format!(
            "{}{}\n\n<details>\n<summary>{}</summary>\n\n{}{}\n</details>",
            original_title,
            article.body,
            summary_text,
            heading(2, translated_title),
            translated_body
        ),
    }
}
