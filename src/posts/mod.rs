// Post generation core: prompt construction and model-output parsing.
//
// Everything in here is pure: no network, no rendering surface. The web
// layer feeds raw Gemini text into `parser` and ships the resulting
// records to the browser as-is.

use serde::Serialize;

pub mod parser;
pub mod prompt;
pub mod sanitize;

/// One structured Instagram post extracted from the model output.
///
/// Field values are already sanitized (HTML-escaped, newlines encoded as
/// `<br>`) so they can be injected into the page without further escaping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Literal number parsed from the `**Post N:**` marker, never
    /// recomputed from position, even when markers repeat or skip.
    pub id: u32,
    pub image_description: String,
    pub caption: Caption,
}

/// The caption half of a post: body text with its hashtags split out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Caption {
    /// Hashtag-free caption body.
    pub text: String,
    /// Space-joined `#token` list; empty when the model used none.
    pub hashtags: String,
}

impl Post {
    /// True when both fields are empty; such posts are dropped by the
    /// parser before a result set is returned.
    pub fn is_blank(&self) -> bool {
        self.image_description.is_empty() && self.caption.text.is_empty()
    }

    /// Serialize the post into the preformatted block handed to the
    /// clipboard: the three fields under their Portuguese headings, with
    /// `<br>` markers converted back to real newlines (spaces for the
    /// hashtag line).
    pub fn clipboard_block(&self) -> String {
        format!(
            "📷 Descrição da Imagem:\n{}\n\n✍️ Legenda:\n{}\n\n🏷️ Hashtags: {}",
            self.image_description.replace("<br>", "\n"),
            self.caption.text.replace("<br>", "\n"),
            self.caption.hashtags.replace("<br>", " "),
        )
    }
}
