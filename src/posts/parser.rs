// Recovery of structured posts from loosely formatted model text.
//
// The prompt asks for `**Post N:**` blocks with `- Imagem:` and
// `- Legenda:` lines, but the model drifts: markers gain whitespace,
// labels lose bullets or colons, emphasis leaks into values. Parsing is
// two-phase and lookahead-free: segment the text into per-marker spans,
// then cut each field from its label position to the next boundary.

use regex_lite::Regex;
use tracing::warn;

use crate::error::GenerateError;
use crate::posts::sanitize::sanitize_field;
use crate::posts::{Caption, Post};

/// Compiled patterns for one parsing pass. Build once and reuse; the
/// patterns are fixed strings and compilation cannot fail at runtime.
pub struct PostParser {
    marker: Regex,
    imagem_label: Regex,
    legenda_label: Regex,
    hashtag: Regex,
}

struct Marker {
    id: u32,
    start: usize,
    end: usize,
}

impl PostParser {
    pub fn new() -> Self {
        // Labels are matched at line starts only, with an optional bullet
        // and up to three stray emphasis stars on either side of the word.
        PostParser {
            marker: Regex::new(r"\*\*Post\s*(\d+):\*\*").unwrap(),
            imagem_label: Regex::new(r"(?i)(?:^|\n)[ \t]*[-*]?[ \t]*\*{0,3}imagem\*{0,3}[ \t]*:?[ \t]*")
                .unwrap(),
            legenda_label: Regex::new(r"(?i)(?:^|\n)[ \t]*[-*]?[ \t]*\*{0,3}legenda\*{0,3}[ \t]*:?[ \t]*")
                .unwrap(),
            // Preceding spaces are part of the match so that removing a
            // tag never leaves a double space behind.
            hashtag: Regex::new(r"[ \t]*(#[\wÀ-ú]+)").unwrap(),
        }
    }

    /// Parse model output into the ordered post list.
    ///
    /// Posts come back in marker order with the literal id parsed from
    /// each marker (duplicates and gaps are preserved, not renumbered).
    /// Spans where both fields end up empty are dropped; if nothing
    /// survives, the text is declared unparsable.
    pub fn parse(&self, raw: &str) -> Result<Vec<Post>, GenerateError> {
        let text = raw.replace("\r\n", "\n").replace('\r', "\n");

        let markers = self.collect_markers(&text);
        let mut posts = Vec::with_capacity(markers.len());

        for (i, marker) in markers.iter().enumerate() {
            let span_end = markers.get(i + 1).map_or(text.len(), |next| next.start);
            let span = &text[marker.end..span_end];

            let post = Post {
                id: marker.id,
                image_description: sanitize_field(self.image_description(span)),
                caption: self.format_caption(self.caption_text(span)),
            };
            if !post.is_blank() {
                posts.push(post);
            }
        }

        if posts.is_empty() {
            warn!(chars = text.len(), "no posts recognized in model output");
            return Err(GenerateError::UnparsablePosts);
        }
        Ok(posts)
    }

    /// All `**Post N:**` markers whose number fits in a u32. A marker
    /// with an absurd number is not a segment boundary; its text simply
    /// stays inside the preceding span.
    fn collect_markers(&self, text: &str) -> Vec<Marker> {
        self.marker
            .captures_iter(text)
            .filter_map(|cap| {
                let m = cap.get(0)?;
                let id = cap.get(1)?.as_str().parse::<u32>().ok()?;
                Some(Marker {
                    id,
                    start: m.start(),
                    end: m.end(),
                })
            })
            .collect()
    }

    /// Raw image description: from the end of the first `Imagem` label to
    /// the start of the following `Legenda` label, or the end of the span.
    fn image_description<'a>(&self, span: &'a str) -> &'a str {
        let Some(label) = self.imagem_label.find(span) else {
            return "";
        };
        let value_start = label.end();
        let value_end = self
            .legenda_label
            .find(&span[value_start..])
            .map_or(span.len(), |next| value_start + next.start());
        &span[value_start..value_end]
    }

    /// Raw caption: from the end of the first `Legenda` label to the
    /// start of the following `Imagem` label, or the end of the span.
    /// Field order within a span is free, so a caption written first
    /// must not swallow the image line below it.
    fn caption_text<'a>(&self, span: &'a str) -> &'a str {
        let Some(label) = self.legenda_label.find(span) else {
            return "";
        };
        let value_start = label.end();
        let value_end = self
            .imagem_label
            .find(&span[value_start..])
            .map_or(span.len(), |next| value_start + next.start());
        &span[value_start..value_end]
    }

    /// Split a raw caption into hashtag-free text plus the space-joined
    /// hashtag list. Tags are pulled out before sanitization so emphasis
    /// cleanup cannot disturb them.
    fn format_caption(&self, raw: &str) -> Caption {
        let hashtags = self
            .hashtag
            .captures_iter(raw)
            .filter_map(|cap| cap.get(1))
            .map(|tag| tag.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let text = self.hashtag.replace_all(raw, "");

        Caption {
            text: sanitize_field(&text),
            hashtags: sanitize_field(&hashtags),
        }
    }
}

impl Default for PostParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Vec<Post> {
        PostParser::new().parse(text).unwrap()
    }

    #[test]
    fn marker_with_overflowing_number_is_not_a_boundary() {
        let text = "**Post 1:**\n- Imagem: campo aberto\n**Post 99999999999999999999:**\n- Legenda: Confia. #fé";
        let posts = parse(text);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, 1);
        // The bogus marker's block stays inside post 1's span
        assert_eq!(posts[0].caption.text, "Confia.");
        assert_eq!(posts[0].caption.hashtags, "#fé");
    }

    #[test]
    fn label_variants_from_model_drift() {
        let text = "**Post 2:**\n**Imagem**: um barco no mar\nLegenda Paz no meio da tempestade. #paz";
        let posts = parse(text);
        assert_eq!(posts[0].id, 2);
        assert_eq!(posts[0].image_description, "um barco no mar");
        assert_eq!(posts[0].caption.text, "Paz no meio da tempestade.");
    }

    #[test]
    fn caption_before_image_still_yields_both_fields() {
        let text = "**Post 1:**\n- Legenda: Ele cuida de ti. #cuidado\n- Imagem: mãos estendidas";
        let posts = parse(text);
        assert_eq!(posts[0].image_description, "mãos estendidas");
        // The image line below the caption belongs to the image field only
        assert_eq!(posts[0].caption.text, "Ele cuida de ti.");
        assert_eq!(posts[0].caption.hashtags, "#cuidado");
    }

    #[test]
    fn hashtags_only_caption_counts_as_blank_text() {
        // Image side carries the post; caption text ends up empty
        let text = "**Post 1:**\n- Imagem: vitral colorido\n- Legenda: #fé #luz #paz";
        let posts = parse(text);
        assert_eq!(posts[0].caption.text, "");
        assert_eq!(posts[0].caption.hashtags, "#fé #luz #paz");
    }
}
