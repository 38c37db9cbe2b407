use crate::error::HandlerError;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Where the post body lives inside the API payload.
const PARAGRAPHS_POINTER: &str = "/value/content/bodyModel/paragraphs";

/// Images are referenced by ID and served from this host.
const IMAGE_HOST: &str = "https://miro.medium.com/";

/// A single block of the post body as Medium stores it.
#[derive(Deserialize, Debug)]
struct Paragraph {
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    kind: u32,
    #[serde(default)]
    text: String,
    #[serde(default)]
    markups: Vec<Markup>,
    metadata: Option<ImageMetadata>,
    iframe: Option<Iframe>,
}

/// Inline formatting over `text[start..end]`, in characters.
#[derive(Deserialize, Debug)]
struct Markup {
    #[serde(rename = "type")]
    kind: u32,
    start: usize,
    end: usize,
    href: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ImageMetadata {
    id: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Iframe {
    thumbnail_url: Option<String>,
}

// paragraph types
const TEXT: u32 = 1;
const HEADER: u32 = 3;
const IMAGE: u32 = 4;
const QUOTE: u32 = 6;
const CODE: u32 = 8;
const BULLET: u32 = 9;
const IFRAME: u32 = 11;
const SUBTITLE: u32 = 13;

// markup types
const BOLD: u32 = 1;
const ITALIC: u32 = 2;
const LINK: u32 = 3;
const INLINE_CODE: u32 = 10;

/// Renders the body of a post payload as Markdown.
/// Fails if the payload has no paragraphs or they are not in the expected shape.
pub fn render_post(payload: &Value) -> Result<String, HandlerError> {
    let paragraphs = payload
        .pointer(PARAGRAPHS_POINTER)
        .ok_or_else(|| HandlerError::Parse("no paragraphs in the post payload".to_owned()))?;

    let paragraphs = Vec::<Paragraph>::deserialize(paragraphs)?;
    debug!("Rendering {} paragraphs", paragraphs.len());

    let mut output = String::new();

    for (idx, paragraph) in paragraphs.iter().enumerate() {
        output.push_str(&render_paragraph(paragraph, idx == 0));

        // consecutive bullets stay in the same list
        let next_kind = paragraphs.get(idx + 1).map(|p| p.kind);
        if paragraph.kind == BULLET && next_kind == Some(BULLET) {
            output.push('\n');
        } else {
            output.push_str("\n\n");
        }
    }

    Ok(output)
}

fn render_paragraph(paragraph: &Paragraph, is_first: bool) -> String {
    let text = apply_markups(&paragraph.text, &paragraph.markups);

    match paragraph.kind {
        TEXT => text,
        HEADER if is_first => format!("# {text}"),
        HEADER => format!("## {text}"),
        IMAGE => match paragraph.metadata.as_ref().and_then(|m| m.id.as_deref()) {
            Some(id) => format!("![alt text]({IMAGE_HOST}{id} \"{}\")\n\n{text}", escape_title(&text)),
            None => {
                warn!("Image paragraph {} has no image ID", paragraph.name);
                text
            }
        },
        QUOTE => format!("> {text}"),
        // the language is unknown
        CODE => format!("```\n{text}\n```"),
        BULLET => format!("* {text}"),
        // only the thumbnail, the embedded content is not rendered
        IFRAME => match paragraph.iframe.as_ref().and_then(|f| f.thumbnail_url.as_deref()) {
            Some(url) => format!("![alt text]({url} \"{}\")", escape_title(&text)),
            None => {
                warn!("Iframe paragraph {} has no thumbnail", paragraph.name);
                text
            }
        },
        SUBTITLE => format!("### {text}"),
        kind => {
            warn!("Unknown paragraph type {kind} in {}", paragraph.name);
            text
        }
    }
}

/// Escapes double quotes so the text can go inside a `"title"` of a Markdown image.
fn escape_title(text: &str) -> String {
    text.replace('"', "\\\"")
}

/// Wraps marked up ranges of `text` in Markdown.
/// Markups overlapping an earlier one or pointing outside of the text are skipped.
fn apply_markups(text: &str, markups: &[Markup]) -> String {
    if markups.is_empty() {
        return text.to_owned();
    }

    let chars = text.chars().collect::<Vec<char>>();
    let mut markups = markups.iter().collect::<Vec<&Markup>>();
    markups.sort_by_key(|m| m.start);

    let mut output = String::with_capacity(text.len() + markups.len() * 4);
    let mut cursor = 0;

    for markup in markups {
        if markup.start < cursor || markup.start > markup.end || markup.end > chars.len() {
            debug!("Skipping markup {}..{} of type {}", markup.start, markup.end, markup.kind);
            continue;
        }

        output.extend(&chars[cursor..markup.start]);
        let inner = chars[markup.start..markup.end].iter().collect::<String>();

        match markup.kind {
            BOLD => output.push_str(&format!("**{inner}**")),
            ITALIC => output.push_str(&format!("*{inner}*")),
            LINK => match markup.href.as_deref() {
                Some(href) => output.push_str(&format!("[{inner}]({href})")),
                None => output.push_str(&inner),
            },
            INLINE_CODE => output.push_str(&format!("`{inner}`")),
            _ => output.push_str(&inner),
        }

        cursor = markup.end;
    }

    output.extend(&chars[cursor..]);

    output
}
