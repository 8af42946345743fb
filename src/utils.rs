use axum::response::Html;
use tera::{Context, Tera};

pub const EXAM_DEF_TEMPLATE: &str = "anki/exam_def.html";
pub const DESCRIPTION_TEMPLATE: &str = "anki/description.html";
pub const CARD_TABLE_TEMPLATE: &str = "anki/card_table.html";
pub const META_TEMPLATE: &str = "meta.html";

/// Templates are compiled into the binary so the server does not depend on
/// its working directory.
pub fn build_templates() -> tera::Result<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        (EXAM_DEF_TEMPLATE, include_str!("../templates/anki/exam_def.html")),
        (DESCRIPTION_TEMPLATE, include_str!("../templates/anki/description.html")),
        (CARD_TABLE_TEMPLATE, include_str!("../templates/anki/card_table.html")),
        (META_TEMPLATE, include_str!("../templates/meta.html")),
    ])?;
    Ok(tera)
}

/// Renders a template, logging and degrading to an empty string on failure.
pub fn render_fragment(tera: &Tera, template_name: &str, context: &Context) -> String {
    tera.render(template_name, context).unwrap_or_else(|e| {
        log::warn!("Error rendering template {}: {:?}", template_name, e);
        String::new()
    })
}

pub fn render_template(tera: &Tera, template_name: &str, context: Context) -> Html<String> {
    Html(
        tera.render(template_name, &context)
            .unwrap_or_else(|_| format!("Error rendering template: {}", template_name))
    )
}

/// Content type for an attachment, from the extension of its key.
pub fn content_type_for(key: &str) -> &'static str {
    let extension = key
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" | "oga" => "audio/ogg",
        "spx" => "audio/ogg",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "css" => "text/css",
        "js" => "text/javascript",
        "ttf" => "font/ttf",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        _ => "application/octet-stream",
    }
}
