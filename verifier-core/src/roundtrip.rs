//! Sample conversion job used by the full check.

use reqwest::multipart::{Form, Part};

/// Chromium HTML route of the conversion service.
pub const CONVERT_HTML_PATH: &str = "/forms/chromium/convert/html";

const SAMPLE_DOCUMENT: &str = "<!doctype html>\
<html><head><meta charset=\"utf-8\"><title>readiness probe</title></head>\
<body><h1>readiness probe</h1><p>If you can read this as a PDF, conversion works.</p></body></html>";

/// A4 portrait with half-inch margins.
const PAGE_FIELDS: [(&str, &str); 6] = [
    ("paperWidth", "8.27"),
    ("paperHeight", "11.7"),
    ("marginTop", "0.5"),
    ("marginBottom", "0.5"),
    ("marginLeft", "0.5"),
    ("marginRight", "0.5"),
];

pub fn sample_document() -> &'static str {
    SAMPLE_DOCUMENT
}

/// Multipart body for a one-page HTML to PDF conversion.
pub fn sample_form() -> Result<Form, reqwest::Error> {
    let file = Part::bytes(SAMPLE_DOCUMENT.as_bytes())
        .file_name("index.html")
        .mime_str("text/html")?;

    let form = PAGE_FIELDS
        .iter()
        .fold(Form::new().part("files", file), |form, (name, value)| {
            form.text(*name, *value)
        });

    Ok(form)
}
