//! PDF serialization of composed pages with `lopdf`.
//!
//! Every page shares one resource dictionary holding the standard Type1 Times-Roman
//! font (no font program is embedded; viewers supply the metrics). Each `TextRun`
//! becomes an absolute `Tm` + `Tj` pair inside a single text object per page.

use chrono::Utc;
use lopdf::content::{Content, Operation};
use lopdf::{text_string, Dictionary, Document as PdfDocument, Object, StringFormat, Stream};
use thiserror::Error;
use tracing::debug;

use crate::ebook::encoding::encode_win_ansi;
use crate::ebook::layout::{compose_pages, Document, LayoutConfig, Page};

const PDF_VERSION: &str = "1.7";
const FONT_RESOURCE: &str = "F1";
const BASE_FONT: &[u8] = b"Times-Roman";
const PRODUCER: &str = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("WinAnsi cannot encode {ch:?} in {text:?}")]
    Unencodable { ch: char, text: String },

    #[error("PDF serialization failed: {0}")]
    Serialize(String),
}

/// Lays out `document` and serializes the pages to PDF bytes.
pub fn compose(document: &Document, layout: &LayoutConfig) -> Result<Vec<u8>, RenderError> {
    let pages = compose_pages(document, layout);
    let bytes = render_pdf(document, &pages)?;
    debug!(
        pages = pages.len(),
        chapters = document.chapters.len(),
        bytes = bytes.len(),
        "Ebook composed"
    );
    Ok(bytes)
}

/// Serializes an ordered page list, with `document` supplying the info dictionary.
pub fn render_pdf(document: &Document, pages: &[Page]) -> Result<Vec<u8>, RenderError> {
    let mut pdf = PdfDocument::with_version(PDF_VERSION);
    let pages_id = pdf.new_object_id();

    let font_id = pdf.add_object(Dictionary::from_iter([
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(BASE_FONT.to_vec())),
        ("Encoding", Object::Name(b"WinAnsiEncoding".to_vec())),
    ]));

    let resources_id = pdf.add_object(Dictionary::from_iter([(
        "Font",
        Object::Dictionary(Dictionary::from_iter([(
            FONT_RESOURCE,
            Object::Reference(font_id),
        )])),
    )]));

    let mut kids = Vec::with_capacity(pages.len());
    for page in pages {
        let content = page_content(page)?
            .encode()
            .map_err(|e| RenderError::Serialize(format!("content stream: {e}")))?;
        let content_id = pdf.add_object(Stream::new(Dictionary::new(), content));

        let page_id = pdf.add_object(Dictionary::from_iter([
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            ("Contents", Object::Reference(content_id)),
            ("Resources", Object::Reference(resources_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    0.into(),
                    0.into(),
                    real(page.width),
                    real(page.height),
                ]),
            ),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let page_tree = Dictionary::from_iter([
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(kids.len() as i64)),
        ("Kids", Object::Array(kids)),
    ]);
    pdf.objects.insert(pages_id, Object::Dictionary(page_tree));

    let catalog_id = pdf.add_object(Dictionary::from_iter([
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));

    let now = Object::string_literal(Utc::now().format("D:%Y%m%d%H%M%SZ").to_string());
    let info_id = pdf.add_object(Dictionary::from_iter([
        ("Title", text_string(&document.title)),
        ("Author", text_string(&document.author)),
        ("Producer", text_string(PRODUCER)),
        ("Creator", text_string(PRODUCER)),
        ("CreationDate", now.clone()),
        ("ModDate", now),
    ]));

    pdf.trailer.set("Root", Object::Reference(catalog_id));
    pdf.trailer.set("Info", Object::Reference(info_id));

    let mut output = Vec::new();
    pdf.save_to(&mut output)
        .map_err(|e| RenderError::Serialize(e.to_string()))?;
    Ok(output)
}

/// Builds the content stream for one page: black fill, font selection, one `Tj` per run.
fn page_content(page: &Page) -> Result<Content, RenderError> {
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("rg", vec![0.into(), 0.into(), 0.into()]),
    ];

    let mut current_size = None;
    for run in &page.runs {
        if current_size != Some(run.font_size) {
            operations.push(Operation::new(
                "Tf",
                vec![
                    Object::Name(FONT_RESOURCE.as_bytes().to_vec()),
                    real(run.font_size),
                ],
            ));
            current_size = Some(run.font_size);
        }
        operations.push(Operation::new(
            "Tm",
            vec![
                1.into(),
                0.into(),
                0.into(),
                1.into(),
                real(run.x),
                real(run.y),
            ],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(
                encode_win_ansi(&run.text)?,
                StringFormat::Literal,
            )],
        ));
    }

    operations.push(Operation::new("ET", vec![]));
    Ok(Content { operations })
}

fn real(value: f64) -> Object {
    Object::Real(value as f32)
}
