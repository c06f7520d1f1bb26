//! PDF fixtures built with lopdf for unit tests.

use lopdf::dictionary;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Single-page PDF, one text line per entry.
pub(crate) fn text_pdf(lines: &[&str]) -> Vec<u8> {
    pdf_with_pages(&[lines])
}

/// Multi-page PDF; each inner slice is one page of text lines.
pub(crate) fn pdf_with_pages(pages: &[&[&str]]) -> Vec<u8> {
    build_pdf(pages, |_, _| {})
}

/// A page with no text operators at all (what a scan looks like to the
/// text layer).
pub(crate) fn image_only_pdf() -> Vec<u8> {
    pdf_with_pages(&[&[]])
}

pub(crate) fn pdf_with_javascript() -> Vec<u8> {
    build_pdf(&[&["Lorem ipsum"]], |_, catalog| {
        catalog.set(
            "OpenAction",
            dictionary! {
                "S" => "JavaScript",
                "JS" => Object::string_literal("app.alert('hello');"),
            },
        );
    })
}

pub(crate) fn pdf_with_launch_action() -> Vec<u8> {
    build_pdf(&[&["Lorem ipsum"]], |_, catalog| {
        catalog.set(
            "OpenAction",
            dictionary! {
                "S" => "Launch",
                "F" => Object::string_literal("calc.exe"),
            },
        );
    })
}

pub(crate) fn pdf_with_embedded_file() -> Vec<u8> {
    build_pdf(&[&["Lorem ipsum"]], |doc, catalog| {
        let payload = Stream::new(
            dictionary! { "Type" => "EmbeddedFile" },
            b"MZ payload".to_vec(),
        );
        let payload_id = doc.add_object(payload);
        let filespec_id = doc.add_object(dictionary! {
            "Type" => "Filespec",
            "F" => Object::string_literal("payload.exe"),
            "EF" => dictionary! { "F" => payload_id },
        });
        catalog.set(
            "Names",
            dictionary! {
                "EmbeddedFiles" => dictionary! {
                    "Names" => vec![Object::string_literal("payload.exe"), filespec_id.into()],
                },
            },
        );
    })
}

fn build_pdf(pages: &[&[&str]], decorate: impl FnOnce(&mut Document, &mut Dictionary)) -> Vec<u8> {
    let mut doc = Document::with_version("1.4");

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let page_ids: Vec<ObjectId> = pages
        .iter()
        .map(|lines| {
            let content_id = doc.add_object(Stream::new(dictionary! {}, content_stream(lines)));
            doc.add_object(dictionary! {
                "Type" => "Page",
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Contents" => content_id,
                "Resources" => dictionary! {
                    "Font" => dictionary! { "F1" => font_id },
                },
            })
        })
        .collect();

    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => page_ids.iter().map(|id| Object::from(*id)).collect::<Vec<_>>(),
        "Count" => page_ids.len() as i64,
    });

    for page_id in &page_ids {
        if let Ok(Object::Dictionary(dict)) = doc.get_object_mut(*page_id) {
            dict.set("Parent", pages_id);
        }
    }

    let mut catalog = dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    };
    decorate(&mut doc, &mut catalog);
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

fn content_stream(lines: &[&str]) -> Vec<u8> {
    if lines.is_empty() {
        return Vec::new();
    }
    let mut ops = String::from("BT /F1 12 Tf 72 720 Td");
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            ops.push_str(" 0 -16 Td");
        }
        let escaped = line
            .replace('\\', "\\\\")
            .replace('(', "\\(")
            .replace(')', "\\)");
        ops.push_str(&format!(" ({escaped}) Tj"));
    }
    ops.push_str(" ET");
    ops.into_bytes()
}
