//! Post-render normalisation built on top of `lopdf`.
//!
//! `printpdf` stamps every document with a random ID and the wall-clock time.
//! This pass rewrites those fields from the report itself so identical input
//! yields identical bytes. It also drops embedded fonts that no page selects.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId, StringFormat};
use sha2::{Digest, Sha256};

/// Value written to the `/Producer` entry of the information dictionary.
pub const PRODUCER: &str = concat!("dg_report ", env!("CARGO_PKG_VERSION"));

const ID_LENGTH: usize = 16;

/// Converts a `DD.MM.YYYY` report date into a PDF date string at midnight UTC.
pub fn pdf_date(report_date: &str) -> Option<String> {
    NaiveDate::parse_from_str(report_date.trim(), "%d.%m.%Y")
        .ok()
        .map(|date| date.format("D:%Y%m%d000000Z").to_string())
}

/// Rewrites the time stamps, producer and file identifier of `pdf_bytes`.
///
/// The creation and modification dates are set from `report_date`, or removed
/// when it does not parse. XMP metadata and unused fonts are dropped. The
/// trailer `/ID` is derived from a SHA-256 digest of the document saved
/// without one.
pub fn normalize(pdf_bytes: &[u8], report_date: &str) -> Result<Vec<u8>, lopdf::Error> {
    let mut document = Document::load_mem(pdf_bytes)?;

    rewrite_info_dictionary(&mut document, report_date)?;
    let stripped_metadata = strip_xmp_metadata(&mut document)?;
    let dropped_fonts = drop_unused_fonts(&mut document)?;
    if stripped_metadata || dropped_fonts {
        document.prune_objects();
        document.renumber_objects();
    }

    document.trailer.remove(b"ID");
    let mut unidentified = Vec::new();
    document.save_to(&mut unidentified)?;

    let digest = Sha256::digest(&unidentified);
    let id = digest[..ID_LENGTH].to_vec();
    document.trailer.set(
        "ID",
        Object::Array(vec![
            Object::String(id.clone(), StringFormat::Hexadecimal),
            Object::String(id, StringFormat::Hexadecimal),
        ]),
    );

    let mut buffer = Vec::new();
    document.save_to(&mut buffer)?;
    Ok(buffer)
}

fn trailer_reference(document: &Document, key: &[u8]) -> Option<ObjectId> {
    document
        .trailer
        .get(key)
        .and_then(Object::as_reference)
        .ok()
}

fn rewrite_info_dictionary(document: &mut Document, report_date: &str) -> Result<(), lopdf::Error> {
    let Some(info_id) = trailer_reference(document, b"Info") else {
        return Ok(());
    };
    let info = document.get_object_mut(info_id)?.as_dict_mut()?;

    match pdf_date(report_date) {
        Some(date) => {
            info.set("CreationDate", Object::string_literal(date.as_str()));
            info.set("ModDate", Object::string_literal(date.as_str()));
        }
        None => {
            info.remove(b"CreationDate");
            info.remove(b"ModDate");
        }
    }
    info.set("Producer", Object::string_literal(PRODUCER));
    Ok(())
}

fn strip_xmp_metadata(document: &mut Document) -> Result<bool, lopdf::Error> {
    let Some(catalog_id) = trailer_reference(document, b"Root") else {
        return Ok(false);
    };
    let catalog = document.get_object_mut(catalog_id)?.as_dict_mut()?;
    Ok(catalog.remove(b"Metadata").is_some())
}

/// Returns the object holding the `/Font` resources of `page_id`.
pub(crate) fn font_dictionary_id(document: &Document, page_id: ObjectId) -> Option<ObjectId> {
    let page = document.get_dictionary(page_id).ok()?;
    let resources: &Dictionary = match page.get(b"Resources").ok()? {
        Object::Reference(id) => document.get_dictionary(*id).ok()?,
        Object::Dictionary(dictionary) => dictionary,
        _ => return None,
    };
    resources.get(b"Font").and_then(Object::as_reference).ok()
}

fn selected_fonts(document: &Document, page_id: ObjectId) -> Result<Vec<Vec<u8>>, lopdf::Error> {
    let content = Content::decode(&document.get_page_content(page_id)?)?;
    Ok(content
        .operations
        .iter()
        .filter(|operation| operation.operator == "Tf")
        .filter_map(|operation| operation.operands.first())
        .filter_map(|operand| operand.as_name().ok())
        .map(<[u8]>::to_vec)
        .collect())
}

fn drop_unused_fonts(document: &mut Document) -> Result<bool, lopdf::Error> {
    let mut used = BTreeSet::new();
    let mut dictionaries = BTreeSet::new();
    for page_id in document.get_pages().into_values() {
        used.extend(selected_fonts(document, page_id)?);
        dictionaries.extend(font_dictionary_id(document, page_id));
    }

    let mut dropped = false;
    for dictionary_id in dictionaries {
        let fonts = document.get_object_mut(dictionary_id)?.as_dict_mut()?;
        let unused: Vec<Vec<u8>> = fonts
            .iter()
            .map(|(name, _)| name.clone())
            .filter(|name| !used.contains(name))
            .collect();
        for name in unused {
            fonts.remove(&name);
            dropped = true;
        }
    }
    Ok(dropped)
}
