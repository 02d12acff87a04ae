/// SAML federation metadata parser.
///
/// Streams the metadata XML with quick-xml and keeps only entities that
/// carry an `IDPSSODescriptor` role. For each IdP, the `Organization`
/// element's `OrganizationDisplayName` and `OrganizationURL` children are
/// collected in source order with their `xml:lang` tags, preserving the
/// single-vs-list ambiguity of the source as a uniform sequence.
///
/// Namespace prefixes (`md:`, `mdui:`, …) vary between federations and are
/// ignored; elements are matched on local name only.
use fedlink_core::{IdpRecord, LocalizedText};
use quick_xml::Reader;
use quick_xml::events::Event;

use super::ParseError;

// ---------------------------------------------------------------------------
// parse_federation
// ---------------------------------------------------------------------------

/// Which localized field a text node currently belongs to.
enum Capture {
    DisplayName,
    OrganizationUrl,
}

/// An `EntityDescriptor` being assembled.
struct PendingEntity {
    entity_id: String,
    is_idp: bool,
    display_names: Vec<LocalizedText>,
    organization_urls: Vec<LocalizedText>,
}

/// Parses federation metadata XML into IdP records.
///
/// Entities without an `IDPSSODescriptor` (service providers, attribute
/// authorities) are dropped. Entities without an `Organization` element are
/// kept with empty name/URL sequences; they simply never match on the
/// affected strategies.
///
/// # Errors
///
/// Returns [`ParseError::Xml`] when the document is not well-formed. A
/// missing attribute or element is never an error.
pub fn parse_federation(xml: &str) -> Result<Vec<IdpRecord>, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut idps = Vec::new();
    let mut buf = Vec::new();

    let mut current: Option<PendingEntity> = None;
    let mut capture: Option<Capture> = None;
    let mut lang: Option<String> = None;
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                match e.local_name().as_ref() {
                    b"EntityDescriptor" => {
                        let entity_id = attribute_value(e, b"entityID").unwrap_or_default();
                        current = Some(PendingEntity {
                            entity_id,
                            is_idp: false,
                            display_names: Vec::new(),
                            organization_urls: Vec::new(),
                        });
                    }
                    b"IDPSSODescriptor" => {
                        if let Some(entity) = current.as_mut() {
                            entity.is_idp = true;
                        }
                    }
                    b"OrganizationDisplayName" if current.is_some() => {
                        capture = Some(Capture::DisplayName);
                        lang = attribute_value(e, b"xml:lang");
                        text.clear();
                    }
                    b"OrganizationURL" if current.is_some() => {
                        capture = Some(Capture::OrganizationUrl);
                        lang = attribute_value(e, b"xml:lang");
                        text.clear();
                    }
                    _ => {}
                }
            }
            Ok(Event::Text(ref e)) => {
                if capture.is_some() {
                    let value = e.unescape().map_err(|err| ParseError::Xml {
                        position: reader.buffer_position(),
                        detail: err.to_string(),
                    })?;
                    text.push_str(&value);
                }
            }
            Ok(Event::CData(ref e)) => {
                if capture.is_some() {
                    text.push_str(&String::from_utf8_lossy(e));
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"OrganizationDisplayName" | b"OrganizationURL" => {
                    if let (Some(field), Some(entity)) = (capture.take(), current.as_mut()) {
                        let entry = LocalizedText {
                            value: std::mem::take(&mut text),
                            lang: lang.take(),
                        };
                        match field {
                            Capture::DisplayName => entity.display_names.push(entry),
                            Capture::OrganizationUrl => entity.organization_urls.push(entry),
                        }
                    }
                }
                b"EntityDescriptor" => {
                    if let Some(entity) = current.take() {
                        if entity.is_idp && !entity.entity_id.is_empty() {
                            idps.push(IdpRecord {
                                entity_id: entity.entity_id,
                                display_names: entity.display_names,
                                organization_urls: entity.organization_urls,
                            });
                        }
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ParseError::Xml {
                    position: reader.buffer_position(),
                    detail: e.to_string(),
                });
            }
            Ok(_) => {}
        }
        buf.clear();
    }

    Ok(idps)
}

/// Returns the unescaped value of the attribute with exactly this key, if
/// present. Attribute-level errors are skipped like the surrounding events.
fn attribute_value(e: &quick_xml::events::BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .and_then(|attr| attr.unescape_value().ok())
        .map(std::borrow::Cow::into_owned)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
