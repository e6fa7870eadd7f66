// src/ingest/decode.rs
//! Stateless Atom / RSS decoders. Both only pull the key and title of each
//! entry; everything else in the document is ignored.
//!
//! Only unprefixed children of an entry/item are read (or children sharing the
//! entry's own prefix), so `<atom:link>` or `<media:title>` siblings never
//! shadow the plain `<link>` / `<title>`. Text under child markup (xhtml
//! titles) is flattened.

use anyhow::{anyhow, bail, Context, Result};
use quick_xml::events::Event;
use quick_xml::name::QName;
use quick_xml::reader::Reader;

/// Which decoder a source uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedKind {
    Atom,
    Rss,
}

impl FeedKind {
    /// `"rss"` selects RSS, anything else is treated as Atom.
    pub fn from_kind(kind: &str) -> Self {
        if kind.trim().eq_ignore_ascii_case("rss") {
            FeedKind::Rss
        } else {
            FeedKind::Atom
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomEntry {
    pub id: String,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RssItem {
    pub link: String,
    pub title: Option<String>,
}

pub fn decode_atom(bytes: &[u8]) -> Result<Vec<AtomEntry>> {
    let xml = std::str::from_utf8(bytes).context("atom feed is not utf-8")?;
    let records = scan(xml, &["feed"], "entry", ["id", "title"]).context("parsing atom xml")?;

    Ok(records
        .into_iter()
        .filter_map(|[id, title]| {
            Some(AtomEntry {
                id: trimmed(id)?,
                title: collapsed(title),
            })
        })
        .collect())
}

pub fn decode_rss(bytes: &[u8]) -> Result<Vec<RssItem>> {
    let xml = std::str::from_utf8(bytes).context("rss feed is not utf-8")?;
    let records =
        scan(xml, &["rss", "channel"], "item", ["link", "title"]).context("parsing rss xml")?;

    Ok(records
        .into_iter()
        .filter_map(|[link, title]| {
            Some(RssItem {
                link: trimmed(link)?,
                title: collapsed(title),
            })
        })
        .collect())
}

struct Capture {
    field: usize,
    depth: usize,
    text: String,
}

struct Record {
    prefix: Option<Vec<u8>>,
    depth: usize,
    fields: [Option<String>; 2],
    capture: Option<Capture>,
}

fn split_name(name: QName<'_>) -> (Option<Vec<u8>>, Vec<u8>) {
    (
        name.prefix().map(|p| p.as_ref().to_vec()),
        name.local_name().as_ref().to_vec(),
    )
}

/// Walk the document and return `[key, title]` raw text for every `record`
/// element found directly under the `path` (matched by local name).
/// The first non-blank occurrence of a field wins.
fn scan(
    xml: &str,
    path: &[&str],
    record: &str,
    fields: [&str; 2],
) -> Result<Vec<[Option<String>; 2]>> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut current: Option<Record> = None;
    let mut saw_root = false;
    let mut out = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let (prefix, local) = split_name(e.name());
                if !saw_root {
                    if local != path[0].as_bytes() {
                        bail!("unexpected root element <{}>", String::from_utf8_lossy(&local));
                    }
                    saw_root = true;
                }
                stack.push(local);
                let depth = stack.len();

                match current.as_mut() {
                    None => {
                        let parents = &stack[..depth - 1];
                        if stack[depth - 1] == record.as_bytes()
                            && parents.len() == path.len()
                            && parents.iter().zip(path).all(|(a, b)| a == b.as_bytes())
                        {
                            current = Some(Record {
                                prefix,
                                depth,
                                fields: [None, None],
                                capture: None,
                            });
                        }
                    }
                    Some(rec) if rec.capture.is_none() && depth == rec.depth + 1 => {
                        if prefix == rec.prefix {
                            let local = &stack[depth - 1];
                            if let Some(field) =
                                fields.iter().position(|f| f.as_bytes() == local.as_slice())
                            {
                                rec.capture = Some(Capture {
                                    field,
                                    depth,
                                    text: String::new(),
                                });
                            }
                        }
                    }
                    Some(_) => {}
                }
            }
            Event::Empty(e) => {
                if !saw_root {
                    let (_, local) = split_name(e.name());
                    if local != path[0].as_bytes() {
                        bail!("unexpected root element <{}>", String::from_utf8_lossy(&local));
                    }
                    saw_root = true;
                } else if let Some(cap) = current.as_mut().and_then(|r| r.capture.as_mut()) {
                    // words split only by markup, e.g. `a<br/>b`
                    cap.text.push(' ');
                }
            }
            Event::Text(e) => {
                if let Some(cap) = current.as_mut().and_then(|r| r.capture.as_mut()) {
                    match e.unescape() {
                        Ok(t) => cap.text.push_str(&t),
                        Err(_) => cap.text.push_str(&String::from_utf8_lossy(&e)),
                    }
                }
            }
            Event::CData(e) => {
                if let Some(cap) = current.as_mut().and_then(|r| r.capture.as_mut()) {
                    cap.text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::End(_) => {
                let depth = stack.len();
                if let Some(rec) = current.as_mut() {
                    if rec.capture.as_ref().is_some_and(|c| c.depth == depth) {
                        if let Some(cap) = rec.capture.take() {
                            let slot = &mut rec.fields[cap.field];
                            if slot.is_none() && !cap.text.trim().is_empty() {
                                *slot = Some(cap.text);
                            }
                        }
                    } else if rec.depth == depth {
                        if let Some(done) = current.take() {
                            out.push(done.fields);
                        }
                    }
                }
                stack.pop();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        return Err(anyhow!("document has no root element"));
    }
    if !stack.is_empty() {
        bail!("document ends inside <{}>", String::from_utf8_lossy(&stack[stack.len() - 1]));
    }
    Ok(out)
}

fn trimmed(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Titles may span lines or markup; fold all whitespace runs to one space.
fn collapsed(s: Option<String>) -> Option<String> {
    s.map(|v| v.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|v| !v.is_empty())
}
