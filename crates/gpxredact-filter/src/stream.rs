//! Single-pass streaming rewrite of GPX token streams
//!
//! The filter is a finite-state transducer over quick-xml events: track
//! points inside an exclusion region are dropped together with everything
//! up to and including their closing tag, every other token is written
//! back out through an indenting encoder. Inter-element whitespace is
//! owned by the encoder; embedded newlines in surviving character data are
//! stripped so repeated runs produce stable output.

use gpxredact_region::{Point, RegionSet};
use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io::{BufRead, Write};
use thiserror::Error;
use tracing::{debug, warn};

/// Local name of the track-point element in the GPX vocabulary
const TRACK_POINT: &[u8] = b"trkpt";

#[derive(Debug, Error)]
pub enum FilterError {
    /// Track-point elements must not nest
    #[error("trkpt inside trkpt at byte offset {offset}")]
    NestedTrackPoint { offset: u64 },

    /// A track-point tag carries an attribute the parser cannot decode
    #[error("malformed attribute at byte offset {offset}: {source}")]
    Attr {
        offset: u64,
        #[source]
        source: AttrError,
    },

    /// The input stream is not decodable XML
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Underlying read or write failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of one filtering pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterReport {
    /// Number of track points dropped from the output
    pub suppressed_points: u64,
}

/// Per-run cursor state; reset for every pass, never shared across runs
#[derive(Debug, Default)]
struct FilterState {
    suppressing: bool,
    suppressed: u64,
}

/// Filter a GPX document from `input` to `output` in one streaming pass.
///
/// Track points whose coordinates fall inside `regions` are suppressed:
/// the whole element, from its start tag through its matching end tag, is
/// dropped from the output. Every other token is re-serialized with
/// 2-space indentation. Returns the number of suppressed points.
///
/// Coordinate decode problems are warnings; such points are never
/// excludable and pass through unfiltered. A track-point start tag inside
/// an already-suppressed span, or an undecodable token stream, aborts the
/// run.
pub fn process<R: BufRead, W: Write>(
    input: R,
    output: W,
    regions: &RegionSet,
) -> Result<FilterReport, FilterError> {
    let mut reader = Reader::from_reader(input);
    reader.config_mut().trim_text(true);

    let mut writer = Writer::new_with_indent(output, b' ', 2);
    let mut state = FilterState::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if is_track_point(&e) => {
                let offset = reader.buffer_position();
                if state.suppressing {
                    return Err(FilterError::NestedTrackPoint { offset });
                }
                if should_suppress(&e, regions, offset)? {
                    state.suppressing = true;
                    state.suppressed += 1;
                } else {
                    writer.write_event(Event::Start(e))?;
                }
            }
            Event::Empty(e) if is_track_point(&e) => {
                let offset = reader.buffer_position();
                if state.suppressing {
                    return Err(FilterError::NestedTrackPoint { offset });
                }
                if should_suppress(&e, regions, offset)? {
                    // Self-closing: the span is this single token
                    state.suppressed += 1;
                } else {
                    writer.write_event(Event::Empty(e))?;
                }
            }
            Event::End(e) if e.local_name().as_ref() == TRACK_POINT && state.suppressing => {
                // The closing tag of a suppressed point is itself dropped;
                // pass-through resumes with the next token
                state.suppressing = false;
            }
            Event::Text(t) => {
                if !state.suppressing {
                    writer.write_event(Event::Text(strip_newlines(t)))?;
                }
            }
            Event::Eof => break,
            event => {
                if !state.suppressing {
                    writer.write_event(event)?;
                }
            }
        }
        buf.clear();
    }

    writer.into_inner().flush()?;

    Ok(FilterReport {
        suppressed_points: state.suppressed,
    })
}

#[inline]
fn is_track_point(tag: &BytesStart<'_>) -> bool {
    tag.local_name().as_ref() == TRACK_POINT
}

/// Decide whether a track-point tag falls inside an exclusion region
fn should_suppress(
    tag: &BytesStart<'_>,
    regions: &RegionSet,
    offset: u64,
) -> Result<bool, FilterError> {
    match track_point_coords(tag, offset)? {
        Some(point) if regions.contains(point) => {
            debug!(
                "skipping track point at {:.6},{:.6}",
                point.lat, point.lon
            );
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// Decode the `lat`/`lon` attributes of a track-point tag.
///
/// A missing or unparsable coordinate yields `None` after a warning: such
/// points are never excludable, so a malformed coordinate cannot abort the
/// whole run.
fn track_point_coords(
    tag: &BytesStart<'_>,
    offset: u64,
) -> Result<Option<Point>, FilterError> {
    let mut raw_lat = None;
    let mut raw_lon = None;

    for attr in tag.attributes() {
        let attr = attr.map_err(|source| FilterError::Attr { offset, source })?;
        match attr.key.local_name().as_ref() {
            b"lat" => raw_lat = Some(String::from_utf8_lossy(attr.value.as_ref()).into_owned()),
            b"lon" => raw_lon = Some(String::from_utf8_lossy(attr.value.as_ref()).into_owned()),
            _ => {}
        }
    }

    let lat = decode_coordinate(raw_lat, "latitude", offset);
    let lon = decode_coordinate(raw_lon, "longitude", offset);

    Ok(match (lat, lon) {
        (Some(lat), Some(lon)) => Some(Point::new(lat, lon)),
        _ => None,
    })
}

fn decode_coordinate(raw: Option<String>, axis: &str, offset: u64) -> Option<f64> {
    match raw {
        Some(value) => match value.parse::<f64>() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                warn!(offset, value = %value, "cannot decode {} of track point", axis);
                None
            }
        },
        None => {
            warn!(offset, "track point has no {} attribute", axis);
            None
        }
    }
}

/// Drop embedded newlines from character data.
///
/// The indenting encoder owns the output line structure; raw line breaks
/// inside text nodes would otherwise stack up on every pass.
fn strip_newlines(text: BytesText<'_>) -> BytesText<'_> {
    if !text.iter().any(|&byte| byte == b'\n') {
        return text;
    }
    let cleaned: String = String::from_utf8_lossy(&text)
        .chars()
        .filter(|&c| c != '\n')
        .collect();
    BytesText::from_escaped(cleaned)
}
