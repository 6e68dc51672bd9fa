//! ASC CDL file format parser and writer.
//!
//! Supports three ASC CDL file formats plus the bare record used by
//! CDL transforms:
//! - `.cc` - Single ColorCorrection
//! - `.ccc` - ColorCorrectionCollection (multiple CCs)
//! - `.cdl` - ColorDecisionList (CCs wrapped in ColorDecisions)
//! - compact record - one `<ColorCorrection>` with no whitespace between
//!   tags, see [`to_xml_record`]
//!
//! # Example
//!
//! ```rust,no_run
//! use vfx_lut::cdl::{read_cc, read_ccc};
//! use std::path::Path;
//!
//! // Read a single CC
//! let cc = read_cc(Path::new("grade.cc")).unwrap();
//! println!("Slope: {:?}", cc.slope);
//!
//! // Read a CCC collection
//! let ccc = read_ccc(Path::new("grades.ccc")).unwrap();
//! for cc in &ccc.corrections {
//!     println!("ID: {:?}", cc.id);
//! }
//! ```
//!
//! # References
//!
//! - ASC CDL v1.01 Specification
//! - OpenColorIO CDLParser

use crate::{LutError, LutResult};
use quick_xml::Reader;
use quick_xml::escape::{escape, resolve_predefined_entity, unescape};
use quick_xml::events::{BytesStart, Event};
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Write};
use std::path::Path;
use tracing::{trace, warn};

// ============================================================================
// Data structures
// ============================================================================

/// A single ASC Color Correction (CC).
#[derive(Debug, Clone, PartialEq)]
pub struct ColorCorrection {
    /// Unique identifier for this correction.
    pub id: Option<String>,
    /// Description text directly under `<ColorCorrection>` (can have multiple).
    pub descriptions: Vec<String>,
    /// Description text inside `<SOPNode>`.
    pub sop_description: Option<String>,
    /// Input description.
    pub input_description: Option<String>,
    /// Viewing description.
    pub viewing_description: Option<String>,
    /// Slope (multiply) per channel [R, G, B].
    pub slope: [f64; 3],
    /// Offset (add) per channel [R, G, B].
    pub offset: [f64; 3],
    /// Power (gamma) per channel [R, G, B].
    pub power: [f64; 3],
    /// Saturation adjustment (1.0 = no change).
    pub saturation: f64,
}

impl Default for ColorCorrection {
    fn default() -> Self {
        Self {
            id: None,
            descriptions: Vec::new(),
            sop_description: None,
            input_description: None,
            viewing_description: None,
            slope: [1.0, 1.0, 1.0],
            offset: [0.0, 0.0, 0.0],
            power: [1.0, 1.0, 1.0],
            saturation: 1.0,
        }
    }
}

impl ColorCorrection {
    /// Creates a new ColorCorrection with given SOP values.
    pub fn new(slope: [f64; 3], offset: [f64; 3], power: [f64; 3]) -> Self {
        Self { slope, offset, power, ..Default::default() }
    }

    /// Creates a new ColorCorrection with id and SOP values.
    pub fn with_id(id: &str, slope: [f64; 3], offset: [f64; 3], power: [f64; 3]) -> Self {
        Self { id: Some(id.to_string()), slope, offset, power, ..Default::default() }
    }

    /// The description a CDL transform carries: the SOPNode one, falling
    /// back to the first ColorCorrection-level description.
    pub fn description(&self) -> Option<&str> {
        self.sop_description
            .as_deref()
            .or_else(|| self.descriptions.first().map(String::as_str))
    }
}

/// A ColorDecision containing a ColorCorrection and optional media reference.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColorDecision {
    /// Description text.
    pub descriptions: Vec<String>,
    /// Input description.
    pub input_description: Option<String>,
    /// Viewing description.
    pub viewing_description: Option<String>,
    /// Media reference path.
    pub media_ref: Option<String>,
    /// The color correction.
    pub correction: ColorCorrection,
}

/// A ColorCorrectionCollection (CCC file).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColorCorrectionCollection {
    /// Description text.
    pub descriptions: Vec<String>,
    /// Input description.
    pub input_description: Option<String>,
    /// Viewing description.
    pub viewing_description: Option<String>,
    /// List of color corrections.
    pub corrections: Vec<ColorCorrection>,
}

impl ColorCorrectionCollection {
    /// Finds a ColorCorrection by id.
    pub fn find(&self, id: &str) -> Option<&ColorCorrection> {
        self.corrections.iter().find(|cc| cc.id.as_deref() == Some(id))
    }

    /// Gets the first ColorCorrection (if any).
    pub fn first(&self) -> Option<&ColorCorrection> {
        self.corrections.first()
    }

    /// Selects a correction: the first one for an empty id, otherwise by id.
    pub fn select(&self, id: &str) -> LutResult<&ColorCorrection> {
        let found = if id.is_empty() { self.first() } else { self.find(id) };
        found.ok_or_else(|| {
            if id.is_empty() {
                LutError::NotFound("file contains no ColorCorrection".into())
            } else {
                LutError::NotFound(format!("ColorCorrection id '{id}'"))
            }
        })
    }
}

/// A ColorDecisionList (CDL file).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColorDecisionList {
    /// Description text.
    pub descriptions: Vec<String>,
    /// Input description.
    pub input_description: Option<String>,
    /// Viewing description.
    pub viewing_description: Option<String>,
    /// List of color decisions.
    pub decisions: Vec<ColorDecision>,
}

impl ColorDecisionList {
    /// Finds a ColorCorrection by id.
    pub fn find(&self, id: &str) -> Option<&ColorCorrection> {
        self.decisions.iter()
            .find(|cd| cd.correction.id.as_deref() == Some(id))
            .map(|cd| &cd.correction)
    }

    /// Converts to a ColorCorrectionCollection.
    pub fn to_collection(&self) -> ColorCorrectionCollection {
        ColorCorrectionCollection {
            descriptions: self.descriptions.clone(),
            input_description: self.input_description.clone(),
            viewing_description: self.viewing_description.clone(),
            corrections: self.decisions.iter().map(|cd| cd.correction.clone()).collect(),
        }
    }
}

// ============================================================================
// Parsing helpers
// ============================================================================

fn parse_rgb(s: &str, element: &str) -> LutResult<[f64; 3]> {
    let parts: Vec<&str> = s.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(LutError::ParseError(format!(
            "<{element}> expects 3 values, got {}", parts.len()
        )));
    }
    let mut out = [0.0; 3];
    for (v, p) in out.iter_mut().zip(&parts) {
        *v = p.parse()
            .map_err(|e| LutError::ParseError(format!("invalid <{element}> value '{p}': {e}")))?;
    }
    Ok(out)
}

fn parse_scalar(s: &str, element: &str) -> LutResult<f64> {
    s.trim().parse()
        .map_err(|e| LutError::ParseError(format!("invalid <{element}> value '{}': {e}", s.trim())))
}

fn get_attr(e: &BytesStart, key: &[u8]) -> LutResult<Option<String>> {
    let Some(attr) = e.attributes().flatten().find(|a| a.key.as_ref() == key) else {
        return Ok(None);
    };
    let raw = String::from_utf8_lossy(&attr.value);
    let value = unescape(&raw)
        .map_err(|e| LutError::ParseError(format!("bad attribute value '{raw}': {e}")))?;
    Ok(Some(value.into_owned()).filter(|s| !s.is_empty()))
}

/// Everything found in one CDL-family document.
#[derive(Debug, Default)]
struct Document {
    descriptions: Vec<String>,
    input_description: Option<String>,
    viewing_description: Option<String>,
    /// Every ColorCorrection in document order, nested or not.
    corrections: Vec<ColorCorrection>,
    decisions: Vec<ColorDecision>,
}

/// Single pass over any `.cc`/`.ccc`/`.cdl` document.
///
/// Element context is tracked with a name stack so descriptions land on the
/// node that owns them.
fn parse_document<R: BufRead>(reader: R) -> LutResult<Document> {
    let mut xml = Reader::from_reader(reader);

    let mut buf = Vec::new();
    let mut doc = Document::default();
    let mut decision: Option<ColorDecision> = None;
    let mut cc: Option<ColorCorrection> = None;
    let mut text = String::new();
    let mut stack: Vec<String> = Vec::new();

    loop {
        match xml.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                match name.as_str() {
                    "ColorDecision" => decision = Some(ColorDecision::default()),
                    "ColorCorrection" => {
                        cc = Some(ColorCorrection { id: get_attr(&e, b"id")?, ..Default::default() });
                    }
                    _ => {}
                }
                stack.push(name);
                text.clear();
            }
            Ok(Event::Empty(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                match (name.as_str(), decision.as_mut()) {
                    ("MediaRef", Some(d)) => d.media_ref = get_attr(&e, b"ref")?,
                    ("ColorCorrection", _) => {
                        doc.corrections.push(ColorCorrection {
                            id: get_attr(&e, b"id")?,
                            ..Default::default()
                        });
                    }
                    _ => trace!(element = %name, "skipping empty element"),
                }
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                let parent = stack.len().checked_sub(2).map(|i| stack[i].as_str());

                match name.as_str() {
                    "Slope" | "Offset" | "Power" | "Saturation" => match cc.as_mut() {
                        Some(cc) => match name.as_str() {
                            "Slope" => cc.slope = parse_rgb(&text, "Slope")?,
                            "Offset" => cc.offset = parse_rgb(&text, "Offset")?,
                            "Power" => cc.power = parse_rgb(&text, "Power")?,
                            _ => cc.saturation = parse_scalar(&text, "Saturation")?,
                        },
                        None => warn!(element = %name, "value outside a ColorCorrection ignored"),
                    },
                    "Description" | "InputDescription" | "ViewingDescription" => {
                        // Description text is kept verbatim, surrounding whitespace included.
                        let value = text.clone();
                        attach_description(&name, parent, value, &mut doc, decision.as_mut(), cc.as_mut());
                    }
                    "ColorCorrection" => {
                        if let Some(done) = cc.take() {
                            if let Some(d) = decision.as_mut() {
                                d.correction = done.clone();
                            }
                            doc.corrections.push(done);
                        }
                    }
                    "ColorDecision" => {
                        if let Some(d) = decision.take() {
                            doc.decisions.push(d);
                        }
                    }
                    _ => {}
                }
                stack.pop();
                text.clear();
            }
            Ok(Event::Text(e)) => {
                let chunk = e.decode()
                    .map_err(|err| LutError::ParseError(format!("text decoding: {err}")))?;
                text.push_str(&chunk);
            }
            Ok(Event::CData(e)) => {
                let chunk = e.decode()
                    .map_err(|err| LutError::ParseError(format!("CDATA decoding: {err}")))?;
                text.push_str(&chunk);
            }
            Ok(Event::GeneralRef(e)) => {
                let entity = e.decode()
                    .map_err(|err| LutError::ParseError(format!("entity decoding: {err}")))?;
                if let Some(ch) = e.resolve_char_ref()
                    .map_err(|err| LutError::ParseError(format!("bad character reference: {err}")))?
                {
                    text.push(ch);
                } else if let Some(resolved) = resolve_predefined_entity(&entity) {
                    text.push_str(resolved);
                } else {
                    return Err(LutError::ParseError(format!("unknown entity '&{entity};'")));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(LutError::ParseError(format!("XML error: {e}"))),
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(LutError::ParseError(format!("unexpected end of document inside <{open}>")));
    }

    Ok(doc)
}

fn attach_description(
    name: &str,
    parent: Option<&str>,
    value: String,
    doc: &mut Document,
    decision: Option<&mut ColorDecision>,
    cc: Option<&mut ColorCorrection>,
) {
    match (name, parent) {
        ("Description", Some("SOPNode")) => {
            if let Some(cc) = cc {
                cc.sop_description = Some(value);
            }
        }
        // Descriptions on the saturation node carry no state of their own.
        (_, Some("SatNode" | "SATNode")) => {}
        (_, Some("ColorCorrection")) => {
            if let Some(cc) = cc {
                match name {
                    "Description" => cc.descriptions.push(value),
                    "InputDescription" => cc.input_description = Some(value),
                    _ => cc.viewing_description = Some(value),
                }
            }
        }
        (_, Some("ColorDecision")) => {
            if let Some(d) = decision {
                match name {
                    "Description" => d.descriptions.push(value),
                    "InputDescription" => d.input_description = Some(value),
                    _ => d.viewing_description = Some(value),
                }
            }
        }
        (_, Some("ColorCorrectionCollection" | "ColorDecisionList")) => match name {
            "Description" => doc.descriptions.push(value),
            "InputDescription" => doc.input_description = Some(value),
            _ => doc.viewing_description = Some(value),
        },
        _ => trace!(element = name, ?parent, "description ignored"),
    }
}

// ============================================================================
// CC Parser
// ============================================================================

/// Reads a CC file (single ColorCorrection).
pub fn read_cc(path: &Path) -> LutResult<ColorCorrection> {
    let file = File::open(path)?;
    parse_cc(BufReader::new(file))
}

/// Parses a CC from a reader. The first ColorCorrection wins.
pub fn parse_cc<R: BufRead>(reader: R) -> LutResult<ColorCorrection> {
    parse_document(reader)?
        .corrections
        .into_iter()
        .next()
        .ok_or_else(|| LutError::ParseError("no <ColorCorrection> element found".into()))
}

/// Parses a single ColorCorrection record from a string.
pub fn parse_record(xml: &str) -> LutResult<ColorCorrection> {
    parse_cc(Cursor::new(xml.as_bytes()))
}

// ============================================================================
// CCC Parser
// ============================================================================

/// Reads a CCC file (ColorCorrectionCollection).
pub fn read_ccc(path: &Path) -> LutResult<ColorCorrectionCollection> {
    let file = File::open(path)?;
    parse_ccc(BufReader::new(file))
}

/// Parses a CCC from a reader.
pub fn parse_ccc<R: BufRead>(reader: R) -> LutResult<ColorCorrectionCollection> {
    let doc = parse_document(reader)?;
    Ok(ColorCorrectionCollection {
        descriptions: doc.descriptions,
        input_description: doc.input_description,
        viewing_description: doc.viewing_description,
        corrections: doc.corrections,
    })
}

// ============================================================================
// CDL Parser
// ============================================================================

/// Reads a CDL file (ColorDecisionList).
pub fn read_cdl(path: &Path) -> LutResult<ColorDecisionList> {
    let file = File::open(path)?;
    parse_cdl(BufReader::new(file))
}

/// Parses a CDL from a reader.
pub fn parse_cdl<R: BufRead>(reader: R) -> LutResult<ColorDecisionList> {
    let doc = parse_document(reader)?;
    Ok(ColorDecisionList {
        descriptions: doc.descriptions,
        input_description: doc.input_description,
        viewing_description: doc.viewing_description,
        decisions: doc.decisions,
    })
}

/// Auto-detect format and read any CDL file (.cc, .ccc, .cdl).
pub fn read_any(path: &Path) -> LutResult<ColorCorrectionCollection> {
    let ext = path.extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "cc" => {
            let cc = read_cc(path)?;
            Ok(ColorCorrectionCollection { corrections: vec![cc], ..Default::default() })
        }
        "ccc" => read_ccc(path),
        "cdl" => Ok(read_cdl(path)?.to_collection()),
        _ => Err(LutError::ParseError(format!("Unknown CDL extension: {}", ext))),
    }
}

/// True for extensions [`read_any`] understands.
pub fn is_cdl_extension(ext: &str) -> bool {
    matches!(ext.trim_start_matches('.').to_ascii_lowercase().as_str(), "cc" | "ccc" | "cdl")
}

// ============================================================================
// Writing
// ============================================================================

/// Serializes one correction as a compact record.
///
/// Tag order is fixed and no whitespace is emitted between tags, so the
/// output of a parsed record is byte-identical on every re-serialization:
///
/// ```text
/// <ColorCorrection id="ID"><SOPNode><Description>..</Description><Slope>..</Slope>
/// <Offset>..</Offset><Power>..</Power></SOPNode><SatNode><Saturation>..</Saturation>
/// </SatNode></ColorCorrection>
/// ```
///
/// `<Description>` is omitted when there is none.
pub fn to_xml_record(cc: &ColorCorrection) -> String {
    let id = cc.id.as_deref().unwrap_or("");
    let mut out = format!(r#"<ColorCorrection id="{}"><SOPNode>"#, escape(id));
    if let Some(desc) = cc.description().filter(|d| !d.is_empty()) {
        out.push_str(&format!("<Description>{}</Description>", escape(desc)));
    }
    out.push_str(&format!(
        "<Slope>{}</Slope><Offset>{}</Offset><Power>{}</Power></SOPNode>",
        triplet(&cc.slope),
        triplet(&cc.offset),
        triplet(&cc.power),
    ));
    out.push_str(&format!(
        "<SatNode><Saturation>{}</Saturation></SatNode></ColorCorrection>",
        cc.saturation
    ));
    out
}

fn triplet(v: &[f64; 3]) -> String {
    format!("{} {} {}", v[0], v[1], v[2])
}

/// Writes a ColorCorrection to a CC file.
pub fn write_cc(path: &Path, cc: &ColorCorrection) -> LutResult<()> {
    let mut file = File::create(path)?;
    write_cc_to(&mut file, cc)
}

/// Writes a ColorCorrection to a writer.
pub fn write_cc_to<W: Write>(w: &mut W, cc: &ColorCorrection) -> LutResult<()> {
    write_correction(w, cc, "")
}

fn write_correction<W: Write>(w: &mut W, cc: &ColorCorrection, indent: &str) -> LutResult<()> {
    let id = cc.id.as_deref().unwrap_or("");
    writeln!(w, r#"{indent}<ColorCorrection id="{}">"#, escape(id))?;
    for desc in &cc.descriptions {
        writeln!(w, "{indent}  <Description>{}</Description>", escape(desc.as_str()))?;
    }
    writeln!(w, "{indent}  <SOPNode>")?;
    if let Some(desc) = &cc.sop_description {
        writeln!(w, "{indent}    <Description>{}</Description>", escape(desc.as_str()))?;
    }
    writeln!(w, "{indent}    <Slope>{}</Slope>", triplet(&cc.slope))?;
    writeln!(w, "{indent}    <Offset>{}</Offset>", triplet(&cc.offset))?;
    writeln!(w, "{indent}    <Power>{}</Power>", triplet(&cc.power))?;
    writeln!(w, "{indent}  </SOPNode>")?;
    writeln!(w, "{indent}  <SatNode>")?;
    writeln!(w, "{indent}    <Saturation>{}</Saturation>", cc.saturation)?;
    writeln!(w, "{indent}  </SatNode>")?;
    writeln!(w, "{indent}</ColorCorrection>")?;
    Ok(())
}

/// Writes a ColorCorrectionCollection to a CCC file.
pub fn write_ccc(path: &Path, ccc: &ColorCorrectionCollection) -> LutResult<()> {
    let mut file = File::create(path)?;
    write_ccc_to(&mut file, ccc)
}

/// Writes a ColorCorrectionCollection to a writer.
pub fn write_ccc_to<W: Write>(w: &mut W, ccc: &ColorCorrectionCollection) -> LutResult<()> {
    writeln!(w, r#"<ColorCorrectionCollection xmlns="urn:ASC:CDL:v1.01">"#)?;
    for desc in &ccc.descriptions {
        writeln!(w, "  <Description>{}</Description>", escape(desc.as_str()))?;
    }
    for cc in &ccc.corrections {
        writeln!(w)?;
        write_correction(w, cc, "  ")?;
    }
    writeln!(w)?;
    writeln!(w, "</ColorCorrectionCollection>")?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
