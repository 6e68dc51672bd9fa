//! Registry of file formats a file transform can reference.
//!
//! The table is fixed at compile time and indexed the same way OCIO v1
//! enumerates its reader plugins: one entry per (name, extension) pair, in
//! registration order. Some readers register several names for one
//! extension (`flame`/`lustre` for `.3dl`).
//!
//! ```
//! use vfx_lut::formats;
//!
//! assert_eq!(formats::num_formats(), 17);
//! assert_eq!(formats::format_name_by_index(0).unwrap(), "flame");
//! assert_eq!(formats::format_extension_by_index(0).unwrap(), "3dl");
//! assert!(formats::format_name_by_index(17).is_err());
//! ```

use crate::{LutError, LutResult};

/// A registered file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFormat {
    /// Human-readable format name.
    pub name: &'static str,
    /// Lowercase file extension without the dot.
    pub extension: &'static str,
}

const fn entry(name: &'static str, extension: &'static str) -> FileFormat {
    FileFormat { name, extension }
}

/// All registered formats, in index order.
pub static FORMATS: &[FileFormat] = &[
    entry("flame", "3dl"),
    entry("lustre", "3dl"),
    entry("ColorCorrectionCollection", "ccc"),
    entry("ColorCorrection", "cc"),
    entry("cinespace", "csp"),
    entry("discreet 1d lut", "lut"),
    entry("houdini", "lut"),
    entry("iridas_itx", "itx"),
    entry("iridas_cube", "cube"),
    entry("iridas_look", "look"),
    entry("pandora_mga", "mga"),
    entry("pandora_m3d", "m3d"),
    entry("spi1d", "spi1d"),
    entry("spi3d", "spi3d"),
    entry("spimtx", "spimtx"),
    entry("truelight", "cub"),
    entry("nukevf", "vf"),
];

/// Number of registered formats.
#[inline]
pub fn num_formats() -> usize {
    FORMATS.len()
}

/// Format at `index`.
pub fn format(index: usize) -> LutResult<&'static FileFormat> {
    FORMATS.get(index).ok_or(LutError::OutOfRange { index, len: FORMATS.len() })
}

/// Name of the format at `index`.
pub fn format_name_by_index(index: usize) -> LutResult<&'static str> {
    format(index).map(|f| f.name)
}

/// Extension of the format at `index`.
pub fn format_extension_by_index(index: usize) -> LutResult<&'static str> {
    format(index).map(|f| f.extension)
}

/// Formats registered for an extension (case-insensitive, leading dot allowed).
pub fn formats_for_extension(ext: &str) -> impl Iterator<Item = &'static FileFormat> {
    let ext = ext.trim_start_matches('.').to_ascii_lowercase();
    FORMATS.iter().filter(move |f| f.extension == ext)
}

/// Format registered under `name` (case-insensitive).
pub fn format_by_name(name: &str) -> LutResult<&'static FileFormat> {
    FORMATS
        .iter()
        .find(|f| f.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| LutError::NotFound(format!("file format '{name}'")))
}
