//! List registered file formats.

use anyhow::Result;
use vfx_ocio::FileTransform;

pub fn run() -> Result<()> {
    for i in 0..FileTransform::num_formats() {
        println!(
            "{:>2}  {:<28} .{}",
            i,
            FileTransform::format_name_by_index(i)?,
            FileTransform::format_extension_by_index(i)?
        );
    }
    Ok(())
}
