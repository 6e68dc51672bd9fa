//! Print a color correction from a CDL file.

use anyhow::{Context, Result};
use tracing::debug;
use vfx_ocio::{CdlTransform, Transform};

use crate::CdlArgs;

pub fn run(args: CdlArgs) -> Result<()> {
    let cdl = CdlTransform::from_file(&args.file, &args.id)
        .with_context(|| format!("Failed to read correction from {}", args.file.display()))?;
    debug!(id = %cdl.id, "selected correction");

    if args.yaml {
        print!("{}", Transform::from(cdl).to_yaml()?);
    } else {
        println!("{}", cdl.xml());
    }
    Ok(())
}
