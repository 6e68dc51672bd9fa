//! Apply a YAML transform document to pixel values.

use anyhow::{Context, Result, bail};
use tracing::{debug, info};
use vfx_ocio::{Processor, Transform, TransformDirection};

use super::format_pixel;
use crate::ApplyArgs;

pub fn run(args: ApplyArgs) -> Result<()> {
    let transform = Transform::from_yaml_file(&args.transform)
        .with_context(|| format!("Failed to load transform: {}", args.transform.display()))?;

    let direction = if args.inverse {
        TransformDirection::Inverse
    } else {
        TransformDirection::Forward
    };
    let processor = Processor::from_transform(&transform, direction)
        .with_context(|| format!("Failed to build {} processor", transform.kind_name()))?;
    debug!(ops = processor.num_ops(), "processor ready");

    for line in transform_values(&processor, &args.values, args.channels as usize)? {
        println!("{line}");
    }
    info!(pixels = args.values.len() / args.channels as usize, "done");
    Ok(())
}

/// Transforms channel-interleaved values, one output line per pixel.
fn transform_values(processor: &Processor, values: &[f32], channels: usize) -> Result<Vec<String>> {
    if values.len() % channels != 0 {
        bail!(
            "{} values is not a whole number of {}-channel pixels",
            values.len(),
            channels
        );
    }

    let lines = match channels {
        3 => {
            let mut pixels: Vec<[f32; 3]> = values.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();
            processor.apply_rgb(&mut pixels);
            pixels.iter().map(|p| format_pixel(p)).collect()
        }
        4 => {
            let mut pixels: Vec<[f32; 4]> =
                values.chunks_exact(4).map(|c| [c[0], c[1], c[2], c[3]]).collect();
            processor.apply_rgba(&mut pixels);
            pixels.iter().map(|p| format_pixel(p)).collect()
        }
        n => bail!("Unsupported channel count: {}", n),
    };
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vfx_ocio::MatrixTransform;

    fn doubler() -> Processor {
        let t = Transform::from(MatrixTransform::from_value(MatrixTransform::scale([2.0; 4])));
        Processor::from_transform(&t, TransformDirection::Forward).unwrap()
    }

    #[test]
    fn test_rgba_values() {
        let lines = transform_values(&doubler(), &[0.5, 0.25, 1.0, 1.0, 0.0, 0.0, 0.0, 0.5], 4).unwrap();
        assert_eq!(lines, ["1 0.5 2 2", "0 0 0 1"]);
    }

    #[test]
    fn test_rgb_values() {
        let lines = transform_values(&doubler(), &[0.5, 0.25, 1.0], 3).unwrap();
        assert_eq!(lines, ["1 0.5 2"]);
    }

    #[test]
    fn test_partial_pixel() {
        assert!(transform_values(&doubler(), &[0.5, 0.25], 3).is_err());
    }
}
