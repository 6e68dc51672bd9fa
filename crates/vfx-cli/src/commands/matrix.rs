//! Print derived matrices.

use anyhow::{Context, Result};
use vfx_ocio::{MatrixTransform, MatrixValue, Transform};

use super::{parse_array, parse_rgba};
use crate::{MatrixArgs, MatrixKind};

pub fn run(args: MatrixArgs) -> Result<()> {
    let value = derive(&args.kind)?;
    if args.yaml {
        print!("{}", Transform::from(MatrixTransform::from_value(value)).to_yaml()?);
    } else {
        print!("{}", render(&value));
    }
    Ok(())
}

fn derive(kind: &MatrixKind) -> Result<MatrixValue> {
    Ok(match kind {
        MatrixKind::Identity => MatrixTransform::identity(),
        MatrixKind::Sat { sat, luma } => MatrixTransform::sat(*sat, parse_array::<3>(luma)?),
        MatrixKind::Scale { scale } => MatrixTransform::scale(parse_rgba(scale)?),
        MatrixKind::View { channels, luma } => {
            let hot = parse_array::<4>(channels)?.map(|v| v != 0.0);
            MatrixTransform::view(hot, parse_array::<3>(luma)?)
        }
        MatrixKind::Fit { old_min, old_max, new_min, new_max } => MatrixTransform::fit(
            parse_rgba(old_min)?,
            parse_rgba(old_max)?,
            parse_rgba(new_min)?,
            parse_rgba(new_max)?,
        )
        .context("Cannot build fit matrix")?,
    })
}

/// Four matrix rows followed by the offset row.
fn render((m, o): &MatrixValue) -> String {
    let mut out = String::new();
    for row in m.chunks_exact(4) {
        out.push_str(&format!("{:>12.6} {:>12.6} {:>12.6} {:>12.6}\n", row[0], row[1], row[2], row[3]));
    }
    out.push_str(&format!("offset: {} {} {} {}\n", o[0], o[1], o[2], o[3]));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_sat() {
        let (m, _) = derive(&MatrixKind::Sat {
            sat: 0.5,
            luma: "0.2126,0.7152,0.0722".into(),
        })
        .unwrap();
        assert!((m[1] - 0.3576).abs() < 1e-12);
    }

    #[test]
    fn test_derive_view() {
        let (m, _) = derive(&MatrixKind::View {
            channels: "1,1,1,0".into(),
            luma: "0.2126,0.7152,0.0722".into(),
        })
        .unwrap();
        assert!((m[2] - 0.0722).abs() < 1e-12);
    }

    #[test]
    fn test_derive_fit_errors() {
        let kind = MatrixKind::Fit {
            old_min: "0.5".into(),
            old_max: "0.5".into(),
            new_min: "0".into(),
            new_max: "1".into(),
        };
        assert!(derive(&kind).is_err());
    }

    #[test]
    fn test_render_identity() {
        let text = render(&MatrixTransform::identity());
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[4], "offset: 0 0 0 0");
        assert!(lines[0].trim_start().starts_with("1.000000"));
    }
}
