//! Interface tests for every transform kind.

use approx::assert_abs_diff_eq;
use vfx_ocio::*;

const CC: &str = concat!(
    r#"<ColorCorrection id="foo">"#,
    "<SOPNode>",
    "<Description>this is a descipt</Description>",
    "<Slope>1.1 1.2 1.3</Slope><Offset>2.1 2.2 2.3</Offset>",
    "<Power>3.1 3.2 3.3</Power>",
    "</SOPNode>",
    "<SatNode>",
    "<Saturation>0.7</Saturation>",
    "</SatNode>",
    "</ColorCorrection>",
);

const M16: [f64; 16] = [
    0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0, 1.1, 1.2, 1.3, 1.4, 1.5, 1.6,
];

#[test]
fn allocation_interface() {
    let mut at = AllocationTransform::default();
    assert_eq!(at.allocation(), Allocation::Uniform);
    at.set_allocation(Allocation::Lg2);
    assert_eq!(at.allocation(), Allocation::Lg2);
    assert_eq!(at.num_vars(), 0);
    at.set_vars(&[0.1, 0.2, 0.3]).unwrap();
    assert_eq!(at.num_vars(), 3);
    assert_abs_diff_eq!(at.vars()[1], 0.2, epsilon = 1e-8);

    let at2 = AllocationTransform::new(Allocation::Lg2, &[0.1, 0.2, 0.3], TransformDirection::Inverse)
        .unwrap();
    assert_eq!(at2.allocation(), Allocation::Lg2);
    assert_eq!(at2.num_vars(), 3);
    for (i, v) in at2.vars().iter().enumerate() {
        assert_abs_diff_eq!(*v, (i + 1) as f64 / 10.0, epsilon = 1e-7);
    }
    assert_eq!(at2.direction(), TransformDirection::Inverse);

    // Base transform behavior
    assert_eq!(at.direction(), TransformDirection::Forward);
    at.set_direction(TransformDirection::Unknown);
    assert_eq!(at.direction(), TransformDirection::Unknown);
}

#[test]
fn cdl_interface() {
    let mut cdl = CdlTransform::default();
    cdl.set_xml(CC).unwrap();
    assert_eq!(cdl.xml(), CC);

    let mut edited = cdl.clone();
    edited.offset = [1.0, 1.0, 1.0];
    assert_ne!(cdl, edited);

    cdl.slope = [0.1, 0.2, 0.3];
    cdl.offset = [1.1, 1.2, 1.3];
    cdl.power = [2.1, 2.2, 2.3];
    cdl.sat = 0.5;
    let cc2 = concat!(
        r#"<ColorCorrection id="foo">"#,
        "<SOPNode>",
        "<Description>this is a descipt</Description>",
        "<Slope>0.1 0.2 0.3</Slope>",
        "<Offset>1.1 1.2 1.3</Offset>",
        "<Power>2.1 2.2 2.3</Power>",
        "</SOPNode>",
        "<SatNode>",
        "<Saturation>0.5</Saturation>",
        "</SatNode></ColorCorrection>",
    );
    assert_eq!(cdl.xml(), cc2);

    cdl.set_sop([1.1, 1.2, 1.3, 1.4, 1.5, 1.6, 1.7, 1.8, 1.9]);
    assert_abs_diff_eq!(cdl.sop()[4], 1.5, epsilon = 1e-8);
    assert_abs_diff_eq!(cdl.slope[1], 1.2, epsilon = 1e-7);
    assert_abs_diff_eq!(cdl.offset[2], 1.6, epsilon = 1e-7);
    assert_abs_diff_eq!(cdl.power[0], 1.7, epsilon = 1e-7);
    assert_abs_diff_eq!(cdl.sat, 0.5, epsilon = 1e-8);
    let luma = cdl.sat_luma_coefs();
    assert_abs_diff_eq!(luma[0], 0.2126, epsilon = 1e-8);
    assert_abs_diff_eq!(luma[1], 0.7152, epsilon = 1e-8);
    assert_abs_diff_eq!(luma[2], 0.0722, epsilon = 1e-8);

    cdl.id = "foobar123".into();
    assert_eq!(cdl.id, "foobar123");
    cdl.description = "bar".into();
    assert_eq!(cdl.description, "bar");

    let cdl2 = CdlTransform {
        direction: TransformDirection::Inverse,
        id: "foobar123".into(),
        description: "bar".into(),
        ..CdlTransform::new([0.1, 0.2, 0.3], [1.1, 1.2, 1.3], [2.1, 2.2, 2.3], 0.5)
    };
    for i in 0..3 {
        let base = (i + 1) as f64 / 10.0;
        assert_abs_diff_eq!(cdl2.slope[i], base, epsilon = 1e-7);
        assert_abs_diff_eq!(cdl2.offset[i], base + 1.0, epsilon = 1e-7);
        assert_abs_diff_eq!(cdl2.power[i], base + 2.0, epsilon = 1e-7);
    }
    assert_eq!(cdl2.sat, 0.5);
    assert_eq!(cdl2.direction, TransformDirection::Inverse);
    assert_eq!(cdl2.id, "foobar123");
    assert_eq!(cdl2.description, "bar");
}

#[test]
fn cdl_xml_round_trip_preserves_fields() {
    let t = CdlTransform {
        id: "a<b>&\"c\"".into(),
        description: "line & more".into(),
        ..CdlTransform::new([0.95, 1.0, 1.0625], [-0.003, 0.0, 0.012], [1.0, 0.9, 1.1], 1.2)
    };
    let mut back = CdlTransform::default();
    back.set_xml(&t.xml()).unwrap();
    assert_eq!(back, t);
    assert_eq!(back.xml(), t.xml());
}

#[test]
fn cdl_xml_round_trip_keeps_description_padding() {
    for description in [" warm grade ", "\tshot 12\n", "  "] {
        let t = CdlTransform {
            id: "pad".into(),
            description: description.into(),
            ..CdlTransform::new([1.1, 1.0, 0.9], [0.01, 0.0, -0.01], [1.0, 1.0, 1.0], 0.8)
        };
        let mut back = CdlTransform::default();
        back.set_xml(&t.xml()).unwrap();
        assert_eq!(back, t);
    }
}

#[test]
fn colorspace_interface() {
    let mut ct = ColorSpaceTransform::default();
    ct.src = "foo".into();
    ct.dst = "bar".into();
    assert_eq!(ct.src, "foo");
    assert_eq!(ct.dst, "bar");
}

#[test]
fn display_interface() {
    let ct = ColorSpaceTransform {
        src: "foo".into(),
        dst: "bar".into(),
        ..Default::default()
    };
    let mut cdl = CdlTransform::default();
    cdl.set_xml(CC).unwrap();

    let mut dt = DisplayTransform::default();
    dt.input_colorspace_name = "lin18".into();
    assert_eq!(dt.input_colorspace_name, "lin18");
    dt.linear_cc = Some(Box::new(ct.clone().into()));
    dt.color_timing_cc = Some(Box::new(cdl.clone().into()));
    dt.channel_view = Some(Box::new(AllocationTransform::default().into()));
    dt.display = "sRGB".into();
    dt.view = "foobar".into();
    dt.display_cc = Some(Box::new(cdl.into()));
    match dt.display_cc.as_deref() {
        Some(Transform::Cdl(c)) => assert_eq!(c.xml(), CC),
        _ => panic!("display cc should be a CDL"),
    }
    assert_eq!(dt.linear_cc.as_deref(), Some(&Transform::from(ct)));
    dt.looks_override = "darkgrade".into();
    dt.looks_override_enabled = true;
    assert_eq!(dt.looks_override, "darkgrade");
    assert!(dt.looks_override_enabled);

    let dt2 = DisplayTransform {
        direction: TransformDirection::Inverse,
        ..DisplayTransform::new("lin18", "sRGB", "foobar")
    };
    assert_eq!(dt2.input_colorspace_name, "lin18");
    assert_eq!(dt2.display, "sRGB");
    assert_eq!(dt2.view, "foobar");
    assert_eq!(dt2.direction(), TransformDirection::Inverse);
}

#[test]
fn exponent_interface() {
    let mut et = ExponentTransform::default();
    et.set_value([0.1, 0.2, 0.3, 0.4]);
    assert_abs_diff_eq!(et.value()[2], 0.3, epsilon = 1e-7);
}

#[test]
fn file_interface() {
    let mut ft = FileTransform::default();
    ft.src = "foo".into();
    ft.ccc_id = "foobar".into();
    ft.interpolation = Interpolation::Nearest;
    assert_eq!(ft.src, "foo");
    assert_eq!(ft.ccc_id, "foobar");
    assert_eq!(ft.interpolation, Interpolation::Nearest);
    assert_eq!(FileTransform::num_formats(), 17);
    assert_eq!(FileTransform::format_name_by_index(0).unwrap(), "flame");
    assert_eq!(FileTransform::format_extension_by_index(0).unwrap(), "3dl");
    assert!(matches!(
        FileTransform::format_extension_by_index(17),
        Err(OcioError::OutOfRange { .. })
    ));
}

#[test]
fn group_interface() {
    let et = ExponentTransform::default();
    let ft = FileTransform {
        src: "foo".into(),
        ..Default::default()
    };
    let mut gt = GroupTransform::default();
    gt.push(et);
    gt.push(ft);
    assert_eq!(gt.len(), 2);
    assert!(!gt.is_empty());
    assert_eq!(gt.transform(0).unwrap().direction(), TransformDirection::Forward);
    gt.clear();
    assert_eq!(gt.len(), 0);
    assert!(gt.is_empty());
}

#[test]
fn log_interface() {
    let mut lt = LogTransform::default();
    lt.set_base(10.0);
    assert_eq!(lt.base(), 10.0);
}

#[test]
fn look_interface() {
    let lkt = LookTransform {
        src: "foo".into(),
        dst: "bar".into(),
        looks: "bar;foo".into(),
        ..Default::default()
    };
    assert_eq!(lkt.src, "foo");
    assert_eq!(lkt.dst, "bar");
    assert_eq!(lkt.looks, "bar;foo");
}

#[test]
fn matrix_interface() {
    let mut mt = MatrixTransform::default();
    let copy = mt.clone();
    mt.set_value(M16, [0.1, 0.2, 0.3, 0.4]);
    assert_ne!(mt, copy);
    let (m, o) = mt.value();
    assert_abs_diff_eq!(m[2], 0.3, epsilon = 1e-7);
    assert_abs_diff_eq!(o[1], 0.2, epsilon = 1e-7);

    mt.set_matrix([
        1.1, 1.2, 1.3, 1.4, 1.5, 1.6, 1.7, 1.8, 1.9, 2.0, 2.1, 2.2, 2.3, 2.4, 2.5, 2.6,
    ]);
    assert_abs_diff_eq!(mt.matrix()[2], 1.3, epsilon = 1e-7);
    mt.set_offset([1.1, 1.2, 1.3, 1.4]);
    assert_abs_diff_eq!(mt.offset()[3], 1.4, epsilon = 1e-7);

    // Factories never touch the instance
    let _ = MatrixTransform::fit([0.1; 4], [0.9; 4], [0.0; 4], [1.1; 4]).unwrap();
    assert_abs_diff_eq!(mt.matrix()[2], 1.3, epsilon = 1e-7);

    let (m, _) = MatrixTransform::identity();
    assert_abs_diff_eq!(m[1], 0.0, epsilon = 1e-7);
    let (m, _) = MatrixTransform::sat(0.5, [0.2126, 0.7152, 0.0722]);
    assert_abs_diff_eq!(m[1], 0.3576, epsilon = 1e-7);
    let (m, _) = MatrixTransform::scale([0.9, 0.8, 0.7, 1.0]);
    assert_abs_diff_eq!(m[0], 0.9, epsilon = 1e-7);
    let (m, _) = MatrixTransform::view([true, true, true, false], [0.2126, 0.7152, 0.0722]);
    assert_abs_diff_eq!(m[2], 0.0722, epsilon = 1e-7);

    let mt4 = MatrixTransform::new(M16, [0.1, 0.2, 0.3, 0.4], TransformDirection::Inverse);
    let (m, o) = mt4.value();
    for (i, v) in m.iter().enumerate() {
        assert_abs_diff_eq!(*v, (i + 1) as f64 / 10.0, epsilon = 1e-7);
    }
    for (i, v) in o.iter().enumerate() {
        assert_abs_diff_eq!(*v, (i + 1) as f64 / 10.0, epsilon = 1e-7);
    }
    assert_eq!(mt4.direction(), TransformDirection::Inverse);
}

#[test]
fn equality_is_reflexive_and_exact() {
    let kinds: Vec<Transform> = vec![
        AllocationTransform::default().into(),
        CdlTransform::default().into(),
        ColorSpaceTransform::default().into(),
        DisplayTransform::default().into(),
        ExponentTransform::default().into(),
        FileTransform::default().into(),
        GroupTransform::default().into(),
        LogTransform::default().into(),
        LookTransform::default().into(),
        MatrixTransform::default().into(),
    ];
    for t in &kinds {
        assert_eq!(t, t);
        assert_eq!(&t.clone(), t);
        assert_ne!(&t.inverse(), t, "{}", t.kind_name());
    }
    for (i, a) in kinds.iter().enumerate() {
        for b in &kinds[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn forward_then_inverse_restores_pixel() {
    let chain = Transform::group(vec![
        AllocationTransform::new(Allocation::Lg2, &[-6.0, 6.0, 0.0], TransformDirection::Forward)
            .unwrap()
            .into(),
        MatrixTransform::from_value(MatrixTransform::sat(1.3, vfx_math::REC709_LUMA)).into(),
        CdlTransform::new([1.05, 0.98, 1.0], [0.01, 0.0, -0.01], [1.1, 1.0, 0.95], 1.0).into(),
        ExponentTransform::new([1.2, 1.2, 1.2, 1.0]).into(),
    ]);
    let fwd = Processor::from_transform(&chain, TransformDirection::Forward).unwrap();
    let inv = Processor::from_transform(&chain, TransformDirection::Inverse).unwrap();

    let original = [[0.18_f32, 0.5, 0.9, 1.0], [0.05, 0.02, 0.3, 0.25]];
    let mut pixels = original;
    fwd.apply_rgba(&mut pixels);
    inv.apply_rgba(&mut pixels);
    for (p, o) in pixels.iter().zip(&original) {
        for c in 0..4 {
            assert_abs_diff_eq!(p[c], o[c], epsilon = 1e-4);
        }
    }
}
