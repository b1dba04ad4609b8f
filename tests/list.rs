//! Image list behavior as seen by a host: adding, inspecting, exporting, slot reuse.

use zenplanar::*;

#[test]
fn channel_reorder_on_export() {
    let mut list = ImageList::new();
    let rgb = [10, 20, 30, 40, 50, 60];
    let index = list.add(2, 1, 6, &rgb, PixelFormat::Rgb8, None).unwrap();
    assert_eq!(index, 0);
    assert_eq!(list.len(), 1);
    assert_eq!(
        list.get_info(0).unwrap(),
        ImageInfo {
            width: 2,
            height: 1,
            spectrum: 3,
            format: Some(PixelFormat::Rgb8),
        }
    );

    let mut out = [0u8; 6];
    list.copy_out(0, 2, 1, 6, &mut out, PixelFormat::Bgr8).unwrap();
    assert_eq!(out, [30, 20, 10, 60, 50, 40]);
}

#[test]
fn primaries_swap_red_and_blue() {
    let mut list = ImageList::new();
    let rgb = [255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255];
    list.add(2, 2, 6, &rgb, PixelFormat::Rgb8, None).unwrap();
    let mut out = [0u8; 12];
    list.copy_out(0, 2, 2, 6, &mut out, PixelFormat::Bgr8).unwrap();
    assert_eq!(out, [0, 0, 255, 0, 255, 0, 255, 0, 0, 255, 255, 255]);
}

#[test]
fn gray_broadcasts_with_opaque_alpha() {
    let mut list = ImageList::new();
    list.add(2, 1, 2, &[10, 20], PixelFormat::Gray8, None).unwrap();
    let mut out = [0u8; 8];
    list.copy_out(0, 2, 1, 8, &mut out, PixelFormat::Rgba8).unwrap();
    assert_eq!(out, [10, 10, 10, 255, 20, 20, 20, 255]);
}

#[test]
fn gray_alpha_into_bgra() {
    let mut list = ImageList::new();
    list.add(1, 1, 2, &[90, 33], PixelFormat::GrayAlpha8, None)
        .unwrap();
    assert_eq!(
        list.get_info(0).unwrap().format,
        Some(PixelFormat::GrayAlpha8)
    );
    assert_eq!(
        list.copy_out_new(0, PixelFormat::Bgra8).unwrap(),
        [90, 90, 90, 33]
    );
}

#[test]
fn rgb_into_bgra_gets_opaque_alpha() {
    let mut list = ImageList::new();
    list.add(1, 1, 3, &[1, 2, 3], PixelFormat::Rgb8, None).unwrap();
    assert_eq!(
        list.copy_out_new(0, PixelFormat::Bgra8).unwrap(),
        [3, 2, 1, 255]
    );
}

#[test]
fn invalid_add_parameters_leave_list_unchanged() {
    let mut list = ImageList::new();
    list.add(1, 1, 1, &[7], PixelFormat::Gray8, None).unwrap();

    let cases: [(u32, u32, usize, &[u8]); 5] = [
        (0, 1, 1, &[1]),
        (1, 0, 1, &[1]),
        (1, 1, 0, &[1]),
        (1, 1, 1, &[]),
        (2, 1, 1, &[1, 2]),
    ];
    for (w, h, stride, data) in cases {
        let err = list
            .add(w, h, stride, data, PixelFormat::Gray8, None)
            .unwrap_err();
        assert_eq!(err.status(), Status::InvalidParameter, "{w}x{h} stride {stride}");
        assert_eq!(list.len(), 1);
    }

    let short = list.add(2, 2, 2, &[1, 2, 3], PixelFormat::Gray8, None);
    assert!(matches!(short, Err(PlanarError::BufferTooSmall { needed: 4, actual: 3 })));
    assert_eq!(list.len(), 1);
    assert_eq!(list.copy_out_new(0, PixelFormat::Gray8).unwrap(), [7]);
}

#[test]
fn unknown_format_value() {
    let err = PixelFormat::from_raw(8).unwrap_err();
    assert!(matches!(err, PlanarError::UnknownFormat(8)));
    assert_eq!(err.status(), Status::UnknownImageFormat);
    assert_eq!(PixelFormat::try_from(5u32).unwrap(), PixelFormat::Bgra8);
}

#[test]
fn index_bounds() {
    let mut list = ImageList::new();
    assert_eq!(
        list.get_info(0).unwrap_err().status(),
        Status::IndexOutOfRange
    );
    list.add(1, 1, 1, &[0], PixelFormat::Gray8, None).unwrap();
    assert!(list.get_info(0).is_ok());

    let err = list.get_info(1).unwrap_err();
    assert!(matches!(err, PlanarError::IndexOutOfRange { index: 1, len: 1 }));

    let mut out = [0u8; 1];
    let err = list
        .copy_out(1, 1, 1, 1, &mut out, PixelFormat::Gray8)
        .unwrap_err();
    assert_eq!(err.status(), Status::IndexOutOfRange);
}

#[test]
fn copy_out_validates_destination() {
    let mut list = ImageList::new();
    list.add(2, 2, 6, &[0; 12], PixelFormat::Rgb8, None).unwrap();
    let mut out = [0u8; 64];

    let zero_stride = list.copy_out(0, 2, 2, 0, &mut out, PixelFormat::Rgb8);
    assert_eq!(Status::of(&zero_stride), Status::InvalidParameter);

    let empty = list.copy_out(0, 2, 2, 6, &mut [], PixelFormat::Rgb8);
    assert_eq!(Status::of(&empty), Status::InvalidParameter);

    let wrong_size = list.copy_out(0, 3, 2, 9, &mut out, PixelFormat::Rgb8);
    assert_eq!(Status::of(&wrong_size), Status::InvalidParameter);

    let too_small = list.copy_out(0, 2, 2, 6, &mut out[..11], PixelFormat::Rgb8);
    assert!(matches!(too_small, Err(PlanarError::BufferTooSmall { .. })));

    // color cannot be squeezed into gray
    let pairing = list.copy_out(0, 2, 2, 2, &mut out, PixelFormat::Gray8);
    assert!(matches!(
        pairing,
        Err(PlanarError::UnsupportedPairing { spectrum: 3, format: PixelFormat::Gray8 })
    ));
    assert_eq!(Status::of(&pairing), Status::InvalidParameter);
}

#[test]
fn unsupported_channel_count_on_export() {
    let mut list = ImageList::new();
    list.add(1, 1, 1, &[0], PixelFormat::Gray8, None).unwrap();
    *list.image_mut(0).unwrap() = PlanarImage::new(1, 1, 5).unwrap();

    let info = list.get_info(0).unwrap();
    assert_eq!(info.spectrum, 5);
    assert_eq!(info.format, None);

    let mut out = [0u8; 4];
    let err = list
        .copy_out(0, 1, 1, 4, &mut out, PixelFormat::Rgba8)
        .unwrap_err();
    assert!(matches!(err, PlanarError::UnsupportedChannelCount(5)));
    assert_eq!(err.status(), Status::UnsupportedChannelCount);
}

#[test]
fn out_of_range_samples_are_clamped_and_truncated() {
    let mut list = ImageList::new();
    list.add(4, 1, 4, &[0; 4], PixelFormat::Gray8, None).unwrap();
    list.image_mut(0)
        .unwrap()
        .data_mut()
        .copy_from_slice(&[-12.0, 127.9, 300.0, f32::NAN]);
    assert_eq!(
        list.copy_out_new(0, PixelFormat::Gray8).unwrap(),
        [0, 127, 255, 0]
    );
}

#[test]
fn emptied_slot_is_reused_first() {
    let mut list = ImageList::new();
    for v in [1u8, 2, 3] {
        list.add(1, 1, 1, &[v], PixelFormat::Gray8, None).unwrap();
    }
    list.image_mut(1).unwrap().clear();
    assert_eq!(list.next_free_index().unwrap(), 1);
    assert_eq!(list.get_info(1).unwrap().format, None);

    let index = list
        .add(1, 1, 3, &[4, 5, 6], PixelFormat::Rgb8, Some("patch"))
        .unwrap();
    assert_eq!(index, 1);
    assert_eq!(list.len(), 3);
    assert_eq!(list.label(1).unwrap(), "patch");
    assert_eq!(list.copy_out_new(0, PixelFormat::Gray8).unwrap(), [1]);
    assert_eq!(list.copy_out_new(2, PixelFormat::Gray8).unwrap(), [3]);

    let appended = list.add(1, 1, 1, &[9], PixelFormat::Gray8, None).unwrap();
    assert_eq!(appended, 3);
    assert_eq!(list.label(3).unwrap(), "image 4");
}

#[test]
fn growth_preserves_existing_images() {
    let mut list = ImageList::new();
    let mut expected = Vec::new();
    for i in 0..40u32 {
        let px = [(i * 3) as u8, (i * 5) as u8, (i * 7) as u8];
        list.add(1, 1, 3, &px, PixelFormat::Rgb8, None).unwrap();
        expected.push(px);
    }
    assert!(list.capacity() >= 40);
    for (i, px) in expected.iter().enumerate() {
        assert_eq!(list.copy_out_new(i, PixelFormat::Rgb8).unwrap(), px);
        assert_eq!(list.label(i).unwrap(), default_label(i));
    }

    list.ensure_capacity(100).unwrap();
    assert!(list.capacity() >= 100);
    assert_eq!(list.len(), 40);
}

#[test]
fn limits_reject_without_side_effects() {
    let mut list = ImageList::new().with_limits(Limits {
        max_width: Some(8),
        ..Default::default()
    });
    list.add(8, 1, 8, &[0; 8], PixelFormat::Gray8, None).unwrap();
    let err = list
        .add(9, 1, 9, &[0; 9], PixelFormat::Gray8, None)
        .unwrap_err();
    assert!(matches!(err, PlanarError::LimitExceeded(_)));
    assert_eq!(err.status(), Status::OutOfMemory);
    assert_eq!(list.len(), 1);
}

#[test]
fn iteration_pairs_images_and_labels() {
    let mut list = ImageList::new();
    list.add(1, 1, 1, &[0], PixelFormat::Gray8, Some("a")).unwrap();
    list.add(2, 1, 2, &[0, 0], PixelFormat::Gray8, None).unwrap();
    let seen: Vec<(u32, &str)> = list.iter().map(|(img, label)| (img.width(), label)).collect();
    assert_eq!(seen, [(1, "a"), (2, "image 2")]);

    list.clear();
    assert!(list.is_empty());
    assert_eq!(list.next_free_index().unwrap(), 0);
}

#[test]
fn zero_arguments_are_reported_before_the_index() {
    let list = ImageList::new();
    let mut out = [0u8; 4];
    let zero_width = list.copy_out(0, 0, 1, 4, &mut out, PixelFormat::Rgba8);
    assert_eq!(Status::of(&zero_width), Status::InvalidParameter);
    let empty_buffer = list.copy_out(3, 1, 1, 4, &mut [], PixelFormat::Rgba8);
    assert_eq!(Status::of(&empty_buffer), Status::InvalidParameter);
    let bad_index = list.copy_out(0, 1, 1, 4, &mut out, PixelFormat::Rgba8);
    assert_eq!(Status::of(&bad_index), Status::IndexOutOfRange);
}

#[test]
fn planar_images_join_the_list() {
    let mut list = ImageList::new();
    list.add(1, 1, 1, &[1], PixelFormat::Gray8, None).unwrap();
    list.add(1, 1, 1, &[2], PixelFormat::Gray8, None).unwrap();
    list.image_mut(0).unwrap().clear();

    // red, green, blue, alpha planes of a 2x1 image
    let planes = vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 255.0, 128.0];
    let image = PlanarImage::from_planes(2, 1, 4, planes).unwrap();
    let index = list.add_planar(image, Some("layers")).unwrap();
    assert_eq!(index, 0);
    assert_eq!(list.len(), 2);

    let stored = list.image(0).unwrap();
    assert_eq!(stored.plane(1), &[30.0, 40.0]);
    assert_eq!(stored.plane(3), &[255.0, 128.0]);
    assert_eq!(
        list.copy_out_new(0, PixelFormat::Bgra8).unwrap(),
        [50, 30, 10, 255, 60, 40, 20, 128]
    );
    assert_eq!(list.copy_out_new(1, PixelFormat::Gray8).unwrap(), [2]);
}
