#![no_main]
use libfuzzer_sys::fuzz_target;
use zenplanar::*;

fuzz_target!(|data: &[u8]| {
    // header: format, width, height, stride, export format; rest is pixel data
    if data.len() < 8 {
        return;
    }
    let format = data[0] as u32 % 10;
    let width = u32::from(data[1] % 64);
    let height = u32::from(data[2] % 64);
    let stride = usize::from(u16::from_le_bytes([data[3], data[4]]) % 512);
    let out_format = data[5] as u32 % 10;
    let pixels = &data[8..];

    let mut list = ImageList::new().with_limits(Limits {
        max_pixels: Some(4096),
        ..Default::default()
    });
    let before = list.len();
    let added = PixelFormat::from_raw(format)
        .and_then(|f| list.add(width, height, stride, pixels, f, None));
    let Ok(index) = added else {
        assert_eq!(list.len(), before, "failed add changed the list");
        return;
    };
    assert_eq!(list.label(index).unwrap(), default_label(index));

    let Ok(out_format) = PixelFormat::from_raw(out_format) else {
        return;
    };
    let info = list.get_info(index).unwrap();
    let mut out = vec![0u8; stride.max(1) * height as usize + 16];
    let copied = list.copy_out(index, info.width, info.height, stride, &mut out, out_format);
    if codec::is_valid_pairing(info.spectrum, out_format)
        && stride >= info.width as usize * out_format.bytes_per_pixel()
    {
        assert!(copied.is_ok(), "{copied:?}");
    }
});
