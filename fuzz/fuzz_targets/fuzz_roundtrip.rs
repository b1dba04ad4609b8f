#![no_main]
use libfuzzer_sys::fuzz_target;
use zenplanar::*;

fuzz_target!(|data: &[u8]| {
    // Import then export in the same format must reproduce every non-padding byte
    if data.len() < 4 {
        return;
    }
    let Ok(format) = PixelFormat::from_raw(u32::from(data[0] % 8)) else {
        return;
    };
    let width = u32::from(data[1] % 32) + 1;
    let extra = usize::from(data[2] % 8);
    let pixels = &data[3..];

    let bpp = format.bytes_per_pixel();
    let stride = width as usize * bpp + extra;
    let row = width as usize * bpp;
    if pixels.len() < row {
        return;
    }
    let height = ((pixels.len() - row) / stride + 1) as u32;

    let mut list = ImageList::new();
    let index = list
        .add(width, height, stride, pixels, format, None)
        .expect("valid buffer rejected");

    let mut out = vec![0u8; pixels.len()];
    list.copy_out(index, width, height, stride, &mut out, format)
        .expect("same-format export failed");

    for y in 0..height as usize {
        let start = y * stride;
        for i in 0..row {
            if format.roles()[i % bpp] != ChannelRole::Padding {
                assert_eq!(out[start + i], pixels[start + i], "row {y} byte {i}");
            }
        }
    }
});
