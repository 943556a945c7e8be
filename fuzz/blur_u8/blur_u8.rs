#![no_main]

use libfuzzer_sys::fuzz_target;
use recblur::{BlurChannels, BlurImage, BlurImageMut, ThreadingPolicy};

fuzz_target!(|data: (u8, u8, u8)| {
    fuzz_u8(
        data.0 as usize,
        data.1 as usize,
        data.2 as f32,
        BlurChannels::Channels4,
    );
    fuzz_u8(
        data.0 as usize,
        data.1 as usize,
        data.2 as f32,
        BlurChannels::Channels3,
    );
    fuzz_u8(
        data.0 as usize,
        data.1 as usize,
        data.2 as f32,
        BlurChannels::Plane,
    );
});

fn fuzz_u8(width: usize, height: usize, sigma: f32, channels: BlurChannels) {
    if width == 0 || height == 0 {
        return;
    }
    let src_image = vec![126u8; width * height * channels.channels()];
    let src = BlurImage::borrow(&src_image, width as u32, height as u32, channels);
    let mut dst_image = BlurImageMut::default();

    _ = recblur::recursive_blur(&src, &mut dst_image, sigma, ThreadingPolicy::Single);
}
