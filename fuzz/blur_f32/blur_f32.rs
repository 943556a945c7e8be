#![no_main]

use libfuzzer_sys::fuzz_target;
use recblur::{BlurChannels, BlurImage, BlurImageMut, ThreadingPolicy};

fuzz_target!(|data: (u8, u8, u8)| {
    fuzz_f32(
        data.0 as usize,
        data.1 as usize,
        data.2 as f32,
        BlurChannels::Channels4,
    );
    fuzz_f32(
        data.0 as usize,
        data.1 as usize,
        data.2 as f32,
        BlurChannels::Channels3,
    );
    fuzz_f32(
        data.0 as usize,
        data.1 as usize,
        data.2 as f32,
        BlurChannels::Plane,
    );
});

fn fuzz_f32(width: usize, height: usize, sigma: f32, channels: BlurChannels) {
    if width == 0 || height == 0 {
        return;
    }
    let src_image = vec![0.5f32; width * height * channels.channels()];
    let src = BlurImage::borrow(&src_image, width as u32, height as u32, channels);
    let mut dst_image = BlurImageMut::default();

    _ = recblur::recursive_blur_f32(&src, &mut dst_image, sigma, ThreadingPolicy::Single);

    let mut in_place = src_image.clone();
    let mut in_place_image =
        BlurImageMut::borrow(&mut in_place, width as u32, height as u32, channels);
    _ = recblur::recursive_blur_f32_in_place(&mut in_place_image, sigma, ThreadingPolicy::Single);
}
