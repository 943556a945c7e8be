/*
 * // Copyright (c) Radzivon Bartoshyk. All rights reserved.
 * //
 * // Redistribution and use in source and binary forms, with or without modification,
 * // are permitted provided that the following conditions are met:
 * //
 * // 1.  Redistributions of source code must retain the above copyright notice, this
 * // list of conditions and the following disclaimer.
 * //
 * // 2.  Redistributions in binary form must reproduce the above copyright notice,
 * // this list of conditions and the following disclaimer in the documentation
 * // and/or other materials provided with the distribution.
 * //
 * // 3.  Neither the name of the copyright holder nor the names of its
 * // contributors may be used to endorse or promote products derived from
 * // this software without specific prior written permission.
 * //
 * // THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * // AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * // IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * // DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * // FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * // DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * // SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * // CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * // OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * // OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use crate::{recursive_blur, BlurChannels, BlurImage, BlurImageMut, ThreadingPolicy};
use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};

/// Performs recursive gaussian blur on the image.
///
/// NOTE: Alpha must be associated if this image with alpha
///
/// # Arguments
///
/// * `image`: Dynamic image provided by image crate.
/// * `sigma`: Flattening level of the gaussian, values below 0.5 are clamped to 0.5.
/// * `threading_policy` - Threads usage policy.
///
#[must_use]
pub fn recursive_blur_image(
    image: DynamicImage,
    sigma: f32,
    threading_policy: ThreadingPolicy,
) -> Option<DynamicImage> {
    match image {
        DynamicImage::ImageLuma8(gray) => {
            let gray_image =
                BlurImage::borrow(&gray, gray.width(), gray.height(), BlurChannels::Plane);
            let mut new_image = BlurImageMut::alloc(gray.width(), gray.height(), BlurChannels::Plane);

            recursive_blur(&gray_image, &mut new_image, sigma, threading_policy).ok()?;
            let new_gray_image = GrayImage::from_raw(
                gray.width(),
                gray.height(),
                new_image.data.borrow().to_vec(),
            )?;
            Some(DynamicImage::ImageLuma8(new_gray_image))
        }
        DynamicImage::ImageRgb8(img) => {
            let rgb_image =
                BlurImage::borrow(&img, img.width(), img.height(), BlurChannels::Channels3);
            let mut new_image =
                BlurImageMut::alloc(img.width(), img.height(), BlurChannels::Channels3);

            recursive_blur(&rgb_image, &mut new_image, sigma, threading_policy).ok()?;

            let new_rgb_image =
                RgbImage::from_raw(img.width(), img.height(), new_image.data.borrow().to_vec())?;
            Some(DynamicImage::ImageRgb8(new_rgb_image))
        }
        DynamicImage::ImageRgba8(img) => {
            let rgba_image =
                BlurImage::borrow(&img, img.width(), img.height(), BlurChannels::Channels4);
            let mut new_image =
                BlurImageMut::alloc(img.width(), img.height(), BlurChannels::Channels4);

            recursive_blur(&rgba_image, &mut new_image, sigma, threading_policy).ok()?;

            let new_rgba_image =
                RgbaImage::from_raw(img.width(), img.height(), new_image.data.borrow().to_vec())?;
            Some(DynamicImage::ImageRgba8(new_rgba_image))
        }
        _ => None,
    }
}
