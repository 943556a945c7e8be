// Copyright (c) Radzivon Bartoshyk. All rights reserved.
//
// Redistribution and use in source and binary forms, with or without modification,
// are permitted provided that the following conditions are met:
//
// 1.  Redistributions of source code must retain the above copyright notice, this
// list of conditions and the following disclaimer.
//
// 2.  Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3.  Neither the name of the copyright holder nor the names of its
// contributors may be used to endorse or promote products derived from
// this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
// DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
// FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
// DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
// SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
// CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
// OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
#![allow(clippy::too_many_arguments)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod channels_configuration;
mod image;
mod img_size;
mod recursive;
#[cfg(feature = "image")]
#[cfg_attr(docsrs, doc(cfg(feature = "image")))]
mod recursive_blur_image;
mod threading_policy;
mod to_storage;
mod unsafe_slice;
mod util;

pub use channels_configuration::BlurChannels;
pub use image::{BlurImage, BlurImageMut, BufferStore};
pub use img_size::ImageSize;
pub use recursive::{recursive_blur, recursive_blur_f32, recursive_blur_f32_in_place};
#[cfg(feature = "image")]
#[cfg_attr(docsrs, doc(cfg(feature = "image")))]
pub use recursive_blur_image::recursive_blur_image;
pub use threading_policy::ThreadingPolicy;
pub use util::{BlurError, MismatchedSize};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u8_flat_survives_roundtrip() {
        let width: usize = 24;
        let height: usize = 24;
        let src = vec![127u8; width * height * 3];
        let src_image = BlurImage::borrow(
            &src,
            width as u32,
            height as u32,
            BlurChannels::Channels3,
        );
        let mut dst = BlurImageMut::default();

        recursive_blur(&src_image, &mut dst, 5., ThreadingPolicy::Single).unwrap();
        for (i, &cn) in dst.data.borrow_mut().iter().enumerate() {
            let diff = (cn as i32 - 127).abs();
            assert!(
                diff <= 1,
                "Diff expected to be less than 1 but it was {diff} at {i}"
            );
        }
    }
}
