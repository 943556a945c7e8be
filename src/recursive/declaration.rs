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

use crate::recursive::coefficients::{FusedPassWeights, RecursiveGaussian};
use crate::recursive::horizontal::rg_horizontal_pass;
use crate::recursive::vertical::rg_vertical_pass;
use crate::to_storage::ToStorage;
use crate::unsafe_slice::UnsafeSlice;
use crate::util::try_vec_f32;
use crate::{BlurChannels, BlurError, BlurImage, BlurImageMut, ThreadingPolicy};
use num_traits::AsPrimitive;

fn rg_engine_horizontal<const CN: usize>(
    src: &[f32],
    src_stride: u32,
    cache: &mut [f32],
    width: u32,
    height: u32,
    weights: FusedPassWeights,
    pool: Option<&rayon::ThreadPool>,
    thread_count: u32,
) {
    let cache_slice = UnsafeSlice::new(cache);
    match pool {
        None => rg_horizontal_pass::<CN>(
            src,
            src_stride,
            &cache_slice,
            width,
            height,
            weights,
            0,
            height,
        ),
        Some(pool) => pool.scope(|scope| {
            let segment_size = height / thread_count;
            for i in 0..thread_count {
                let start_y = i * segment_size;
                let mut end_y = (i + 1) * segment_size;
                if i == thread_count - 1 {
                    end_y = height;
                }
                scope.spawn(move |_| {
                    rg_horizontal_pass::<CN>(
                        src,
                        src_stride,
                        &cache_slice,
                        width,
                        height,
                        weights,
                        start_y,
                        end_y,
                    );
                });
            }
        }),
    }
}

fn rg_engine_vertical<const CN: usize>(
    cache: &[f32],
    dst: &mut [f32],
    dst_stride: u32,
    width: u32,
    height: u32,
    weights: FusedPassWeights,
    pool: Option<&rayon::ThreadPool>,
    thread_count: u32,
) {
    let dst_slice = UnsafeSlice::new(dst);
    match pool {
        None => rg_vertical_pass::<CN>(cache, &dst_slice, dst_stride, height, weights, 0, width),
        Some(pool) => pool.scope(|scope| {
            let segment_size = width / thread_count;
            for i in 0..thread_count {
                let start_x = i * segment_size;
                let mut end_x = (i + 1) * segment_size;
                if i == thread_count - 1 {
                    end_x = width;
                }
                scope.spawn(move |_| {
                    rg_vertical_pass::<CN>(
                        cache, &dst_slice, dst_stride, height, weights, start_x, end_x,
                    );
                });
            }
        }),
    }
}

fn make_pool(thread_count: u32) -> Option<rayon::ThreadPool> {
    if thread_count == 1 {
        return None;
    }
    Some(
        rayon::ThreadPoolBuilder::new()
            .num_threads(thread_count as usize)
            .build()
            .unwrap(),
    )
}

fn rg_run<const CN: usize>(
    src: &[f32],
    src_stride: u32,
    dst: &mut [f32],
    dst_stride: u32,
    width: u32,
    height: u32,
    sigma: f32,
    threading_policy: ThreadingPolicy,
) -> Result<(), BlurError> {
    let weights = RecursiveGaussian::new(sigma).fused();
    let mut cache = try_vec_f32(width as usize * height as usize * CN)?;
    let thread_count = threading_policy.thread_count(width, height) as u32;
    let pool = make_pool(thread_count);
    rg_engine_horizontal::<CN>(
        src,
        src_stride,
        &mut cache,
        width,
        height,
        weights,
        pool.as_ref(),
        thread_count,
    );
    rg_engine_vertical::<CN>(
        &cache,
        dst,
        dst_stride,
        width,
        height,
        weights,
        pool.as_ref(),
        thread_count,
    );
    Ok(())
}

fn rg_run_in_place<const CN: usize>(
    data: &mut [f32],
    stride: u32,
    width: u32,
    height: u32,
    sigma: f32,
    threading_policy: ThreadingPolicy,
) -> Result<(), BlurError> {
    let weights = RecursiveGaussian::new(sigma).fused();
    let mut cache = try_vec_f32(width as usize * height as usize * CN)?;
    let thread_count = threading_policy.thread_count(width, height) as u32;
    let pool = make_pool(thread_count);
    // The source plane is only read while filling the cache, afterwards it is
    // only written, which is what makes aliasing input == output legal.
    rg_engine_horizontal::<CN>(
        data,
        stride,
        &mut cache,
        width,
        height,
        weights,
        pool.as_ref(),
        thread_count,
    );
    rg_engine_vertical::<CN>(
        &cache,
        data,
        stride,
        width,
        height,
        weights,
        pool.as_ref(),
        thread_count,
    );
    Ok(())
}

/// Performs recursive gaussian approximation on the image.
///
/// Single pole-pair IIR filter, forward + backward sweep per line, rows then
/// columns through a transposed intermediate. Cost per pixel does not depend
/// on sigma, which makes very large radii as cheap as small ones.
/// O(1) complexity.
///
/// # Arguments
///
/// * `src` - Source image, see [BlurImage] for more info.
/// * `dst` - Destination image, see [BlurImageMut] for more info.
/// * `sigma` - Flattening level of the gaussian, values below 0.5 are clamped to 0.5.
/// * `threading_policy` - Threads usage policy.
pub fn recursive_blur_f32(
    src: &BlurImage<f32>,
    dst: &mut BlurImageMut<f32>,
    sigma: f32,
    threading_policy: ThreadingPolicy,
) -> Result<(), BlurError> {
    src.check_layout()?;
    dst.check_layout(Some(src))?;
    src.size_matches_mut(dst)?;
    let _dispatcher = match src.channels {
        BlurChannels::Plane => rg_run::<1>,
        BlurChannels::Channels3 => rg_run::<3>,
        BlurChannels::Channels4 => rg_run::<4>,
    };
    let src_stride = src.row_stride();
    let dst_stride = dst.row_stride();
    let width = src.width;
    let height = src.height;
    _dispatcher(
        src.data.as_ref(),
        src_stride,
        dst.data.borrow_mut(),
        dst_stride,
        width,
        height,
        sigma,
        threading_policy,
    )
}

/// Performs recursive gaussian approximation on the image in place.
///
/// Same filter as [recursive_blur_f32] working on a single plane, the
/// `input == output` contract of the two-pass design.
/// O(1) complexity.
///
/// # Arguments
///
/// * `image` - Image to work in place, see [BlurImageMut] for more info.
/// * `sigma` - Flattening level of the gaussian, values below 0.5 are clamped to 0.5.
/// * `threading_policy` - Threads usage policy.
pub fn recursive_blur_f32_in_place(
    image: &mut BlurImageMut<f32>,
    sigma: f32,
    threading_policy: ThreadingPolicy,
) -> Result<(), BlurError> {
    image.check_layout(None)?;
    let _dispatcher = match image.channels {
        BlurChannels::Plane => rg_run_in_place::<1>,
        BlurChannels::Channels3 => rg_run_in_place::<3>,
        BlurChannels::Channels4 => rg_run_in_place::<4>,
    };
    let stride = image.row_stride();
    let width = image.width;
    let height = image.height;
    _dispatcher(
        image.data.borrow_mut(),
        stride,
        width,
        height,
        sigma,
        threading_policy,
    )
}

/// Performs recursive gaussian approximation on the u8 image.
///
/// Converts to f32, runs [recursive_blur_f32_in_place] on the working plane
/// and stores back with rounding and saturation.
/// O(1) complexity.
///
/// # Arguments
///
/// * `src` - Source image, see [BlurImage] for more info.
/// * `dst` - Destination image, see [BlurImageMut] for more info.
/// * `sigma` - Flattening level of the gaussian, values below 0.5 are clamped to 0.5.
/// * `threading_policy` - Threads usage policy.
pub fn recursive_blur(
    src: &BlurImage<u8>,
    dst: &mut BlurImageMut<u8>,
    sigma: f32,
    threading_policy: ThreadingPolicy,
) -> Result<(), BlurError> {
    src.check_layout()?;
    dst.check_layout(Some(src))?;
    src.size_matches_mut(dst)?;
    let cn = src.channels.channels();
    let width = src.width;
    let height = src.height;
    let row_length = width as usize * cn;
    let mut working = try_vec_f32(row_length * height as usize)?;
    for (dst_row, src_row) in working
        .chunks_exact_mut(row_length)
        .zip(src.data.as_ref().chunks(src.row_stride() as usize))
    {
        for (dst, &src) in dst_row.iter_mut().zip(src_row.iter()) {
            *dst = src.as_();
        }
    }
    let _dispatcher = match src.channels {
        BlurChannels::Plane => rg_run_in_place::<1>,
        BlurChannels::Channels3 => rg_run_in_place::<3>,
        BlurChannels::Channels4 => rg_run_in_place::<4>,
    };
    _dispatcher(
        &mut working,
        row_length as u32,
        width,
        height,
        sigma,
        threading_policy,
    )?;
    let dst_stride = dst.row_stride() as usize;
    for (src_row, dst_row) in working
        .chunks_exact(row_length)
        .zip(dst.data.borrow_mut().chunks_mut(dst_stride))
    {
        for (&src, dst) in src_row.iter().zip(dst_row.iter_mut()) {
            *dst = src.to_();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroUsize;

    fn blur_flat(
        channels: BlurChannels,
        value: f32,
        threading_policy: ThreadingPolicy,
    ) -> Vec<f32> {
        let width = 16u32;
        let height = 10u32;
        let src = vec![value; width as usize * height as usize * channels.channels()];
        let src_image = BlurImage::borrow(&src, width, height, channels);
        let mut dst = BlurImageMut::default();
        recursive_blur_f32(&src_image, &mut dst, 3., threading_policy).unwrap();
        dst.data.borrow().to_vec()
    }

    #[test]
    fn test_constant_image_invariance() {
        for channels in [
            BlurChannels::Plane,
            BlurChannels::Channels3,
            BlurChannels::Channels4,
        ] {
            let blurred = blur_flat(channels, 100., ThreadingPolicy::Single);
            for (i, &v) in blurred.iter().enumerate() {
                assert!(
                    (v - 100.).abs() < 0.5,
                    "flat image expected to stay 100, got {v} at {i} for {channels:?}"
                );
            }
        }
    }

    #[test]
    fn test_constant_image_invariance_threaded() {
        let blurred = blur_flat(
            BlurChannels::Channels3,
            100.,
            ThreadingPolicy::Fixed(NonZeroUsize::new(3).unwrap()),
        );
        for &v in blurred.iter() {
            assert!((v - 100.).abs() < 0.5);
        }
    }

    #[test]
    fn test_in_place_matches_out_of_place() {
        let width = 8u32;
        let height = 8u32;
        let mut src = vec![0f32; width as usize * height as usize * 3];
        for (i, v) in src.iter_mut().enumerate() {
            *v = ((i * 31) % 255) as f32;
        }

        let src_image = BlurImage::borrow(&src, width, height, BlurChannels::Channels3);
        let mut dst = BlurImageMut::default();
        recursive_blur_f32(&src_image, &mut dst, 3., ThreadingPolicy::Single).unwrap();

        let mut aliased = src.clone();
        let mut aliased_image =
            BlurImageMut::borrow(&mut aliased, width, height, BlurChannels::Channels3);
        recursive_blur_f32_in_place(&mut aliased_image, 3., ThreadingPolicy::Single).unwrap();

        for (o, a) in dst.data.borrow().iter().zip(aliased.iter()) {
            assert!((o - a).abs() < 1e-5, "in-place diverged: {o} vs {a}");
        }
    }

    #[test]
    fn test_padded_stride_matches_compact() {
        let width = 7u32;
        let height = 5u32;
        let stride = 11u32;
        let mut compact = vec![0f32; width as usize * height as usize];
        for (i, v) in compact.iter_mut().enumerate() {
            *v = (i % 7) as f32 * 10.;
        }
        let mut padded = vec![-1f32; stride as usize * height as usize];
        for (dst, src) in padded
            .chunks_exact_mut(stride as usize)
            .zip(compact.chunks_exact(width as usize))
        {
            dst[..width as usize].copy_from_slice(src);
        }

        let compact_image = BlurImage::borrow(&compact, width, height, BlurChannels::Plane);
        let mut compact_dst = BlurImageMut::default();
        recursive_blur_f32(&compact_image, &mut compact_dst, 2., ThreadingPolicy::Single).unwrap();

        let mut padded_image = BlurImage::borrow(&padded, width, height, BlurChannels::Plane);
        padded_image.stride = stride;
        let mut padded_dst = BlurImageMut::alloc(width, height, BlurChannels::Plane);
        recursive_blur_f32(&padded_image, &mut padded_dst, 2., ThreadingPolicy::Single).unwrap();

        for (c, p) in compact_dst
            .data
            .borrow()
            .iter()
            .zip(padded_dst.data.borrow().iter())
        {
            assert!((c - p).abs() < 1e-6);
        }
    }

    #[test]
    fn test_linearity() {
        let width = 12u32;
        let height = 9u32;
        let k = 3.5f32;
        let mut src = vec![0f32; width as usize * height as usize];
        for (i, v) in src.iter_mut().enumerate() {
            *v = ((i * 17) % 100) as f32;
        }
        let scaled = src.iter().map(|&v| v * k).collect::<Vec<_>>();

        let src_image = BlurImage::borrow(&src, width, height, BlurChannels::Plane);
        let mut dst = BlurImageMut::default();
        recursive_blur_f32(&src_image, &mut dst, 4., ThreadingPolicy::Single).unwrap();

        let scaled_image = BlurImage::borrow(&scaled, width, height, BlurChannels::Plane);
        let mut scaled_dst = BlurImageMut::default();
        recursive_blur_f32(&scaled_image, &mut scaled_dst, 4., ThreadingPolicy::Single).unwrap();

        for (b, s) in dst
            .data
            .borrow()
            .iter()
            .zip(scaled_dst.data.borrow().iter())
        {
            assert!(
                (b * k - s).abs() < 1e-2,
                "linearity violated: {} vs {s}",
                b * k
            );
        }
    }

    #[test]
    fn test_step_edge_monotonic() {
        let width = 64usize;
        let src = (0..width)
            .map(|x| if x < width / 2 { 0f32 } else { 255f32 })
            .collect::<Vec<_>>();
        let src_image = BlurImage::borrow(&src, width as u32, 1, BlurChannels::Plane);
        let mut dst = BlurImageMut::default();
        recursive_blur_f32(&src_image, &mut dst, 5., ThreadingPolicy::Single).unwrap();
        let out = dst.data.borrow();
        for w in out.windows(2) {
            assert!(
                w[1] >= w[0] - 1e-3,
                "step response must be non-decreasing, got {} then {}",
                w[0],
                w[1]
            );
        }
        for &v in out.iter() {
            assert!((-0.5..=255.5).contains(&v), "overshoot out of bounds: {v}");
        }
    }

    #[test]
    fn test_small_flat_scenario() {
        let src = vec![100f32; 16];
        let src_image = BlurImage::borrow(&src, 4, 4, BlurChannels::Plane);
        let mut dst = BlurImageMut::default();
        recursive_blur_f32(&src_image, &mut dst, 3., ThreadingPolicy::Single).unwrap();
        for &v in dst.data.borrow().iter() {
            assert!((v - 100.).abs() < 0.5);
        }
    }

    #[test]
    fn test_impulse_spreads() {
        let mut src = vec![0f32; 16];
        src[2 * 4 + 2] = 255.;
        let src_image = BlurImage::borrow(&src, 4, 4, BlurChannels::Plane);
        let mut dst = BlurImageMut::default();
        recursive_blur_f32(&src_image, &mut dst, 1., ThreadingPolicy::Single).unwrap();
        let out = dst.data.borrow();
        let peak = out[2 * 4 + 2];
        for (i, &v) in out.iter().enumerate() {
            assert!(v <= peak + 1e-4, "peak must stay at (2,2), {v} at {i}");
        }
        for (y, x) in [(1usize, 2usize), (3, 2), (2, 1), (2, 3)] {
            assert!(
                out[y * 4 + x] > 0.,
                "impulse must spread into ({x},{y}), got {}",
                out[y * 4 + x]
            );
        }
        let sum: f32 = out.iter().sum();
        assert!(
            sum > 0.75 * 255. && sum < 1.1 * 255.,
            "mass roughly conserved, got {sum}"
        );
    }

    #[test]
    fn test_single_pixel_image() {
        let src = vec![42f32];
        let src_image = BlurImage::borrow(&src, 1, 1, BlurChannels::Plane);
        let mut dst = BlurImageMut::default();
        recursive_blur_f32(&src_image, &mut dst, 10., ThreadingPolicy::Single).unwrap();
        let v = dst.data.borrow()[0];
        assert!((v - 42.).abs() < 0.5, "1x1 image must survive, got {v}");
    }
}
