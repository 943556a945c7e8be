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

use crate::recursive::coefficients::FusedPassWeights;
use crate::unsafe_slice::UnsafeSlice;

/// Runs the causal + anti-causal recursive pass over rows `start..end` of `src`,
/// writing results into the transpose cache.
///
/// The cache is laid out as `width` blocks of `height * CN` items so that row
/// `y` of the source lands in column `y` of every block; the vertical pass can
/// then stream each block as one contiguous line.
///
/// Every worker owns its scratch line, rows write disjoint cache positions.
pub(crate) fn rg_horizontal_pass<const CN: usize>(
    src: &[f32],
    src_stride: u32,
    cache: &UnsafeSlice<f32>,
    width: u32,
    height: u32,
    weights: FusedPassWeights,
    start: u32,
    end: u32,
) {
    let width = width as usize;
    let column_stride = height as usize * CN;
    let mut line = vec![0f32; width * CN];
    for y in start as usize..end as usize {
        let row = &src[y * src_stride as usize..][..width * CN];

        let mut prev = [0f32; CN];
        for (c, prev) in prev.iter_mut().enumerate() {
            *prev = row[c] * weights.cprev;
        }
        for (px, buf) in row.chunks_exact(CN).zip(line.chunks_exact_mut(CN)) {
            for c in 0..CN {
                prev[c] = px[c] * weights.a0a1 - prev[c] * weights.b1b2;
                buf[c] = prev[c];
            }
        }

        let last = (width - 1) * CN;
        for (c, prev) in prev.iter_mut().enumerate() {
            *prev = row[last + c] * weights.cnext;
        }
        let col_base = y * CN;
        for (x, (px, buf)) in row
            .chunks_exact(CN)
            .zip(line.chunks_exact_mut(CN))
            .enumerate()
            .rev()
        {
            let cache_base = x * column_stride + col_base;
            for c in 0..CN {
                prev[c] = px[c] * weights.a2a3 - prev[c] * weights.b1b2;
                buf[c] += prev[c];
                unsafe {
                    cache.write(cache_base + c, buf[c]);
                }
            }
        }
    }
}
