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

/// Runs the causal + anti-causal recursive pass over columns `start..end`.
///
/// Columns arrive as contiguous `height * CN` lines of the transpose cache
/// filled by the horizontal pass; results go to the destination plane at
/// column `x` with `dst_stride` items per row. Columns write disjoint
/// destination positions.
pub(crate) fn rg_vertical_pass<const CN: usize>(
    cache: &[f32],
    dst: &UnsafeSlice<f32>,
    dst_stride: u32,
    height: u32,
    weights: FusedPassWeights,
    start: u32,
    end: u32,
) {
    let height = height as usize;
    let column_stride = height * CN;
    let mut line = vec![0f32; column_stride];
    for x in start as usize..end as usize {
        let column = &cache[x * column_stride..][..column_stride];

        let mut prev = [0f32; CN];
        for (c, prev) in prev.iter_mut().enumerate() {
            *prev = column[c] * weights.cprev;
        }
        for (px, buf) in column.chunks_exact(CN).zip(line.chunks_exact_mut(CN)) {
            for c in 0..CN {
                prev[c] = px[c] * weights.a0a1 - prev[c] * weights.b1b2;
                buf[c] = prev[c];
            }
        }

        let last = (height - 1) * CN;
        for (c, prev) in prev.iter_mut().enumerate() {
            *prev = column[last + c] * weights.cnext;
        }
        let dst_col = x * CN;
        for (y, (px, buf)) in column
            .chunks_exact(CN)
            .zip(line.chunks_exact_mut(CN))
            .enumerate()
            .rev()
        {
            let dst_base = y * dst_stride as usize + dst_col;
            for c in 0..CN {
                prev[c] = px[c] * weights.a2a3 - prev[c] * weights.b1b2;
                buf[c] += prev[c];
                unsafe {
                    dst.write(dst_base + c, buf[c]);
                }
            }
        }
    }
}
