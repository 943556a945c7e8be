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

/// Minimum sigma that still produces a stable, meaningful kernel.
/// Smaller values are clamped up, never rejected.
pub(crate) const SIGMA_FLOOR: f32 = 0.5;

/// Pole and gain constants of the recursive gaussian approximation,
/// all derived from a single sigma.
///
/// The summed causal + anti-causal response has unit DC gain:
/// `a0+a1+a2+a3 = k*(1 + 2*alpha*lambda - b2) = (1-lambda)^2` while
/// `1 + b1 + b2 = (1-lambda)^2` since `b2 = lambda^2`, hence
/// `cprev + cnext == 1` and flat regions pass through unchanged.
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq)]
pub(crate) struct RecursiveGaussian {
    pub a0: f32,
    pub a1: f32,
    pub a2: f32,
    pub a3: f32,
    pub b1: f32,
    pub b2: f32,
    /// Steady-state weight seeding the causal pass from the first sample.
    pub cprev: f32,
    /// Steady-state weight seeding the anti-causal pass from the last sample.
    pub cnext: f32,
}

/// Per-invocation fused weights, the only constants the line passes touch.
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq)]
pub(crate) struct FusedPassWeights {
    pub a0a1: f32,
    pub a2a3: f32,
    pub b1b2: f32,
    pub cprev: f32,
    pub cnext: f32,
}

impl RecursiveGaussian {
    pub(crate) fn new(sigma: f32) -> RecursiveGaussian {
        let sigma = sigma.max(SIGMA_FLOOR);
        let alpha = (0.726f32 * 0.726f32).exp() / sigma;
        let lambda = (-alpha).exp();
        let b2 = (-2f32 * alpha).exp();
        let k = (1f32 - lambda) * (1f32 - lambda) / (1f32 + 2f32 * alpha * lambda - b2);
        let a0 = k;
        let a1 = k * (alpha - 1f32) * lambda;
        let a2 = k * (alpha + 1f32) * lambda;
        let a3 = -k * b2;
        let b1 = -2f32 * lambda;
        let norm = 1f32 + b1 + b2;
        RecursiveGaussian {
            a0,
            a1,
            a2,
            a3,
            b1,
            b2,
            cprev: (a0 + a1) / norm,
            cnext: (a2 + a3) / norm,
        }
    }

    #[inline]
    pub(crate) fn fused(&self) -> FusedPassWeights {
        FusedPassWeights {
            a0a1: self.a0 + self.a1,
            a2a3: self.a2 + self.a3,
            b1b2: self.b1 + self.b2,
            cprev: self.cprev,
            cnext: self.cnext,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pole_inside_unit_circle() {
        let mut sigma = 0.5f32;
        while sigma < 200. {
            let solved = RecursiveGaussian::new(sigma);
            assert!(
                solved.b2.abs() < 1.,
                "|b2| must be < 1 for stability, got {} at sigma {sigma}",
                solved.b2
            );
            sigma += 0.37;
        }
    }

    #[test]
    fn test_sigma_floor() {
        let at_floor = RecursiveGaussian::new(0.5);
        assert_eq!(RecursiveGaussian::new(0.), at_floor);
        assert_eq!(RecursiveGaussian::new(-3.), at_floor);
        assert_eq!(RecursiveGaussian::new(0.49), at_floor);
        assert_ne!(RecursiveGaussian::new(0.51), at_floor);
    }

    #[test]
    fn test_unit_dc_gain() {
        for sigma in [0.5f32, 1., 3., 10., 50.] {
            let solved = RecursiveGaussian::new(sigma);
            let dc = solved.cprev + solved.cnext;
            assert!(
                (dc - 1.).abs() < 1e-4,
                "cprev + cnext expected ~1, got {dc} at sigma {sigma}"
            );
        }
    }
}
