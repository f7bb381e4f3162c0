//! Kernel constants and single-pixel evaluation.
//!
//! Kernels and neighborhoods are indexed `[dx][dy]`: `dx` walks columns and
//! `dy` walks rows, both in `0..3`, with the center at `[1][1]`.

use eg_core::Bgr8;

pub type Kernel3 = [[i32; 3]; 3];

/// 3x3 input pixels indexed `[dx][dy]`.
pub type Neighborhood = [[Bgr8; 3]; 3];

/// Responds to intensity changes along `y`.
pub const VERTICAL: Kernel3 = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];

/// Responds to intensity changes along `x`.
pub const HORIZONTAL: Kernel3 = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelSums {
    pub b: i32,
    pub g: i32,
    pub r: i32,
}

impl ChannelSums {
    #[inline]
    fn accumulate(&mut self, px: Bgr8, weight: i32) {
        self.b += i32::from(px.b) * weight;
        self.g += i32::from(px.g) * weight;
        self.r += i32::from(px.r) * weight;
    }
}

/// Raw, unsaturated sums of both kernels for one neighborhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GradientResponse {
    pub vertical: ChannelSums,
    pub horizontal: ChannelSums,
}

impl GradientResponse {
    #[inline]
    pub fn combine(&self) -> Bgr8 {
        let (v, h) = (&self.vertical, &self.horizontal);
        Bgr8::new(saturate(v.b, h.b), saturate(v.g, h.g), saturate(v.r, h.r))
    }
}

#[inline]
pub fn respond(n: &Neighborhood) -> GradientResponse {
    let mut out = GradientResponse::default();
    for dx in 0..3 {
        for dy in 0..3 {
            let px = n[dx][dy];
            out.vertical.accumulate(px, VERTICAL[dx][dy]);
            out.horizontal.accumulate(px, HORIZONTAL[dx][dy]);
        }
    }
    out
}

#[inline]
pub fn gradient(n: &Neighborhood) -> Bgr8 {
    respond(n).combine()
}

#[inline]
fn saturate(v: i32, h: i32) -> u8 {
    (v.abs() + h.abs()).min(255) as u8
}
