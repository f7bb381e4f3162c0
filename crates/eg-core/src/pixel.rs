/// One packed pixel. Memory order is `b`, `g`, `r`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bgr8 {
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

impl Bgr8 {
    pub const BLACK: Self = Self::gray(0);
    pub const WHITE: Self = Self::gray(255);

    pub const fn new(b: u8, g: u8, r: u8) -> Self {
        Self { b, g, r }
    }

    pub const fn gray(v: u8) -> Self {
        Self { b: v, g: v, r: v }
    }

    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self {
            b: bytes[0],
            g: bytes[1],
            r: bytes[2],
        }
    }

    pub const fn to_bytes(self) -> [u8; 3] {
        [self.b, self.g, self.r]
    }
}

/// Read access to pixels by coordinate.
///
/// Implementors must return the pixel at column `x`, row `y` for every
/// `x < width()` and `y < height()`. Out-of-range coordinates may panic.
pub trait PixelSource {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn fetch(&self, x: usize, y: usize) -> Bgr8;
}

impl<T: PixelSource + ?Sized> PixelSource for &T {
    fn width(&self) -> usize {
        (**self).width()
    }

    fn height(&self) -> usize {
        (**self).height()
    }

    fn fetch(&self, x: usize, y: usize) -> Bgr8 {
        (**self).fetch(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::Bgr8;

    #[test]
    fn byte_order_is_blue_green_red() {
        let px = Bgr8::from_bytes([1, 2, 3]);
        assert_eq!(px, Bgr8::new(1, 2, 3));
        assert_eq!(px.b, 1);
        assert_eq!(px.r, 3);
        assert_eq!(px.to_bytes(), [1, 2, 3]);
        assert_eq!(Bgr8::WHITE.to_bytes(), [255; 3]);
    }
}
