//! Entity geometry for collision tests
//!
//! Entities are centred boxes. Exact tests use per-pixel [`BitMask`]s when
//! the sprite collaborator supplies them; otherwise half-extent box overlap.

use glam::{IVec2, Vec2};

use crate::Error;

/// Half-extent box overlap between two centred boxes.
///
/// Touching edges do not count as overlap.
#[inline]
pub fn boxes_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    let d = (a_pos - b_pos).abs();
    let reach = (a_size + b_size) * 0.5;
    d.x < reach.x && d.y < reach.y
}

/// Top-left corner of a centred box
#[inline]
pub fn top_left(center: Vec2, size: Vec2) -> Vec2 {
    center - size * 0.5
}

/// Per-pixel opacity bitmap used for exact collision tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

/// Alpha values above this count as solid
pub const MASK_ALPHA_THRESHOLD: u8 = 127;

impl BitMask {
    /// Fully solid mask
    pub fn filled(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![true; (width * height) as usize],
        }
    }

    /// Build from a row-major RGBA8 buffer using the alpha channel
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<Self, Error> {
        let expected = (width * height * 4) as usize;
        if rgba.len() != expected {
            return Err(Error::BufferSize {
                what: "mask",
                expected,
                actual: rgba.len(),
            });
        }
        let bits = rgba
            .chunks_exact(4)
            .map(|px| px[3] > MASK_ALPHA_THRESHOLD)
            .collect();
        Ok(Self { width, height, bits })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Whether the pixel at (x, y) is solid; out of range is empty
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.bits[(y as u32 * self.width + x as u32) as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, solid: bool) {
        if x < self.width && y < self.height {
            self.bits[(y * self.width + x) as usize] = solid;
        }
    }

    /// Whether any solid pixel of `other`, placed with its top-left corner at
    /// `offset` relative to ours, lands on a solid pixel of ours
    pub fn overlaps(&self, other: &BitMask, offset: IVec2) -> bool {
        let x0 = offset.x.max(0);
        let y0 = offset.y.max(0);
        let x1 = (offset.x + other.width as i32).min(self.width as i32);
        let y1 = (offset.y + other.height as i32).min(self.height as i32);

        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x, y) && other.get(x - offset.x, y - offset.y) {
                    return true;
                }
            }
        }
        false
    }
}

/// Pixel-exact overlap of two centred masks at world positions
pub fn masks_overlap(a: &BitMask, a_pos: Vec2, b: &BitMask, b_pos: Vec2) -> bool {
    let offset = top_left(b_pos, b.size()) - top_left(a_pos, a.size());
    a.overlaps(b, offset.round().as_ivec2())
}

/// Passable/blocked classifier for player movement
pub trait CollisionMap: std::fmt::Debug {
    /// Whether the player may stand at this world position
    fn is_passable(&self, pos: Vec2) -> bool;
}

/// Collision map backed by an RGBA image in world coordinates.
///
/// Pixels equal to the sentinel colour are blocked, every other pixel is
/// passable. Positions outside the image are blocked.
#[derive(Debug, Clone)]
pub struct ImageCollisionMap {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
    blocked: [u8; 4],
}

/// Default sentinel: opaque black marks walls
pub const DEFAULT_BLOCKED_COLOR: [u8; 4] = [0, 0, 0, 255];

impl ImageCollisionMap {
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8], blocked: [u8; 4]) -> Result<Self, Error> {
        let expected = (width * height * 4) as usize;
        if rgba.len() != expected {
            return Err(Error::BufferSize {
                what: "collision map",
                expected,
                actual: rgba.len(),
            });
        }
        let pixels = rgba
            .chunks_exact(4)
            .map(|px| [px[0], px[1], px[2], px[3]])
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
            blocked,
        })
    }

    /// Colour at a pixel, None outside the image
    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(self.pixels[(y as u32 * self.width + x as u32) as usize])
    }
}

impl CollisionMap for ImageCollisionMap {
    fn is_passable(&self, pos: Vec2) -> bool {
        let p = pos.floor().as_ivec2();
        match self.pixel(p.x, p.y) {
            Some(color) => color != self.blocked,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boxes_overlap() {
        let size = Vec2::new(10.0, 10.0);
        assert!(boxes_overlap(Vec2::ZERO, size, Vec2::new(9.0, 0.0), size));
        // Touching edges do not overlap
        assert!(!boxes_overlap(Vec2::ZERO, size, Vec2::new(10.0, 0.0), size));
        assert!(!boxes_overlap(Vec2::ZERO, size, Vec2::new(5.0, 12.0), size));
    }

    #[test]
    fn test_mask_overlap_offsets() {
        let a = BitMask::filled(4, 4);
        let b = BitMask::filled(2, 2);
        assert!(a.overlaps(&b, IVec2::new(3, 3)));
        assert!(!a.overlaps(&b, IVec2::new(4, 0)));
        assert!(a.overlaps(&b, IVec2::new(-1, -1)));
        assert!(!a.overlaps(&b, IVec2::new(-2, 0)));
    }

    #[test]
    fn test_mask_overlap_ignores_transparent_pixels() {
        // Hollow 3x3 ring: centre pixel is empty
        let mut ring = BitMask::filled(3, 3);
        ring.set(1, 1, false);
        let dot = BitMask::filled(1, 1);
        assert!(!ring.overlaps(&dot, IVec2::new(1, 1)));
        assert!(ring.overlaps(&dot, IVec2::new(0, 1)));
    }

    #[test]
    fn test_mask_from_rgba_alpha() {
        let rgba = [255, 0, 0, 255, 255, 0, 0, 0];
        let mask = BitMask::from_rgba(2, 1, &rgba).unwrap();
        assert!(mask.get(0, 0));
        assert!(!mask.get(1, 0));
        assert!(BitMask::from_rgba(2, 2, &rgba).is_err());
    }

    #[test]
    fn test_masks_overlap_world_positions() {
        let a = BitMask::filled(10, 10);
        let b = BitMask::filled(4, 4);
        assert!(masks_overlap(&a, Vec2::ZERO, &b, Vec2::new(6.0, 0.0)));
        assert!(!masks_overlap(&a, Vec2::ZERO, &b, Vec2::new(8.0, 0.0)));
    }

    #[test]
    fn test_image_collision_map() {
        // 2x1 image: left pixel white, right pixel opaque black (blocked)
        let rgba = [255, 255, 255, 255, 0, 0, 0, 255];
        let map = ImageCollisionMap::from_rgba(2, 1, &rgba, DEFAULT_BLOCKED_COLOR).unwrap();
        assert!(map.is_passable(Vec2::new(0.5, 0.5)));
        assert!(!map.is_passable(Vec2::new(1.5, 0.5)));
        // Outside the image
        assert!(!map.is_passable(Vec2::new(-0.5, 0.5)));
        assert!(!map.is_passable(Vec2::new(0.5, 3.0)));
    }
}
