//! Benchmark workloads for the Trellis toolkit.
//!
//! Deterministic generators for inputs large enough to time:
//!
//! - [`checkerboard`]: a square text grid with a repeating glyph pattern
//! - [`particle_cloud`]: a reproducible set of 3D particles

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use trellis_core::Coord3;
use trellis_particle::Particle3;

/// A `size`x`size` grid of `#` and `.` with an `S` in the top-left corner.
///
/// Every seventh cell (row-major) is a wall.
pub fn checkerboard(size: usize) -> String {
    let mut text = String::with_capacity(size * (size + 1));
    for y in 0..size {
        if y > 0 {
            text.push('\n');
        }
        for x in 0..size {
            let glyph = match (x, y) {
                (0, 0) => 'S',
                _ if (y * size + x) % 7 == 0 => '#',
                _ => '.',
            };
            text.push(glyph);
        }
    }
    text
}

/// `count` particles with small pseudo-random integer vectors.
///
/// Uses a fixed multiplicative hash of the index, so the same `count`
/// always yields the same cloud.
pub fn particle_cloud(count: u64) -> Vec<Particle3> {
    let component = |i: u64, salt: u64, range: i64| -> i64 {
        let h = i.wrapping_add(salt).wrapping_mul(6364136223846793007) >> 33;
        (h % (2 * range as u64 + 1)) as i64 - range
    };
    (0..count)
        .map(|i| {
            let v = |salt: u64, range: i64| {
                Coord3::new(
                    component(i, salt, range),
                    component(i, salt + 1, range),
                    component(i, salt + 2, range),
                )
            };
            Particle3::new(v(0, 50), v(10, 5), v(20, 1))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkerboard_shape() {
        let text = checkerboard(10);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert!(lines.iter().all(|l| l.len() == 10));
        assert!(text.starts_with('S'));
    }

    #[test]
    fn particle_cloud_is_deterministic() {
        assert_eq!(particle_cloud(64), particle_cloud(64));
        assert_eq!(particle_cloud(64).len(), 64);
    }
}
