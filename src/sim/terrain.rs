//! Procedural terrain
//!
//! The ground is a piecewise-linear profile: a jagged random walk clamped to a
//! height band, with a few segments flattened into landing pads. Touchdown is
//! only survivable where the vehicle can sit level, so the pads matter.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::MAX_TERRAIN_POINTS;
use crate::tuning::TerrainTuning;

/// Errors raised when building a profile from caller-supplied points
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TerrainError {
    #[error("terrain needs at least 2 points, got {0}")]
    TooFewPoints(usize),

    #[error("terrain point {index} has a non-finite coordinate")]
    NonFinite { index: usize },

    #[error("terrain x must strictly increase (point {index})")]
    NotIncreasing { index: usize },

    #[error("terrain spans [{start}, {end}] but the play area is [0, {width}]")]
    DoesNotCover { start: f32, end: f32, width: f32 },
}

/// Immutable ground profile, x strictly increasing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawProfile")]
pub struct TerrainProfile {
    points: Vec<Vec2>,
}

/// Wire shape of a profile before validation
#[derive(Deserialize)]
struct RawProfile {
    points: Vec<Vec2>,
}

impl TryFrom<RawProfile> for TerrainProfile {
    type Error = TerrainError;

    fn try_from(raw: RawProfile) -> Result<Self, Self::Error> {
        Self::from_points(raw.points)
    }
}

impl TerrainProfile {
    /// Validate and wrap a list of points
    pub fn from_points(points: Vec<Vec2>) -> Result<Self, TerrainError> {
        if points.len() < 2 {
            return Err(TerrainError::TooFewPoints(points.len()));
        }
        for (index, p) in points.iter().enumerate() {
            if !p.is_finite() {
                return Err(TerrainError::NonFinite { index });
            }
            if index > 0 && p.x <= points[index - 1].x {
                return Err(TerrainError::NotIncreasing { index });
            }
        }
        Ok(Self { points })
    }

    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: every way of building a profile checks for at least two points
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consecutive point pairs in increasing x
    pub fn segments(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    /// Horizontal extent `(first.x, last.x)`
    pub fn span(&self) -> (f32, f32) {
        (self.points[0].x, self.points[self.points.len() - 1].x)
    }

    /// Check that the profile has ground under every x in `[0, width]`
    pub fn covers(&self, width: f32) -> Result<(), TerrainError> {
        let (start, end) = self.span();
        if start <= 0.0 && end >= width {
            Ok(())
        } else {
            Err(TerrainError::DoesNotCover { start, end, width })
        }
    }

    /// First segment (in increasing x) whose x-range contains `x`.
    ///
    /// A shared vertex belongs to the segment on its left.
    pub fn segment_at(&self, x: f32) -> Option<(Vec2, Vec2)> {
        self.segments().find(|(p1, p2)| x >= p1.x && x <= p2.x)
    }

    /// Ground height at `x` by linear interpolation, `None` outside the span
    pub fn height_at(&self, x: f32) -> Option<f32> {
        self.segment_at(x)
            .map(|(p1, p2)| p1.y + (x - p1.x) * (p2.y - p1.y) / (p2.x - p1.x))
    }

    /// Index ranges of flat runs (consecutive points with identical y)
    pub fn flat_runs(&self) -> Vec<(usize, usize)> {
        let mut runs = Vec::new();
        let mut start = 0;
        for i in 1..self.points.len() {
            if self.points[i].y != self.points[i - 1].y {
                if i - 1 > start {
                    runs.push((start, i - 1));
                }
                start = i;
            }
        }
        if self.points.len() - 1 > start {
            runs.push((start, self.points.len() - 1));
        }
        runs
    }

    /// Centre x of the flat run closest to `x`
    pub fn nearest_pad(&self, x: f32) -> Option<f32> {
        self.flat_runs()
            .into_iter()
            .map(|(a, b)| (self.points[a].x + self.points[b].x) * 0.5)
            .min_by(|p, q| (p - x).abs().total_cmp(&(q - x).abs()))
    }
}

/// Generate a profile spanning `[0, width]` from a seed
pub fn generate(width: f32, seed: u64, params: &TerrainTuning) -> TerrainProfile {
    let mut rng = Pcg32::seed_from_u64(seed);
    generate_with(&mut rng, width, params)
}

/// Smallest horizontal step, keeps generation finite for degenerate tuning
const MIN_STEP: f32 = 1.0;

/// Generate a profile drawing from an existing RNG
pub fn generate_with<R: Rng>(rng: &mut R, width: f32, params: &TerrainTuning) -> TerrainProfile {
    let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
    let (low, high) = (params.min_y.min(params.max_y), params.min_y.max(params.max_y));
    let step_range = (params.max_step - params.min_step).max(0.0);

    let mut x = 0.0;
    let mut y = params.baseline.max(low).min(high);
    let mut points = vec![Vec2::new(x, y)];

    // The first point at or past `width` is kept so the profile covers the whole play area
    loop {
        let next = x + (params.min_step + rng.random::<f32>() * step_range).max(MIN_STEP);
        // Close the profile at the edge once f32 can no longer advance x or the cap is hit
        x = if next.is_finite() && next > x && points.len() < MAX_TERRAIN_POINTS {
            next
        } else if width > x {
            width
        } else {
            x + MIN_STEP
        };
        let delta = (rng.random::<f32>() * 2.0 - 1.0) * params.max_delta;
        let stepped = (y + delta).max(low).min(high);
        if stepped.is_finite() {
            y = stepped;
        }
        points.push(Vec2::new(x, y));
        if x >= width {
            break;
        }
    }

    let placed = flatten_spots(&mut points, params.flat_spots);
    log::debug!(
        "Generated terrain: {} points over width {}, {} flat spots",
        points.len(),
        width,
        placed
    );

    TerrainProfile { points }
}

/// Flatten up to `requested` landing pads, spread evenly over interior points.
///
/// Each anchor `i` copies the height of `i - 1` onto `i` and `i + 1`. Returns
/// how many pads were placed; fewer than requested when the profile is short.
pub fn flatten_spots(points: &mut [Vec2], requested: usize) -> usize {
    let interior = points.len().saturating_sub(2);
    let count = requested.min(interior);
    if count == 0 {
        return 0;
    }
    if count < requested {
        log::debug!(
            "Only room for {} of {} requested flat spots",
            count,
            requested
        );
    }

    let stride = interior / count;
    for k in 0..count {
        let i = 1 + k * stride + stride / 2;
        points[i].y = points[i - 1].y;
        points[i + 1].y = points[i].y;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_well_formed(profile: &TerrainProfile, width: f32) {
        assert!(profile.len() >= 2);
        let (first, last) = profile.span();
        assert_eq!(first, 0.0);
        assert!(last >= width);
        for (p1, p2) in profile.segments() {
            assert!(p2.x > p1.x);
        }
    }

    #[test]
    fn test_generate_spans_width() {
        let params = TerrainTuning::default();
        for seed in 0..20 {
            let profile = generate(800.0, seed, &params);
            assert_well_formed(&profile, 800.0);
            for p in profile.points() {
                assert!(p.y >= 400.0 && p.y <= 550.0);
            }
        }
    }

    #[test]
    fn test_generate_is_seeded() {
        let params = TerrainTuning::default();
        assert_eq!(generate(800.0, 99, &params), generate(800.0, 99, &params));
        assert_ne!(generate(800.0, 99, &params), generate(800.0, 100, &params));
    }

    #[test]
    fn test_generate_has_flat_pads() {
        let profile = generate(800.0, 3, &TerrainTuning::default());
        assert!(!profile.flat_runs().is_empty());
    }

    #[test]
    fn test_tiny_width_still_two_points() {
        let params = TerrainTuning::default();
        for width in [0.0, 1.0, -50.0, f32::NAN, f32::INFINITY] {
            let profile = generate(width, 1, &params);
            assert_eq!(profile.len(), 2);
        }
    }

    #[test]
    fn test_flatten_more_spots_than_points() {
        let mut points = vec![
            Vec2::new(0.0, 500.0),
            Vec2::new(60.0, 480.0),
            Vec2::new(130.0, 530.0),
        ];
        assert_eq!(flatten_spots(&mut points, 5), 1);
        assert_eq!(points[1].y, 500.0);
        assert_eq!(points[2].y, 500.0);

        let mut two = vec![Vec2::new(0.0, 500.0), Vec2::new(70.0, 450.0)];
        assert_eq!(flatten_spots(&mut two, 5), 0);
        assert_eq!(two[1].y, 450.0);

        let mut empty: Vec<Vec2> = Vec::new();
        assert_eq!(flatten_spots(&mut empty, 3), 0);
    }

    #[test]
    fn test_flatten_zero_requested() {
        let mut points: Vec<Vec2> = (0..10)
            .map(|i| Vec2::new(i as f32 * 60.0, 400.0 + i as f32))
            .collect();
        let before = points.clone();
        assert_eq!(flatten_spots(&mut points, 0), 0);
        assert_eq!(points, before);
    }

    #[test]
    fn test_height_interpolates() {
        let profile = TerrainProfile::from_points(vec![
            Vec2::new(0.0, 500.0),
            Vec2::new(100.0, 400.0),
            Vec2::new(200.0, 400.0),
        ])
        .unwrap();
        assert_eq!(profile.height_at(50.0), Some(450.0));
        assert_eq!(profile.height_at(150.0), Some(400.0));
        assert_eq!(profile.height_at(250.0), None);
    }

    #[test]
    fn test_shared_vertex_uses_left_segment() {
        let profile = TerrainProfile::from_points(vec![
            Vec2::new(0.0, 500.0),
            Vec2::new(100.0, 450.0),
            Vec2::new(200.0, 550.0),
        ])
        .unwrap();
        let (p1, p2) = profile.segment_at(100.0).unwrap();
        assert_eq!(p1.x, 0.0);
        assert_eq!(p2.x, 100.0);
        assert_eq!(profile.height_at(100.0), Some(450.0));
    }

    #[test]
    fn test_from_points_rejects_bad_input() {
        assert_eq!(
            TerrainProfile::from_points(vec![Vec2::ZERO]),
            Err(TerrainError::TooFewPoints(1))
        );
        assert_eq!(
            TerrainProfile::from_points(vec![Vec2::new(0.0, 1.0), Vec2::new(0.0, 2.0)]),
            Err(TerrainError::NotIncreasing { index: 1 })
        );
        assert_eq!(
            TerrainProfile::from_points(vec![Vec2::new(0.0, 1.0), Vec2::new(f32::NAN, 2.0)]),
            Err(TerrainError::NonFinite { index: 1 })
        );
    }

    #[test]
    fn test_huge_width_stays_increasing_and_bounded() {
        let params = TerrainTuning::default();
        for width in [1.1e9, 3.0e9] {
            let profile = generate(width, 5, &params);
            assert!(profile.len() <= MAX_TERRAIN_POINTS + 1);
            assert_well_formed(&profile, width);
            assert!(profile.covers(width).is_ok());
        }
    }

    #[test]
    fn test_non_finite_params_still_finite_profile() {
        let params = TerrainTuning {
            max_step: f32::INFINITY,
            max_delta: f32::INFINITY,
            ..TerrainTuning::default()
        };
        let profile = generate(800.0, 2, &params);
        assert_well_formed(&profile, 800.0);
        assert!(profile.points().iter().all(|p| p.is_finite()));
    }

    #[test]
    fn test_covers_play_area() {
        let short = TerrainProfile::from_points(vec![
            Vec2::new(0.0, 500.0),
            Vec2::new(100.0, 500.0),
        ])
        .unwrap();
        assert_eq!(
            short.covers(800.0),
            Err(TerrainError::DoesNotCover {
                start: 0.0,
                end: 100.0,
                width: 800.0
            })
        );

        let late = TerrainProfile::from_points(vec![
            Vec2::new(10.0, 500.0),
            Vec2::new(800.0, 500.0),
        ])
        .unwrap();
        assert!(late.covers(800.0).is_err());
        assert!(generate(800.0, 1, &TerrainTuning::default()).covers(800.0).is_ok());
    }

    #[test]
    fn test_deserialize_validates_points() {
        let err = serde_json::from_str::<TerrainProfile>(r#"{"points":[]}"#).unwrap_err();
        assert!(err.to_string().contains("at least 2 points"));

        let err = serde_json::from_str::<TerrainProfile>(
            r#"{"points":[[0.0,500.0],[0.0,450.0]]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("strictly increase"));

        let profile = generate(800.0, 4, &TerrainTuning::default());
        let json = serde_json::to_string(&profile).unwrap();
        assert_eq!(serde_json::from_str::<TerrainProfile>(&json).unwrap(), profile);
    }

    #[test]
    fn test_flat_runs() {
        let profile = TerrainProfile::from_points(vec![
            Vec2::new(0.0, 500.0),
            Vec2::new(50.0, 480.0),
            Vec2::new(100.0, 480.0),
            Vec2::new(150.0, 480.0),
            Vec2::new(200.0, 520.0),
        ])
        .unwrap();
        assert_eq!(profile.flat_runs(), vec![(1, 3)]);
        assert_eq!(profile.nearest_pad(400.0), Some(100.0));
    }

    #[test]
    fn test_nearest_pad_picks_closest_run() {
        let profile = TerrainProfile::from_points(vec![
            Vec2::new(0.0, 500.0),
            Vec2::new(100.0, 500.0),
            Vec2::new(300.0, 450.0),
            Vec2::new(600.0, 520.0),
            Vec2::new(700.0, 520.0),
            Vec2::new(800.0, 470.0),
        ])
        .unwrap();
        assert_eq!(profile.nearest_pad(200.0), Some(50.0));
        assert_eq!(profile.nearest_pad(500.0), Some(650.0));

        let slope = TerrainProfile::from_points(vec![
            Vec2::new(0.0, 500.0),
            Vec2::new(800.0, 450.0),
        ])
        .unwrap();
        assert_eq!(slope.nearest_pad(400.0), None);
    }
}
