//! Terrain sampling
//!
//! The building core never generates terrain; it only asks for ground
//! height and the water plane through [`Terrain`]. A `None` height means
//! the point is off-map and must be treated as invalid ground.

/// Ground elevation and water plane queries.
pub trait Terrain {
    /// Ground height at (x, z), or `None` when off-map/unavailable.
    fn height_at(&self, x: f32, z: f32) -> Option<f32>;

    /// Height of the world water plane.
    fn water_level(&self) -> f32;
}

/// Level ground at a constant height, optionally bounded to a square map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlatTerrain {
    pub height: f32,
    pub water_level: f32,
    /// Map bounds (-half_extent to +half_extent); `None` is unbounded
    pub half_extent: Option<f32>,
}

impl FlatTerrain {
    pub fn new(height: f32, water_level: f32) -> Self {
        Self {
            height,
            water_level,
            half_extent: None,
        }
    }

    pub fn bounded(height: f32, water_level: f32, half_extent: f32) -> Self {
        Self {
            height,
            water_level,
            half_extent: Some(half_extent),
        }
    }
}

impl Terrain for FlatTerrain {
    fn height_at(&self, x: f32, z: f32) -> Option<f32> {
        match self.half_extent {
            Some(bounds) if x.abs() > bounds || z.abs() > bounds => None,
            _ => Some(self.height),
        }
    }

    fn water_level(&self) -> f32 {
        self.water_level
    }
}

/// Regular grid of height samples with bilinear interpolation.
///
/// Sample `(i, j)` sits at `origin + (i * spacing, j * spacing)` in XZ.
#[derive(Clone, Debug)]
pub struct HeightmapTerrain {
    origin_x: f32,
    origin_z: f32,
    spacing: f32,
    columns: usize,
    rows: usize,
    heights: Vec<f32>,
    water_level: f32,
}

impl HeightmapTerrain {
    /// Build from row-major samples (`rows` rows of `columns` heights).
    ///
    /// Returns `None` when the sample count does not match the dimensions,
    /// the grid is smaller than 2x2 or the spacing is not positive.
    pub fn new(
        origin_x: f32,
        origin_z: f32,
        spacing: f32,
        columns: usize,
        rows: usize,
        heights: Vec<f32>,
        water_level: f32,
    ) -> Option<Self> {
        if columns < 2 || rows < 2 || heights.len() != columns * rows || spacing <= 0.0 {
            return None;
        }
        Some(Self {
            origin_x,
            origin_z,
            spacing,
            columns,
            rows,
            heights,
            water_level,
        })
    }

    /// Sample `height_fn(x, z)` on a grid.
    pub fn from_fn(
        origin_x: f32,
        origin_z: f32,
        spacing: f32,
        columns: usize,
        rows: usize,
        water_level: f32,
        height_fn: impl Fn(f32, f32) -> f32,
    ) -> Option<Self> {
        let mut heights = Vec::with_capacity(columns * rows);
        for j in 0..rows {
            for i in 0..columns {
                let x = origin_x + i as f32 * spacing;
                let z = origin_z + j as f32 * spacing;
                heights.push(height_fn(x, z));
            }
        }
        Self::new(origin_x, origin_z, spacing, columns, rows, heights, water_level)
    }

    fn sample(&self, i: usize, j: usize) -> f32 {
        self.heights[j * self.columns + i]
    }
}

impl Terrain for HeightmapTerrain {
    fn height_at(&self, x: f32, z: f32) -> Option<f32> {
        let gx = (x - self.origin_x) / self.spacing;
        let gz = (z - self.origin_z) / self.spacing;
        let max_x = (self.columns - 1) as f32;
        let max_z = (self.rows - 1) as f32;
        if !(0.0..=max_x).contains(&gx) || !(0.0..=max_z).contains(&gz) {
            return None;
        }

        let i0 = (gx.floor() as usize).min(self.columns - 2);
        let j0 = (gz.floor() as usize).min(self.rows - 2);
        let tx = gx - i0 as f32;
        let tz = gz - j0 as f32;

        let h00 = self.sample(i0, j0);
        let h10 = self.sample(i0 + 1, j0);
        let h01 = self.sample(i0, j0 + 1);
        let h11 = self.sample(i0 + 1, j0 + 1);

        let near = h00 + (h10 - h00) * tx;
        let far = h01 + (h11 - h01) * tx;
        let height = near + (far - near) * tz;
        height.is_finite().then_some(height)
    }

    fn water_level(&self) -> f32 {
        self.water_level
    }
}
