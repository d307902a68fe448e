use serde::{Deserialize, Serialize};

/// Identifier grouping samples into a track.
///
/// Unique within one dataset export, not globally unique across datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TrackId(u64);

impl TrackId {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

/// Identifier of a cell instance at one timepoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectId(u64);

impl ObjectId {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

/// Cluster label marking a sample outside every region of interest.
pub const CLUSTER_OUTSIDE: i64 = -1;

/// One measurement of one cell at one timepoint within one track.
///
/// Rows of a track are totally ordered by `time` after a stable sort; equal
/// timestamps preserve input order. `step_length` is the per-step path length
/// contribution exported by the instrument; when absent it is derived from
/// consecutive position differences during enrichment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRow {
    /// Track the sample belongs to.
    pub track_id: TrackId,
    /// Cell instance observed at this timepoint.
    pub object_id: ObjectId,
    /// Time index of the sample; not necessarily contiguous.
    pub time: f64,
    /// Spatial coordinates (x, y, z).
    pub position: [f64; 3],
    /// Per-step path length contribution, when exported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_length: Option<f64>,
    /// Squared net displacement from the track start.
    pub displacement_sq: f64,
    /// Instantaneous speed, same units as displacement per time.
    pub speed: f64,
    /// Elapsed time since the track's first sample.
    pub track_time: f64,
    /// Integer cluster membership; [`CLUSTER_OUTSIDE`] means no cluster.
    pub cluster_label: i64,
}

impl SampleRow {
    /// Returns 1 when the sample lies inside any cluster region, else 0.
    pub fn cluster_in(&self) -> u32 {
        u32::from(self.cluster_label != CLUSTER_OUTSIDE)
    }
}
