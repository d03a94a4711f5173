//! Read-only data exchanged with the model and tracer collaborators
//!
//! - [`AquiferData`]: layer stack and per-layer parameters
//! - [`Pathline`]: one traced particle path with layer occupancy
//! - [`TraceResult`]: plain or metadata-rich tracer output

use std::fmt;

// =================================================================================================
// Discriminators
// =================================================================================================

/// Kind of layer in the stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerType {
    /// Layer with lateral flow (`'a'`)
    Aquifer,
    /// Confining layer with vertical resistance (`'l'`)
    Leaky,
}

impl LayerType {
    /// Parse a layer-type code string such as `"laal"`
    pub fn parse_codes(codes: &str) -> Result<Vec<LayerType>, String> {
        codes
            .chars()
            .map(|c| match c {
                'a' => Ok(LayerType::Aquifer),
                'l' => Ok(LayerType::Leaky),
                other => Err(format!("unknown layer type code '{other}', expected 'a' or 'l'")),
            })
            .collect()
    }
}

/// Time behaviour of the model (`model_type`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelType {
    Steady,
    Transient,
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelType::Steady => write!(f, "steady"),
            ModelType::Transient => write!(f, "transient"),
        }
    }
}

/// Model variant, fixed when the model is constructed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelVariant {
    /// Stack of aquifers and leaky layers (Maq-style)
    #[default]
    MultiLayer,
    /// Aquifer subdivided into layers with vertical anisotropy
    ThreeD,
    /// Single-column stack of strip inhomogeneities (1D cross-section model)
    CrossSection,
}

// =================================================================================================
// Aquifer data
// =================================================================================================

/// Layer stack and parameters of an aquifer system
///
/// # Indexing conventions
///
/// - `z` holds the `nlayers + 1` layer boundaries, top first, strictly decreasing.
/// - `kaq`, `kzoverkh` and `saq` are indexed by aquifer number.
/// - `c` and `sll` are indexed by leaky-layer number. Leaky layer `i` sits on
///   top of aquifer `i`, so when the stack starts with an aquifer the first
///   leaky layer in the stack is number 1 and entry 0 belongs to the
///   (absent) layer above the top aquifer.
///
/// # Example
///
/// ```rust
/// use aquiplot::model::AquiferData;
///
/// let aq = AquiferData::new("aala", vec![10.0, 0.0, -10.0, -12.0, -20.0], vec![5.0, 10.0, 2.0], vec![0.0, 0.0, 100.0])
///     .unwrap()
///     .with_storage(vec![0.1, 1e-4, 1e-4], vec![0.0, 0.0, 1e-5])
///     .unwrap();
/// assert_eq!(aq.naq(), 3);
/// assert_eq!(aq.nlayers(), 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AquiferData {
    ltype: Vec<LayerType>,
    z: Vec<f64>,
    kaq: Vec<f64>,
    kzoverkh: Vec<f64>,
    c: Vec<f64>,
    saq: Vec<f64>,
    sll: Vec<f64>,
    phreatictop: bool,
    layernumber: Vec<usize>,
}

impl AquiferData {
    /// Create a layer stack from layer-type codes and steady parameters
    ///
    /// # Errors
    ///
    /// Returns `Err` if the codes are invalid, `z` is not strictly decreasing
    /// with `nlayers + 1` entries, `kaq` does not hold one value per aquifer,
    /// or `c` is too short for the leaky layers in the stack.
    pub fn new(ltype: &str, z: Vec<f64>, kaq: Vec<f64>, c: Vec<f64>) -> Result<Self, String> {
        let ltype = LayerType::parse_codes(ltype)?;
        Self::from_layers(ltype, z, kaq, c)
    }

    /// Same as [`AquiferData::new`] with already parsed layer types
    pub fn from_layers(ltype: Vec<LayerType>, z: Vec<f64>, kaq: Vec<f64>, c: Vec<f64>) -> Result<Self, String> {
        if ltype.is_empty() {
            return Err("aquifer system must have at least one layer".to_string());
        }
        if z.len() != ltype.len() + 1 {
            return Err(format!(
                "expected {} layer boundaries for {} layers, got {}",
                ltype.len() + 1,
                ltype.len(),
                z.len()
            ));
        }
        if let Some(w) = z.windows(2).find(|w| !(w[0] > w[1])) {
            return Err(format!(
                "layer boundaries must be strictly decreasing, found {} above {}",
                w[0], w[1]
            ));
        }

        let naq = ltype.iter().filter(|t| **t == LayerType::Aquifer).count();
        if naq == 0 {
            return Err("aquifer system must contain at least one aquifer layer".to_string());
        }
        if kaq.len() != naq {
            return Err(format!("kaq must have {naq} values, got {}", kaq.len()));
        }

        let layernumber = number_layers(&ltype);
        let needed_c = ltype
            .iter()
            .zip(&layernumber)
            .filter(|(t, _)| **t == LayerType::Leaky)
            .map(|(_, n)| n + 1)
            .max()
            .unwrap_or(0);
        if c.len() < needed_c {
            return Err(format!("c must have at least {needed_c} values, got {}", c.len()));
        }

        Ok(Self {
            ltype,
            z,
            kaq,
            kzoverkh: vec![1.0; naq],
            c,
            saq: Vec::new(),
            sll: Vec::new(),
            phreatictop: false,
            layernumber,
        })
    }

    /// Attach transient storage parameters
    ///
    /// `saq` holds one value per aquifer, `sll` one value per entry of `c`.
    pub fn with_storage(mut self, saq: Vec<f64>, sll: Vec<f64>) -> Result<Self, String> {
        if saq.len() != self.naq() {
            return Err(format!("saq must have {} values, got {}", self.naq(), saq.len()));
        }
        if sll.len() != self.c.len() {
            return Err(format!("sll must have {} values, got {}", self.c.len(), sll.len()));
        }
        self.saq = saq;
        self.sll = sll;
        Ok(self)
    }

    /// Attach vertical anisotropy ratios (one per aquifer)
    pub fn with_kzoverkh(mut self, kzoverkh: Vec<f64>) -> Result<Self, String> {
        if kzoverkh.len() != self.naq() {
            return Err(format!("kzoverkh must have {} values, got {}", self.naq(), kzoverkh.len()));
        }
        self.kzoverkh = kzoverkh;
        Ok(self)
    }

    /// Flag the top aquifer as phreatic
    pub fn with_phreatictop(mut self, phreatictop: bool) -> Self {
        self.phreatictop = phreatictop;
        self
    }

    pub fn ltype(&self) -> &[LayerType] {
        &self.ltype
    }

    pub fn z(&self) -> &[f64] {
        &self.z
    }

    pub fn nlayers(&self) -> usize {
        self.ltype.len()
    }

    pub fn naq(&self) -> usize {
        self.kaq.len()
    }

    pub fn kaq(&self) -> &[f64] {
        &self.kaq
    }

    pub fn kzoverkh(&self) -> &[f64] {
        &self.kzoverkh
    }

    pub fn c(&self) -> &[f64] {
        &self.c
    }

    pub fn saq(&self) -> &[f64] {
        &self.saq
    }

    pub fn sll(&self) -> &[f64] {
        &self.sll
    }

    pub fn phreatictop(&self) -> bool {
        self.phreatictop
    }

    /// Model top elevation
    pub fn top(&self) -> f64 {
        self.z[0]
    }

    /// Model base elevation
    pub fn bottom(&self) -> f64 {
        self.z[self.z.len() - 1]
    }

    /// Number of layer `layer` within its own type (aquifer or leaky numbering)
    pub fn layernumber(&self, layer: usize) -> Option<usize> {
        self.layernumber.get(layer).copied()
    }

    /// Top elevation of each aquifer
    pub fn zaqtop(&self) -> Vec<f64> {
        self.aquifer_layers().map(|i| self.z[i]).collect()
    }

    /// Bottom elevation of each aquifer
    pub fn zaqbot(&self) -> Vec<f64> {
        self.aquifer_layers().map(|i| self.z[i + 1]).collect()
    }

    fn aquifer_layers(&self) -> impl Iterator<Item = usize> + '_ {
        self.ltype
            .iter()
            .enumerate()
            .filter(|(_, t)| **t == LayerType::Aquifer)
            .map(|(i, _)| i)
    }
}

/// Ordinal of each layer within its own type
///
/// Leaky layers follow the same leading-layer convention as the
/// cross-section labels: numbering starts at 1 when the stack starts with an
/// aquifer.
fn number_layers(ltype: &[LayerType]) -> Vec<usize> {
    let mut aquifer = 0;
    let mut leaky = usize::from(ltype.first() == Some(&LayerType::Aquifer));
    ltype
        .iter()
        .map(|t| match t {
            LayerType::Aquifer => {
                aquifer += 1;
                aquifer - 1
            }
            LayerType::Leaky => {
                leaky += 1;
                leaky - 1
            }
        })
        .collect()
}

// =================================================================================================
// Pathlines
// =================================================================================================

/// One sample of a traced path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub t: f64,
}

impl From<[f64; 4]> for PathSample {
    fn from(v: [f64; 4]) -> Self {
        Self { x: v[0], y: v[1], z: v[2], t: v[3] }
    }
}

/// Immutable traced path with the layer occupied at every sample
#[derive(Debug, Clone, PartialEq)]
pub struct Pathline {
    samples: Vec<PathSample>,
    layers: Vec<usize>,
}

impl Pathline {
    /// # Errors
    ///
    /// Returns `Err` if `samples` and `layers` differ in length.
    pub fn new(samples: Vec<PathSample>, layers: Vec<usize>) -> Result<Self, String> {
        if samples.len() != layers.len() {
            return Err(format!(
                "pathline has {} samples but {} layer indices",
                samples.len(),
                layers.len()
            ));
        }
        Ok(Self { samples, layers })
    }

    pub fn samples(&self) -> &[PathSample] {
        &self.samples
    }

    pub fn layers(&self) -> &[usize] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of segments joining consecutive samples
    pub fn segment_count(&self) -> usize {
        self.samples.len().saturating_sub(1)
    }
}

/// Tracer output with termination metadata
#[derive(Debug, Clone, PartialEq)]
pub struct TraceRecord {
    pub pathline: Pathline,
    /// Tracer-specific termination code
    pub status: i32,
    pub message: String,
    pub complete: bool,
}

/// Result of one single-pathline trace
#[derive(Debug, Clone, PartialEq)]
pub enum TraceResult {
    /// Samples and layer occupancy only
    Plain(Pathline),
    /// Samples plus termination metadata
    Detailed(TraceRecord),
}

impl TraceResult {
    pub fn pathline(&self) -> &Pathline {
        match self {
            TraceResult::Plain(p) => p,
            TraceResult::Detailed(r) => &r.pathline,
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_codes() {
        let t = LayerType::parse_codes("ala").unwrap();
        assert_eq!(t, vec![LayerType::Aquifer, LayerType::Leaky, LayerType::Aquifer]);
        assert!(LayerType::parse_codes("axl").is_err());
    }

    #[test]
    fn test_aquifer_data_derived_quantities() {
        let aq = AquiferData::new("ala", vec![10.0, 0.0, -2.0, -20.0], vec![5.0, 10.0], vec![0.0, 100.0]).unwrap();
        assert_eq!(aq.naq(), 2);
        assert_eq!(aq.nlayers(), 3);
        assert_eq!(aq.zaqtop(), vec![10.0, -2.0]);
        assert_eq!(aq.zaqbot(), vec![0.0, -20.0]);
        assert_eq!(aq.layernumber(0), Some(0));
        assert_eq!(aq.layernumber(1), Some(1)); // leaky numbering starts at 1 under a top aquifer
        assert_eq!(aq.layernumber(2), Some(1));
        assert_eq!(aq.top(), 10.0);
        assert_eq!(aq.bottom(), -20.0);
        assert_eq!(aq.kzoverkh(), &[1.0, 1.0]);
    }

    #[test]
    fn test_leaky_top_numbering() {
        let aq = AquiferData::new("lala", vec![12.0, 10.0, 0.0, -2.0, -20.0], vec![5.0, 10.0], vec![10.0, 100.0])
            .unwrap();
        assert_eq!(aq.layernumber(0), Some(0));
        assert_eq!(aq.layernumber(2), Some(1));
    }

    #[test]
    fn test_rejects_non_decreasing_z() {
        let err = AquiferData::new("aa", vec![0.0, 5.0, -5.0], vec![1.0, 1.0], vec![0.0, 0.0]).unwrap_err();
        assert!(err.contains("strictly decreasing"));
    }

    #[test]
    fn test_rejects_wrong_kaq_length() {
        assert!(AquiferData::new("aa", vec![0.0, -5.0, -10.0], vec![1.0], vec![0.0, 0.0]).is_err());
    }

    #[test]
    fn test_rejects_short_c() {
        // "ala" needs c[1] for the leaky layer
        assert!(AquiferData::new("ala", vec![10.0, 0.0, -2.0, -20.0], vec![5.0, 10.0], vec![0.0]).is_err());
    }

    #[test]
    fn test_storage_lengths_checked() {
        let aq = AquiferData::new("a", vec![0.0, -10.0], vec![1.0], vec![0.0]).unwrap();
        assert!(aq.clone().with_storage(vec![1e-4, 1e-4], vec![0.0]).is_err());
        assert!(aq.with_storage(vec![1e-4], vec![0.0]).is_ok());
    }

    #[test]
    fn test_pathline_length_mismatch() {
        let samples = vec![PathSample::from([0.0, 0.0, 0.0, 0.0]), PathSample::from([1.0, 0.0, 0.0, 1.0])];
        assert!(Pathline::new(samples.clone(), vec![0]).is_err());
        let p = Pathline::new(samples, vec![0, 0]).unwrap();
        assert_eq!(p.segment_count(), 1);
    }
}
