use log::debug;
use once_cell::sync::Lazy;
use rand::distr::Uniform;
use rand::seq::SliceRandom;
use rand_distr::Distribution;
use wasm_bindgen::prelude::*;

/// Scan timeline parameters
pub mod defaults {
    /// Cadence of the progress timer.
    pub const SCAN_TICK_MS: u32 = 500;
    /// Progress added per tick.
    pub const PROGRESS_STEP: u32 = 10;
    /// Progress value at which a scan is complete.
    pub const PROGRESS_COMPLETE: u32 = 100;
}

/// Which visual surface the viewport shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Live rear-camera feed.
    Camera,
    /// Static uploaded image drawn onto the canvas.
    Upload,
}

/// Current phase of the scan state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    Idle,
    Scanning,
}

/// Progress state machine for one scan run: Idle -> Scanning -> Idle.
///
/// The timeline is deliberately timer-free; the caller drives it by
/// invoking [`ScanTimeline::tick`] at whatever cadence it owns. This keeps
/// the sequence testable without waiting on real timers.
#[derive(Debug)]
pub struct ScanTimeline {
    phase: ScanPhase,
    percent: u32,
}

impl ScanTimeline {
    pub fn new() -> Self {
        Self {
            phase: ScanPhase::Idle,
            percent: 0,
        }
    }

    /// Start a new run. Returns `false` (and changes nothing) if a run is
    /// already in progress, so overlapping scans cannot be started.
    pub fn begin(&mut self) -> bool {
        if self.phase == ScanPhase::Scanning {
            debug!("scan already running, begin ignored");
            return false;
        }
        self.phase = ScanPhase::Scanning;
        self.percent = 0;
        true
    }

    /// Advance one step and return the new progress percentage.
    ///
    /// Reaching [`defaults::PROGRESS_COMPLETE`] flips the phase back to
    /// Idle so the next `begin` is accepted. Ticks while idle are no-ops.
    pub fn tick(&mut self) -> u32 {
        if self.phase == ScanPhase::Scanning {
            self.percent =
                (self.percent + defaults::PROGRESS_STEP).min(defaults::PROGRESS_COMPLETE);
            if self.percent >= defaults::PROGRESS_COMPLETE {
                self.phase = ScanPhase::Idle;
            }
        }
        self.percent
    }

    pub fn percent(&self) -> u32 {
        self.percent
    }

    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    pub fn is_scanning(&self) -> bool {
        self.phase == ScanPhase::Scanning
    }
}

impl Default for ScanTimeline {
    fn default() -> Self {
        Self::new()
    }
}

// Candidate item names per detection category. Reference data, never
// mutated at runtime.
pub const PRECIOUS_METALS: &[&str] = &["ذهب", "فضة", "بلاتين", "روديوم", "إيريديوم", "نحاس"];

pub const GEMSTONES: &[&str] = &[
    "ألماس", "ياقوت", "زمرد", "زفير", "عقيق", "فيروز", "جمشت", "توباز", "أوبال", "لازورد",
];

pub const METEORITES: &[&str] = &[
    "نيازك حديدية (Iron)",
    "نيازك صخرية (Chondrite)",
    "بالاسيت (Pallasite)",
    "مؤشر إيريديوم",
    "زجاج ليبي",
];

// Magnitude ranges: percentage readings span 0-2, everything else 0-0.5.
static PERCENT_MAGNITUDE: Lazy<Uniform<f64>> =
    Lazy::new(|| Uniform::new(0.0, 2.0).expect("static non-empty range"));
static DENSITY_MAGNITUDE: Lazy<Uniform<f64>> =
    Lazy::new(|| Uniform::new(0.0, 0.5).expect("static non-empty range"));

/// Detection category shown as one list in the HUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Category {
    PreciousMetals,
    Gemstones,
    Meteorites,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::PreciousMetals,
        Category::Gemstones,
        Category::Meteorites,
    ];

    /// Catalog of candidate names for this category.
    pub fn names(self) -> &'static [&'static str] {
        match self {
            Category::PreciousMetals => PRECIOUS_METALS,
            Category::Gemstones => GEMSTONES,
            Category::Meteorites => METEORITES,
        }
    }

    /// How many entries one scan reports for this category.
    pub fn pick_count(self) -> usize {
        match self {
            Category::PreciousMetals => 3,
            Category::Gemstones => 4,
            Category::Meteorites => 2,
        }
    }

    /// Unit suffix appended to the rendered magnitude.
    pub fn unit(self) -> &'static str {
        match self {
            Category::PreciousMetals => "%",
            Category::Gemstones => " قيراط/م³",
            Category::Meteorites => " مؤشر",
        }
    }

    fn magnitude_dist(self) -> &'static Uniform<f64> {
        match self {
            Category::PreciousMetals => &PERCENT_MAGNITUDE,
            Category::Gemstones => &DENSITY_MAGNITUDE,
            Category::Meteorites => &DENSITY_MAGNITUDE,
        }
    }

    /// Upper bound of the magnitude range (exclusive).
    pub fn magnitude_cap(self) -> f64 {
        match self {
            Category::PreciousMetals => 2.0,
            Category::Gemstones | Category::Meteorites => 0.5,
        }
    }
}

/// One generated (name, magnitude, unit) reading shown after a scan.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResultEntry {
    pub name: String,
    pub magnitude: f64,
    pub unit: String,
}

impl ResultEntry {
    /// Magnitude with exactly three fractional digits plus the unit suffix.
    pub fn display_value(&self) -> String {
        format!("{:.3}{}", self.magnitude, self.unit)
    }
}

/// Fabricated subsurface-cavity annotation overlaid on the viewport.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnomalyMarker {
    pub label: String,
    pub depth_text: String,
    pub summary: String,
    pub top_pct: f64,
    pub left_pct: f64,
    pub width_px: u32,
    pub height_px: u32,
}

impl AnomalyMarker {
    /// The fixed cavity marker every scan reports in this version.
    pub fn cavity() -> Self {
        Self {
            label: "تجويف محتمل".to_string(),
            depth_text: "العمق: 4م".to_string(),
            summary: "تجويف على عمق 4م".to_string(),
            top_pct: 55.0,
            left_pct: 40.0,
            width_px: 150,
            height_px: 100,
        }
    }
}

/// Everything one completed scan produces. Replaced wholesale at the next
/// scan start; nothing is persisted.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScanReport {
    pub precious_metals: Vec<ResultEntry>,
    pub gemstones: Vec<ResultEntry>,
    pub meteorites: Vec<ResultEntry>,
    pub anomaly: AnomalyMarker,
}

impl ScanReport {
    pub fn entries(&self, category: Category) -> &[ResultEntry] {
        match category {
            Category::PreciousMetals => &self.precious_metals,
            Category::Gemstones => &self.gemstones,
            Category::Meteorites => &self.meteorites,
        }
    }
}

/// Draw a random subset of the category's catalog and attach magnitudes.
///
/// Selection is a Fisher-Yates shuffle over the whole catalog followed by
/// a truncation to the category's pick count, so no name repeats within a
/// single scan. Passing a seeded RNG reproduces the same entries.
pub fn select_entries(category: Category, rng: &mut impl rand::Rng) -> Vec<ResultEntry> {
    let mut pool: Vec<&'static str> = category.names().to_vec();
    pool.shuffle(rng);
    pool.truncate(category.pick_count());

    let dist = category.magnitude_dist();
    pool.into_iter()
        .map(|name| ResultEntry {
            name: name.to_string(),
            magnitude: dist.sample(rng),
            unit: category.unit().to_string(),
        })
        .collect()
}

/// Generate the full result set for one completed scan.
///
/// # Arguments
/// * `rng` - Random source driving selection and magnitudes. The UI passes
///   `rand::rng()`; tests pass a seeded `StdRng` for reproducible reports.
pub fn generate_report(rng: &mut impl rand::Rng) -> ScanReport {
    let report = ScanReport {
        precious_metals: select_entries(Category::PreciousMetals, rng),
        gemstones: select_entries(Category::Gemstones, rng),
        meteorites: select_entries(Category::Meteorites, rng),
        anomaly: AnomalyMarker::cavity(),
    };
    debug!(
        "generated report: {} metals, {} gemstones, {} meteorite indicators",
        report.precious_metals.len(),
        report.gemstones.len(),
        report.meteorites.len()
    );
    report
}

/// Entry point for JavaScript callers (the static report page).
///
/// Returns a freshly generated report serialized across the JS/WASM
/// boundary, or `null` if serialization fails.
#[wasm_bindgen]
pub fn generate_report_js() -> JsValue {
    let report = generate_report(&mut rand::rng());
    serde_wasm_bindgen::to_value(&report).unwrap_or(JsValue::NULL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn report_has_fixed_counts_per_category() {
        let report = generate_report(&mut rng(7));
        assert_eq!(report.precious_metals.len(), 3);
        assert_eq!(report.gemstones.len(), 4);
        assert_eq!(report.meteorites.len(), 2);
    }

    #[test]
    fn no_duplicate_names_within_a_category() {
        for seed in 0..50 {
            let report = generate_report(&mut rng(seed));
            for category in Category::ALL {
                let names: HashSet<&str> = report
                    .entries(category)
                    .iter()
                    .map(|e| e.name.as_str())
                    .collect();
                assert_eq!(names.len(), category.pick_count(), "seed {seed}");
            }
        }
    }

    #[test]
    fn selected_names_come_from_the_catalog() {
        let report = generate_report(&mut rng(11));
        for category in Category::ALL {
            for entry in report.entries(category) {
                assert!(category.names().contains(&entry.name.as_str()));
                assert_eq!(entry.unit, category.unit());
            }
        }
    }

    #[test]
    fn magnitudes_stay_inside_the_category_range() {
        for seed in 0..100 {
            let report = generate_report(&mut rng(seed));
            for category in Category::ALL {
                for entry in report.entries(category) {
                    assert!(
                        entry.magnitude >= 0.0 && entry.magnitude < category.magnitude_cap(),
                        "seed {seed}: {} out of range for {:?}",
                        entry.magnitude,
                        category
                    );
                }
            }
        }
    }

    #[test]
    fn display_value_renders_three_fractional_digits() {
        let entry = ResultEntry {
            name: "ذهب".to_string(),
            magnitude: 1.23456,
            unit: "%".to_string(),
        };
        assert_eq!(entry.display_value(), "1.235%");

        let entry = ResultEntry {
            name: "ألماس".to_string(),
            magnitude: 0.5,
            unit: " قيراط/م³".to_string(),
        };
        assert_eq!(entry.display_value(), "0.500 قيراط/م³");
    }

    #[test]
    fn seeded_rng_reproduces_the_same_report() {
        let first = generate_report(&mut rng(42));
        let second = generate_report(&mut rng(42));
        assert_eq!(first, second);
    }

    #[test]
    fn anomaly_marker_carries_the_fixed_cavity_values() {
        let marker = AnomalyMarker::cavity();
        assert_eq!(marker.label, "تجويف محتمل");
        assert_eq!(marker.summary, "تجويف على عمق 4م");
        assert_eq!((marker.top_pct, marker.left_pct), (55.0, 40.0));
        assert_eq!((marker.width_px, marker.height_px), (150, 100));
    }

    #[test]
    fn report_serializes_with_stable_field_names() {
        // report.html reads these fields by name.
        let json = serde_json::to_value(generate_report(&mut rng(3))).unwrap();
        assert!(json.get("precious_metals").is_some());
        assert!(json.get("gemstones").is_some());
        assert!(json.get("meteorites").is_some());
        assert_eq!(json["anomaly"]["label"], "تجويف محتمل");
    }

    #[test]
    fn timeline_completes_after_exactly_ten_ticks() {
        let mut timeline = ScanTimeline::new();
        assert!(timeline.begin());
        for expected in 1..=9 {
            assert_eq!(timeline.tick(), expected * defaults::PROGRESS_STEP);
            assert!(timeline.is_scanning());
        }
        assert_eq!(timeline.tick(), defaults::PROGRESS_COMPLETE);
        assert_eq!(timeline.phase(), ScanPhase::Idle);
    }

    #[test]
    fn begin_while_scanning_is_a_noop() {
        let mut timeline = ScanTimeline::new();
        assert!(timeline.begin());
        timeline.tick();
        assert!(!timeline.begin());
        // Progress was not reset by the rejected begin.
        assert_eq!(timeline.percent(), defaults::PROGRESS_STEP);
    }

    #[test]
    fn timeline_accepts_a_new_run_after_completion() {
        let mut timeline = ScanTimeline::new();
        assert!(timeline.begin());
        while timeline.is_scanning() {
            timeline.tick();
        }
        assert!(timeline.begin());
        assert_eq!(timeline.percent(), 0);
    }

    #[test]
    fn ticks_while_idle_change_nothing() {
        let mut timeline = ScanTimeline::new();
        assert_eq!(timeline.tick(), 0);
        assert_eq!(timeline.phase(), ScanPhase::Idle);
    }
}
