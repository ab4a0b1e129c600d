//! The garden grid: planting, watering, daily growth, and harvest.
//!
//! Each plot holds at most one crop. Growth is measured as a progress
//! fraction in `[0, 1]` that advances once per day by
//! `1 / days_to_grow`, scaled by the day's weather and a companion bonus.
//! Stages follow from fixed progress thresholds, and reaching the last
//! threshold only makes a crop eligible for harvest.
//!
//! Care is tracked as a quality score that accumulates every growing day,
//! so the tier rolled at harvest reflects the whole season rather than the
//! final day.

use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use willowbrook_types::{GardenWeather, GrowthStage, QualityTier, Season, SoilType, WeatherState};

use crate::crops::{CropType, are_companions, find_crop};
use crate::error::WorldError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Progress at which each stage begins.
const STAGE_THRESHOLDS: [(f64, GrowthStage); 5] = [
    (0.0, GrowthStage::Seed),
    (0.15, GrowthStage::Sprout),
    (0.40, GrowthStage::Growing),
    (0.70, GrowthStage::Flowering),
    (1.0, GrowthStage::Harvestable),
];

/// Tolerance for accumulated floating-point growth.
const PROGRESS_EPSILON: f64 = 1e-9;

/// Quality score lost to a frost by a crop that is not winter-hardy.
const FROST_DAMAGE: f64 = 2.0;

/// A frost-damaged crop dies once its score falls below this.
const FROST_KILL_SCORE: f64 = -5.0;

/// Stage a crop's progress corresponds to.
fn stage_for(progress: f64) -> GrowthStage {
    STAGE_THRESHOLDS
        .iter()
        .take_while(|(threshold, _)| progress + PROGRESS_EPSILON >= *threshold)
        .last()
        .map_or(GrowthStage::Seed, |(_, stage)| *stage)
}

/// How fast crops grow under the day's weather.
const fn growth_multiplier(weather: GardenWeather) -> f64 {
    match weather {
        GardenWeather::Sunny => 1.0,
        GardenWeather::Rainy => 1.3,
        GardenWeather::Stormy => 0.7,
        GardenWeather::Frost => 0.3,
        GardenWeather::Magical => 1.5,
    }
}

/// How the day's weather adds to accumulated care.
const fn quality_modifier(weather: GardenWeather) -> f64 {
    match weather {
        GardenWeather::Sunny => 0.5,
        GardenWeather::Rainy => 0.8,
        GardenWeather::Stormy => -0.5,
        GardenWeather::Frost => -1.0,
        GardenWeather::Magical => 2.0,
    }
}

// ---------------------------------------------------------------------------
// Tuning
// ---------------------------------------------------------------------------

/// Tunable constants for the garden.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GardenTuning {
    /// Grid height.
    pub rows: usize,
    /// Grid width.
    pub cols: usize,
    /// Consecutive dry growing days tolerated before a crop may wither.
    pub neglect_days: u32,
    /// Chance per further dry day that a neglected crop withers.
    pub neglect_wither_chance: f64,
    /// Growth bonus fraction for a crop with an adjacent companion.
    pub companion_bonus: f64,
    /// Total harvests a regrowing crop gives before it is spent.
    pub max_harvests: u32,
}

impl Default for GardenTuning {
    fn default() -> Self {
        Self {
            rows: 4,
            cols: 6,
            neglect_days: 6,
            neglect_wither_chance: 0.35,
            companion_bonus: 0.15,
            max_harvests: 4,
        }
    }
}

// ---------------------------------------------------------------------------
// GardenPlot
// ---------------------------------------------------------------------------

/// A single tile of the garden.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GardenPlot {
    /// Row in the grid.
    pub row: usize,
    /// Column in the grid.
    pub col: usize,
    /// Soil of the plot.
    pub soil: SoilType,
    /// The crop planted here, if any.
    pub crop: Option<&'static CropType>,
    /// Current growth stage.
    pub stage: GrowthStage,
    /// Growth from seed (0.0) to harvestable (1.0).
    pub progress: f64,
    /// Days since planting.
    pub days_planted: u32,
    /// Whether the plot has been watered today.
    pub watered_today: bool,
    /// Consecutive growing days without water.
    pub dry_days: u32,
    /// Accumulated care.
    pub quality_score: f64,
    /// Harvests taken from the current planting.
    pub harvests_taken: u32,
}

impl GardenPlot {
    /// An empty plot.
    const fn empty(row: usize, col: usize, soil: SoilType) -> Self {
        Self {
            row,
            col,
            soil,
            crop: None,
            stage: GrowthStage::Seed,
            progress: 0.0,
            days_planted: 0,
            watered_today: false,
            dry_days: 0,
            quality_score: 0.0,
            harvests_taken: 0,
        }
    }

    /// Whether nothing is planted.
    pub const fn is_empty(&self) -> bool {
        self.crop.is_none()
    }

    /// Whether a living crop is planted.
    pub fn is_alive(&self) -> bool {
        self.crop.is_some() && self.stage != GrowthStage::Withered
    }

    /// Whether the crop is ready to pick.
    pub fn is_harvestable(&self) -> bool {
        self.crop.is_some() && self.stage == GrowthStage::Harvestable
    }

    /// Return the plot to bare soil.
    fn reset(&mut self) {
        *self = Self::empty(self.row, self.col, self.soil);
    }

    /// Kill the crop. It stays in the plot until cleared.
    fn wither(&mut self) {
        self.stage = GrowthStage::Withered;
        self.watered_today = false;
    }

    /// Water the crop for today.
    fn take_water(&mut self, by_hand: bool) {
        self.watered_today = true;
        self.dry_days = 0;
        if by_hand {
            self.quality_score += 1.0;
        }
    }
}

// ---------------------------------------------------------------------------
// Harvest
// ---------------------------------------------------------------------------

/// Produce picked from a ripe plot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Harvest {
    /// Crop name.
    pub crop: String,
    /// Quality tier.
    pub quality: QualityTier,
    /// Units picked.
    pub quantity: u32,
    /// Catalogue price of one normal-quality unit.
    pub base_price: Decimal,
}

impl Harvest {
    /// Catalogue value of the whole harvest at its quality.
    pub fn value(&self) -> Decimal {
        self.base_price
            .saturating_mul(self.quality.price_multiplier())
            .saturating_mul(Decimal::from(self.quantity))
            .round_dp(2)
    }
}

impl std::fmt::Display for Harvest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x {} {} (worth {} coins)",
            self.quantity,
            self.quality,
            self.crop,
            self.value()
        )
    }
}

/// A crop that became harvestable during the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RipenedCrop {
    /// Plot row.
    pub row: usize,
    /// Plot column.
    pub col: usize,
    /// Crop name.
    pub crop: String,
}

impl std::fmt::Display for RipenedCrop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at ({},{})", self.crop, self.row, self.col)
    }
}

/// Everything the garden reports for one day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GardenDay {
    /// Narration, in plot order.
    pub events: Vec<String>,
    /// Crops that ripened today.
    pub ripened: Vec<RipenedCrop>,
}

/// Plot counts for status displays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GardenSummary {
    /// Plots in the grid.
    pub plots: usize,
    /// Plots holding a crop, living or withered.
    pub planted: usize,
    /// Plots ready to pick.
    pub harvestable: usize,
    /// Plots holding a dead crop.
    pub withered: usize,
    /// Harvests taken since the game began.
    pub total_harvests: u64,
}

// ---------------------------------------------------------------------------
// GardenGrid
// ---------------------------------------------------------------------------

/// A fixed-size grid of plots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GardenGrid {
    tuning: GardenTuning,
    /// Plots in row-major order.
    plots: Vec<GardenPlot>,
    total_harvests: u64,
}

impl Default for GardenGrid {
    fn default() -> Self {
        Self::new(GardenTuning::default())
    }
}

impl GardenGrid {
    /// Create an empty grid. The last column has enriched soil.
    pub fn new(tuning: GardenTuning) -> Self {
        let last_col = tuning.cols.saturating_sub(1);
        let plots = (0..tuning.rows)
            .flat_map(|row| {
                (0..tuning.cols).map(move |col| {
                    let soil = if col == last_col {
                        SoilType::Enriched
                    } else {
                        SoilType::Normal
                    };
                    GardenPlot::empty(row, col, soil)
                })
            })
            .collect();
        Self {
            tuning,
            plots,
            total_harvests: 0,
        }
    }

    /// Grid dimensions as `(rows, cols)`.
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.tuning.rows, self.tuning.cols)
    }

    /// All plots in row-major order.
    pub fn plots(&self) -> &[GardenPlot] {
        &self.plots
    }

    /// Row-major index of a coordinate, if it is on the grid.
    fn index_of(&self, row: usize, col: usize) -> Result<usize, WorldError> {
        let (rows, cols) = self.dimensions();
        if row >= rows || col >= cols {
            return Err(WorldError::OutOfBounds {
                row,
                col,
                rows,
                cols,
            });
        }
        row.checked_mul(cols)
            .and_then(|base| base.checked_add(col))
            .ok_or(WorldError::OutOfBounds {
                row,
                col,
                rows,
                cols,
            })
    }

    /// The plot at a coordinate.
    pub fn plot(&self, row: usize, col: usize) -> Result<&GardenPlot, WorldError> {
        let index = self.index_of(row, col)?;
        self.plots.get(index).ok_or(WorldError::OutOfBounds {
            row,
            col,
            rows: self.tuning.rows,
            cols: self.tuning.cols,
        })
    }

    fn plot_mut(&mut self, row: usize, col: usize) -> Result<&mut GardenPlot, WorldError> {
        let index = self.index_of(row, col)?;
        let (rows, cols) = self.dimensions();
        self.plots
            .get_mut(index)
            .ok_or(WorldError::OutOfBounds {
                row,
                col,
                rows,
                cols,
            })
    }

    /// Plant a crop. Fails without changing anything if the plot is off the
    /// grid or occupied, or if the crop is unknown or out of season.
    pub fn plant(
        &mut self,
        row: usize,
        col: usize,
        crop_name: &str,
        season: Season,
    ) -> Result<String, WorldError> {
        let crop = find_crop(crop_name).ok_or_else(|| WorldError::UnknownCrop(crop_name.to_owned()))?;
        let plot = self.plot_mut(row, col)?;
        if let Some(existing) = plot.crop {
            return Err(WorldError::PlotOccupied {
                row,
                col,
                crop: existing.name.to_owned(),
            });
        }
        if !crop.grows_in(season) {
            return Err(WorldError::OutOfSeason {
                crop: crop.name.to_owned(),
                season,
            });
        }

        plot.reset();
        plot.crop = Some(crop);
        debug!(row, col, crop = crop.name, "Crop planted");
        Ok(format!("Planted {} at ({row},{col}). {}", crop.name, crop.description))
    }

    /// Water one plot by hand.
    pub fn water(&mut self, row: usize, col: usize) -> Result<String, WorldError> {
        let plot = self.plot_mut(row, col)?;
        let crop = plot.crop.ok_or(WorldError::PlotEmpty { row, col })?;
        if plot.stage == GrowthStage::Withered {
            return Err(WorldError::NotReady {
                row,
                col,
                crop: crop.name.to_owned(),
                stage: plot.stage,
            });
        }
        if plot.watered_today {
            return Err(WorldError::AlreadyWatered {
                row,
                col,
                crop: crop.name.to_owned(),
            });
        }
        plot.take_water(true);
        Ok(format!("Watered the {} at ({row},{col}).", crop.name))
    }

    /// Water every living, still-dry plot. Returns one line per plot.
    pub fn water_all(&mut self) -> Vec<String> {
        self.plots
            .iter_mut()
            .filter(|plot| plot.is_alive() && !plot.watered_today)
            .filter_map(|plot| {
                let crop = plot.crop?;
                plot.take_water(true);
                Some(format!("Watered the {} at ({},{}).", crop.name, plot.row, plot.col))
            })
            .collect()
    }

    /// Pick a ripe crop.
    ///
    /// Regrowing crops drop back to the growing stage, `regrow_days` short
    /// of ripe, until they have been picked `max_harvests` times; all other
    /// crops leave the plot empty.
    pub fn harvest(
        &mut self,
        row: usize,
        col: usize,
        rng: &mut impl Rng,
    ) -> Result<Harvest, WorldError> {
        let max_harvests = self.tuning.max_harvests;
        let plot = self.plot_mut(row, col)?;
        let crop = plot.crop.ok_or(WorldError::PlotEmpty { row, col })?;
        if plot.stage != GrowthStage::Harvestable {
            return Err(WorldError::NotReady {
                row,
                col,
                crop: crop.name.to_owned(),
                stage: plot.stage,
            });
        }

        let quality = roll_quality(plot.quality_score, plot.soil, crop, rng);
        let quantity = if quality >= QualityTier::Gold {
            1_u32.saturating_add(rng.random_range(0..=1))
        } else {
            1
        };
        plot.harvests_taken = plot.harvests_taken.saturating_add(1);

        match crop.regrow_days {
            Some(regrow_days) if plot.harvests_taken < max_harvests => {
                let setback = f64::from(regrow_days) / f64::from(crop.days_to_grow.max(1));
                plot.progress = (1.0 - setback).clamp(0.40, 1.0 - PROGRESS_EPSILON * 2.0);
                plot.stage = stage_for(plot.progress);
            }
            _ => plot.reset(),
        }
        self.total_harvests = self.total_harvests.saturating_add(1);

        Ok(Harvest {
            crop: crop.name.to_owned(),
            quality,
            quantity,
            base_price: crop.base_price(),
        })
    }

    /// Remove whatever is in a plot, living or withered.
    pub fn clear(&mut self, row: usize, col: usize) -> Result<String, WorldError> {
        let plot = self.plot_mut(row, col)?;
        let crop = plot.crop.ok_or(WorldError::PlotEmpty { row, col })?;
        plot.reset();
        Ok(format!("Cleared the {} from ({row},{col}).", crop.name))
    }

    /// Grow every planted plot by one day under `weather`.
    ///
    /// Rainy and stormy days water every living plot first. The only random
    /// draws are neglect rolls, taken in row-major plot order.
    pub fn advance_day(&mut self, weather: &WeatherState, rng: &mut impl Rng) -> GardenDay {
        let effect = GardenWeather::from_sky(weather.sky, weather.is_magical);
        let season = weather.season;
        let growth = growth_multiplier(effect);
        let quality_mod = quality_modifier(effect);
        let mut day = GardenDay::default();

        if effect.waters_garden() && self.plots.iter().any(GardenPlot::is_alive) {
            for plot in self.plots.iter_mut().filter(|plot| plot.is_alive()) {
                plot.take_water(false);
            }
            day.events.push("The rain waters the garden for you.".to_owned());
        }

        let companions: Vec<bool> = (0..self.plots.len()).map(|i| self.has_companion(i)).collect();
        let tuning = self.tuning;

        for (plot, has_companion) in self.plots.iter_mut().zip(companions) {
            let Some(crop) = plot.crop else { continue };
            if plot.stage == GrowthStage::Withered {
                continue;
            }
            let (row, col) = (plot.row, plot.col);
            plot.days_planted = plot.days_planted.saturating_add(1);

            if !crop.grows_in(season) {
                plot.wither();
                day.events.push(format!(
                    "The {} at ({row},{col}) withered. It can't take {season}.",
                    crop.name
                ));
                continue;
            }

            if effect == GardenWeather::Frost && !crop.is_hardy() {
                plot.quality_score -= FROST_DAMAGE;
                day.events
                    .push(format!("Frost nipped the {} at ({row},{col}).", crop.name));
                if plot.quality_score < FROST_KILL_SCORE {
                    plot.wither();
                    day.events
                        .push(format!("The {} at ({row},{col}) didn't survive the frost.", crop.name));
                    continue;
                }
            }

            if plot.stage != GrowthStage::Harvestable {
                let companion = if has_companion {
                    1.0 + tuning.companion_bonus
                } else {
                    1.0
                };
                let daily = growth / f64::from(crop.days_to_grow.max(1)) * companion;
                plot.progress = (plot.progress + daily).clamp(0.0, 1.0);
                let care = if plot.watered_today { 1.0 } else { 0.5 };
                plot.quality_score += quality_mod * care;

                if plot.watered_today {
                    plot.dry_days = 0;
                } else {
                    plot.dry_days = plot.dry_days.saturating_add(1);
                    if plot.dry_days > tuning.neglect_days
                        && rng.random::<f64>() < tuning.neglect_wither_chance
                    {
                        plot.wither();
                        day.events.push(format!(
                            "The {} at ({row},{col}) wilted from thirst and withered.",
                            crop.name
                        ));
                        continue;
                    }
                }

                let stage = stage_for(plot.progress);
                if stage != plot.stage {
                    plot.stage = stage;
                    day.events.push(growth_line(crop, stage, row, col));
                    if stage == GrowthStage::Harvestable {
                        day.ripened.push(RipenedCrop {
                            row,
                            col,
                            crop: crop.name.to_owned(),
                        });
                    }
                }
            }

            plot.watered_today = false;
        }

        debug!(
            weather = effect.label(),
            ripened = day.ripened.len(),
            events = day.events.len(),
            "Garden advanced"
        );
        day
    }

    /// Whether the plot at `index` has a companion orthogonally adjacent.
    fn has_companion(&self, index: usize) -> bool {
        let Some(plot) = self.plots.get(index) else {
            return false;
        };
        let Some(crop) = plot.crop else {
            return false;
        };
        let (row, col) = (plot.row, plot.col);
        let neighbours = [
            row.checked_sub(1).map(|r| (r, col)),
            row.checked_add(1).map(|r| (r, col)),
            col.checked_sub(1).map(|c| (row, c)),
            col.checked_add(1).map(|c| (row, c)),
        ];
        neighbours
            .into_iter()
            .flatten()
            .filter_map(|(r, c)| self.plot(r, c).ok())
            .filter_map(|neighbour| neighbour.crop)
            .any(|other| are_companions(crop.name, other.name))
    }

    /// Plot counts.
    pub fn summary(&self) -> GardenSummary {
        GardenSummary {
            plots: self.plots.len(),
            planted: self.plots.iter().filter(|p| !p.is_empty()).count(),
            harvestable: self.plots.iter().filter(|p| p.is_harvestable()).count(),
            withered: self
                .plots
                .iter()
                .filter(|p| p.crop.is_some() && p.stage == GrowthStage::Withered)
                .count(),
            total_harvests: self.total_harvests,
        }
    }
}

/// Resolve the quality tier from accumulated care.
fn roll_quality(score: f64, soil: SoilType, crop: &CropType, rng: &mut impl Rng) -> QualityTier {
    let mut base = score / f64::from(crop.days_to_grow.max(1)) + soil.quality_bonus();
    if crop.is_magical {
        base *= 0.8;
    }
    let total = base + rng.random::<f64>() * 0.3;
    if total >= 2.0 {
        QualityTier::Iridescent
    } else if total >= 1.4 {
        QualityTier::Gold
    } else if total >= 0.8 {
        QualityTier::Silver
    } else {
        QualityTier::Normal
    }
}

/// Narration for a crop reaching a new stage.
fn growth_line(crop: &CropType, stage: GrowthStage, row: usize, col: usize) -> String {
    let name = crop.name;
    match stage {
        GrowthStage::Sprout => format!("({row},{col}) A little {name} shoot pokes through the soil."),
        GrowthStage::Growing => format!("({row},{col}) The {name} is leafing out nicely."),
        GrowthStage::Flowering => format!("({row},{col}) The {name} is in flower."),
        GrowthStage::Harvestable => format!("({row},{col}) The {name} is ripe and ready to pick!"),
        GrowthStage::Seed | GrowthStage::Withered => {
            format!("({row},{col}) The {name} has changed.")
        }
    }
}
