use crate::composite::{splice_image, SplicedPaths};
use crate::error::SpliceError;
use crate::mask::{create_mask, Label};
use crate::output::OutputLayout;
use crate::source::{find_backgrounds, find_cutouts, Cutout, FlagClass};
use anyhow::{bail, Context, Result};
use rand::Rng;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

/// Per-class occurrence counts within a single background image
#[derive(Debug, Default)]
pub struct InstanceCounters {
    counts: BTreeMap<FlagClass, u8>,
}

impl InstanceCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bump the count for `class` and return the new value (first call is 1)
    pub fn next(&mut self, class: FlagClass) -> Result<u8, SpliceError> {
        let count = self.counts.entry(class).or_insert(0);
        *count = count
            .checked_add(1)
            .ok_or(SpliceError::InstanceOverflow { class_id: class.id() })?;
        Ok(*count)
    }

    pub fn count(&self, class: FlagClass) -> u8 {
        self.counts.get(&class).copied().unwrap_or(0)
    }
}

/// Where a run reads from and how many cutouts go onto each background
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub data_dir: PathBuf,
    pub cutouts_per_image: usize,
}

impl BatchConfig {
    pub fn real_imgs_dir(&self) -> PathBuf {
        self.data_dir.join("real_imgs")
    }

    pub fn flag_imgs_dir(&self) -> PathBuf {
        self.data_dir.join("flag_imgs")
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            cutouts_per_image: 2,
        }
    }
}

/// Pick `amount` distinct cutouts uniformly from the whole pool
fn sample_cutouts<'a, R: Rng + ?Sized>(
    pool: &'a [Cutout],
    amount: usize,
    rng: &mut R,
) -> Result<Vec<&'a Cutout>, SpliceError> {
    if amount > pool.len() {
        return Err(SpliceError::NotEnoughCutouts {
            requested: amount,
            available: pool.len(),
        });
    }

    Ok(rand::seq::index::sample(rng, pool.len(), amount)
        .into_iter()
        .map(|i| &pool[i])
        .collect())
}

/// Build a mask for each cutout with its class and running instance number
fn build_masks(
    cutouts: &[&Cutout],
    counters: &mut InstanceCounters,
    layout: &OutputLayout,
) -> Result<Vec<PathBuf>> {
    let mut written = HashSet::new();
    let mut mask_paths = Vec::with_capacity(cutouts.len());

    for cutout in cutouts {
        let instance = counters.next(cutout.class)?;
        let label = Label::new(cutout.class.id(), instance)?;

        let mask_path = layout.mask_path(&cutout.path)?;
        if !written.insert(mask_path.clone()) {
            bail!(
                "Cutouts sampled together share the mask file {}",
                mask_path.display()
            );
        }

        create_mask(&cutout.path, &mask_path, label)
            .with_context(|| format!("Failed to create mask for {}", cutout.path.display()))?;
        mask_paths.push(mask_path);
    }

    Ok(mask_paths)
}

/// Splice `cutouts_per_image` random cutouts onto every background under
/// `real_imgs/`, writing masks, composites, and composite masks.
///
/// The first failure aborts the run; outputs of earlier backgrounds stay.
pub fn run_batch<R: Rng + ?Sized>(config: &BatchConfig, rng: &mut R) -> Result<Vec<SplicedPaths>> {
    let layout = OutputLayout::new(&config.data_dir);

    let backgrounds = find_backgrounds(config.real_imgs_dir()).with_context(|| {
        format!(
            "Failed to list backgrounds in {}",
            config.real_imgs_dir().display()
        )
    })?;
    let cutouts = find_cutouts(config.flag_imgs_dir()).with_context(|| {
        format!(
            "Failed to list cutouts in {}",
            config.flag_imgs_dir().display()
        )
    })?;

    tracing::info!(
        "Splicing {} cutouts into each of {} backgrounds ({} cutouts available)",
        config.cutouts_per_image,
        backgrounds.len(),
        cutouts.len()
    );

    let mut outputs = Vec::with_capacity(backgrounds.len());
    for (index, background) in backgrounds.iter().enumerate() {
        let _span = tracing::debug_span!("background", index).entered();
        tracing::info!(
            "[{}/{}] {}",
            index + 1,
            backgrounds.len(),
            background.display()
        );

        let paths = splice_background(background, &cutouts, config, &layout, rng)
            .with_context(|| format!("Failed to splice {}", background.display()))?;
        outputs.push(paths);
    }

    tracing::info!("Spliced {} images", outputs.len());
    Ok(outputs)
}

fn splice_background<R: Rng + ?Sized>(
    background: &Path,
    pool: &[Cutout],
    config: &BatchConfig,
    layout: &OutputLayout,
    rng: &mut R,
) -> Result<SplicedPaths> {
    let sampled = sample_cutouts(pool, config.cutouts_per_image, rng)?;

    let mut counters = InstanceCounters::new();
    let mask_paths = build_masks(&sampled, &mut counters, layout)?;

    let cutout_paths: Vec<PathBuf> = sampled.iter().map(|c| c.path.clone()).collect();
    Ok(splice_image(
        background,
        &cutout_paths,
        &mask_paths,
        layout,
        rng,
    )?)
}

/// Write a mask for every cutout in `flag_imgs/` with instance id 1, without
/// splicing anything. Returns the mask paths.
pub fn create_all_masks(config: &BatchConfig) -> Result<Vec<PathBuf>> {
    let layout = OutputLayout::new(&config.data_dir);
    let cutouts = find_cutouts(config.flag_imgs_dir()).with_context(|| {
        format!(
            "Failed to list cutouts in {}",
            config.flag_imgs_dir().display()
        )
    })?;

    tracing::info!(
        "Creating {} masks in {}",
        cutouts.len(),
        layout.masks_dir().display()
    );

    cutouts
        .iter()
        .map(|cutout| {
            let mask_path = layout.mask_path(&cutout.path)?;
            let label = Label::new(cutout.class.id(), 1)?;
            create_mask(&cutout.path, &mask_path, label)
                .with_context(|| format!("Failed to create mask for {}", cutout.path.display()))
        })
        .collect()
}
