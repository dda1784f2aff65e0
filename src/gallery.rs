//! Timed gallery of SVG slots.
//!
//! A [`Gallery`] owns one [`ArtTarget`] per slot. Each refresh generates a
//! fresh painting for every slot, draws it, and rewrites the slot's file.
//! [`GalleryScheduler`] drives refreshes on a tokio interval and owns its
//! own start/stop lifecycle.

use crate::config::OutputConfig;
use crate::error::PaintResult;
use crate::painting::{Painting, PaintingOptions};
use crate::render::svg::SvgCanvas;
use crate::render::ArtTarget;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

pub struct Gallery {
    targets: Vec<ArtTarget<SvgCanvas>>,
    options: PaintingOptions,
    directory: PathBuf,
    rng: StdRng,
    ticks: u64,
}

impl Gallery {
    /// Create `slots` canvases writing into `output.directory`.
    pub fn new(
        output: &OutputConfig,
        slots: usize,
        options: PaintingOptions,
        seed: u64,
    ) -> PaintResult<Self> {
        let logical = options.canvas.unwrap_or_default();
        let targets = (0..slots)
            .map(|_| {
                let mut canvas = SvgCanvas::new(logical, output.width, output.height);
                if let Some(bg) = &output.background {
                    canvas = canvas.with_background(bg.clone());
                }
                ArtTarget::new(canvas)
            })
            .collect::<PaintResult<Vec<_>>>()?;

        std::fs::create_dir_all(&output.directory)?;

        Ok(Self {
            targets,
            options,
            directory: PathBuf::from(&output.directory),
            rng: StdRng::seed_from_u64(seed),
            ticks: 0,
        })
    }

    pub fn slots(&self) -> usize {
        self.targets.len()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn slot_path(&self, slot: usize) -> PathBuf {
        self.directory.join(format!("slot_{:02}.svg", slot))
    }

    /// Repaint every slot, returning the written path or error per slot.
    pub fn refresh(&mut self) -> Vec<PaintResult<PathBuf>> {
        self.ticks += 1;
        let mut results = Vec::with_capacity(self.targets.len());
        for slot in 0..self.targets.len() {
            let path = self.slot_path(slot);
            let result = Painting::generate(&self.options, &mut self.rng).and_then(|painting| {
                let target = &mut self.targets[slot];
                target.display(&painting)?;
                target.canvas().write_to(&path)?;
                debug!(slot, fingerprint = %painting.fingerprint(), "slot repainted");
                Ok(path)
            });
            results.push(result);
        }
        results
    }

    /// Refresh and report failed slots; they are skipped until the next tick.
    pub fn tick(&mut self) -> usize {
        let results = self.refresh();
        let mut painted = 0;
        for (slot, result) in results.into_iter().enumerate() {
            match result {
                Ok(_) => painted += 1,
                Err(e) => warn!(slot, tick = self.ticks, error = %e, "skipping slot this tick"),
            }
        }
        info!(tick = self.ticks, painted, slots = self.slots(), "gallery refreshed");
        painted
    }
}

/// Background task refreshing a [`Gallery`] on a fixed interval.
pub struct GalleryScheduler {
    stop: watch::Sender<bool>,
    handle: JoinHandle<Gallery>,
}

impl GalleryScheduler {
    /// Spawn the refresh loop. The first refresh happens immediately; the
    /// loop ends on [`stop`](Self::stop) or after `max_ticks` refreshes.
    pub fn start(mut gallery: Gallery, interval: Duration, max_ticks: Option<u64>) -> Self {
        let (stop, mut stop_rx) = watch::channel(false);
        let handle = tokio::spawn(async move {
            // tokio rejects a zero period
            let mut ticker = tokio::time::interval(interval.max(Duration::from_millis(1)));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        gallery.tick();
                        if max_ticks.is_some_and(|max| gallery.ticks() >= max) {
                            break;
                        }
                    }
                    changed = stop_rx.changed() => {
                        if changed.is_err() || *stop_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            debug!(ticks = gallery.ticks(), "gallery scheduler stopped");
            gallery
        });
        Self { stop, handle }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Signal the loop to stop and hand the gallery back.
    pub async fn stop(self) -> anyhow::Result<Gallery> {
        // the loop may already have exited on its own
        let _ = self.stop.send(true);
        Ok(self.handle.await?)
    }

    /// Wait for the loop to end by itself (requires `max_ticks`).
    pub async fn join(self) -> anyhow::Result<Gallery> {
        let Self { stop, handle } = self;
        let gallery = handle.await?;
        drop(stop);
        Ok(gallery)
    }
}
