//! Active lattice management.
//!
//! The host swaps the active lattice when the user picks another Hald CLUT
//! source. Passes that are already running must keep reading the lattice
//! they started with, so the active lattice lives in a [`LatticeSlot`] as
//! an immutable, versioned [`LatticeSnapshot`] behind an [`Arc`]:
//!
//! - a new lattice is built completely before it is published
//! - the slot lock is held only to clone or swap the `Arc`, never per pixel
//! - a replaced snapshot is freed when the last pass holding it finishes
//!
//! [`LatticeProvider`] is the narrow seam a host implements (`select` /
//! `clear`). [`SlotProvider`] implements it over any [`SourceDecoder`].
//!
//! # Example
//!
//! ```rust
//! use clut_core::SourceImage;
//! use clut_lut::hald;
//! use clut_ops::{LatticeProvider, SlotProvider};
//!
//! let provider = SlotProvider::new(|id: &str| match id {
//!     "identity" => hald::identity_image(2).map_err(|e| e.to_string()),
//!     other => Err(format!("no such source: {other}")),
//! });
//!
//! provider.select("identity").unwrap();
//! assert!(provider.select("missing").is_err());
//!
//! // the failed selection kept the previous lattice
//! let snapshot = provider.slot().snapshot().unwrap();
//! assert_eq!(snapshot.source_id(), "identity");
//!
//! provider.clear();
//! assert!(provider.slot().snapshot().is_none());
//! ```

use std::fmt::Display;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use clut_core::{PixelBuffer, SourceImage};
use clut_lut::{Lattice, LutResult, ValidationError};
use tracing::{debug, info, warn};

use crate::apply::apply_transform;

/// An immutable, published lattice.
#[derive(Debug)]
pub struct LatticeSnapshot {
    version: u64,
    source_id: String,
    lattice: Arc<Lattice>,
}

impl LatticeSnapshot {
    /// Slot generation at which this snapshot was published.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Identifier of the source the lattice was loaded from.
    #[inline]
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// The lattice.
    #[inline]
    pub fn lattice(&self) -> &Arc<Lattice> {
        &self.lattice
    }
}

/// Holder of the currently active lattice.
///
/// `None` means the identity transform. Every publish or clear increments
/// [`generation`](Self::generation).
#[derive(Debug, Default)]
pub struct LatticeSlot {
    current: RwLock<Option<Arc<LatticeSnapshot>>>,
    generation: AtomicU64,
}

impl LatticeSlot {
    /// Creates an empty (identity) slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot, if any.
    ///
    /// Take this once per pass and keep it for the whole pass.
    pub fn snapshot(&self) -> Option<Arc<LatticeSnapshot>> {
        // Writers only swap an Arc, a poisoned lock still holds a valid value.
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Current lattice, if any.
    pub fn lattice(&self) -> Option<Arc<Lattice>> {
        self.snapshot().map(|s| Arc::clone(&s.lattice))
    }

    /// Number of publish/clear events so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Publishes a fully built lattice and returns its snapshot.
    ///
    /// The previous snapshot stays alive for anyone still holding it.
    pub fn publish(&self, source_id: impl Into<String>, lattice: Lattice) -> Arc<LatticeSnapshot> {
        let source_id = source_id.into();
        let lattice = Arc::new(lattice);

        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let version = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let snapshot = Arc::new(LatticeSnapshot {
            version,
            source_id,
            lattice,
        });
        let previous = current.replace(Arc::clone(&snapshot));
        drop(current);

        debug!(
            version,
            source = snapshot.source_id(),
            replaced = previous.as_ref().map(|p| p.version()),
            "Published lattice"
        );
        snapshot
    }

    /// Switches to the identity transform, returning the previous snapshot.
    pub fn clear(&self) -> Option<Arc<LatticeSnapshot>> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let version = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let previous = current.take();
        drop(current);

        debug!(version, had_lattice = previous.is_some(), "Cleared lattice");
        previous
    }

    /// Runs one pass with the snapshot active at call time.
    pub fn apply(&self, input: &PixelBuffer) -> PixelBuffer {
        let snapshot = self.snapshot();
        apply_transform(snapshot.as_ref().map(|s| s.lattice.as_ref()), input)
    }
}

/// Host-facing capability for switching the active lattice.
pub trait LatticeProvider {
    /// Loads the named source and makes it active.
    ///
    /// On failure the previously active lattice stays in place.
    fn select(&self, source_id: &str) -> LutResult<Arc<Lattice>>;

    /// Switches to the identity transform.
    fn clear(&self);
}

/// Supplies decoded Hald images by identifier.
///
/// Implemented for closures `Fn(&str) -> Result<SourceImage, E>`.
pub trait SourceDecoder {
    /// Decoder failure, reported as
    /// [`ValidationError::SourceUnavailable`].
    type Error: Display;

    /// Decodes the source named `source_id`.
    fn decode(&self, source_id: &str) -> Result<SourceImage, Self::Error>;
}

impl<F, E> SourceDecoder for F
where
    F: Fn(&str) -> Result<SourceImage, E>,
    E: Display,
{
    type Error = E;

    fn decode(&self, source_id: &str) -> Result<SourceImage, E> {
        self(source_id)
    }
}

/// [`LatticeProvider`] that decodes, validates and publishes into a
/// [`LatticeSlot`].
#[derive(Debug)]
pub struct SlotProvider<D> {
    decoder: D,
    slot: Arc<LatticeSlot>,
}

impl<D: SourceDecoder> SlotProvider<D> {
    /// Creates a provider with a fresh, empty slot.
    pub fn new(decoder: D) -> Self {
        Self::with_slot(decoder, Arc::new(LatticeSlot::new()))
    }

    /// Creates a provider publishing into an existing slot.
    pub fn with_slot(decoder: D, slot: Arc<LatticeSlot>) -> Self {
        Self { decoder, slot }
    }

    /// Slot shared with the pipeline.
    pub fn slot(&self) -> &Arc<LatticeSlot> {
        &self.slot
    }

    /// The wrapped decoder.
    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    fn build(&self, source_id: &str) -> LutResult<Lattice> {
        if source_id.is_empty() {
            return Err(ValidationError::source_unavailable("empty source id"));
        }
        let image = self
            .decoder
            .decode(source_id)
            .map_err(|e| ValidationError::source_unavailable(format!("{source_id}: {e}")))?;
        clut_lut::load(&image)
    }
}

impl<D: SourceDecoder> LatticeProvider for SlotProvider<D> {
    fn select(&self, source_id: &str) -> LutResult<Arc<Lattice>> {
        match self.build(source_id) {
            Ok(lattice) => {
                let snapshot = self.slot.publish(source_id, lattice);
                info!(
                    source = source_id,
                    level = snapshot.lattice().level(),
                    version = snapshot.version(),
                    "Selected Hald CLUT"
                );
                Ok(Arc::clone(snapshot.lattice()))
            }
            Err(e) => {
                warn!(
                    source = source_id,
                    error = %e,
                    keeping = self.slot.snapshot().as_ref().map(|s| s.version()),
                    "Hald CLUT selection failed, keeping previous lattice"
                );
                Err(e)
            }
        }
    }

    fn clear(&self) {
        self.slot.clear();
    }
}
