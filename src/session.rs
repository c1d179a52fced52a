//! One item open in the editor.
//!
//! A session owns the live record and the baseline captured when it was
//! loaded (or last saved). Every mutation takes `&mut self`, so the record
//! has a single writer and the dirty check always compares against the
//! baseline the user started from.

use crate::core::{
    CatalogObjectId, CategoryDirectory, ChangeSet, ChangeTracker, DirtyState, ItemRecord, ItemWire,
    Limits, LoadReport, LocationId, LocationUniverse, RecentList, TrackerOptions, TrackingMode,
    VariationRecord,
};
use crate::config::Config;
use crate::store::CatalogStore;
use crate::{Error, Result};

/// Values the editor injects into every session.
#[derive(Clone, Debug)]
pub struct SessionContext {
    /// Locations the merchant operates. Empty means "unknown", not "none".
    pub locations: LocationUniverse,
    pub categories: CategoryDirectory,
    pub limits: Limits,
    pub tracker: TrackerOptions,
    /// Items saved most recently, newest first.
    pub recent: RecentList<CatalogObjectId>,
}

impl SessionContext {
    pub fn new(locations: LocationUniverse, categories: CategoryDirectory, config: &Config) -> Self {
        Self {
            locations,
            categories,
            limits: config.limits.clone(),
            tracker: config.tracker.clone(),
            recent: RecentList::new(config.limits.max_recent_items),
        }
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new(
            LocationUniverse::default(),
            CategoryDirectory::default(),
            &Config::default(),
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Nothing changed since the baseline; the store was not called.
    Skipped,
    Saved {
        id: CatalogObjectId,
        version: Option<i64>,
        changed: ChangeSet,
    },
}

#[derive(Debug)]
pub struct EditSession {
    record: ItemRecord,
    tracker: ChangeTracker<ItemRecord>,
    report: LoadReport,
    ctx: SessionContext,
}

impl EditSession {
    /// Decode a stored item and capture it as the baseline.
    pub fn open(wire: &ItemWire, ctx: SessionContext) -> Result<Self> {
        let span = tracing::info_span!("session_open", item = ?wire.id);
        let _guard = span.enter();

        let loaded = ItemRecord::from_wire(wire, &ctx.limits)?;
        for note in loaded.report.notes() {
            tracing::warn!(%note, "item data normalized on load");
        }
        warn_unknown_references(&loaded.record, &ctx);

        let mut tracker = ChangeTracker::new(ctx.tracker.clone());
        tracker.capture_baseline(&loaded.record);
        tracing::info!(
            variations = loaded.record.variations.len(),
            notes = loaded.report.notes().len(),
            "session opened"
        );
        Ok(Self {
            record: loaded.record,
            tracker,
            report: loaded.report,
            ctx,
        })
    }

    /// A blank item. Without a baseline it is dirty once it holds data.
    pub fn create(ctx: SessionContext) -> Self {
        tracing::info!("new item session");
        Self {
            record: ItemRecord::new(),
            tracker: ChangeTracker::new(ctx.tracker.clone()),
            report: LoadReport::default(),
            ctx,
        }
    }

    pub fn record(&self) -> &ItemRecord {
        &self.record
    }

    /// What decoding had to smooth over.
    pub fn load_report(&self) -> &LoadReport {
        &self.report
    }

    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    /// End the session, handing back the context (and its recent list).
    pub fn into_context(self) -> SessionContext {
        self.ctx
    }

    pub fn is_enabled(&self, location: &LocationId) -> bool {
        self.record.is_enabled(location)
    }

    pub fn master_enabled(&self) -> bool {
        self.record.master_enabled()
    }

    pub fn is_for_sale(&self, variation: usize, location: &LocationId) -> Result<bool> {
        Ok(self.variation(variation)?.is_for_sale(location))
    }

    pub fn is_tracking(&self, variation: usize, location: &LocationId) -> Result<bool> {
        Ok(self.variation(variation)?.is_tracking(location))
    }

    /// Locations the item is visible at, out of the injected universe.
    pub fn enabled_locations(&self) -> Vec<&LocationId> {
        self.record.presence.enabled_in(&self.ctx.locations)
    }

    pub fn is_dirty(&self) -> bool {
        self.tracker.is_dirty(&self.record)
    }

    pub fn state(&self) -> DirtyState {
        self.tracker.state(&self.record)
    }

    pub fn dirty_fields(&self) -> ChangeSet {
        self.tracker.diff(&self.record)
    }

    pub fn set_enabled(&mut self, location: &LocationId, enabled: bool) {
        tracing::debug!(%location, enabled, "toggle item presence");
        self.record.presence.set_enabled(location, enabled);
    }

    pub fn set_master(&mut self, enabled: bool) {
        tracing::debug!(enabled, "toggle item presence everywhere");
        self.record.presence.set_master(enabled);
    }

    pub fn set_for_sale(
        &mut self,
        variation: usize,
        location: &LocationId,
        for_sale: bool,
    ) -> Result<()> {
        tracing::debug!(variation, %location, for_sale, "toggle variation for sale");
        self.variation_mut(variation)?
            .set_for_sale(location, for_sale);
        Ok(())
    }

    pub fn set_tracking(
        &mut self,
        variation: usize,
        location: &LocationId,
        enabled: bool,
    ) -> Result<()> {
        tracing::debug!(variation, %location, enabled, "toggle inventory tracking");
        let target = self
            .record
            .variations
            .get_mut(variation)
            .ok_or(Error::NoSuchVariation { index: variation })?;
        if target.override_for(location).is_none() {
            self.ctx
                .limits
                .check_location_overrides(target.location_overrides.len() + 1)?;
        }
        target.set_tracking(location, enabled);
        Ok(())
    }

    pub fn set_tracking_mode(&mut self, variation: usize, mode: TrackingMode) -> Result<()> {
        tracing::debug!(variation, %mode, "set tracking mode");
        self.variation_mut(variation)?.set_tracking_mode(mode);
        Ok(())
    }

    /// Free-form edit of the record.
    pub fn edit<T>(&mut self, f: impl FnOnce(&mut ItemRecord) -> T) -> T {
        f(&mut self.record)
    }

    /// Append a variation, returning its index.
    pub fn add_variation(&mut self, variation: VariationRecord) -> Result<usize> {
        self.ctx
            .limits
            .check_variations(self.record.variations.len() + 1)?;
        self.record.variations.push(variation);
        Ok(self.record.variations.len() - 1)
    }

    pub fn remove_variation(&mut self, variation: usize) -> Result<VariationRecord> {
        self.variation(variation)?;
        Ok(self.record.variations.remove(variation))
    }

    /// Persist the record if it changed.
    ///
    /// On success the stored result replaces the record and becomes the new
    /// baseline. A record over the configured limits is never sent. When the
    /// store fails the record and baseline are left as they were; when the
    /// write lands but the stored copy does not decode, the record takes the
    /// stored ids and stays dirty.
    pub fn save(&mut self, store: &mut dyn CatalogStore) -> Result<SaveOutcome> {
        let span = tracing::info_span!("session_save", item = ?self.record.id);
        let _guard = span.enter();

        if !self.is_dirty() {
            tracing::debug!("no changes, skipping save");
            return Ok(SaveOutcome::Skipped);
        }
        self.record.check_limits(&self.ctx.limits)?;
        let changed = self.dirty_fields();

        let stored = store.upsert_item(&self.record.to_wire()).inspect_err(|err| {
            tracing::warn!(
                error = %err,
                retryable = err.transience().is_retryable(),
                "save failed"
            );
        })?;
        let loaded = match ItemRecord::from_wire(&stored, &self.ctx.limits) {
            Ok(loaded) => loaded,
            Err(source) => {
                tracing::warn!(
                    error = %source,
                    item = ?stored.id,
                    "stored item could not be read back"
                );
                self.adopt_stored_ids(&stored);
                return Err(Error::StoredUnreadable {
                    id: stored.id,
                    source,
                });
            }
        };
        let Some(id) = loaded.record.id.clone() else {
            return Err(Error::Store(crate::store::StoreError::Rejected {
                reason: "stored item has no id".into(),
            }));
        };

        self.record = loaded.record;
        self.report = loaded.report;
        self.tracker.capture_baseline(&self.record);
        self.ctx.recent.touch(id.clone());
        tracing::info!(item = %id, version = ?self.record.version, %changed, "item saved");
        Ok(SaveOutcome::Saved {
            id,
            version: self.record.version,
            changed,
        })
    }

    /// Later saves must update the stored item rather than insert another.
    fn adopt_stored_ids(&mut self, stored: &ItemWire) {
        let Some(id) = stored
            .id
            .as_deref()
            .and_then(|raw| CatalogObjectId::parse(raw).ok())
        else {
            return;
        };
        self.record.id = Some(id);
        self.record.version = stored.version;
        for (variation, wire) in self.record.variations.iter_mut().zip(&stored.variations) {
            if let Some(id) = wire
                .id
                .as_deref()
                .and_then(|raw| CatalogObjectId::parse(raw).ok())
            {
                variation.id = Some(id);
                variation.version = wire.version;
            }
        }
    }

    fn variation(&self, index: usize) -> Result<&VariationRecord> {
        self.record
            .variations
            .get(index)
            .ok_or(Error::NoSuchVariation { index })
    }

    fn variation_mut(&mut self, index: usize) -> Result<&mut VariationRecord> {
        self.record
            .variations
            .get_mut(index)
            .ok_or(Error::NoSuchVariation { index })
    }
}

/// Overrides at unknown locations and unknown categories stay in the record;
/// they are only reported.
fn warn_unknown_references(record: &ItemRecord, ctx: &SessionContext) {
    if !ctx.locations.is_empty() {
        for (idx, variation) in record.variations.iter().enumerate() {
            for location in variation.unknown_override_locations(&ctx.locations) {
                tracing::warn!(variation = idx, %location, "override at unknown location");
            }
        }
    }
    if !ctx.categories.is_empty() {
        for category in ctx.categories.unknown_in(&record.categories) {
            tracing::warn!(%category, "item assigned to unknown category");
        }
    }
}
