//! World store: the single owner of editor state.
//!
//! All mutation goes through `WorldStore`. It is constructed explicitly and
//! handed to whoever drives it, so tests can run isolated instances with a
//! virtual clock and in-memory storage.
//!
//! Deferred work (history commits, hover updates) is held as deadlines and
//! applied by `tick()`, which the event loop calls every frame.

use crate::blocks::{BlockPlugin, BlockRegistry};
use crate::core::timer::Throttle;
use crate::core::types::{BlockId, BuildId, Millis, Result};
use crate::core::{Clock, EditorConfig, Error};
use crate::persistence::build::SavedBuild;
use crate::persistence::state::{PersistedStateRef, decode_state, encode_state};
use crate::persistence::storage::Storage;
use crate::placement::{PlacementRejection, PlacementRequest, resolve_placement};
use super::block::{Block, NewBlock};
use super::history::History;
use super::theme::Theme;

/// Transient render-feedback state. Never persisted or snapshotted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoverState {
    pub block_id: Option<BlockId>,
    pub face_index: Option<u8>,
}

/// Owns blocks, selection, hover, history and saved builds
pub struct WorldStore {
    registry: BlockRegistry,
    storage: Box<dyn Storage>,
    clock: Box<dyn Clock>,
    config: EditorConfig,

    blocks: Vec<Block>,
    selected_type: String,
    selected_color: String,
    hover: HoverState,
    hover_throttle: Throttle<HoverState>,
    history: History,
    theme: Theme,
    saved_builds: Vec<SavedBuild>,
    last_update: Millis,
    writes_suspended: bool,
}

impl WorldStore {
    /// Fresh, empty world. Storage is written to but not read.
    pub fn new(
        registry: BlockRegistry,
        storage: impl Storage + 'static,
        clock: impl Clock + 'static,
        config: EditorConfig,
    ) -> Self {
        let now = clock.now_ms();
        Self {
            registry,
            storage: Box::new(storage),
            clock: Box::new(clock),
            selected_type: config.default_block_type.clone(),
            selected_color: config.default_color.clone(),
            hover: HoverState::default(),
            hover_throttle: Throttle::new(config.hover_throttle_ms),
            history: History::new(&[], config.max_history_entries, config.history_debounce_ms),
            blocks: Vec::new(),
            theme: Theme::default(),
            saved_builds: Vec::new(),
            last_update: now,
            writes_suspended: false,
            config,
        }
    }

    /// Rehydrate from storage, falling back to a fresh world when nothing
    /// usable is stored.
    pub fn open(
        registry: BlockRegistry,
        storage: impl Storage + 'static,
        clock: impl Clock + 'static,
        config: EditorConfig,
    ) -> Self {
        let stored = storage.get(&config.storage_key);
        let mut store = Self::new(registry, storage, clock, config);

        let data = match stored {
            Ok(Some(data)) => data,
            Ok(None) => {
                log::info!("No stored state under '{}', starting fresh", store.config.storage_key);
                return store;
            }
            Err(e) => {
                log::warn!("Failed to read stored state, storage writes suspended: {}", e);
                store.writes_suspended = true;
                return store;
            }
        };

        let decoded = match decode_state(&data) {
            Ok(decoded) => decoded,
            Err(e) => {
                log::warn!("Stored state is corrupt, starting fresh: {}", e);
                store.preserve_unreadable(&data);
                return store;
            }
        };
        if decoded.is_lossy() {
            log::warn!("Stored state partly unreadable, defaults used for: {}", decoded.dropped.join(", "));
            store.preserve_unreadable(&data);
        }

        let state = decoded.state;
        store.blocks = state.blocks;
        if let Some(block_type) = state.selected_block_type {
            store.selected_type = block_type;
        }
        if let Some(color) = state.selected_color {
            store.selected_color = color;
        }
        store.theme = state.theme;
        store.saved_builds = state.saved_builds;
        store.history = History::from_parts(
            state.history,
            state.history_index,
            store.config.max_history_entries,
            store.config.history_debounce_ms,
        );

        // An edit burst that never settled before shutdown
        if store.history.current() != store.blocks.as_slice() {
            log::debug!("Stored blocks ahead of history, committing");
            store.history.commit(&store.blocks);
            store.persist();
        }

        log::info!(
            "Restored {} blocks, {} history entries, {} saved builds",
            store.blocks.len(),
            store.history.len(),
            store.saved_builds.len()
        );
        store
    }

    // ---------------------------------------------------------------------
    // Placement and block mutation
    // ---------------------------------------------------------------------

    /// Resolve a pointer hit with the current selection, without mutating
    pub fn resolve_placement(&self, request: &PlacementRequest) -> std::result::Result<NewBlock, PlacementRejection> {
        resolve_placement(
            &self.registry,
            &self.blocks,
            request,
            &self.selected_type,
            &self.selected_color,
        )
    }

    /// Resolve and add in one step
    pub fn place_block(&mut self, request: &PlacementRequest) -> std::result::Result<BlockId, PlacementRejection> {
        let payload = self.resolve_placement(request)?;
        Ok(self.add_block(payload))
    }

    /// Append a block under a fresh id. Occupancy is not checked here.
    pub fn add_block(&mut self, payload: NewBlock) -> BlockId {
        let id = crate::core::types::generate_id();
        self.blocks.push(payload.with_id(id.clone()));
        self.touch_and_schedule();
        id
    }

    /// Remove a block by id. Absent ids are a no-op.
    pub fn remove_block(&mut self, id: &str) -> bool {
        let before = self.blocks.len();
        self.blocks.retain(|b| b.id != id);
        if self.blocks.len() == before {
            return false;
        }
        self.touch_and_schedule();
        true
    }

    /// Empty the world. History restarts from the empty state.
    pub fn clear_blocks(&mut self) {
        self.blocks.clear();
        self.history.reset(&self.blocks);
        self.clear_hover();
        self.last_update = self.clock.now_ms();
        self.persist();
    }

    fn touch_and_schedule(&mut self) {
        let now = self.clock.now_ms();
        self.last_update = now;
        self.history.schedule_commit(now);
        self.persist();
    }

    // ---------------------------------------------------------------------
    // Selection, hover, theme
    // ---------------------------------------------------------------------

    pub fn set_selected_type(&mut self, block_type: impl Into<String>) {
        self.selected_type = block_type.into();
        self.persist();
    }

    pub fn set_selected_color(&mut self, color: impl Into<String>) {
        self.selected_color = color.into();
        self.persist();
    }

    /// Request a hovered-block change; applied by `tick()` once the
    /// throttle window closes.
    pub fn set_hovered_block(&mut self, id: Option<BlockId>) {
        let mut target = self.hover_target();
        if target.block_id == id {
            return;
        }
        target.block_id = id;
        self.hover_throttle.offer(target, self.clock.now_ms());
    }

    /// Request a hovered-face change; throttled like `set_hovered_block`
    pub fn set_hovered_face(&mut self, index: Option<u8>) {
        let mut target = self.hover_target();
        if target.face_index == index {
            return;
        }
        target.face_index = index;
        self.hover_throttle.offer(target, self.clock.now_ms());
    }

    /// Latest requested hover, pending or applied
    fn hover_target(&self) -> HoverState {
        self.hover_throttle
            .pending()
            .cloned()
            .unwrap_or_else(|| self.hover.clone())
    }

    fn clear_hover(&mut self) {
        self.hover_throttle.cancel();
        self.hover = HoverState::default();
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.persist();
    }

    // ---------------------------------------------------------------------
    // History
    // ---------------------------------------------------------------------

    /// Apply deferred work that is due. Returns true if visible state changed.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now_ms();
        let mut changed = false;

        if self.history.poll(now, &self.blocks) {
            self.persist();
            changed = true;
        }

        if let Some(hover) = self.hover_throttle.fire(now) {
            if hover != self.hover {
                self.hover = hover;
                changed = true;
            }
        }

        changed
    }

    /// Commit a pending history entry immediately
    pub fn flush_history(&mut self) -> bool {
        let committed = self.history.flush(&self.blocks);
        if committed {
            self.persist();
        }
        committed
    }

    /// Step back one history entry. Unsettled edits are committed first so
    /// they are what gets undone.
    pub fn undo(&mut self) -> bool {
        self.history.flush(&self.blocks);
        match self.history.undo() {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Step forward one history entry
    pub fn redo(&mut self) -> bool {
        self.history.flush(&self.blocks);
        match self.history.redo() {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    fn restore(&mut self, snapshot: Vec<Block>) {
        self.blocks = snapshot;
        self.last_update = self.clock.now_ms();
        self.persist();
    }

    // ---------------------------------------------------------------------
    // Saved builds
    // ---------------------------------------------------------------------

    /// Snapshot the current blocks under `name`
    pub fn save_build(&mut self, name: impl Into<String>) -> BuildId {
        let build = SavedBuild::snapshot(name, &self.blocks, self.clock.now_ms());
        let id = build.id.clone();
        log::info!("Saved build '{}' ({} blocks)", build.name, build.blocks.len());
        self.saved_builds.push(build);
        self.persist();
        id
    }

    /// Replace the live world with a saved build. Unknown ids are a no-op.
    /// Loading is not undoable: history restarts from the loaded state.
    pub fn load_build(&mut self, id: &str) -> bool {
        let Some(build) = self.saved_builds.iter().find(|b| b.id == id) else {
            return false;
        };

        log::info!("Loading build '{}' ({} blocks)", build.name, build.blocks.len());
        self.blocks = build.blocks.clone();
        self.history.reset(&self.blocks);
        self.clear_hover();
        self.last_update = self.clock.now_ms();
        self.persist();
        true
    }

    /// Overwrite a saved build with the current blocks
    pub fn overwrite_build(&mut self, id: &str) -> bool {
        let now = self.clock.now_ms();
        let Some(build) = self.saved_builds.iter_mut().find(|b| b.id == id) else {
            return false;
        };

        build.replace_blocks(&self.blocks, now);
        self.persist();
        true
    }

    /// Delete a saved build. Unknown ids are a no-op.
    pub fn delete_build(&mut self, id: &str) -> bool {
        let before = self.saved_builds.len();
        self.saved_builds.retain(|b| b.id != id);
        if self.saved_builds.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// Portable string for a saved build, or empty if the id is unknown
    pub fn export_build(&self, id: &str) -> String {
        let Some(build) = self.saved_build(id) else {
            return String::new();
        };

        match build.export() {
            Ok(data) => data,
            Err(e) => {
                log::error!("Failed to export build '{}': {}", build.name, e);
                String::new()
            }
        }
    }

    /// Import an exported build as a new saved build. State is untouched
    /// on failure.
    pub fn try_import_build(&mut self, data: &str) -> Result<BuildId> {
        let build = SavedBuild::import(data, self.clock.now_ms())?;
        let id = build.id.clone();
        log::info!("Imported build '{}' ({} blocks)", build.name, build.blocks.len());
        self.saved_builds.push(build);
        self.persist();
        Ok(id)
    }

    /// Like `try_import_build`, but failures are only logged
    pub fn import_build(&mut self, data: &str) -> Option<BuildId> {
        match self.try_import_build(data) {
            Ok(id) => Some(id),
            Err(e) => {
                log::error!("Failed to import build: {}", e);
                None
            }
        }
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// Blocks paired with their plugin, in render order. Blocks of an
    /// unknown type are skipped.
    pub fn renderable_blocks(&self) -> Vec<(&Block, &dyn BlockPlugin)> {
        self.blocks
            .iter()
            .filter_map(|block| match self.registry.get(&block.block_type) {
                Some(plugin) => Some((block, plugin)),
                None => {
                    log::warn!("Skipping block {} with unknown type '{}'", block.id, block.block_type);
                    None
                }
            })
            .collect()
    }

    pub fn selected_type(&self) -> &str {
        &self.selected_type
    }

    pub fn selected_color(&self) -> &str {
        &self.selected_color
    }

    pub fn hover(&self) -> &HoverState {
        &self.hover
    }

    pub fn hovered_block_id(&self) -> Option<&str> {
        self.hover.block_id.as_deref()
    }

    pub fn hovered_face_index(&self) -> Option<u8> {
        self.hover.face_index
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_index(&self) -> usize {
        self.history.index()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo() || self.history.has_pending_commit()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo() && !self.history.has_pending_commit()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn saved_builds(&self) -> &[SavedBuild] {
        &self.saved_builds
    }

    pub fn saved_build(&self, id: &str) -> Option<&SavedBuild> {
        self.saved_builds.iter().find(|b| b.id == id)
    }

    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut BlockRegistry {
        &mut self.registry
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Time of the last change to the block collection
    pub fn last_update(&self) -> Millis {
        self.last_update
    }

    // ---------------------------------------------------------------------
    // Durable storage
    // ---------------------------------------------------------------------

    /// Storage key that keeps stored data this store could not fully read
    pub fn backup_key(&self) -> String {
        format!("{}.corrupt", self.config.storage_key)
    }

    /// Copy unreadable stored data aside before it can be overwritten. If
    /// the copy fails the original key is left alone for this session.
    fn preserve_unreadable(&mut self, data: &str) {
        let backup_key = self.backup_key();
        match self.storage.set(&backup_key, data) {
            Ok(()) => log::warn!("Kept unreadable stored state under '{}'", backup_key),
            Err(e) => {
                log::error!("Failed to back up unreadable state, storage writes suspended: {}", e);
                self.writes_suspended = true;
            }
        }
    }

    /// Write the durable subset of the state. Failures are logged only.
    fn persist(&self) {
        if self.writes_suspended {
            log::debug!("Storage writes suspended, state kept in memory only");
            return;
        }
        if let Err(e) = self.try_persist() {
            log::warn!("Failed to persist editor state: {}", e);
        }
    }

    fn try_persist(&self) -> Result<()> {
        let data = encode_state(PersistedStateRef {
            blocks: &self.blocks,
            selected_block_type: &self.selected_type,
            selected_color: &self.selected_color,
            history: self.history.snapshots(),
            history_index: self.history.index(),
            theme: self.theme,
            saved_builds: &self.saved_builds,
        })?;
        self.storage
            .set(&self.config.storage_key, &data)
            .map_err(|e| Error::Storage(format!("write '{}': {}", self.config.storage_key, e)))
    }
}

impl std::fmt::Debug for WorldStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorldStore")
            .field("blocks", &self.blocks.len())
            .field("selected_type", &self.selected_type)
            .field("selected_color", &self.selected_color)
            .field("history_index", &self.history.index())
            .field("history_len", &self.history.len())
            .field("saved_builds", &self.saved_builds.len())
            .field("writes_suspended", &self.writes_suspended)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{CUBE, STAIR};
    use crate::core::ManualClock;
    use crate::core::types::Vec3;
    use crate::math::positions_equal;
    use crate::persistence::storage::MemoryStorage;

    const DEBOUNCE: Millis = 500;

    fn test_store() -> (WorldStore, ManualClock, MemoryStorage) {
        let clock = ManualClock::new(1_000);
        let storage = MemoryStorage::new();
        let store = WorldStore::new(
            BlockRegistry::with_defaults(),
            storage.clone(),
            clock.clone(),
            EditorConfig::default(),
        );
        (store, clock, storage)
    }

    fn settle(store: &mut WorldStore, clock: &ManualClock) {
        clock.advance(DEBOUNCE);
        store.tick();
    }

    fn cube(x: f32, y: f32, z: f32) -> NewBlock {
        NewBlock::new(Vec3::new(x, y, z), CUBE, "#ffffff")
    }

    #[test]
    fn test_ground_click_scenario() {
        let (mut store, _, _) = test_store();
        store.set_selected_type(CUBE);
        store.set_selected_color("#0000ff");

        let id = store.place_block(&PlacementRequest::ground(Vec3::new(2.3, 0.0, 2.3))).unwrap();
        let block = store.block(&id).unwrap();

        assert_eq!(block.position, Vec3::new(2.5, 0.0, 2.5));
        assert_eq!(block.block_type, CUBE);
        assert_eq!(block.color, "#0000ff");
    }

    #[test]
    fn test_top_face_scenario() {
        let (mut store, _, _) = test_store();
        let base = store.add_block(cube(1.5, 0.0, 1.5));

        let request = PlacementRequest::face(Vec3::new(1.5, 0.5, 1.5), Vec3::Y, base);
        let id = store.place_block(&request).unwrap();

        assert_eq!(store.block(&id).unwrap().position, Vec3::new(1.5, 1.0, 1.5));
    }

    #[test]
    fn test_occupied_placement_adds_nothing() {
        let (mut store, _, _) = test_store();
        let base = store.add_block(cube(1.5, 0.0, 1.5));
        store.add_block(cube(1.5, 1.0, 1.5));

        let request = PlacementRequest::face(Vec3::new(1.5, 0.5, 1.5), Vec3::Y, base);
        assert!(matches!(store.place_block(&request), Err(PlacementRejection::Occupied(_))));
        assert_eq!(store.blocks().len(), 2);
    }

    #[test]
    fn test_unknown_selected_type_adds_nothing() {
        let (mut store, _, _) = test_store();
        store.set_selected_type("slab");

        let result = store.place_block(&PlacementRequest::ground(Vec3::ZERO));
        assert!(matches!(result, Err(PlacementRejection::UnknownBlockType(_))));
        assert!(store.blocks().is_empty());
    }

    #[test]
    fn test_placements_never_overlap() {
        let (mut store, _, _) = test_store();
        let clicks = [
            Vec3::new(0.2, 0.0, 0.2),
            Vec3::new(0.8, 0.0, 0.9),
            Vec3::new(1.1, 0.0, 0.3),
            Vec3::new(0.5, 0.0, 0.5),
            Vec3::new(1.9, 0.0, 0.1),
        ];

        for point in clicks {
            store.place_block(&PlacementRequest::ground(point)).unwrap();
        }
        let top = store.blocks()[0].id.clone();
        for _ in 0..3 {
            let _ = store.place_block(&PlacementRequest::face(Vec3::ZERO, Vec3::Y, top.clone()));
        }

        let blocks = store.blocks();
        for (i, a) in blocks.iter().enumerate() {
            for b in &blocks[i + 1..] {
                assert!(!positions_equal(a.position, b.position), "{} overlaps {}", a.id, b.id);
            }
        }
    }

    #[test]
    fn test_rapid_edits_collapse_into_one_entry() {
        let (mut store, clock, _) = test_store();

        for i in 0..5 {
            store.add_block(cube(i as f32 + 0.5, 0.0, 0.5));
            clock.advance(100);
            store.tick();
        }
        assert_eq!(store.history().len(), 1);

        settle(&mut store, &clock);
        assert_eq!(store.history().len(), 2);
        assert_eq!(store.history().current().len(), 5);
    }

    #[test]
    fn test_spaced_edits_each_get_an_entry() {
        let (mut store, clock, _) = test_store();

        for i in 0..4 {
            store.add_block(cube(i as f32 + 0.5, 0.0, 0.5));
            settle(&mut store, &clock);
        }

        assert_eq!(store.history().len(), 5);
        assert_eq!(store.history_index(), 4);
    }

    #[test]
    fn test_undo_then_redo_restores_blocks() {
        let (mut store, clock, _) = test_store();
        store.add_block(cube(0.5, 0.0, 0.5));
        settle(&mut store, &clock);
        store.add_block(cube(1.5, 0.0, 0.5));
        settle(&mut store, &clock);

        let before = store.blocks().to_vec();
        assert!(store.undo());
        assert_eq!(store.blocks().len(), 1);
        assert!(store.redo());
        assert_eq!(store.blocks(), before.as_slice());
    }

    #[test]
    fn test_undo_redo_boundaries_are_noops() {
        let (mut store, _, _) = test_store();
        assert!(!store.undo());
        assert!(!store.redo());
        assert_eq!(store.history_index(), 0);
    }

    #[test]
    fn test_undo_flushes_unsettled_edits() {
        let (mut store, clock, _) = test_store();
        store.add_block(cube(0.5, 0.0, 0.5));
        settle(&mut store, &clock);
        store.add_block(cube(1.5, 0.0, 0.5));
        assert!(store.can_undo());
        assert!(!store.can_redo());

        assert!(store.undo());
        assert_eq!(store.blocks().len(), 1);
        assert!(store.redo());
        assert_eq!(store.blocks().len(), 2);

        // Nothing left to commit later
        clock.advance(10 * DEBOUNCE);
        assert!(!store.tick());
        assert_eq!(store.history().len(), 3);
    }

    #[test]
    fn test_edit_after_undo_discards_redo() {
        let (mut store, clock, _) = test_store();
        store.add_block(cube(0.5, 0.0, 0.5));
        settle(&mut store, &clock);
        store.undo();

        store.add_block(cube(3.5, 0.0, 3.5));
        settle(&mut store, &clock);

        assert!(!store.can_redo());
        assert_eq!(store.history().len(), 2);
        assert_eq!(store.blocks()[0].position, Vec3::new(3.5, 0.0, 3.5));
    }

    #[test]
    fn test_remove_block() {
        let (mut store, clock, _) = test_store();
        let id = store.add_block(cube(0.5, 0.0, 0.5));
        settle(&mut store, &clock);

        assert!(store.remove_block(&id));
        assert!(store.blocks().is_empty());
        settle(&mut store, &clock);
        assert_eq!(store.history().len(), 3);
    }

    #[test]
    fn test_remove_absent_block_is_noop() {
        let (mut store, clock, _) = test_store();
        assert!(!store.remove_block("missing"));

        settle(&mut store, &clock);
        assert_eq!(store.history().len(), 1);
    }

    #[test]
    fn test_clear_resets_history() {
        let (mut store, clock, _) = test_store();
        store.add_block(cube(0.5, 0.0, 0.5));
        settle(&mut store, &clock);
        store.add_block(cube(1.5, 0.0, 0.5));

        store.clear_blocks();
        assert!(store.blocks().is_empty());
        assert_eq!(store.history().len(), 1);
        assert_eq!(store.history_index(), 0);

        // Pending commit was dropped
        settle(&mut store, &clock);
        assert_eq!(store.history().len(), 1);
    }

    #[test]
    fn test_selection_has_no_history_impact() {
        let (mut store, clock, _) = test_store();
        store.set_selected_type(STAIR);
        store.set_selected_color("#123456");
        settle(&mut store, &clock);

        assert_eq!(store.selected_type(), STAIR);
        assert_eq!(store.selected_color(), "#123456");
        assert_eq!(store.history().len(), 1);
    }

    #[test]
    fn test_hover_is_throttled_and_latest_wins() {
        let (mut store, clock, _) = test_store();

        store.set_hovered_block(Some("a".to_string()));
        clock.advance(10);
        store.set_hovered_block(Some("b".to_string()));
        store.set_hovered_face(Some(2));
        store.tick();
        assert_eq!(store.hovered_block_id(), None);

        clock.advance(20);
        assert!(store.tick());
        assert_eq!(store.hovered_block_id(), Some("b"));
        assert_eq!(store.hovered_face_index(), Some(2));
    }

    #[test]
    fn test_hover_same_target_schedules_nothing() {
        let (mut store, clock, _) = test_store();
        store.set_hovered_block(Some("a".to_string()));
        clock.advance(30);
        store.tick();

        store.set_hovered_block(Some("a".to_string()));
        clock.advance(30);
        assert!(!store.tick());
    }

    #[test]
    fn test_hover_back_to_current_while_pending() {
        let (mut store, clock, _) = test_store();
        store.set_hovered_block(Some("a".to_string()));
        clock.advance(30);
        store.tick();

        store.set_hovered_block(None);
        store.set_hovered_block(Some("a".to_string()));
        clock.advance(30);
        store.tick();
        assert_eq!(store.hovered_block_id(), Some("a"));
    }

    #[test]
    fn test_save_clear_load_scenario() {
        let (mut store, clock, _) = test_store();
        store.add_block(cube(0.5, 0.0, 0.5));
        store.add_block(cube(0.5, 1.0, 0.5));
        settle(&mut store, &clock);
        let saved = store.blocks().to_vec();

        let castle = store.save_build("Castle");
        store.clear_blocks();
        assert!(store.blocks().is_empty());

        assert!(store.load_build(&castle));
        assert_eq!(store.blocks(), saved.as_slice());
        assert_eq!(store.history_index(), 0);
        assert_eq!(store.history().len(), 1);
        assert!(!store.can_undo());
    }

    #[test]
    fn test_saved_build_is_independent_copy() {
        let (mut store, _, _) = test_store();
        let id = store.add_block(cube(0.5, 0.0, 0.5));
        let build = store.save_build("Snap");

        store.remove_block(&id);
        assert_eq!(store.saved_build(&build).unwrap().blocks.len(), 1);
    }

    #[test]
    fn test_load_and_delete_unknown_build_are_noops() {
        let (mut store, _, _) = test_store();
        store.add_block(cube(0.5, 0.0, 0.5));

        assert!(!store.load_build("nope"));
        assert!(!store.delete_build("nope"));
        assert_eq!(store.blocks().len(), 1);
        assert_eq!(store.export_build("nope"), "");
    }

    #[test]
    fn test_delete_build() {
        let (mut store, _, _) = test_store();
        let a = store.save_build("A");
        let b = store.save_build("B");

        assert!(store.delete_build(&a));
        assert_eq!(store.saved_builds().len(), 1);
        assert_eq!(store.saved_builds()[0].id, b);
    }

    #[test]
    fn test_overwrite_build() {
        let (mut store, clock, _) = test_store();
        let build = store.save_build("Wip");
        store.add_block(cube(0.5, 0.0, 0.5));
        clock.advance(5_000);

        assert!(store.overwrite_build(&build));
        let saved = store.saved_build(&build).unwrap();
        assert_eq!(saved.blocks.len(), 1);
        assert_eq!(saved.updated_at, 6_000);
        assert_eq!(saved.created_at, 1_000);
        assert!(!store.overwrite_build("nope"));
    }

    #[test]
    fn test_export_import_round_trip() {
        let (mut store, _, _) = test_store();
        store.add_block(cube(0.5, 0.0, 0.5));
        store.add_block(NewBlock::new(Vec3::new(0.5, 1.25, 0.5), STAIR, "#ff00ff"));
        let original = store.save_build("Tower");

        let data = store.export_build(&original);
        assert!(!data.is_empty());

        let imported = store.import_build(&data).unwrap();
        assert_ne!(imported, original);
        assert_eq!(store.saved_builds().len(), 2);

        let a = store.saved_build(&original).unwrap();
        let b = store.saved_build(&imported).unwrap();
        assert_eq!(a.blocks.len(), b.blocks.len());
        for (x, y) in a.blocks.iter().zip(&b.blocks) {
            assert_eq!(x.position, y.position);
            assert_eq!(x.block_type, y.block_type);
            assert_eq!(x.color, y.color);
        }
    }

    #[test]
    fn test_import_garbage_leaves_builds_untouched() {
        let (mut store, _, _) = test_store();
        store.save_build("Keep");

        assert_eq!(store.import_build("not base64 and not json"), None);
        assert_eq!(store.saved_builds().len(), 1);
        assert!(store.try_import_build("").is_err());
        assert_eq!(store.saved_builds().len(), 1);
    }

    #[test]
    fn test_toggle_theme() {
        let (mut store, _, _) = test_store();
        assert_eq!(store.theme(), Theme::Dark);
        store.toggle_theme();
        assert_eq!(store.theme(), Theme::Light);
    }

    #[test]
    fn test_renderable_blocks_skip_unknown_types() {
        let (mut store, _, _) = test_store();
        store.add_block(cube(0.5, 0.0, 0.5));
        store.add_block(NewBlock::new(Vec3::new(1.5, 0.0, 0.5), "slab", "#fff"));
        store.add_block(NewBlock::new(Vec3::new(2.5, 0.0, 0.5), STAIR, "#fff"));

        let renderable = store.renderable_blocks();
        assert_eq!(renderable.len(), 2);
        assert_eq!(renderable[0].1.block_type(), CUBE);
        assert_eq!(renderable[1].1.block_type(), STAIR);
    }

    #[test]
    fn test_state_survives_reopen() {
        let (mut store, clock, storage) = test_store();
        store.set_selected_color("#00ff00");
        store.toggle_theme();
        store.add_block(cube(0.5, 0.0, 0.5));
        settle(&mut store, &clock);
        store.add_block(cube(1.5, 0.0, 0.5));
        settle(&mut store, &clock);
        store.undo();
        store.save_build("Kept");
        store.set_hovered_block(Some("x".to_string()));
        clock.advance(30);
        store.tick();

        let reopened = WorldStore::open(
            BlockRegistry::with_defaults(),
            storage,
            clock,
            EditorConfig::default(),
        );
        assert_eq!(reopened.blocks(), store.blocks());
        assert_eq!(reopened.selected_color(), "#00ff00");
        assert_eq!(reopened.theme(), Theme::Light);
        assert_eq!(reopened.history().len(), 3);
        assert_eq!(reopened.history_index(), 1);
        assert_eq!(reopened.saved_builds().len(), 1);
        assert_eq!(reopened.hovered_block_id(), None);
    }

    #[test]
    fn test_reopen_commits_unsettled_edits() {
        let (mut store, clock, storage) = test_store();
        store.add_block(cube(0.5, 0.0, 0.5));

        let reopened = WorldStore::open(
            BlockRegistry::with_defaults(),
            storage.clone(),
            clock,
            EditorConfig::default(),
        );
        assert_eq!(reopened.history().len(), 2);
        assert_eq!(reopened.history().current(), reopened.blocks());

        let stored = decode_state(&storage.get("iso-builder-storage").unwrap().unwrap()).unwrap().state;
        assert_eq!(stored.history.len(), 2);
        assert_eq!(stored.history_index, 1);
    }

    #[test]
    fn test_open_with_corrupt_state_starts_fresh() {
        let storage = MemoryStorage::new();
        storage.set("iso-builder-storage", "{broken").unwrap();

        let store = WorldStore::open(
            BlockRegistry::with_defaults(),
            storage.clone(),
            ManualClock::new(0),
            EditorConfig::default(),
        );
        assert!(store.blocks().is_empty());
        assert_eq!(store.selected_type(), CUBE);
        assert_eq!(store.history().len(), 1);
        assert_eq!(storage.get("iso-builder-storage.corrupt").unwrap().as_deref(), Some("{broken"));
    }

    #[test]
    fn test_open_keeps_readable_fields_of_damaged_state() {
        let storage = MemoryStorage::new();
        let data = r##"{"state":{"blocks":[],"theme":"system","historyIndex":-3,"savedBuilds":[{"id":"c1","name":"Castle","blocks":[],"createdAt":1,"updatedAt":2}]},"version":0}"##;
        storage.set("iso-builder-storage", data).unwrap();

        let mut store = WorldStore::open(
            BlockRegistry::with_defaults(),
            storage.clone(),
            ManualClock::new(0),
            EditorConfig::default(),
        );
        assert_eq!(store.theme(), Theme::Dark);
        assert_eq!(store.history_index(), 0);
        assert_eq!(store.saved_builds().len(), 1);
        assert_eq!(store.saved_builds()[0].name, "Castle");
        assert_eq!(storage.get(&store.backup_key()).unwrap().as_deref(), Some(data));

        store.set_selected_color("#ff00ff");
        let stored = storage.get("iso-builder-storage").unwrap().unwrap();
        assert!(stored.contains("Castle"));
        assert!(stored.contains("#ff00ff"));
    }

    #[test]
    fn test_unreadable_state_not_overwritten_without_backup() {
        struct NoBackup(MemoryStorage);

        impl Storage for NoBackup {
            fn get(&self, key: &str) -> Result<Option<String>> {
                self.0.get(key)
            }

            fn set(&self, key: &str, value: &str) -> Result<()> {
                if key.ends_with(".corrupt") {
                    return Err(Error::Storage("disk full".to_string()));
                }
                self.0.set(key, value)
            }

            fn remove(&self, key: &str) -> Result<()> {
                self.0.remove(key)
            }
        }

        let storage = MemoryStorage::new();
        storage.set("iso-builder-storage", "{broken").unwrap();

        let mut store = WorldStore::open(
            BlockRegistry::with_defaults(),
            NoBackup(storage.clone()),
            ManualClock::new(0),
            EditorConfig::default(),
        );
        store.add_block(cube(0.5, 0.0, 0.5));
        assert_eq!(store.blocks().len(), 1);
        assert_eq!(storage.get("iso-builder-storage").unwrap().as_deref(), Some("{broken"));
    }

    #[test]
    fn test_every_mutation_is_written() {
        let (mut store, _, storage) = test_store();
        assert_eq!(storage.get("iso-builder-storage").unwrap(), None);

        store.add_block(cube(0.5, 0.0, 0.5));
        let stored = storage.get("iso-builder-storage").unwrap().unwrap();
        let state = decode_state(&stored).unwrap().state;
        assert_eq!(state.blocks.len(), 1);
    }
}
