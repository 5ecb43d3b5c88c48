//! Editing session: the stream list, interval configuration and the
//! build → solve → inspect workflow against a [`SolverBackend`].
//!
//! Any edit to streams or configuration invalidates the built network, the
//! solve results and both detail caches.

use hen_payload::{PayloadSi, build_payload_si};
use hen_project::schema::{IntervalsConfig, Stream, StreamKind, Streamset, ThermalKind};
use hen_project::{Issue, canonicalize, migrate_to_latest, new_stream, validate_all};

use crate::backend::SolverBackend;
use crate::detail_cache::{DetailCache, Lookup, RequestToken};
use crate::error::{AppError, AppResult};
use crate::results::{
    BuildResponse, DetailMatrix, SolveResponse, StreamDetail, StreamUnit, move_item,
};

type MatchKey = (String, String);
type StreamKey = (String, StreamUnit);

pub struct Session<B> {
    backend: B,
    streams: Vec<Stream>,
    config: IntervalsConfig,
    built: Option<BuildResponse>,
    results: Option<SolveResponse>,
    hot_order: Vec<String>,
    cold_order: Vec<String>,
    match_cache: DetailCache<MatchKey, DetailMatrix>,
    stream_cache: DetailCache<StreamKey, StreamDetail>,
}

impl<B: SolverBackend> Session<B> {
    /// A session holding one default hot and one default cold stream.
    pub fn new(backend: B) -> Self {
        let streams = vec![
            new_stream(1, ThermalKind::Hot),
            new_stream(1, ThermalKind::Cold),
        ];
        Self::with_streams(backend, streams, IntervalsConfig::default())
    }

    pub fn with_streams(backend: B, streams: Vec<Stream>, config: IntervalsConfig) -> Self {
        Self {
            backend,
            streams,
            config,
            built: None,
            results: None,
            hot_order: Vec::new(),
            cold_order: Vec::new(),
            match_cache: DetailCache::new(),
            stream_cache: DetailCache::new(),
        }
    }

    pub fn from_streamset(backend: B, streamset: Streamset) -> AppResult<Self> {
        let streamset = migrate_to_latest(streamset)?;
        Ok(Self::with_streams(
            backend,
            streamset.streams,
            streamset.intervals_config,
        ))
    }

    /// Replace the editable state with a loaded streamset.
    pub fn load_streamset(&mut self, streamset: Streamset) -> AppResult<()> {
        let streamset = migrate_to_latest(streamset)?;
        self.streams = streamset.streams;
        self.config = streamset.intervals_config;
        self.invalidate();
        Ok(())
    }

    pub fn to_streamset(&self, name: impl Into<String>) -> Streamset {
        Streamset::new(name, self.streams.clone(), self.config.clone())
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn streams(&self) -> &[Stream] {
        &self.streams
    }

    pub fn stream(&self, id: &str) -> Option<&Stream> {
        self.streams.iter().find(|s| s.id == id)
    }

    pub fn config(&self) -> &IntervalsConfig {
        &self.config
    }

    fn index_of(&self, id: &str) -> AppResult<usize> {
        self.streams
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| AppError::StreamNotFound(id.to_string()))
    }

    fn invalidate(&mut self) {
        if self.built.is_some() || self.results.is_some() {
            tracing::debug!("Model edited; discarding build and results");
        }
        self.built = None;
        self.results = None;
        self.hot_order.clear();
        self.cold_order.clear();
        self.match_cache.clear();
        self.stream_cache.clear();
    }

    /// Append a default stream numbered after the existing ones of the same
    /// side. Returns its id.
    pub fn add_stream(&mut self, thermal: ThermalKind) -> String {
        let n = self.streams.iter().filter(|s| s.thermal == thermal).count() + 1;
        let stream = new_stream(n, thermal);
        let id = stream.id.clone();
        self.streams.push(stream);
        self.invalidate();
        id
    }

    /// Append a copy of stream `id`. Returns the copy's id.
    pub fn duplicate_stream(&mut self, id: &str) -> AppResult<String> {
        let copy = self.streams[self.index_of(id)?].duplicate();
        let new_id = copy.id.clone();
        self.streams.push(copy);
        self.invalidate();
        Ok(new_id)
    }

    pub fn delete_stream(&mut self, id: &str) -> AppResult<Stream> {
        let idx = self.index_of(id)?;
        let removed = self.streams.remove(idx);
        self.invalidate();
        Ok(removed)
    }

    /// Replace stream `id`, keeping its identity.
    pub fn update_stream(&mut self, id: &str, mut stream: Stream) -> AppResult<()> {
        let idx = self.index_of(id)?;
        stream.id = id.to_string();
        self.streams[idx] = stream;
        self.invalidate();
        Ok(())
    }

    pub fn set_kind(&mut self, id: &str, kind: StreamKind) -> AppResult<()> {
        let idx = self.index_of(id)?;
        let stream = self.streams[idx].clone();
        self.streams[idx] = canonicalize(stream, kind);
        self.invalidate();
        Ok(())
    }

    pub fn set_config(&mut self, config: IntervalsConfig) {
        self.config = config;
        self.invalidate();
    }

    pub fn issues(&self) -> Vec<Issue> {
        validate_all(&self.streams, Some(&self.config))
    }

    pub fn payload(&self) -> PayloadSi {
        build_payload_si(&self.streams, Some(&self.config))
    }

    /// Submit the model for building. Refused while validation reports errors.
    pub fn build(&mut self) -> AppResult<&BuildResponse> {
        let errors = self.issues().iter().filter(|i| i.is_error()).count();
        if errors > 0 {
            tracing::warn!(errors, "Build refused: fix validation errors first");
            return Err(AppError::Blocked { errors });
        }

        let payload = self.payload();
        self.invalidate();
        let response = self.backend.build(&payload)?;
        if !response.ok {
            return Err(AppError::Backend {
                message: "Build failed".to_string(),
            });
        }
        tracing::info!(streams = payload.streams.len(), "Network built");
        Ok(&*self.built.insert(response))
    }

    pub fn is_built(&self) -> bool {
        self.built.is_some()
    }

    pub fn solve(&mut self) -> AppResult<&SolveResponse> {
        if self.built.is_none() {
            return Err(AppError::NotBuilt);
        }

        let response = self.backend.solve()?;
        if !response.ok {
            return Err(AppError::Backend {
                message: "Solve failed".to_string(),
            });
        }
        self.match_cache.clear();
        self.stream_cache.clear();

        let response = response.ingest();
        self.hot_order = response.hot_names.clone();
        self.cold_order = response.cold_names.clone();
        tracing::info!(
            edges = response.edges.len(),
            obj_value = ?response.obj_value,
            "Solve completed"
        );
        Ok(&*self.results.insert(response))
    }

    pub fn results(&self) -> Option<&SolveResponse> {
        self.results.as_ref()
    }

    /// Hot stream names in display order.
    pub fn hot_order(&self) -> &[String] {
        &self.hot_order
    }

    pub fn cold_order(&self) -> &[String] {
        &self.cold_order
    }

    pub fn move_hot(&mut self, from: usize, to: usize) {
        self.hot_order = move_item(&self.hot_order, from, to);
    }

    pub fn move_cold(&mut self, from: usize, to: usize) {
        self.cold_order = move_item(&self.cold_order, from, to);
    }

    /// Start a match-detail lookup. On a miss, fetch with
    /// [`fetch_match_detail`](Self::fetch_match_detail) and hand the result to
    /// [`finish_match_detail`](Self::finish_match_detail).
    pub fn begin_match_detail(&mut self, hot: &str, cold: &str) -> Lookup<DetailMatrix> {
        self.match_cache.begin(&(hot.to_string(), cold.to_string()))
    }

    pub fn fetch_match_detail(&mut self, hot: &str, cold: &str) -> AppResult<DetailMatrix> {
        self.backend.match_detail(hot, cold)
    }

    /// Cache a fetched matrix. Returns it only if no newer lookup started.
    pub fn finish_match_detail(
        &mut self,
        token: RequestToken,
        hot: &str,
        cold: &str,
        matrix: DetailMatrix,
    ) -> Option<DetailMatrix> {
        let key = (hot.to_string(), cold.to_string());
        self.match_cache
            .complete(token, key, matrix.clone())
            .then_some(matrix)
    }

    /// Cached-or-fetched match detail.
    pub fn match_detail(&mut self, hot: &str, cold: &str) -> AppResult<DetailMatrix> {
        match self.begin_match_detail(hot, cold) {
            Lookup::Cached(matrix) => Ok(matrix),
            Lookup::Pending(token) => {
                let matrix = self.fetch_match_detail(hot, cold)?;
                self.finish_match_detail(token, hot, cold, matrix.clone());
                Ok(matrix)
            }
        }
    }

    pub fn begin_stream_detail(&mut self, name: &str, unit: StreamUnit) -> Lookup<StreamDetail> {
        self.stream_cache.begin(&(name.to_string(), unit))
    }

    pub fn fetch_stream_detail(&mut self, name: &str, unit: StreamUnit) -> AppResult<StreamDetail> {
        self.backend.stream_detail(name, unit)
    }

    pub fn finish_stream_detail(
        &mut self,
        token: RequestToken,
        name: &str,
        unit: StreamUnit,
        detail: StreamDetail,
    ) -> Option<StreamDetail> {
        self.stream_cache
            .complete(token, (name.to_string(), unit), detail.clone())
            .then_some(detail)
    }

    pub fn stream_detail(&mut self, name: &str, unit: StreamUnit) -> AppResult<StreamDetail> {
        match self.begin_stream_detail(name, unit) {
            Lookup::Cached(detail) => Ok(detail),
            Lookup::Pending(token) => {
                let detail = self.fetch_stream_detail(name, unit)?;
                self.finish_stream_detail(token, name, unit, detail.clone());
                Ok(detail)
            }
        }
    }
}
